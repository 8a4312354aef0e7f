//! In-memory reference adapters for the repository traits.

pub mod games_memory;
pub mod players_memory;

pub use games_memory::InMemoryGameRepo;
pub use players_memory::InMemoryPlayerDirectory;
