//! Domain services orchestrating repositories and the lifecycle engine.

pub mod games;
pub mod responses;

pub use games::GameService;
