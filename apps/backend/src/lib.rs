#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod outcome;
pub mod repos;
pub mod services;
pub mod telemetry;


// Re-exports for public API
pub use adapters::{InMemoryGameRepo, InMemoryPlayerDirectory};
pub use config::game::GameServiceConfig;
pub use error::{AppError, CardEndpointError};
pub use errors::ErrorCode;
pub use outcome::{AsyncOutcome, Outcome, OutcomeExt};
pub use services::GameService;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
