//! Backend test support utilities
//!
//! Shared helpers for the backend's integration test binaries. Currently this
//! is the unified logging bootstrap; fixtures that need backend types live in
//! the backend's own `tests/support` tree.

pub mod logging;
