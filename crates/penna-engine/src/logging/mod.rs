//! Logging utilities.
//!
//! Centralizes logger initialization. Library modules log through the `log`
//! facade only; the `env_logger` backend is wired up here, once, by the
//! application.

mod init;

pub use init::{init_logging, LoggingConfig};
