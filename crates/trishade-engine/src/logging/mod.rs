//! Logging utilities.
//!
//! Everything logs through the `log` facade; `init_logging` installs
//! `env_logger` and, when configured, tees every record into an append-only
//! session log file.

mod init;

pub use init::{LoggingConfig, init_logging, restart_log_file};
