//! `odolog` - Record vehicle odometer readings in a local database.
//!
//! This library provides the storage layer, text report, and action
//! dispatch that the `odolog` binary is built on.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod actions;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod reading;
pub mod report;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use reading::Reading;
pub use storage::{Storage, StorageStats};
