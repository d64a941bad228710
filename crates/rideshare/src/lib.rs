//! `rideshare` - A student directory for coordinating informal ride-sharing
//!
//! Students register where they are and where they are heading; anyone can then
//! look up classmates going to the same place. All records live in a single
//! pipe-delimited text file that is read whole and rewritten atomically.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod record;
pub mod storage;

pub use config::Config;
pub use console::Console;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::StudentRecord;
pub use storage::{Directory, DirectoryStats, UpsertOutcome};
