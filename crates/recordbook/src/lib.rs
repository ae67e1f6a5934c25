//! `recordbook` - Flat-file record store for clients, flights and airlines
//!
//! This library keeps three collections of field-map records in memory,
//! assigns each new record a sequential id such as `C0001`, and rewrites
//! the backing files after every change.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{IntoRecordType, Record, RecordId, RecordType};
pub use storage::{FileFormat, Store, StoreObserver, TracingObserver};
