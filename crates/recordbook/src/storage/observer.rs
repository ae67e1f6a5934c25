//! Hooks for load and save outcomes.
//!
//! Load and save never fail from the caller's point of view. What actually
//! happened to each backing file is reported to a [`StoreObserver`] instead.

use std::fmt::Debug;
use std::path::Path;

use tracing::{debug, error};

use crate::error::Error;
use crate::record::RecordType;

/// Receives per-collection load and save outcomes.
///
/// All methods default to doing nothing.
pub trait StoreObserver: Debug + Send + Sync {
    /// A backing file was read and decoded.
    fn loaded(&self, _record_type: RecordType, _path: &Path, _count: usize) {}

    /// A backing file could not be read or decoded; the collection was emptied.
    fn load_failed(&self, _record_type: RecordType, _path: &Path, _error: &Error) {}

    /// A collection was written to its backing file.
    fn saved(&self, _record_type: RecordType, _path: &Path, _count: usize) {}

    /// A collection could not be written; memory and disk now differ.
    fn save_failed(&self, _record_type: RecordType, _path: &Path, _error: &Error) {}
}

/// Default observer: reports outcomes through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl StoreObserver for TracingObserver {
    fn loaded(&self, record_type: RecordType, path: &Path, count: usize) {
        debug!("Loaded {} {} records from {}", count, record_type, path.display());
    }

    fn load_failed(&self, record_type: RecordType, path: &Path, err: &Error) {
        error!(
            "Error loading {} records from {}: {}",
            record_type,
            path.display(),
            err
        );
    }

    fn saved(&self, record_type: RecordType, path: &Path, count: usize) {
        debug!("Saved {} {} records to {}", count, record_type, path.display());
    }

    fn save_failed(&self, record_type: RecordType, path: &Path, err: &Error) {
        error!(
            "Error saving {} records to {}: {}",
            record_type,
            path.display(),
            err
        );
    }
}
