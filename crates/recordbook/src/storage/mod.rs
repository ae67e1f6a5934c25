//! Storage layer for recordbook.
//!
//! This module provides flat-file persistence for the client, flight and
//! airline collections. Every mutation rewrites every backing file.

pub mod format;
pub mod observer;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::record::{self, IntoRecordType, Record, RecordId, RecordType};

pub use format::FileFormat;
pub use observer::{StoreObserver, TracingObserver};

/// The three in-memory collections.
#[derive(Debug, Default)]
struct Collections {
    client: Vec<Record>,
    flight: Vec<Record>,
    airline: Vec<Record>,
}

impl Collections {
    fn get(&self, record_type: RecordType) -> &Vec<Record> {
        match record_type {
            RecordType::Client => &self.client,
            RecordType::Flight => &self.flight,
            RecordType::Airline => &self.airline,
        }
    }

    fn get_mut(&mut self, record_type: RecordType) -> &mut Vec<Record> {
        match record_type {
            RecordType::Client => &mut self.client,
            RecordType::Flight => &mut self.flight,
            RecordType::Airline => &mut self.airline,
        }
    }
}

/// Record store for clients, flights and airlines.
///
/// Holds all three collections in memory and mirrors each one to a single
/// backing file under `root`. Mutations persist immediately; load and save
/// problems are reported to the [`StoreObserver`] and never returned.
#[derive(Debug)]
pub struct Store {
    /// Directory holding the backing files.
    root: PathBuf,
    /// Encoding of the backing files.
    format: FileFormat,
    /// In-memory collections.
    collections: Collections,
    /// Receives load/save outcomes.
    observer: Arc<dyn StoreObserver>,
}

impl Store {
    /// Open a store rooted at `root`, logging load/save problems via `tracing`.
    ///
    /// Creates the directory if it doesn't exist, then loads all collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl AsRef<Path>, format: FileFormat) -> Result<Self> {
        Self::with_observer(root, format, Arc::new(TracingObserver))
    }

    /// Open a store that reports load/save outcomes to `observer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_observer(
        root: impl AsRef<Path>,
        format: FileFormat,
        observer: Arc<dyn StoreObserver>,
    ) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        if !root.exists() {
            std::fs::create_dir_all(&root).map_err(|source| Error::DirectoryCreate {
                path: root.clone(),
                source,
            })?;
        }

        let mut store = Self {
            root,
            format,
            collections: Collections::default(),
            observer,
        };
        store.load();

        info!(
            "Record store opened at {} ({} format)",
            store.root.display(),
            store.format
        );
        Ok(store)
    }

    /// Open the store described by the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::open(config.data_dir(), config.storage.format)
    }

    /// Directory holding the backing files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Encoding of the backing files.
    #[must_use]
    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Backing file of a collection: `<root>/<type>.<ext>`.
    #[must_use]
    pub fn path_for(&self, record_type: RecordType) -> PathBuf {
        self.root
            .join(format!("{}.{}", record_type.name(), self.format.extension()))
    }

    /// Reload every collection from disk.
    ///
    /// A missing file leaves the collection untouched. A file that cannot be
    /// read or decoded empties the collection and is reported as
    /// `load_failed`.
    pub fn load(&mut self) {
        for record_type in RecordType::ALL {
            let path = self.path_for(record_type);
            if !path.exists() {
                debug!("No {} file at {}", record_type, path.display());
                continue;
            }

            let decoded = std::fs::read(&path)
                .map_err(Error::from)
                .and_then(|bytes| self.format.decode(&bytes));

            match decoded {
                Ok(records) => {
                    self.observer.loaded(record_type, &path, records.len());
                    *self.collections.get_mut(record_type) = records;
                }
                Err(err) => {
                    self.observer.load_failed(record_type, &path, &err);
                    self.collections.get_mut(record_type).clear();
                }
            }
        }
    }

    /// Write every collection to disk.
    ///
    /// Each collection is written independently; a failure is reported as
    /// `save_failed` and does not stop the others or touch memory.
    pub fn save(&self) {
        for record_type in RecordType::ALL {
            let path = self.path_for(record_type);
            let records = self.collections.get(record_type);

            let written = self
                .format
                .encode(records)
                .and_then(|bytes| std::fs::write(&path, bytes).map_err(Error::from));

            match written {
                Ok(()) => self.observer.saved(record_type, &path, records.len()),
                Err(err) => self.observer.save_failed(record_type, &path, &err),
            }
        }
    }

    /// Add a record, assigning its `id` and `created_at`.
    ///
    /// Any `id` or `created_at` already present is overwritten. Returns the
    /// new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the record type is unknown or the last record of
    /// the collection has an id the sequence cannot continue from.
    pub fn add(&mut self, record_type: impl IntoRecordType, mut record: Record) -> Result<RecordId> {
        let record_type = record_type.into_record_type()?;
        let records = self.collections.get_mut(record_type);

        let id = record::next_id(record_type, records)?;
        record.stamp(&id);
        records.push(record);
        debug!("Added {} record {}", record_type, id);

        self.save();
        Ok(id)
    }

    /// Replace the record with the given id.
    ///
    /// The replacement is stored verbatim; fields it doesn't carry are lost.
    ///
    /// # Errors
    ///
    /// Returns an error if the record type is unknown or no record has `id`.
    /// Nothing is written in either case.
    pub fn update(
        &mut self,
        record_type: impl IntoRecordType,
        id: &str,
        record: Record,
    ) -> Result<()> {
        let record_type = record_type.into_record_type()?;
        let slot = self
            .collections
            .get_mut(record_type)
            .iter_mut()
            .find(|existing| existing.has_id(id))
            .ok_or_else(|| Error::record_not_found(record_type, id))?;

        *slot = record;
        debug!("Updated {} record {}", record_type, id);

        self.save();
        Ok(())
    }

    /// Remove every record with the given id.
    ///
    /// Deleting an id that doesn't exist is not an error; the collections
    /// are still written.
    ///
    /// # Errors
    ///
    /// Returns an error if the record type is unknown.
    pub fn delete(&mut self, record_type: impl IntoRecordType, id: &str) -> Result<()> {
        let record_type = record_type.into_record_type()?;
        let records = self.collections.get_mut(record_type);

        let before = records.len();
        records.retain(|record| !record.has_id(id));
        debug!(
            "Deleted {} {} record(s) with id {}",
            before - records.len(),
            record_type,
            id
        );

        self.save();
        Ok(())
    }

    /// All records of a type, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the record type is unknown.
    pub fn records(&self, record_type: impl IntoRecordType) -> Result<&[Record]> {
        let record_type = record_type.into_record_type()?;
        Ok(self.collections.get(record_type))
    }

    /// Look up a record by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the record type is unknown.
    pub fn get(&self, record_type: impl IntoRecordType, id: &str) -> Result<Option<&Record>> {
        Ok(self
            .records(record_type)?
            .iter()
            .find(|record| record.has_id(id)))
    }

    /// Number of records of a type.
    ///
    /// # Errors
    ///
    /// Returns an error if the record type is unknown.
    pub fn len(&self, record_type: impl IntoRecordType) -> Result<usize> {
        Ok(self.records(record_type)?.len())
    }

    /// Check whether a collection is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the record type is unknown.
    pub fn is_empty(&self, record_type: impl IntoRecordType) -> Result<bool> {
        Ok(self.records(record_type)?.is_empty())
    }
}
