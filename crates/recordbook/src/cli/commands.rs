//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::error::{Error, Result};
use crate::record::{Record, RecordType, CREATED_AT_FIELD, ID_FIELD};
use crate::storage::{FileFormat, Store};

/// Fields owned by the store; command-line values for them are ignored.
const IDENTITY_FIELDS: [&str; 2] = [ID_FIELD, CREATED_AT_FIELD];

/// A `field=value` pair given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Field value, stored as a string.
    pub value: String,
}

impl Field {
    /// Parse `name=value`. The value may be empty or contain `=`.
    ///
    /// # Errors
    ///
    /// Returns a message if there is no `=` or the name is empty.
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => Ok(Self {
                name: name.trim().to_string(),
                value: value.to_string(),
            }),
            Some(_) => Err(format!("missing field name in '{s}'")),
            None => Err(format!("expected FIELD=VALUE, got '{s}'")),
        }
    }
}

/// Build a record from command-line fields, later fields winning.
#[must_use]
pub fn fields_to_record(fields: &[Field]) -> Record {
    fields
        .iter()
        .map(|f| (f.name.clone(), f.value.clone()))
        .collect()
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Record type: client, flight or airline
    pub record_type: String,

    /// Fields of the new record, e.g. name=Ada city=London
    #[arg(value_name = "FIELD=VALUE", value_parser = Field::parse)]
    pub fields: Vec<Field>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Record type: client, flight or airline
    pub record_type: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Record type: client, flight or airline
    pub record_type: String,

    /// Record id, e.g. C0001
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,
}

/// Update command arguments.
#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Record type: client, flight or airline
    pub record_type: String,

    /// Id of the record to replace
    pub id: String,

    /// Fields of the replacement record
    #[arg(value_name = "FIELD=VALUE", value_parser = Field::parse)]
    pub fields: Vec<Field>,

    /// Start from the existing record instead of an empty one
    #[arg(short, long)]
    pub merge: bool,
}

impl UpdateCommand {
    /// Replace the record in `store`, keeping its `id` and `created_at`.
    ///
    /// Without `--merge` the replacement holds only the identity fields and
    /// the fields given on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the record type is unknown or no record has the id.
    pub fn apply(&self, store: &mut Store) -> Result<()> {
        let record_type: RecordType = self.record_type.parse()?;
        let existing = store
            .get(record_type, &self.id)?
            .ok_or_else(|| Error::record_not_found(record_type, &self.id))?;

        let mut record = if self.merge {
            existing.clone()
        } else {
            IDENTITY_FIELDS
                .into_iter()
                .filter_map(|field| existing.get(field).map(|value| (field, value.clone())))
                .collect()
        };
        for field in &self.fields {
            if !IDENTITY_FIELDS.contains(&field.name.as_str()) {
                record.insert(field.name.clone(), field.value.clone());
            }
        }

        store.update(record_type, &self.id, record)
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Record type: client, flight or airline
    pub record_type: String,

    /// Id of the record to delete
    pub id: String,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

/// Storage format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// One JSON object per line
    Jsonl,
    /// A single pretty-printed JSON array
    Json,
    /// MessagePack binary
    #[value(alias = "binary")]
    Msgpack,
}

impl From<FormatArg> for FileFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Jsonl => Self::JsonLines,
            FormatArg::Json => Self::Json,
            FormatArg::Msgpack => Self::MessagePack,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One `field: value` block per record
    #[default]
    Plain,
    /// JSON output
    Json,
}
