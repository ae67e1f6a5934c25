//! On-disk encodings for record collections.
//!
//! Each collection is stored in one file whose layout depends on the
//! [`FileFormat`] chosen when the store is opened.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};
use crate::record::Record;

/// Indentation used by the single-document JSON format.
const JSON_INDENT: &[u8] = b"    ";

/// Serialization format for backing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FileFormat {
    /// One compact JSON object per line.
    #[default]
    #[serde(rename = "jsonl")]
    JsonLines,
    /// One pretty-printed JSON array per file.
    #[serde(rename = "json")]
    Json,
    /// A MessagePack array of maps.
    #[serde(rename = "msgpack", alias = "binary")]
    MessagePack,
}

impl FileFormat {
    /// All supported formats.
    pub const ALL: [Self; 3] = [Self::JsonLines, Self::Json, Self::MessagePack];

    /// Canonical name of the format.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::JsonLines => "jsonl",
            Self::Json => "json",
            Self::MessagePack => "msgpack",
        }
    }

    /// File extension for backing files.
    ///
    /// Both JSON flavours share the `json` extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::JsonLines | Self::Json => "json",
            Self::MessagePack => "msgpack",
        }
    }

    /// Encode a whole collection.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be serialized.
    pub fn encode(self, records: &[Record]) -> Result<Vec<u8>> {
        match self {
            Self::JsonLines => {
                let mut out = Vec::new();
                for record in records {
                    serde_json::to_writer(&mut out, record)?;
                    out.push(b'\n');
                }
                Ok(out)
            }
            Self::Json => {
                let mut out = Vec::new();
                let mut ser =
                    Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(JSON_INDENT));
                records.serialize(&mut ser)?;
                Ok(out)
            }
            Self::MessagePack => Ok(rmp_serde::to_vec_named(records)?),
        }
    }

    /// Decode a whole collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid collection in this format.
    pub fn decode(self, bytes: &[u8]) -> Result<Vec<Record>> {
        match self {
            Self::JsonLines => bytes
                .split(|b| *b == b'\n')
                .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
                .map(|line| serde_json::from_slice::<Record>(line).map_err(Error::from))
                .collect(),
            Self::Json => Ok(serde_json::from_slice(bytes)?),
            Self::MessagePack => Ok(rmp_serde::from_slice(bytes)?),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FileFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "jsonl" => Ok(Self::JsonLines),
            "json" => Ok(Self::Json),
            "msgpack" | "binary" => Ok(Self::MessagePack),
            _ => Err(Error::UnsupportedFormat {
                name: s.to_string(),
            }),
        }
    }
}
