//! Core record types for recordbook.
//!
//! This module defines the three record collections the store manages and
//! the field-map representation of a single record.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::Local;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Field holding the store-assigned identifier.
pub const ID_FIELD: &str = "id";

/// Field holding the creation timestamp.
pub const CREATED_AT_FIELD: &str = "created_at";

/// Minimum number of digits in a generated id.
const ID_DIGITS: usize = 4;

/// The kind of record a collection holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    /// A customer of the travel agency.
    Client,
    /// A booked flight.
    Flight,
    /// An airline company.
    Airline,
}

impl RecordType {
    /// All record types, in the order collections are loaded and saved.
    pub const ALL: [Self; 3] = [Self::Client, Self::Flight, Self::Airline];

    /// The lowercase name, also used as the backing file stem.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Flight => "flight",
            Self::Airline => "airline",
        }
    }

    /// Single-letter id prefix: the first letter of the name, uppercased.
    #[must_use]
    pub fn prefix(self) -> char {
        match self {
            Self::Client => 'C',
            Self::Flight => 'F',
            Self::Airline => 'A',
        }
    }

    /// Format the id for the given sequence number, e.g. `C0001`.
    #[must_use]
    pub fn format_id(self, sequence: u64) -> RecordId {
        RecordId(format!("{}{sequence:0width$}", self.prefix(), width = ID_DIGITS))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "client" => Ok(Self::Client),
            "flight" => Ok(Self::Flight),
            "airline" => Ok(Self::Airline),
            other => Err(Error::invalid_record_type(other)),
        }
    }
}

/// Conversion into a [`RecordType`], failing for unknown type names.
///
/// Lets store operations take either a typed [`RecordType`] or the raw name
/// handed over by a string-typed caller such as the CLI.
pub trait IntoRecordType {
    /// Resolve the record type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecordType`] if the name is not recognized.
    fn into_record_type(self) -> Result<RecordType>;
}

impl IntoRecordType for RecordType {
    fn into_record_type(self) -> Result<RecordType> {
        Ok(self)
    }
}

impl IntoRecordType for &str {
    fn into_record_type(self) -> Result<RecordType> {
        self.parse()
    }
}

impl IntoRecordType for &String {
    fn into_record_type(self) -> Result<RecordType> {
        self.parse()
    }
}

impl IntoRecordType for String {
    fn into_record_type(self) -> Result<RecordType> {
        self.parse()
    }
}

/// A store-assigned record identifier such as `F0002`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric part of an id: everything after the leading prefix character.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecordId`] if the remainder is not all digits.
    pub fn sequence_of(id: &str) -> Result<u64> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| Regex::new(r"^.(\d+)$").expect("valid id pattern"));

        pattern
            .captures(id)
            .and_then(|caps| caps[1].parse().ok())
            .ok_or_else(|| Error::MalformedRecordId { id: id.to_string() })
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

/// A single record: an ordered map from field name to value.
///
/// Field values are free-form; only `id` and `created_at` have meaning to
/// the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field, returning the previous value if any.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    /// Get a field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Get a field value if it is a string.
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// The record's id, if it has a string `id` field.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get_str(ID_FIELD)
    }

    /// The record's creation timestamp, if present.
    #[must_use]
    pub fn created_at(&self) -> Option<&str> {
        self.get_str(CREATED_AT_FIELD)
    }

    /// Check whether this record carries the given id.
    #[must_use]
    pub fn has_id(&self, id: &str) -> bool {
        self.id() == Some(id)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrow the underlying field map.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Stamp identity fields, overwriting any caller-supplied values.
    pub(crate) fn stamp(&mut self, id: &RecordId) {
        self.insert(ID_FIELD, id.as_str());
        self.insert(CREATED_AT_FIELD, now_iso8601());
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.0)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Compute the id the next record appended to `records` should receive.
///
/// The sequence continues from the last record's id, so deleting the tail
/// record and adding again hands out the same id.
///
/// # Errors
///
/// Returns [`Error::MissingRecordId`] if the last record has no `id` field,
/// and [`Error::MalformedRecordId`] if its id has no sequence number that can
/// be incremented.
pub fn next_id(record_type: RecordType, records: &[Record]) -> Result<RecordId> {
    let Some(last) = records.last() else {
        return Ok(record_type.format_id(1));
    };
    let id = last.id().ok_or(Error::MissingRecordId { record_type })?;
    let next = RecordId::sequence_of(id)?
        .checked_add(1)
        .ok_or_else(|| Error::MalformedRecordId { id: id.to_string() })?;
    Ok(record_type.format_id(next))
}

/// Current local time as `YYYY-MM-DDTHH:MM:SS.ffffff`.
fn now_iso8601() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_id(id: &str) -> Record {
        Record::new().with(ID_FIELD, id)
    }

    #[test]
    fn test_record_type_names_and_prefixes() {
        assert_eq!(RecordType::Client.name(), "client");
        assert_eq!(RecordType::Flight.name(), "flight");
        assert_eq!(RecordType::Airline.name(), "airline");
        assert_eq!(RecordType::Client.prefix(), 'C');
        assert_eq!(RecordType::Flight.prefix(), 'F');
        assert_eq!(RecordType::Airline.prefix(), 'A');
    }

    #[test]
    fn test_record_type_parse() {
        assert_eq!("client".parse::<RecordType>().unwrap(), RecordType::Client);
        assert_eq!("airline".parse::<RecordType>().unwrap(), RecordType::Airline);

        let err = "hotel".parse::<RecordType>().unwrap_err();
        assert!(err.is_invalid_record_type());
        // Names are exact, not case-folded.
        assert!("Client".parse::<RecordType>().is_err());
    }

    #[test]
    fn test_into_record_type() {
        assert_eq!(
            RecordType::Flight.into_record_type().unwrap(),
            RecordType::Flight
        );
        assert_eq!("flight".into_record_type().unwrap(), RecordType::Flight);
        assert!(String::from("car").into_record_type().is_err());
    }

    #[test]
    fn test_record_type_display_roundtrip() {
        for record_type in RecordType::ALL {
            let parsed: RecordType = record_type.to_string().parse().unwrap();
            assert_eq!(parsed, record_type);
        }
    }

    #[test]
    fn test_format_id() {
        assert_eq!(RecordType::Client.format_id(1).as_str(), "C0001");
        assert_eq!(RecordType::Airline.format_id(42).as_str(), "A0042");
        assert_eq!(RecordType::Flight.format_id(12345).as_str(), "F12345");
    }

    #[test]
    fn test_sequence_of() {
        assert_eq!(RecordId::sequence_of("C0007").unwrap(), 7);
        assert_eq!(RecordId::sequence_of("F12345").unwrap(), 12345);
        // The prefix character is not checked, only skipped.
        assert_eq!(RecordId::sequence_of("123").unwrap(), 23);
        assert!(RecordId::sequence_of("C").is_err());
        assert!(RecordId::sequence_of("Cabc").is_err());
        assert!(RecordId::sequence_of("").is_err());
    }

    #[test]
    fn test_next_id_empty() {
        let id = next_id(RecordType::Client, &[]).unwrap();
        assert_eq!(id.as_str(), "C0001");
    }

    #[test]
    fn test_next_id_follows_last_record() {
        let records = vec![with_id("F0009"), with_id("F0003")];
        let id = next_id(RecordType::Flight, &records).unwrap();
        assert_eq!(id.as_str(), "F0004");
    }

    #[test]
    fn test_next_id_missing_id_field() {
        let records = vec![Record::new().with("name", "Ada")];
        let err = next_id(RecordType::Client, &records).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRecordId {
                record_type: RecordType::Client
            }
        ));
    }

    #[test]
    fn test_next_id_sequence_exhausted() {
        let last = format!("C{}", u64::MAX);
        let err = next_id(RecordType::Client, &[with_id(&last)]).unwrap_err();
        assert!(matches!(err, Error::MalformedRecordId { ref id } if *id == last));

        let id = next_id(RecordType::Client, &[with_id(&format!("C{}", u64::MAX - 1))]).unwrap();
        assert_eq!(id.as_str(), format!("C{}", u64::MAX));
    }

    #[test]
    fn test_stamp_overwrites_identity() {
        let mut record = Record::new()
            .with("id", "C9999")
            .with("created_at", "yesterday")
            .with("name", "Ada");
        record.stamp(&RecordType::Client.format_id(1));

        assert_eq!(record.id(), Some("C0001"));
        let created_at = record.created_at().unwrap();
        assert_ne!(created_at, "yesterday");
        assert!(chrono::NaiveDateTime::parse_from_str(created_at, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
        assert_eq!(record.get_str("name"), Some("Ada"));
    }

    #[test]
    fn test_record_preserves_field_order() {
        let record = Record::new()
            .with("zeta", 1)
            .with("alpha", "two")
            .with("mid", Value::Null);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":"two","mid":null}"#);
    }

    #[test]
    fn test_record_from_iter() {
        let record: Record = [("name", "Qantas Airways"), ("country", "Australia")]
            .into_iter()
            .collect();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get_str("country"), Some("Australia"));
        assert!(!record.has_id("A0001"));
    }
}
