//! Core record type for rideshare.
//!
//! A [`StudentRecord`] is one student's registration: who they are, where they
//! are now, and where they want to go.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::format::DELIMITER;

/// One registered student.
///
/// `name` is the identifying key and compares case-insensitively; the other
/// two fields are free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// The student's name.
    pub name: String,
    /// Where the student wants to go.
    pub destination: String,
    /// Where the student is right now.
    pub current_location: String,
}

impl StudentRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        destination: impl Into<String>,
        current_location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            destination: destination.into(),
            current_location: current_location.into(),
        }
    }

    /// Check whether this record belongs to the given student name.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        eq_ignore_case(&self.name, name)
    }

    /// Check whether this student is heading to the given destination.
    #[must_use]
    pub fn is_going_to(&self, destination: &str) -> bool {
        eq_ignore_case(&self.destination, destination)
    }

    /// Overwrite destination and location with those of `other`.
    ///
    /// The stored name keeps its original spelling.
    pub fn update_from(&mut self, other: &StudentRecord) {
        self.destination.clone_from(&other.destination);
        self.current_location.clone_from(&other.current_location);
    }

    /// Check that every field can be written to the line format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if a field contains the field
    /// delimiter or a line break.
    pub fn validate(&self) -> Result<()> {
        check_field("name", &self.name)?;
        check_field("destination", &self.destination)?;
        check_field("current location", &self.current_location)
    }
}

fn check_field(field: &'static str, value: &str) -> Result<()> {
    if value.contains(DELIMITER) {
        return Err(Error::invalid_field(
            field,
            format!("must not contain '{DELIMITER}'"),
        ));
    }
    if value.contains(['\n', '\r']) {
        return Err(Error::invalid_field(field, "must be a single line"));
    }
    Ok(())
}

/// Case-insensitive equality using Unicode lowercase folding.
#[must_use]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new() {
        let record = StudentRecord::new("Ali", "Saddar", "Library");
        assert_eq!(record.name, "Ali");
        assert_eq!(record.destination, "Saddar");
        assert_eq!(record.current_location, "Library");
    }

    #[test]
    fn test_has_name_ignores_case() {
        let record = StudentRecord::new("Ali", "Saddar", "Library");
        assert!(record.has_name("ALI"));
        assert!(record.has_name("ali"));
        assert!(!record.has_name("Alia"));
        assert!(!record.has_name(""));
    }

    #[test]
    fn test_is_going_to_ignores_case() {
        let record = StudentRecord::new("Sara", "Hayatabad", "Cafe");
        assert!(record.is_going_to("hayatabad"));
        assert!(record.is_going_to("HAYATABAD"));
        assert!(!record.is_going_to("Saddar"));
    }

    #[test]
    fn test_eq_ignore_case_unicode() {
        assert!(eq_ignore_case("ÉCOLE", "école"));
        assert!(eq_ignore_case("", ""));
        assert!(!eq_ignore_case("abc", "abcd"));
    }

    #[test]
    fn test_update_from_keeps_name() {
        let mut record = StudentRecord::new("Ali", "Saddar", "Library");
        record.update_from(&StudentRecord::new("ALI", "Hayatabad", "Cafe"));

        assert_eq!(record.name, "Ali");
        assert_eq!(record.destination, "Hayatabad");
        assert_eq!(record.current_location, "Cafe");
    }

    #[test]
    fn test_validate_accepts_free_text() {
        let record = StudentRecord::new("Dr. O'Neil", "Main Gate #2", "");
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_delimiter() {
        let record = StudentRecord::new("Ali", "Saddar|Hayatabad", "Library");
        let err = record.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidField {
                field: "destination",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_line_breaks() {
        let record = StudentRecord::new("Ali\nBaba", "Saddar", "Library");
        assert!(record.validate().is_err());

        let record = StudentRecord::new("Ali", "Saddar", "Library\r");
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_record_serialization() {
        let record = StudentRecord::new("Ali", "Saddar", "Library");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"current_location\":\"Library\""));

        let back: StudentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
