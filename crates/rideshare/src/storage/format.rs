//! Line format for the data file.
//!
//! Each record is one line of the form `name|destination|current_location`.
//! There is no header and no escaping.

use crate::record::StudentRecord;

/// Separator between fields on a line.
pub const DELIMITER: char = '|';

/// Parse one line into a record.
///
/// The line is split into at most three fields. Missing trailing fields come
/// back empty, and any extra delimiters stay verbatim in the last field.
/// A trailing carriage return is dropped. Returns `None` for blank lines.
#[must_use]
pub fn parse_line(line: &str) -> Option<StudentRecord> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() {
        return None;
    }

    let mut fields = line.splitn(3, DELIMITER);
    let name = fields.next().unwrap_or_default();
    let destination = fields.next().unwrap_or_default();
    let current_location = fields.next().unwrap_or_default();

    Some(StudentRecord::new(name, destination, current_location))
}

/// Render a record as one line, without the line terminator.
#[must_use]
pub fn format_line(record: &StudentRecord) -> String {
    format!(
        "{}{DELIMITER}{}{DELIMITER}{}",
        record.name, record.destination, record.current_location
    )
}

/// Parse a whole file body, skipping blank lines.
#[must_use]
pub fn parse_snapshot(contents: &str) -> Vec<StudentRecord> {
    contents.lines().filter_map(parse_line).collect()
}

/// Render a whole snapshot, one `\n`-terminated line per record.
#[must_use]
pub fn format_snapshot(records: &[StudentRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&format_line(record));
        out.push('\n');
    }
    out
}
