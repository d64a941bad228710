//! Storage layer for rideshare.
//!
//! This module provides the student directory: a flat list of
//! [`StudentRecord`]s kept in a pipe-delimited text file. Every operation
//! reloads the whole file, and every mutation rewrites the whole file through
//! a temporary file and an atomic rename.

pub mod format;

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::record::StudentRecord;

/// Default ceiling on the number of registered students.
pub const DEFAULT_CAPACITY: usize = 100;

/// The student directory.
///
/// Holds no records between calls; the data file is the only source of truth.
#[derive(Debug, Clone)]
pub struct Directory {
    /// Path to the data file.
    path: PathBuf,
    /// Maximum number of records `upsert` will allow.
    capacity: usize,
}

/// Result of a successful [`Directory::upsert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// The full snapshot as it was saved.
    pub records: Vec<StudentRecord>,
    /// `true` if the student was appended, `false` if an existing entry was updated.
    pub was_new: bool,
}

/// Directory statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    /// Number of stored records.
    pub total_records: usize,
    /// Configured record ceiling.
    pub capacity: usize,
    /// Number of distinct destinations (case-insensitive).
    pub distinct_destinations: usize,
    /// Size of the data file in bytes.
    pub file_size_bytes: u64,
}

impl Directory {
    /// Create a directory backed by the file at `path` with the default capacity.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_capacity(path, DEFAULT_CAPACITY)
    }

    /// Create a directory with an explicit record ceiling.
    #[must_use]
    pub fn with_capacity(path: impl AsRef<Path>, capacity: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            capacity,
        }
    }

    /// Get the path to the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the record ceiling.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Make sure the data file exists, creating an empty one if needed.
    ///
    /// Parent directories are created as well.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageUnavailable`] if the file cannot be created.
    /// Callers should treat this as a warning: the directory simply reads as
    /// empty until the problem is fixed.
    pub fn ensure_storage_exists(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }

        let unavailable = |source| Error::StorageUnavailable {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = non_empty_parent(&self.path) {
            fs::create_dir_all(parent).map_err(unavailable)?;
        }
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(unavailable)?;

        info!("Created data file at {}", self.path.display());
        Ok(())
    }

    /// Load every record from the data file.
    ///
    /// A missing or unreadable file yields an empty list.
    #[must_use]
    pub fn load_all(&self) -> Vec<StudentRecord> {
        match self.read_bytes() {
            Ok(Some(bytes)) => format::parse_snapshot(&String::from_utf8_lossy(&bytes)),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Treating directory as empty: {e}");
                Vec::new()
            }
        }
    }

    /// List every record in storage order.
    #[must_use]
    pub fn list_all(&self) -> Vec<StudentRecord> {
        self.load_all()
    }

    /// Register a student, or update their entry if the name is already known.
    ///
    /// Names match case-insensitively. An existing entry is updated in place
    /// and keeps its position; a new one is appended.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidField`] if a field cannot be stored in the line format.
    /// - [`Error::StorageUnavailable`] if the data file exists but cannot be read.
    /// - [`Error::CapacityExceeded`] if the student is new and the directory is full.
    /// - [`Error::IoFailure`] if the snapshot cannot be written.
    ///
    /// Nothing is written when an error is returned.
    pub fn upsert(&self, record: StudentRecord) -> Result<UpsertOutcome> {
        record.validate()?;

        let mut records = self.read_snapshot()?;

        let was_new = if let Some(index) = records.iter().position(|r| r.has_name(&record.name)) {
            records[index].update_from(&record);
            debug!("Updated entry for {}", records[index].name);
            false
        } else {
            if records.len() >= self.capacity {
                warn!(
                    "Rejected {}: directory holds {} of {} records",
                    record.name,
                    records.len(),
                    self.capacity
                );
                return Err(Error::CapacityExceeded {
                    capacity: self.capacity,
                });
            }
            debug!("Appending entry for {}", record.name);
            records.push(record);
            true
        };

        self.save_all(&records)?;
        info!(
            "Saved {} records ({})",
            records.len(),
            if was_new { "registered" } else { "updated" }
        );
        Ok(UpsertOutcome { records, was_new })
    }

    /// Find every student heading to `destination`, ignoring case.
    ///
    /// Results keep their storage order.
    #[must_use]
    pub fn find_by_destination(&self, destination: &str) -> Vec<StudentRecord> {
        let matches: Vec<_> = self
            .load_all()
            .into_iter()
            .filter(|r| r.is_going_to(destination))
            .collect();
        debug!("{} students going to {destination}", matches.len());
        matches
    }

    /// Remove every record.
    ///
    /// Returns how many records were removed. An already empty directory is
    /// left untouched and reports zero.
    ///
    /// # Errors
    ///
    /// - [`Error::StorageUnavailable`] if the data file exists but cannot be read.
    /// - [`Error::IoFailure`] if the empty snapshot cannot be written.
    pub fn clear_all(&self) -> Result<usize> {
        let count = match self.read_bytes()? {
            Some(bytes) => format::parse_snapshot(&String::from_utf8_lossy(&bytes)).len(),
            None => 0,
        };
        if count == 0 {
            debug!("Nothing to clear");
            return Ok(0);
        }

        self.save_all(&[])?;
        info!("Cleared {} records", count);
        Ok(count)
    }

    /// Replace the data file with `records`.
    ///
    /// The snapshot is written to a temporary file next to the data file,
    /// synced, and renamed over it, so a failed write leaves the previous
    /// contents intact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IoFailure`] if any step fails.
    pub fn save_all(&self, records: &[StudentRecord]) -> Result<()> {
        let io_failure = |source| Error::IoFailure {
            path: self.path.clone(),
            source,
        };

        let dir = non_empty_parent(&self.path).unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(io_failure)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_failure)?;
        tmp.write_all(format::format_snapshot(records).as_bytes())
            .map_err(io_failure)?;
        tmp.as_file().sync_all().map_err(io_failure)?;

        // Keep the mode of the file being replaced; temp files start out 0600.
        if let Ok(meta) = fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(io_failure)?;
        }
        tmp.persist(&self.path).map_err(|e| io_failure(e.error))?;

        debug!(
            "Wrote {} records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Get directory statistics.
    #[must_use]
    pub fn stats(&self) -> DirectoryStats {
        let records = self.load_all();

        let mut destinations: Vec<&str> = Vec::new();
        for record in &records {
            if !destinations
                .iter()
                .any(|d| crate::record::eq_ignore_case(d, &record.destination))
            {
                destinations.push(&record.destination);
            }
        }

        let file_size_bytes = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);

        DirectoryStats {
            total_records: records.len(),
            capacity: self.capacity,
            distinct_destinations: destinations.len(),
            file_size_bytes,
        }
    }

    /// Load every record for a read-modify-write cycle.
    ///
    /// Unlike [`Directory::load_all`] the contents must be valid UTF-8, so a
    /// rewrite never replaces bytes it could not decode.
    fn read_snapshot(&self) -> Result<Vec<StudentRecord>> {
        let Some(bytes) = self.read_bytes()? else {
            return Ok(Vec::new());
        };
        let contents = String::from_utf8(bytes).map_err(|e| Error::StorageUnavailable {
            path: self.path.clone(),
            source: std::io::Error::new(ErrorKind::InvalidData, e),
        })?;
        Ok(format::parse_snapshot(&contents))
    }

    /// Read the raw data file. A missing file is `None`.
    fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                debug!("Read {} bytes from {}", bytes.len(), self.path.display());
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No data file at {}", self.path.display());
                Ok(None)
            }
            Err(source) => Err(Error::StorageUnavailable {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Parent directory of `path`, or `None` for a bare file name.
fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}
