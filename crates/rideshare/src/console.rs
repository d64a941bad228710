//! Interactive console for the student directory.
//!
//! [`Console`] drives the numbered menu: register, find ride partners, view
//! everyone, clear, exit. It is generic over its input and output so tests can
//! script a whole session. The table renderers are shared with the
//! non-interactive subcommands.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::error::Error;
use crate::record::StudentRecord;
use crate::storage::Directory;

const RULE: &str = "-----------------------------------------------------------";

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Register or update the current student.
    Register,
    /// Find students going to a destination.
    FindPartners,
    /// Show every registered student.
    ViewAll,
    /// Remove every record.
    ClearAll,
    /// Leave the menu loop.
    Exit,
}

impl MenuChoice {
    /// Map a menu number (1-5) to its entry.
    #[must_use]
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(Self::Register),
            2 => Some(Self::FindPartners),
            3 => Some(Self::ViewAll),
            4 => Some(Self::ClearAll),
            5 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Interactive menu over a [`Directory`].
#[derive(Debug)]
pub struct Console<R, W> {
    directory: Directory,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console reading from `input` and writing to `output`.
    pub fn new(directory: Directory, input: R, output: W) -> Self {
        Self {
            directory,
            input,
            output,
        }
    }

    /// Consume the console and hand back its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu loop until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails;
    /// directory errors are reported to the user and the loop continues.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "*** Welcome to University Ride Share System ***"
        )?;
        writeln!(
            self.output,
            "Data is permanently stored in: {}",
            self.directory.path().display()
        )?;

        loop {
            self.show_menu()?;
            let Some(line) = self.prompt("\nEnter your choice: ")? else {
                debug!("Input closed, leaving menu");
                break;
            };

            let choice = match line.trim().parse::<u32>() {
                Ok(n) => MenuChoice::from_number(n),
                Err(_) => {
                    writeln!(self.output, "Invalid input. Please enter a number.")?;
                    continue;
                }
            };

            match choice {
                Some(MenuChoice::Register) => self.register()?,
                Some(MenuChoice::FindPartners) => self.find_partners()?,
                Some(MenuChoice::ViewAll) => self.view_all()?,
                Some(MenuChoice::ClearAll) => self.clear_all()?,
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Exiting application. Goodbye!")?;
                    break;
                }
                None => writeln!(self.output, "Invalid choice. Try again.")?,
            }
            writeln!(self.output, "\n----------------------------------------")?;
        }

        self.output.flush()
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== UNIVERSITY RIDE SHARE SYSTEM ===")?;
        writeln!(self.output, "1. Register / Update My Location")?;
        writeln!(self.output, "2. Find Students Going to My Destination")?;
        writeln!(self.output, "3. View All Registered Students")?;
        writeln!(self.output, "4. Clear All Data")?;
        writeln!(self.output, "5. Exit")
    }

    fn register(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- REGISTER / UPDATE STATUS ---")?;

        let Some(name) = self.prompt("Enter your Name: ")? else {
            return Ok(());
        };
        let Some(destination) =
            self.prompt("Enter your Destination (e.g., Saddar, Hayatabad): ")?
        else {
            return Ok(());
        };
        let Some(location) =
            self.prompt("Enter your Current Location (e.g., Library, Cafe): ")?
        else {
            return Ok(());
        };

        match self
            .directory
            .upsert(StudentRecord::new(name, destination, location))
        {
            Ok(outcome) => {
                if outcome.was_new {
                    writeln!(self.output, "\n✓ SUCCESS: You have been registered!")?;
                } else {
                    writeln!(self.output, "\n✓ SUCCESS: Your details have been UPDATED!")?;
                }
                writeln!(self.output, "[Info] Data saved to disk permanently.")
            }
            Err(e) => writeln!(self.output, "{}", user_message(&e)),
        }
    }

    fn find_partners(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- FIND RIDE PARTNERS ---")?;

        if self.directory.list_all().is_empty() {
            return writeln!(self.output, "No data found. Be the first to register!");
        }

        let Some(target) = self.prompt("Where do you want to go? ")? else {
            return Ok(());
        };

        writeln!(self.output, "\nSearching for students going to: {target}...")?;
        let partners = self.directory.find_by_destination(&target);
        if partners.is_empty() {
            writeln!(self.output, "No students found going to '{target}' yet.")
        } else {
            render_partner_table(&mut self.output, &partners)
        }
    }

    fn view_all(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- ALL REGISTERED STUDENTS ---")?;

        let records = self.directory.list_all();
        if records.is_empty() {
            return writeln!(
                self.output,
                "No students registered yet. Database is empty."
            );
        }
        render_directory_table(&mut self.output, &records)
    }

    fn clear_all(&mut self) -> io::Result<()> {
        let count = self.directory.list_all().len();
        if count == 0 {
            return writeln!(self.output, "No data to clear.");
        }

        writeln!(
            self.output,
            "\n⚠️  WARNING: This will delete ALL {count} student records!"
        )?;
        let Some(answer) = self.prompt("Are you sure? (y/n): ")? else {
            return Ok(());
        };

        if !answer.trim_start().starts_with(['y', 'Y']) {
            return writeln!(self.output, "Operation cancelled.");
        }

        match self.directory.clear_all() {
            Ok(_) => writeln!(self.output, "✓ All data has been permanently deleted."),
            Err(e) => writeln!(self.output, "{}", user_message(&e)),
        }
    }

    /// Print `label` and read one line, without its terminator.
    ///
    /// Returns `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Turn a directory error into the message shown to the user.
#[must_use]
pub fn user_message(err: &Error) -> String {
    match err {
        Error::CapacityExceeded { capacity } => {
            format!("[ERROR] Database full ({capacity} students max).")
        }
        Error::IoFailure { path, .. } => format!(
            "[ERROR] Cannot write to database file {}!\n\
             [INFO] Make sure the program has write permissions.",
            path.display()
        ),
        Error::StorageUnavailable { path, .. } => format!(
            "[ERROR] Cannot read database file {}. Check folder permissions!",
            path.display()
        ),
        other => format!("[ERROR] {other}"),
    }
}

/// Write the numbered table of every student, followed by the total.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render_directory_table(out: &mut impl Write, records: &[StudentRecord]) -> io::Result<()> {
    let index_width = records.len().to_string().len().max(1);
    let name_width = column_width("Name", records.iter().map(|r| r.name.as_str()));
    let dest_width = column_width(
        "Destination",
        records.iter().map(|r| r.destination.as_str()),
    );

    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "{:<index_width$}  {:<name_width$}  {:<dest_width$}  Current Location",
        "#", "Name", "Destination"
    )?;
    writeln!(
        out,
        "{:<index_width$}  {:<name_width$}  {:<dest_width$}  ----------------",
        "-", "----", "-----------"
    )?;
    for (i, record) in records.iter().enumerate() {
        writeln!(
            out,
            "{:<index_width$}  {}  {}  {}",
            i + 1,
            pad(&record.name, name_width),
            pad(&record.destination, dest_width),
            record.current_location
        )?;
    }
    writeln!(out, "{RULE}")?;
    writeln!(out, "Total students: {}", records.len())
}

/// Write the name / current location table of ride partners.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render_partner_table(out: &mut impl Write, records: &[StudentRecord]) -> io::Result<()> {
    let name_width = column_width("Name", records.iter().map(|r| r.name.as_str()));

    writeln!(out, "{RULE}")?;
    writeln!(out, "{:<name_width$}  Current Location", "Name")?;
    writeln!(out, "{:<name_width$}  ----------------", "----")?;
    for record in records {
        writeln!(
            out,
            "{}  {}",
            pad(&record.name, name_width),
            record.current_location
        )?;
    }
    writeln!(out, "{RULE}")
}

/// Write one short line per record.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render_plain(out: &mut impl Write, records: &[StudentRecord]) -> io::Result<()> {
    for record in records {
        writeln!(
            out,
            "{} -> {} (at {})",
            record.name, record.destination, record.current_location
        )?;
    }
    Ok(())
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}

/// Left-align `value` in `width` characters.
fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    format!("{value}{}", " ".repeat(width.saturating_sub(len)))
}
