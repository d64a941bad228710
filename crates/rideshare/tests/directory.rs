//! End-to-end behaviour of the student directory through the public API.

use std::fs;
use std::io::Cursor;

use rideshare::{Config, Console, Directory, Error, StudentRecord};
use tempfile::tempdir;

fn student(name: &str, destination: &str, location: &str) -> StudentRecord {
    StudentRecord::new(name, destination, location)
}

#[test]
fn test_round_trip_preserves_fields_and_order() {
    let temp_dir = tempdir().unwrap();
    let directory = Directory::new(temp_dir.path().join("data.txt"));
    let records = vec![
        student("Omar", "University Town", "Main Gate"),
        student("Ali", "Saddar", "Library"),
        student("Hina", "Hayatabad", ""),
    ];

    directory.save_all(&records).unwrap();

    let reopened = Directory::new(temp_dir.path().join("data.txt"));
    assert_eq!(reopened.load_all(), records);
}

#[test]
fn test_case_insensitive_identity() {
    let temp_dir = tempdir().unwrap();
    let directory = Directory::new(temp_dir.path().join("data.txt"));

    assert!(directory.upsert(student("Ali", "Saddar", "Library")).unwrap().was_new);
    let second = directory.upsert(student("ALI", "Saddar", "Cafe")).unwrap();

    assert!(!second.was_new);
    assert_eq!(directory.list_all(), vec![student("Ali", "Saddar", "Cafe")]);
}

#[test]
fn test_filter_by_destination() {
    let temp_dir = tempdir().unwrap();
    let directory = Directory::new(temp_dir.path().join("data.txt"));
    directory.upsert(student("Ali", "Saddar", "Library")).unwrap();
    directory.upsert(student("Sara", "saddar", "Cafe")).unwrap();
    directory.upsert(student("Omar", "Hayatabad", "Gate")).unwrap();

    let names: Vec<_> = directory
        .find_by_destination("SADDAR")
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Ali", "Sara"]);
}

#[test]
fn test_capacity_boundary_at_one_hundred() {
    let temp_dir = tempdir().unwrap();
    let directory = Directory::new(temp_dir.path().join("data.txt"));
    let records: Vec<_> = (0..100)
        .map(|i| student(&format!("Student {i}"), "Saddar", "Library"))
        .collect();
    directory.save_all(&records).unwrap();
    let before = fs::read(directory.path()).unwrap();

    let err = directory
        .upsert(student("Student 100", "Saddar", "Library"))
        .unwrap_err();

    assert!(matches!(err, Error::CapacityExceeded { capacity: 100 }));
    assert_eq!(fs::read(directory.path()).unwrap(), before);
    assert_eq!(directory.list_all(), records);

    // Updating an existing student is still allowed when full
    let outcome = directory
        .upsert(student("student 42", "Hayatabad", "Cafe"))
        .unwrap();
    assert!(!outcome.was_new);
    assert_eq!(outcome.records.len(), 100);
}

#[test]
fn test_clear_then_clear_again() {
    let temp_dir = tempdir().unwrap();
    let directory = Directory::new(temp_dir.path().join("data.txt"));
    directory.upsert(student("Ali", "Saddar", "Library")).unwrap();

    assert_eq!(directory.clear_all().unwrap(), 1);
    assert!(directory.list_all().is_empty());
    assert_eq!(directory.clear_all().unwrap(), 0);
}

#[test]
fn test_hand_written_file_with_short_lines() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("data.txt");
    fs::write(&path, "Ali|Saddar\n\nSara|Hayatabad|Cafe\n").unwrap();

    let directory = Directory::new(&path);
    assert_eq!(
        directory.list_all(),
        vec![student("Ali", "Saddar", ""), student("Sara", "Hayatabad", "Cafe")]
    );

    // Saving normalises the short line
    directory.upsert(student("Omar", "Saddar", "Gate")).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Ali|Saddar|\nSara|Hayatabad|Cafe\nOmar|Saddar|Gate\n"
    );
}

#[test]
fn test_config_drives_directory() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    let data_path = temp_dir.path().join("rides").join("students.txt");
    fs::write(
        &config_path,
        format!(
            "[storage]\ndata_file = {:?}\nmax_records = 2\n",
            data_path.display().to_string()
        ),
    )
    .unwrap();

    let config = Config::load_from(Some(config_path)).unwrap();
    let directory = config.directory();
    directory.ensure_storage_exists().unwrap();
    assert!(data_path.exists());

    directory.upsert(student("A", "Saddar", "Library")).unwrap();
    directory.upsert(student("B", "Saddar", "Library")).unwrap();
    let err = directory.upsert(student("C", "Saddar", "Library")).unwrap_err();
    assert!(err.is_capacity_exceeded());
}

#[test]
fn test_console_session_end_to_end() {
    let temp_dir = tempdir().unwrap();
    let directory = Directory::new(temp_dir.path().join("data.txt"));
    let script = "1\nAli\nSaddar\nLibrary\n1\nSara\nsaddar\nCafe\n2\nSADDAR\n3\n5\n";

    let mut console = Console::new(directory.clone(), Cursor::new(script), Vec::new());
    console.run().unwrap();
    let out = String::from_utf8(console.into_output()).unwrap();

    assert!(out.contains("Ali   Library"));
    assert!(out.contains("Sara  Cafe"));
    assert!(out.contains("Total students: 2"));
    assert_eq!(directory.list_all().len(), 2);
}
