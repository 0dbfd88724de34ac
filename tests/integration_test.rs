//! Distiller integration tests on real temporary folders

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use photo_gather::component::distiller::{DistillError, DistillRequest, Distiller};
use photo_gather::config::Config;
use photo_gather::tools::calculate_file_hash;
use tempfile::TempDir;

fn distiller() -> Distiller {
    Distiller::new(Config::new().unwrap(), Arc::new(AtomicBool::new(false)))
}

fn request(inputs: &[&Path], step: i64, offset: i64, output: &Path) -> DistillRequest {
    DistillRequest {
        input_folders: inputs.iter().map(|p| p.to_path_buf()).collect(),
        step,
        offset,
        output_folder: output.to_path_buf(),
        all_files: false,
    }
}

/// One image per day, named so that name order is date order
fn create_day_folder(base: &Path, name: &str, days: usize) -> PathBuf {
    let folder = base.join(name);
    fs::create_dir_all(&folder).unwrap();
    for day in 1..=days {
        fs::write(
            folder.join(format!("day_{day:03}.jpg")),
            format!("{name} image of day {day}"),
        )
        .unwrap();
    }
    folder
}

fn file_names(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_every_twentieth_from_offset_five() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_day_folder(temp_dir.path(), "2024", 100);
    let output = temp_dir.path().join("best");

    let result = distiller()
        .distill(&request(&[&input], 20, 5, &output))
        .unwrap();

    // positions 5, 25, 45, 65, 85 are days 6, 26, 46, 66, 86
    let expected: BTreeSet<String> = [6, 26, 46, 66, 86]
        .iter()
        .map(|day| format!("day_{day:03}.jpg"))
        .collect();
    assert_eq!(file_names(&output), expected);
    assert_eq!(result.files_seen, 100);
    assert_eq!(result.selected, 5);
    assert_eq!(result.copied, 5);
    assert_eq!(result.errors, 0);
}

#[test]
fn test_selection_count_per_folder() {
    let temp_dir = TempDir::new().unwrap();
    let first = create_day_folder(temp_dir.path(), "a", 10);
    let second = create_day_folder(temp_dir.path(), "b", 7);
    let output = temp_dir.path().join("out");

    let result = distiller()
        .distill(&request(&[&first, &second], 3, 1, &output))
        .unwrap();

    // a: floor((10-1-1)/3)+1 = 3, b: floor((7-1-1)/3)+1 = 2
    assert_eq!(result.selected, 5);
    assert_eq!(result.folders_scanned, 2);
}

#[test]
fn test_second_run_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_day_folder(temp_dir.path(), "2024", 30);
    let output = temp_dir.path().join("best");
    let req = request(&[&input], 4, 2, &output);

    let first = distiller().distill(&req).unwrap();
    let after_first = file_names(&output);

    let second = distiller().distill(&req).unwrap();

    assert_eq!(file_names(&output), after_first);
    assert_eq!(second.selected, first.selected);
    assert_eq!(second.copied, 0);
    assert_eq!(second.already_present, first.copied);
}

#[test]
fn test_same_name_in_two_folders_is_renamed_once() {
    let temp_dir = TempDir::new().unwrap();
    let first = create_day_folder(temp_dir.path(), "a", 1);
    let second = create_day_folder(temp_dir.path(), "b", 1);
    let output = temp_dir.path().join("out");
    let req = request(&[&first, &second], 1, 0, &output);

    distiller().distill(&req).unwrap();
    let rerun = distiller().distill(&req).unwrap();

    let expected: BTreeSet<String> = ["day_001.jpg", "day_001_1.jpg"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(file_names(&output), expected);
    assert_eq!(
        fs::read_to_string(output.join("day_001_1.jpg")).unwrap(),
        "b image of day 1"
    );
    assert_eq!(rerun.copied, 0);
    assert_eq!(rerun.already_present, 2);
}

#[test]
fn test_missing_folder_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_day_folder(temp_dir.path(), "2024", 4);
    let missing = temp_dir.path().join("does-not-exist");
    let output = temp_dir.path().join("out");

    let result = distiller()
        .distill(&request(&[&missing, &input], 2, 0, &output))
        .unwrap();

    assert_eq!(result.skipped_folders, 1);
    assert_eq!(result.folders_scanned, 1);
    assert_eq!(result.copied, 2);
}

#[test]
fn test_invalid_step_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_day_folder(temp_dir.path(), "2024", 4);
    let output = temp_dir.path().join("out");

    for step in [0, -1] {
        let err = distiller()
            .distill(&request(&[&input], step, 0, &output))
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<DistillError>(),
            Some(&DistillError::InvalidStep(step))
        );
    }
    assert!(!output.exists());
}

#[test]
fn test_output_path_that_is_a_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_day_folder(temp_dir.path(), "2024", 4);
    let output = temp_dir.path().join("out");
    fs::write(&output, "not a folder").unwrap();

    let result = distiller().distill(&request(&[&input], 1, 0, &output));

    assert!(result.is_err());
}

#[test]
fn test_sources_are_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_day_folder(temp_dir.path(), "2024", 12);
    let before: Vec<String> = fs::read_dir(&input)
        .unwrap()
        .map(|e| calculate_file_hash(&e.unwrap().path()).unwrap())
        .collect();

    distiller()
        .distill(&request(&[&input], 5, 0, &temp_dir.path().join("out")))
        .unwrap();

    let after: Vec<String> = fs::read_dir(&input)
        .unwrap()
        .map(|e| calculate_file_hash(&e.unwrap().path()).unwrap())
        .collect();
    assert_eq!(file_names(&input).len(), 12);
    assert_eq!(before.len(), after.len());
    assert_eq!(
        before.into_iter().collect::<BTreeSet<_>>(),
        after.into_iter().collect::<BTreeSet<_>>()
    );
}

#[cfg(unix)]
#[test]
fn test_unreadable_source_is_counted_and_the_rest_copied() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let input = create_day_folder(temp_dir.path(), "2024", 3);
    let locked = input.join("day_002.jpg");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    // root reads it anyway
    if fs::read(&locked).is_ok() {
        return;
    }
    let output = temp_dir.path().join("out");

    let result = distiller()
        .distill(&request(&[&input], 1, 0, &output))
        .unwrap();

    assert_eq!(result.selected, 3);
    assert_eq!(result.copied, 2);
    assert_eq!(result.errors, 1);
    let expected: BTreeSet<String> = ["day_001.jpg", "day_003.jpg"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(file_names(&output), expected);
}

#[cfg(unix)]
#[test]
fn test_unwritable_output_folder_is_fatal() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let input = create_day_folder(temp_dir.path(), "2024", 2);
    let output = temp_dir.path().join("out");
    fs::create_dir(&output).unwrap();
    fs::set_permissions(&output, fs::Permissions::from_mode(0o555)).unwrap();
    let writable_anyway = fs::write(output.join("x"), "x").is_ok();

    let result = distiller().distill(&request(&[&input], 1, 0, &output));

    fs::set_permissions(&output, fs::Permissions::from_mode(0o755)).unwrap();
    if writable_anyway {
        return;
    }
    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("not writable"));
    assert!(file_names(&output).is_empty());
}
