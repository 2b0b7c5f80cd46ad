use std::collections::BTreeSet;
use std::fs;

use tempfile::TempDir;

use dsatrack::app::App;
use dsatrack::catalog::{Catalog, Difficulty, Platform, ProblemId, ProblemRecord};
use dsatrack::config::Config;
use dsatrack::store::json_store::JsonStore;

fn record(id: ProblemId, title: &str, pattern: &str, sequence: u32) -> ProblemRecord {
    ProblemRecord {
        id,
        title: title.to_string(),
        pattern: pattern.to_string(),
        sequence,
        difficulty: Difficulty::Easy,
        platform: Platform::LeetCode,
    }
}

fn test_catalog() -> Catalog {
    Catalog::from_records(vec![
        record(1, "Max Sum Subarray", "Sliding Window", 1),
        record(2, "Two Sum Sorted", "Two Pointers", 2),
        record(3, "Merge Intervals", "Merge Intervals", 3),
    ])
}

fn store_in(dir: &TempDir) -> JsonStore {
    JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap()
}

#[test]
fn startup_with_corrupt_progress_file_is_fail_open() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("progress.json"), "not json").unwrap();

    let app = App::assemble(test_catalog(), Some(store_in(&dir)), Config::default());
    assert!(app.progress.is_empty());
    assert!(!app.is_completed(1));
    assert_eq!(app.stats().percentage, 0);
}

#[test]
fn startup_with_absent_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let app = App::assemble(test_catalog(), Some(store_in(&dir)), Config::default());
    assert!(app.progress.is_empty());
}

#[test]
fn toggles_survive_a_reload() {
    let dir = TempDir::new().unwrap();

    let mut app = App::assemble(test_catalog(), Some(store_in(&dir)), Config::default());
    app.toggle_problem(1);
    app.toggle_problem(3);
    drop(app);

    let reloaded = App::assemble(test_catalog(), Some(store_in(&dir)), Config::default());
    assert!(reloaded.is_completed(1));
    assert!(!reloaded.is_completed(2));
    assert!(reloaded.is_completed(3));
    assert_eq!(reloaded.stats().completed, 2);
}

#[test]
fn reload_resets_expansion_to_everything_expanded() {
    let dir = TempDir::new().unwrap();

    let mut app = App::assemble(test_catalog(), Some(store_in(&dir)), Config::default());
    app.toggle_group("Two Pointers");
    assert!(!app.is_expanded("Two Pointers"));
    drop(app);

    // Expansion is transient: a fresh start re-derives it from the catalog
    let reloaded = App::assemble(test_catalog(), Some(store_in(&dir)), Config::default());
    assert!(reloaded.is_expanded("Two Pointers"));
}

#[test]
fn persisted_file_is_a_plain_id_array() {
    let dir = TempDir::new().unwrap();

    let mut app = App::assemble(test_catalog(), Some(store_in(&dir)), Config::default());
    app.toggle_problem(3);
    app.toggle_problem(1);

    let content = fs::read_to_string(dir.path().join("progress.json")).unwrap();
    let ids: Vec<ProblemId> = serde_json::from_str(&content).unwrap();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn export_moves_progress_between_stores() {
    let source_dir = TempDir::new().unwrap();
    let target_dir = TempDir::new().unwrap();

    let mut app = App::assemble(test_catalog(), Some(store_in(&source_dir)), Config::default());
    app.toggle_problem(2);
    app.toggle_problem(3);

    let export_path = source_dir.path().join("backup.json");
    store_in(&source_dir).export(&export_path).unwrap();

    let imported = store_in(&target_dir).import(&export_path).unwrap();
    assert_eq!(imported, 2);

    let migrated = App::assemble(test_catalog(), Some(store_in(&target_dir)), Config::default());
    let expected: BTreeSet<ProblemId> = [2, 3].into_iter().collect();
    assert_eq!(migrated.progress, expected);
}
