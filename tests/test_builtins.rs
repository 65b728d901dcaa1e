//! Integration tests for cd, path and built-in precedence

#[path = "common/mod.rs"]
mod common;
use common::{error_count, executable, run_batch, ERROR, PATH_LINE};
use std::fs;

#[test]
fn test_cd_changes_directory_for_later_commands() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("sub");
    fs::create_dir(&target).unwrap();

    let script = format!("{}cd sub\npwd > where.txt\n", PATH_LINE);
    let (code, _, stderr) = run_batch(dir.path(), &script);
    assert_eq!(code, 0);
    assert_eq!(stderr, "");

    let where_ = fs::read_to_string(target.join("where.txt")).unwrap();
    let expected = fs::canonicalize(&target).unwrap();
    assert_eq!(fs::canonicalize(where_.trim()).unwrap(), expected);
}

#[test]
fn test_cd_nonexistent_leaves_directory_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let script = format!("{}cd nonexistent_dir\npwd > where.txt\n", PATH_LINE);
    let (code, _, stderr) = run_batch(dir.path(), &script);
    assert_eq!(code, 0);
    assert_eq!(stderr, ERROR);

    let where_ = fs::read_to_string(dir.path().join("where.txt")).unwrap();
    assert_eq!(
        fs::canonicalize(where_.trim()).unwrap(),
        fs::canonicalize(dir.path()).unwrap()
    );
}

#[test]
fn test_cd_wrong_arity() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, stderr) = run_batch(dir.path(), "cd\ncd a b\n");
    assert_eq!(error_count(&stderr), 2);
}

#[test]
fn test_cd_applies_to_later_segments_of_same_line() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();

    let script = format!("{}cd sub & echo moved > marker.txt\n", PATH_LINE);
    let (_, _, stderr) = run_batch(dir.path(), &script);
    assert_eq!(stderr, "");
    assert!(dir.path().join("sub").join("marker.txt").exists());
    assert!(!dir.path().join("marker.txt").exists());
}

#[test]
fn test_default_path_is_bin() {
    let dir = tempfile::tempdir().unwrap();
    // /bin/sh exists on every Unix system
    let (_, stdout, stderr) = run_batch(dir.path(), "sh -c echo\n");
    assert_eq!(stderr, "");
    assert_eq!(stdout, "\n");
}

#[test]
fn test_empty_path_disables_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let script = "path\nsh -c true\n/bin/sh -c true\npath /bin\nsh -c true\n";
    let (code, _, stderr) = run_batch(dir.path(), script);
    assert_eq!(code, 0);
    assert_eq!(error_count(&stderr), 1);
}

#[test]
fn test_path_replaces_rather_than_appends() {
    let dir = tempfile::tempdir().unwrap();
    let tools = dir.path().join("tools");
    fs::create_dir(&tools).unwrap();
    executable(&tools.join("hello"), "#!/bin/sh\necho from tools\n");

    let script = format!(
        "path {}\nhello\nsh -c true\n",
        tools.display()
    );
    let (_, stdout, stderr) = run_batch(dir.path(), &script);
    assert_eq!(stdout, "from tools\n");
    // /bin is no longer searched
    assert_eq!(error_count(&stderr), 1);
}

#[test]
fn test_search_order_first_match_wins() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first");
    let second = dir.path().join("second");
    fs::create_dir(&first).unwrap();
    fs::create_dir(&second).unwrap();
    executable(&first.join("which_one"), "#!/bin/sh\necho first\n");
    executable(&second.join("which_one"), "#!/bin/sh\necho second\n");

    let script = format!(
        "path {} {}\nwhich_one\npath {} {}\nwhich_one\n",
        first.display(),
        second.display(),
        second.display(),
        first.display()
    );
    let (_, stdout, _) = run_batch(dir.path(), &script);
    assert_eq!(stdout, "first\nsecond\n");
}

#[test]
fn test_builtin_cd_beats_executable_named_cd() {
    let dir = tempfile::tempdir().unwrap();
    let tools = dir.path().join("tools");
    let sub = dir.path().join("sub");
    fs::create_dir(&tools).unwrap();
    fs::create_dir(&sub).unwrap();
    let marker = dir.path().join("fake_cd_ran");
    executable(
        &tools.join("cd"),
        &format!("#!/bin/sh\ntouch {}\n", marker.display()),
    );

    let script = format!(
        "path {} /bin /usr/bin\ncd sub\npwd > where.txt\n",
        tools.display()
    );
    let (_, _, stderr) = run_batch(dir.path(), &script);
    assert_eq!(stderr, "");
    assert!(!marker.exists());
    assert!(sub.join("where.txt").exists());
}
