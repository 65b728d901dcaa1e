//! Common test utilities for wish integration tests

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// The fixed diagnostic line
pub const ERROR: &str = "An error has occurred\n";

/// Search path that finds the usual utilities on any Linux layout
pub const PATH_LINE: &str = "path /bin /usr/bin\n";

/// A wish command running in `dir`
pub fn wish(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wish").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

/// Write a batch file into `dir` and return its path
pub fn batch_file(dir: &Path, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join("batch.txt");
    fs::write(&path, contents).unwrap();
    path
}

/// Run `contents` as a batch file in `dir`, returning (status, stdout, stderr)
pub fn run_batch(dir: &Path, contents: impl AsRef<[u8]>) -> (i32, String, String) {
    let batch = batch_file(dir, contents);
    let output = wish(dir).arg(&batch).output().unwrap();
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

/// Number of diagnostics in captured stderr
pub fn error_count(stderr: &str) -> usize {
    stderr.matches(ERROR).count()
}

/// Create an executable file with the given contents
#[allow(dead_code)]
pub fn executable(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}
