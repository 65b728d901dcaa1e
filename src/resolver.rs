//! Executable resolver
//!
//! Maps a command name to a program location:
//! 1. A name containing `/` is used as given, if it is executable
//! 2. Otherwise each search-path directory is tried in order

use nix::unistd::{access, AccessFlags};
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{}: command not found", .0.to_string_lossy())]
    NotFound(OsString),
    #[error("{}: not an executable", .0.to_string_lossy())]
    NotExecutable(OsString),
}

/// Resolves command names against a search path
pub struct ExecutableResolver<'a> {
    path_dirs: &'a [OsString],
}

impl<'a> ExecutableResolver<'a> {
    pub fn new(path_dirs: &'a [OsString]) -> Self {
        ExecutableResolver { path_dirs }
    }

    /// Resolve a command name to the program to execute
    pub fn resolve(&self, name: &OsStr) -> Result<PathBuf, ResolveError> {
        // Direct paths never fall back to the search path
        if name.as_bytes().contains(&b'/') {
            let path = PathBuf::from(name);
            return if is_executable(&path) {
                Ok(path)
            } else {
                Err(ResolveError::NotExecutable(name.to_os_string()))
            };
        }

        self.path_dirs
            .iter()
            .map(|dir| candidate(dir, name))
            .find(|path| is_executable(path))
            .ok_or_else(|| ResolveError::NotFound(name.to_os_string()))
    }
}

/// Join a directory and a name with exactly one added separator,
/// whatever the directory already ends with
fn candidate(dir: &OsStr, name: &OsStr) -> PathBuf {
    let mut joined = Vec::with_capacity(dir.len() + name.len() + 1);
    joined.extend_from_slice(dir.as_bytes());
    joined.push(b'/');
    joined.extend_from_slice(name.as_bytes());
    PathBuf::from(OsString::from_vec(joined))
}

/// Check execute permission for the real user
pub fn is_executable(path: &Path) -> bool {
    access(path, AccessFlags::X_OK).is_ok()
}
