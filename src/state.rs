//! Session state shared by every line of one interpreter run
//!
//! The only mutable interpreter-wide value is the search path: the ordered
//! list of directories used to resolve bare command names. It is replaced
//! wholesale by the `path` built-in and may legally become empty, in which
//! case only commands given with a `/` can still run.

use std::ffi::OsString;

/// Search path used when the interpreter starts
pub const DEFAULT_SEARCH_PATH: &[&str] = &["/bin"];

/// Shell state that persists between lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    /// Directories searched in order; the first match wins
    search_path: Vec<OsString>,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_PATH.iter().map(OsString::from).collect())
    }
}

impl ShellState {
    pub fn new(search_path: Vec<OsString>) -> Self {
        ShellState { search_path }
    }

    pub fn search_path(&self) -> &[OsString] {
        &self.search_path
    }

    /// Replace the whole search path (never appends)
    pub fn set_search_path(&mut self, dirs: Vec<OsString>) {
        self.search_path = dirs;
    }
}
