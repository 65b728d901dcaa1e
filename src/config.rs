//! Runtime options and command-line invocation

use crate::state::DEFAULT_SEARCH_PATH;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Prompt printed before each interactive read
pub const DEFAULT_PROMPT: &str = "wish> ";

/// The one diagnostic every user-facing error is reported with
pub const ERROR_MESSAGE: &str = "An error has occurred\n";

/// Interpreter used for programs the kernel refuses to execute
pub const FALLBACK_SHELL: &str = "/bin/sh";

/// Argument 0 passed to the fallback interpreter
pub const FALLBACK_SHELL_NAME: &str = "sh";

/// Errors that stop the interpreter before any line is read
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("expected at most one batch file, got {0} arguments")]
    TooManyArguments(usize),
    #[error("cannot open batch file {}: {source}", path.display())]
    OpenBatch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Fixed settings of one interpreter instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    pub initial_path: Vec<OsString>,
    pub fallback_shell: String,
    pub fallback_shell_name: String,
    pub error_message: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt: DEFAULT_PROMPT.to_string(),
            initial_path: DEFAULT_SEARCH_PATH.iter().map(OsString::from).collect(),
            fallback_shell: FALLBACK_SHELL.to_string(),
            fallback_shell_name: FALLBACK_SHELL_NAME.to_string(),
            error_message: ERROR_MESSAGE.to_string(),
        }
    }
}

impl Config {
    /// Replace the initial search path
    pub fn with_initial_path<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.initial_path = dirs.into_iter().map(Into::into).collect();
        self
    }
}

/// Where lines come from, as selected by the program arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Read from standard input, printing a prompt before each line
    Interactive,
    /// Read from the named file, no prompt
    Batch(PathBuf),
}

impl Invocation {
    /// Parse the full argument vector (program name first)
    pub fn from_args(args: &[OsString]) -> Result<Self, StartupError> {
        match args.get(1..).unwrap_or_default() {
            [] => Ok(Invocation::Interactive),
            [path] => Ok(Invocation::Batch(PathBuf::from(path))),
            rest => Err(StartupError::TooManyArguments(rest.len())),
        }
    }
}
