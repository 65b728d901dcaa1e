//! Parsed command representation

use std::ffi::{OsStr, OsString};
use std::fmt;

/// Commands that run inside the interpreter's own process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Cd,
    Path,
}

impl Builtin {
    pub const ALL: [Builtin; 3] = [Builtin::Exit, Builtin::Cd, Builtin::Path];

    /// Look up a built-in by exact command name
    pub fn from_name(name: &OsStr) -> Option<Self> {
        Self::ALL.into_iter().find(|b| OsStr::new(b.name()) == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Exit => "exit",
            Builtin::Cd => "cd",
            Builtin::Path => "path",
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One command of a cohort, as produced by the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Argument tokens; `argv[0]` is the command name. Never empty.
    pub argv: Vec<OsString>,
    /// File receiving standard output and standard error
    pub redirect: Option<OsString>,
    /// Set when `argv[0]` names a built-in
    pub builtin: Option<Builtin>,
}

impl Command {
    /// Build a command from its tokens.
    ///
    /// Returns `None` for an empty token list.
    pub fn new(argv: Vec<OsString>, redirect: Option<OsString>) -> Option<Self> {
        let builtin = Builtin::from_name(argv.first()?);
        Some(Command {
            argv,
            redirect,
            builtin,
        })
    }

    /// The command name (first token)
    pub fn name(&self) -> &OsStr {
        &self.argv[0]
    }

    /// Arguments after the command name
    pub fn args(&self) -> &[OsString] {
        &self.argv[1..]
    }
}
