//! Built-in commands
//!
//! Built-ins run in the interpreter's own process, synchronously, and take
//! priority over any executable of the same name on the search path.
//!
//! | name   | arguments      | effect                                  |
//! |--------|----------------|-----------------------------------------|
//! | `exit` | none           | stop the interpreter with status 0      |
//! | `cd`   | exactly one    | change the working directory            |
//! | `path` | zero or more   | replace the search path                 |

use crate::ast::Builtin;
use crate::shell::Flow;
use crate::state::ShellState;
use std::env;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum BuiltinError {
    #[error("{builtin}: expected {expected}, got {found} argument(s)")]
    Arity {
        builtin: Builtin,
        expected: &'static str,
        found: usize,
    },
    #[error("cd: {}: {source}", dir.display())]
    ChangeDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Run a built-in with the arguments that follow its name
pub fn run_builtin(
    builtin: Builtin,
    args: &[OsString],
    state: &mut ShellState,
) -> Result<Flow, BuiltinError> {
    match builtin {
        Builtin::Exit => builtin_exit(args),
        Builtin::Cd => builtin_cd(args),
        Builtin::Path => builtin_path(args, state),
    }
}

fn builtin_exit(args: &[OsString]) -> Result<Flow, BuiltinError> {
    if !args.is_empty() {
        return Err(BuiltinError::Arity {
            builtin: Builtin::Exit,
            expected: "no arguments",
            found: args.len(),
        });
    }
    Ok(Flow::Exit)
}

fn builtin_cd(args: &[OsString]) -> Result<Flow, BuiltinError> {
    let [dir] = args else {
        return Err(BuiltinError::Arity {
            builtin: Builtin::Cd,
            expected: "one argument",
            found: args.len(),
        });
    };

    env::set_current_dir(dir).map_err(|source| BuiltinError::ChangeDir {
        dir: PathBuf::from(dir),
        source,
    })?;
    debug!(dir = ?dir, "changed working directory");
    Ok(Flow::Continue)
}

fn builtin_path(args: &[OsString], state: &mut ShellState) -> Result<Flow, BuiltinError> {
    state.set_search_path(args.to_vec());
    debug!(search_path = ?state.search_path(), "search path replaced");
    Ok(Flow::Continue)
}
