//! wish - a small command interpreter
//!
//! # Overview
//!
//! wish reads lines, either interactively behind a `wish> ` prompt or from a
//! batch file, and runs the commands on each line as child processes.
//!
//! ```text
//! ls -l > listing.txt            # stdout and stderr go to listing.txt
//! sleep 2 & echo now & date      # three commands run concurrently
//! path /bin /usr/bin             # replace the search path
//! cd /tmp                        # change the working directory
//! exit                           # leave the interpreter
//! ```
//!
//! # Cohorts
//!
//! Commands separated by `&` on one line form a cohort. They are launched
//! left to right without waiting for each other, and the interpreter blocks
//! until every one of them has terminated before reading the next line.
//! Built-ins (`exit`, `cd`, `path`) run in place at their position in the
//! line, so `cd /tmp & ls` lists `/tmp`.
//!
//! # Errors
//!
//! Every error (bad syntax, unknown command, built-in misuse, failed launch)
//! is reported with the same single line, `An error has occurred`, on
//! standard error. A bad command never stops the other commands of its line.
//!
//! # Example
//!
//! ```rust,no_run
//! use wish::{Config, Flow, Shell};
//!
//! let mut shell = Shell::new(Config::default());
//! assert_eq!(shell.execute_line(b"echo hello & echo world\n"), Flow::Continue);
//! ```

#[cfg(not(unix))]
compile_error!("wish only runs on Unix-like systems");

pub mod ast;
pub mod builtins;
pub mod config;
pub mod executor;
pub mod input;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod resolver;
pub mod shell;
pub mod state;

// Re-export commonly used items
pub use ast::{Builtin, Command};
pub use builtins::{run_builtin, BuiltinError};
pub use config::{Config, Invocation, StartupError};
pub use executor::{launch, wait_all, Cohort, LaunchError, LaunchPlan};
pub use input::{BatchSource, EditorSource, InputError, LineSource, PromptSource};
pub use lexer::{lex, segments, Token};
pub use parser::{parse_command, ParseError};
pub use resolver::{ExecutableResolver, ResolveError};
pub use shell::{Flow, Shell, ShellError};
pub use state::ShellState;
