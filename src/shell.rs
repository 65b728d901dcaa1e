//! Line dispatcher - the central coordinator for wish
//!
//! The Shell owns the session state and runs each line through:
//! 1. Split into segments on `&` (lexer)
//! 2. Parse each segment (parser)
//! 3. Run built-ins in place (builtins), or
//! 4. Resolve and launch external commands (resolver + executor)
//! 5. Wait for every child launched from the line (executor)
//!
//! Segments are handled strictly left to right, so a built-in's effect is
//! visible to every later segment of the same line. A failing segment is
//! reported and skipped; it never aborts the rest of the line.

use crate::builtins::{run_builtin, BuiltinError};
use crate::config::Config;
use crate::executor::{launch, Cohort, LaunchError, LaunchPlan};
use crate::input::{InputError, LineSource};
use crate::lexer::segments;
use crate::parser::{parse_command, ParseError};
use crate::resolver::{ExecutableResolver, ResolveError};
use crate::state::ShellState;

use std::io::{self, Write};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Built-in error: {0}")]
    Builtin(#[from] BuiltinError),
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),
    #[error("Launch error: {0}")]
    Launch(#[from] LaunchError),
    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

/// What the caller should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line
    Continue,
    /// The `exit` built-in ran; stop with status 0
    Exit,
}

/// A command interpreter session
pub struct Shell {
    config: Config,
    state: ShellState,
    diagnostics: Box<dyn Write>,
}

impl Shell {
    /// Create a shell reporting errors on standard error
    pub fn new(config: Config) -> Self {
        Self::with_diagnostics(config, Box::new(io::stderr()))
    }

    /// Create a shell reporting errors to `diagnostics`
    pub fn with_diagnostics(config: Config, diagnostics: Box<dyn Write>) -> Self {
        let state = ShellState::new(config.initial_path.clone());
        Shell {
            config,
            state,
            diagnostics,
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// Read and execute lines until end of input or `exit`
    pub fn run(&mut self, source: &mut dyn LineSource) -> Flow {
        loop {
            match source.next_line() {
                Ok(Some(line)) => {
                    if self.execute_line(&line) == Flow::Exit {
                        return Flow::Exit;
                    }
                }
                Ok(None) => return Flow::Continue,
                Err(err) => {
                    self.report(&ShellError::from(err));
                    return Flow::Continue;
                }
            }
        }
    }

    /// Execute one line as a cohort and wait for all of its children
    pub fn execute_line(&mut self, line: &[u8]) -> Flow {
        trace!(line = %String::from_utf8_lossy(line), "executing line");
        let mut cohort = Cohort::new();

        for segment in segments(line) {
            match self.dispatch(segment, &mut cohort) {
                Ok(Flow::Continue) => {}
                // Children already launched are left running
                Ok(Flow::Exit) => return Flow::Exit,
                Err(err) => self.report(&err),
            }
        }

        cohort.wait();
        Flow::Continue
    }

    /// Run one segment: built-ins in place, everything else launched
    fn dispatch(&mut self, segment: &[u8], cohort: &mut Cohort) -> Result<Flow, ShellError> {
        let Some(command) = parse_command(segment)? else {
            return Ok(Flow::Continue);
        };
        trace!(?command, "parsed");

        if let Some(builtin) = command.builtin {
            debug!(%builtin, "running built-in");
            return Ok(run_builtin(builtin, command.args(), &mut self.state)?);
        }

        let program = ExecutableResolver::new(self.state.search_path()).resolve(command.name())?;
        debug!(name = ?command.name(), program = %program.display(), "resolved");

        let plan = LaunchPlan::new(&program, &command, &self.config)?;
        cohort.push(launch(&plan)?);
        Ok(Flow::Continue)
    }

    /// Emit the fixed diagnostic; the detail only goes to the log
    fn report(&mut self, err: &ShellError) {
        debug!(error = %err, "command failed");
        let _ = self
            .diagnostics
            .write_all(self.config.error_message.as_bytes());
        let _ = self.diagnostics.flush();
    }
}
