//! wish - command interpreter
//!
//! Usage:
//!   wish              Read commands interactively
//!   wish batch.txt    Read commands from a file

use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use wish::{input, logging, BatchSource, Config, Invocation, LineSource, Shell, StartupError};

fn main() -> ExitCode {
    logging::init();

    let args: Vec<OsString> = env::args_os().collect();
    let config = Config::default();

    let mut source: Box<dyn LineSource> = match Invocation::from_args(&args) {
        Ok(Invocation::Interactive) => input::interactive(&config.prompt),
        Ok(Invocation::Batch(path)) => match BatchSource::open(&path) {
            Ok(batch) => Box::new(batch),
            Err(err) => return startup_failure(&config, &err),
        },
        Err(err) => return startup_failure(&config, &err),
    };

    // End of input and `exit` both finish with status 0
    let mut shell = Shell::new(config);
    shell.run(source.as_mut());
    ExitCode::SUCCESS
}

fn startup_failure(config: &Config, err: &StartupError) -> ExitCode {
    tracing::debug!(error = %err, "startup failed");
    let mut stderr = io::stderr();
    let _ = stderr.write_all(config.error_message.as_bytes());
    let _ = stderr.flush();
    ExitCode::FAILURE
}
