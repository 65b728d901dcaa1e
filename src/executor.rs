//! Executor: launches external commands and waits for them
//!
//! Each external command runs in its own forked child. Everything the child
//! needs is prepared by the parent before forking: the program path, the
//! argument vector, the redirection target and the fallback interpreter's
//! argument vector as C strings, plus the NULL-terminated pointer arrays
//! handed to `execv`. Between `fork` and `execv` the child makes plain
//! system calls and never allocates.

use crate::ast::Command;
use crate::config::Config;
use nix::errno::Errno;
use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;
use nix::sys::wait::waitpid;
use nix::unistd::{close, dup2, fork, ForkResult, Pid};
use std::ffi::{CStr, CString, NulError};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Failed to fork: {0}")]
    Fork(Errno),
    #[error("Argument contains a NUL byte: {0}")]
    InvalidArgument(#[from] NulError),
}

/// Everything a child needs to become the requested program
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    program: CString,
    argv: Vec<CString>,
    redirect: Option<CString>,
    fallback_program: CString,
    fallback_argv: Vec<CString>,
    diagnostic: Vec<u8>,
}

impl LaunchPlan {
    /// Prepare the launch of `command` as the program at `program`
    pub fn new(program: &Path, command: &Command, config: &Config) -> Result<Self, LaunchError> {
        let program = CString::new(program.as_os_str().as_bytes())?;
        let argv = command
            .argv
            .iter()
            .map(|arg| CString::new(arg.as_bytes()))
            .collect::<Result<Vec<_>, _>>()?;
        let redirect = command
            .redirect
            .as_deref()
            .map(|target| CString::new(target.as_bytes()))
            .transpose()?;

        // sh <program> <argv[1..]>: the command's own argv[0] is dropped
        let mut fallback_argv = Vec::with_capacity(argv.len() + 1);
        fallback_argv.push(CString::new(config.fallback_shell_name.as_str())?);
        fallback_argv.push(program.clone());
        fallback_argv.extend(argv.iter().skip(1).cloned());

        Ok(LaunchPlan {
            program,
            argv,
            redirect,
            fallback_program: CString::new(config.fallback_shell.as_str())?,
            fallback_argv,
            diagnostic: config.error_message.as_bytes().to_vec(),
        })
    }
}

/// Pointers to each string followed by the terminating NULL
fn exec_args(args: &[CString]) -> Vec<*const libc::c_char> {
    args.iter()
        .map(|arg| arg.as_ptr())
        .chain(std::iter::once(ptr::null()))
        .collect()
}

/// Fork a child running `plan` and return its pid without waiting
pub fn launch(plan: &LaunchPlan) -> Result<Pid, LaunchError> {
    let argv = exec_args(&plan.argv);
    let fallback_argv = exec_args(&plan.fallback_argv);

    // SAFETY: the child branch only calls open, dup2, close, execv, write
    // and _exit on memory allocated before the fork.
    match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => {
            debug!(pid = %child, program = ?plan.program, "launched");
            Ok(child)
        }
        Ok(ForkResult::Child) => run_child(plan, &argv, &fallback_argv),
        Err(errno) => Err(LaunchError::Fork(errno)),
    }
}

/// Child side of a launch; never returns
fn run_child(
    plan: &LaunchPlan,
    argv: &[*const libc::c_char],
    fallback_argv: &[*const libc::c_char],
) -> ! {
    if let Some(target) = &plan.redirect {
        if redirect_output(target).is_err() {
            child_fail(&plan.diagnostic);
        }
    }

    // SAFETY: both arrays are NULL-terminated and point into `plan`, which
    // outlives the calls. execv only returns on failure.
    unsafe {
        libc::execv(plan.program.as_ptr(), argv.as_ptr());
        // Not a recognised executable format: let the shell interpret it
        if Errno::last() == Errno::ENOEXEC {
            libc::execv(plan.fallback_program.as_ptr(), fallback_argv.as_ptr());
        }
    }
    child_fail(&plan.diagnostic)
}

/// Send standard output and standard error to `target`
fn redirect_output(target: &CStr) -> nix::Result<()> {
    let fd = open(
        target,
        OFlag::O_CREAT | OFlag::O_WRONLY | OFlag::O_TRUNC,
        Mode::S_IRWXU,
    )?;
    dup2(fd, libc::STDOUT_FILENO)?;
    dup2(fd, libc::STDERR_FILENO)?;
    if fd != libc::STDOUT_FILENO && fd != libc::STDERR_FILENO {
        close(fd)?;
    }
    Ok(())
}

/// Report a failure from inside a child and terminate it
fn child_fail(diagnostic: &[u8]) -> ! {
    // SAFETY: write(2) and _exit(2) are async-signal-safe; the buffer
    // outlives the call.
    unsafe {
        libc::write(
            libc::STDERR_FILENO,
            diagnostic.as_ptr().cast(),
            diagnostic.len(),
        );
        libc::_exit(1)
    }
}

/// Children launched from one line, awaited together
#[derive(Debug, Default)]
pub struct Cohort {
    children: Vec<Pid>,
}

impl Cohort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, child: Pid) {
        self.children.push(child);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Block until every child has terminated. Exit statuses are ignored.
    pub fn wait(self) {
        wait_all(&self.children);
        trace!(count = self.children.len(), "cohort finished");
    }
}

/// Wait for each pid in turn, ignoring how it ended
pub fn wait_all(children: &[Pid]) {
    for &child in children {
        loop {
            match waitpid(child, None) {
                Err(Errno::EINTR) => continue,
                Ok(status) => trace!(?status, "child finished"),
                Err(errno) => debug!(pid = %child, %errno, "waitpid failed"),
            }
            break;
        }
    }
}
