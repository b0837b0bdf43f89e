//! Running external tools
//!
//! Commands are spawned directly with an explicit argument list and inherit
//! the terminal, so the child's output shows up live.

use std::{
    fmt,
    process::{Command, ExitStatus},
};

use tracing::debug;

use crate::error::PileError;

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

pub trait Runner {
    /// Run to completion. A non-zero exit is still `Ok`.
    fn run(&self, invocation: &Invocation) -> Result<ExitStatus, PileError>;
}

/// Spawns real processes that share stdin, stdout and stderr with pile.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ExitStatus, PileError> {
        debug!(command = %invocation, "running");
        Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .map_err(|source| PileError::ChildProcessFailed {
                command: invocation.to_string(),
                source,
            })
    }
}

/// Run and ignore the outcome.
///
/// The user already sees whatever the child printed; failures are only
/// recorded at debug level and never change pile's own exit status.
pub fn fire_and_forget(runner: &dyn Runner, invocation: &Invocation) {
    match runner.run(invocation) {
        Ok(status) if !status.success() => {
            debug!(command = %invocation, %status, "command exited unsuccessfully");
        }
        Ok(_) => {}
        Err(err) => debug!(command = %invocation, error = %err, "command failed"),
    }
}
