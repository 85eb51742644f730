//! Errors and error-related utilities.

use std::{error, fmt, result};

/// The result type used throughout this library.
pub type Result<T> = result::Result<T, Box<dyn error::Error>>;

/// A required argument was not given.
#[derive(Debug)]
pub struct MissingArgument(pub String);

/// Invalid command line argument.
#[derive(Debug)]
pub struct InvalidArgument(pub String);

/// A builder operation was called when it cannot apply,
/// e.g. setting a weight before any food has been added.
#[derive(Debug)]
pub struct InvalidState(pub String);

/// Why running the external tool failed.
#[derive(Debug)]
pub enum Failure {
    /// The process could not be started at all.
    Spawn(String),
    /// The process ran but did not exit successfully.
    Exit,
    /// The process did not finish in time and was killed.
    Timeout,
    /// Collecting the output of the process failed.
    Io(String),
}

/// Running the external tool failed.
#[derive(Debug)]
pub struct ToolInvocationError {
    pub program: String,
    pub reason: Failure,
    /// Exit code, if the process exited normally.
    pub status: Option<i32>,
    /// Whatever the process wrote to standard error.
    pub stderr: String,
}

impl fmt::Display for MissingArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "missing argument: {}", self.0)
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid argument: {}", self.0)
    }
}

impl fmt::Display for InvalidState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid state: {}", self.0)
    }
}

impl fmt::Display for ToolInvocationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.reason {
            Failure::Spawn(e) => write!(f, "cannot run {}: {}", self.program, e)?,
            Failure::Exit => match self.status {
                Some(code) => write!(f, "{} exited with status {}", self.program, code)?,
                None => write!(f, "{} was terminated by a signal", self.program)?,
            },
            Failure::Timeout => write!(f, "{} timed out", self.program)?,
            Failure::Io(e) => write!(f, "cannot read output of {}: {}", self.program, e)?,
        }
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            write!(f, ": {stderr}")?;
        }
        Ok(())
    }
}

impl error::Error for MissingArgument {}

impl error::Error for InvalidArgument {}

impl error::Error for InvalidState {}

impl error::Error for ToolInvocationError {}

/// A helper for constructing [MissingArgument].
pub fn missing_argument_ref(s: &str) -> Box<dyn error::Error> {
    MissingArgument(s.to_owned()).into()
}

/// A helper for constructing [InvalidArgument].
pub fn invalid_argument(s: String) -> Box<dyn error::Error> {
    InvalidArgument(s).into()
}

/// A helper for constructing [InvalidState].
pub fn invalid_state_ref(s: &str) -> Box<dyn error::Error> {
    InvalidState(s.to_owned()).into()
}
