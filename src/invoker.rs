//! Running the external `meal` program.
//!
//! Everything that starts processes goes through the [Invoke] trait, so the
//! rest of the crate can be tested with a fake implementation.

use crate::errors::{Failure, Result, ToolInvocationError};
use itertools::Itertools;
use log::{info, trace};
use std::error;
use std::ffi::OsString;
use std::fmt;
use std::io::{self, Read};
#[cfg(unix)]
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

pub const DEFAULT_PROGRAM: &str = "meal";

/// How long to wait for the program unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subcommand {
    /// Calculate the nutrients of the given documents.
    Calc,
    /// Search for the best combination of foods.
    AutomaticSelection,
}

impl Subcommand {
    pub fn tag(self) -> &'static str {
        match self {
            Subcommand::Calc => "c",
            Subcommand::AutomaticSelection => "a",
        }
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Subcommand::Calc => write!(f, "calc"),
            Subcommand::AutomaticSelection => write!(f, "automatic selection"),
        }
    }
}

/// What a successful run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolOutput {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

pub trait Invoke {
    /// Run the program once with `subcommand` and `paths`, and wait for it.
    fn invoke(&self, subcommand: Subcommand, paths: &[&Path]) -> Result<ToolOutput>;
}

/// Run `subcommand` with `invoker`, print what the program wrote to
/// standard output, and return it.
pub fn run<I, P>(invoker: &I, subcommand: Subcommand, paths: &[P]) -> Result<String>
where
    I: Invoke + ?Sized,
    P: AsRef<Path>,
{
    let paths = paths.iter().map(|p| p.as_ref()).collect_vec();
    let output = invoker.invoke(subcommand, &paths)?;
    print!("{}", output.stdout);
    Ok(output.stdout)
}

/// The real program, started as a child process.
#[derive(Clone, Debug)]
pub struct MealCommand {
    program: String,
    timeout: Option<Duration>,
    current_dir: Option<PathBuf>,
}

impl Default for MealCommand {
    fn default() -> Self {
        MealCommand {
            program: DEFAULT_PROGRAM.to_owned(),
            timeout: Some(DEFAULT_TIMEOUT),
            current_dir: None,
        }
    }
}

impl MealCommand {
    pub fn new() -> MealCommand {
        MealCommand::default()
    }

    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_owned();
        self
    }

    /// `None` waits for as long as it takes.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// `meal c <path>...`, printing the result.
    pub fn calc<P: AsRef<Path>>(&self, paths: &[P]) -> Result<String> {
        run(self, Subcommand::Calc, paths)
    }

    pub fn args(subcommand: Subcommand, paths: &[&Path]) -> Vec<OsString> {
        let mut args = vec![OsString::from(subcommand.tag())];
        args.extend(paths.iter().map(|p| p.as_os_str().to_owned()));
        args
    }

    fn failure(
        &self,
        reason: Failure,
        status: Option<i32>,
        stderr: String,
    ) -> Box<dyn error::Error> {
        ToolInvocationError {
            program: self.program.clone(),
            reason,
            status,
            stderr,
        }
        .into()
    }

    /// `Ok(None)` if the child was killed because it ran out of time.
    fn wait(&self, child: &mut Child) -> io::Result<Option<ExitStatus>> {
        let Some(timeout) = self.timeout else {
            return child.wait().map(Some);
        };
        let start = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            if start.elapsed() >= timeout {
                kill_group(child)?;
                child.wait()?;
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Kill the child together with anything it started, which shares its
/// process group.
#[cfg(unix)]
fn kill_group(child: &mut Child) -> io::Result<()> {
    let pgid = libc::pid_t::try_from(child.id())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    // Safety: plain syscall; the group was created for this child by process_group(0).
    let rc = unsafe { libc::kill(-pgid, libc::SIGKILL) };
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn kill_group(child: &mut Child) -> io::Result<()> {
    child.kill()
}

fn read_all<R: Read>(pipe: Option<R>) -> io::Result<String> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf)?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn joined(r: thread::Result<io::Result<String>>) -> std::result::Result<String, String> {
    match r {
        Ok(Ok(s)) => Ok(s),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("output reader panicked".to_owned()),
    }
}

impl Invoke for MealCommand {
    fn invoke(&self, subcommand: Subcommand, paths: &[&Path]) -> Result<ToolOutput> {
        let args = MealCommand::args(subcommand, paths);
        info!(target: "mealkit", "run: {} ({})", self.program, subcommand);
        trace!(target: "mealkit", "arguments: {:?}", args);

        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        #[cfg(unix)]
        command.process_group(0);
        let mut child = command
            .spawn()
            .map_err(|e| self.failure(Failure::Spawn(e.to_string()), None, String::new()))?;

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        // The readers are not joined after a timeout: the pipes stay open
        // for as long as anything still holds them.
        let out = thread::spawn(move || read_all(stdout_pipe));
        let err = thread::spawn(move || read_all(stderr_pipe));

        let status = match self.wait(&mut child) {
            Ok(Some(status)) => status,
            Ok(None) => return Err(self.failure(Failure::Timeout, None, String::new())),
            Err(e) => return Err(self.failure(Failure::Io(e.to_string()), None, String::new())),
        };
        let stdout = joined(out.join());
        let stderr = match joined(err.join()) {
            Ok(s) => s,
            Err(e) => return Err(self.failure(Failure::Io(e), status.code(), String::new())),
        };
        if !status.success() {
            return Err(self.failure(Failure::Exit, status.code(), stderr));
        }
        let stdout = match stdout {
            Ok(s) => s,
            Err(e) => return Err(self.failure(Failure::Io(e), status.code(), stderr)),
        };
        info!(target: "mealkit", "{} finished, {} bytes of output", self.program, stdout.len());
        Ok(ToolOutput {
            status: status.code(),
            stdout,
            stderr,
        })
    }
}
