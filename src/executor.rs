use std::borrow::Cow;
use std::io::{BufReader, Read};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::constants::DEFAULT_SHELL;
use crate::error::{CommandError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs the command of a backtick default and returns its captured output.
pub trait CommandExecutor {
    /// Executes `command` to completion.
    ///
    /// # Returns
    /// * `Result<String, CommandError>` - Standard output with leading and
    ///   trailing whitespace removed
    fn execute(&self, command: &str) -> Result<String, CommandError>;
}

/// Executes commands through the platform shell.
///
/// # Notes
/// - Standard input is closed, standard error is inherited
/// - Non-zero exit codes are treated as errors
/// - Without a timeout the call blocks until the command exits
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: Vec<String>,
    timeout: Option<Duration>,
}

impl ShellExecutor {
    pub fn new() -> Self {
        Self { shell: DEFAULT_SHELL.iter().map(|s| s.to_string()).collect(), timeout: None }
    }

    /// Replaces the interpreter, e.g. `["bash", "-c"]`. The command is appended as the last argument.
    pub fn with_shell<I, S>(mut self, shell: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shell = shell.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn spawn(&self, command: &str) -> Result<Child, CommandError> {
        let (program, args) = match self.shell.split_first() {
            Some((program, args)) => (program.as_str(), args),
            None => (command, &[][..]),
        };
        let mut cmd = Command::new(program);
        cmd.args(args);
        if !self.shell.is_empty() {
            cmd.arg(command);
        }

        log::debug!("Running default command via {:?}: {command}", self.shell);

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| CommandError::Spawn { command: command.to_string(), source })
    }

    fn wait_with_deadline(
        &self,
        command: &str,
        mut child: Child,
        timeout: Duration,
        deadline: Instant,
    ) -> Result<String, CommandError> {
        let io_error = |source| CommandError::Spawn { command: command.to_string(), source };

        // The pipe has to be drained while polling, otherwise a chatty command blocks forever.
        let (sender, receiver) = mpsc::channel();
        if let Some(stdout) = child.stdout.take() {
            thread::spawn(move || {
                let _ = sender.send(read_stdout(stdout));
            });
        }

        let status = loop {
            if let Some(status) = child.try_wait().map_err(io_error)? {
                break status;
            }
            if Instant::now() >= deadline {
                if let Err(e) = child.kill() {
                    log::warn!("Failed to kill `{command}` after timeout: {e}");
                }
                let _ = child.wait();
                return Err(CommandError::Timeout { command: command.to_string(), timeout });
            }
            thread::sleep(POLL_INTERVAL);
        };

        if !status.success() {
            return Err(CommandError::Status { command: command.to_string(), status });
        }

        match receiver.recv() {
            Ok(output) => Ok(decode(command, output.map_err(io_error)?)),
            // No stdout handle was attached to the child.
            Err(_) => Ok(String::new()),
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor for ShellExecutor {
    fn execute(&self, command: &str) -> Result<String, CommandError> {
        let mut child = self.spawn(command)?;

        // A timeout too large to represent as an instant means no deadline.
        if let Some((timeout, deadline)) =
            self.timeout.and_then(|timeout| Some((timeout, Instant::now().checked_add(timeout)?)))
        {
            return self.wait_with_deadline(command, child, timeout, deadline);
        }

        let io_error = |source| CommandError::Spawn { command: command.to_string(), source };

        // Read stdout before waiting for the process to complete
        let buffer = match child.stdout.take() {
            Some(stdout) => read_stdout(stdout).map_err(io_error)?,
            None => Vec::new(),
        };

        let status = child.wait().map_err(io_error)?;
        if !status.success() {
            return Err(CommandError::Status { command: command.to_string(), status });
        }

        Ok(decode(command, buffer))
    }
}

fn read_stdout(stdout: ChildStdout) -> std::io::Result<Vec<u8>> {
    let mut reader = BufReader::new(stdout);
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    Ok(buffer)
}

fn decode(command: &str, buffer: Vec<u8>) -> String {
    let decoded = String::from_utf8_lossy(&buffer);
    if matches!(decoded, Cow::Owned(_)) {
        log::warn!("`{command}` emitted non-UTF8 stdout; performing lossy conversion");
    }
    decoded.trim().to_string()
}
