//! External program execution.
//!
//! Programs are run directly from an argument vector, never through a shell.
//! Streaming execution hands output lines to the caller through a bounded
//! channel fed by reader threads, so progress reporting stays independent of
//! the completion result.

use crate::error::{FluideError, Result};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Lines buffered between the reader threads and the consumer.
const LINE_BUFFER: usize = 64;

/// Result of executing a program.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the program exited with code 0.
    pub success: bool,
}

impl CommandResult {
    /// Last non-empty line of stderr, falling back to stdout.
    pub fn failure_summary(&self) -> String {
        let last_line = |s: &str| {
            s.lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .map(|l| l.trim().to_string())
        };
        let status = match self.exit_code {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        };
        match last_line(&self.stderr).or_else(|| last_line(&self.stdout)) {
            Some(line) => format!("{}: {}", status, line),
            None => status,
        }
    }
}

/// Options for program execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with the inherited environment).
    pub env: HashMap<String, String>,
}

impl CommandOptions {
    /// Options running in `cwd`.
    pub fn in_dir(cwd: &Path) -> Self {
        Self {
            cwd: Some(cwd.to_path_buf()),
            ..Default::default()
        }
    }
}

/// Output line from a running program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

fn build_command(program: &str, args: &[&str], options: &CommandOptions) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }
    for (key, value) in &options.env {
        cmd.env(key, value);
    }
    cmd
}

fn spawn_error(program: &str, error: std::io::Error) -> FluideError {
    FluideError::Process {
        program: program.to_string(),
        message: error.to_string(),
    }
}

/// Run a program to completion, capturing its output.
///
/// Only a failure to start the program is an error; a non-zero exit is
/// reported through [`CommandResult::success`].
pub fn execute(program: &str, args: &[&str], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    tracing::debug!("Running {} {}", program, args.join(" "));

    let output = build_command(program, args, options)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| spawn_error(program, e))?;

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration: start.elapsed(),
        success: output.status.success(),
    })
}

/// A running program whose output is delivered line by line.
pub struct StreamingCommand {
    program: String,
    child: Child,
    lines: Receiver<OutputLine>,
    readers: Vec<JoinHandle<(bool, String)>>,
    start: Instant,
}

impl StreamingCommand {
    /// Receive the next output line, blocking until one arrives.
    ///
    /// Returns `None` once both output streams are closed.
    pub fn next_line(&self) -> Option<OutputLine> {
        self.lines.recv().ok()
    }

    /// Wait for the program to exit.
    ///
    /// Lines not yet received are still collected into the result.
    pub fn wait(mut self) -> Result<CommandResult> {
        drop(self.lines);

        let mut stdout = String::new();
        let mut stderr = String::new();
        for reader in self.readers {
            if let Ok((is_stdout, output)) = reader.join() {
                if is_stdout {
                    stdout = output;
                } else {
                    stderr = output;
                }
            }
        }

        let status = self
            .child
            .wait()
            .map_err(|e| spawn_error(&self.program, e))?;

        Ok(CommandResult {
            exit_code: status.code(),
            stdout,
            stderr,
            duration: self.start.elapsed(),
            success: status.success(),
        })
    }
}

fn spawn_reader<R: Read + Send + 'static>(
    stream: R,
    tx: SyncSender<OutputLine>,
    is_stdout: bool,
) -> JoinHandle<(bool, String)> {
    thread::spawn(move || {
        let reader = BufReader::new(stream);
        let mut output = String::new();
        for line in reader.lines().map_while(std::result::Result::ok) {
            output.push_str(&line);
            output.push('\n');
            let message = if is_stdout {
                OutputLine::Stdout(line)
            } else {
                OutputLine::Stderr(line)
            };
            // The consumer may have stopped listening; keep collecting regardless.
            let _ = tx.send(message);
        }
        (is_stdout, output)
    })
}

/// Start a program with piped output.
pub fn spawn_streaming(
    program: &str,
    args: &[&str],
    options: &CommandOptions,
) -> Result<StreamingCommand> {
    tracing::debug!("Spawning {} {}", program, args.join(" "));

    let mut child = build_command(program, args, options)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(program, e))?;

    let (tx, rx) = mpsc::sync_channel(LINE_BUFFER);
    let mut readers = Vec::with_capacity(2);
    if let Some(stdout) = child.stdout.take() {
        readers.push(spawn_reader(stdout, tx.clone(), true));
    }
    if let Some(stderr) = child.stderr.take() {
        readers.push(spawn_reader(stderr, tx, false));
    }

    Ok(StreamingCommand {
        program: program.to_string(),
        child,
        lines: rx,
        readers,
        start: Instant::now(),
    })
}

/// Run a program, passing each output line to `on_line` as it arrives.
pub fn execute_streaming(
    program: &str,
    args: &[&str],
    options: &CommandOptions,
    mut on_line: impl FnMut(OutputLine),
) -> Result<CommandResult> {
    let command = spawn_streaming(program, args, options)?;
    while let Some(line) = command.next_line() {
        on_line(line);
    }
    command.wait()
}

/// Platform executable name for a Node tool (`npm` becomes `npm.cmd` on Windows).
pub fn node_program(name: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("{}.cmd", name)
    } else {
        name.to_string()
    }
}
