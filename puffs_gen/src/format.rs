/* Formatter collaborator: raw generated text in, formatted text out */

use crate::error::FormatError;
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

pub const DEFAULT_PROGRAM: &str = "clang-format";
pub const DEFAULT_STYLE: &str = "Chromium";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub trait Formatter {
    fn format(&self, raw: &str) -> Result<String, FormatError>;
}

impl<F> Formatter for F
where
    F: Fn(&str) -> Result<String, FormatError>,
{
    fn format(&self, raw: &str) -> Result<String, FormatError> {
        self(raw)
    }
}

/// Returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Formatter for Passthrough {
    fn format(&self, raw: &str) -> Result<String, FormatError> {
        Ok(raw.to_string())
    }
}

/// Pipes the text through an external program's stdin/stdout.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl Default for CommandFormatter {
    fn default() -> Self {
        Self::clang_format(DEFAULT_STYLE)
    }
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn clang_format(style: &str) -> Self {
        Self::new(DEFAULT_PROGRAM, vec![format!("-style={}", style)], DEFAULT_TIMEOUT)
    }

    fn io_error(&self, source: std::io::Error) -> FormatError {
        FormatError::Io {
            program: self.program.clone(),
            source,
        }
    }
}

/* Reads a pipe to the end on its own thread so neither pipe can fill up and
 * stall the child while we wait on it. */
fn drain<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn join<T>(handle: thread::JoinHandle<std::io::Result<T>>) -> std::io::Result<T> {
    handle
        .join()
        .unwrap_or_else(|_| Err(std::io::Error::other("formatter pipe thread panicked")))
}

impl Formatter for CommandFormatter {
    fn format(&self, raw: &str) -> Result<String, FormatError> {
        tracing::debug!(program = %self.program, args = ?self.args, bytes = raw.len(), "running formatter");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| FormatError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let (Some(mut stdin), Some(stdout), Some(stderr)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            let _ = child.kill();
            return Err(self.io_error(std::io::Error::other("formatter pipes were not captured")));
        };

        let input = raw.as_bytes().to_vec();
        let writer = thread::spawn(move || stdin.write_all(&input));
        let stdout_reader = drain(stdout);
        let stderr_reader = drain(stderr);

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(FormatError::Timeout {
                        program: self.program.clone(),
                        after: self.timeout,
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(source) => {
                    let _ = child.kill();
                    return Err(self.io_error(source));
                }
            }
        };

        let written = join(writer);
        let stdout = join(stdout_reader).map_err(|source| self.io_error(source))?;
        let stderr = join(stderr_reader).map_err(|source| self.io_error(source))?;
        let stderr = String::from_utf8_lossy(&stderr).trim().to_string();

        if !status.success() {
            return Err(FormatError::Exit {
                program: self.program.clone(),
                status,
                stderr,
            });
        }
        written.map_err(|source| self.io_error(source))?;
        if !stderr.is_empty() {
            tracing::warn!(program = %self.program, "formatter stderr: {}", stderr);
        }

        String::from_utf8(stdout).map_err(|source| FormatError::InvalidUtf8 {
            program: self.program.clone(),
            source,
        })
    }
}
