//! External process invocation
//!
//! Runs one tool to completion and classifies the result into a
//! [`ToolError`] so adapters never have to look at raw `io::Error`s.

use std::ffi::{OsStr, OsString};
use std::io::{ErrorKind, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::defaults::PROCESS_POLL_INTERVAL_MS;
use crate::error::ToolError;

/// Builder for a single external tool run
#[derive(Debug, Clone)]
pub struct ToolInvocation<'a> {
    program: &'a str,
    hint: &'static str,
    args: Vec<OsString>,
    timeout: Option<Duration>,
    success_codes: &'static [i32],
}

impl<'a> ToolInvocation<'a> {
    /// `hint` names the package to install when `program` is not found.
    pub fn new(program: &'a str, hint: &'static str) -> Self {
        Self {
            program,
            hint,
            args: Vec::new(),
            timeout: None,
            success_codes: &[0],
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// `-sName=value` style argument with a path value
    pub fn keyed_arg(self, key: &str, value: impl AsRef<OsStr>) -> Self {
        let mut arg = OsString::from(key);
        arg.push(value);
        self.arg(arg)
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exit codes that count as success (qpdf exits 3 on warnings)
    pub fn success_codes(mut self, codes: &'static [i32]) -> Self {
        self.success_codes = codes;
        self
    }

    pub fn run(self) -> Result<(), ToolError> {
        log::debug!("Running {} {:?}", self.program, self.args);

        let mut command = Command::new(self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        // A bounded run gets its own process group so a timeout can take
        // down helpers the tool spawned (tesseract, gs)
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            if self.timeout.is_some() {
                command.process_group(0);
            }
        }

        let mut child = command
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ToolError::Missing {
                    tool: self.program.to_string(),
                    hint: self.hint,
                },
                _ => ToolError::Io(e),
            })?;

        // Drain stderr concurrently so a chatty tool cannot block on a full pipe
        let stderr = child.stderr.take();
        let reader = thread::spawn(move || {
            let mut buf = Vec::new();
            if let Some(mut stderr) = stderr {
                let _ = stderr.read_to_end(&mut buf);
            }
            String::from_utf8_lossy(&buf).trim().to_string()
        });

        let status = match self.timeout {
            Some(limit) => match wait_with_timeout(&mut child, limit)? {
                Some(status) => status,
                None => {
                    // Not joined: an orphaned helper may still hold the pipe
                    drop(reader);
                    return Err(ToolError::TimedOut {
                        tool: self.program.to_string(),
                        after: limit,
                    });
                }
            },
            None => child.wait()?,
        };
        let stderr = reader.join().unwrap_or_default();

        match status.code() {
            Some(code) if self.success_codes.contains(&code) => Ok(()),
            code => Err(ToolError::RejectedInput {
                tool: self.program.to_string(),
                code: code.map_or_else(|| "unknown".to_string(), |c| c.to_string()),
                stderr,
            }),
        }
    }
}

/// Returns `None` after killing the child if it outlives `limit`.
fn wait_with_timeout(
    child: &mut Child,
    limit: Duration,
) -> Result<Option<ExitStatus>, ToolError> {
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if started.elapsed() >= limit {
            kill_process_group(child);
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(Duration::from_millis(PROCESS_POLL_INTERVAL_MS));
    }
}

#[cfg(unix)]
fn kill_process_group(child: &Child) {
    if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
        // SAFETY: plain syscall; the group was created for this child
        unsafe {
            libc::kill(-pgid, libc::SIGKILL);
        }
    }
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}
