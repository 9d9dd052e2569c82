use std::ffi::OsString;
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use std::process::ExitStatus;

use log::{debug, info};
use tokio::process::Command;

use crate::error::{PipelineError, Result};

/// One external process call: a program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<OsString>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        ToolInvocation {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.as_os_str().to_owned())
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Runs the process with inherited stdio and waits for it to exit.
    pub async fn run(&self) -> Result<()> {
        info!("running {}", self);
        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => PipelineError::ToolNotFound {
                    program: self.program.clone(),
                },
                ErrorKind::PermissionDenied => PipelineError::ToolNotExecutable {
                    program: self.program.clone(),
                },
                _ => PipelineError::Spawn {
                    program: self.program.clone(),
                    source,
                },
            })?;
        debug!("{} finished with {}", self.program, status);

        if status.success() {
            Ok(())
        } else {
            Err(PipelineError::ToolFailed {
                program: self.program.clone(),
                code: failure_code(status),
            })
        }
    }
}

/// Exit code as a shell reports it: signals become 128 + signal number.
#[cfg(unix)]
fn failure_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => 1,
    }
}

#[cfg(not(unix))]
fn failure_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}
