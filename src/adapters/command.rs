// SPDX-License-Identifier: MIT OR Apache-2.0

//! External command execution and the mount hook built on it.

use crate::domain::{ConfigError, Result};
use crate::ports::MountHook;
use std::process::{Command, Stdio};

/// Runs `program` with `args` and waits for it to finish.
///
/// Returns the exit code and the captured standard output, decoded lossily as
/// UTF-8. Standard error is inherited. A process killed by a signal reports
/// exit code `-1`.
///
/// # Errors
///
/// Fails with a [`ConfigError::SourceError`] if the program cannot be spawned.
///
/// # Examples
///
/// ```rust,no_run
/// use cfgchain::adapters::run_command;
///
/// let (code, listing) = run_command("ls", &["-lah"]).unwrap();
/// assert_eq!(code, 0);
/// println!("{}", listing);
/// ```
pub fn run_command<S: AsRef<str>>(program: &str, args: &[S]) -> Result<(i32, String)> {
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    tracing::debug!("{} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(&args)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|e| ConfigError::SourceError {
            source_name: "command".to_string(),
            message: format!("Failed to run '{}': {}", program, e),
            source: Some(Box::new(e)),
        })?;

    let code = output.status.code().unwrap_or(-1);
    Ok((code, String::from_utf8_lossy(&output.stdout).into_owned()))
}

/// A [`MountHook`] that runs an external command, e.g. `mount` or `rclone`.
///
/// A non-zero exit status is reported as an error.
#[derive(Debug, Clone)]
pub struct CommandMountHook {
    program: String,
    args: Vec<String>,
}

impl CommandMountHook {
    /// Creates a hook running `program` with `args`.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl MountHook for CommandMountHook {
    fn mount(&self) -> Result<()> {
        let (code, _) = run_command(&self.program, &self.args)?;
        if code == 0 {
            Ok(())
        } else {
            Err(ConfigError::SourceError {
                source_name: "command".to_string(),
                message: format!("'{}' exited with status {}", self.program, code),
                source: None,
            })
        }
    }
}
