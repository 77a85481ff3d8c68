use std::{
    path::Path,
    process::{Command, Stdio},
};

use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutput {
    /// `None` when the child was terminated by a signal.
    pub code: Option<i32>,
}

impl RunOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Execute a program with inherited stdio, blocking until it exits.
///
/// The child starts from the parent's environment with `envs` layered on top;
/// the parent's own environment is never modified.
///
/// # Errors
///
/// Returns an error when the program cannot be spawned or waited on.
pub fn run_command_passthrough(
    program: &str,
    args: &[String],
    envs: &[(String, String)],
    cwd: &Path,
) -> Result<RunOutput> {
    let mut command = configured_command(program, args, envs, cwd);
    command.stdin(Stdio::inherit());
    command.stdout(Stdio::inherit());
    command.stderr(Stdio::inherit());

    let status = command
        .status()
        .with_context(|| format!("failed to start {program}"))?;
    Ok(RunOutput {
        code: status.code(),
    })
}

fn configured_command(
    program: &str,
    args: &[String],
    envs: &[(String, String)],
    cwd: &Path,
) -> Command {
    let mut command = Command::new(program);
    command.args(args);
    command.envs(envs.iter().map(|(key, value)| (key, value)));
    command.current_dir(cwd);
    command
}
