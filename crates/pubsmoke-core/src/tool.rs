use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::ToolConfig;
use crate::effects::ToolRunner;
use crate::errors::{SmokeError, ToolStep};

/// Runs one subcommand of the external tool and fails on a non-zero exit.
///
/// `envs` is layered on top of the inherited environment of the child only.
pub(crate) fn run_tool_step(
    tool: &ToolConfig,
    runner: &dyn ToolRunner,
    step: ToolStep,
    args: &[String],
    envs: &[(String, String)],
    cwd: &Path,
) -> Result<()> {
    let mut argv = tool.args.clone();
    argv.push(step.subcommand().to_string());
    argv.extend(args.iter().cloned());

    info!(step = %step, cwd = %cwd.display(), "running {} {}", tool.program, argv.join(" "));
    debug!(
        step = %step,
        env = ?envs.iter().map(|(key, _)| key.as_str()).collect::<Vec<_>>(),
        "child environment overlay"
    );
    let output = runner
        .run(&tool.program, &argv, envs, cwd)
        .with_context(|| format!("running `{} {step}`", tool.program))?;
    if !output.success() {
        return Err(SmokeError::ToolFailed {
            step,
            code: output.code,
        }
        .into());
    }
    Ok(())
}
