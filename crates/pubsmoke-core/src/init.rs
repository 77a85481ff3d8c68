use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};

use pubsmoke_domain::{rewrite_version, ProjectName, Version};

use crate::config::Config;
use crate::effects::Effects;
use crate::errors::{SmokeError, ToolStep};
use crate::tool::run_tool_step;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializedProject {
    pub name: ProjectName,
    pub root: PathBuf,
    pub version: Version,
}

/// Scaffolds a fresh library project under the working root and pins its
/// declared version to `version`.
///
/// Any existing `<root>/<name>` directory is removed first, without asking;
/// point the working root at a scratch directory.
///
/// # Errors
/// Fails when the old directory cannot be removed, `init` exits non-zero, or
/// `pyproject.toml` does not contain exactly one `version = "..."` line.
pub fn initialize_project(
    config: &Config,
    effects: &dyn Effects,
    project: &ProjectName,
    version: &Version,
) -> Result<InitializedProject> {
    let fs = effects.fs();
    let project_root = config.root().join(project.as_str());
    if fs.exists(&project_root) {
        warn!(path = %project_root.display(), "removing existing project directory");
        fs.remove_dir_all(&project_root)?;
    }

    run_tool_step(
        config.tool(),
        effects.tools(),
        ToolStep::Init,
        &["--lib".to_string(), project.to_string()],
        &[],
        config.root(),
    )?;

    let pyproject = project_root.join("pyproject.toml");
    let contents = fs.read_to_string(&pyproject)?;
    let rewritten =
        rewrite_version(&contents, &version.to_string()).map_err(|source| SmokeError::Rewrite {
            path: pyproject.clone(),
            source,
        })?;
    fs.write(&pyproject, rewritten.as_bytes())?;
    info!(path = %pyproject.display(), %version, "pinned project version");

    Ok(InitializedProject {
        name: project.clone(),
        root: project_root,
        version: version.clone(),
    })
}
