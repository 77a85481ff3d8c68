//! End-to-end publish smoke test: scaffold a throwaway project with the
//! external tool, give it a version the test index has not seen yet, build it,
//! and upload it with the credential strategy the project name calls for.

#![deny(clippy::all, warnings)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod config;
mod effects;
mod errors;
mod index;
mod init;
mod net;
mod process;
mod publish;
mod resolver;
mod tool;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use tracing::info;

pub use crate::config::{
    Config, EnvSnapshot, IndexConfig, PublishConfig, ToolConfig, DEFAULT_INDEX_URL,
    DEFAULT_PUBLISH_URL, DEFAULT_TOOL,
};
pub use crate::effects::{Effects, FileSystem, IndexClient, SystemEffects, ToolRunner};
pub use crate::errors::{ResolveError, SmokeError, ToolStep};
pub use crate::index::{fetch_project_files, project_listing_url, IndexError, SIMPLE_JSON_FORMAT};
pub use crate::init::{initialize_project, InitializedProject};
pub use crate::process::{run_command_passthrough, RunOutput};
pub use crate::publish::{
    build_project, plan_publish, publish_project, select_auth_mode, PublishPlan,
};
pub use crate::resolver::resolve_next_version;

pub use pubsmoke_domain::{AuthMode, ProjectName, Version};

#[derive(Debug, Clone)]
pub struct SmokeReport {
    pub project: InitializedProject,
    pub mode: AuthMode,
    pub publish_url: String,
}

/// Runs the whole smoke test for `project`.
///
/// Order: plan the upload (so a missing token fails first), resolve the next
/// version from the index, scaffold and pin the project, then `build` and
/// `publish`. Nothing is retried and nothing is cleaned up on failure.
pub fn run_smoke(
    config: &Config,
    effects: &dyn Effects,
    project: &ProjectName,
) -> Result<SmokeReport> {
    let plan = plan_publish(config, project)?;
    info!(project = %project, mode = %plan.mode, "starting publish smoke test");

    let version = resolve_next_version(effects.index(), project).map_err(SmokeError::from)?;
    let initialized = initialize_project(config, effects, project, &version)?;
    build_project(config, effects, &initialized.root)?;
    publish_project(config, effects, &initialized.root, &plan)?;

    info!(project = %project, %version, "published");
    Ok(SmokeReport {
        project: initialized,
        mode: plan.mode,
        publish_url: plan.publish_url.to_string(),
    })
}
