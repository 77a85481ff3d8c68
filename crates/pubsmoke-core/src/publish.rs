use std::fmt;
use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};
use url::Url;

use pubsmoke_domain::{default_auth_mode, AuthMode, ProjectName, PUBLISH_PASSWORD_ENV};

use crate::config::Config;
use crate::effects::Effects;
use crate::errors::{SmokeError, ToolStep};
use crate::tool::run_tool_step;

/// Arguments and child-environment overlay for one `publish` invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct PublishPlan {
    pub mode: AuthMode,
    pub publish_url: Url,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
}

// The overlay carries the token; show keys only.
impl fmt::Debug for PublishPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishPlan")
            .field("mode", &self.mode)
            .field("publish_url", &self.publish_url.as_str())
            .field("args", &self.args)
            .field(
                "envs",
                &self.envs.iter().map(|(key, _)| key.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// The auth mode for `project`: `PUBSMOKE_AUTH` if set, else the
/// per-project default.
#[must_use]
pub fn select_auth_mode(config: &Config, project: &ProjectName) -> AuthMode {
    config
        .publish()
        .auth_override
        .unwrap_or_else(|| default_auth_mode(project.as_str()))
}

/// Works out the `publish` arguments for `project` without running anything.
///
/// # Errors
/// Returns [`SmokeError::MissingToken`] when token mode is selected and the
/// token variable is unset or blank.
pub fn plan_publish(config: &Config, project: &ProjectName) -> Result<PublishPlan, SmokeError> {
    let mode = select_auth_mode(config, project);
    let upload_url = &config.publish().upload_url;
    let mut envs = Vec::new();
    let publish_url = match mode {
        AuthMode::TokenEnv { token_var } => {
            let token = config
                .env()
                .non_empty(token_var)
                .ok_or_else(|| SmokeError::MissingToken {
                    var: token_var,
                    project: project.to_string(),
                })?;
            envs.push((PUBLISH_PASSWORD_ENV.to_string(), token.to_string()));
            upload_url.clone()
        }
        AuthMode::Keyring => keyring_url(upload_url, project),
        AuthMode::Anonymous => upload_url.clone(),
    };

    let mut args = vec!["--publish-url".to_string(), publish_url.to_string()];
    match mode {
        AuthMode::TokenEnv { .. } => {
            args.extend(["--username".to_string(), "__token__".to_string()]);
        }
        AuthMode::Keyring => {
            args.extend([
                "--username".to_string(),
                "__token__".to_string(),
                "--keyring-provider".to_string(),
                "subprocess".to_string(),
            ]);
        }
        AuthMode::Anonymous => {}
    }

    Ok(PublishPlan {
        mode,
        publish_url,
        args,
        envs,
    })
}

/// `<upload url>?<project>`. Keyrings key credentials by URL, so the query
/// gives each test project its own entry for the same endpoint. The upload URL
/// is query-free (checked when the config is loaded), so nothing is replaced.
fn keyring_url(upload_url: &Url, project: &ProjectName) -> Url {
    let mut url = upload_url.clone();
    url.set_query(Some(project.as_str()));
    url
}

/// Runs the tool's `build` in the project directory.
///
/// # Errors
/// Fails when `build` cannot be started or exits non-zero.
pub fn build_project(config: &Config, effects: &dyn Effects, project_root: &Path) -> Result<()> {
    run_tool_step(
        config.tool(),
        effects.tools(),
        ToolStep::Build,
        &[],
        &[],
        project_root,
    )
}

/// Runs the tool's `publish` in the project directory according to `plan`.
///
/// # Errors
/// Fails when `publish` cannot be started or exits non-zero.
pub fn publish_project(
    config: &Config,
    effects: &dyn Effects,
    project_root: &Path,
    plan: &PublishPlan,
) -> Result<()> {
    match plan.mode {
        AuthMode::Anonymous => warn!(
            url = %plan.publish_url,
            "publishing without credentials; the tool decides how to authenticate"
        ),
        mode => info!(%mode, url = %plan.publish_url, "publishing"),
    }
    run_tool_step(
        config.tool(),
        effects.tools(),
        ToolStep::Publish,
        &plan.args,
        &plan.envs,
        project_root,
    )
}
