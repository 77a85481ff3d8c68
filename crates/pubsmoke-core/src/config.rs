use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use pubsmoke_domain::AuthMode;
use url::Url;

use crate::SmokeError;

pub const DEFAULT_TOOL: &str = "uv";
pub const DEFAULT_INDEX_URL: &str = "https://test.pypi.org/simple/";
pub const DEFAULT_PUBLISH_URL: &str = "https://test.pypi.org/legacy/";

#[derive(Clone)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    #[must_use]
    pub fn capture() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    #[must_use]
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Like [`EnvSnapshot::var`], but blank values count as unset.
    #[must_use]
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.var(key).filter(|value| !value.trim().is_empty())
    }

    #[must_use]
    pub fn testing(pairs: &[(&str, &str)]) -> Self {
        let vars = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self { vars }
    }
}

// Values may hold tokens; only list the keys.
impl fmt::Debug for EnvSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.vars.keys().collect();
        keys.sort();
        f.debug_struct("EnvSnapshot").field("keys", &keys).finish()
    }
}

#[derive(Debug)]
pub struct Config {
    pub(crate) tool: ToolConfig,
    pub(crate) index: IndexConfig,
    pub(crate) publish: PublishConfig,
    pub(crate) root: PathBuf,
    pub(crate) env: EnvSnapshot,
}

impl Config {
    /// Builds a configuration snapshot from the current process environment.
    ///
    /// # Errors
    /// Returns an error if the working directory is unavailable or a
    /// `PUBSMOKE_*` variable holds an invalid value.
    pub fn from_env() -> anyhow::Result<Self> {
        let snapshot = EnvSnapshot::capture();
        let cwd = env::current_dir()?;
        Ok(Self::from_snapshot(snapshot, &cwd)?)
    }

    /// # Errors
    /// Returns [`SmokeError::Config`] for invalid `PUBSMOKE_*` values.
    pub fn from_snapshot(snapshot: EnvSnapshot, cwd: &Path) -> Result<Self, SmokeError> {
        let tool = ToolConfig::parse(snapshot.var("PUBSMOKE_TOOL").unwrap_or(DEFAULT_TOOL))?;
        let simple_url = directory_url(
            "PUBSMOKE_INDEX_URL",
            snapshot.non_empty("PUBSMOKE_INDEX_URL").unwrap_or(DEFAULT_INDEX_URL),
        )?;
        let upload_url = upload_url(
            snapshot
                .non_empty("PUBSMOKE_PUBLISH_URL")
                .unwrap_or(DEFAULT_PUBLISH_URL),
        )?;
        let auth_override = snapshot
            .non_empty("PUBSMOKE_AUTH")
            .map(str::parse::<AuthMode>)
            .transpose()
            .map_err(|err| SmokeError::Config(format!("PUBSMOKE_AUTH: {err}")))?;
        let keep_proxies = crate::net::keep_proxies(&snapshot);
        let root = snapshot
            .non_empty("PUBSMOKE_ROOT")
            .map_or_else(|| cwd.to_path_buf(), |raw| cwd.join(raw));
        Ok(Self {
            tool,
            index: IndexConfig {
                simple_url,
                keep_proxies,
            },
            publish: PublishConfig {
                upload_url,
                auth_override,
            },
            root,
            env: snapshot,
        })
    }

    #[must_use]
    pub fn tool(&self) -> &ToolConfig {
        &self.tool
    }

    #[must_use]
    pub fn index(&self) -> &IndexConfig {
        &self.index
    }

    #[must_use]
    pub fn publish(&self) -> &PublishConfig {
        &self.publish
    }

    /// Directory under which projects are scaffolded. A same-named project
    /// directory here is deleted at the start of every run.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn env(&self) -> &EnvSnapshot {
        &self.env
    }
}

/// The external build/publish tool, e.g. `uv` or `cargo run --`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolConfig {
    fn parse(raw: &str) -> Result<Self, SmokeError> {
        let mut words = raw.split_whitespace().map(ToString::to_string);
        let program = words
            .next()
            .ok_or_else(|| SmokeError::Config("PUBSMOKE_TOOL must name a program".into()))?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub simple_url: Url,
    pub keep_proxies: bool,
}

#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub upload_url: Url,
    pub auth_override: Option<AuthMode>,
}

fn parse_url(key: &str, raw: &str) -> Result<Url, SmokeError> {
    Url::parse(raw.trim())
        .map_err(|err| SmokeError::Config(format!("{key}: `{raw}` is not a URL: {err}")))
}

// Keyring mode owns the query string of the upload URL.
fn upload_url(raw: &str) -> Result<Url, SmokeError> {
    let url = parse_url("PUBSMOKE_PUBLISH_URL", raw)?;
    if url.query().is_some() || url.fragment().is_some() {
        return Err(SmokeError::Config(format!(
            "PUBSMOKE_PUBLISH_URL: `{raw}` must not carry a query or fragment"
        )));
    }
    Ok(url)
}

// `Url::join` drops the last segment unless the base ends in `/`.
fn directory_url(key: &str, raw: &str) -> Result<Url, SmokeError> {
    let mut url = parse_url(key, raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
