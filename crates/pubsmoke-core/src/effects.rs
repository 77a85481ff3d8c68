use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use url::Url;

use pubsmoke_domain::ProjectName;

use crate::config::Config;
use crate::index::{fetch_project_files, IndexError};
use crate::net::build_http_client;
use crate::process::{run_command_passthrough, RunOutput};

pub trait IndexClient: Send + Sync {
    fn project_files(&self, project: &ProjectName) -> Result<Vec<String>, IndexError>;
}

pub trait ToolRunner: Send + Sync {
    fn run(
        &self,
        program: &str,
        args: &[String],
        envs: &[(String, String)],
        cwd: &Path,
    ) -> Result<RunOutput>;
}

pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
}

pub trait Effects: Send + Sync {
    fn index(&self) -> &dyn IndexClient;
    fn tools(&self) -> &dyn ToolRunner;
    fn fs(&self) -> &dyn FileSystem;
}

pub struct SystemEffects {
    index: Arc<HttpIndexClient>,
    tools: Arc<SystemToolRunner>,
    fs: Arc<SystemFileSystem>,
}

impl SystemEffects {
    /// # Errors
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_http_client(config.index().keep_proxies)?;
        Ok(Self {
            index: Arc::new(HttpIndexClient {
                client,
                simple_url: config.index().simple_url.clone(),
            }),
            tools: Arc::new(SystemToolRunner),
            fs: Arc::new(SystemFileSystem),
        })
    }
}

impl Effects for SystemEffects {
    fn index(&self) -> &dyn IndexClient {
        self.index.as_ref()
    }

    fn tools(&self) -> &dyn ToolRunner {
        self.tools.as_ref()
    }

    fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }
}

struct HttpIndexClient {
    client: Client,
    simple_url: Url,
}

impl IndexClient for HttpIndexClient {
    fn project_files(&self, project: &ProjectName) -> Result<Vec<String>, IndexError> {
        fetch_project_files(&self.client, &self.simple_url, project)
    }
}

struct SystemToolRunner;

impl ToolRunner for SystemToolRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        envs: &[(String, String)],
        cwd: &Path,
    ) -> Result<RunOutput> {
        run_command_passthrough(program, args, envs, cwd)
    }
}

pub(crate) struct SystemFileSystem;

impl FileSystem for SystemFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::remove_dir_all(path).with_context(|| format!("removing dir {}", path.display()))
    }
}
