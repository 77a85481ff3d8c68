// Test-only effects: a canned index listing and a tool runner that records
// every invocation and scaffolds a project on `init`.
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;

use pubsmoke_domain::ProjectName;

use crate::effects::{Effects, FileSystem, IndexClient, SystemFileSystem, ToolRunner};
use crate::index::IndexError;
use crate::process::RunOutput;

pub(crate) const SCAFFOLD_PYPROJECT: &str = r#"[project]
name = "NAME"
version = "0.1.0"
description = "Add your description here"
readme = "README.md"
requires-python = ">=3.12"
dependencies = []

[build-system]
requires = ["uv_build>=0.9.11,<0.10.0"]
build-backend = "uv_build"
"#;

pub(crate) struct FakeIndex {
    pub(crate) files: Vec<String>,
    pub(crate) queries: Mutex<Vec<String>>,
}

impl FakeIndex {
    pub(crate) fn with_files(files: &[&str]) -> Self {
        Self {
            files: files.iter().map(ToString::to_string).collect(),
            queries: Mutex::new(Vec::new()),
        }
    }
}

impl IndexClient for FakeIndex {
    fn project_files(&self, project: &ProjectName) -> Result<Vec<String>, IndexError> {
        self.queries.lock().unwrap().push(project.normalized());
        Ok(self.files.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub(crate) program: String,
    pub(crate) args: Vec<String>,
    pub(crate) envs: Vec<(String, String)>,
    pub(crate) cwd: PathBuf,
}

#[derive(Default)]
pub(crate) struct RecordingRunner {
    pub(crate) invocations: Mutex<Vec<Invocation>>,
    /// Subcommand that should fail, with its exit code.
    pub(crate) fail: Option<(&'static str, i32)>,
}

impl RecordingRunner {
    pub(crate) fn failing(subcommand: &'static str, code: i32) -> Self {
        Self {
            invocations: Mutex::new(Vec::new()),
            fail: Some((subcommand, code)),
        }
    }

    pub(crate) fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }
}

impl ToolRunner for RecordingRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        envs: &[(String, String)],
        cwd: &Path,
    ) -> Result<RunOutput> {
        self.invocations.lock().unwrap().push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
            envs: envs.to_vec(),
            cwd: cwd.to_path_buf(),
        });
        let subcommand = args.first().map(String::as_str).unwrap_or_default();
        if let Some((failing, code)) = self.fail {
            if failing == subcommand {
                return Ok(RunOutput { code: Some(code) });
            }
        }
        if subcommand == "init" {
            let name = args.last().cloned().unwrap_or_default();
            let project_root = cwd.join(&name);
            std::fs::create_dir_all(&project_root)?;
            std::fs::write(
                project_root.join("pyproject.toml"),
                SCAFFOLD_PYPROJECT.replace("NAME", &name),
            )?;
        }
        Ok(RunOutput { code: Some(0) })
    }
}

pub(crate) struct FakeEffects {
    pub(crate) index: FakeIndex,
    pub(crate) tools: RecordingRunner,
    fs: SystemFileSystem,
}

impl FakeEffects {
    pub(crate) fn new(index: FakeIndex, tools: RecordingRunner) -> Self {
        Self {
            index,
            tools,
            fs: SystemFileSystem,
        }
    }
}

impl Effects for FakeEffects {
    fn index(&self) -> &dyn IndexClient {
        &self.index
    }

    fn tools(&self) -> &dyn ToolRunner {
        &self.tools
    }

    fn fs(&self) -> &dyn FileSystem {
        &self.fs
    }
}
