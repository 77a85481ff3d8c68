use std::fmt;
use std::path::PathBuf;

use pubsmoke_domain::{EmptyVersionSet, FilenameError, ReleaseOverflow, RewriteError};

use crate::index::IndexError;

/// External tool subcommands, in the order a run invokes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStep {
    Init,
    Build,
    Publish,
}

impl ToolStep {
    #[must_use]
    pub fn subcommand(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Build => "build",
            Self::Publish => "publish",
        }
    }
}

impl fmt::Display for ToolStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subcommand())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Filename(#[from] FilenameError),
    #[error("{project} has no prior releases on the index")]
    NoPriorReleases {
        project: String,
        #[source]
        source: EmptyVersionSet,
    },
    #[error(transparent)]
    Overflow(#[from] ReleaseOverflow),
}

#[derive(Debug, thiserror::Error)]
pub enum SmokeError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("{var} must be set to publish {project} with token authentication")]
    MissingToken { var: &'static str, project: String },
    #[error("failed to update the version in {}", .path.display())]
    Rewrite {
        path: PathBuf,
        #[source]
        source: RewriteError,
    },
    #[error("`{step}` exited with {}", exit_label(.code))]
    ToolFailed { step: ToolStep, code: Option<i32> },
}

impl SmokeError {
    /// Process exit code to report for this failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
