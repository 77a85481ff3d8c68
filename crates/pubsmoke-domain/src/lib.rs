#![deny(clippy::all, warnings)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

pub mod auth;
pub mod filename;
pub mod name;
pub mod pyproject;
pub mod version;

pub use auth::{
    default_auth_mode, AuthMode, AuthModeParseError, KEYRING_PROJECT, PUBLISH_PASSWORD_ENV,
    TEST_TOKEN_ENV, TOKEN_PROJECT,
};
pub use filename::{DistFilename, FilenameError, SourceDistExtension, SourceDistFilename, WheelFilename};
pub use name::{canonicalize_package_name, ProjectName, ProjectNameError};
pub use pyproject::{rewrite_version, RewriteError};
pub use version::{
    bump_release, next_release, EmptyVersionSet, NextReleaseError, ReleaseOverflow,
};

pub use pep440_rs::Version;
