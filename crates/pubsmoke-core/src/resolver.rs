use std::collections::BTreeSet;

use tracing::{debug, info};

use pubsmoke_domain::{next_release, DistFilename, NextReleaseError, ProjectName, Version};

use crate::effects::IndexClient;
use crate::errors::ResolveError;

/// Returns a version strictly newer than everything the index lists for
/// `project`: the highest listed version with its last release component
/// bumped.
///
/// # Errors
/// Fails when the index query fails, a listed filename cannot be parsed, or
/// the project has no files at all.
pub fn resolve_next_version(
    index: &dyn IndexClient,
    project: &ProjectName,
) -> Result<Version, ResolveError> {
    let filenames = index.project_files(project)?;
    let mut versions = BTreeSet::new();
    for filename in &filenames {
        let version = DistFilename::parse(filename)?.into_version();
        debug!(%filename, %version, "parsed index file");
        versions.insert(version);
    }
    let next = next_release(&versions).map_err(|err| match err {
        NextReleaseError::Empty(source) => ResolveError::NoPriorReleases {
            project: project.to_string(),
            source,
        },
        NextReleaseError::Overflow(source) => ResolveError::Overflow(source),
    })?;
    info!(
        project = %project,
        files = filenames.len(),
        versions = versions.len(),
        %next,
        "resolved unclaimed version"
    );
    Ok(next)
}
