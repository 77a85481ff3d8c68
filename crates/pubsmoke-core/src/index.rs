//! Read-only queries against the simple repository API (JSON flavour).

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use pubsmoke_domain::ProjectName;

pub const SIMPLE_JSON_FORMAT: &str = "application/vnd.pypi.simple.v1+json";

#[derive(Debug, Deserialize)]
pub struct SimpleProjectResponse {
    pub files: Vec<SimpleFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimpleFile {
    pub filename: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("invalid index URL for {project}: {source}")]
    Url {
        project: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to query {url}")]
    Request {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status {
        url: Url,
        status: reqwest::StatusCode,
    },
    #[error("invalid JSON listing from {url}")]
    Json {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
}

/// `{simple}/{normalized-name}/?format=application/vnd.pypi.simple.v1+json`
pub fn project_listing_url(simple_url: &Url, project: &ProjectName) -> Result<Url, IndexError> {
    let mut url = simple_url
        .join(&format!("{}/", project.normalized()))
        .map_err(|source| IndexError::Url {
            project: project.to_string(),
            source,
        })?;
    url.set_query(Some(&format!("format={SIMPLE_JSON_FORMAT}")));
    Ok(url)
}

/// Fetches every filename the index lists for `project`. One attempt, no retry.
pub fn fetch_project_files(
    client: &Client,
    simple_url: &Url,
    project: &ProjectName,
) -> Result<Vec<String>, IndexError> {
    let url = project_listing_url(simple_url, project)?;
    debug!(%url, "querying index");
    let response = client
        .get(url.clone())
        .header(ACCEPT, SIMPLE_JSON_FORMAT)
        .send()
        .map_err(|source| IndexError::Request {
            url: url.clone(),
            source,
        })?;
    let status = response.status();
    if !status.is_success() {
        return Err(IndexError::Status { url, status });
    }
    let listing: SimpleProjectResponse = response
        .json()
        .map_err(|source| IndexError::Json { url: url.clone(), source })?;
    debug!(%url, files = listing.files.len(), "index listing received");
    Ok(listing.files.into_iter().map(|file| file.filename).collect())
}
