//! Distribution filenames as listed by a package index.
//!
//! Wheels follow `{name}-{version}(-{build})?-{python}-{abi}-{platform}.whl`;
//! source distributions follow `{name}-{version}.tar.gz` (or `.zip`). Only the
//! separator conventions are checked here; tags are kept as opaque strings.

use std::fmt;
use std::str::FromStr;

use pep440_rs::Version;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilenameError {
    #[error("`{0}` is neither a wheel (.whl) nor a source distribution (.tar.gz/.zip)")]
    UnsupportedExtension(String),
    #[error("wheel filename `{filename}` must have 5 or 6 dash-separated parts, found {parts}")]
    WheelParts { filename: String, parts: usize },
    #[error("wheel filename `{filename}` has build tag `{build}` that does not start with a digit")]
    InvalidBuildTag { filename: String, build: String },
    #[error("source distribution filename `{0}` has no `-` between name and version")]
    MissingSeparator(String),
    #[error("`{0}` is missing the project name")]
    MissingName(String),
    #[error("`{filename}` carries an invalid version `{version}`: {reason}")]
    InvalidVersion {
        filename: String,
        version: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceDistExtension {
    TarGz,
    Zip,
}

impl SourceDistExtension {
    fn suffix(self) -> &'static str {
        match self {
            Self::TarGz => ".tar.gz",
            Self::Zip => ".zip",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelFilename {
    pub name: String,
    pub version: Version,
    pub build: Option<String>,
    pub python_tag: String,
    pub abi_tag: String,
    pub platform_tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDistFilename {
    pub name: String,
    pub version: Version,
    pub extension: SourceDistExtension,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistFilename {
    Wheel(WheelFilename),
    SourceDist(SourceDistFilename),
}

impl DistFilename {
    /// Classifies `filename` by suffix and decodes it with the matching convention.
    pub fn parse(filename: &str) -> Result<Self, FilenameError> {
        if let Some(stem) = filename.strip_suffix(".whl") {
            return parse_wheel(filename, stem).map(Self::Wheel);
        }
        for extension in [SourceDistExtension::TarGz, SourceDistExtension::Zip] {
            if let Some(stem) = filename.strip_suffix(extension.suffix()) {
                return parse_source_dist(filename, stem, extension).map(Self::SourceDist);
            }
        }
        Err(FilenameError::UnsupportedExtension(filename.to_string()))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Wheel(wheel) => &wheel.name,
            Self::SourceDist(sdist) => &sdist.name,
        }
    }

    pub fn version(&self) -> &Version {
        match self {
            Self::Wheel(wheel) => &wheel.version,
            Self::SourceDist(sdist) => &sdist.version,
        }
    }

    pub fn into_version(self) -> Version {
        match self {
            Self::Wheel(wheel) => wheel.version,
            Self::SourceDist(sdist) => sdist.version,
        }
    }
}

impl fmt::Display for DistFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wheel(wheel) => {
                write!(f, "{}-{}", wheel.name, wheel.version)?;
                if let Some(build) = &wheel.build {
                    write!(f, "-{build}")?;
                }
                write!(
                    f,
                    "-{}-{}-{}.whl",
                    wheel.python_tag, wheel.abi_tag, wheel.platform_tag
                )
            }
            Self::SourceDist(sdist) => write!(
                f,
                "{}-{}{}",
                sdist.name,
                sdist.version,
                sdist.extension.suffix()
            ),
        }
    }
}

fn parse_wheel(filename: &str, stem: &str) -> Result<WheelFilename, FilenameError> {
    let parts: Vec<&str> = stem.split('-').collect();
    let (name, version, build, tags) = match parts.as_slice() {
        [name, version, python, abi, platform] => (*name, *version, None, [*python, *abi, *platform]),
        [name, version, build, python, abi, platform] => {
            if !build.starts_with(|ch: char| ch.is_ascii_digit()) {
                return Err(FilenameError::InvalidBuildTag {
                    filename: filename.to_string(),
                    build: (*build).to_string(),
                });
            }
            (
                *name,
                *version,
                Some((*build).to_string()),
                [*python, *abi, *platform],
            )
        }
        _ => {
            return Err(FilenameError::WheelParts {
                filename: filename.to_string(),
                parts: parts.len(),
            })
        }
    };
    if name.is_empty() {
        return Err(FilenameError::MissingName(filename.to_string()));
    }
    let [python_tag, abi_tag, platform_tag] = tags.map(ToString::to_string);
    Ok(WheelFilename {
        name: name.to_string(),
        version: parse_version(filename, version)?,
        build,
        python_tag,
        abi_tag,
        platform_tag,
    })
}

fn parse_source_dist(
    filename: &str,
    stem: &str,
    extension: SourceDistExtension,
) -> Result<SourceDistFilename, FilenameError> {
    // Legacy sdists keep dashes in the name, so split on the last one.
    let (name, version) = stem
        .rsplit_once('-')
        .ok_or_else(|| FilenameError::MissingSeparator(filename.to_string()))?;
    if name.is_empty() {
        return Err(FilenameError::MissingName(filename.to_string()));
    }
    Ok(SourceDistFilename {
        name: name.to_string(),
        version: parse_version(filename, version)?,
        extension,
    })
}

fn parse_version(filename: &str, raw: &str) -> Result<Version, FilenameError> {
    Version::from_str(raw).map_err(|err| FilenameError::InvalidVersion {
        filename: filename.to_string(),
        version: raw.to_string(),
        reason: err.to_string(),
    })
}
