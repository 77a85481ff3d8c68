use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectNameError {
    #[error("project name must not be empty")]
    Empty,
    #[error("project name `{name}` contains invalid character {ch:?}")]
    InvalidCharacter { name: String, ch: char },
    #[error("project name `{0}` must start and end with a letter or digit")]
    InvalidBoundary(String),
}

/// A package name as typed by the caller, checked against the package-name
/// grammar (`[A-Za-z0-9]([A-Za-z0-9._-]*[A-Za-z0-9])?`).
///
/// The raw spelling is kept because the scaffolded directory uses it verbatim;
/// index lookups go through [`ProjectName::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(raw: impl Into<String>) -> Result<Self, ProjectNameError> {
        let raw = raw.into();
        let (Some(first), Some(last)) = (raw.chars().next(), raw.chars().last()) else {
            return Err(ProjectNameError::Empty);
        };
        if let Some(ch) = raw
            .chars()
            .find(|ch| !(ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-')))
        {
            return Err(ProjectNameError::InvalidCharacter { name: raw, ch });
        }
        if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
            return Err(ProjectNameError::InvalidBoundary(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn normalized(&self) -> String {
        canonicalize_package_name(&self.0)
    }
}

impl FromStr for ProjectName {
    type Err = ProjectNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lower-cases the name and collapses runs of `-`, `_` and `.` into a single `-`.
pub fn canonicalize_package_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator = false;
    for ch in name.chars() {
        if matches!(ch, '-' | '_' | '.') {
            if !in_separator {
                normalized.push('-');
            }
            in_separator = true;
        } else {
            normalized.push(ch.to_ascii_lowercase());
            in_separator = false;
        }
    }
    normalized
}
