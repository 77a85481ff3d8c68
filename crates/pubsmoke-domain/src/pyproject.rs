use once_cell::sync::Lazy;
use regex::Regex;

// `version = "..."` on its own line; only the quoted value is replaced.
static VERSION_ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^[ \t]*version[ \t]*=[ \t]*"(?P<value>[^"\r\n]*)""#)
        .expect("version assignment pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    #[error("no `version = \"...\"` assignment found in pyproject.toml")]
    NotFound,
    #[error("expected one `version = \"...\"` assignment in pyproject.toml, found {0}")]
    Ambiguous(usize),
}

/// Replaces the value of the single `version = "..."` line in `contents`.
///
/// This is a textual substitution, not a TOML edit: every other byte is kept
/// as-is. Zero or multiple matches are errors rather than silent no-ops.
pub fn rewrite_version(contents: &str, version: &str) -> Result<String, RewriteError> {
    let mut matches = VERSION_ASSIGNMENT.captures_iter(contents);
    let Some(value) = matches.next().and_then(|captures| captures.name("value")) else {
        return Err(RewriteError::NotFound);
    };
    let extra = matches.count();
    if extra > 0 {
        return Err(RewriteError::Ambiguous(extra + 1));
    }
    let mut rewritten = String::with_capacity(contents.len() + version.len());
    rewritten.push_str(&contents[..value.start()]);
    rewritten.push_str(version);
    rewritten.push_str(&contents[value.end()..]);
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCAFFOLD: &str = r#"[project]
name = "astral-test-password"
version = "0.1.0"
description = "Add your description here"
readme = "README.md"
requires-python = ">=3.12"
dependencies = []

[build-system]
requires = ["uv_build>=0.9.11,<0.10.0"]
build-backend = "uv_build"
"#;

    #[test]
    fn replaces_only_the_version_value() {
        let rewritten = rewrite_version(SCAFFOLD, "0.1.18").unwrap();
        assert_eq!(rewritten, SCAFFOLD.replace("\"0.1.0\"", "\"0.1.18\""));
    }

    #[test]
    fn rewriting_twice_keeps_surrounding_text() {
        let once = rewrite_version(SCAFFOLD, "1.2.5").unwrap();
        let twice = rewrite_version(&once, "1.2.6").unwrap();
        assert_eq!(twice, SCAFFOLD.replace("\"0.1.0\"", "\"1.2.6\""));
    }

    #[test]
    fn keeps_crlf_line_endings_and_indentation() {
        let contents = "[project]\r\n  version = \"0.0.1\"\r\nname = \"x\"\r\n";
        let rewritten = rewrite_version(contents, "0.0.2").unwrap();
        assert_eq!(rewritten, "[project]\r\n  version = \"0.0.2\"\r\nname = \"x\"\r\n");
    }

    #[test]
    fn ignores_other_keys_ending_in_version() {
        let contents = "[tool.ruff]\ntarget-version = \"py312\"\n[project]\nversion = \"1\"\n";
        let rewritten = rewrite_version(contents, "2").unwrap();
        assert_eq!(
            rewritten,
            "[tool.ruff]\ntarget-version = \"py312\"\n[project]\nversion = \"2\"\n"
        );
    }

    #[test]
    fn missing_or_repeated_assignment_is_an_error() {
        assert_eq!(
            rewrite_version("[project]\nname = \"x\"\n", "1.0"),
            Err(RewriteError::NotFound)
        );
        assert_eq!(
            rewrite_version("[project]\ndynamic = [\"version\"]\n", "1.0"),
            Err(RewriteError::NotFound)
        );
        assert_eq!(
            rewrite_version("version = \"1\"\n[tool.x]\nversion = \"2\"\n", "3"),
            Err(RewriteError::Ambiguous(2))
        );
    }
}
