#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::assert::Assert;
use httptest::matchers::{matches, request};
use httptest::{responders::json_encoded, Expectation, Server};
use serde_json::json;

/// Stand-in for the external tool. Appends `cwd|args|UV_PUBLISH_PASSWORD` to
/// `$FAKE_TOOL_LOG`, fails the step named by `$FAKE_TOOL_FAIL`, and writes a
/// minimal `pyproject.toml` on `init`.
const FAKE_TOOL: &str = r#"#!/bin/sh
printf '%s|%s|%s\n' "$(pwd -P)" "$*" "${UV_PUBLISH_PASSWORD:-}" >> "$FAKE_TOOL_LOG"
if [ "$1" = "${FAKE_TOOL_FAIL:-}" ]; then
    exit "${FAKE_TOOL_CODE:-1}"
fi
if [ "$1" = "init" ]; then
    mkdir -p "$3"
    printf '[project]\nname = "%s"\nversion = "0.1.0"\nrequires-python = ">=3.9"\n' "$3" > "$3/pyproject.toml"
fi
exit 0
"#;

#[cfg(unix)]
pub fn install_fake_tool(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-tool.sh");
    fs::write(&path, FAKE_TOOL).expect("write fake tool");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod fake tool");
    path
}

/// Serves a simple-API JSON listing for `project` with the given filenames.
pub fn serve_listing(project: &str, files: &[&str]) -> Server {
    let server = Server::run();
    let files: Vec<_> = files
        .iter()
        .map(|name| json!({"filename": name, "url": format!("https://files.example/{name}")}))
        .collect();
    server.expect(
        Expectation::matching(request::method_path(
            "GET",
            matches(format!("^/simple/{project}/$")),
        ))
        .respond_with(json_encoded(json!({
            "meta": {"api-version": "1.1"},
            "name": project,
            "files": files,
        }))),
    );
    server
}

/// One recorded tool invocation: working directory, argv, injected password.
#[derive(Debug)]
pub struct ToolCall {
    pub cwd: PathBuf,
    pub args: String,
    pub password: String,
}

pub fn read_calls(log: &Path) -> Vec<ToolCall> {
    let Ok(contents) = fs::read_to_string(log) else {
        return Vec::new();
    };
    contents
        .lines()
        .map(|line| {
            let mut parts = line.splitn(3, '|');
            ToolCall {
                cwd: PathBuf::from(parts.next().unwrap_or_default()),
                args: parts.next().unwrap_or_default().to_string(),
                password: parts.next().unwrap_or_default().to_string(),
            }
        })
        .collect()
}

pub fn stderr(assert: &Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}

pub fn stdout(assert: &Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}
