use std::fmt;
use std::str::FromStr;

/// Test project that authenticates with a token passed through the environment.
pub const TOKEN_PROJECT: &str = "astral-test-password";
/// Test project whose token lives in a keyring, keyed by a decorated upload URL.
pub const KEYRING_PROJECT: &str = "astral-test-keyring";
/// Where the test-index token is read from in token mode.
pub const TEST_TOKEN_ENV: &str = "UV_TEST_PUBLISH_TOKEN";
/// Password variable the publish subprocess reads.
pub const PUBLISH_PASSWORD_ENV: &str = "UV_PUBLISH_PASSWORD";

/// How credentials reach the publish subprocess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Copy `token_var` into the child's `UV_PUBLISH_PASSWORD`.
    TokenEnv { token_var: &'static str },
    /// Let the tool ask a keyring subprocess, using `<upload url>?<project>` as the key.
    Keyring,
    /// No credential flags or variables; whatever the tool does on its own.
    Anonymous,
}

impl AuthMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::TokenEnv { .. } => "token",
            Self::Keyring => "keyring",
            Self::Anonymous => "anonymous",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown auth mode `{0}` (expected token, keyring, or anonymous)")]
pub struct AuthModeParseError(String);

impl FromStr for AuthMode {
    type Err = AuthModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "token" | "token-env" | "password" => Ok(Self::TokenEnv {
                token_var: TEST_TOKEN_ENV,
            }),
            "keyring" => Ok(Self::Keyring),
            "anonymous" | "none" => Ok(Self::Anonymous),
            _ => Err(AuthModeParseError(s.to_string())),
        }
    }
}

/// The auth mode each known test project exercises.
pub fn default_auth_mode(project: &str) -> AuthMode {
    match project {
        TOKEN_PROJECT => AuthMode::TokenEnv {
            token_var: TEST_TOKEN_ENV,
        },
        KEYRING_PROJECT => AuthMode::Keyring,
        _ => AuthMode::Anonymous,
    }
}
