use clap::Parser;
use pubsmoke_core::ProjectName;

pub const PUBSMOKE_AFTER_HELP: &str = concat!(
    "Authentication\n",
    "  astral-test-password   token from UV_TEST_PUBLISH_TOKEN, passed as UV_PUBLISH_PASSWORD\n",
    "  astral-test-keyring    keyring lookup for <upload url>?astral-test-keyring\n",
    "  anything else          no credentials (override with PUBSMOKE_AUTH=token|keyring|anonymous)\n\n",
    "Environment\n",
    "  PUBSMOKE_TOOL          external tool command line (default: uv)\n",
    "  PUBSMOKE_INDEX_URL     simple index base URL (default: https://test.pypi.org/simple/)\n",
    "  PUBSMOKE_PUBLISH_URL   upload endpoint without a query (default: https://test.pypi.org/legacy/)\n",
    "  PUBSMOKE_AUTH          force an auth mode: token, keyring, or anonymous\n",
    "  PUBSMOKE_KEEP_PROXIES  honor HTTP(S)_PROXY for the index query (default: only when set)\n",
    "  PUBSMOKE_ROOT          directory the project is scaffolded in (default: current dir)\n",
    "  PUBSMOKE_LOG           tracing filter (default: info)\n",
);

#[derive(Parser, Debug)]
#[command(
    name = "pubsmoke",
    version,
    about = "Scaffold, version, build, and upload a throwaway project to the test index.",
    after_help = PUBSMOKE_AFTER_HELP
)]
pub struct PubsmokeCli {
    /// Project to publish; an existing directory with this name is deleted first
    pub project: ProjectName,
}
