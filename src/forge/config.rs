//! Configuration for Git forge platform connections.
use derive_builder::Builder;
use git_url_parse::GitUrl;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use secrecy::SecretString;

/// Page size for every paginated forge query.
pub const DEFAULT_PAGE_SIZE: u8 = 100;
/// Default color for labels created without one, in hex format.
pub const DEFAULT_LABEL_COLOR: &str = "a47dab";

/// Characters left as-is when a git ref is placed in a url path. Slashes
/// stay literal so `release/1.0` style refs keep their shape.
const REF_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'.')
    .remove(b'-')
    .remove(b'_');

/// Percent-encode a git ref (tag, branch or milestone title) for use in a
/// url path.
pub fn encode_ref(git_ref: &str) -> String {
    utf8_percent_encode(git_ref, REF_ENCODE_SET).to_string()
}

/// Remote repository connection configuration for authenticating and
/// interacting with forge platforms.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct RemoteConfig {
    /// Remote forge host (e.g., "github.com").
    pub host: String,
    /// Remote forge port for self-hosted instances.
    #[builder(default)]
    pub port: Option<u16>,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Full repository path.
    pub path: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// Base URL for commit-history links, a tag name is appended.
    pub commit_link_base_url: String,
    /// Base URL for compare links, `<base>...<head>` is appended.
    pub compare_link_base_url: String,
    /// Log mutating operations instead of performing them.
    #[builder(default)]
    pub dry_run: bool,
}

impl RemoteConfig {
    pub fn builder() -> RemoteConfigBuilder {
        RemoteConfigBuilder::default()
    }

    /// Link to the commits between two refs, or the history of `head` when
    /// there is no base.
    pub fn commits_link(&self, base: Option<&str>, head: &str) -> String {
        let head = encode_ref(head);
        match base {
            Some(base) => format!(
                "{}/{}...{head}",
                self.compare_link_base_url,
                encode_ref(base)
            ),
            None => format!("{}/{head}", self.commit_link_base_url),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "".to_string(),
            port: None,
            scheme: "".to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            path: "".to_string(),
            token: SecretString::from("".to_string()),
            commit_link_base_url: "".to_string(),
            compare_link_base_url: "".to_string(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone)]
/// Supported Git forge platforms.
pub enum Remote {
    Github(RemoteConfig),
    Gitlab(RemoteConfig),
}

/// Web root of a parsed repository url, including any custom port.
pub fn web_root(parsed: &GitUrl, host: &str) -> String {
    match parsed.port {
        Some(port) => format!("{}://{}:{}", parsed.scheme, host, port),
        None => format!("{}://{}", parsed.scheme, host),
    }
}
