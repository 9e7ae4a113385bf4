//! Error types for milestone-notes operations.

use thiserror::Error;

/// Main error type for release-note builds and forge operations.
#[derive(Error, Debug)]
pub enum NotesError {
    // Cli args errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Forge errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Access denied by forge: {0}")]
    Forbidden(String),

    #[error("Forge API error: {0}")]
    Api(String),

    #[error("Operation cancelled")]
    Cancelled,

    // Release note errors
    #[error(
        "Issue {issue_url} matched {found} configured labels but exactly one is required: configured labels are [{labels}]"
    )]
    Validation {
        issue_url: String,
        found: usize,
        labels: String,
    },

    #[error(
        "Nothing to release for milestone '{0}': no closed issues carry a configured label"
    )]
    EmptyRelease(String),

    // Parsing errors - automatic conversions via #[from]
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Regular expression error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Git URL parse error: {0}")]
    GitUrlError(#[from] git_url_parse::GitUrlParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using NotesError
pub type Result<T> = std::result::Result<T, NotesError>;

impl NotesError {
    /// Create a not-found error with context
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a generic forge api error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an error for an issue whose labels do not resolve to exactly
    /// one include/exclude classification.
    pub fn validation(
        issue_url: impl Into<String>,
        found: usize,
        labels: &[String],
    ) -> Self {
        Self::Validation {
            issue_url: issue_url.into(),
            found,
            labels: labels.join(", "),
        }
    }

    /// Classify an HTTP status code returned by a forge into the error
    /// taxonomy.
    pub fn from_status(status: u16, msg: impl Into<String>) -> Self {
        match status {
            401 | 403 => Self::Forbidden(msg.into()),
            404 => Self::NotFound(msg.into()),
            _ => Self::Api(msg.into()),
        }
    }
}

impl From<std::io::Error> for NotesError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

impl From<reqwest::Error> for NotesError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::from_status(status.as_u16(), err.to_string()),
            None => Self::Api(err.to_string()),
        }
    }
}

impl From<reqwest::header::InvalidHeaderValue> for NotesError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::Forbidden(format!("Invalid header value: {}", err))
    }
}

impl From<octocrab::Error> for NotesError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => Self::from_status(
                source.status_code.as_u16(),
                format!("GitHub API error: {}", source.message),
            ),
            _ => Self::Api(format!("GitHub API error: {}", err)),
        }
    }
}
