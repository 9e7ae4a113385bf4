//! Common test helper functions shared across test modules.
//!
//! This module provides reusable fixtures for forge entities and remote
//! configuration, reducing code duplication across different test suites.
use chrono::{DateTime, TimeZone, Utc};
use secrecy::SecretString;

use crate::forge::{
    config::RemoteConfig,
    types::{Issue, Milestone, Release},
};

/// Creates a test RemoteConfig with sensible defaults.
///
/// # Example
/// ```ignore
/// let config = create_test_remote_config();
/// ```
pub fn create_test_remote_config() -> RemoteConfig {
    RemoteConfig {
        host: "github.com".to_string(),
        port: None,
        scheme: "https".to_string(),
        owner: "test".to_string(),
        repo: "repo".to_string(),
        path: "test/repo".to_string(),
        token: SecretString::from("test-token".to_string()),
        commit_link_base_url: "https://github.com/test/repo/commits"
            .to_string(),
        compare_link_base_url: "https://github.com/test/repo/compare"
            .to_string(),
        dry_run: false,
    }
}

/// Creates a test Milestone whose url follows the GitHub layout.
///
/// # Example
/// ```ignore
/// let milestone = create_test_milestone(3, "1.0.0");
/// ```
pub fn create_test_milestone(number: u64, title: &str) -> Milestone {
    Milestone::new(
        number,
        title,
        format!("Description of {title}"),
        format!("https://github.com/test/repo/milestone/{number}"),
    )
}

/// Creates a closed test Issue carrying the given labels.
///
/// # Arguments
/// * `number` - Issue number
/// * `labels` - Label names attached to the issue
pub fn create_test_issue(number: u64, labels: &[&str]) -> Issue {
    Issue {
        number,
        title: format!("Issue {number}"),
        labels: labels.iter().map(|l| l.to_string()).collect(),
        is_pull_request: false,
        url: format!("https://github.com/test/repo/issues/{number}"),
    }
}

/// Creates a test Release created at the given unix timestamp.
pub fn create_test_release(tag: &str, timestamp: i64) -> Release {
    Release {
        tag_name: tag.to_string(),
        name: tag.to_string(),
        body: format!("Notes for {tag}"),
        draft: false,
        prerelease: false,
        created_at: timestamp_to_utc(timestamp),
        url: format!("https://github.com/test/repo/releases/tag/{tag}"),
    }
}

/// Converts seconds since the epoch into a UTC timestamp.
pub fn timestamp_to_utc(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_remote_config() {
        let config = create_test_remote_config();
        assert_eq!(config.host, "github.com");
        assert_eq!(config.owner, "test");
        assert_eq!(config.repo, "repo");
    }

    #[test]
    fn test_create_test_milestone_parses_version() {
        let milestone = create_test_milestone(1, "1.2.0");
        assert_eq!(milestone.version.to_string(), "1.2.0");
    }

    #[test]
    fn test_create_test_issue() {
        let issue = create_test_issue(42, &["bug"]);
        assert_eq!(issue.number, 42);
        assert_eq!(issue.labels, vec!["bug"]);
        assert!(!issue.is_pull_request);
    }
}
