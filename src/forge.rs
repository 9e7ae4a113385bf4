//! Unified interface for the Git forges release notes are built from
//! (GitHub and GitLab).
//!
//! Provides token-based authentication, paginated listing of milestones,
//! issues, comments, labels and releases, and the connect/disconnect
//! timelines used to resolve linked issues.

/// Configuration and authentication for forge platforms.
pub mod config;

/// Builds a boxed forge from a remote configuration.
pub mod factory;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// GitLab API client implementation for GitLab.com and self-hosted instances.
pub mod gitlab;

/// Page-until-short aggregation with cancellation.
pub mod pagination;

/// Common traits for forge platform abstraction.
pub mod traits;

/// Shared data types for milestones, issues, labels and releases.
pub mod types;
