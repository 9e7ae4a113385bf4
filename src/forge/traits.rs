//! Traits related to remote git forges
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    forge::{
        config::RemoteConfig,
        types::{
            Comment, Issue, ItemState, Label, Milestone, Release,
            TimelineEvent,
        },
    },
};

/// Capability set every forge backend provides to the release-note core.
/// Implementations are bound to a single repository through their
/// [`RemoteConfig`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    fn remote_config(&self) -> RemoteConfig;

    async fn list_milestones(&self, state: ItemState)
    -> Result<Vec<Milestone>>;

    /// Exact, case-sensitive title lookup. Fails with `NotFound`.
    async fn get_milestone(
        &self,
        title: &str,
        state: ItemState,
    ) -> Result<Milestone>;

    async fn list_issues(
        &self,
        milestone: &Milestone,
        state: ItemState,
    ) -> Result<Vec<Issue>>;

    async fn get_issue(&self, number: u64) -> Result<Issue>;

    async fn list_issue_comments(&self, issue: &Issue) -> Result<Vec<Comment>>;

    async fn list_labels(&self) -> Result<Vec<Label>>;

    async fn create_label(&self, label: &Label) -> Result<Label>;

    async fn delete_label(&self, name: &str) -> Result<()>;

    /// Releases ordered by creation time, newest first.
    async fn list_releases(&self, skip_prereleases: bool)
    -> Result<Vec<Release>>;

    /// Number of commits reachable from `head` but not `base`. A missing
    /// `base` ref yields 0.
    async fn count_commits_between(&self, base: &str, head: &str)
    -> Result<u64>;

    /// Connect/disconnect events recorded against the issue or pull request
    /// with the given number. Fails with `NotFound` when neither exists.
    async fn get_timeline(&self, number: u64) -> Result<Vec<TimelineEvent>>;
}
