//! Normalized entities returned by every forge implementation.
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::version::MilestoneVersion;

/// State filter applied to milestone and issue listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemState {
    Open,
    Closed,
    #[default]
    All,
}

/// Milestone snapshot. Titles are unique within a repository.
#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    /// Provider-visible milestone number.
    pub number: u64,
    pub title: String,
    pub version: MilestoneVersion,
    pub description: String,
    /// Web url of the milestone.
    pub url: String,
}

impl Milestone {
    pub fn new(
        number: u64,
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            number,
            version: MilestoneVersion::parse(&title),
            title,
            description: description.into(),
            url: url.into(),
        }
    }
}

/// Issue or pull request snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Provider-visible issue or pull request number.
    pub number: u64,
    pub title: String,
    pub labels: Vec<String>,
    pub is_pull_request: bool,
    /// Canonical web url.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: u64,
    pub author: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    /// Hex color without a leading `#`.
    pub color: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub tag_name: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
    pub created_at: DateTime<Utc>,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineEventKind {
    Connected,
    Disconnected,
}

/// A connect or disconnect occurrence on an issue or pull request timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEvent {
    pub kind: TimelineEventKind,
    pub created_at: DateTime<Utc>,
    /// Number of the issue or pull request on the other end of the link.
    pub subject: Option<u64>,
}

impl TimelineEvent {
    pub fn connected(created_at: DateTime<Utc>, subject: u64) -> Self {
        Self {
            kind: TimelineEventKind::Connected,
            created_at,
            subject: Some(subject),
        }
    }

    pub fn disconnected(
        created_at: DateTime<Utc>,
        subject: Option<u64>,
    ) -> Self {
        Self {
            kind: TimelineEventKind::Disconnected,
            created_at,
            subject,
        }
    }
}
