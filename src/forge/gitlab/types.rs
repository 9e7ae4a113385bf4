use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forge::types::{Comment, Issue, Label, Milestone, Release};

#[derive(Debug, Deserialize)]
pub struct GitlabMilestone {
    pub iid: u64,
    pub title: String,
    pub description: Option<String>,
    pub web_url: String,
}

impl From<GitlabMilestone> for Milestone {
    fn from(m: GitlabMilestone) -> Self {
        Milestone::new(
            m.iid,
            m.title,
            m.description.unwrap_or_default(),
            m.web_url,
        )
    }
}

/// Issues and merge requests share this shape for our purposes.
#[derive(Debug, Deserialize)]
pub struct GitlabIssue {
    pub iid: u64,
    pub title: String,
    #[serde(default)]
    pub labels: Vec<String>,
    pub web_url: String,
}

impl GitlabIssue {
    pub fn into_issue(self, is_pull_request: bool) -> Issue {
        Issue {
            number: self.iid,
            title: self.title,
            labels: self.labels,
            is_pull_request,
            url: self.web_url,
        }
    }
}

/// Entry of the issue-links listing: the linked issue plus link metadata.
#[derive(Debug, Deserialize)]
pub struct GitlabIssueLink {
    pub iid: u64,
    pub created_at: DateTime<Utc>,
    pub link_created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct GitlabUser {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct GitlabNote {
    pub id: u64,
    pub body: String,
    pub author: GitlabUser,
    #[serde(default)]
    pub system: bool,
}

impl From<GitlabNote> for Comment {
    fn from(n: GitlabNote) -> Self {
        Comment {
            id: n.id,
            author: n.author.username,
            body: n.body,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GitlabLabel {
    pub name: String,
    pub color: String,
    pub description: Option<String>,
}

impl From<GitlabLabel> for Label {
    fn from(l: GitlabLabel) -> Self {
        Label {
            name: l.name,
            color: l.color.trim_start_matches('#').to_string(),
            description: l.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateLabel {
    pub name: String,
    pub color: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct GitlabReleaseLinks {
    #[serde(rename = "self")]
    pub self_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GitlabRelease {
    pub tag_name: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub upcoming_release: bool,
    #[serde(rename = "_links")]
    pub links: Option<GitlabReleaseLinks>,
}

impl From<GitlabRelease> for Release {
    fn from(r: GitlabRelease) -> Self {
        Release {
            name: r.name.unwrap_or_else(|| r.tag_name.clone()),
            tag_name: r.tag_name,
            body: r.description.unwrap_or_default(),
            draft: false,
            prerelease: r.upcoming_release,
            created_at: r.created_at,
            url: r.links.and_then(|l| l.self_link).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GitlabCompare {
    #[serde(default)]
    pub commits: Vec<serde_json::Value>,
}
