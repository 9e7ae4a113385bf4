use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forge::types::{
    Comment, Issue, ItemState, Label, Milestone, Release,
};

#[derive(Debug, Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
    pub per_page: u8,
    pub page: u32,
}

impl ListParams {
    pub fn page(per_page: u8, page: u32) -> Self {
        Self {
            state: None,
            milestone: None,
            per_page,
            page,
        }
    }
}

pub fn state_param(state: ItemState) -> &'static str {
    match state {
        ItemState::Open => "open",
        ItemState::Closed => "closed",
        ItemState::All => "all",
    }
}

#[derive(Debug, Deserialize)]
pub struct GithubMilestone {
    pub number: u64,
    pub title: String,
    pub description: Option<String>,
    pub html_url: String,
}

impl From<GithubMilestone> for Milestone {
    fn from(m: GithubMilestone) -> Self {
        Milestone::new(
            m.number,
            m.title,
            m.description.unwrap_or_default(),
            m.html_url,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct GithubLabel {
    pub name: String,
    #[serde(default)]
    pub color: String,
    pub description: Option<String>,
}

impl From<GithubLabel> for Label {
    fn from(l: GithubLabel) -> Self {
        Label {
            name: l.name,
            color: l.color,
            description: l.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GithubIssue {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    #[serde(default)]
    pub labels: Vec<GithubLabel>,
    /// Present only when the issue is a pull request.
    pub pull_request: Option<serde_json::Value>,
}

impl From<GithubIssue> for Issue {
    fn from(i: GithubIssue) -> Self {
        Issue {
            number: i.number,
            title: i.title,
            labels: i.labels.into_iter().map(|l| l.name).collect(),
            is_pull_request: i.pull_request.is_some(),
            url: i.html_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GithubUser {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct GithubComment {
    pub id: u64,
    pub body: Option<String>,
    pub user: Option<GithubUser>,
}

impl From<GithubComment> for Comment {
    fn from(c: GithubComment) -> Self {
        Comment {
            id: c.id,
            author: c.user.map(|u| u.login).unwrap_or_default(),
            body: c.body.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GithubRelease {
    pub tag_name: String,
    pub name: Option<String>,
    pub body: Option<String>,
    pub draft: bool,
    pub prerelease: bool,
    pub created_at: DateTime<Utc>,
    pub html_url: String,
}

impl From<GithubRelease> for Release {
    fn from(r: GithubRelease) -> Self {
        Release {
            name: r.name.unwrap_or_else(|| r.tag_name.clone()),
            tag_name: r.tag_name,
            body: r.body.unwrap_or_default(),
            draft: r.draft,
            prerelease: r.prerelease,
            created_at: r.created_at,
            url: r.html_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GithubCompare {
    pub total_commits: u64,
}
