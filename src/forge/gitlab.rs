//! Implements the Forge trait for Gitlab
use async_trait::async_trait;
use log::*;
use reqwest::{
    Client, RequestBuilder, Url,
    header::{HeaderMap, HeaderValue},
};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::{
    Result,
    error::NotesError,
    forge::{
        config::{DEFAULT_PAGE_SIZE, RemoteConfig},
        gitlab::types::{
            CreateLabel, GitlabCompare, GitlabIssue, GitlabIssueLink,
            GitlabLabel, GitlabMilestone, GitlabNote, GitlabRelease,
        },
        pagination::Paginator,
        traits::Forge,
        types::{
            Comment, Issue, ItemState, Label, Milestone, Release,
            TimelineEvent,
        },
    },
    notes::milestone::resolve_target,
};

mod types;

/// GitLab forge implementation using reqwest against the v4 REST API for
/// GitLab.com and self-hosted instances.
pub struct Gitlab {
    config: RemoteConfig,
    base_url: Url,
    client: Client,
    paginator: Paginator,
}

impl Gitlab {
    /// Create GitLab client with private token authentication scoped to a
    /// single project.
    pub fn new(
        config: RemoteConfig,
        cancel: CancellationToken,
    ) -> Result<Self> {
        let token = config.token.expose_secret();

        let mut headers = HeaderMap::new();
        headers.append("PRIVATE-TOKEN", HeaderValue::from_str(token)?);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let project: String =
            url::form_urlencoded::byte_serialize(config.path.as_bytes())
                .collect();

        let mut base_url = format!(
            "{}://{}/api/v4/projects/{}/",
            config.scheme, config.host, project
        );

        if let Some(port) = config.port {
            base_url = format!(
                "{}://{}:{}/api/v4/projects/{}/",
                config.scheme, config.host, port, project
            );
        }

        let base_url = Url::parse(&base_url)?;

        debug!("using gitlab api at {base_url}");

        Ok(Self {
            config,
            base_url,
            client,
            paginator: Paginator::new(cancel),
        })
    }

    /// Project-relative endpoint, each segment is percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| NotesError::api("gitlab base url cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T> {
        let request = request.build()?;
        let response = self.client.execute(request).await?;
        let result = response.error_for_status()?;
        let value: T = result.json().await?;
        Ok(value)
    }

    async fn send(&self, request: RequestBuilder) -> Result<()> {
        let request = request.build()?;
        let response = self.client.execute(request).await?;
        response.error_for_status()?;
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        self.paginator
            .guard(self.send_json(self.client.get(url)))
            .await
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        mut url: Url,
        page: u32,
    ) -> Result<Vec<T>> {
        url.query_pairs_mut()
            .append_pair("per_page", &DEFAULT_PAGE_SIZE.to_string())
            .append_pair("page", &page.to_string());

        self.send_json(self.client.get(url)).await
    }

    async fn collect_pages<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<Vec<T>> {
        self.paginator
            .collect(|page| self.get_page(url.clone(), page))
            .await
    }

    async fn list_merge_requests(
        &self,
        milestone: &Milestone,
        state: ItemState,
    ) -> Result<Vec<Issue>> {
        let mut url = self.endpoint(&["merge_requests"])?;
        url.query_pairs_mut().append_pair("milestone", &milestone.title);

        match state {
            ItemState::Open => {
                url.query_pairs_mut().append_pair("state", "opened");
            }
            ItemState::Closed => {
                url.query_pairs_mut().append_pair("state", "merged");
            }
            ItemState::All => {}
        }

        let merge_requests: Vec<GitlabIssue> = self.collect_pages(url).await?;

        Ok(merge_requests
            .into_iter()
            .map(|mr| mr.into_issue(true))
            .collect())
    }

    async fn merge_request_exists(&self, number: u64) -> Result<bool> {
        let url = self.endpoint(&["merge_requests", &number.to_string()])?;

        match self.get_json::<GitlabIssue>(url).await {
            Ok(_) => Ok(true),
            Err(NotesError::NotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl Forge for Gitlab {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    async fn list_milestones(
        &self,
        state: ItemState,
    ) -> Result<Vec<Milestone>> {
        let mut url = self.endpoint(&["milestones"])?;

        match state {
            ItemState::Open => {
                url.query_pairs_mut().append_pair("state", "active");
            }
            ItemState::Closed => {
                url.query_pairs_mut().append_pair("state", "closed");
            }
            ItemState::All => {}
        }

        let milestones: Vec<GitlabMilestone> = self.collect_pages(url).await?;

        Ok(milestones.into_iter().map(Milestone::from).collect())
    }

    async fn get_milestone(
        &self,
        title: &str,
        state: ItemState,
    ) -> Result<Milestone> {
        let milestones = self.list_milestones(state).await?;
        resolve_target(&milestones, title).cloned()
    }

    async fn list_issues(
        &self,
        milestone: &Milestone,
        state: ItemState,
    ) -> Result<Vec<Issue>> {
        let mut url = self.endpoint(&["issues"])?;
        url.query_pairs_mut().append_pair("milestone", &milestone.title);

        match state {
            ItemState::Open => {
                url.query_pairs_mut().append_pair("state", "opened");
            }
            ItemState::Closed => {
                url.query_pairs_mut().append_pair("state", "closed");
            }
            ItemState::All => {}
        }

        let issues: Vec<GitlabIssue> = self.collect_pages(url).await?;

        let mut issues = issues
            .into_iter()
            .map(|i| i.into_issue(false))
            .collect::<Vec<Issue>>();

        issues.extend(self.list_merge_requests(milestone, state).await?);

        debug!(
            "found {} issues and merge requests for milestone {}",
            issues.len(),
            milestone.title
        );

        Ok(issues)
    }

    async fn get_issue(&self, number: u64) -> Result<Issue> {
        let url = self.endpoint(&["issues", &number.to_string()])?;

        match self.get_json::<GitlabIssue>(url).await {
            Ok(issue) => Ok(issue.into_issue(false)),
            Err(NotesError::NotFound(_)) => {
                Err(NotesError::not_found(format!("issue #{number}")))
            }
            Err(err) => Err(err),
        }
    }

    async fn list_issue_comments(
        &self,
        issue: &Issue,
    ) -> Result<Vec<Comment>> {
        let kind = if issue.is_pull_request {
            "merge_requests"
        } else {
            "issues"
        };

        let url =
            self.endpoint(&[kind, &issue.number.to_string(), "notes"])?;

        let notes: Vec<GitlabNote> = self.collect_pages(url).await?;

        Ok(notes
            .into_iter()
            .filter(|n| !n.system)
            .map(Comment::from)
            .collect())
    }

    async fn list_labels(&self) -> Result<Vec<Label>> {
        let url = self.endpoint(&["labels"])?;
        let labels: Vec<GitlabLabel> = self.collect_pages(url).await?;
        Ok(labels.into_iter().map(Label::from).collect())
    }

    async fn create_label(&self, label: &Label) -> Result<Label> {
        if self.config.dry_run {
            warn!("dry_run: would create label: {:#?}", label);
            return Ok(label.clone());
        }

        let url = self.endpoint(&["labels"])?;

        let request = self.client.post(url).json(&CreateLabel {
            name: label.name.clone(),
            color: format!("#{}", label.color),
            description: label.description.clone().unwrap_or_default(),
        });

        let created: GitlabLabel =
            self.paginator.guard(self.send_json(request)).await?;

        info!("created label {}", created.name);

        Ok(created.into())
    }

    async fn delete_label(&self, name: &str) -> Result<()> {
        if self.config.dry_run {
            warn!("dry_run: would delete label: {name}");
            return Ok(());
        }

        let url = self.endpoint(&["labels", name])?;

        self.paginator.guard(self.send(self.client.delete(url))).await?;

        info!("deleted label {name}");

        Ok(())
    }

    async fn list_releases(
        &self,
        skip_prereleases: bool,
    ) -> Result<Vec<Release>> {
        let url = self.endpoint(&["releases"])?;
        let releases: Vec<GitlabRelease> = self.collect_pages(url).await?;

        let mut releases = releases
            .into_iter()
            .map(Release::from)
            .filter(|r| !(skip_prereleases && r.prerelease))
            .collect::<Vec<Release>>();

        releases.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(releases)
    }

    async fn count_commits_between(
        &self,
        base: &str,
        head: &str,
    ) -> Result<u64> {
        let mut url = self.endpoint(&["repository", "compare"])?;
        url.query_pairs_mut()
            .append_pair("from", base)
            .append_pair("to", head);

        match self.get_json::<GitlabCompare>(url).await {
            Ok(compare) => Ok(compare.commits.len() as u64),
            Err(NotesError::NotFound(_)) => {
                info!("ref {base} does not exist: counting 0 commits");
                Ok(0)
            }
            Err(err) => Err(err),
        }
    }

    /// GitLab records no connect/disconnect history, so every current issue
    /// link is reported as a connect event at the time it was created.
    async fn get_timeline(&self, number: u64) -> Result<Vec<TimelineEvent>> {
        let url = self.endpoint(&["issues", &number.to_string(), "links"])?;

        match self.get_json::<Vec<GitlabIssueLink>>(url).await {
            Ok(links) => Ok(links
                .into_iter()
                .map(|link| {
                    TimelineEvent::connected(
                        link.link_created_at.unwrap_or(link.created_at),
                        link.iid,
                    )
                })
                .collect()),
            Err(NotesError::NotFound(_)) => {
                if self.merge_request_exists(number).await? {
                    debug!("merge request !{number} has no issue links");
                    return Ok(vec![]);
                }
                Err(NotesError::not_found(format!(
                    "issue or merge request #{number}"
                )))
            }
            Err(err) => Err(err),
        }
    }
}
