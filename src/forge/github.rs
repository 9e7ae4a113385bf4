//! Implements the Forge trait for Github
use async_trait::async_trait;
use graphql_client::GraphQLQuery;
use log::*;
use octocrab::Octocrab;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::{
    Result,
    error::NotesError,
    forge::{
        config::{DEFAULT_PAGE_SIZE, RemoteConfig, encode_ref},
        github::{
            graphql::{
                GraphqlResponse, LinkedTimelineQuery, LinkedTimelineResponse,
                LinkedTimelineVars, classify_errors,
            },
            types::{
                GithubComment, GithubCompare, GithubIssue, GithubLabel,
                GithubMilestone, GithubRelease, ListParams, state_param,
            },
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

mod graphql;
mod types;

/// GitHub forge implementation using Octocrab for REST and GraphQL
/// interactions with milestones, issues, labels and releases.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
    paginator: Paginator,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration.
    pub fn new(
        config: RemoteConfig,
        cancel: CancellationToken,
    ) -> Result<Self> {
        let base_uri = api_base_uri(&config);

        debug!("using github api at {base_uri}");

        let instance = Octocrab::builder()
            .personal_token(config.token.expose_secret().to_string())
            .base_uri(base_uri)?
            .build()?;

        Ok(Self {
            config,
            instance,
            paginator: Paginator::new(cancel),
        })
    }

    fn repo_route(&self, suffix: &str) -> String {
        format!(
            "/repos/{}/{}/{}",
            self.config.owner, self.config.repo, suffix
        )
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        route: String,
        params: ListParams,
    ) -> Result<Vec<T>> {
        let items: Vec<T> = self.instance.get(route, Some(&params)).await?;
        Ok(items)
    }

    async fn collect_pages<T, F>(
        &self,
        route: String,
        params: F,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        F: Fn(u32) -> ListParams,
    {
        self.paginator
            .collect(|page| self.get_page(route.clone(), params(page)))
            .await
    }
}

/// Public GitHub uses the api subdomain, enterprise installs serve the API
/// under `/api/v3` on the web host.
fn api_base_uri(config: &RemoteConfig) -> String {
    let host = match config.port {
        Some(port) => format!("{}:{}", config.host, port),
        None => config.host.clone(),
    };

    if config.host == "github.com" {
        format!("{}://api.github.com", config.scheme)
    } else {
        format!("{}://{}/api/v3", config.scheme, host)
    }
}

#[async_trait]
impl Forge for Github {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    async fn list_milestones(
        &self,
        state: ItemState,
    ) -> Result<Vec<Milestone>> {
        let milestones: Vec<GithubMilestone> = self
            .collect_pages(self.repo_route("milestones"), |page| ListParams {
                state: Some(state_param(state)),
                ..ListParams::page(DEFAULT_PAGE_SIZE, page)
            })
            .await?;

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
        let number = milestone.number;

        let issues: Vec<GithubIssue> = self
            .collect_pages(self.repo_route("issues"), |page| ListParams {
                state: Some(state_param(state)),
                milestone: Some(number),
                ..ListParams::page(DEFAULT_PAGE_SIZE, page)
            })
            .await?;

        debug!(
            "found {} issues for milestone {}",
            issues.len(),
            milestone.title
        );

        Ok(issues.into_iter().map(Issue::from).collect())
    }

    async fn get_issue(&self, number: u64) -> Result<Issue> {
        let route = self.repo_route(&format!("issues/{number}"));

        let result = self
            .paginator
            .guard(async {
                let issue: std::result::Result<GithubIssue, _> =
                    self.instance.get(route, None::<&()>).await;
                issue.map_err(NotesError::from)
            })
            .await;

        match result {
            Ok(issue) => Ok(issue.into()),
            Err(NotesError::NotFound(_)) => Err(NotesError::not_found(
                format!("issue or pull request #{number}"),
            )),
            Err(err) => Err(err),
        }
    }

    async fn list_issue_comments(
        &self,
        issue: &Issue,
    ) -> Result<Vec<Comment>> {
        let comments: Vec<GithubComment> = self
            .collect_pages(
                self.repo_route(&format!("issues/{}/comments", issue.number)),
                |page| ListParams::page(DEFAULT_PAGE_SIZE, page),
            )
            .await?;

        Ok(comments.into_iter().map(Comment::from).collect())
    }

    async fn list_labels(&self) -> Result<Vec<Label>> {
        let labels: Vec<GithubLabel> = self
            .collect_pages(self.repo_route("labels"), |page| {
                ListParams::page(DEFAULT_PAGE_SIZE, page)
            })
            .await?;

        Ok(labels.into_iter().map(Label::from).collect())
    }

    async fn create_label(&self, label: &Label) -> Result<Label> {
        if self.config.dry_run {
            warn!("dry_run: would create label: {:#?}", label);
            return Ok(label.clone());
        }

        let created = self
            .paginator
            .guard(async {
                self.instance
                    .issues(&self.config.owner, &self.config.repo)
                    .create_label(
                        &label.name,
                        &label.color,
                        label.description.clone().unwrap_or_default(),
                    )
                    .await
                    .map_err(NotesError::from)
            })
            .await?;

        info!("created label {}", created.name);

        Ok(Label {
            name: created.name,
            color: created.color,
            description: created.description,
        })
    }

    async fn delete_label(&self, name: &str) -> Result<()> {
        if self.config.dry_run {
            warn!("dry_run: would delete label: {name}");
            return Ok(());
        }

        self.paginator
            .guard(async {
                self.instance
                    .issues(&self.config.owner, &self.config.repo)
                    .delete_label(name)
                    .await
                    .map_err(NotesError::from)
            })
            .await?;

        info!("deleted label {name}");

        Ok(())
    }

    async fn list_releases(
        &self,
        skip_prereleases: bool,
    ) -> Result<Vec<Release>> {
        let releases: Vec<GithubRelease> = self
            .collect_pages(self.repo_route("releases"), |page| {
                ListParams::page(DEFAULT_PAGE_SIZE, page)
            })
            .await?;

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
        let route = self.repo_route(&format!(
            "compare/{}...{}",
            encode_ref(base),
            encode_ref(head)
        ));

        let result = self
            .paginator
            .guard(async {
                let compare: std::result::Result<GithubCompare, _> =
                    self.instance.get(route, None::<&()>).await;
                compare.map_err(NotesError::from)
            })
            .await;

        match result {
            Ok(compare) => Ok(compare.total_commits),
            Err(NotesError::NotFound(_)) => {
                info!("ref {base} does not exist: counting 0 commits");
                Ok(0)
            }
            Err(err) => Err(err),
        }
    }

    async fn get_timeline(&self, number: u64) -> Result<Vec<TimelineEvent>> {
        let mut events = vec![];
        let mut cursor = None;

        loop {
            let body = LinkedTimelineQuery::build_query(LinkedTimelineVars {
                owner: self.config.owner.clone(),
                repo: self.config.repo.clone(),
                number: number as i64,
                first: i64::from(DEFAULT_PAGE_SIZE),
                cursor: cursor.clone(),
            });

            let response: GraphqlResponse<LinkedTimelineResponse> = self
                .paginator
                .guard(async {
                    self.instance.graphql(&body).await.map_err(NotesError::from)
                })
                .await?;

            let items = response.data.and_then(|data| data.into_items());

            let Some(items) = items else {
                return Err(classify_errors(
                    &response.errors,
                    &format!("issue or pull request #{number}"),
                ));
            };

            events.extend(
                items.nodes.into_iter().filter_map(|n| n.into_event()),
            );

            match items.page_info.end_cursor {
                Some(end) if items.page_info.has_next_page => {
                    cursor = Some(end)
                }
                _ => break,
            }
        }

        debug!("found {} timeline events for #{number}", events.len());

        Ok(events)
    }
}
