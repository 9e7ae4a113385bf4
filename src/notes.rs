//! Release notes assembly.
//!
//! Resolves the target milestone and its predecessor, classifies the
//! milestone's closed issues by label and composes a markdown document
//! from the result. The whole document is built in memory and returned
//! only when every step succeeds.
use log::*;

use crate::{
    Result,
    config::Config,
    error::NotesError,
    forge::{traits::Forge, types::ItemState},
    notes::{
        document::{ReleaseNotesDocument, Section, summary},
        labels::classify,
        milestone::{resolve_previous, resolve_target},
    },
};

/// Markdown document model and summary wording.
pub mod document;

/// Include/exclude label validation and grouping.
pub mod labels;

/// Target and previous milestone lookup.
pub mod milestone;

/// Build release notes for the milestone titled `milestone_title`.
pub async fn build_release_notes(
    forge: &dyn Forge,
    milestone_title: &str,
    config: &Config,
) -> Result<String> {
    let milestones = forge.list_milestones(ItemState::All).await?;
    let target = resolve_target(&milestones, milestone_title)?;

    info!("building release notes for milestone {}", target.title);

    let issues = forge.list_issues(target, ItemState::Closed).await?;
    debug!("milestone {} has {} closed issues", target.title, issues.len());

    let classification = classify(&issues, config)?;

    let remote = forge.remote_config();
    let previous = resolve_previous(&milestones, target);

    let (commits, commits_link) = match &previous {
        Some(previous) => {
            let count = forge
                .count_commits_between(&previous.title, &target.title)
                .await?;
            let link = remote
                .commits_link(Some(previous.title.as_str()), &target.title);
            (count, link)
        }
        None => (0, remote.commits_link(None, &target.title)),
    };

    if classification.is_empty() {
        return Err(NotesError::EmptyRelease(target.title.clone()));
    }

    let issues_link = format!("{}?closed=1", target.url);

    let mut document = ReleaseNotesDocument::default();

    document.push(Section::Summary(summary(
        classification.issue_count() as u64,
        &issues_link,
        commits,
        &commits_link,
    )));
    document.push(Section::Description(target.description.clone()));

    for group in classification.groups {
        document.push(Section::Issues(group));
    }

    let create = &config.create;
    if create.include_footer {
        let content = if create.milestone_replace_text.is_empty() {
            create.footer_content.clone()
        } else {
            create
                .footer_content
                .replace(&create.milestone_replace_text, &target.title)
        };

        document.push(Section::Footer {
            heading: create.footer_heading.clone(),
            content,
        });
    }

    Ok(document.to_markdown())
}
