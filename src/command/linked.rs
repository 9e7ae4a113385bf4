//! Linked command implementation.
use crate::{
    Result,
    forge::traits::Forge,
    linked::{LinkStrategy, resolve_linked_issues},
};

/// Render one line per linked issue, optionally with its comment count.
pub async fn render(
    forge: &dyn Forge,
    number: u64,
    strategy: LinkStrategy,
    comments: bool,
) -> Result<String> {
    let issues = resolve_linked_issues(forge, number, strategy).await?;

    if issues.is_empty() {
        return Ok(format!("#{number} has no linked issues"));
    }

    let mut lines = vec![];

    for issue in issues.iter() {
        let kind = if issue.is_pull_request {
            "pull request"
        } else {
            "issue"
        };

        let mut line =
            format!("#{} {} ({kind}) {}", issue.number, issue.title, issue.url);

        if comments {
            let count = forge.list_issue_comments(issue).await?.len();
            line.push_str(&format!(" [{count} comments]"));
        }

        lines.push(line);
    }

    Ok(lines.join("\n"))
}

pub async fn execute(
    forge: &dyn Forge,
    number: u64,
    all_links: bool,
    comments: bool,
) -> Result<()> {
    let strategy = if all_links {
        LinkStrategy::ActiveSet
    } else {
        LinkStrategy::LatestPair
    };

    let output = render(forge, number, strategy, comments).await?;
    println!("{output}");

    Ok(())
}
