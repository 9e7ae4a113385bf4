//! Markdown model of a milestone's release notes.
use crate::notes::labels::IssueGroup;

/// One block of the rendered notes.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Summary(String),
    Description(String),
    Issues(IssueGroup),
    Footer { heading: String, content: String },
}

impl Section {
    fn to_markdown(&self) -> String {
        match self {
            Section::Summary(text) | Section::Description(text) => {
                text.clone()
            }
            Section::Issues(group) => {
                let bullets = group
                    .issues
                    .iter()
                    .map(|i| {
                        format!("- [__#{}__]({}) {}", i.number, i.url, i.title)
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("__{}__\n\n{bullets}", group.heading)
            }
            Section::Footer { heading, content } => {
                format!("### {heading}\n\n{content}")
            }
        }
    }
}

/// Ordered sections rendered as a single markdown string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseNotesDocument {
    pub sections: Vec<Section>,
}

impl ReleaseNotesDocument {
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Sections separated by blank lines. Empty text sections are skipped.
    pub fn to_markdown(&self) -> String {
        let mut out = self
            .sections
            .iter()
            .map(|s| s.to_markdown())
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        out.push('\n');
        out
    }
}

fn plural(count: u64, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Opening sentence counting commits and closed issues. Empty when there
/// is nothing to count.
pub fn summary(
    issues: u64,
    issues_link: &str,
    commits: u64,
    commits_link: &str,
) -> String {
    let issues_text = format!("[{}]({issues_link})", plural(issues, "issue"));
    let commits_text =
        format!("[{}]({commits_link})", plural(commits, "commit"));

    match (issues > 0, commits > 0) {
        (true, true) => format!(
            "As part of this release we had {commits_text} which resulted in {issues_text} being closed."
        ),
        (true, false) => {
            format!("As part of this release we had {issues_text} closed.")
        }
        (false, true) => {
            format!("As part of this release we had {commits_text}.")
        }
        (false, false) => String::new(),
    }
}
