//! Label-based issue classification.
//!
//! Every closed issue of a milestone must carry exactly one configured label,
//! either an include label (the issue appears under that label's section)
//! or an exclude label (the issue is left out). Anything else aborts the
//! build.
use log::*;

use crate::{
    Result,
    config::Config,
    error::NotesError,
    forge::types::Issue,
};

/// Issues sharing one include label, titled for output.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueGroup {
    pub heading: String,
    pub issues: Vec<Issue>,
}

/// Outcome of classifying a milestone's issues.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// Non-empty groups in configured include-label order.
    pub groups: Vec<IssueGroup>,
}

impl Classification {
    /// Number of issues retained across every group.
    pub fn issue_count(&self) -> usize {
        self.groups.iter().map(|g| g.issues.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.issue_count() == 0
    }
}

fn matches_any(label: &str, configured: &[String]) -> bool {
    configured.iter().any(|c| c.eq_ignore_ascii_case(label))
}

/// Validate and group `issues` according to the configured labels.
pub fn classify(issues: &[Issue], config: &Config) -> Result<Classification> {
    let include = &config.issue_labels_include;
    let exclude = &config.issue_labels_exclude;

    let mut buckets: Vec<Vec<Issue>> = vec![vec![]; include.len()];

    for issue in issues {
        let included = issue
            .labels
            .iter()
            .filter(|l| matches_any(l, include))
            .count();
        let excluded = issue
            .labels
            .iter()
            .filter(|l| matches_any(l, exclude))
            .count();

        if included + excluded != 1 {
            return Err(NotesError::validation(
                &issue.url,
                included + excluded,
                &config.classified_labels(),
            ));
        }

        if excluded == 1 {
            debug!("skipping excluded issue #{}", issue.number);
            continue;
        }

        let position = include.iter().position(|name| {
            issue.labels.iter().any(|l| name.eq_ignore_ascii_case(l))
        });

        if let Some(position) = position {
            buckets[position].push(issue.clone());
        }
    }

    let aliases = config.alias_map();

    let groups = include
        .iter()
        .zip(buckets)
        .filter(|(_, issues)| !issues.is_empty())
        .map(|(label, issues)| {
            let alias = aliases.get(&label.to_lowercase());
            let heading = match (alias, issues.len()) {
                (Some(alias), 1) => alias.header.clone(),
                (Some(alias), _) => alias.plural.clone(),
                (None, 1) => label.clone(),
                (None, _) => format!("{label}s"),
            };
            IssueGroup { heading, issues }
        })
        .collect();

    Ok(Classification { groups })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::LabelAlias, test_helpers::create_test_issue};

    fn config() -> Config {
        Config {
            issue_labels_include: vec!["bug".into(), "enhancement".into()],
            issue_labels_exclude: vec!["internal".into()],
            issue_labels_alias: vec![LabelAlias {
                name: "Bug".into(),
                header: "Bug Fix".into(),
                plural: "Bug Fixes".into(),
            }],
            ..Config::default()
        }
    }

    #[test]
    fn groups_in_configured_order_preserving_issue_order() {
        let issues = vec![
            create_test_issue(3, &["enhancement"]),
            create_test_issue(1, &["bug"]),
            create_test_issue(2, &["BUG"]),
        ];

        let result = classify(&issues, &config()).unwrap();

        assert_eq!(result.groups.len(), 2);
        assert_eq!(result.groups[0].heading, "Bug Fixes");
        let numbers = result.groups[0]
            .issues
            .iter()
            .map(|i| i.number)
            .collect::<Vec<_>>();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(result.groups[1].heading, "enhancement");
        assert_eq!(result.issue_count(), 3);
    }

    #[test]
    fn uses_singular_alias_and_plural_fallback() {
        let issues = vec![
            create_test_issue(1, &["bug"]),
            create_test_issue(2, &["enhancement"]),
            create_test_issue(3, &["enhancement"]),
        ];

        let result = classify(&issues, &config()).unwrap();

        assert_eq!(result.groups[0].heading, "Bug Fix");
        assert_eq!(result.groups[1].heading, "enhancements");
    }

    #[test]
    fn excluded_issues_are_not_retained() {
        let issues = vec![
            create_test_issue(1, &["internal", "question"]),
            create_test_issue(2, &["bug"]),
        ];

        let result = classify(&issues, &config()).unwrap();

        assert_eq!(result.issue_count(), 1);
    }

    #[test]
    fn unlabeled_issue_fails_validation() {
        let issues = vec![create_test_issue(7, &["question"])];

        let err = classify(&issues, &config()).unwrap_err();

        match err {
            NotesError::Validation {
                issue_url,
                found,
                labels,
            } => {
                assert_eq!(issue_url, "https://github.com/test/repo/issues/7");
                assert_eq!(found, 0);
                assert_eq!(labels, "bug, enhancement, internal");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn doubly_labeled_issue_fails_validation() {
        let issues = vec![
            create_test_issue(1, &["bug"]),
            create_test_issue(2, &["bug", "internal"]),
        ];

        let result = classify(&issues, &config());

        assert!(matches!(
            result,
            Err(NotesError::Validation { found: 2, .. })
        ));
    }

    #[test]
    fn empty_input_yields_empty_classification() {
        let result = classify(&[], &config()).unwrap();
        assert!(result.is_empty());
    }
}
