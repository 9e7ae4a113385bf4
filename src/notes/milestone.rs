//! Target and previous milestone resolution.
use log::*;

use crate::{Result, error::NotesError, forge::types::Milestone};

/// Find the milestone whose title matches `title` exactly.
pub fn resolve_target<'a>(
    milestones: &'a [Milestone],
    title: &str,
) -> Result<&'a Milestone> {
    milestones
        .iter()
        .find(|m| m.title == title)
        .ok_or_else(|| {
            NotesError::not_found(format!("milestone with title '{title}'"))
        })
}

/// The milestone immediately preceding `target` by version. Titles are not
/// chronological, so ordering comes from the parsed version only.
pub fn resolve_previous(
    milestones: &[Milestone],
    target: &Milestone,
) -> Option<Milestone> {
    let mut sorted = milestones.iter().collect::<Vec<_>>();
    // sort_by is stable, so equal versions keep their listing order
    sorted.sort_by(|a, b| b.version.cmp(&a.version));
    sorted.dedup_by(|next, kept| next.version == kept.version);

    let previous = sorted
        .into_iter()
        .find(|m| m.version < target.version)
        .cloned();

    match &previous {
        Some(p) => {
            debug!("previous milestone of {}: {}", target.title, p.title)
        }
        None => debug!("{} has no previous milestone", target.title),
    }

    previous
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_milestone;

    fn milestones(titles: &[&str]) -> Vec<Milestone> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| create_test_milestone(i as u64 + 1, t))
            .collect()
    }

    #[test]
    fn resolves_target_by_exact_title() {
        let list = milestones(&["1.0.0", "1.1.0"]);
        let target = resolve_target(&list, "1.1.0").unwrap();
        assert_eq!(target.number, 2);
    }

    #[test]
    fn target_lookup_is_case_sensitive() {
        let list = milestones(&["Release-A"]);
        let result = resolve_target(&list, "release-a");
        assert!(matches!(result, Err(NotesError::NotFound(_))));
    }

    #[test]
    fn previous_is_highest_lower_version_regardless_of_order() {
        let list = milestones(&["0.9.0", "1.1.0", "0.10.0", "1.0.0", "0.2.0"]);
        let target = resolve_target(&list, "1.0.0").unwrap();

        let previous = resolve_previous(&list, target).unwrap();

        assert_eq!(previous.title, "0.10.0");
    }

    #[test]
    fn previous_never_has_version_at_or_above_target() {
        let list = milestones(&["2.0.0", "1.0.0", "1.5.0", "v1.5", "3.0.0"]);

        for target in list.iter() {
            if let Some(previous) = resolve_previous(&list, target) {
                assert!(previous.version < target.version);
            }
        }
    }

    #[test]
    fn duplicate_versions_collapse_to_first_listed() {
        let list = milestones(&["1.0.0", "v0.9", "0.9.0", "0.9.0"]);
        let target = resolve_target(&list, "1.0.0").unwrap();

        let previous = resolve_previous(&list, target).unwrap();

        assert_eq!(previous.title, "v0.9");
        assert_eq!(previous.number, 2);
    }

    #[test]
    fn lowest_milestone_has_no_previous() {
        let list = milestones(&["1.0.0", "2.0.0"]);
        let target = resolve_target(&list, "1.0.0").unwrap();
        assert!(resolve_previous(&list, target).is_none());
    }

    #[test]
    fn unparsable_titles_sort_lowest() {
        let list = milestones(&["backlog", "1.0.0", "0.1.0"]);

        let target = resolve_target(&list, "0.1.0").unwrap();
        let previous = resolve_previous(&list, target).unwrap();
        assert_eq!(previous.title, "backlog");

        let backlog = resolve_target(&list, "backlog").unwrap();
        assert!(resolve_previous(&list, backlog).is_none());
    }
}
