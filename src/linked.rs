//! Linked issue resolution from connect/disconnect timelines.
//!
//! Two strategies are available. [`LinkStrategy::LatestPair`] looks only at
//! the most recent connect and the most recent disconnect, and treats a
//! disconnect at or after the connect as severing the link.
//! [`LinkStrategy::ActiveSet`] replays the whole timeline and reports every
//! subject still connected at the end.
use log::*;
use std::collections::BTreeSet;

use crate::{
    Result,
    forge::{
        traits::Forge,
        types::{Issue, TimelineEvent, TimelineEventKind},
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkStrategy {
    /// Most recent connect/disconnect pair only.
    #[default]
    LatestPair,
    /// Every currently connected subject.
    ActiveSet,
}

/// Chronological order. At equal timestamps connects come first so a
/// disconnect recorded at the same instant always wins.
fn chronological(events: &[TimelineEvent]) -> Vec<&TimelineEvent> {
    let mut sorted = events.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|e| {
        let rank = match e.kind {
            TimelineEventKind::Connected => 0,
            TimelineEventKind::Disconnected => 1,
        };
        (e.created_at, rank)
    });
    sorted
}

/// Subject of the latest connect unless a disconnect happened at or after
/// it.
pub fn latest_pair(events: &[TimelineEvent]) -> Option<u64> {
    let mut connected = None;
    let mut disconnected = None;

    for event in chronological(events) {
        match event.kind {
            TimelineEventKind::Connected => connected = Some(event),
            TimelineEventKind::Disconnected => disconnected = Some(event),
        }
    }

    let connected = connected?;

    match disconnected {
        Some(d) if d.created_at >= connected.created_at => None,
        _ => connected.subject,
    }
}

/// Subjects whose last recorded event is a connect.
pub fn active_set(events: &[TimelineEvent]) -> BTreeSet<u64> {
    let mut linked = BTreeSet::new();

    for event in chronological(events) {
        match (event.kind, event.subject) {
            (TimelineEventKind::Connected, Some(subject)) => {
                linked.insert(subject);
            }
            (TimelineEventKind::Disconnected, Some(subject)) => {
                linked.remove(&subject);
            }
            (kind, None) => {
                debug!("ignoring {kind:?} event without a subject");
            }
        }
    }

    linked
}

/// Issues or pull requests currently linked to `number`, ordered by number.
pub async fn resolve_linked_issues(
    forge: &dyn Forge,
    number: u64,
    strategy: LinkStrategy,
) -> Result<Vec<Issue>> {
    let events = forge.get_timeline(number).await?;

    debug!("#{number} has {} timeline events", events.len());

    let subjects: BTreeSet<u64> = match strategy {
        LinkStrategy::LatestPair => latest_pair(&events).into_iter().collect(),
        LinkStrategy::ActiveSet => active_set(&events),
    };

    let mut issues = vec![];

    for subject in subjects {
        issues.push(forge.get_issue(subject).await?);
    }

    info!("#{number} is linked to {} issues", issues.len());

    Ok(issues)
}
