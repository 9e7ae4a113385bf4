use chrono::{DateTime, Utc};
use graphql_client::{GraphQLQuery, QueryBody};
use serde::{Deserialize, Serialize};

use crate::{
    error::NotesError,
    forge::types::{TimelineEvent, TimelineEventKind},
};

/// Connect/disconnect events for a number that may be either an issue or a
/// pull request. Both fields are requested and whichever resolves is used.
pub const LINKED_TIMELINE_QUERY: &str = r#"
query LinkedTimeline($owner: String!, $repo: String!, $number: Int!, $first: Int!, $cursor: String) {
  repository(owner: $owner, name: $repo) {
    issue(number: $number) {
      timelineItems(first: $first, after: $cursor, itemTypes: [CONNECTED_EVENT, DISCONNECTED_EVENT]) {
        pageInfo {
          hasNextPage
          endCursor
        }
        nodes {
          __typename
          ... on ConnectedEvent {
            createdAt
            subject {
              ... on Issue { number }
              ... on PullRequest { number }
            }
          }
          ... on DisconnectedEvent {
            createdAt
            subject {
              ... on Issue { number }
              ... on PullRequest { number }
            }
          }
        }
      }
    }
    pullRequest(number: $number) {
      timelineItems(first: $first, after: $cursor, itemTypes: [CONNECTED_EVENT, DISCONNECTED_EVENT]) {
        pageInfo {
          hasNextPage
          endCursor
        }
        nodes {
          __typename
          ... on ConnectedEvent {
            createdAt
            subject {
              ... on Issue { number }
              ... on PullRequest { number }
            }
          }
          ... on DisconnectedEvent {
            createdAt
            subject {
              ... on Issue { number }
              ... on PullRequest { number }
            }
          }
        }
      }
    }
  }
}"#;

#[derive(Debug, Serialize)]
pub struct LinkedTimelineVars {
    pub owner: String,
    pub repo: String,
    pub number: i64,
    pub first: i64,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
pub struct TimelineSubject {
    pub number: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct TimelineNode {
    #[serde(rename = "__typename")]
    pub typename: String,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    pub subject: Option<TimelineSubject>,
}

impl TimelineNode {
    pub fn into_event(self) -> Option<TimelineEvent> {
        let kind = match self.typename.as_str() {
            "ConnectedEvent" => TimelineEventKind::Connected,
            "DisconnectedEvent" => TimelineEventKind::Disconnected,
            _ => return None,
        };

        Some(TimelineEvent {
            kind,
            created_at: self.created_at?,
            subject: self.subject.and_then(|s| s.number),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TimelineItems {
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
    pub nodes: Vec<TimelineNode>,
}

#[derive(Debug, Deserialize)]
pub struct TimelineOwner {
    #[serde(rename = "timelineItems")]
    pub timeline_items: TimelineItems,
}

#[derive(Debug, Deserialize)]
pub struct TimelineRepository {
    pub issue: Option<TimelineOwner>,
    #[serde(rename = "pullRequest")]
    pub pull_request: Option<TimelineOwner>,
}

#[derive(Debug, Deserialize)]
pub struct LinkedTimelineResponse {
    pub repository: Option<TimelineRepository>,
}

impl LinkedTimelineResponse {
    /// Whichever of the issue or pull request resolved for the number.
    pub fn into_items(self) -> Option<TimelineItems> {
        let repository = self.repository?;
        repository
            .issue
            .or(repository.pull_request)
            .map(|owner| owner.timeline_items)
    }
}

/// Error entry of a GitHub GraphQL response. GitHub reports its error
/// class in a top-level `type` field (`NOT_FOUND`, `FORBIDDEN`,
/// `RATE_LIMITED`, ...).
#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: String,
}

/// GraphQL response envelope. Failures such as rate limiting arrive with
/// HTTP 200, so `errors` must be inspected whenever `data` is unusable.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

/// Classify the errors of a response that produced no usable data.
/// Only `NOT_FOUND` errors, or none at all, mean the object is missing.
pub fn classify_errors(
    errors: &[GraphqlError],
    missing: &str,
) -> NotesError {
    let messages = || {
        errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    };

    let is_kind =
        |e: &GraphqlError, kind: &str| e.kind.as_deref() == Some(kind);

    if errors.iter().any(|e| is_kind(e, "FORBIDDEN")) {
        return NotesError::Forbidden(messages());
    }

    if errors.iter().any(|e| !is_kind(e, "NOT_FOUND")) {
        return NotesError::api(format!(
            "GitHub GraphQL error: {}",
            messages()
        ));
    }

    NotesError::not_found(missing)
}

pub struct LinkedTimelineQuery;

impl GraphQLQuery for LinkedTimelineQuery {
    type ResponseData = LinkedTimelineResponse;
    type Variables = LinkedTimelineVars;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: LINKED_TIMELINE_QUERY,
            operation_name: "LinkedTimeline",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(kind: Option<&str>, message: &str) -> GraphqlError {
        GraphqlError {
            kind: kind.map(String::from),
            message: message.into(),
        }
    }

    #[test]
    fn only_not_found_errors_mean_missing() {
        let errors = vec![
            error(Some("NOT_FOUND"), "Could not resolve to an Issue"),
            error(Some("NOT_FOUND"), "Could not resolve to a PullRequest"),
        ];

        assert!(matches!(
            classify_errors(&errors, "#1"),
            NotesError::NotFound(_)
        ));
        assert!(matches!(
            classify_errors(&[], "#1"),
            NotesError::NotFound(_)
        ));
    }

    #[test]
    fn forbidden_wins_over_other_errors() {
        let errors = vec![
            error(Some("NOT_FOUND"), "missing"),
            error(Some("FORBIDDEN"), "Resource not accessible"),
        ];

        assert!(matches!(
            classify_errors(&errors, "#1"),
            NotesError::Forbidden(m) if m.contains("Resource not accessible")
        ));
    }

    #[test]
    fn unknown_errors_are_api_errors() {
        let errors = vec![error(None, "Something went wrong")];

        assert!(matches!(
            classify_errors(&errors, "#1"),
            NotesError::Api(m) if m.contains("Something went wrong")
        ));
    }
}
