//! Live adapter for the `IssueTracker` port using the Jira Agile REST API.

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::TrackerConfig;
use crate::ports::{
    Board, BoardId, InwardLink, Issue, IssueTracker, Sprint, SprintId, TrackerError,
    TrackerFuture,
};

/// Fields requested for issue listings; everything else is ignored.
const ISSUE_FIELDS: &str = "summary,issuelinks";

/// Live tracker client for Jira Cloud and Data Center.
pub struct LiveIssueTracker {
    client: Client,
    config: TrackerConfig,
}

impl LiveIssueTracker {
    /// Creates a client that applies the config's timeout to every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: TrackerConfig) -> Result<Self, TrackerError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| -> TrackerError { format!("Failed to build HTTP client: {e}").into() })?;
        Ok(Self { client, config })
    }

    async fn get_json<T>(&self, resource: &str, query: &[(&str, String)]) -> Result<T, TrackerError>
    where
        T: DeserializeOwned,
    {
        let url = self.config.agile_url(resource);
        debug!(%url, ?query, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .basic_auth(self.config.email(), Some(self.config.api_token()))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| -> TrackerError { format!("Jira request to {url} failed: {e}").into() })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| -> TrackerError {
            format!("Failed to read Jira response from {url}: {e}").into()
        })?;

        if !status.is_success() {
            return Err(format!("Jira API error ({}): {}", status.as_u16(), error_message(&text)).into());
        }

        serde_json::from_str(&text).map_err(|e| -> TrackerError {
            format!("Failed to parse Jira response from {url}: {e}").into()
        })
    }

    /// Fetches every page of a `values`/`isLast` listing.
    async fn get_all_values<T>(
        &self,
        resource: &str,
        base_query: &[(&str, String)],
    ) -> Result<Vec<T>, TrackerError>
    where
        T: DeserializeOwned,
    {
        let mut values = Vec::new();
        loop {
            let mut query = base_query.to_vec();
            query.push(("startAt", values.len().to_string()));
            let page: ValuesPage<T> = self.get_json(resource, &query).await?;
            let fetched = page.values.len();
            values.extend(page.values);
            if page.is_last || fetched == 0 {
                return Ok(values);
            }
        }
    }
}

/// Page of a board or sprint listing.
#[derive(Deserialize)]
struct ValuesPage<T> {
    values: Vec<T>,
    #[serde(rename = "isLast", default = "default_true")]
    is_last: bool,
}

fn default_true() -> bool {
    true
}

/// Page of a sprint's issue listing.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssuePage {
    #[serde(default)]
    start_at: usize,
    #[serde(default)]
    total: usize,
    issues: Vec<JiraIssue>,
}

impl IssuePage {
    fn has_more(&self) -> bool {
        !self.issues.is_empty() && self.start_at + self.issues.len() < self.total
    }
}

#[derive(Deserialize)]
struct JiraIssue {
    id: String,
    key: String,
    fields: JiraFields,
}

#[derive(Deserialize)]
struct JiraFields {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    issuelinks: Vec<JiraLink>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraLink {
    #[serde(rename = "type")]
    link_type: JiraLinkType,
    inward_issue: Option<JiraLinkedIssue>,
}

#[derive(Deserialize)]
struct JiraLinkType {
    inward: String,
}

#[derive(Deserialize)]
struct JiraLinkedIssue {
    id: String,
    key: String,
    #[serde(default)]
    fields: JiraLinkedFields,
}

#[derive(Default, Deserialize)]
struct JiraLinkedFields {
    #[serde(default)]
    summary: String,
}

impl From<JiraIssue> for Issue {
    fn from(issue: JiraIssue) -> Self {
        // Outward links are the mirror of an inward link on the other issue.
        let inward_links = issue
            .fields
            .issuelinks
            .into_iter()
            .filter_map(|link| {
                let blocker = link.inward_issue?;
                Some(InwardLink {
                    link_type: link.link_type.inward,
                    blocker_id: blocker.id,
                    blocker_key: blocker.key,
                    blocker_summary: blocker.fields.summary,
                })
            })
            .collect();
        Self { id: issue.id, key: issue.key, summary: issue.fields.summary, inward_links }
    }
}

/// Jira error body.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraError {
    #[serde(default)]
    error_messages: Vec<String>,
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<JiraError>(body)
        .ok()
        .filter(|e| !e.error_messages.is_empty())
        .map_or_else(|| body.trim().to_string(), |e| e.error_messages.join("; "))
}

impl IssueTracker for LiveIssueTracker {
    fn list_boards<'a>(&'a self, project_key: &'a str) -> TrackerFuture<'a, Vec<Board>> {
        Box::pin(async move {
            self.get_all_values("board", &[("projectKeyOrId", project_key.to_string())]).await
        })
    }

    fn list_sprints(&self, board_id: BoardId) -> TrackerFuture<'_, Vec<Sprint>> {
        Box::pin(async move { self.get_all_values(&format!("board/{board_id}/sprint"), &[]).await })
    }

    fn list_issues(&self, sprint_id: SprintId) -> TrackerFuture<'_, Vec<Issue>> {
        Box::pin(async move {
            let resource = format!("sprint/{sprint_id}/issue");
            let mut issues = Vec::new();
            loop {
                let query = [
                    ("fields", ISSUE_FIELDS.to_string()),
                    ("startAt", issues.len().to_string()),
                ];
                let page: IssuePage = self.get_json(&resource, &query).await?;
                let more = page.has_more();
                issues.extend(page.issues.into_iter().map(Issue::from));
                if !more {
                    return Ok(issues);
                }
            }
        })
    }
}
