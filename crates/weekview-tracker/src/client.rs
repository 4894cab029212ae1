//! Authenticated REST client for the project tracker
//!
//! Issues project-scoped GETs with the tracker's token header and decodes
//! the JSON bodies into the core's wire types. No retries anywhere: a
//! single failed fetch fails the enclosing week render (documented
//! limitation, preferred over silently degraded dashboards).

use crate::error::TransportError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use weekview_core::{ActivityEvent, BoxError, Membership, Story, StoryId, Tracker};

/// The tracker's credential header
const TOKEN_HEADER: &str = "X-TrackerToken";

/// Default API root of the hosted tracker service
pub const DEFAULT_BASE_URL: &str = "https://www.pivotaltracker.com/services/v5";

/// Read-only client for one tracker project
#[derive(Debug, Clone)]
pub struct TrackerClient {
    http: reqwest::Client,
    base_url: String,
    project_id: u64,
    token: String,
}

impl TrackerClient {
    /// Create a client against the hosted tracker service
    #[must_use]
    pub fn new(project_id: u64, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            project_id,
            token: token.into(),
        }
    }

    /// With a different API root (self-hosted instances, test servers)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The project-scoped URL for a path like `memberships`
    fn project_url(&self, path: &str) -> String {
        format!(
            "{}/projects/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            path
        )
    }

    /// Authenticated GET, decoded into `T`
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, TransportError> {
        let url = self.project_url(path);
        tracing::debug!(%url, "tracker request");

        let mut request = self.http.get(&url).header(TOKEN_HEADER, &self.token);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await.map_err(TransportError::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url,
            });
        }
        response.json::<T>().await.map_err(TransportError::Decode)
    }
}

/// Envelope around the search endpoint's story list
#[derive(Debug, Deserialize)]
struct SearchResponse {
    stories: SearchStories,
}

#[derive(Debug, Deserialize)]
struct SearchStories {
    stories: Vec<Story>,
}

#[async_trait]
impl Tracker for TrackerClient {
    async fn memberships(&self) -> Result<Vec<Membership>, BoxError> {
        Ok(self.get::<Vec<Membership>>("memberships", &[]).await?)
    }

    async fn search_stories(&self, query: &str) -> Result<Vec<Story>, BoxError> {
        let envelope: SearchResponse = self.get("search", &[("query", query)]).await?;
        Ok(envelope.stories.stories)
    }

    async fn story_activity(&self, id: StoryId) -> Result<Vec<ActivityEvent>, BoxError> {
        let path = format!("stories/{id}/activity");
        Ok(self.get::<Vec<ActivityEvent>>(&path, &[]).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use weekview_core::{PersonId, StoryState};

    #[test]
    fn project_url_is_scoped_to_the_project() {
        let client = TrackerClient::new(764_125, "t0ken");
        assert_eq!(
            client.project_url("memberships"),
            "https://www.pivotaltracker.com/services/v5/projects/764125/memberships"
        );
    }

    #[test]
    fn base_url_override_tolerates_trailing_slash() {
        let client = TrackerClient::new(1, "t0ken").with_base_url("http://localhost:8123/");
        assert_eq!(
            client.project_url("stories/5/activity"),
            "http://localhost:8123/projects/1/stories/5/activity"
        );
    }

    #[test]
    fn search_envelope_unwraps_nested_story_list() {
        let envelope: SearchResponse = serde_json::from_value(json!({
            "stories": {
                "stories": [{
                    "id": 555,
                    "name": "Wire up the login page",
                    "owner_ids": [7],
                    "current_state": "started"
                }],
                "total_hits": 1
            },
            "query": "state:started"
        }))
        .unwrap();

        let stories = envelope.stories.stories;
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].id, StoryId(555));
        assert_eq!(stories[0].owner_ids, vec![PersonId(7)]);
        assert_eq!(stories[0].current_state, StoryState::Started);
    }

    #[test]
    fn transport_error_display_names_the_url() {
        let err = TransportError::Status {
            status: 503,
            url: "http://localhost/projects/1/search".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "tracker returned status 503 for http://localhost/projects/1/search"
        );
    }
}
