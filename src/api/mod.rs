pub mod auth;
pub mod remedies;

use crate::config::ApiConfig;
use std::time::Duration;
use ureq::Agent;

/// Thin synchronous client for the consultation/remedies backend.
///
/// Holds the base URL and a shared agent; individual endpoint wrappers live
/// in [`auth`] and [`remedies`]. Authenticated calls take an explicit
/// [`Session`] rather than reading credentials from any ambient state.
pub struct ApiClient {
    base_url: String,
    agent: Agent,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_seconds)))
            .build()
            .into();

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) fn agent(&self) -> &Agent {
        &self.agent
    }
}

/// An authenticated admin session, produced by a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    token: String,
}

impl Session {
    pub fn new(username: String, token: String) -> Self {
        Self { username, token }
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: base_url.into(),
            timeout_seconds: 5,
        })
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let api = client("http://localhost:5000/");
        assert_eq!(api.url("/api/remedies"), "http://localhost:5000/api/remedies");
    }

    #[test]
    fn keeps_base_url_without_trailing_slash() {
        let api = client("https://example.com");
        assert_eq!(api.url("/api/auth/login"), "https://example.com/api/auth/login");
    }

    #[test]
    fn session_formats_bearer_header() {
        let session = Session::new("admin".into(), "abc123".into());
        assert_eq!(session.bearer(), "Bearer abc123");
    }
}
