//! GitHub repository lookups for GitHub Explorer.
//!
//! [`RepositoryApi`] is the seam the dashboard depends on; [`GitHubClient`]
//! implements it against the GitHub REST API with `reqwest`.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::types::errors::GitHubError;
use crate::types::repository::Repository;
use crate::types::settings::ApiSettings;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Resolves an `owner/name` identifier to repository metadata.
pub trait RepositoryApi {
    fn fetch_repository(
        &self,
        identifier: &str,
    ) -> impl Future<Output = Result<Repository, GitHubError>>;
}

/// `reqwest`-backed client for `GET {base_url}/repos/{identifier}`.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: String,
}

impl GitHubClient {
    /// Builds a client from API settings.
    ///
    /// The token, when present, is sent as a bearer `Authorization` header.
    /// No timeout is set unless `timeout_secs` is configured.
    pub fn new(settings: &ApiSettings) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&settings.user_agent)
                .map_err(|e| GitHubError::ClientError(format!("Invalid user agent: {}", e)))?,
        );
        if let Some(token) = settings.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| GitHubError::ClientError(format!("Invalid token value: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| GitHubError::ClientError(e.to_string()))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the repository endpoint for `identifier`.
    pub fn repository_url(&self, identifier: &str) -> String {
        format!("{}/repos/{}", self.base_url, identifier)
    }
}

impl RepositoryApi for GitHubClient {
    async fn fetch_repository(&self, identifier: &str) -> Result<Repository, GitHubError> {
        let url = self.repository_url(identifier);
        debug!(%url, "fetching repository");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| GitHubError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GitHubError::NotFound(identifier.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, identifier, "repository lookup failed");
            return Err(GitHubError::ApiError(format!("{}: {}", status, body)));
        }

        response
            .json::<Repository>()
            .await
            .map_err(|e| GitHubError::InvalidResponse(e.to_string()))
    }
}
