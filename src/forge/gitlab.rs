//! forge::gitlab
//!
//! GitLab implementation of [`ProjectApi`] over the REST v4 API.
//!
//! # Design
//!
//! - `fork` is `POST /projects/:id/fork` with a JSON [`ForkParameters`] body
//! - `show` is `GET /projects/:id`
//! - Requests authenticate with the `PRIVATE-TOKEN` header
//!
//! Error responses are mapped onto [`ForgeError`] by status code. GitLab
//! reports errors as `{"message": ...}` (a string, or an object of field
//! errors) or as `{"error": ..., "error_description": ...}` for OAuth
//! failures; whichever is present becomes the error message.
//!
//! # Example
//!
//! ```ignore
//! use gitlab_fork::forge::gitlab::GitLabClient;
//! use gitlab_fork::forge::{ForkParameters, ProjectApi, ProjectRef};
//!
//! let client = GitLabClient::new("https://gitlab.example.com", "glpat-xxx")?;
//! let forked = client
//!     .fork(&ProjectRef::from("group/project"), &ForkParameters::default())
//!     .await?;
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::traits::{ForgeError, ForkParameters, Project, ProjectApi, ProjectRef};

/// Default GitLab host.
pub const DEFAULT_HOST: &str = "https://gitlab.com";

/// Path of the REST API below the host.
const API_PATH: &str = "/api/v4";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = concat!("glfork/", env!("CARGO_PKG_VERSION"));

/// GitLab REST client.
pub struct GitLabClient {
    /// HTTP client for making requests
    client: Client,
    /// Personal access token
    token: String,
    /// Host URL as given by the caller
    host: String,
    /// Normalized API base (`{host}/api/v4`)
    api_base: String,
}

// Custom Debug to avoid exposing token
impl std::fmt::Debug for GitLabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitLabClient")
            .field("has_token", &!self.token.is_empty())
            .field("host", &self.host)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GitLabClient {
    /// Create a client for a GitLab host.
    ///
    /// `host` is the instance URL, e.g. `https://gitlab.com`. A URL that
    /// already ends in `/api/v4` is accepted as-is.
    ///
    /// # Errors
    ///
    /// Returns `ForgeError::InvalidBaseUrl` if `host` is not an absolute
    /// `http`/`https` URL.
    ///
    /// # Example
    ///
    /// ```
    /// use gitlab_fork::forge::gitlab::GitLabClient;
    ///
    /// let client = GitLabClient::new("https://gitlab.example.com/", "glpat-xxx").unwrap();
    /// assert_eq!(client.api_base(), "https://gitlab.example.com/api/v4");
    /// ```
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Result<Self, ForgeError> {
        let host = host.into();
        let api_base = api_base_for(&host)?;
        Ok(Self {
            client: Client::new(),
            token: token.into(),
            host,
            api_base,
        })
    }

    /// Get the API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, ForgeError> {
        let token = HeaderValue::from_str(&self.token).map_err(|_| {
            ForgeError::AuthFailed("token contains characters not allowed in a header".into())
        })?;
        let mut headers = HeaderMap::new();
        headers.insert("PRIVATE-TOKEN", token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    /// Build URL for a project endpoint.
    fn project_url(&self, project: &ProjectRef, suffix: &str) -> String {
        format!(
            "{}/projects/{}{}",
            self.api_base,
            project.url_segment(),
            suffix
        )
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, ForgeError> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            Err(error_from_response(response, status).await)
        }
    }
}

/// Derive the API base from a host URL.
fn api_base_for(host: &str) -> Result<String, ForgeError> {
    let trimmed = host.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| ForgeError::InvalidBaseUrl(format!("{}: {}", host, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ForgeError::InvalidBaseUrl(format!(
            "{}: scheme must be http or https",
            host
        )));
    }

    if trimmed.ends_with(API_PATH) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{}{}", trimmed, API_PATH))
    }
}

/// Map a non-success response onto a `ForgeError`.
async fn error_from_response(response: Response, status: StatusCode) -> ForgeError {
    let message = match response.json::<Value>().await {
        Ok(body) => error_message(&body),
        Err(_) => None,
    }
    .unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ForgeError::AuthFailed(format!("{} {}", status.as_u16(), message))
        }
        StatusCode::NOT_FOUND => ForgeError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => ForgeError::RateLimited,
        _ if status.is_server_error() => ForgeError::ApiError {
            status: status.as_u16(),
            message: format!("GitLab server error: {}", message),
        },
        _ => ForgeError::ApiError {
            status: status.as_u16(),
            message,
        },
    }
}

/// Extract the human-readable message from a GitLab error body.
fn error_message(body: &Value) -> Option<String> {
    match body.get("message") {
        Some(Value::String(s)) => return Some(s.clone()),
        Some(Value::Null) | None => {}
        Some(other) => return Some(other.to_string()),
    }

    body.get("error_description")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl ProjectApi for GitLabClient {
    fn name(&self) -> &'static str {
        "gitlab"
    }

    async fn fork(
        &self,
        project: &ProjectRef,
        params: &ForkParameters,
    ) -> Result<Option<Project>, ForgeError> {
        let url = self.project_url(project, "/fork");
        debug!(%url, "POST fork");

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(params)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(response, status).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;
        let body = body.trim();
        if body.is_empty() || body == "null" {
            return Ok(None);
        }

        serde_json::from_str(body)
            .map(Some)
            .map_err(|e| ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("Failed to parse response: {}", e),
            })
    }

    async fn show(&self, id: u64) -> Result<Project, ForgeError> {
        let url = self.project_url(&ProjectRef::Id(id), "");
        debug!(%url, "GET project");

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        self.handle_response(response).await
    }
}
