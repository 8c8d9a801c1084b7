//! forge::factory
//!
//! Client creation.
//!
//! # Design
//!
//! The fork action never constructs a provider client itself. It asks a
//! [`ClientFactory`] for one, passing the base URL and token from the
//! request unchanged. Production code uses [`GitLabClientFactory`]; tests
//! substitute [`MockGitLab`](super::mock::MockGitLab).
//!
//! # Example
//!
//! ```
//! use gitlab_fork::forge::create_client;
//!
//! let client = create_client("https://gitlab.com", "glpat-xxx").unwrap();
//! assert_eq!(client.name(), "gitlab");
//!
//! assert!(create_client("not a url", "glpat-xxx").is_err());
//! ```

use super::gitlab::GitLabClient;
use super::traits::{ForgeError, ProjectApi};

/// Creates provider clients for a `(base_url, token)` pair.
pub trait ClientFactory: Send + Sync {
    /// Connect to the given host with the given token.
    ///
    /// # Errors
    ///
    /// - `ForgeError::InvalidBaseUrl` if the URL cannot be used
    fn connect(&self, base_url: &str, token: &str) -> Result<Box<dyn ProjectApi>, ForgeError>;
}

/// Factory for real GitLab REST clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitLabClientFactory;

impl ClientFactory for GitLabClientFactory {
    fn connect(&self, base_url: &str, token: &str) -> Result<Box<dyn ProjectApi>, ForgeError> {
        create_client(base_url, token)
    }
}

/// Create a GitLab client from a base URL and token.
///
/// # Errors
///
/// - `ForgeError::InvalidBaseUrl` if `base_url` is not an http(s) URL
pub fn create_client(base_url: &str, token: &str) -> Result<Box<dyn ProjectApi>, ForgeError> {
    Ok(Box::new(GitLabClient::new(base_url, token)?))
}
