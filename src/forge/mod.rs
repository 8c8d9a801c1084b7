//! forge
//!
//! Provider capability for GitLab-compatible servers.
//!
//! # Architecture
//!
//! The [`ProjectApi`] trait defines the two project operations the fork
//! workflow consumes. The action obtains an implementation through a
//! [`ClientFactory`] rather than naming a concrete client, so the real
//! client and the mock are interchangeable.
//!
//! # Modules
//!
//! - `traits`: `ProjectApi` trait, project model and `ForgeError`
//! - [`gitlab`]: GitLab REST v4 implementation
//! - [`mock`]: Mock implementation for deterministic testing
//! - `factory`: Client creation
//!
//! # Example
//!
//! ```ignore
//! use gitlab_fork::forge::{create_client, ForkParameters, ProjectRef};
//!
//! let client = create_client("https://gitlab.com", token)?;
//! let forked = client
//!     .fork(&ProjectRef::from("group/project"), &ForkParameters::default())
//!     .await?;
//! ```

mod factory;
pub mod gitlab;
pub mod mock;
mod traits;

pub use factory::{create_client, ClientFactory, GitLabClientFactory};
pub use traits::*;
