//! action::outcome
//!
//! Output of a successful fork.

use serde::{Deserialize, Serialize};

use crate::forge::Project;

/// Identifiers and URLs of the forked project.
///
/// Serialized with the action's output keys (`projectId`, `projectPath`,
/// `projectUrl`, `sshUrl`, `httpUrl`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForkOutcome {
    /// Numeric id of the fork
    pub project_id: u64,
    /// Full path of the fork
    pub project_path: String,
    /// Web URL of the fork
    pub project_url: String,
    /// SSH clone URL
    pub ssh_url: String,
    /// HTTP clone URL
    pub http_url: String,
}

impl From<&Project> for ForkOutcome {
    fn from(project: &Project) -> Self {
        Self {
            project_id: project.id,
            project_path: project.path_with_namespace.clone(),
            project_url: project.web_url.clone(),
            ssh_url: project.ssh_url_to_repo.clone(),
            http_url: project.http_url_to_repo.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::mock::sample_project;
    use crate::forge::ImportStatus;
    use serde_json::json;

    #[test]
    fn serializes_output_keys() {
        let outcome = ForkOutcome::from(&sample_project(123, ImportStatus::Finished));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "projectId": 123,
                "projectPath": "user/forked-project",
                "projectUrl": "https://gitlab.com/user/forked-project",
                "sshUrl": "git@gitlab.com:user/forked-project.git",
                "httpUrl": "https://gitlab.com/user/forked-project.git",
            })
        );
    }
}
