//! action::schema
//!
//! JSON Schemas of the action's input and output, for hosts that validate
//! or render action forms.

use serde_json::{json, Value};

use super::ForkAction;
use crate::forge::gitlab::DEFAULT_HOST;
use crate::forge::Visibility;

/// Schema of the action input.
pub fn input_schema() -> Value {
    let visibilities: Vec<&str> = Visibility::ALL.iter().map(Visibility::as_str).collect();

    json!({
        "description": ForkAction::DESCRIPTION,
        "type": "object",
        "required": ["projectId", "token"],
        "properties": {
            "projectId": {
                "title": "Project ID",
                "description": "The ID or URL-encoded path of the project to fork",
                "type": ["string", "number"],
            },
            "token": {
                "title": "GitLab Token",
                "description": "GitLab personal access token with api scope",
                "type": "string",
            },
            "baseUrl": {
                "title": "GitLab Base URL",
                "description": "Base URL of the GitLab instance",
                "type": "string",
                "default": DEFAULT_HOST,
            },
            "namespace": {
                "title": "Target Namespace",
                "description": "The ID or path of the namespace to fork to",
                "type": ["string", "number"],
            },
            "name": {
                "title": "Project Name",
                "description": "The name of the forked project",
                "type": "string",
            },
            "path": {
                "title": "Project Path",
                "description": "The path of the forked project",
                "type": "string",
            },
            "description": {
                "title": "Description",
                "description": "The description of the forked project",
                "type": "string",
            },
            "visibility": {
                "title": "Visibility",
                "description": "The visibility level of the forked project",
                "type": "string",
                "enum": visibilities,
            },
            "defaultBranch": {
                "title": "Default Branch",
                "description": "The default branch of the forked project",
                "type": "string",
            },
        },
    })
}

/// Schema of the action output.
pub fn output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "projectId": {
                "title": "Project ID",
                "description": "The ID of the forked project",
                "type": "number",
            },
            "projectPath": {
                "title": "Project Path",
                "description": "The path of the forked project",
                "type": "string",
            },
            "projectUrl": {
                "title": "Project URL",
                "description": "The web URL of the forked project",
                "type": "string",
            },
            "sshUrl": {
                "title": "SSH URL",
                "description": "The SSH URL of the forked project",
                "type": "string",
            },
            "httpUrl": {
                "title": "HTTP URL",
                "description": "The HTTP URL of the forked project",
                "type": "string",
            },
        },
    })
}
