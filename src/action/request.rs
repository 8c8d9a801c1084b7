//! action::request
//!
//! Fork action input and its translation into fork parameters.
//!
//! # Validation
//!
//! Only the two required fields are validated strictly: `token` must be a
//! string and `projectId` a string or a number. Optional fields are
//! accepted permissively. A wrong-typed optional field, or a `visibility`
//! outside `private | internal | public`, is dropped rather than rejected.
//!
//! Integral non-negative numbers, `42.0` included, become ids. Any other
//! number is forwarded unchanged so the server decides.

use serde_json::{Map, Number, Value};

use super::errors::ActionError;
use crate::forge::gitlab::DEFAULT_HOST;
use crate::forge::{ForkParameters, Namespace, ProjectRef, Visibility};

/// Input of one fork invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct ForkRequest {
    /// Source project to fork
    pub project: ProjectRef,
    /// Token with `api` scope
    pub token: String,
    /// GitLab host (defaults to gitlab.com)
    pub base_url: String,
    /// Destination namespace
    pub namespace: Option<Namespace>,
    /// Name of the forked project
    pub name: Option<String>,
    /// Path of the forked project
    pub path: Option<String>,
    /// Description of the forked project
    pub description: Option<String>,
    /// Visibility of the forked project
    pub visibility: Option<Visibility>,
    /// Default branch of the forked project
    pub default_branch: Option<String>,
}

// Custom Debug to avoid exposing token
impl std::fmt::Debug for ForkRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForkRequest")
            .field("project", &self.project)
            .field("has_token", &!self.token.is_empty())
            .field("base_url", &self.base_url)
            .field("namespace", &self.namespace)
            .field("name", &self.name)
            .field("path", &self.path)
            .field("description", &self.description)
            .field("visibility", &self.visibility)
            .field("default_branch", &self.default_branch)
            .finish()
    }
}

impl ForkRequest {
    /// Create a request with only the required fields set.
    ///
    /// # Example
    ///
    /// ```
    /// use gitlab_fork::action::ForkRequest;
    /// use gitlab_fork::forge::{Namespace, Visibility};
    ///
    /// let request = ForkRequest::new("group/project", "glpat-xxx")
    ///     .with_namespace(Namespace::Path("team".into()))
    ///     .with_visibility(Visibility::Private);
    ///
    /// let params = request.fork_parameters();
    /// assert_eq!(params.namespace, Some(Namespace::Path("team".into())));
    /// assert_eq!(request.base_url, "https://gitlab.com");
    /// ```
    pub fn new(project: impl Into<ProjectRef>, token: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            token: token.into(),
            base_url: DEFAULT_HOST.to_string(),
            namespace: None,
            name: None,
            path: None,
            description: None,
            visibility: None,
            default_branch: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn with_default_branch(mut self, default_branch: impl Into<String>) -> Self {
        self.default_branch = Some(default_branch.into());
        self
    }

    /// Parse action input as supplied by a hosting orchestrator.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::InvalidInput` if the input is not an object,
    /// `token` is not a string, or `projectId` is neither a string nor a
    /// number.
    ///
    /// # Example
    ///
    /// ```
    /// use gitlab_fork::action::ForkRequest;
    /// use gitlab_fork::forge::{Namespace, ProjectRef};
    /// use serde_json::json;
    ///
    /// let request = ForkRequest::from_value(&json!({
    ///     "projectId": 42,
    ///     "token": "glpat-xxx",
    ///     "namespace": "team",
    ///     "visibility": "secret",
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(request.project, ProjectRef::Id(42));
    /// assert_eq!(request.namespace, Some(Namespace::Path("team".into())));
    /// assert_eq!(request.visibility, None);
    /// ```
    pub fn from_value(input: &Value) -> Result<Self, ActionError> {
        let input = input
            .as_object()
            .ok_or_else(|| ActionError::InvalidInput("input must be an object".into()))?;

        let token = match input.get("token") {
            Some(Value::String(token)) => token.clone(),
            _ => return Err(ActionError::InvalidInput("token must be a string".into())),
        };

        let project = input
            .get("projectId")
            .and_then(project_ref)
            .ok_or_else(|| {
                ActionError::InvalidInput("projectId must be a string or number".into())
            })?;

        let base_url = string_field(input, "baseUrl").unwrap_or_else(|| DEFAULT_HOST.to_string());

        Ok(Self {
            project,
            token,
            base_url,
            namespace: input.get("namespace").and_then(namespace),
            name: string_field(input, "name"),
            path: string_field(input, "path"),
            description: string_field(input, "description"),
            visibility: input
                .get("visibility")
                .and_then(Value::as_str)
                .and_then(Visibility::parse),
            default_branch: string_field(input, "defaultBranch"),
        })
    }

    /// Build the provider fork parameters from this request.
    pub fn fork_parameters(&self) -> ForkParameters {
        ForkParameters {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            path: self.path.clone(),
            description: self.description.clone(),
            visibility: self.visibility,
            default_branch: self.default_branch.clone(),
        }
    }
}

fn project_ref(value: &Value) -> Option<ProjectRef> {
    match value {
        Value::String(path) => Some(ProjectRef::Path(path.clone())),
        Value::Number(n) => Some(
            numeric_id(n)
                .map(ProjectRef::Id)
                .unwrap_or_else(|| ProjectRef::Number(n.clone())),
        ),
        _ => None,
    }
}

fn namespace(value: &Value) -> Option<Namespace> {
    match value {
        Value::String(path) => Some(Namespace::Path(path.clone())),
        Value::Number(n) => Some(
            numeric_id(n)
                .map(Namespace::Id)
                .unwrap_or_else(|| Namespace::Number(n.clone())),
        ),
        _ => None,
    }
}

fn numeric_id(n: &Number) -> Option<u64> {
    n.as_u64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

fn string_field(input: &Map<String, Value>, key: &str) -> Option<String> {
    input.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_input() -> Value {
        json!({
            "projectId": "test-group/test-project",
            "token": "glpat-test-token",
        })
    }

    fn with(mut input: Value, key: &str, value: Value) -> Value {
        input.as_object_mut().unwrap().insert(key.to_string(), value);
        input
    }

    mod required_fields {
        use super::*;

        #[test]
        fn minimal_input() {
            let request = ForkRequest::from_value(&base_input()).unwrap();
            assert_eq!(request.project, ProjectRef::from("test-group/test-project"));
            assert_eq!(request.token, "glpat-test-token");
            assert_eq!(request.base_url, "https://gitlab.com");
            assert!(request.fork_parameters().is_empty());
        }

        #[test]
        fn numeric_project_id() {
            let input = with(base_input(), "projectId", json!(123));
            let request = ForkRequest::from_value(&input).unwrap();
            assert_eq!(request.project, ProjectRef::Id(123));
        }

        #[test]
        fn integral_float_project_id() {
            let input = with(base_input(), "projectId", json!(42.0));
            let request = ForkRequest::from_value(&input).unwrap();
            assert_eq!(request.project, ProjectRef::Id(42));
        }

        #[test]
        fn other_numbers_are_forwarded() {
            for (value, segment) in [(json!(-3), "-3"), (json!(1.5), "1.5")] {
                let input = with(base_input(), "projectId", value.clone());
                let request = ForkRequest::from_value(&input).unwrap();
                assert_eq!(request.project.url_segment(), segment);
                assert!(matches!(request.project, ProjectRef::Number(_)));
            }
        }

        #[test]
        fn missing_token() {
            let input = json!({ "projectId": 1 });
            assert_eq!(
                ForkRequest::from_value(&input),
                Err(ActionError::InvalidInput("token must be a string".into()))
            );
        }

        #[test]
        fn non_string_token() {
            let input = with(base_input(), "token", json!(12345));
            assert_eq!(
                ForkRequest::from_value(&input).unwrap_err().to_string(),
                "token must be a string"
            );
        }

        #[test]
        fn token_checked_before_project() {
            let input = json!({ "projectId": true, "token": null });
            assert_eq!(
                ForkRequest::from_value(&input).unwrap_err().to_string(),
                "token must be a string"
            );
        }

        #[test]
        fn invalid_project_types() {
            for bad in [json!(true), json!(null), json!([1]), json!({"id": 1})] {
                let input = with(base_input(), "projectId", bad.clone());
                assert_eq!(
                    ForkRequest::from_value(&input),
                    Err(ActionError::InvalidInput(
                        "projectId must be a string or number".into()
                    )),
                    "projectId {} should be rejected",
                    bad
                );
            }
        }

        #[test]
        fn non_object_input() {
            assert!(matches!(
                ForkRequest::from_value(&json!("group/project")),
                Err(ActionError::InvalidInput(_))
            ));
        }
    }

    mod optional_fields {
        use super::*;

        #[test]
        fn all_fields() {
            let input = json!({
                "projectId": "test-group/test-project",
                "token": "glpat-test-token",
                "baseUrl": "https://gitlab.custom.com",
                "namespace": "team",
                "name": "custom-project",
                "path": "custom-project",
                "description": "Test description",
                "visibility": "private",
                "defaultBranch": "main",
            });
            let request = ForkRequest::from_value(&input).unwrap();

            assert_eq!(request.base_url, "https://gitlab.custom.com");
            assert_eq!(
                request.fork_parameters(),
                ForkParameters {
                    namespace: Some(Namespace::Path("team".into())),
                    name: Some("custom-project".into()),
                    path: Some("custom-project".into()),
                    description: Some("Test description".into()),
                    visibility: Some(Visibility::Private),
                    default_branch: Some("main".into()),
                }
            );
        }

        #[test]
        fn numeric_namespace_is_id() {
            let input = with(base_input(), "namespace", json!(42));
            let params = ForkRequest::from_value(&input).unwrap().fork_parameters();
            assert_eq!(params.namespace, Some(Namespace::Id(42)));
        }

        #[test]
        fn integral_float_namespace_is_id() {
            let input = with(base_input(), "namespace", json!(42.0));
            let params = ForkRequest::from_value(&input).unwrap().fork_parameters();
            assert_eq!(params.namespace, Some(Namespace::Id(42)));
        }

        #[test]
        fn other_numeric_namespaces_keep_namespace_id() {
            for value in [json!(-3), json!(1.5)] {
                let input = with(base_input(), "namespace", value.clone());
                let params = ForkRequest::from_value(&input).unwrap().fork_parameters();
                assert_eq!(
                    serde_json::to_value(&params).unwrap(),
                    json!({ "namespace_id": value })
                );
            }
        }

        #[test]
        fn wrong_typed_fields_are_dropped() {
            let input = json!({
                "projectId": 1,
                "token": "t",
                "baseUrl": 8080,
                "namespace": true,
                "name": 5,
                "path": ["p"],
                "description": {"text": "d"},
                "visibility": 1,
                "defaultBranch": false,
            });
            let request = ForkRequest::from_value(&input).unwrap();

            assert_eq!(request.base_url, "https://gitlab.com");
            assert!(request.fork_parameters().is_empty());
        }

        #[test]
        fn invalid_visibility_is_ignored() {
            let input = with(base_input(), "visibility", json!("Public"));
            let request = ForkRequest::from_value(&input).unwrap();
            assert_eq!(request.visibility, None);
        }
    }

    #[test]
    fn debug_hides_token() {
        let request = ForkRequest::new(7u64, "glpat-secret");
        let debug = format!("{:?}", request);
        assert!(!debug.contains("glpat-secret"));
    }

    #[test]
    fn builder_sets_every_field() {
        let request = ForkRequest::new("a/b", "t")
            .with_base_url("https://gitlab.example.com")
            .with_namespace(Namespace::Id(3))
            .with_name("n")
            .with_path("p")
            .with_description("d")
            .with_visibility(Visibility::Internal)
            .with_default_branch("develop");

        let params = request.fork_parameters();
        assert_eq!(request.base_url, "https://gitlab.example.com");
        assert_eq!(params.namespace, Some(Namespace::Id(3)));
        assert_eq!(params.visibility, Some(Visibility::Internal));
        assert_eq!(params.default_branch.as_deref(), Some("develop"));
    }
}
