//! Property-based tests for action input handling and forge types.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;
use serde_json::{json, Value};

use gitlab_fork::action::{ForkRequest, PollState};
use gitlab_fork::forge::mock::sample_project;
use gitlab_fork::forge::{ImportStatus, ProjectRef, Visibility};

/// Namespace input as it may appear in action input.
#[derive(Debug, Clone)]
enum NamespaceInput {
    Id(u64),
    Number(f64),
    Path(String),
    Omitted,
}

fn namespace_input() -> impl Strategy<Value = NamespaceInput> {
    prop_oneof![
        any::<u64>().prop_map(NamespaceInput::Id),
        (-1.0e9f64..1.0e9).prop_map(NamespaceInput::Number),
        any::<String>().prop_map(NamespaceInput::Path),
        Just(NamespaceInput::Omitted),
    ]
}

/// Strategy for project paths: slash-separated segments of mixed characters.
fn project_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9._ -]{1,12}", 1..4).prop_map(|parts| parts.join("/"))
}

fn import_status() -> impl Strategy<Value = ImportStatus> {
    prop_oneof![
        Just(ImportStatus::Scheduled),
        Just(ImportStatus::Started),
        Just(ImportStatus::Finished),
        Just(ImportStatus::Failed),
        Just(ImportStatus::None),
        "[a-z_]{1,16}".prop_map(ImportStatus::from),
    ]
}

fn fork_body(namespace: &NamespaceInput) -> serde_json::Map<String, Value> {
    let mut input = json!({ "projectId": "group/project", "token": "t" });
    match namespace {
        NamespaceInput::Id(id) => input["namespace"] = json!(id),
        NamespaceInput::Number(n) => input["namespace"] = json!(n),
        NamespaceInput::Path(path) => input["namespace"] = json!(path),
        NamespaceInput::Omitted => {}
    }

    let params = ForkRequest::from_value(&input).unwrap().fork_parameters();
    match serde_json::to_value(params).unwrap() {
        Value::Object(map) => map,
        other => panic!("fork parameters serialized as {}", other),
    }
}

proptest! {
    /// At most one namespace key is ever sent, and it matches the input type.
    #[test]
    fn namespace_keys_are_exclusive(namespace in namespace_input()) {
        let body = fork_body(&namespace);
        match &namespace {
            NamespaceInput::Id(id) => {
                prop_assert_eq!(body.get("namespace_id"), Some(&json!(id)));
                prop_assert!(!body.contains_key("namespace_path"));
            }
            NamespaceInput::Number(_) => {
                prop_assert!(body.contains_key("namespace_id"));
                prop_assert!(!body.contains_key("namespace_path"));
            }
            NamespaceInput::Path(path) => {
                prop_assert_eq!(body.get("namespace_path"), Some(&json!(path)));
                prop_assert!(!body.contains_key("namespace_id"));
            }
            NamespaceInput::Omitted => {
                prop_assert!(!body.contains_key("namespace_id"));
                prop_assert!(!body.contains_key("namespace_path"));
            }
        }
    }

    /// A string namespace stays a path even when it looks numeric.
    #[test]
    fn numeric_string_namespace_is_path(id in any::<u64>()) {
        let body = fork_body(&NamespaceInput::Path(id.to_string()));
        prop_assert_eq!(body.get("namespace_path"), Some(&json!(id.to_string())));
        prop_assert!(!body.contains_key("namespace_id"));
    }

    /// Encoded project paths are a single URL segment that decodes back.
    #[test]
    fn project_path_encodes_to_one_segment(path in project_path()) {
        let segment = ProjectRef::Path(path.clone()).url_segment();
        prop_assert!(!segment.contains('/'));
        prop_assert!(!segment.contains(' '));
        prop_assert_eq!(urlencoding::decode(&segment).unwrap(), path);
    }

    /// Only the three known levels parse as a visibility.
    #[test]
    fn visibility_parse_is_exact(s in "\\PC{0,10}") {
        let known = ["private", "internal", "public"].contains(&s.as_str());
        prop_assert_eq!(Visibility::parse(&s).is_some(), known);
    }

    /// Optional fields of any JSON type never make input invalid.
    #[test]
    fn optional_fields_never_reject(
        key in prop::sample::select(vec![
            "baseUrl", "namespace", "name", "path", "description", "visibility", "defaultBranch",
        ]),
        value in prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            any::<f64>().prop_map(|f| json!(f)),
            any::<String>().prop_map(Value::from),
            Just(json!([1, "two"])),
            Just(json!({ "nested": true })),
        ],
    ) {
        let mut input = json!({ "projectId": 1, "token": "t" });
        input[key] = value;
        prop_assert!(ForkRequest::from_value(&input).is_ok());
    }

    /// Any JSON number is an acceptable projectId.
    #[test]
    fn numeric_project_id_accepted(
        value in prop_oneof![
            any::<i64>().prop_map(Value::from),
            (-1.0e12f64..1.0e12).prop_map(|f| json!(f)),
        ],
    ) {
        let input = json!({ "projectId": value, "token": "t" });
        prop_assert!(ForkRequest::from_value(&input).is_ok());
    }

    /// A terminal status is reported as such whatever the attempt count.
    #[test]
    fn terminal_status_beats_exhaustion(
        status in import_status(),
        max in 0u32..50,
        extra in 0u32..5,
    ) {
        let attempts = max + extra;
        let state = PollState::classify(sample_project(1, status.clone()), attempts, max);
        match state {
            PollState::Failed { .. } => prop_assert_eq!(status, ImportStatus::Failed),
            PollState::Finished { .. } => {
                prop_assert!(!status.is_in_progress() && status != ImportStatus::Failed)
            }
            PollState::Exhausted { .. } => prop_assert!(status.is_in_progress()),
            PollState::Polling { .. } => prop_assert!(false, "polling with no budget left"),
        }
    }

    /// Import statuses keep their API spelling.
    #[test]
    fn import_status_spelling_preserved(s in "[a-z_]{1,20}") {
        let status = ImportStatus::from(s.as_str());
        prop_assert_eq!(status.as_str(), s.as_str());
    }
}
