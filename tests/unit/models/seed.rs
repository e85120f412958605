use super::*;
use crate::models::workspace::UserId;
use std::io::Write as _;

const SEED: &str = r#"{
  "workspaces": [
    { "id": "w1", "name": "Research", "viewPermission": ["u1"], "editPermission": [] }
  ],
  "folders": [
    { "id": "f1", "name": "Notes", "parentId": null, "workspaceId": "w1" },
    { "id": "f2", "name": "Drafts", "parentId": "f1", "workspaceId": "w1" }
  ],
  "documents": [
    { "id": "d1", "name": "Intro", "parentId": "f2", "workspaceId": "w1",
      "content": "hello", "lastModified": 1700000000000 },
    { "id": "d2", "name": "Loose", "workspaceId": "w1" }
  ]
}"#;

#[test]
fn parses_camel_case_seed() {
    let data = parse_seed(SEED).unwrap();

    assert_eq!(data.workspaces[0].view_permission, [UserId::from("u1")]);
    assert_eq!(data.folders[1].parent_id, Some(FolderId::new("f1")));

    let d1 = data.document(&"d1".into()).unwrap();
    assert_eq!(d1.content, "hello");
    assert_eq!(
        d1.last_modified,
        UNIX_EPOCH + Duration::from_millis(1_700_000_000_000)
    );

    let d2 = data.document(&"d2".into()).unwrap();
    assert_eq!(d2.parent_id, None);
    assert!(d2.content.is_empty());
    assert!(d2.last_modified > UNIX_EPOCH);
}

#[test]
fn rejects_document_in_foreign_folder() {
    let json = r#"{
      "workspaces": [{ "id": "w1", "name": "a" }, { "id": "w2", "name": "b" }],
      "folders": [{ "id": "f1", "name": "f", "workspaceId": "w1" }],
      "documents": [{ "id": "d1", "name": "d", "parentId": "f1", "workspaceId": "w2" }]
    }"#;

    let err = parse_seed(json).unwrap_err();
    let SeedError::Invalid(issues) = &err else {
        panic!("expected validation error, got {err}");
    };
    assert!(matches!(issues.as_slice(), [ValidationIssue::WorkspaceMismatch { .. }]));
    assert!(err.to_string().contains("d1"));
}

#[test]
fn keeps_dangling_nodes() {
    let json = r#"{
      "workspaces": [{ "id": "w1", "name": "a" }],
      "documents": [{ "id": "d1", "name": "d", "parentId": "gone", "workspaceId": "w1" }]
    }"#;

    let data = parse_seed(json).unwrap();
    assert_eq!(data.documents.len(), 1);
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(parse_seed("{"), Err(SeedError::Parse(_))));

    let io_err: io::Error = parse_seed("\"text\"").unwrap_err().into();
    assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn serialized_sample_parses_back() {
    let data = sample_data();
    let json = to_seed_json(&data).unwrap();
    assert!(json.contains("\"workspaceId\": \"ws-001\""));

    let parsed = parse_seed(&json).unwrap();
    assert_eq!(parsed.folders, data.folders);
    assert_eq!(parsed.documents.len(), data.documents.len());
}

#[test]
fn load_seed_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SEED.as_bytes()).unwrap();

    let data = load_seed(file.path()).unwrap();
    assert_eq!(data.folders.len(), 2);
}

#[test]
fn load_seed_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_seed(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SeedError::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
}

#[test]
fn rejects_folder_under_foreign_parent() {
    let json = r#"{
      "workspaces": [{ "id": "w1", "name": "a" }, { "id": "w2", "name": "b" }],
      "folders": [
        { "id": "f1", "name": "f1", "workspaceId": "w1" },
        { "id": "f2", "name": "f2", "parentId": "f1", "workspaceId": "w2" }
      ],
      "documents": [{ "id": "d", "name": "d", "parentId": "f2", "workspaceId": "w2" }]
    }"#;

    let err = parse_seed(json).unwrap_err();
    assert!(matches!(
        &err,
        SeedError::Invalid(issues)
            if matches!(issues.as_slice(), [ValidationIssue::FolderWorkspaceMismatch { .. }])
    ));
}

#[test]
fn parent_cycle_loads_with_warning() {
    let json = r#"{
      "workspaces": [{ "id": "w1", "name": "a" }],
      "folders": [
        { "id": "f1", "name": "f1", "workspaceId": "w1" },
        { "id": "c1", "name": "c1", "parentId": "c2", "workspaceId": "w1" },
        { "id": "c2", "name": "c2", "parentId": "c1", "workspaceId": "w1" }
      ]
    }"#;

    let data = parse_seed(json).unwrap();
    assert_eq!(data.folders.len(), 3);
    assert_eq!(
        data.validate(),
        [
            ValidationIssue::ParentCycle(FolderId::new("c1")),
            ValidationIssue::ParentCycle(FolderId::new("c2")),
        ]
    );
}

#[test]
fn millisecond_timestamps_survive_serialization() {
    let mut data = sample_data();
    let stamp = UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);
    data.documents[0].last_modified = stamp;

    let parsed = parse_seed(&to_seed_json(&data).unwrap()).unwrap();
    assert_eq!(parsed.documents[0].last_modified, stamp);
}

#[test]
fn out_of_range_timestamp_is_omitted() {
    let Some(far_future) = UNIX_EPOCH.checked_add(Duration::from_secs(u64::MAX / 1000 + 1)) else {
        return;
    };
    let mut data = sample_data();
    data.documents.truncate(1);
    data.documents[0].last_modified = far_future;

    let json = to_seed_json(&data).unwrap();
    assert!(!json.contains("lastModified"));
}
