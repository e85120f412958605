use super::*;
use crate::models::{sample_data, TreeItemKind};
use std::time::UNIX_EPOCH;

fn new_store() -> Store {
    let mut store = Store::new(sample_data());
    store.dispatch(Action::SetActiveWorkspace("ws-001".into()));
    store
}

fn two_workspace_store() -> Store {
    let mut data = sample_data();
    let mut second = data.workspaces[0].clone();
    second.id = "ws-002".into();
    second.name = "Archive".into();
    data.workspaces.push(second);
    Store::new(data)
}

#[test]
fn starts_with_nothing_active() {
    let store = Store::new(sample_data());
    assert!(store.current_workspace().is_none());
    assert!(store.active_document().is_none());
    assert!(store.explorer_rows().is_empty());
}

#[test]
fn set_active_workspace_resolves_entity() {
    let store = new_store();
    let ws = store.current_workspace().unwrap();
    assert_eq!(ws.name, "Design Hub");
    assert_eq!(ws.view_permission.len(), 3);
    assert_eq!(ws.edit_permission.len(), 1);
}

#[test]
fn unknown_active_ids_resolve_to_none() {
    let mut store = new_store();
    assert!(
        store
            .dispatch(Action::SetActiveWorkspace("ws-404".into()))
            .state_changed
    );
    assert!(store.current_workspace().is_none());

    store.dispatch(Action::SetActiveDocument("doc-404".into()));
    assert!(store.active_document().is_none());
}

#[test]
fn setting_same_active_document_is_unchanged() {
    let mut store = new_store();
    assert!(store.dispatch(Action::SetActiveDocument("doc-2".into())).state_changed);
    assert!(!store.dispatch(Action::SetActiveDocument("doc-2".into())).state_changed);
    assert_eq!(store.active_document().unwrap().id, "doc-2");
}

#[test]
fn update_content_touches_only_target_document() {
    let mut store = new_store();
    let before = store.snapshot();

    let result = store.dispatch(Action::UpdateDocumentContent {
        id: "doc-3".into(),
        content: "# Changed".to_string(),
    });
    assert!(result.state_changed);

    let after = store.state();
    assert_eq!(after.revision, before.revision + 1);
    for (old, new) in before.data.documents.iter().zip(&after.data.documents) {
        if new.id == "doc-3" {
            assert_eq!(new.content, "# Changed");
            assert!(new.last_modified > old.last_modified);
        } else {
            assert_eq!(old, new);
        }
    }

    // The earlier snapshot is untouched.
    let old_doc = before.data.document(&"doc-3".into()).unwrap();
    assert_eq!(old_doc.content, "# Welcome");
}

#[test]
fn last_modified_advances_past_future_timestamps() {
    let mut data = sample_data();
    let future = SystemTime::now() + Duration::from_secs(3600);
    data.documents[0].last_modified = future;
    let mut store = Store::new(data);

    store.dispatch(Action::UpdateDocumentContent {
        id: "doc-1".into(),
        content: "x".to_string(),
    });

    assert!(store.state().data.documents[0].last_modified > future);
}

#[test]
fn update_unknown_document_is_a_no_op() {
    let mut store = new_store();
    let before = store.snapshot();

    let result = store.dispatch(Action::UpdateDocumentContent {
        id: "doc-404".into(),
        content: "lost".to_string(),
    });

    assert!(!result.state_changed);
    assert!(Arc::ptr_eq(&before, &store.snapshot()));
}

#[test]
fn tree_reflects_renamed_content_without_structural_change() {
    let mut store = new_store();
    let ws = WorkspaceId::new("ws-001");
    let before = store.workspace_tree(&ws);

    store.dispatch(Action::UpdateDocumentContent {
        id: "doc-2".into(),
        content: "new".to_string(),
    });

    assert_eq!(store.workspace_tree(&ws), before);
}

#[test]
fn explorer_rows_follow_active_workspace() {
    let store = new_store();
    let rows = store.explorer_rows();
    assert_eq!(rows.len(), 8);
    assert_eq!(rows[0].kind, TreeItemKind::Folder);
    assert_eq!(rows[2].id, "doc-2");
}

#[test]
fn cycle_workspace_wraps_around() {
    let mut store = two_workspace_store();

    store.dispatch(Action::CycleWorkspace);
    assert_eq!(store.current_workspace().unwrap().id, "ws-001");
    store.dispatch(Action::CycleWorkspace);
    assert_eq!(store.current_workspace().unwrap().id, "ws-002");
    store.dispatch(Action::CycleWorkspace);
    assert_eq!(store.current_workspace().unwrap().id, "ws-001");
}

#[test]
fn cycle_workspace_without_workspaces_is_unchanged() {
    let mut store = Store::new(WorkspaceData::default());
    assert!(!store.dispatch(Action::CycleWorkspace).state_changed);
}

#[test]
fn switching_workspace_resets_selection() {
    let mut store = two_workspace_store();
    store.dispatch(Action::SetActiveWorkspace("ws-001".into()));
    store.dispatch(Action::ExplorerMoveSelection { delta: 3 });
    assert_eq!(store.state().explorer.selected, 3);

    store.dispatch(Action::SetActiveWorkspace("ws-002".into()));
    assert_eq!(store.state().explorer.selected, 0);
}

#[test]
fn explorer_selection_is_clamped_to_rows() {
    let mut store = new_store();

    store.dispatch(Action::ExplorerMoveSelection { delta: 100 });
    assert_eq!(store.state().explorer.selected, 7);
    assert!(
        !store
            .dispatch(Action::ExplorerMoveSelection { delta: 1 })
            .state_changed
    );

    store.dispatch(Action::ExplorerMoveSelection { delta: -100 });
    assert_eq!(store.state().explorer.selected, 0);

    assert!(!store.dispatch(Action::ExplorerSelectRow { row: 8 }).state_changed);
    assert!(store.dispatch(Action::ExplorerSelectRow { row: 5 }).state_changed);
}

#[test]
fn explorer_scroll_keeps_selection_visible() {
    let mut store = new_store();
    store.dispatch(Action::ExplorerSetViewHeight { height: 3 });

    store.dispatch(Action::ExplorerSelectRow { row: 6 });
    assert_eq!(store.state().explorer.scroll_offset, 4);

    store.dispatch(Action::ExplorerSelectRow { row: 1 });
    assert_eq!(store.state().explorer.scroll_offset, 1);
}

#[test]
fn edit_commit_replaces_content() {
    let mut store = new_store();
    assert!(!store.dispatch(Action::EditBegin).state_changed);

    store.dispatch(Action::SetActiveDocument("doc-1".into()));
    assert!(store.dispatch(Action::EditBegin).state_changed);
    assert_eq!(store.state().edit.as_ref().unwrap().buffer, "# Welcome");

    store.dispatch(Action::EditBackspace);
    for ch in "e!".chars() {
        store.dispatch(Action::EditInsert(ch));
    }
    let revision = store.state().revision;
    store.dispatch(Action::EditCommit);

    assert!(store.state().edit.is_none());
    assert_eq!(store.active_document().unwrap().content, "# Welcome!");
    assert_eq!(store.state().revision, revision + 1);
}

#[test]
fn edit_cancel_discards_buffer() {
    let mut store = new_store();
    store.dispatch(Action::SetActiveDocument("doc-1".into()));
    store.dispatch(Action::EditBegin);
    store.dispatch(Action::EditInsert('x'));

    assert!(store.dispatch(Action::EditCancel).state_changed);
    assert!(store.state().edit.is_none());
    assert_eq!(store.active_document().unwrap().content, "# Welcome");
    assert_eq!(store.state().revision, 0);
}

#[test]
fn edit_keys_without_session_are_ignored() {
    let mut store = new_store();
    assert!(!store.dispatch(Action::EditInsert('a')).state_changed);
    assert!(!store.dispatch(Action::EditBackspace).state_changed);
    assert!(!store.dispatch(Action::EditCommit).state_changed);
    assert!(!store.dispatch(Action::EditCancel).state_changed);
}

#[test]
fn store_with_state_keeps_given_state() {
    let mut state = AppState::new(sample_data());
    state.active_document_id = Some("doc-4".into());
    let store = Store::with_state(state);
    assert_eq!(store.active_document().unwrap().id, "doc-4");
}

#[test]
fn explicit_trace_receives_levels() {
    struct Count(usize);
    impl TreeTrace for Count {
        fn level(&mut self, _: Option<&crate::models::FolderId>, _: u16, _: &[WorkspaceTreeItem]) {
            self.0 += 1;
        }
    }

    let store = new_store().with_tree_trace(true);
    let mut count = Count(0);
    store.workspace_tree_with(&"ws-001".into(), &mut count);
    assert_eq!(count.0, 5);
}

#[test]
fn documents_do_not_start_at_epoch() {
    let store = new_store();
    assert!(store
        .state()
        .data
        .documents
        .iter()
        .all(|doc| doc.last_modified > UNIX_EPOCH));
}

fn cached_row_count(store: &Store) -> Option<(&str, u64, usize)> {
    store
        .row_count
        .as_ref()
        .map(|cached| (cached.workspace_id.as_str(), cached.revision, cached.count))
}

#[test]
fn explorer_row_count_is_cached_per_revision() {
    let mut store = new_store();
    assert_eq!(cached_row_count(&store), None);

    store.dispatch(Action::ExplorerMoveSelection { delta: 1 });
    assert_eq!(cached_row_count(&store), Some(("ws-001", 0, 8)));

    store.dispatch(Action::UpdateDocumentContent {
        id: "doc-1".into(),
        content: "x".to_string(),
    });
    store.dispatch(Action::ExplorerSelectRow { row: 4 });
    assert_eq!(cached_row_count(&store), Some(("ws-001", 1, 8)));
}

#[test]
fn explorer_row_count_follows_workspace_switch() {
    let mut store = new_store();
    store.dispatch(Action::ExplorerMoveSelection { delta: 1 });

    store.dispatch(Action::SetActiveWorkspace("ws-404".into()));
    assert!(
        !store
            .dispatch(Action::ExplorerMoveSelection { delta: 1 })
            .state_changed
    );
    assert_eq!(cached_row_count(&store), Some(("ws-404", 0, 0)));
}
