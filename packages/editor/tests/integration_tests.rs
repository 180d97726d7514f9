//! Integration tests for editor crate

use chrono::{Duration, Utc};
use schemaform_editor::{
    Clipboard, ClipboardError, ChangeOrigin, Document, EditSession, EditorOptions, FileStore,
    MemoryStore, Mutation, NoticeLevel, RecordStore, StorageRecord, SyncOutcome, TransferError,
    STORAGE_KEY,
};
use schemaform_schema::{SchemaPath, SchemaType};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

/// Clipboard the test can inspect after handing it to a session
#[derive(Clone, Default)]
struct SharedClipboard(Rc<RefCell<Option<String>>>);

impl SharedClipboard {
    fn with_text(text: &str) -> Self {
        Self(Rc::new(RefCell::new(Some(text.to_string()))))
    }

    fn contents(&self) -> Option<String> {
        self.0.borrow().clone()
    }
}

impl Clipboard for SharedClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        self.0.borrow().clone().ok_or(ClipboardError::Empty)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        *self.0.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

fn session_with(clipboard: &SharedClipboard) -> EditSession {
    EditSession::new(
        EditorOptions::default(),
        Box::new(MemoryStore::new()),
        Box::new(clipboard.clone()),
    )
}

fn add(name: &str, schema_type: SchemaType) -> Mutation {
    Mutation::AddProperty {
        path: SchemaPath::root(),
        name: Some(name.to_string()),
        schema_type,
    }
}

#[test]
fn test_document_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("person.json");
    std::fs::write(&path, r#"{"type": "object", "properties": {}}"#).unwrap();

    let mut doc = Document::load(&path, EditorOptions::default()).unwrap();
    assert_eq!(doc.version(), 0);
    assert!(!doc.is_dirty());
    assert_eq!(doc.path(), Some(path.as_path()));

    doc.apply(&add("email", SchemaType::String)).unwrap();
    assert!(doc.is_dirty());

    doc.save().unwrap();
    assert!(!doc.is_dirty());

    let reloaded = Document::load(&path, EditorOptions::default()).unwrap();
    assert_eq!(reloaded.root(), doc.root());
    assert_eq!(reloaded.text(), doc.text());
}

#[test]
fn test_memory_document_cannot_save() {
    let mut doc = Document::default();
    assert!(doc.save().is_err());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.json");
    doc.save_as(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), doc.text());
}

#[test]
fn test_edit_session_workflow() {
    let mut session = EditSession::in_memory(EditorOptions::default());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    session.on_change(move |event| sink.borrow_mut().push(event.origin));

    session.apply(&add("name", SchemaType::String)).unwrap();
    let outcome = session.set_text(r#"{"type": "object", "properties": {"id": {"type": "integer"}}}"#);
    assert!(outcome.is_synced());
    assert!(session.undo());
    assert!(session.redo());

    assert_eq!(
        *events.borrow(),
        vec![
            ChangeOrigin::Tree,
            ChangeOrigin::Text,
            ChangeOrigin::Undo,
            ChangeOrigin::Redo
        ]
    );
    assert_eq!(
        session.document().root().to_value()["properties"],
        json!({"id": {"type": "integer"}})
    );
}

fn root_keys(session: &EditSession) -> Vec<String> {
    session
        .document()
        .root()
        .as_object()
        .map(|object| object.properties.keys().cloned().collect())
        .unwrap_or_default()
}

#[test]
fn test_sort_is_undoable() {
    let mut session = EditSession::in_memory(EditorOptions::default());
    session.set_text(
        r#"{"type": "object", "properties": {"a": {"type": "string"}, "b": {"type": "string"}, "c": {"type": "string"}}}"#,
    );
    assert_eq!(session.undo_stack().undo_levels(), 1);

    let result = session
        .apply(&Mutation::SortProperty {
            parent: SchemaPath::root(),
            key: "a".to_string(),
            target: "c".to_string(),
            position: schemaform_editor::DropPosition::After,
        })
        .unwrap();
    assert!(result.changed());
    assert_eq!(session.undo_stack().undo_levels(), 2);
    assert_eq!(root_keys(&session), vec!["b", "c", "a"]);

    assert!(session.undo());
    assert_eq!(root_keys(&session), vec!["a", "b", "c"]);
    assert!(session.redo());
    assert_eq!(root_keys(&session), vec!["b", "c", "a"]);
}

#[test]
fn test_reordering_text_is_recorded() {
    let mut session = EditSession::in_memory(EditorOptions::default());
    session.set_text(r#"{"type": "object", "properties": {"a": {"type": "string"}, "b": {"type": "string"}}}"#);
    session.set_text(r#"{"type": "object", "properties": {"b": {"type": "string"}, "a": {"type": "string"}}}"#);
    assert_eq!(session.undo_stack().undo_levels(), 2);

    assert!(session.undo());
    assert_eq!(root_keys(&session), vec!["a", "b"]);
}

#[test]
fn test_text_errors_keep_last_good_tree() {
    let mut session = EditSession::in_memory(EditorOptions::default());
    session.apply(&add("name", SchemaType::String)).unwrap();
    let tree = session.document().root().clone();

    let outcome = session.set_text("{\"type\": \"object\",");
    assert!(matches!(outcome, SyncOutcome::ParseFailed(_)));
    assert_eq!(session.document().root(), &tree);
    assert_eq!(session.document().text(), "{\"type\": \"object\",");

    let notices = session.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);

    // Fixing the text brings the tree back in sync
    let outcome = session.set_text(r#"{"type": "string"}"#);
    assert!(outcome.is_synced());
    assert_eq!(session.document().root().schema_type(), SchemaType::String);
}

#[test]
fn test_copy_writes_raw_text() {
    let clipboard = SharedClipboard::default();
    let mut session = session_with(&clipboard);
    session.set_text("{ \"type\":   \"string\" }");

    session.copy().unwrap();
    assert_eq!(
        clipboard.contents().as_deref(),
        Some("{ \"type\":   \"string\" }")
    );
    assert_eq!(session.take_notices()[0].level, NoticeLevel::Success);
}

#[test]
fn test_copy_sample() {
    let clipboard = SharedClipboard::default();
    let mut session = session_with(&clipboard);
    session.set_text(
        r#"{"type": "object", "properties": {"n": {"type": "integer"}, "s": {"type": "string"}}}"#,
    );

    let sample = session.copy_sample().unwrap();
    assert_eq!(sample, json!({"n": 42, "s": "example string"}));

    let copied: serde_json::Value =
        serde_json::from_str(&clipboard.contents().unwrap()).unwrap();
    assert_eq!(copied, sample);
}

#[test]
fn test_paste_replaces_text() {
    let clipboard = SharedClipboard::with_text(r#"{"type": "boolean"}"#);
    let mut session = session_with(&clipboard);

    let outcome = session.paste().unwrap();
    assert!(outcome.is_synced());
    assert_eq!(session.document().root().schema_type(), SchemaType::Boolean);
    assert_eq!(session.undo_stack().undo_description(), Some("Paste schema"));
}

#[test]
fn test_paste_unparsable_text() {
    let clipboard = SharedClipboard::with_text("not json at all");
    let mut session = session_with(&clipboard);
    let tree = session.document().root().clone();

    let outcome = session.paste().unwrap();
    assert!(matches!(outcome, SyncOutcome::ParseFailed(_)));
    assert_eq!(session.document().root(), &tree);
    assert!(session
        .notices()
        .iter()
        .any(|notice| notice.level == NoticeLevel::Error));
}

#[test]
fn test_export_then_import() {
    let dir = tempfile::tempdir().unwrap();
    let mut first = EditSession::in_memory(EditorOptions::default());
    first.apply(&add("title", SchemaType::String)).unwrap();

    let path = first.export_to(dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "schema.json");

    let mut second = EditSession::in_memory(EditorOptions::default());
    let outcome = second.import(&path).unwrap();
    assert!(outcome.is_synced());
    assert_eq!(second.document().root(), first.document().root());
    assert_eq!(second.document().text(), first.document().text());
}

#[test]
fn test_import_rejects_bad_files_without_changes() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = EditSession::in_memory(EditorOptions::default());
    let text = session.document().text().to_string();

    let wrong_extension = dir.path().join("schema.yaml");
    std::fs::write(&wrong_extension, "type: object").unwrap();
    assert!(matches!(
        session.import(&wrong_extension),
        Err(TransferError::UnsupportedExtension(_))
    ));

    let not_a_schema = dir.path().join("date.json");
    std::fs::write(&not_a_schema, r#"{"type": "date"}"#).unwrap();
    assert!(matches!(
        session.import(&not_a_schema),
        Err(TransferError::Schema(_))
    ));

    assert_eq!(session.document().text(), text);
    assert_eq!(session.take_notices().len(), 2);
}

#[test]
fn test_autosave_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let options = EditorOptions {
        autosave_debounce_ms: 60_000,
        ..EditorOptions::default()
    };
    let mut session = EditSession::new(
        options,
        Box::new(FileStore::new(dir.path())),
        Box::new(SharedClipboard::default()),
    );

    session.apply(&add("name", SchemaType::String)).unwrap();
    assert!(session.autosaver().is_pending());

    let now = Utc::now();
    assert!(session.tick(now).is_none());

    let later = now + Duration::seconds(61);
    let record = session.tick(later).unwrap();
    assert_eq!(record.json_schema_text, session.document().text());
    assert_eq!(record.last_modified, later.timestamp_millis());
    assert!(!session.autosaver().is_pending());

    let stored = FileStore::new(dir.path()).load(STORAGE_KEY).unwrap().unwrap();
    assert_eq!(stored, record);
    let raw = std::fs::read_to_string(dir.path().join("schemaform.autosave.json")).unwrap();
    assert!(raw.contains("\"jsonSchemaText\""));
    assert!(raw.contains("\"lastModified\""));
}

#[test]
fn test_flush_ignores_debounce() {
    let mut session = EditSession::in_memory(EditorOptions::default());
    assert!(session.flush(Utc::now()).is_none());

    session.apply(&add("name", SchemaType::String)).unwrap();
    let record = session.flush(Utc::now()).unwrap();
    assert_eq!(
        session.store().load(STORAGE_KEY).unwrap(),
        Some(record)
    );
}

#[test]
fn test_restore_from_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    let saved = r#"{"type": "object", "properties": {"restored": {"type": "string"}}}"#;
    store
        .save(STORAGE_KEY, &StorageRecord::new(saved, Utc::now()))
        .unwrap();

    let mut session = EditSession::new(
        EditorOptions::default(),
        Box::new(store),
        Box::new(SharedClipboard::default()),
    );
    assert!(session.restore());
    assert_eq!(session.document().text(), saved);
    assert!(!session.undo_stack().can_undo());
    assert!(!session.autosaver().is_pending());
}

#[test]
fn test_restore_reports_unreadable_record() {
    let mut store = MemoryStore::new();
    store
        .save(STORAGE_KEY, &StorageRecord::new("{\"type\": ", Utc::now()))
        .unwrap();

    let mut session = EditSession::new(
        EditorOptions::default(),
        Box::new(store),
        Box::new(SharedClipboard::default()),
    );
    let root = session.document().root().clone();

    assert!(!session.restore());
    assert_eq!(session.document().root(), &root);
    let notices = session.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
}

#[test]
fn test_restore_ignores_default_and_blank_records() {
    let options = EditorOptions::default();
    for text in [Document::default_text(&options), "   ".to_string()] {
        let mut store = MemoryStore::new();
        store
            .save(STORAGE_KEY, &StorageRecord::new(text, Utc::now()))
            .unwrap();

        let mut session = EditSession::new(
            options.clone(),
            Box::new(store),
            Box::new(SharedClipboard::default()),
        );
        assert!(!session.restore());
        assert_eq!(session.document().version(), 0);
    }
}

#[test]
fn test_external_updates() {
    let mut session = EditSession::in_memory(EditorOptions::default());
    session.apply(&add("mine", SchemaType::String)).unwrap();
    let saved = session.flush(Utc::now()).unwrap();

    // Older than what this session wrote
    let stale = StorageRecord {
        json_schema_text: r#"{"type": "string"}"#.to_string(),
        last_modified: saved.last_modified - 1,
    };
    assert!(!session.apply_external(stale));

    // Same text, nothing to do
    let echo = StorageRecord {
        json_schema_text: saved.json_schema_text.clone(),
        last_modified: saved.last_modified + 1,
    };
    assert!(!session.apply_external(echo));

    let theirs = StorageRecord {
        json_schema_text: r#"{"type": "object", "properties": {"theirs": {"type": "number"}}}"#
            .to_string(),
        last_modified: saved.last_modified + 5,
    };
    assert!(session.apply_external(theirs.clone()));
    assert_eq!(session.document().text(), theirs.json_schema_text);
    assert!(!session.autosaver().is_pending());
    assert_eq!(session.autosaver().last_saved(), Some(theirs.last_modified));
}

#[test]
fn test_reload_from_shared_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut other_window = FileStore::new(dir.path());
    let mut session = EditSession::new(
        EditorOptions::default(),
        Box::new(FileStore::new(dir.path())),
        Box::new(SharedClipboard::default()),
    );

    assert!(!session.reload_from_store());

    let text = r#"{"type": "integer"}"#;
    other_window
        .save(STORAGE_KEY, &StorageRecord::new(text, Utc::now()))
        .unwrap();
    assert!(session.reload_from_store());
    assert_eq!(session.document().root().schema_type(), SchemaType::Integer);

    // Seen already
    assert!(!session.reload_from_store());
}

#[test]
fn test_hover_without_drag_raises_notice() {
    let mut session = EditSession::in_memory(EditorOptions::default());
    let intent = session.hover_drag(
        &SchemaPath::from_keys(["a"]),
        20.0,
        schemaform_editor::Bounds::new(0.0, 40.0),
    );
    assert_eq!(intent, None);

    let notices = session.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "No drag in progress");
}

#[test]
fn test_drag_through_session() {
    let mut session = EditSession::in_memory(EditorOptions::default());
    session.set_text(
        r#"{"type": "object", "properties": {"a": {"type": "string"}, "b": {"type": "object", "properties": {}}}}"#,
    );

    session.start_drag(SchemaPath::from_keys(["a"])).unwrap();
    let intent = session.hover_drag(
        &SchemaPath::from_keys(["b"]),
        20.0,
        schemaform_editor::Bounds::new(0.0, 40.0),
    );
    assert_eq!(intent, Some(schemaform_editor::DropIntent::Nest));
    session.drop_drag().unwrap();

    assert_eq!(
        session.document().root().to_value()["properties"],
        json!({"b": {"type": "object", "properties": {"a": {"type": "string"}}}})
    );
    assert_eq!(
        session.undo_stack().undo_description(),
        Some("Move 'a' into /properties/b")
    );

    assert!(session.undo());
    assert_eq!(
        session
            .document()
            .root()
            .as_object()
            .unwrap()
            .properties
            .keys()
            .collect::<Vec<_>>(),
        vec!["a", "b"]
    );
}
