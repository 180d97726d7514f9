mod host;

use chrono::{DateTime, TimeZone, Utc};
use host::{parse_record, HostClipboard, LocalStorageStore};
use schemaform_editor::{
    Bounds, DropIntent, DropPosition, EditSession, EditorOptions, Field, MemoryStore, Mutation,
    MutationOutcome, RecordStore, SyncOutcome, EXPORT_FILENAME, EXPORT_MIME, STORAGE_KEY,
};
use schemaform_schema::{generate_sample, parse, parse_schema, SchemaPath, SchemaType};
use schemaform_validator::{validate, ValidatorOptions};
use serde_json::{json, Value};
use std::fmt::Display;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn pointer(pointer: &str) -> Result<SchemaPath, JsValue> {
    pointer.parse().map_err(js_error)
}

fn schema_type(name: &str) -> Result<SchemaType, JsValue> {
    name.parse().map_err(js_error)
}

fn timestamp(now_ms: f64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(now_ms as i64)
        .single()
        .unwrap_or_else(Utc::now)
}

fn outcome_json(outcome: &SyncOutcome) -> String {
    let value = match outcome {
        SyncOutcome::Synced(report) => json!({
            "status": "synced",
            "valid": report.valid,
            "errors": report.errors,
            "warnings": report.warnings,
        }),
        SyncOutcome::ParseFailed(err) => json!({
            "status": "parseFailed",
            "error": err.to_string(),
            "line": err.line,
            "column": err.column,
        }),
        SyncOutcome::Rejected(report) => json!({
            "status": "rejected",
            "valid": false,
            "errors": report.errors,
            "warnings": report.warnings,
        }),
    };
    value.to_string()
}

fn pointers(paths: &[SchemaPath]) -> String {
    let pointers: Vec<String> = paths.iter().map(ToString::to_string).collect();
    json!(pointers).to_string()
}

/// One editor instance: a schema document with undo, drag-and-drop,
/// clipboard exchange and autosave to `localStorage`
#[wasm_bindgen]
pub struct SchemaEditor {
    session: EditSession,
    clipboard: HostClipboard,
}

#[wasm_bindgen]
impl SchemaEditor {
    /// Editor backed by `localStorage`, restoring the autosaved schema
    #[wasm_bindgen(constructor)]
    pub fn new() -> SchemaEditor {
        let store: Box<dyn RecordStore> = match LocalStorageStore::from_window() {
            Some(store) => Box::new(store),
            None => Box::new(MemoryStore::new()),
        };
        let mut editor = Self::with_store(store);
        editor.session.restore();
        editor
    }

    /// Editor that keeps its autosave record in memory
    #[wasm_bindgen(js_name = inMemory)]
    pub fn in_memory() -> SchemaEditor {
        Self::with_store(Box::new(MemoryStore::new()))
    }

    fn with_store(store: Box<dyn RecordStore>) -> SchemaEditor {
        let clipboard = HostClipboard::default();
        let session = EditSession::new(
            EditorOptions::default(),
            store,
            Box::new(clipboard.clone()),
        );
        SchemaEditor { session, clipboard }
    }

    pub fn text(&self) -> String {
        self.session.document().text().to_string()
    }

    /// Replace the raw text; returns the sync outcome as JSON
    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&mut self, text: String) -> String {
        outcome_json(&self.session.set_text(text))
    }

    /// The tree as schema JSON
    pub fn tree(&self) -> String {
        self.session.document().root().to_value().to_string()
    }

    /// Latest validation report as JSON
    pub fn report(&self) -> String {
        serde_json::to_string(self.session.document().report()).unwrap_or_default()
    }

    pub fn version(&self) -> f64 {
        self.session.document().version() as f64
    }

    #[wasm_bindgen(js_name = lastError)]
    pub fn last_error(&self) -> Option<String> {
        self.session
            .document()
            .last_error()
            .map(|err| err.to_string())
    }

    /// Apply a serialized mutation; returns the new version
    pub fn apply(&mut self, mutation: &str) -> Result<f64, JsValue> {
        let mutation: Mutation = serde_json::from_str(mutation).map_err(js_error)?;
        let result = self.session.apply(&mutation).map_err(js_error)?;
        Ok(result.version as f64)
    }

    fn run(&mut self, mutation: Mutation) -> Result<Option<String>, JsValue> {
        let result = self.session.apply(&mutation).map_err(js_error)?;
        Ok(match result.outcome {
            MutationOutcome::Applied { path } => Some(path.to_string()),
            MutationOutcome::Unchanged => None,
        })
    }

    /// Add a property; returns the pointer of the new node
    #[wasm_bindgen(js_name = addProperty)]
    pub fn add_property(
        &mut self,
        parent: &str,
        name: Option<String>,
        schema_type: &str,
    ) -> Result<Option<String>, JsValue> {
        self.run(Mutation::AddProperty {
            path: pointer(parent)?,
            name,
            schema_type: self::schema_type(schema_type)?,
        })
    }

    #[wasm_bindgen(js_name = removeProperty)]
    pub fn remove_property(&mut self, parent: &str, name: String) -> Result<Option<String>, JsValue> {
        self.run(Mutation::RemoveProperty {
            path: pointer(parent)?,
            name,
        })
    }

    #[wasm_bindgen(js_name = renameProperty)]
    pub fn rename_property(
        &mut self,
        parent: &str,
        from: String,
        to: String,
    ) -> Result<Option<String>, JsValue> {
        self.run(Mutation::RenameProperty {
            path: pointer(parent)?,
            from,
            to,
        })
    }

    #[wasm_bindgen(js_name = setRequired)]
    pub fn set_required(
        &mut self,
        parent: &str,
        name: String,
        required: bool,
    ) -> Result<Option<String>, JsValue> {
        self.run(Mutation::SetRequired {
            path: pointer(parent)?,
            name,
            required,
        })
    }

    /// Set a keyword from a JSON literal; `null` or no value clears it
    #[wasm_bindgen(js_name = setField)]
    pub fn set_field(
        &mut self,
        path: &str,
        field: &str,
        value: Option<String>,
    ) -> Result<Option<String>, JsValue> {
        let field: Field = field.parse().map_err(js_error)?;
        let value = value.map(|raw| {
            serde_json::from_str::<Value>(&raw).unwrap_or(Value::String(raw))
        });
        self.run(Mutation::SetField {
            path: pointer(path)?,
            field,
            value,
        })
    }

    #[wasm_bindgen(js_name = changeType)]
    pub fn change_type(&mut self, path: &str, schema_type: &str) -> Result<Option<String>, JsValue> {
        self.run(Mutation::ChangeType {
            path: pointer(path)?,
            schema_type: self::schema_type(schema_type)?,
        })
    }

    #[wasm_bindgen(js_name = setItemType)]
    pub fn set_item_type(&mut self, path: &str, schema_type: &str) -> Result<Option<String>, JsValue> {
        self.run(Mutation::SetItemType {
            path: pointer(path)?,
            schema_type: self::schema_type(schema_type)?,
        })
    }

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.session.undo_stack().can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.session.undo_stack().can_redo()
    }

    #[wasm_bindgen(js_name = startDrag)]
    pub fn start_drag(&mut self, path: &str) -> Result<(), JsValue> {
        let path = pointer(path)?;
        self.session.start_drag(path).map_err(js_error)
    }

    /// Classify the cursor over a target row: "before", "after", "nest" or none
    #[wasm_bindgen(js_name = hoverDrag)]
    pub fn hover_drag(
        &mut self,
        target: &str,
        cursor_y: f64,
        top: f64,
        height: f64,
    ) -> Result<Option<String>, JsValue> {
        let target = pointer(target)?;
        let intent = self
            .session
            .hover_drag(&target, cursor_y, Bounds::new(top, height));
        Ok(intent.map(|intent| {
            let name = match intent {
                DropIntent::Sort(DropPosition::Before) => "before",
                DropIntent::Sort(DropPosition::After) => "after",
                DropIntent::Nest => "nest",
            };
            name.to_string()
        }))
    }

    #[wasm_bindgen(js_name = leaveDrag)]
    pub fn leave_drag(&mut self) {
        self.session.leave_drag();
    }

    #[wasm_bindgen(js_name = cancelDrag)]
    pub fn cancel_drag(&mut self) -> bool {
        self.session.cancel_drag()
    }

    /// Finish the drag; returns the moved node's pointer if the tree changed
    #[wasm_bindgen(js_name = dropDrag)]
    pub fn drop_drag(&mut self) -> Result<Option<String>, JsValue> {
        let result = self.session.drop_drag().map_err(js_error)?;
        Ok(match result.outcome {
            MutationOutcome::Applied { path } => Some(path.to_string()),
            MutationOutcome::Unchanged => None,
        })
    }

    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.session.drag().is_dragging()
    }

    /// Pointers of the objects the dragged property may be nested into
    #[wasm_bindgen(js_name = nestTargets)]
    pub fn nest_targets(&self) -> String {
        self.session
            .drag()
            .state()
            .map(|state| pointers(&state.nest_targets))
            .unwrap_or_else(|| "[]".to_string())
    }

    #[wasm_bindgen(js_name = sortTargets)]
    pub fn sort_targets(&self) -> String {
        self.session
            .drag()
            .state()
            .map(|state| pointers(&state.sort_targets))
            .unwrap_or_else(|| "[]".to_string())
    }

    /// Why the hovered target refuses the drop
    #[wasm_bindgen(js_name = dragRefusal)]
    pub fn drag_refusal(&self) -> Option<String> {
        self.session
            .drag()
            .state()
            .and_then(|state| state.refusal())
            .map(|err| err.to_string())
    }

    /// Raw text for the page to place on the clipboard
    pub fn copy(&mut self) -> Result<String, JsValue> {
        self.session.copy().map_err(js_error)?;
        Ok(self.clipboard.take().unwrap_or_default())
    }

    /// Take text the page read from the clipboard
    pub fn paste(&mut self, text: String) -> Result<String, JsValue> {
        self.clipboard.set(text);
        let outcome = self.session.paste().map_err(js_error)?;
        self.clipboard.take();
        Ok(outcome_json(&outcome))
    }

    /// Pretty-printed sample data for the page to place on the clipboard
    #[wasm_bindgen(js_name = copySample)]
    pub fn copy_sample(&mut self) -> Result<String, JsValue> {
        self.session.copy_sample().map_err(js_error)?;
        Ok(self.clipboard.take().unwrap_or_default())
    }

    /// Contents of the download file
    #[wasm_bindgen(js_name = exportFile)]
    pub fn export_file(&self) -> String {
        self.session.export().contents
    }

    /// Import a file the page read; `name` must end in `.json`
    #[wasm_bindgen(js_name = importFile)]
    pub fn import_file(&mut self, name: &str, text: String) -> Result<String, JsValue> {
        let outcome = self.session.import_text(name, text).map_err(js_error)?;
        Ok(outcome_json(&outcome))
    }

    /// Poll the autosaver; true if a record was written
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.session.tick(timestamp(now_ms)).is_some()
    }

    pub fn flush(&mut self, now_ms: f64) -> bool {
        self.session.flush(timestamp(now_ms)).is_some()
    }

    /// Handle a `storage` event carrying another tab's record
    #[wasm_bindgen(js_name = applyExternal)]
    pub fn apply_external(&mut self, record: &str) -> Result<bool, JsValue> {
        let record = parse_record(STORAGE_KEY, record).map_err(js_error)?;
        Ok(self.session.apply_external(record))
    }

    /// Drain queued notices as a JSON array
    pub fn notices(&mut self) -> String {
        serde_json::to_string(&self.session.take_notices()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Call `callback` with a JSON change event after every change
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&mut self, callback: js_sys::Function) {
        self.session.on_change(move |event| {
            let payload = serde_json::to_string(event).unwrap_or_default();
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&payload));
        });
    }
}

impl Default for SchemaEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(js_name = exportFilename)]
pub fn export_filename() -> String {
    EXPORT_FILENAME.to_string()
}

#[wasm_bindgen(js_name = exportMime)]
pub fn export_mime() -> String {
    EXPORT_MIME.to_string()
}

#[wasm_bindgen(js_name = storageKey)]
pub fn storage_key() -> String {
    STORAGE_KEY.to_string()
}

/// Validate schema text without an editor; returns the report as JSON
#[wasm_bindgen(js_name = validateSchema)]
pub fn validate_schema(text: &str) -> String {
    match parse(text) {
        Ok(value) => serde_json::to_string(&validate(&value, ValidatorOptions::default()))
            .unwrap_or_default(),
        Err(err) => json!({
            "valid": false,
            "errors": [err.to_string()],
            "warnings": [],
        })
        .to_string(),
    }
}

/// Example data for schema text
#[wasm_bindgen(js_name = generateSample)]
pub fn generate_sample_js(text: &str) -> Result<String, JsValue> {
    let root = parse_schema(text).map_err(js_error)?;
    serde_json::to_string_pretty(&generate_sample(&root)).map_err(js_error)
}
