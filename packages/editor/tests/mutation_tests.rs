//! Comprehensive mutation tests

use schemaform_editor::{Document, EditorOptions, Field, Mutation, MutationError, MutationOutcome};
use schemaform_schema::{SchemaPath, SchemaType};
use serde_json::json;

fn doc(source: &str) -> Document {
    Document::from_text(source, EditorOptions::default()).unwrap()
}

fn keys(doc: &Document, path: &SchemaPath) -> Vec<String> {
    doc.root()
        .node_at(path)
        .and_then(|node| node.as_object())
        .map(|object| object.properties.keys().cloned().collect())
        .unwrap_or_default()
}

fn value(doc: &Document) -> serde_json::Value {
    doc.root().to_value()
}

const PERSON: &str = r#"{
    "type": "object",
    "properties": {
        "name": {"type": "string"},
        "age": {"type": "integer"},
        "address": {
            "type": "object",
            "properties": {
                "street": {"type": "string"},
                "geo": {"type": "object", "properties": {"lat": {"type": "number"}}}
            },
            "required": ["street"]
        }
    },
    "required": ["name", "address"]
}"#;

#[test]
fn test_add_unnamed_properties_get_unique_keys() {
    let mut doc = doc(r#"{"type": "object", "properties": {}}"#);

    for _ in 0..4 {
        doc.apply(&Mutation::AddProperty {
            path: SchemaPath::root(),
            name: None,
            schema_type: SchemaType::String,
        })
        .unwrap();
    }

    assert_eq!(
        keys(&doc, &SchemaPath::root()),
        vec!["newProperty", "newProperty1", "newProperty2", "newProperty3"]
    );
}

#[test]
fn test_add_property_uses_default_shape() {
    let mut doc = doc(r#"{"type": "object", "properties": {}}"#);

    let result = doc
        .apply(&Mutation::AddProperty {
            path: SchemaPath::root(),
            name: Some("tags".to_string()),
            schema_type: SchemaType::Array,
        })
        .unwrap();

    assert_eq!(
        result.outcome,
        MutationOutcome::Applied {
            path: SchemaPath::from_keys(["tags"])
        }
    );
    assert_eq!(
        value(&doc)["properties"]["tags"],
        json!({"type": "array", "items": {"type": "string"}})
    );
}

#[test]
fn test_add_named_property_collision_refused() {
    let mut doc = doc(PERSON);
    let before = doc.text().to_string();

    let err = doc
        .apply(&Mutation::AddProperty {
            path: SchemaPath::root(),
            name: Some("name".to_string()),
            schema_type: SchemaType::Boolean,
        })
        .unwrap_err();

    assert!(matches!(err, MutationError::PropertyExists { .. }));
    assert_eq!(doc.text(), before);
}

#[test]
fn test_remove_property_strips_required() {
    let mut doc = doc(PERSON);

    doc.apply(&Mutation::RemoveProperty {
        path: SchemaPath::root(),
        name: "name".to_string(),
    })
    .unwrap();

    assert_eq!(keys(&doc, &SchemaPath::root()), vec!["age", "address"]);
    assert_eq!(value(&doc)["required"], json!(["address"]));
}

#[test]
fn test_rename_to_existing_name_is_noop() {
    let mut doc = doc(PERSON);
    let text = doc.text().to_string();
    let version = doc.version();

    let result = doc
        .apply(&Mutation::RenameProperty {
            path: SchemaPath::root(),
            from: "name".to_string(),
            to: "age".to_string(),
        })
        .unwrap();

    assert_eq!(result.outcome, MutationOutcome::Unchanged);
    assert_eq!(doc.text(), text);
    assert_eq!(doc.version(), version);
}

#[test]
fn test_rename_updates_required_in_place() {
    let mut doc = doc(PERSON);

    doc.apply(&Mutation::RenameProperty {
        path: SchemaPath::root(),
        from: "name".to_string(),
        to: "fullName".to_string(),
    })
    .unwrap();

    assert_eq!(
        keys(&doc, &SchemaPath::root()),
        vec!["fullName", "age", "address"]
    );
    assert_eq!(value(&doc)["required"], json!(["fullName", "address"]));
}

#[test]
fn test_rename_to_empty_refused() {
    let mut doc = doc(PERSON);
    let err = doc
        .apply(&Mutation::RenameProperty {
            path: SchemaPath::root(),
            from: "name".to_string(),
            to: "  ".to_string(),
        })
        .unwrap_err();
    assert_eq!(err, MutationError::EmptyName);
}

#[test]
fn test_toggle_required() {
    let mut doc = doc(PERSON);

    doc.apply(&Mutation::SetRequired {
        path: SchemaPath::root(),
        name: "age".to_string(),
        required: true,
    })
    .unwrap();
    assert_eq!(value(&doc)["required"], json!(["name", "address", "age"]));

    doc.apply(&Mutation::SetRequired {
        path: SchemaPath::root(),
        name: "name".to_string(),
        required: false,
    })
    .unwrap();
    assert_eq!(value(&doc)["required"], json!(["address", "age"]));

    let again = doc
        .apply(&Mutation::SetRequired {
            path: SchemaPath::root(),
            name: "age".to_string(),
            required: true,
        })
        .unwrap();
    assert_eq!(again.outcome, MutationOutcome::Unchanged);
}

#[test]
fn test_set_item_type_replaces_items() {
    let mut doc = doc(
        r#"{"type": "array", "items": {"type": "string", "minLength": 3, "title": "Tag"}}"#,
    );

    doc.apply(&Mutation::SetItemType {
        path: SchemaPath::root(),
        schema_type: SchemaType::Object,
    })
    .unwrap();

    assert_eq!(
        value(&doc),
        json!({"type": "array", "items": {"type": "object", "properties": {}}})
    );
}

#[test]
fn test_item_field_edit_through_items_segment() {
    let mut doc = doc(r#"{"type": "array", "items": {"type": "string"}}"#);

    doc.apply(&Mutation::SetField {
        path: SchemaPath::root().items(),
        field: Field::MaxLength,
        value: Some(json!(12)),
    })
    .unwrap();

    assert_eq!(value(&doc)["items"], json!({"type": "string", "maxLength": 12}));
}

#[test]
fn test_change_type_policy() {
    let mut doc = doc(
        r#"{"type": "object", "properties": {"count": {"type": "string", "title": "Count", "description": "How many", "default": "12", "minLength": 1}}}"#,
    );
    let path = SchemaPath::from_keys(["count"]);

    doc.apply(&Mutation::ChangeType {
        path: path.clone(),
        schema_type: SchemaType::Integer,
    })
    .unwrap();
    assert_eq!(
        value(&doc)["properties"]["count"],
        json!({"type": "integer", "title": "Count", "description": "How many", "default": 12})
    );

    doc.apply(&Mutation::ChangeType {
        path: path.clone(),
        schema_type: SchemaType::Array,
    })
    .unwrap();
    assert_eq!(
        value(&doc)["properties"]["count"],
        json!({"type": "array", "title": "Count", "description": "How many", "items": {"type": "string"}, "default": []})
    );
}

#[test]
fn test_change_type_discards_children() {
    let mut doc = doc(PERSON);
    doc.apply(&Mutation::ChangeType {
        path: SchemaPath::from_keys(["address"]),
        schema_type: SchemaType::String,
    })
    .unwrap();

    assert_eq!(value(&doc)["properties"]["address"], json!({"type": "string"}));
    assert!(doc
        .root()
        .node_at(&SchemaPath::from_keys(["address", "street"]))
        .is_none());
}

#[test]
fn test_set_field_on_missing_node() {
    let mut doc = doc(PERSON);
    let err = doc
        .apply(&Mutation::SetField {
            path: SchemaPath::from_keys(["nope"]),
            field: Field::Title,
            value: Some(json!("x")),
        })
        .unwrap_err();
    assert_eq!(err, MutationError::NodeNotFound(SchemaPath::from_keys(["nope"])));
}

#[test]
fn test_nest_collision_gets_numeric_suffix() {
    let mut doc = doc(
        r#"{
            "type": "object",
            "properties": {
                "id": {"type": "string"},
                "child": {"type": "object", "properties": {"id": {"type": "integer"}, "id_1": {"type": "integer"}}}
            }
        }"#,
    );

    let result = doc
        .apply(&Mutation::NestProperty {
            from: SchemaPath::root(),
            key: "id".to_string(),
            to: SchemaPath::from_keys(["child"]),
        })
        .unwrap();

    assert_eq!(
        result.outcome,
        MutationOutcome::Applied {
            path: SchemaPath::from_keys(["child", "id_2"])
        }
    );
    assert_eq!(
        keys(&doc, &SchemaPath::from_keys(["child"])),
        vec!["id", "id_1", "id_2"]
    );
    assert_eq!(
        value(&doc)["properties"]["child"]["properties"]["id"],
        json!({"type": "integer"})
    );
}

#[test]
fn test_nest_prunes_source_required() {
    let mut doc = doc(PERSON);

    doc.apply(&Mutation::NestProperty {
        from: SchemaPath::root(),
        key: "name".to_string(),
        to: SchemaPath::from_keys(["address"]),
    })
    .unwrap();

    assert_eq!(value(&doc)["required"], json!(["address"]));
    assert_eq!(
        keys(&doc, &SchemaPath::from_keys(["address"])),
        vec!["street", "geo", "name"]
    );
}

#[test]
fn test_nest_into_self_or_descendant_refused() {
    let mut doc = doc(PERSON);
    let text = doc.text().to_string();
    let root = doc.root().clone();

    for to in [
        SchemaPath::from_keys(["address"]),
        SchemaPath::from_keys(["address", "geo"]),
    ] {
        let err = doc
            .apply(&Mutation::NestProperty {
                from: SchemaPath::root(),
                key: "address".to_string(),
                to,
            })
            .unwrap_err();
        assert!(matches!(err, MutationError::CycleDetected { .. }));
        assert_eq!(doc.text(), text);
        assert_eq!(doc.root(), &root);
    }
}

#[test]
fn test_replace_with_reordered_node_rewrites_text() {
    let mut doc = doc(PERSON);
    let reordered = schemaform_schema::parse_schema(
        r#"{"type": "object", "properties": {"geo": {"type": "object", "properties": {"lat": {"type": "number"}}}, "street": {"type": "string"}}, "required": ["street"]}"#,
    )
    .unwrap();

    let result = doc
        .apply(&Mutation::ReplaceNode {
            path: SchemaPath::from_keys(["address"]),
            node: reordered,
        })
        .unwrap();
    assert!(result.changed());
    assert_eq!(
        keys(&doc, &SchemaPath::from_keys(["address"])),
        vec!["geo", "street"]
    );
    assert!(doc.text().find("\"geo\"").unwrap() < doc.text().find("\"street\"").unwrap());
}

#[test]
fn test_nest_into_own_parent_refused() {
    let mut doc = doc(PERSON);
    let text = doc.text().to_string();

    let err = doc
        .apply(&Mutation::NestProperty {
            from: SchemaPath::from_keys(["address"]),
            key: "street".to_string(),
            to: SchemaPath::from_keys(["address"]),
        })
        .unwrap_err();
    assert_eq!(
        err,
        MutationError::Collision {
            path: SchemaPath::from_keys(["address"]),
            key: "street".to_string(),
        }
    );
    assert_eq!(doc.text(), text);
    assert_eq!(
        keys(&doc, &SchemaPath::from_keys(["address"])),
        vec!["street", "geo"]
    );
}

#[test]
fn test_nest_into_non_object_refused() {
    let mut doc = doc(PERSON);
    let err = doc
        .apply(&Mutation::NestProperty {
            from: SchemaPath::root(),
            key: "name".to_string(),
            to: SchemaPath::from_keys(["age"]),
        })
        .unwrap_err();
    assert_eq!(err, MutationError::NotAnObject(SchemaPath::from_keys(["age"])));
}

#[test]
fn test_nest_depth_limit() {
    let options = EditorOptions {
        max_depth: 3,
        ..EditorOptions::default()
    };
    let mut doc = Document::from_text(PERSON, options).unwrap();

    doc.apply(&Mutation::AddProperty {
        path: SchemaPath::root(),
        name: Some("box".to_string()),
        schema_type: SchemaType::Object,
    })
    .unwrap();
    let text_with_box = doc.text().to_string();

    // address has height 2, so under box it would reach depth 4
    let err = doc
        .apply(&Mutation::NestProperty {
            from: SchemaPath::root(),
            key: "address".to_string(),
            to: SchemaPath::from_keys(["box"]),
        })
        .unwrap_err();
    assert_eq!(err, MutationError::DepthLimitExceeded { max: 3 });
    assert_eq!(doc.text(), text_with_box);
}

#[test]
fn test_nest_rolls_back_when_tree_fails_shape_rules() {
    let mut doc = doc(
        r#"{
            "type": "object",
            "properties": {
                "a": {"type": "string"},
                "b": {"type": "object", "properties": {}},
                "broken": {"type": "number", "minimum": 9, "maximum": 1}
            }
        }"#,
    );
    let text = doc.text().to_string();
    let root = doc.root().clone();

    let err = doc
        .apply(&Mutation::NestProperty {
            from: SchemaPath::root(),
            key: "a".to_string(),
            to: SchemaPath::from_keys(["b"]),
        })
        .unwrap_err();

    match err {
        MutationError::ValidationFailed(errors) => {
            assert_eq!(
                errors,
                vec!["/properties/broken: minimum (9) is greater than maximum (1)".to_string()]
            );
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert_eq!(doc.root(), &root);
    assert_eq!(doc.text(), text);
}
