use objschema::{
    ErrorClass, NormalizeConfig, SchemaError, normalize_object_schema,
    normalize_object_schema_with, normalize_property, normalize_realm_schema,
    prelude::*, sanitize_object_schema,
};
use serde_json::{Value as JsonValue, json};

fn property(input: impl Into<PropertyInput>) -> Result<CanonicalProperty, SchemaError> {
    normalize_property(PropertyPath::new("MyObject", "p"), &input.into())
}

fn summary(p: &CanonicalProperty) -> (PropertyTypeName, Option<&str>, bool) {
    (p.type_name, p.object_type.as_deref(), p.optional)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn from_json(value: JsonValue) -> Result<CanonicalObjectSchema, SchemaError> {
    normalize_object_schema(&sanitize_object_schema(&value)?)
}

#[test]
fn plain_string() {
    let p = property("string").unwrap();

    assert_eq!(p.name, "p");
    assert_eq!(summary(&p), (PropertyTypeName::String, None, false));
    assert!(!p.indexed);
    assert_eq!(p.map_to, "p");
}

#[test]
fn list_of_optional_strings() {
    let p = property("string?[]").unwrap();

    assert_eq!(summary(&p), (PropertyTypeName::List, Some("string"), true));
}

#[test]
fn list_of_objects() {
    let p = property("Person[]").unwrap();
    assert_eq!(summary(&p), (PropertyTypeName::List, Some("Person"), false));

    let err = property("Person?[]").unwrap_err();
    assert!(
        err.message.contains("optional' is implicitly 'false'"),
        "{err}"
    );
    assert_eq!(err.class, ErrorClass::OptionalityConflict);
}

#[test]
fn mixed() {
    let p = property("mixed").unwrap();
    assert_eq!(summary(&p), (PropertyTypeName::Mixed, None, true));

    let err = property(RelaxedProperty::new("mixed").optional(false)).unwrap_err();
    assert!(
        err.message.contains("implicitly 'true' for 'mixed'"),
        "{err}"
    );
}

#[test]
fn grammar_messages() {
    let cases = [
        ("", "The type must be specified."),
        (
            "[]",
            "The element type must be specified. See example: 'int[]'",
        ),
        (
            "{}",
            "The element type must be specified. See example: 'int{}'",
        ),
        (
            "?",
            "The type must be specified. See examples: 'int?', 'int?[]'",
        ),
        ("int[]?", "Collections cannot be optional."),
        ("int??", "The optional marker '?' can only be used once."),
        ("list", "Cannot use the collection name."),
        ("dictionary", "Cannot use the collection name."),
        (
            "object",
            "To define a relationship, use either 'ObjectName' or { type: 'object', objectType: 'ObjectName' }",
        ),
        (
            "linkingObjects",
            "To define an inverse relationship, use { type: 'linkingObjects', objectType: 'ObjectName', property: 'ObjectProperty' }",
        ),
        ("int[][]", "Nested collections are not supported."),
    ];

    for (input, expected) in cases {
        let err = property(input).unwrap_err();
        assert!(
            err.message
                .starts_with("Invalid schema for property 'MyObject.p': "),
            "{err}"
        );
        assert!(err.message.contains(expected), "{input}: {err}");
    }
}

#[test]
fn primary_key_is_indexed() {
    let schema = normalize_object_schema(
        &ObjectSchema::new("Person")
            .property("id", "int")
            .property("name", "string")
            .primary_key("id"),
    )
    .unwrap();

    assert!(schema.get("id").unwrap().indexed);
    assert!(!schema.get("name").unwrap().indexed);
}

#[test]
fn json_schema_end_to_end() {
    init_tracing();

    let schema = from_json(json!({
        "name": "Dog",
        "primaryKey": "_id",
        "properties": {
            "_id": "objectId",
            "name": { "type": "string", "indexed": true },
            "owner": "Person",
            "tags": "string<>",
            "meta": { "type": "dictionary", "objectType": "mixed" },
            "walkers": {
                "type": "linkingObjects",
                "objectType": "Person",
                "property": "dogs",
            },
        },
    }))
    .unwrap();

    assert_eq!(schema.name, "Dog");
    assert_eq!(schema.primary_key.as_deref(), Some("_id"));

    let names: Vec<_> = schema.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["_id", "name", "owner", "tags", "meta", "walkers"]);

    assert!(schema.get("_id").unwrap().indexed);
    assert!(schema.get("name").unwrap().indexed);
    assert_eq!(
        summary(schema.get("owner").unwrap()),
        (PropertyTypeName::Object, Some("Person"), true)
    );
    assert_eq!(
        summary(schema.get("tags").unwrap()),
        (PropertyTypeName::Set, Some("string"), false)
    );
    assert_eq!(
        summary(schema.get("meta").unwrap()),
        (PropertyTypeName::Dictionary, Some("mixed"), true)
    );
    assert_eq!(
        schema.get("walkers").unwrap().property.as_deref(),
        Some("dogs")
    );
}

#[test]
fn json_errors_are_reported_before_normalization() {
    let err = from_json(json!({
        "name": "Dog",
        "properties": { "name": { "type": "string", "optinal": true } },
    }))
    .unwrap_err();

    assert_eq!(
        err.message,
        "Unexpected field(s) found on the schema for property 'name' on 'Dog': 'optinal'."
    );
    assert_eq!(err.class, ErrorClass::Shape);
}

#[test]
fn legacy_arrays_follow_configuration() {
    init_tracing();

    let legacy = sanitize_object_schema(&json!({
        "name": "Legacy",
        "properties": [
            { "name": "id", "type": "int" },
            { "name": "friends", "type": "list", "objectType": "Legacy" },
        ],
    }))
    .unwrap();

    let err = normalize_object_schema(&legacy).unwrap_err();
    assert_eq!(err.class, ErrorClass::SchemaShape);
    let expected = "Array of properties are no longer supported";
    assert!(err.message.contains(expected), "{err}");

    let toml = "[schema]\nallow_property_arrays = true\n";
    let config = NormalizeConfig::from_toml_str(toml).unwrap();
    let schema = normalize_object_schema_with(&config, &legacy).unwrap();
    assert_eq!(
        summary(schema.get("friends").unwrap()),
        (PropertyTypeName::List, Some("Legacy"), false)
    );
}

#[test]
fn realm_schema() {
    let schemas = [
        ObjectSchema::new("Person")
            .property("name", "string")
            .property("dogs", "Dog[]"),
        ObjectSchema::new("Dog").property("owner", "Person"),
    ];

    let normalized = normalize_realm_schema(&schemas).unwrap();
    assert_eq!(normalized.len(), 2);
    assert_eq!(normalized[1].properties[0].linked_class(), Some("Person"));
}

#[test]
fn errors_display_their_class() {
    let err = property("int??").unwrap_err();

    assert!(
        err.display_with_class().starts_with("grammar: Invalid schema"),
        "{}",
        err.display_with_class()
    );
}
