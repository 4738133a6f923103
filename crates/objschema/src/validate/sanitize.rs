//! Data-type checks for dynamically typed (JSON) schema input.
//!
//! Sanitization only checks that every field carries the expected JSON data
//! type and that no unknown field is present. Semantic rules are left to the
//! normalizers.

use crate::{
    error::SchemaError,
    types::{ObjectSchema, PropertiesInput, PropertyInput, RelaxedProperty},
    validate::rules::{ErrorContext, RuleId},
};
use serde_json::{Map, Value as JsonValue};

type JsonObject = Map<String, JsonValue>;

const OBJECT_SCHEMA_KEYS: [&str; 5] = [
    "name",
    "primaryKey",
    "embedded",
    "asymmetric",
    "properties",
];

const PROPERTY_SCHEMA_KEYS: [&str; 8] = [
    "name",
    "type",
    "objectType",
    "property",
    "default",
    "optional",
    "indexed",
    "mapTo",
];

///
/// Expected
/// JSON data type a field is required to have.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Expected {
    Boolean,
    Object,
    String,
}

impl Expected {
    const fn described(self) -> &'static str {
        match self {
            Self::Boolean => "a boolean",
            Self::Object => "an object",
            Self::String => "a string",
        }
    }
}

/// Describe the JSON data type of a (possibly absent) value.
const fn describe(value: Option<&JsonValue>) -> &'static str {
    match value {
        None => "undefined",
        Some(JsonValue::Null) => "null",
        Some(JsonValue::Bool(_)) => "a boolean",
        Some(JsonValue::Number(_)) => "a number",
        Some(JsonValue::String(_)) => "a string",
        Some(JsonValue::Array(_)) => "an array",
        Some(JsonValue::Object(_)) => "an object",
    }
}

// Field reference as it appears in type-check messages.
fn on_object(field: &str, object: &str) -> String {
    format!("'{field}' on '{object}'")
}

fn mismatch(target: &str, expected: Expected, actual: Option<&JsonValue>) -> SchemaError {
    RuleId::ExpectedFieldType.error(
        ErrorContext::None,
        &[
            ("target", target),
            ("expected", expected.described()),
            ("actual", describe(actual)),
        ],
    )
}

fn expect_object<'a>(value: &'a JsonValue, target: &str) -> Result<&'a JsonObject, SchemaError> {
    match value {
        JsonValue::Object(fields) => Ok(fields),
        other => Err(mismatch(target, Expected::Object, Some(other))),
    }
}

fn required_string(fields: &JsonObject, key: &str, target: &str) -> Result<String, SchemaError> {
    match fields.get(key) {
        Some(JsonValue::String(value)) => Ok(value.clone()),
        other => Err(mismatch(target, Expected::String, other)),
    }
}

// null counts as absent for optional fields
fn optional_string(
    fields: &JsonObject,
    key: &str,
    target: &str,
) -> Result<Option<String>, SchemaError> {
    match fields.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(value)) => Ok(Some(value.clone())),
        other => Err(mismatch(target, Expected::String, other)),
    }
}

fn optional_bool(
    fields: &JsonObject,
    key: &str,
    target: &str,
) -> Result<Option<bool>, SchemaError> {
    match fields.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Bool(value)) => Ok(Some(*value)),
        other => Err(mismatch(target, Expected::Boolean, other)),
    }
}

/// Keys of `fields` outside `allowed`, in input order.
fn unexpected_keys<'a>(fields: &'a JsonObject, allowed: &[&str]) -> Vec<&'a str> {
    fields
        .keys()
        .map(String::as_str)
        .filter(|key| !allowed.contains(key))
        .collect()
}

/// Check the data types of a JSON object schema and convert it.
pub fn sanitize_object_schema(value: &JsonValue) -> Result<ObjectSchema, SchemaError> {
    let fields = expect_object(value, "'object schema'")?;
    let name = required_string(fields, "name", "'name' on object schema")?;
    let target = |field: &str| on_object(field, &name);

    let properties = match fields.get("properties") {
        Some(JsonValue::Object(properties)) => PropertiesLayout::Map(properties),
        Some(JsonValue::Array(entries)) => PropertiesLayout::Array(entries),
        other => return Err(mismatch(&target("properties"), Expected::Object, other)),
    };

    let primary_key = optional_string(fields, "primaryKey", &target("primaryKey"))?;
    let embedded = optional_bool(fields, "embedded", &target("embedded"))?;
    let asymmetric = optional_bool(fields, "asymmetric", &target("asymmetric"))?;

    let unexpected = unexpected_keys(fields, &OBJECT_SCHEMA_KEYS);
    if !unexpected.is_empty() {
        let listed = unexpected.join("', '");
        let args = [("object", name.as_str()), ("fields", listed.as_str())];
        return Err(RuleId::UnexpectedObjectFields.error(ErrorContext::None, &args));
    }

    let properties = match properties {
        PropertiesLayout::Map(properties) => sanitize_map(&name, properties)?,
        PropertiesLayout::Array(entries) => sanitize_array(&name, entries)?,
    };

    Ok(ObjectSchema {
        name,
        properties,
        primary_key,
        embedded,
        asymmetric,
    })
}

/// Check the data types of one JSON property declaration. Strings pass
/// through as shorthand; anything else must be a relaxed object.
pub fn sanitize_property_schema(
    object: &str,
    property: &str,
    value: &JsonValue,
) -> Result<PropertyInput, SchemaError> {
    if let JsonValue::String(shorthand) = value {
        return Ok(PropertyInput::Shorthand(shorthand.clone()));
    }

    let fields = expect_object(value, &on_object(property, object))?;

    sanitize_relaxed(fields, object, property).map(PropertyInput::Object)
}

fn sanitize_map(object: &str, properties: &JsonObject) -> Result<PropertiesInput, SchemaError> {
    let mut entries = Vec::with_capacity(properties.len());
    for (property, value) in properties {
        let input = sanitize_property_schema(object, property, value)?;
        entries.push((property.clone(), input));
    }

    Ok(PropertiesInput::Map(entries))
}

// Legacy entries are addressed by index, e.g. `'properties[1].name' on 'Dog'`.
fn sanitize_array(object: &str, entries: &[JsonValue]) -> Result<PropertiesInput, SchemaError> {
    let mut properties = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let label = format!("properties[{index}]");
        let fields = expect_object(entry, &on_object(&label, object))?;
        properties.push(sanitize_relaxed(fields, object, &label)?);
    }

    Ok(PropertiesInput::Array(properties))
}

fn sanitize_relaxed(
    fields: &JsonObject,
    object: &str,
    property: &str,
) -> Result<RelaxedProperty, SchemaError> {
    let target = |field: &str| on_object(&format!("{property}.{field}"), object);

    let relaxed = RelaxedProperty {
        type_name: required_string(fields, "type", &target("type"))?,
        object_type: optional_string(fields, "objectType", &target("objectType"))?,
        property: optional_string(fields, "property", &target("property"))?,
        optional: optional_bool(fields, "optional", &target("optional"))?,
        indexed: optional_bool(fields, "indexed", &target("indexed"))?,
        map_to: optional_string(fields, "mapTo", &target("mapTo"))?,
        default: fields.get("default").cloned(),
        name: optional_string(fields, "name", &target("name"))?,
    };

    let unexpected = unexpected_keys(fields, &PROPERTY_SCHEMA_KEYS);
    if !unexpected.is_empty() {
        let listed = unexpected.join("', '");
        let args = [
            ("property", property),
            ("object", object),
            ("fields", listed.as_str()),
        ];
        return Err(RuleId::UnexpectedPropertyFields.error(ErrorContext::None, &args));
    }

    Ok(relaxed)
}

// Borrowed view of the two accepted `properties` layouts.
enum PropertiesLayout<'a> {
    Map(&'a JsonObject),
    Array(&'a [JsonValue]),
}
