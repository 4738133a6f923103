use crate::{
    error::SchemaError,
    normalize::property::normalize_property,
    types::{
        CanonicalObjectSchema, CanonicalProperty, ObjectSchema, PropertiesInput, PropertyInput,
        PropertyPath, RelaxedProperty,
    },
    validate::rules::{ErrorContext, RuleId},
};
use objschema_config::NormalizeConfig;
use std::{borrow::Cow, collections::HashSet};
use tracing::{debug, warn};

/// Normalize an object schema with the default (strict) configuration.
pub fn normalize_object_schema(input: &ObjectSchema) -> Result<CanonicalObjectSchema, SchemaError> {
    normalize_object_schema_with(&NormalizeConfig::default(), input)
}

/// Normalize an object schema.
///
/// Properties are normalized in declaration order and the first failure is
/// returned. The primary key is checked only after every property passed.
pub fn normalize_object_schema_with(
    config: &NormalizeConfig,
    input: &ObjectSchema,
) -> Result<CanonicalObjectSchema, SchemaError> {
    let object = input.name.as_str();
    let embedded = input.embedded.unwrap_or(false);
    let asymmetric = input.asymmetric.unwrap_or(false);

    if embedded && asymmetric {
        let args = [("object", object)];
        return Err(RuleId::EmbeddedAndAsymmetric.error(ErrorContext::None, &args));
    }

    let entries: Cow<'_, [(String, PropertyInput)]> = match &input.properties {
        PropertiesInput::Map(entries) => Cow::Borrowed(entries),
        PropertiesInput::Array(legacy) => {
            if !config.allow_property_arrays() {
                return Err(RuleId::PropertyArrays.error(ErrorContext::Object(object), &[]));
            }
            warn!(object, "accepting deprecated array of properties");

            Cow::Owned(legacy_entries(object, legacy)?)
        }
    };

    let mut seen = HashSet::new();
    for (name, _) in entries.iter() {
        if !seen.insert(name.as_str()) {
            let args = [("property", name.as_str())];
            return Err(RuleId::DuplicateProperty.error(ErrorContext::Object(object), &args));
        }
    }

    let mut properties = entries
        .iter()
        .map(|(name, input)| normalize_property(PropertyPath::new(object, name), input))
        .collect::<Result<Vec<_>, _>>()?;

    // an empty key names no property
    let primary_key = input.primary_key.clone().filter(|key| !key.is_empty());
    if let Some(key) = &primary_key {
        index_primary_key(object, &mut properties, key)?;
    }

    debug!(
        object,
        properties = properties.len(),
        primary_key = primary_key.as_deref().unwrap_or_default(),
        embedded,
        asymmetric,
        "normalized object schema"
    );

    Ok(CanonicalObjectSchema {
        name: input.name.clone(),
        properties,
        primary_key,
        embedded,
        asymmetric,
    })
}

/// Normalize every object schema, stopping at the first failure.
pub fn normalize_realm_schema(
    input: &[ObjectSchema],
) -> Result<Vec<CanonicalObjectSchema>, SchemaError> {
    normalize_realm_schema_with(&NormalizeConfig::default(), input)
}

pub fn normalize_realm_schema_with(
    config: &NormalizeConfig,
    input: &[ObjectSchema],
) -> Result<Vec<CanonicalObjectSchema>, SchemaError> {
    input
        .iter()
        .map(|schema| normalize_object_schema_with(config, schema))
        .collect()
}

// Key legacy entries by their `name` field.
fn legacy_entries(
    object: &str,
    legacy: &[RelaxedProperty],
) -> Result<Vec<(String, PropertyInput)>, SchemaError> {
    legacy
        .iter()
        .enumerate()
        .map(|(index, relaxed)| {
            let Some(name) = relaxed.name.clone() else {
                let target = format!("'properties[{index}].name' on '{object}'");
                let args = [
                    ("target", target.as_str()),
                    ("expected", "a string"),
                    ("actual", "undefined"),
                ];
                return Err(RuleId::ExpectedFieldType.error(ErrorContext::None, &args));
            };

            let relaxed = RelaxedProperty {
                name: None,
                ..relaxed.clone()
            };

            Ok((name, PropertyInput::Object(relaxed)))
        })
        .collect()
}

fn index_primary_key(
    object: &str,
    properties: &mut [CanonicalProperty],
    key: &str,
) -> Result<(), SchemaError> {
    let Some(property) = properties.iter_mut().find(|p| p.name == key) else {
        let args = [("primary_key", key)];
        return Err(RuleId::PrimaryKeyNotDeclared.error(ErrorContext::Object(object), &args));
    };
    let context = ErrorContext::Property(PropertyPath::new(object, key));

    if !property.type_name.is_primary_key_eligible() {
        let args = [("type", property.type_name.name())];
        return Err(RuleId::PrimaryKeyType.error(context, &args));
    }
    if property.optional {
        return Err(RuleId::OptionalPrimaryKey.error(context, &[]));
    }

    property.indexed = true;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;
    use objschema_primitives::PropertyTypeName;

    fn person() -> ObjectSchema {
        ObjectSchema::new("Person")
            .property("id", "int")
            .property("name", "string")
            .property("friends", "Person[]")
            .primary_key("id")
    }

    #[test]
    fn declaration_order_is_preserved() {
        let schema = normalize_object_schema(&person()).unwrap();
        let names: Vec<_> = schema.properties.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, ["id", "name", "friends"]);
    }

    #[test]
    fn primary_key_is_indexed() {
        let schema = normalize_object_schema(&person()).unwrap();

        assert_eq!(schema.primary_key.as_deref(), Some("id"));
        assert!(schema.get("id").unwrap().indexed);
        assert!(!schema.get("name").unwrap().indexed);
        assert_eq!(
            schema.primary_key_property().map(|p| p.type_name),
            Some(PropertyTypeName::Int)
        );
    }

    #[test]
    fn empty_primary_key_is_unset() {
        let schema = normalize_object_schema(&person().primary_key("")).unwrap();

        assert_eq!(schema.primary_key, None);
        assert!(!schema.get("id").unwrap().indexed);
    }

    #[test]
    fn primary_key_rules() {
        let err = normalize_object_schema(&person().primary_key("missing")).unwrap_err();
        assert_eq!(err.rule, RuleId::PrimaryKeyNotDeclared);
        assert_eq!(err.class, ErrorClass::SchemaShape);

        let err = normalize_object_schema(
            &ObjectSchema::new("Person")
                .property("id", "double")
                .primary_key("id"),
        )
        .unwrap_err();
        assert_eq!(
            err.message,
            "Invalid schema for property 'Person.id': Properties of type 'double' cannot be used as a primary key."
        );

        let err = normalize_object_schema(
            &ObjectSchema::new("Person")
                .property("id", "string?")
                .primary_key("id"),
        )
        .unwrap_err();
        assert_eq!(
            err.message,
            "Invalid schema for property 'Person.id': Optional properties cannot be used as a primary key."
        );
    }

    #[test]
    fn property_errors_win_over_primary_key_errors() {
        let schema = ObjectSchema::new("Person")
            .property("id", "int??")
            .primary_key("missing");

        let err = normalize_object_schema(&schema).unwrap_err();
        assert_eq!(err.rule, RuleId::DuplicateOptionalMarker);
    }

    #[test]
    fn first_failing_property_is_reported() {
        let schema = ObjectSchema::new("Person")
            .property("ok", "int")
            .property("first", "list")
            .property("second", "");

        let err = normalize_object_schema(&schema).unwrap_err();
        assert!(err.message.contains("'Person.first'"), "{err}");
    }

    #[test]
    fn duplicate_property_names_are_rejected() {
        let schema = ObjectSchema::new("Person")
            .property("name", "string")
            .property("name", "int");

        let err = normalize_object_schema(&schema).unwrap_err();
        assert_eq!(
            err.message,
            "Invalid schema for object 'Person': The property 'name' is declared more than once."
        );
    }

    #[test]
    fn embedded_and_asymmetric_are_exclusive() {
        let schema = ObjectSchema::new("Address").embedded(true).asymmetric(true);

        let err = normalize_object_schema(&schema).unwrap_err();
        assert_eq!(
            err.message,
            "'Address' cannot be both embedded and asymmetric"
        );
        assert_eq!(err.class, ErrorClass::SchemaShape);
    }

    #[test]
    fn flags_default_to_false() {
        let schema = normalize_object_schema(&ObjectSchema::new("Empty")).unwrap();

        assert!(!schema.embedded);
        assert!(!schema.asymmetric);
        assert!(schema.properties.is_empty());
    }

    fn legacy() -> ObjectSchema {
        ObjectSchema {
            properties: PropertiesInput::Array(vec![
                RelaxedProperty::new("int").named("id"),
                RelaxedProperty::new("list")
                    .object_type("string")
                    .named("tags"),
            ]),
            ..ObjectSchema::new("Legacy")
        }
    }

    #[test]
    fn legacy_property_arrays_are_rejected_by_default() {
        let err = normalize_object_schema(&legacy()).unwrap_err();

        assert_eq!(
            err.message,
            "Invalid schema for object 'Legacy': Array of properties are no longer supported. Use an object instead."
        );
        assert_eq!(err.class, ErrorClass::SchemaShape);
    }

    #[test]
    fn legacy_property_arrays_can_be_allowed() {
        let config = NormalizeConfig::with_property_arrays();
        let schema = normalize_object_schema_with(&config, &legacy()).unwrap();

        assert_eq!(schema.properties.len(), 2);
        assert_eq!(schema.properties[1].name, "tags");
        assert_eq!(schema.properties[1].type_name, PropertyTypeName::List);
    }

    #[test]
    fn legacy_entries_need_a_name() {
        let config = NormalizeConfig::with_property_arrays();
        let schema = ObjectSchema {
            properties: PropertiesInput::Array(vec![RelaxedProperty::new("int")]),
            ..ObjectSchema::new("Legacy")
        };

        let err = normalize_object_schema_with(&config, &schema).unwrap_err();
        assert_eq!(
            err.message,
            "Expected 'properties[0].name' on 'Legacy' to be a string, got undefined"
        );
    }

    #[test]
    fn realm_schema_stops_at_first_error() {
        let schemas = [
            person(),
            ObjectSchema::new("Broken").property("p", "object"),
            ObjectSchema::new("AlsoBroken").property("p", "list"),
        ];

        let err = normalize_realm_schema(&schemas).unwrap_err();
        assert!(err.message.contains("'Broken.p'"), "{err}");

        let ok = normalize_realm_schema(&schemas[..1]).unwrap();
        assert_eq!(ok.len(), 1);
    }
}
