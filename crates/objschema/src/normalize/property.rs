use crate::{
    error::SchemaError,
    parse::{parse_type_expr, resolve_type_expr, shorthand_markers},
    types::{CanonicalProperty, PropertyInput, PropertyPath, RelaxedProperty},
    validate::{
        optionality::{
            ElementClass, INVERSE_LINK_OPTIONALITY, Optionality, Position, implied_optionality,
        },
        rules::{ErrorContext, RuleId},
    },
};
use objschema_primitives::{PropertyCategory, PropertyTypeName, is_user_defined};
use tracing::trace;

/// Normalize one property declaration, given as a shorthand string or in
/// the relaxed object notation.
pub fn normalize_property(
    path: PropertyPath<'_>,
    input: &PropertyInput,
) -> Result<CanonicalProperty, SchemaError> {
    let property = match input {
        PropertyInput::Shorthand(shorthand) => normalize_shorthand(path, shorthand)?,
        PropertyInput::Object(relaxed) => normalize_relaxed(path, relaxed)?,
    };

    trace!(
        property = %path,
        type_name = %property.type_name,
        object_type = ?property.object_type,
        optional = property.optional,
        "normalized property"
    );

    Ok(property)
}

fn normalize_shorthand(
    path: PropertyPath<'_>,
    input: &str,
) -> Result<CanonicalProperty, SchemaError> {
    let resolved = parse_type_expr(input)
        .and_then(|expr| resolve_type_expr(&expr))
        .map_err(|err| err.at(path))?;

    Ok(CanonicalProperty {
        name: path.property.to_string(),
        type_name: resolved.type_name,
        object_type: resolved.object_type,
        property: None,
        optional: resolved.optional,
        indexed: false,
        map_to: path.property.to_string(),
        default: None,
    })
}

fn normalize_relaxed(
    path: PropertyPath<'_>,
    relaxed: &RelaxedProperty,
) -> Result<CanonicalProperty, SchemaError> {
    let context = ErrorContext::Property(path);

    if relaxed.type_name.is_empty() {
        return Err(RuleId::TypeFieldRequired.error(context, &[]));
    }
    if let Some(object_type) = &relaxed.object_type {
        reject_shorthand(path, object_type)?;
    }

    // A shorthand `type` is parsed and merged; explicit `optional` wins over
    // the `?` marker but still has to pass the optionality table below.
    let mut explicit_optional = relaxed.optional;
    let (type_name, object_type) = if shorthand_markers(&relaxed.type_name).is_empty() {
        let Some(type_name) = PropertyTypeName::from_name(&relaxed.type_name) else {
            let args = [("type", relaxed.type_name.as_str())];
            return Err(RuleId::UserDefinedTypeAsType.error(context, &args));
        };

        (type_name, relaxed.object_type.clone())
    } else {
        if relaxed.object_type.is_some() {
            reject_shorthand(path, &relaxed.type_name)?;
        }

        let expr = parse_type_expr(&relaxed.type_name).map_err(|err| err.at(path))?;
        if expr.element().1 && explicit_optional.is_none() {
            explicit_optional = Some(true);
        }

        expr.declared_type()
    };

    let link_origin = relaxed.property.as_deref();
    check_object_type(path, type_name, object_type.as_deref(), link_origin)?;

    let optionality = optionality_of(type_name, object_type.as_deref());
    let optional = optionality.resolve(explicit_optional, path)?;

    Ok(CanonicalProperty {
        name: path.property.to_string(),
        type_name,
        object_type,
        property: relaxed.property.clone(),
        optional,
        indexed: relaxed.indexed.unwrap_or(false),
        map_to: relaxed
            .map_to
            .clone()
            .filter(|map_to| !map_to.is_empty())
            .unwrap_or_else(|| path.property.to_string()),
        default: relaxed.default.clone(),
    })
}

fn reject_shorthand(path: PropertyPath<'_>, input: &str) -> Result<(), SchemaError> {
    let markers = shorthand_markers(input);
    if markers.is_empty() {
        return Ok(());
    }

    let listed = markers.join("' and '");
    let args = [("shorthands", listed.as_str())];

    Err(RuleId::ShorthandInObject.error(ErrorContext::Property(path), &args))
}

// Tag / objectType / property consistency.
fn check_object_type(
    path: PropertyPath<'_>,
    type_name: PropertyTypeName,
    object_type: Option<&str>,
    link_origin: Option<&str>,
) -> Result<(), SchemaError> {
    let context = ErrorContext::Property(path);

    if object_type == Some("") {
        return Err(RuleId::EmptyObjectType.error(context, &[]));
    }

    match type_name.category() {
        PropertyCategory::Primitive => {
            if object_type.is_some() {
                let args = [("type", type_name.name())];
                return Err(RuleId::ObjectTypeNotAllowed.error(context, &args));
            }
        }
        PropertyCategory::Collection => {
            if !object_type.is_some_and(is_collection_element) {
                return Err(RuleId::ObjectTypeInvalid.error(context, &[]));
            }
        }
        PropertyCategory::Relationship => {
            if !object_type.is_some_and(is_user_defined) {
                return Err(RuleId::UserDefinedObjectTypeRequired.error(context, &[]));
            }
            let origin_missing = link_origin.is_none_or(str::is_empty);
            if type_name == PropertyTypeName::LinkingObjects && origin_missing {
                return Err(RuleId::LinkOriginRequired.error(context, &[]));
            }
        }
    }

    if link_origin.is_some() && type_name != PropertyTypeName::LinkingObjects {
        return Err(RuleId::PropertyOnlyForLinkingObjects.error(context, &[]));
    }

    Ok(())
}

// Collections hold primitives or user-defined classes, never other collections.
fn is_collection_element(element: &str) -> bool {
    match PropertyTypeName::from_name(element) {
        Some(type_name) => type_name.is_primitive(),
        None => is_user_defined(element),
    }
}

fn optionality_of(type_name: PropertyTypeName, object_type: Option<&str>) -> Optionality {
    match type_name {
        PropertyTypeName::LinkingObjects => INVERSE_LINK_OPTIONALITY,
        PropertyTypeName::Object => {
            implied_optionality(Position::Scalar, ElementClass::UserDefined)
        }
        _ => {
            let element = object_type.unwrap_or_else(|| type_name.name());
            implied_optionality(Position::of(type_name), ElementClass::classify(element))
        }
    }
}
