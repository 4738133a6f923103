use crate::{
    codec::{
        EngineProperty,
        flags::{CollectionKind, EngineType},
    },
    error::SchemaError,
    types::CanonicalProperty,
    validate::{
        optionality::{ElementClass, Position, implied_optionality},
        rules::{ErrorContext, RuleId},
    },
};
use objschema_primitives::PropertyTypeName;

/// Encode a canonical property for the engine.
///
/// Total over normalizer output. A collection whose `object_type` is not a
/// primitive tag is encoded as a collection of objects.
#[must_use]
pub fn encode_property(property: &CanonicalProperty) -> EngineProperty {
    let engine_type = engine_type_of(property);

    let map_to = if property.map_to.is_empty() {
        &property.name
    } else {
        &property.map_to
    };

    EngineProperty {
        name: map_to.clone(),
        type_code: engine_type.to_bits(),
        object_type: property
            .object_type
            .clone()
            .filter(|_| engine_type.links_object()),
        link_origin_property_name: property
            .property
            .clone()
            .filter(|_| engine_type == EngineType::InverseLink),
        is_indexed: property.indexed,
        is_primary: false,
        public_name: (property.name != *map_to).then(|| property.name.clone()),
    }
}

/// Decode an engine property back into its canonical form.
///
/// `optional` is read from the nullable bit as stored. Forced nullability
/// only applies when encoding.
pub fn decode_property(engine: &EngineProperty) -> Result<CanonicalProperty, SchemaError> {
    let name = engine.declared_name();
    let engine_type =
        EngineType::from_bits(engine.type_code).map_err(|err| err.at(name, engine.type_code))?;

    let linked_class = || {
        engine
            .object_type
            .clone()
            .filter(|class| !class.is_empty())
            .ok_or_else(|| {
                let type_name = engine.type_name();
                let args = [("property", name), ("type", type_name.as_str())];
                RuleId::EngineObjectTypeMissing.error(ErrorContext::None, &args)
            })
    };

    let (type_name, object_type, optional, link_origin) = match engine_type {
        EngineType::InverseLink => {
            let class = linked_class()?;
            let Some(origin) = engine
                .link_origin_property_name
                .clone()
                .filter(|origin| !origin.is_empty())
            else {
                let args = [("property", name)];
                return Err(RuleId::EngineLinkOriginMissing.error(ErrorContext::None, &args));
            };

            let type_name = PropertyTypeName::LinkingObjects;
            (type_name, Some(class), false, Some(origin))
        }
        EngineType::Scalar { base, nullable } => {
            let object_type = if base == PropertyTypeName::Object {
                Some(linked_class()?)
            } else {
                None
            };

            (base, object_type, nullable, None)
        }
        EngineType::Collection {
            kind,
            element,
            nullable,
        } => {
            let object_type = if element == PropertyTypeName::Object {
                linked_class()?
            } else {
                element.name().to_string()
            };

            (kind.type_name(), Some(object_type), nullable, None)
        }
    };

    Ok(CanonicalProperty {
        name: name.to_string(),
        type_name,
        object_type,
        property: link_origin,
        optional,
        indexed: engine.is_indexed,
        map_to: engine.name.clone(),
        default: None,
    })
}

fn engine_type_of(property: &CanonicalProperty) -> EngineType {
    if property.type_name == PropertyTypeName::LinkingObjects {
        return EngineType::InverseLink;
    }

    match CollectionKind::from_type_name(property.type_name) {
        Some(kind) => {
            let element = property
                .object_type
                .as_deref()
                .and_then(PropertyTypeName::from_name)
                .filter(|ty| ty.is_primitive())
                .unwrap_or(PropertyTypeName::Object);
            let position = Position::of(property.type_name);

            EngineType::Collection {
                kind,
                element,
                nullable: forced_or(position, element, property.optional),
            }
        }
        None => EngineType::Scalar {
            base: property.type_name,
            nullable: forced_or(Position::Scalar, property.type_name, property.optional),
        },
    }
}

// Forced nullability wins over the declared value.
fn forced_or(position: Position, base: PropertyTypeName, declared: bool) -> bool {
    let class = match base {
        PropertyTypeName::Object => ElementClass::UserDefined,
        PropertyTypeName::Mixed => ElementClass::Mixed,
        _ => ElementClass::Primitive,
    };

    implied_optionality(position, class)
        .forced()
        .unwrap_or(declared)
}
