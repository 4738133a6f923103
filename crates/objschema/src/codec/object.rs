use crate::{
    codec::{EngineObjectSchema, TableType, decode_property, encode_property, flags::EngineType},
    error::SchemaError,
    types::CanonicalObjectSchema,
};
use tracing::debug;

/// Encode a canonical object schema. Inverse links become computed
/// properties; everything else is persisted.
#[must_use]
pub fn encode_object_schema(schema: &CanonicalObjectSchema) -> EngineObjectSchema {
    let mut persisted_properties = Vec::new();
    let mut computed_properties = Vec::new();
    let mut primary_key = String::new();

    for property in &schema.properties {
        let mut encoded = encode_property(property);

        if schema.primary_key.as_deref() == Some(property.name.as_str()) {
            encoded.is_primary = true;
            primary_key.clone_from(&encoded.name);
        }

        if EngineType::from_bits(encoded.type_code) == Ok(EngineType::InverseLink) {
            computed_properties.push(encoded);
        } else {
            persisted_properties.push(encoded);
        }
    }

    debug!(
        object = %schema.name,
        persisted = persisted_properties.len(),
        computed = computed_properties.len(),
        "encoded object schema"
    );

    EngineObjectSchema {
        name: schema.name.clone(),
        table_type: TableType::of(schema.embedded, schema.asymmetric),
        persisted_properties,
        computed_properties,
        primary_key,
    }
}

/// Decode an engine object schema. Computed properties come first, then
/// persisted ones; the primary key is translated back to the declared name.
pub fn decode_object_schema(
    schema: &EngineObjectSchema,
) -> Result<CanonicalObjectSchema, SchemaError> {
    let properties = schema
        .computed_properties
        .iter()
        .chain(&schema.persisted_properties)
        .map(decode_property)
        .collect::<Result<Vec<_>, _>>()?;

    let primary_key = (!schema.primary_key.is_empty()).then(|| {
        properties
            .iter()
            .find(|p| p.map_to == schema.primary_key)
            .map_or_else(|| schema.primary_key.clone(), |p| p.name.clone())
    });

    debug!(
        object = %schema.name,
        properties = properties.len(),
        "decoded object schema"
    );

    Ok(CanonicalObjectSchema {
        name: schema.name.clone(),
        properties,
        primary_key,
        embedded: schema.table_type == TableType::Embedded,
        asymmetric: schema.table_type == TableType::TopLevelAsymmetric,
    })
}
