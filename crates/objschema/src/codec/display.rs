use crate::codec::flags::{CollectionKind, EngineType};
use objschema_primitives::PropertyTypeName;

/// Render an engine type code for messages, e.g. `list<int>` or `<Person>`.
/// Codes that do not decode are rendered as the number itself.
#[must_use]
pub fn type_name(type_code: u16, object_type: Option<&str>) -> String {
    EngineType::from_bits(type_code).map_or_else(
        |_| type_code.to_string(),
        |engine_type| render(engine_type, object_type),
    )
}

fn render(engine_type: EngineType, object_type: Option<&str>) -> String {
    match engine_type {
        EngineType::Scalar {
            base: PropertyTypeName::Object,
            ..
        } => object_type.map_or_else(|| "object".to_string(), |class| format!("<{class}>")),
        EngineType::Scalar { base, .. } => base.name().to_string(),
        EngineType::Collection {
            kind: CollectionKind::List,
            element: PropertyTypeName::Object,
            ..
        } => format!("list<{}>", object_type.unwrap_or("object")),
        EngineType::Collection { kind, element, .. } => {
            let element = render(
                EngineType::Scalar {
                    base: element,
                    nullable: false,
                },
                object_type,
            );

            format!("{}<{element}>", kind.type_name())
        }
        EngineType::InverseLink => "list<linkingObjects>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::flags::{ARRAY, DICTIONARY, NULLABLE, SET};

    #[test]
    fn renders_engine_types() {
        assert_eq!(type_name(0, None), "int");
        assert_eq!(type_name(NULLABLE, None), "int");
        assert_eq!(type_name(ARRAY, None), "list<int>");
        assert_eq!(type_name(0x07 | ARRAY, Some("Person")), "list<Person>");
        assert_eq!(type_name(0x02 | SET, None), "set<string>");
        assert_eq!(
            type_name(0x09 | DICTIONARY | NULLABLE, None),
            "dictionary<mixed>"
        );
        assert_eq!(type_name(0x07 | NULLABLE, Some("Person")), "<Person>");
        assert_eq!(type_name(0x07 | SET, Some("Person")), "set<<Person>>");
        assert_eq!(type_name(7, None), "object");
    }

    #[test]
    fn undecodable_codes_render_as_numbers() {
        assert_eq!(type_name(ARRAY | SET, None), "384");
    }
}
