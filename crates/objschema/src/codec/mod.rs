//! Canonical to engine descriptor conversion, in both directions.

pub mod flags;

mod display;
mod object;
mod property;

pub use display::type_name;
pub use object::{decode_object_schema, encode_object_schema};
pub use property::{decode_property, encode_property};

use serde::{Deserialize, Serialize};

///
/// EngineProperty
///
/// Property descriptor as read and written by the storage engine. `name`
/// is the stored (mapped) name; `public_name` is only set when the declared
/// name differs from it.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineProperty {
    pub name: String,

    #[serde(rename = "type")]
    pub type_code: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_origin_property_name: Option<String>,

    #[serde(default)]
    pub is_indexed: bool,

    #[serde(default)]
    pub is_primary: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_name: Option<String>,
}

impl EngineProperty {
    /// Name the property was declared with.
    #[must_use]
    pub fn declared_name(&self) -> &str {
        self.public_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.name)
    }

    /// Readable rendering of the type code, e.g. `list<Person>`.
    #[must_use]
    pub fn type_name(&self) -> String {
        type_name(self.type_code, self.object_type.as_deref())
    }
}

///
/// TableType
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TableType {
    #[default]
    TopLevel,
    Embedded,
    TopLevelAsymmetric,
}

impl TableType {
    #[must_use]
    pub const fn of(embedded: bool, asymmetric: bool) -> Self {
        match (embedded, asymmetric) {
            (true, _) => Self::Embedded,
            (false, true) => Self::TopLevelAsymmetric,
            (false, false) => Self::TopLevel,
        }
    }
}

impl From<TableType> for u8 {
    fn from(value: TableType) -> Self {
        match value {
            TableType::TopLevel => 0,
            TableType::Embedded => 1,
            TableType::TopLevelAsymmetric => 2,
        }
    }
}

impl TryFrom<u8> for TableType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::TopLevel),
            1 => Ok(Self::Embedded),
            2 => Ok(Self::TopLevelAsymmetric),
            other => Err(format!("unknown table type {other}")),
        }
    }
}

///
/// EngineObjectSchema
///
/// Inverse links are computed by the engine and travel separately from the
/// stored properties. An empty `primary_key` means none.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineObjectSchema {
    pub name: String,

    #[serde(default)]
    pub table_type: TableType,

    #[serde(default)]
    pub persisted_properties: Vec<EngineProperty>,

    #[serde(default)]
    pub computed_properties: Vec<EngineProperty>,

    #[serde(default)]
    pub primary_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn table_type_travels_as_number() {
        let schema = EngineObjectSchema {
            name: "Log".to_string(),
            table_type: TableType::TopLevelAsymmetric,
            ..EngineObjectSchema::default()
        };

        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["tableType"], json!(2));

        let back: EngineObjectSchema = serde_json::from_value(value).unwrap();
        assert_eq!(back, schema);
    }

    #[test]
    fn unknown_table_type_is_rejected() {
        let result = serde_json::from_value::<EngineObjectSchema>(json!({
            "name": "Log",
            "tableType": 7,
        }));

        assert!(result.is_err());
    }

    #[test]
    fn property_field_names() {
        let property = EngineProperty {
            name: "_owner".to_string(),
            type_code: 0x07 | flags::NULLABLE,
            object_type: Some("Person".to_string()),
            public_name: Some("owner".to_string()),
            ..EngineProperty::default()
        };

        assert_eq!(
            serde_json::to_value(&property).unwrap(),
            json!({
                "name": "_owner",
                "type": 71,
                "objectType": "Person",
                "isIndexed": false,
                "isPrimary": false,
                "publicName": "owner",
            })
        );
        assert_eq!(property.declared_name(), "owner");
    }

    #[test]
    fn table_type_from_flags() {
        assert_eq!(TableType::of(false, false), TableType::TopLevel);
        assert_eq!(TableType::of(true, false), TableType::Embedded);
        assert_eq!(TableType::of(false, true), TableType::TopLevelAsymmetric);
    }
}
