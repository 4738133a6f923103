use objschema_primitives::{PropertyTypeName, is_user_defined};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

// Type tags travel as their declared names ("objectId", "linkingObjects").
mod type_name_serde {
    use objschema_primitives::PropertyTypeName;
    use serde::{Deserialize, Deserializer, Serializer, de};

    // serde's `with` hands the field over by reference
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(ty: &PropertyTypeName, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(ty.name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<PropertyTypeName, D::Error> {
        let name = String::deserialize(d)?;

        PropertyTypeName::from_name(&name)
            .ok_or_else(|| de::Error::custom(format!("unknown property type '{name}'")))
    }
}

///
/// PropertyPath
/// Object and property name pair, displayed as `Object.property`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PropertyPath<'a> {
    pub object: &'a str,
    pub property: &'a str,
}

impl<'a> PropertyPath<'a> {
    #[must_use]
    pub const fn new(object: &'a str, property: &'a str) -> Self {
        Self { object, property }
    }
}

impl fmt::Display for PropertyPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.object, self.property)
    }
}

///
/// RelaxedProperty
///
/// User-facing property descriptor using the object notation. `type_name`
/// is normally a closed type tag, but a shorthand string is accepted and
/// merged (see `normalize::property`).
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelaxedProperty {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,

    /// Only read from the legacy array-of-properties shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RelaxedProperty {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn object_type(mut self, object_type: impl Into<String>) -> Self {
        self.object_type = Some(object_type.into());
        self
    }

    #[must_use]
    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    #[must_use]
    pub const fn optional(mut self, optional: bool) -> Self {
        self.optional = Some(optional);
        self
    }

    #[must_use]
    pub const fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = Some(indexed);
        self
    }

    #[must_use]
    pub fn map_to(mut self, map_to: impl Into<String>) -> Self {
        self.map_to = Some(map_to.into());
        self
    }

    #[must_use]
    pub fn default_value(mut self, default: JsonValue) -> Self {
        self.default = Some(default);
        self
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

///
/// PropertyInput
/// Either the shorthand string notation or the relaxed object notation.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyInput {
    Shorthand(String),
    Object(RelaxedProperty),
}

impl From<&str> for PropertyInput {
    fn from(value: &str) -> Self {
        Self::Shorthand(value.to_string())
    }
}

impl From<String> for PropertyInput {
    fn from(value: String) -> Self {
        Self::Shorthand(value)
    }
}

impl From<RelaxedProperty> for PropertyInput {
    fn from(value: RelaxedProperty) -> Self {
        Self::Object(value)
    }
}

///
/// PropertiesInput
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PropertiesInput {
    /// Property name to descriptor, in declaration order.
    Map(Vec<(String, PropertyInput)>),

    /// Deprecated array of named descriptors.
    Array(Vec<RelaxedProperty>),
}

impl Default for PropertiesInput {
    fn default() -> Self {
        Self::Map(Vec::new())
    }
}

///
/// ObjectSchema
/// User-authored object schema.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ObjectSchema {
    pub name: String,
    pub properties: PropertiesInput,
    pub primary_key: Option<String>,
    pub embedded: Option<bool>,
    pub asymmetric: Option<bool>,
}

impl ObjectSchema {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a property; switches a legacy array shape back to a map.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, input: impl Into<PropertyInput>) -> Self {
        match &mut self.properties {
            PropertiesInput::Map(entries) => entries.push((name.into(), input.into())),
            PropertiesInput::Array(_) => {
                self.properties = PropertiesInput::Map(vec![(name.into(), input.into())]);
            }
        }
        self
    }

    #[must_use]
    pub fn primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = Some(primary_key.into());
        self
    }

    #[must_use]
    pub const fn embedded(mut self, embedded: bool) -> Self {
        self.embedded = Some(embedded);
        self
    }

    #[must_use]
    pub const fn asymmetric(mut self, asymmetric: bool) -> Self {
        self.asymmetric = Some(asymmetric);
        self
    }
}

///
/// CanonicalProperty
///
/// Fully explicit property descriptor. Nothing here depends on a defaulting
/// rule any more.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProperty {
    pub name: String,

    #[serde(rename = "type", with = "type_name_serde")]
    pub type_name: PropertyTypeName,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,

    pub optional: bool,
    pub indexed: bool,
    pub map_to: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
}

impl CanonicalProperty {
    /// Express this descriptor back in the relaxed object notation.
    #[must_use]
    pub fn to_relaxed(&self) -> RelaxedProperty {
        RelaxedProperty {
            type_name: self.type_name.name().to_string(),
            object_type: self.object_type.clone(),
            property: self.property.clone(),
            optional: Some(self.optional),
            indexed: Some(self.indexed),
            map_to: Some(self.map_to.clone()),
            default: self.default.clone(),
            name: None,
        }
    }

    /// Class this property links to, if any (object links, inverse links
    /// and collections of objects).
    #[must_use]
    pub fn linked_class(&self) -> Option<&str> {
        self.object_type.as_deref().filter(|ty| is_user_defined(ty))
    }
}

///
/// CanonicalObjectSchema
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalObjectSchema {
    pub name: String,

    /// Declaration order is preserved; names are unique.
    pub properties: Vec<CanonicalProperty>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,

    pub embedded: bool,
    pub asymmetric: bool,
}

impl CanonicalObjectSchema {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CanonicalProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Return the primary key property if one is declared.
    #[must_use]
    pub fn primary_key_property(&self) -> Option<&CanonicalProperty> {
        self.primary_key.as_deref().and_then(|key| self.get(key))
    }
}
