#[macro_use]
mod macros;

use std::fmt;

///
/// PropertyTypeName
///
/// Closed set of property type tags. Exactly one tag describes the outer
/// shape of a property.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PropertyTypeName {
    Bool,
    Int,
    Float,
    Double,
    Decimal128,
    ObjectId,
    String,
    Data,
    Date,
    Mixed,
    Uuid,
    List,
    Set,
    Dictionary,
    Object,
    LinkingObjects,
}

impl PropertyTypeName {
    /// Return the full metadata descriptor for one type tag.
    #[must_use]
    pub const fn metadata(self) -> PropertyTypeMetadata {
        property_type_registry!(metadata_from_registry, self)
    }

    /// Resolve a declared type name, returning `None` for anything outside
    /// the closed tag set (user-defined class names included).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        property_type_registry!(lookup_from_registry, name)
    }

    /// Resolve an engine base code (modifier bits already removed).
    #[must_use]
    pub fn from_engine_base_code(code: u16) -> Option<Self> {
        ALL_PROPERTY_TYPES
            .into_iter()
            .find(|ty| !ty.is_collection() && ty.engine_code() == code)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.metadata().name
    }

    #[must_use]
    pub const fn category(self) -> PropertyCategory {
        self.metadata().category
    }

    /// Base code for primitives and relationships, modifier bit for collections.
    #[must_use]
    pub const fn engine_code(self) -> u16 {
        self.metadata().engine_code
    }

    #[must_use]
    pub const fn is_indexable(self) -> bool {
        self.metadata().is_indexable
    }

    #[must_use]
    pub const fn is_primary_key_eligible(self) -> bool {
        self.metadata().is_primary_key_eligible
    }

    //
    // grouped helpers
    //

    // mixed counts as a primitive
    #[must_use]
    pub const fn is_primitive(self) -> bool {
        matches!(self.category(), PropertyCategory::Primitive)
    }

    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self.category(), PropertyCategory::Collection)
    }

    #[must_use]
    pub const fn is_relationship(self) -> bool {
        matches!(self.category(), PropertyCategory::Relationship)
    }

    #[must_use]
    pub const fn is_mixed(self) -> bool {
        matches!(self, Self::Mixed)
    }
}

impl fmt::Display for PropertyTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

///
/// PropertyTypeMetadata
///
/// Capability metadata shared by the normalizer and the engine codec.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PropertyTypeMetadata {
    pub name: &'static str,
    pub category: PropertyCategory,
    pub engine_code: u16,
    pub is_indexable: bool,
    pub is_primary_key_eligible: bool,
}

///
/// PropertyCategory
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PropertyCategory {
    Primitive,
    Collection,
    Relationship,
}

/// Ordered list of all property type tags in registry order.
pub const ALL_PROPERTY_TYPES: [PropertyTypeName; 16] =
    property_type_registry!(all_types_from_registry);

/// Returns true when `name` is not one of the reserved type tags and can
/// therefore only refer to a user-defined class.
#[must_use]
pub fn is_user_defined(name: &str) -> bool {
    !name.is_empty() && PropertyTypeName::from_name(name).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_lookup() {
        for ty in ALL_PROPERTY_TYPES {
            assert_eq!(PropertyTypeName::from_name(ty.name()), Some(ty), "{ty}");
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(
            PropertyTypeName::from_name("objectId"),
            Some(PropertyTypeName::ObjectId)
        );
        assert_eq!(PropertyTypeName::from_name("objectid"), None);
        assert_eq!(PropertyTypeName::from_name("String"), None);
    }

    #[test]
    fn base_codes_resolve_only_non_collections() {
        assert_eq!(
            PropertyTypeName::from_engine_base_code(7),
            Some(PropertyTypeName::Object)
        );
        assert_eq!(
            PropertyTypeName::from_engine_base_code(9),
            Some(PropertyTypeName::Mixed)
        );
        assert_eq!(PropertyTypeName::from_engine_base_code(128), None);
        assert_eq!(PropertyTypeName::from_engine_base_code(13), None);
    }

    #[test]
    fn base_codes_are_unique() {
        let mut codes: Vec<u16> = ALL_PROPERTY_TYPES
            .iter()
            .map(|ty| ty.engine_code())
            .collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ALL_PROPERTY_TYPES.len());
    }

    #[test]
    fn user_defined_excludes_reserved_words() {
        assert!(is_user_defined("Person"));
        assert!(!is_user_defined("list"));
        assert!(!is_user_defined("linkingObjects"));
        assert!(!is_user_defined("mixed"));
        assert!(!is_user_defined(""));
    }

    #[test]
    fn primary_key_eligible_types_are_indexable() {
        for ty in ALL_PROPERTY_TYPES {
            if ty.is_primary_key_eligible() {
                assert!(ty.is_indexable(), "{ty}");
            }
        }
    }
}
