//! Engine type codes.
//!
//! A code is a base type (low bits) ORed with independent modifier bits.
//! [`EngineType::to_bits`] and [`EngineType::from_bits`] are the only code
//! that reads or writes the raw layout.

use crate::{
    error::SchemaError,
    validate::rules::{ErrorContext, RuleId},
};
use objschema_primitives::PropertyTypeName;

pub const NULLABLE: u16 = 64;
pub const ARRAY: u16 = 128;
pub const SET: u16 = 256;
pub const DICTIONARY: u16 = 512;

pub const COLLECTION: u16 = ARRAY | SET | DICTIONARY;
pub const FLAGS: u16 = NULLABLE | COLLECTION;

// Inverse links are always stored as a non-nullable array.
const INVERSE_LINK: u16 = PropertyTypeName::LinkingObjects.engine_code() | ARRAY;

///
/// CollectionKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CollectionKind {
    List,
    Set,
    Dictionary,
}

impl CollectionKind {
    #[must_use]
    pub const fn from_type_name(type_name: PropertyTypeName) -> Option<Self> {
        match type_name {
            PropertyTypeName::List => Some(Self::List),
            PropertyTypeName::Set => Some(Self::Set),
            PropertyTypeName::Dictionary => Some(Self::Dictionary),
            _ => None,
        }
    }

    #[must_use]
    pub const fn type_name(self) -> PropertyTypeName {
        match self {
            Self::List => PropertyTypeName::List,
            Self::Set => PropertyTypeName::Set,
            Self::Dictionary => PropertyTypeName::Dictionary,
        }
    }

    #[must_use]
    pub const fn bit(self) -> u16 {
        match self {
            Self::List => ARRAY,
            Self::Set => SET,
            Self::Dictionary => DICTIONARY,
        }
    }

    const fn from_bit(bit: u16) -> Option<Self> {
        match bit {
            ARRAY => Some(Self::List),
            SET => Some(Self::Set),
            DICTIONARY => Some(Self::Dictionary),
            _ => None,
        }
    }
}

///
/// EngineType
///
/// Decoded form of an engine type code. `base` and `element` are primitive
/// tags or `Object`; collection tags and `LinkingObjects` never appear there.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EngineType {
    Scalar {
        base: PropertyTypeName,
        nullable: bool,
    },
    Collection {
        kind: CollectionKind,
        element: PropertyTypeName,
        nullable: bool,
    },
    InverseLink,
}

impl EngineType {
    #[must_use]
    pub const fn to_bits(self) -> u16 {
        let (code, nullable) = match self {
            Self::Scalar { base, nullable } => (base.engine_code(), nullable),
            Self::Collection {
                kind,
                element,
                nullable,
            } => (element.engine_code() | kind.bit(), nullable),
            Self::InverseLink => (INVERSE_LINK, false),
        };

        if nullable { code | NULLABLE } else { code }
    }

    pub fn from_bits(code: u16) -> Result<Self, FlagError> {
        let nullable = code & NULLABLE != 0;
        let collection = code & COLLECTION;
        let base = code & !FLAGS;

        if collection.count_ones() > 1 {
            return Err(FlagError::CollectionBits);
        }
        let Some(base) = PropertyTypeName::from_engine_base_code(base) else {
            return Err(FlagError::UnknownType);
        };

        if base == PropertyTypeName::LinkingObjects {
            return if collection == ARRAY && !nullable {
                Ok(Self::InverseLink)
            } else {
                Err(FlagError::InverseLinkShape)
            };
        }

        Ok(match CollectionKind::from_bit(collection) {
            Some(kind) => Self::Collection {
                kind,
                element: base,
                nullable,
            },
            None => Self::Scalar { base, nullable },
        })
    }

    /// Whether the decoded type refers to another object schema.
    #[must_use]
    pub const fn links_object(self) -> bool {
        matches!(
            self,
            Self::Scalar {
                base: PropertyTypeName::Object,
                ..
            } | Self::Collection {
                element: PropertyTypeName::Object,
                ..
            } | Self::InverseLink
        )
    }
}

///
/// FlagError
/// Why a raw code could not be decoded.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FlagError {
    CollectionBits,
    InverseLinkShape,
    UnknownType,
}

impl FlagError {
    #[must_use]
    pub fn at(self, property: &str, code: u16) -> SchemaError {
        let code = code.to_string();

        match self {
            Self::CollectionBits => {
                RuleId::EngineCollectionBits.error(ErrorContext::None, &[("code", code.as_str())])
            }
            Self::InverseLinkShape => {
                RuleId::EngineInverseLinkShape.error(ErrorContext::None, &[("property", property)])
            }
            Self::UnknownType => {
                RuleId::EngineUnknownType.error(ErrorContext::None, &[("code", code.as_str())])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_fixed() {
        assert_eq!(COLLECTION, 896);
        assert_eq!(FLAGS, 960);
    }

    #[test]
    fn known_codes() {
        let cases = [
            (
                EngineType::Scalar {
                    base: PropertyTypeName::Int,
                    nullable: false,
                },
                0,
            ),
            (
                EngineType::Scalar {
                    base: PropertyTypeName::String,
                    nullable: true,
                },
                0x02 | NULLABLE,
            ),
            (
                EngineType::Scalar {
                    base: PropertyTypeName::Object,
                    nullable: true,
                },
                0x07 | NULLABLE,
            ),
            (
                EngineType::Collection {
                    kind: CollectionKind::List,
                    element: PropertyTypeName::Object,
                    nullable: false,
                },
                0x07 | ARRAY,
            ),
            (
                EngineType::Collection {
                    kind: CollectionKind::Dictionary,
                    element: PropertyTypeName::Mixed,
                    nullable: true,
                },
                0x09 | DICTIONARY | NULLABLE,
            ),
            (
                EngineType::Collection {
                    kind: CollectionKind::Set,
                    element: PropertyTypeName::Uuid,
                    nullable: false,
                },
                0x0c | SET,
            ),
            (EngineType::InverseLink, 0x08 | ARRAY),
        ];

        for (engine_type, code) in cases {
            assert_eq!(engine_type.to_bits(), code, "{engine_type:?}");
            assert_eq!(EngineType::from_bits(code), Ok(engine_type), "{code}");
        }
    }

    #[test]
    fn malformed_codes() {
        assert_eq!(
            EngineType::from_bits(ARRAY | SET),
            Err(FlagError::CollectionBits)
        );
        assert_eq!(EngineType::from_bits(13), Err(FlagError::UnknownType));
        assert_eq!(EngineType::from_bits(1024), Err(FlagError::UnknownType));
        assert_eq!(EngineType::from_bits(8), Err(FlagError::InverseLinkShape));
        assert_eq!(
            EngineType::from_bits(0x08 | ARRAY | NULLABLE),
            Err(FlagError::InverseLinkShape)
        );
        assert_eq!(
            EngineType::from_bits(0x08 | SET),
            Err(FlagError::InverseLinkShape)
        );
    }

    #[test]
    fn flag_errors_render() {
        assert_eq!(
            FlagError::CollectionBits.at("p", 384).message,
            "Unexpected type '384': more than one collection flag is set"
        );
        assert_eq!(
            FlagError::InverseLinkShape.at("owners", 8).message,
            "Expected property 'owners' with 'linkingObjects' type to be a non-nullable array"
        );
    }
}
