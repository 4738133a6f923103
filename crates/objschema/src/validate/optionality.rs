//! Optionality defaulting.
//!
//! Whether a property may be optional depends on where its element type
//! sits. The outcome for every (position, element class) pair is a row in
//! [`OPTIONALITY`]; the parser, the normalizer and the engine codec all read
//! the same table.

use crate::{
    error::SchemaError,
    types::PropertyPath,
    validate::rules::{ErrorContext, RuleId},
};
use objschema_primitives::{PropertyTypeName, is_user_defined};

///
/// Position
/// Where the element type of a property sits.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Position {
    Scalar,
    ListElement,
    SetElement,
    DictionaryElement,
}

impl Position {
    /// Position of the element type for a property of the given outer type.
    #[must_use]
    pub const fn of(type_name: PropertyTypeName) -> Self {
        match type_name {
            PropertyTypeName::List => Self::ListElement,
            PropertyTypeName::Set => Self::SetElement,
            PropertyTypeName::Dictionary => Self::DictionaryElement,
            _ => Self::Scalar,
        }
    }
}

///
/// ElementClass
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ElementClass {
    Mixed,
    Primitive,
    UserDefined,
}

impl ElementClass {
    /// Classify an element type name. Reserved non-primitive tags classify
    /// as `Primitive` since they never carry a forced default.
    #[must_use]
    pub fn classify(name: &str) -> Self {
        match PropertyTypeName::from_name(name) {
            Some(PropertyTypeName::Mixed) => Self::Mixed,
            None if is_user_defined(name) => Self::UserDefined,
            _ => Self::Primitive,
        }
    }
}

///
/// ForcedReason
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ForcedReason {
    Mixed,
    UserDefinedNullable,
    UserDefinedInListOrSet,
    LinkingObjects,
}

impl ForcedReason {
    /// Wording used inside the optionality conflict messages.
    #[must_use]
    pub const fn displayed(self) -> &'static str {
        match self {
            Self::Mixed => "'mixed' types",
            Self::UserDefinedNullable => "user-defined types as single objects and in dictionaries",
            Self::UserDefinedInListOrSet => "user-defined types in lists and sets",
            Self::LinkingObjects => "linking objects",
        }
    }
}

///
/// Optionality
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Optionality {
    Configurable,
    ForcedTrue(ForcedReason),
    ForcedFalse(ForcedReason),
}

impl Optionality {
    /// Combine the table outcome with an explicitly declared value.
    pub fn resolve(
        self,
        explicit: Option<bool>,
        path: PropertyPath<'_>,
    ) -> Result<bool, SchemaError> {
        let context = ErrorContext::Property(path);

        match (self, explicit) {
            (Self::ForcedTrue(reason), Some(false)) => {
                let args = [("displayed", reason.displayed())];
                Err(RuleId::ImplicitlyOptional.error(context, &args))
            }
            (Self::ForcedFalse(reason), Some(true)) => {
                let args = [("displayed", reason.displayed())];
                Err(RuleId::ImplicitlyNonOptional.error(context, &args))
            }
            (Self::ForcedTrue(_), _) => Ok(true),
            (Self::ForcedFalse(_), _) => Ok(false),
            (Self::Configurable, explicit) => Ok(explicit.unwrap_or(false)),
        }
    }

    #[must_use]
    pub const fn forced(self) -> Option<bool> {
        match self {
            Self::Configurable => None,
            Self::ForcedTrue(_) => Some(true),
            Self::ForcedFalse(_) => Some(false),
        }
    }
}

/// Inverse links are engine-side arrays of objects and never nullable.
pub const INVERSE_LINK_OPTIONALITY: Optionality =
    Optionality::ForcedFalse(ForcedReason::LinkingObjects);

pub static OPTIONALITY: [(Position, ElementClass, Optionality); 12] = [
    (
        Position::Scalar,
        ElementClass::Mixed,
        Optionality::ForcedTrue(ForcedReason::Mixed),
    ),
    (
        Position::Scalar,
        ElementClass::Primitive,
        Optionality::Configurable,
    ),
    (
        Position::Scalar,
        ElementClass::UserDefined,
        Optionality::ForcedTrue(ForcedReason::UserDefinedNullable),
    ),
    (
        Position::ListElement,
        ElementClass::Mixed,
        Optionality::ForcedTrue(ForcedReason::Mixed),
    ),
    (
        Position::ListElement,
        ElementClass::Primitive,
        Optionality::Configurable,
    ),
    (
        Position::ListElement,
        ElementClass::UserDefined,
        Optionality::ForcedFalse(ForcedReason::UserDefinedInListOrSet),
    ),
    (
        Position::SetElement,
        ElementClass::Mixed,
        Optionality::ForcedTrue(ForcedReason::Mixed),
    ),
    (
        Position::SetElement,
        ElementClass::Primitive,
        Optionality::Configurable,
    ),
    (
        Position::SetElement,
        ElementClass::UserDefined,
        Optionality::ForcedFalse(ForcedReason::UserDefinedInListOrSet),
    ),
    (
        Position::DictionaryElement,
        ElementClass::Mixed,
        Optionality::ForcedTrue(ForcedReason::Mixed),
    ),
    (
        Position::DictionaryElement,
        ElementClass::Primitive,
        Optionality::Configurable,
    ),
    (
        Position::DictionaryElement,
        ElementClass::UserDefined,
        Optionality::ForcedTrue(ForcedReason::UserDefinedNullable),
    ),
];

/// Look up the optionality outcome for an element at a position.
#[must_use]
pub fn implied_optionality(position: Position, element: ElementClass) -> Optionality {
    OPTIONALITY
        .iter()
        .find(|(p, e, _)| *p == position && *e == element)
        .map_or(Optionality::Configurable, |(_, _, outcome)| *outcome)
}
