//! Shorthand type-string grammar.
//!
//! ```text
//! type     := element collection?
//! element  := base '?'?
//! collection := '[]' | '<>' | '{}'
//! base     := primitive | ClassName
//! ```
//!
//! Parsing produces a [`TypeExpr`]; [`parse_type_string`] then applies the
//! position-dependent optionality defaults and yields a relaxed descriptor.

mod expr;

pub use expr::{BaseType, CollectionSuffix, TypeExpr};

use crate::{
    error::SchemaError,
    prelude::*,
    validate::{
        optionality::{ElementClass, Optionality, Position, implied_optionality},
        rules::{ErrorContext, RuleId},
    },
};
use std::fmt;

///
/// ParseError
///
/// Grammar failure without object/property context. The normalizer lifts
/// it into a [`SchemaError`] with [`ParseError::at`].
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    TypeRequired,
    ElementTypeRequired { suffix: CollectionSuffix },
    NestedCollection,
    OptionalTypeRequired,
    CollectionCannotBeOptional,
    DuplicateOptionalMarker,
    CollectionNameAsType,
    RelationshipKeyword,
    InverseRelationshipKeyword,
    ImplicitlyNonOptional,
}

impl ParseError {
    #[must_use]
    pub const fn rule(self) -> RuleId {
        match self {
            Self::TypeRequired => RuleId::TypeRequired,
            Self::ElementTypeRequired { .. } => RuleId::ElementTypeRequired,
            Self::NestedCollection => RuleId::NestedCollection,
            Self::OptionalTypeRequired => RuleId::OptionalTypeRequired,
            Self::CollectionCannotBeOptional => RuleId::CollectionCannotBeOptional,
            Self::DuplicateOptionalMarker => RuleId::DuplicateOptionalMarker,
            Self::CollectionNameAsType => RuleId::CollectionNameAsType,
            Self::RelationshipKeyword => RuleId::RelationshipKeyword,
            Self::InverseRelationshipKeyword => RuleId::InverseRelationshipKeyword,
            Self::ImplicitlyNonOptional => RuleId::ImplicitlyNonOptionalShorthand,
        }
    }

    const fn args(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::ElementTypeRequired { suffix } => suffix.template_args(),
            _ => &[],
        }
    }

    /// Attach the property the type string was declared for.
    #[must_use]
    pub fn at(self, path: PropertyPath<'_>) -> SchemaError {
        self.rule().error(ErrorContext::Property(path), self.args())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rule().render(self.args()))
    }
}

impl std::error::Error for ParseError {}

/// Parse a shorthand type string into its expression tree.
pub fn parse_type_expr(input: &str) -> Result<TypeExpr, ParseError> {
    if input.is_empty() {
        return Err(ParseError::TypeRequired);
    }

    match CollectionSuffix::split(input) {
        Some((body, suffix)) => {
            if body.is_empty() {
                return Err(ParseError::ElementTypeRequired { suffix });
            }
            if CollectionSuffix::split(body).is_some() {
                return Err(ParseError::NestedCollection);
            }

            Ok(suffix.wrap(parse_element(body)?))
        }
        None => parse_element(input),
    }
}

// element := base '?'?
fn parse_element(input: &str) -> Result<TypeExpr, ParseError> {
    let Some(inner) = input.strip_suffix('?') else {
        return Ok(TypeExpr::Scalar(parse_base(input)?));
    };

    if inner.is_empty() {
        return Err(ParseError::OptionalTypeRequired);
    }
    if CollectionSuffix::split(inner).is_some() {
        return Err(ParseError::CollectionCannotBeOptional);
    }
    if inner.ends_with('?') {
        return Err(ParseError::DuplicateOptionalMarker);
    }

    let base = parse_base(inner)?;

    Ok(TypeExpr::Optional(Box::new(TypeExpr::Scalar(base))))
}

fn parse_base(name: &str) -> Result<BaseType, ParseError> {
    match PropertyTypeName::from_name(name) {
        Some(ty) if ty.is_primitive() => Ok(BaseType::Primitive(ty)),
        Some(PropertyTypeName::Object) => Err(ParseError::RelationshipKeyword),
        Some(PropertyTypeName::LinkingObjects) => Err(ParseError::InverseRelationshipKeyword),
        Some(_) => Err(ParseError::CollectionNameAsType),
        None => Ok(BaseType::UserDefined(name.to_string())),
    }
}

///
/// ResolvedType
/// Outer tag, element/target type and defaulted optionality of a shorthand.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedType {
    pub type_name: PropertyTypeName,
    pub object_type: Option<String>,
    pub optional: bool,
}

/// Apply the position-dependent optionality defaults to a parsed shorthand.
pub fn resolve_type_expr(expr: &TypeExpr) -> Result<ResolvedType, ParseError> {
    let (base, marked_optional) = expr.element();

    let optional = match implied_optionality(expr.position(), base.class()) {
        Optionality::ForcedFalse(_) if marked_optional => {
            return Err(ParseError::ImplicitlyNonOptional);
        }
        outcome => outcome.forced().unwrap_or(marked_optional),
    };
    let (type_name, object_type) = expr.declared_type();

    Ok(ResolvedType {
        type_name,
        object_type,
        optional,
    })
}

/// Parse a shorthand type string into a relaxed descriptor whose `optional`
/// is always set, with the position-dependent defaults already applied.
pub fn parse_type_string(input: &str) -> Result<RelaxedProperty, ParseError> {
    let resolved = resolve_type_expr(&parse_type_expr(input)?)?;

    Ok(RelaxedProperty {
        type_name: resolved.type_name.name().to_string(),
        object_type: resolved.object_type,
        optional: Some(resolved.optional),
        ..RelaxedProperty::default()
    })
}

/// Shorthand markers present at the end of `input`, outermost first.
#[must_use]
pub fn shorthand_markers(input: &str) -> Vec<&'static str> {
    let mut markers = Vec::new();
    let mut rest = input;

    if let Some((body, suffix)) = CollectionSuffix::split(rest) {
        markers.push(suffix.as_str());
        rest = body;
    }
    if rest.ends_with('?') {
        markers.push("?");
    }

    markers
}

impl BaseType {
    const fn class(&self) -> ElementClass {
        match self {
            Self::Primitive(PropertyTypeName::Mixed) => ElementClass::Mixed,
            Self::Primitive(_) => ElementClass::Primitive,
            Self::UserDefined(_) => ElementClass::UserDefined,
        }
    }
}

impl TypeExpr {
    /// Outer type tag and `objectType` this expression declares.
    pub(crate) fn declared_type(&self) -> (PropertyTypeName, Option<String>) {
        match (self.collection(), self.element().0) {
            (Some(collection), base) => (collection, Some(base.name().to_string())),
            (None, BaseType::Primitive(ty)) => (*ty, None),
            (None, BaseType::UserDefined(class)) => (PropertyTypeName::Object, Some(class.clone())),
        }
    }

    const fn position(&self) -> Position {
        match self {
            Self::List(_) => Position::ListElement,
            Self::Set(_) => Position::SetElement,
            Self::Dictionary(_) => Position::DictionaryElement,
            Self::Scalar(_) | Self::Optional(_) => Position::Scalar,
        }
    }
}
