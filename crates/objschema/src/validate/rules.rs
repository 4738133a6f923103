//! The validation rule table.
//!
//! Every rejection raised by the parser, the normalizers, the sanitizer and
//! the engine codec is a row in [`RULES`]. Message templates are part of the
//! external contract; `{key}` placeholders are filled in at render time.

use crate::{
    error::{ErrorClass, SchemaError},
    types::PropertyPath,
};

///
/// RuleId
///
/// Discriminants index into [`RULES`]; both are kept in sorted order.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum RuleId {
    CollectionCannotBeOptional,
    CollectionNameAsType,
    DuplicateOptionalMarker,
    DuplicateProperty,
    ElementTypeRequired,
    EmbeddedAndAsymmetric,
    EmptyObjectType,
    EngineCollectionBits,
    EngineInverseLinkShape,
    EngineLinkOriginMissing,
    EngineObjectTypeMissing,
    EngineUnknownType,
    ExpectedFieldType,
    ImplicitlyNonOptional,
    ImplicitlyNonOptionalShorthand,
    ImplicitlyOptional,
    InverseRelationshipKeyword,
    LinkOriginRequired,
    NestedCollection,
    ObjectTypeInvalid,
    ObjectTypeNotAllowed,
    OptionalPrimaryKey,
    OptionalTypeRequired,
    PrimaryKeyNotDeclared,
    PrimaryKeyType,
    PropertyArrays,
    PropertyOnlyForLinkingObjects,
    RelationshipKeyword,
    ShorthandInObject,
    TypeFieldRequired,
    TypeRequired,
    UnexpectedObjectFields,
    UnexpectedPropertyFields,
    UserDefinedObjectTypeRequired,
    UserDefinedTypeAsType,
}

impl RuleId {
    #[must_use]
    pub fn rule(self) -> &'static Rule {
        &RULES[self as usize]
    }

    /// Render the rule's message without any context prefix.
    ///
    /// The template is scanned once, left to right; substituted values are
    /// copied verbatim and never scanned for placeholders themselves.
    #[must_use]
    pub fn render(self, args: &[(&str, &str)]) -> String {
        let template = self.rule().template;
        let mut message = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            let (head, tail) = rest.split_at(start);
            message.push_str(head);

            if let Some((value, len)) = placeholder(tail, args) {
                message.push_str(value);
                rest = &tail[len..];
                continue;
            }

            // literal brace
            message.push('{');
            rest = &tail[1..];
        }
        message.push_str(rest);

        message
    }

    /// Build the error for this rule, prefixed with the schema location it
    /// was detected at.
    #[must_use]
    pub fn error(self, context: ErrorContext<'_>, args: &[(&str, &str)]) -> SchemaError {
        let message = self.render(args);
        let message = match context {
            ErrorContext::None => message,
            ErrorContext::Object(object) => {
                format!("Invalid schema for object '{object}': {message}")
            }
            ErrorContext::Property(path) => {
                format!("Invalid schema for property '{path}': {message}")
            }
        };

        SchemaError::new(self, message)
    }
}

// `{key}` at the start of `tail` with a matching argument: the value and
// the placeholder length.
fn placeholder<'a>(tail: &str, args: &[(&str, &'a str)]) -> Option<(&'a str, usize)> {
    let end = tail.find('}')?;
    let key = &tail[1..end];
    let (_, value) = args.iter().find(|(name, _)| *name == key)?;

    Some((*value, end + 1))
}

///
/// ErrorContext
///

#[derive(Clone, Copy, Debug)]
pub enum ErrorContext<'a> {
    None,
    Object(&'a str),
    Property(PropertyPath<'a>),
}

///
/// Rule
///

#[derive(Debug)]
pub struct Rule {
    pub id: RuleId,
    pub class: ErrorClass,
    pub template: &'static str,
}

const fn rule(id: RuleId, class: ErrorClass, template: &'static str) -> Rule {
    Rule {
        id,
        class,
        template,
    }
}

/// Number of rows in the rule table.
pub const RULE_COUNT: usize = 35;

pub static RULES: [Rule; RULE_COUNT] = [
    rule(
        RuleId::CollectionCannotBeOptional,
        ErrorClass::Grammar,
        "Collections cannot be optional. To allow elements of the collection to be optional, use '?' after the element type. See examples: 'int?[]', 'int?{}', 'int?<>'.",
    ),
    rule(
        RuleId::CollectionNameAsType,
        ErrorClass::Grammar,
        "Cannot use the collection name. See examples: 'int[]' (list), 'int{}' (dictionary), 'int<>' (set).",
    ),
    rule(
        RuleId::DuplicateOptionalMarker,
        ErrorClass::Grammar,
        "The optional marker '?' can only be used once. See examples: 'int?', 'int?[]'",
    ),
    rule(
        RuleId::DuplicateProperty,
        ErrorClass::SchemaShape,
        "The property '{property}' is declared more than once.",
    ),
    rule(
        RuleId::ElementTypeRequired,
        ErrorClass::Grammar,
        "The element type must be specified. See example: 'int{suffix}'",
    ),
    rule(
        RuleId::EmbeddedAndAsymmetric,
        ErrorClass::SchemaShape,
        "'{object}' cannot be both embedded and asymmetric",
    ),
    rule(
        RuleId::EmptyObjectType,
        ErrorClass::SchemaShape,
        "'objectType' cannot be an empty string.",
    ),
    rule(
        RuleId::EngineCollectionBits,
        ErrorClass::EngineFormat,
        "Unexpected type '{code}': more than one collection flag is set",
    ),
    rule(
        RuleId::EngineInverseLinkShape,
        ErrorClass::EngineFormat,
        "Expected property '{property}' with 'linkingObjects' type to be a non-nullable array",
    ),
    rule(
        RuleId::EngineLinkOriginMissing,
        ErrorClass::EngineFormat,
        "Expected property '{property}' with 'linkingObjects' type to declare a linkOriginPropertyName",
    ),
    rule(
        RuleId::EngineObjectTypeMissing,
        ErrorClass::EngineFormat,
        "Expected property '{property}' with '{type}' type to declare an objectType",
    ),
    rule(
        RuleId::EngineUnknownType,
        ErrorClass::EngineFormat,
        "Unexpected type '{code}'",
    ),
    rule(
        RuleId::ExpectedFieldType,
        ErrorClass::Shape,
        "Expected {target} to be {expected}, got {actual}",
    ),
    rule(
        RuleId::ImplicitlyNonOptional,
        ErrorClass::OptionalityConflict,
        "'optional' is implicitly 'false' for {displayed} and cannot be set to 'true'.",
    ),
    rule(
        RuleId::ImplicitlyNonOptionalShorthand,
        ErrorClass::OptionalityConflict,
        "'optional' is implicitly 'false' for user-defined types in lists and sets and cannot be set to 'true'. Remove '?' or change the type.",
    ),
    rule(
        RuleId::ImplicitlyOptional,
        ErrorClass::OptionalityConflict,
        "'optional' is implicitly 'true' for {displayed} and cannot be set to 'false'.",
    ),
    rule(
        RuleId::InverseRelationshipKeyword,
        ErrorClass::Grammar,
        "To define an inverse relationship, use { type: 'linkingObjects', objectType: 'ObjectName', property: 'ObjectProperty' }",
    ),
    rule(
        RuleId::LinkOriginRequired,
        ErrorClass::Shape,
        "The name of the property the object links to must be specified through 'property'.",
    ),
    rule(
        RuleId::NestedCollection,
        ErrorClass::SchemaShape,
        "Nested collections are not supported.",
    ),
    rule(
        RuleId::ObjectTypeInvalid,
        ErrorClass::Shape,
        "A valid 'objectType' must be specified.",
    ),
    rule(
        RuleId::ObjectTypeNotAllowed,
        ErrorClass::Shape,
        "'objectType' cannot be defined when 'type' is '{type}'.",
    ),
    rule(
        RuleId::OptionalPrimaryKey,
        ErrorClass::SchemaShape,
        "Optional properties cannot be used as a primary key.",
    ),
    rule(
        RuleId::OptionalTypeRequired,
        ErrorClass::Grammar,
        "The type must be specified. See examples: 'int?', 'int?[]'",
    ),
    rule(
        RuleId::PrimaryKeyNotDeclared,
        ErrorClass::SchemaShape,
        "The primary key '{primary_key}' must name a declared property.",
    ),
    rule(
        RuleId::PrimaryKeyType,
        ErrorClass::SchemaShape,
        "Properties of type '{type}' cannot be used as a primary key.",
    ),
    rule(
        RuleId::PropertyArrays,
        ErrorClass::SchemaShape,
        "Array of properties are no longer supported. Use an object instead.",
    ),
    rule(
        RuleId::PropertyOnlyForLinkingObjects,
        ErrorClass::Shape,
        "'property' can only be defined when 'type' is 'linkingObjects'.",
    ),
    rule(
        RuleId::RelationshipKeyword,
        ErrorClass::Grammar,
        "To define a relationship, use either 'ObjectName' or { type: 'object', objectType: 'ObjectName' }",
    ),
    rule(
        RuleId::ShorthandInObject,
        ErrorClass::Shape,
        "Cannot use shorthand '{shorthands}' in combination with using an object.",
    ),
    rule(
        RuleId::TypeFieldRequired,
        ErrorClass::Shape,
        "'type' must be specified.",
    ),
    rule(
        RuleId::TypeRequired,
        ErrorClass::Grammar,
        "The type must be specified.",
    ),
    rule(
        RuleId::UnexpectedObjectFields,
        ErrorClass::Shape,
        "Unexpected field(s) found on the schema for object '{object}': '{fields}'.",
    ),
    rule(
        RuleId::UnexpectedPropertyFields,
        ErrorClass::Shape,
        "Unexpected field(s) found on the schema for property '{property}' on '{object}': '{fields}'.",
    ),
    rule(
        RuleId::UserDefinedObjectTypeRequired,
        ErrorClass::Shape,
        "A user-defined type must be specified through 'objectType'.",
    ),
    rule(
        RuleId::UserDefinedTypeAsType,
        ErrorClass::Shape,
        "If you meant to define a relationship, use { type: 'object', objectType: '{type}' } or { type: 'linkingObjects', objectType: '{type}', property: 'The {type} property' }",
    ),
];
