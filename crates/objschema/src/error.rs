use crate::validate::rules::RuleId;
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Raised at the first violated rule. `message` is the rendered text of the
/// rule that fired and is stable across releases; callers may match on
/// substrings of it.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct SchemaError {
    pub class: ErrorClass,
    pub rule: RuleId,
    pub message: String,
}

impl SchemaError {
    pub(crate) fn new(rule: RuleId, message: impl Into<String>) -> Self {
        Self {
            class: rule.rule().class,
            rule,
            message: message.into(),
        }
    }

    /// Message prefixed with its failure class, e.g. `grammar: ...`.
    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {}", self.class, self.message)
    }
}

///
/// ErrorClass
/// Failure taxonomy; every rule in the validation table belongs to one.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    /// Malformed shorthand type string.
    #[display("grammar")]
    Grammar,

    /// Relaxed descriptor missing a required field, carrying an unknown
    /// field, or holding a field of the wrong data type.
    #[display("shape")]
    Shape,

    /// Explicit `optional` contradicting a forced default.
    #[display("optionality_conflict")]
    OptionalityConflict,

    /// Object-schema level problem.
    #[display("schema_shape")]
    SchemaShape,

    /// Engine-side descriptor that cannot be decoded.
    #[display("engine_format")]
    EngineFormat,
}
