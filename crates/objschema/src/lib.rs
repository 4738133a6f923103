//! Schema normalization and type transformation for object-model
//! descriptions.
//!
//! Three representations are involved: the relaxed, user-authored form
//! (shorthand strings such as `"string?[]"` or relaxed objects), the
//! canonical form where every defaulted field is explicit, and the
//! flag-encoded form read and written by the storage engine.
//!
//! ```text
//! relaxed --normalize--> canonical <--encode/decode--> engine
//! ```

pub mod codec;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod types;
pub mod validate;

pub use objschema_config::{ConfigError, NormalizeConfig};

pub use codec::{
    EngineObjectSchema, EngineProperty, TableType, decode_object_schema, decode_property,
    encode_object_schema, encode_property, type_name,
};
pub use error::{ErrorClass, SchemaError};
pub use normalize::{
    normalize_object_schema, normalize_object_schema_with, normalize_property,
    normalize_realm_schema, normalize_realm_schema_with,
};
pub use parse::{ParseError, parse_type_string};
pub use validate::sanitize::{sanitize_object_schema, sanitize_property_schema};

///
/// Prelude
///
/// Domain vocabulary only. Functions and errors stay at the crate root.
///

pub mod prelude {
    pub use crate::types::{
        CanonicalObjectSchema, CanonicalProperty, ObjectSchema, PropertiesInput, PropertyInput,
        PropertyPath, RelaxedProperty,
    };
    pub use objschema_primitives::{PropertyCategory, PropertyTypeName};
}
