//! Relaxed to canonical conversion.

mod object;
mod property;

pub use object::{
    normalize_object_schema, normalize_object_schema_with, normalize_realm_schema,
    normalize_realm_schema_with,
};
pub use property::normalize_property;
