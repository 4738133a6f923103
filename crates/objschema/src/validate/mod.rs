//! Validation: the rule table, optionality defaults and input sanitization.

pub mod optionality;
pub mod rules;
pub mod sanitize;
