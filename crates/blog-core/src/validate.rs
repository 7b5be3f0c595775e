//! Declarative field validation for inbound payloads.
//!
//! A [`Validator`] holds one [`FieldRule`] per field name. Validation walks the
//! requested field names in order and stops at the first failure, returning
//! that field's message. Fields without a rule are ignored.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::errors::CoreError;
use crate::ids::is_identifier;

/// Expected JSON shape of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Array,
    ObjectId,
    Number,
    Boolean,
}

impl FieldType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Array => "array",
            Self::ObjectId => "objectId",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Array => value.is_array(),
            Self::ObjectId => value.as_str().is_some_and(is_identifier),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule for a single field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub ty: FieldType,
    pub required: bool,
    required_message: Option<String>,
    type_message: Option<String>,
}

impl FieldRule {
    #[must_use]
    pub const fn new(ty: FieldType) -> Self {
        Self {
            ty,
            required: false,
            required_message: None,
            type_message: None,
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Use the same message for the missing and wrong-type failures.
    #[must_use]
    pub fn message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.required_message(message.clone()).type_message(message)
    }

    #[must_use]
    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn type_message(mut self, message: impl Into<String>) -> Self {
        self.type_message = Some(message.into());
        self
    }

    fn check(&self, field: &str, value: Option<&Value>) -> Result<(), String> {
        match value {
            None | Some(Value::Null) => {
                if self.required {
                    return Err(self.missing(field));
                }
                Ok(())
            }
            Some(value) => {
                if self.required && is_empty(value) {
                    return Err(self.missing(field));
                }
                if self.ty.matches(value) {
                    Ok(())
                } else {
                    Err(self
                        .type_message
                        .clone()
                        .unwrap_or_else(|| format!("{field} must be of type {}", self.ty)))
                }
            }
        }
    }

    fn missing(&self, field: &str) -> String {
        self.required_message
            .clone()
            .unwrap_or_else(|| format!("{field} is required"))
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// A named set of field rules.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: HashMap<String, FieldRule>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rule(mut self, field: &str, rule: FieldRule) -> Self {
        self.rules.insert(field.to_string(), rule);
        self
    }

    /// Validate `fields` of `object` in order.
    ///
    /// A non-object input is treated as an object with no fields.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` carrying the first failing field's message.
    pub fn validate(&self, object: &Value, fields: &[&str]) -> Result<(), CoreError> {
        for field in fields {
            let Some(rule) = self.rules.get(*field) else {
                continue;
            };
            rule.check(field, object.get(*field))
                .map_err(CoreError::Validation)?;
        }
        Ok(())
    }
}
