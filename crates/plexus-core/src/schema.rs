//! ---
//! px_section: "02-component-contract"
//! px_subsection: "module"
//! px_type: "source"
//! px_scope: "code"
//! px_description: "Typed component schemas and parameter validation."
//! px_version: "v0.0.0-prealpha"
//! px_owner: "tbd"
//! ---
use std::fmt;

use serde::de::{self, DeserializeOwned, Deserializer, Unexpected, Visitor};
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::error::{ComponentError, Result};

/// Primitive shape of a schema field, used for introspection only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    List,
    Mapping,
}

/// Static description of one schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldDescriptor {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Semantic rule broken by an otherwise well-typed schema record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub path: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Typed parameter record accepted by a component type.
///
/// Structural validation (presence, types, unknown keys) comes from the serde
/// derive; implementors should mark the record `#[serde(deny_unknown_fields)]`.
pub trait ComponentSchema: DeserializeOwned + fmt::Debug + Send + 'static {
    /// Field descriptors published to hosts and tooling.
    fn fields() -> &'static [FieldDescriptor];

    /// Cross-field or value checks run after a successful parse.
    fn validate(&self) -> std::result::Result<(), FieldViolation> {
        Ok(())
    }
}

/// Parse raw params into the schema record `S` for `component`.
///
/// `null` (absent params) is treated as an empty mapping.
pub fn validate_params<S: ComponentSchema>(component: &str, raw: &Value) -> Result<S> {
    let empty;
    let raw = if raw.is_null() {
        empty = Value::Mapping(Mapping::new());
        &empty
    } else {
        raw
    };

    let record: S = serde_path_to_error::deserialize(raw).map_err(|err| {
        ComponentError::Validation {
            component: component.to_owned(),
            path: err.path().to_string(),
            message: err.inner().to_string(),
        }
    })?;

    record
        .validate()
        .map_err(|violation| ComponentError::Validation {
            component: component.to_owned(),
            path: violation.path,
            message: violation.message,
        })?;
    Ok(record)
}

/// Deserialize an integer field, accepting any integer-convertible scalar.
///
/// YAML integers, integral floats (`42.0`) and numeric strings (`'42'`) are
/// accepted. Fractional numbers, non-numeric text and collections fail.
/// Use with `#[serde(deserialize_with = "plexus_core::deserialize_integer")]`.
pub fn deserialize_integer<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IntegerVisitor)
}

struct IntegerVisitor;

impl IntegerVisitor {
    fn integral<E: de::Error>(&self, value: f64) -> std::result::Result<i64, E> {
        // 2^63 is exactly representable; anything at or above it overflows i64.
        if value.is_finite()
            && value.fract() == 0.0
            && value >= i64::MIN as f64
            && value < i64::MAX as f64
        {
            Ok(value as i64)
        } else {
            Err(E::invalid_value(Unexpected::Float(value), self))
        }
    }
}

impl<'de> Visitor<'de> for IntegerVisitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or integer-convertible value")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<i64, E> {
        Ok(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<i64, E> {
        i64::try_from(value).map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<i64, E> {
        self.integral(value)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<i64, E> {
        let trimmed = value.trim();
        if let Ok(parsed) = trimmed.parse::<i64>() {
            return Ok(parsed);
        }
        match trimmed.parse::<f64>() {
            Ok(parsed) => self
                .integral(parsed)
                .map_err(|_: E| E::invalid_value(Unexpected::Str(value), &self)),
            Err(_) => Err(E::invalid_value(Unexpected::Str(value), &self)),
        }
    }
}
