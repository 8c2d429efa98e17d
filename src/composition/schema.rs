//! Declared parameter schemas and a validator for JSON props.
//!
//! Unknown fields are accepted and ignored; only declared fields are checked.

use serde_json::Value;

use crate::foundation::error::{FamilyError, FamilyResult};

/// Shape a prop value must have.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    /// Any string.
    String,
    /// Any finite number.
    Number,
    /// Non-negative integer.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// Number of seconds or a timing string.
    Time,
    /// One of a fixed set of strings.
    Enum {
        /// Accepted values.
        values: Vec<&'static str>,
    },
    /// Homogeneous list, optionally of a fixed length.
    Array {
        /// Element type.
        item: Box<FieldType>,
        /// Required length.
        #[serde(skip_serializing_if = "Option::is_none")]
        len: Option<usize>,
    },
    /// String-keyed map with homogeneous values.
    Map {
        /// Value type.
        value: Box<FieldType>,
    },
    /// Nested object with its own fields.
    Object {
        /// Declared fields.
        fields: Vec<FieldSchema>,
    },
}

impl FieldType {
    /// List of `item`.
    pub fn array(item: FieldType) -> Self {
        Self::Array {
            item: Box::new(item),
            len: None,
        }
    }

    /// List of exactly `len` `item`s.
    pub fn array_of_len(item: FieldType, len: usize) -> Self {
        Self::Array {
            item: Box::new(item),
            len: Some(len),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Number => "a finite number",
            Self::Integer => "a non-negative integer",
            Self::Boolean => "a boolean",
            Self::Time => "a number or a timing string",
            Self::Enum { .. } => "one of the listed values",
            Self::Array { .. } => "an array",
            Self::Map { .. } | Self::Object { .. } => "an object",
        }
    }
}

/// One declared prop.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FieldSchema {
    /// JSON key.
    pub name: &'static str,
    /// Expected shape.
    #[serde(rename = "type")]
    pub ty: FieldType,
    /// Whether the key must be present.
    pub required: bool,
    /// Value used when the key is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Human-readable hint.
    pub description: &'static str,
}

impl FieldSchema {
    /// A key that must be present.
    pub fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: true,
            default: None,
            description: "",
        }
    }

    /// A key that may be absent.
    pub fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(name, ty)
        }
    }

    /// Optional key with a default.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.required = false;
        self.default = Some(value.into());
        self
    }

    /// Attach a hint.
    pub fn describe(mut self, text: &'static str) -> Self {
        self.description = text;
        self
    }
}

/// Check `props` against `schema`. Errors name the offending path, e.g. `objects[3].objectImage`.
pub fn validate_props(schema: &[FieldSchema], props: &Value) -> FamilyResult<()> {
    check_object(schema, props, "")
}

fn check_object(fields: &[FieldSchema], value: &Value, path: &str) -> FamilyResult<()> {
    let Some(map) = value.as_object() else {
        let at = if path.is_empty() { "props" } else { path };
        return Err(FamilyError::validation(format!("{at} must be an object")));
    };
    for field in fields {
        let child = join(path, field.name);
        match map.get(field.name) {
            None | Some(Value::Null) if field.required => {
                return Err(FamilyError::validation(format!("missing required field '{child}'")));
            }
            None | Some(Value::Null) => {}
            Some(v) => check_value(&field.ty, v, &child)?,
        }
    }
    Ok(())
}

fn check_value(ty: &FieldType, v: &Value, path: &str) -> FamilyResult<()> {
    let ok = match ty {
        FieldType::String => v.is_string(),
        FieldType::Number => v.as_f64().is_some_and(f64::is_finite),
        FieldType::Integer => v.is_u64(),
        FieldType::Boolean => v.is_boolean(),
        FieldType::Time => v.is_string() || v.as_f64().is_some_and(f64::is_finite),
        FieldType::Enum { values } => {
            if let Some(s) = v.as_str() {
                if !values.contains(&s) {
                    return Err(FamilyError::validation(format!(
                        "field '{path}' must be one of {values:?}, got '{s}'"
                    )));
                }
                true
            } else {
                false
            }
        }
        FieldType::Array { item, len } => {
            let Some(items) = v.as_array() else {
                return Err(mismatch(ty, path));
            };
            if let Some(n) = len
                && items.len() != *n
            {
                return Err(FamilyError::validation(format!(
                    "field '{path}' must contain exactly {n} entries, got {}",
                    items.len()
                )));
            }
            for (i, item_v) in items.iter().enumerate() {
                check_value(item, item_v, &format!("{path}[{i}]"))?;
            }
            true
        }
        FieldType::Map { value } => {
            let Some(entries) = v.as_object() else {
                return Err(mismatch(ty, path));
            };
            for (k, entry) in entries {
                check_value(value, entry, &join(path, k))?;
            }
            true
        }
        FieldType::Object { fields } => {
            if !v.is_object() {
                return Err(mismatch(ty, path));
            }
            check_object(fields, v, path)?;
            true
        }
    };
    if ok { Ok(()) } else { Err(mismatch(ty, path)) }
}

fn mismatch(ty: &FieldType, path: &str) -> FamilyError {
    FamilyError::validation(format!("field '{path}' must be {}", ty.describe()))
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_owned()
    } else {
        format!("{path}.{key}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/schema.rs"]
mod tests;
