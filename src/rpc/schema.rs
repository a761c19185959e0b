//! Declarative input contracts and the validator that interprets them.
//!
//! A [`Contract`] describes an object input as an ordered list of named
//! fields, each with a [`FieldKind`] and a required flag. [`validate`] checks
//! a raw JSON value against it and either returns the normalized object
//! (unknown keys dropped, coercions applied) or every failing field at once.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::FieldError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "of", rename_all = "lowercase")]
pub enum FieldKind {
    String,
    /// Any finite number; numeric strings are coerced
    Number,
    /// Whole number; numeric strings are coerced
    Integer,
    /// `"true"` / `"false"` strings are coerced
    Boolean,
    /// RFC 3339 timestamp, normalized to UTC
    Date,
    Enum(Vec<String>),
    Array(Box<FieldKind>),
}

impl FieldKind {
    pub fn one_of(values: &[&str]) -> Self {
        FieldKind::Enum(values.iter().map(|v| v.to_string()).collect())
    }

    pub fn array_of(element: FieldKind) -> Self {
        FieldKind::Array(Box::new(element))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub required: bool,
    pub kind: FieldKind,
}

/// Input contract of a procedure: an object with declared fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Contract {
    fields: Vec<FieldSpec>,
}

impl Contract {
    pub fn object() -> Self {
        Self::default()
    }

    pub fn required(self, name: &str, kind: FieldKind) -> Self {
        self.field(name, true, kind)
    }

    pub fn optional(self, name: &str, kind: FieldKind) -> Self {
        self.field(name, false, kind)
    }

    /// Declare a field; redeclaring a name replaces the earlier spec
    pub fn field(mut self, name: &str, required: bool, kind: FieldKind) -> Self {
        let spec = FieldSpec {
            name: name.to_string(),
            required,
            kind,
        };
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

/// Every field that failed validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("input validation failed for {} field(s)", .causes.len())]
pub struct ValidationError {
    pub causes: Vec<FieldError>,
}

/// Validate `raw` against `contract`. Pure: the same pair always yields the same outcome.
pub fn validate(contract: &Contract, raw: &Value) -> Result<Value, ValidationError> {
    let object = match raw {
        Value::Object(map) => map,
        other => {
            return Err(ValidationError {
                causes: vec![FieldError::new(
                    "",
                    format!("Expected object, received {}", type_name(other)),
                )],
            })
        }
    };

    let mut causes = Vec::new();
    let mut output = Map::new();

    for spec in &contract.fields {
        match object.get(&spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    causes.push(FieldError::new(&spec.name, "Required"));
                }
            }
            Some(value) => {
                if let Some(checked) = check(&spec.kind, value, &spec.name, &mut causes) {
                    output.insert(spec.name.clone(), checked);
                }
            }
        }
    }

    if causes.is_empty() {
        Ok(Value::Object(output))
    } else {
        Err(ValidationError { causes })
    }
}

fn check(kind: &FieldKind, value: &Value, path: &str, causes: &mut Vec<FieldError>) -> Option<Value> {
    let checked = match kind {
        FieldKind::String => value.as_str().map(|_| value.clone()),
        FieldKind::Number => coerce_number(value),
        FieldKind::Integer => coerce_integer(value),
        FieldKind::Boolean => match value {
            Value::Bool(_) => Some(value.clone()),
            Value::String(s) if s == "true" => Some(Value::Bool(true)),
            Value::String(s) if s == "false" => Some(Value::Bool(false)),
            _ => None,
        },
        FieldKind::Date => value
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| {
                Value::String(dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true))
            }),
        FieldKind::Enum(allowed) => match value.as_str() {
            Some(s) if allowed.iter().any(|a| a == s) => Some(value.clone()),
            Some(s) => {
                causes.push(FieldError::new(
                    path,
                    format!(
                        "Invalid enum value. Expected {}, received '{}'",
                        allowed
                            .iter()
                            .map(|a| format!("'{}'", a))
                            .collect::<Vec<_>>()
                            .join(" | "),
                        s
                    ),
                ));
                return None;
            }
            None => None,
        },
        FieldKind::Array(element) => {
            let Some(items) = value.as_array() else {
                causes.push(mismatch(kind, value, path));
                return None;
            };
            let before = causes.len();
            let checked: Vec<Value> = items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| check(element, item, &format!("{}[{}]", path, i), causes))
                .collect();
            if causes.len() > before {
                return None;
            }
            return Some(Value::Array(checked));
        }
    };

    if checked.is_none() {
        causes.push(mismatch(kind, value, path));
    }
    checked
}

fn coerce_number(value: &Value) -> Option<Value> {
    match value {
        Value::Number(_) => Some(value.clone()),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Some(Value::from(i));
            }
            s.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
        }
        _ => None,
    }
}

fn coerce_integer(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15).map(|f| f as i64))
            .map(Value::from),
        Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
        _ => None,
    }
}

fn mismatch(kind: &FieldKind, value: &Value, path: &str) -> FieldError {
    let expected = match kind {
        FieldKind::String => "string",
        FieldKind::Number => "number",
        FieldKind::Integer => "integer",
        FieldKind::Boolean => "boolean",
        FieldKind::Date => "RFC 3339 date string",
        FieldKind::Enum(_) => "string",
        FieldKind::Array(_) => "array",
    };
    FieldError::new(path, format!("Expected {}, received {}", expected, type_name(value)))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
