//! Describes JSON objects so they can be validated like typed structs.
//!
//! Each top-level key becomes a member. Its column type comes from the JSON
//! value: booleans, integers, floats and strings are scalars; `null` binds
//! as a nullable string; arrays and nested objects are listed but never
//! bound.

use std::fs::read_to_string;
use std::io;
use std::path::{Path, PathBuf};

use exval::{MemberDescriptor, ScalarType, TypeDescriptor, Value};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

/// A JSON object used as a validation candidate.
pub type JsonObject = Map<String, JsonValue>;

/// Errors loading a candidate object.
#[derive(Debug, Error)]
pub enum ObjectError {
    #[error("cannot read object file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} must contain a JSON object, found {found}", .path.display())]
    NotAnObject { path: PathBuf, found: &'static str },
}

/// Read a JSON object from `path`.
pub fn load_object(path: &Path) -> Result<JsonObject, ObjectError> {
    let content = read_to_string(path).map_err(|source| ObjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: JsonValue = serde_json::from_str(&content).map_err(|source| ObjectError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        JsonValue::Object(object) => Ok(object),
        other => Err(ObjectError::NotAnObject {
            path: path.to_path_buf(),
            found: json_kind(&other),
        }),
    }
}

/// Build an object from `name=value` pairs.
///
/// Values that parse as JSON (`true`, `12`, `1.5`, `null`, `"quoted"`) keep
/// that type; anything else is a string.
pub fn object_from_pairs(pairs: &[(String, String)]) -> JsonObject {
    pairs
        .iter()
        .map(|(name, raw)| {
            let value = serde_json::from_str::<JsonValue>(raw)
                .unwrap_or_else(|_| JsonValue::String(raw.clone()));
            (name.clone(), value)
        })
        .collect()
}

/// Describe `object`.
///
/// Members named in `read_only` are marked read-only. `column_types`
/// overrides the column type inferred from a member's JSON value.
pub fn describe_object(
    type_name: &str,
    object: &JsonObject,
    read_only: &[String],
    column_types: &[(String, ScalarType)],
) -> TypeDescriptor<JsonObject> {
    let requested = read_only
        .iter()
        .chain(column_types.iter().map(|(name, _)| name));
    for name in requested.filter(|name| !object.contains_key(*name)) {
        tracing::warn!(member = %name, "member is not present in the object");
    }

    let mut descriptor = TypeDescriptor::new(type_name);
    for (name, value) in object {
        let declared = column_types
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, ty)| *ty);
        let member = match declared.or_else(|| scalar_type(value)) {
            Some(ty) => {
                let key = name.clone();
                MemberDescriptor::scalar(name.clone(), ty, move |object: &JsonObject| {
                    to_value(object.get(&key))
                })
            }
            None => MemberDescriptor::other(name.clone(), json_kind(value)),
        };
        let member = if read_only.contains(name) {
            member.read_only()
        } else {
            member
        };
        descriptor.push(member);
    }
    descriptor
}

/// Column type for a JSON value; `None` for arrays and objects.
fn scalar_type(value: &JsonValue) -> Option<ScalarType> {
    match value {
        JsonValue::Bool(_) => Some(ScalarType::Boolean),
        JsonValue::Number(n) if n.is_i64() => Some(ScalarType::Int64),
        JsonValue::Number(n) if n.is_u64() => Some(ScalarType::UInt64),
        JsonValue::Number(_) => Some(ScalarType::Float64),
        JsonValue::String(_) | JsonValue::Null => Some(ScalarType::String),
        JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}

fn to_value(value: Option<&JsonValue>) -> Value {
    match value {
        None | Some(JsonValue::Null) => Value::Null,
        Some(JsonValue::Bool(b)) => Value::Boolean(*b),
        Some(JsonValue::Number(n)) => n
            .as_i64()
            .map(Value::from)
            .or_else(|| n.as_u64().map(Value::from))
            .or_else(|| n.as_f64().map(Value::from))
            .unwrap_or(Value::Null),
        Some(JsonValue::String(s)) => Value::String(s.clone()),
        Some(other) => Value::String(other.to_string()),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
