//! Field descriptors and the two places where untrusted JSON becomes an entity:
//! [`build`] for creation and [`patch`] for updates.
//!
//! Each entity type lists its own fields in [`Entity::FIELDS`](super::Entity::FIELDS).
//! Request bodies are checked against that list before anything reaches serde, so a
//! client gets `Missing name` or `Invalid price_by_night` instead of a serde message.

use super::Entity;
use serde_json::{Map, Value};
use thiserror::Error;

/// Keys owned by the storage layer. Accepted in request bodies and silently ignored.
pub const BASE_KEYS: &[&str] = &["id", "created_at", "updated_at", "__class__"];

/// JSON shape a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    TextList,
}

impl FieldKind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::Integer => value.is_i64(),
            FieldKind::Float => value.is_number(),
            FieldKind::TextList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

/// Who may write a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Set on create, changeable on update.
    Mutable,
    /// Set on create (from the body or the URL), ignored on update.
    Fixed,
    /// Never taken from a body; maintained by dedicated operations.
    Managed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub access: Access,
}

impl Field {
    pub const fn mutable(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, access: Access::Mutable }
    }

    pub const fn fixed(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, access: Access::Fixed }
    }

    pub const fn managed(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, access: Access::Managed }
    }
}

/// Rejections produced while turning a request body into an entity.
///
/// The `Display` text is exactly the message sent back to the client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FieldError {
    #[error("Missing {0}")]
    Missing(&'static str),

    #[error("Unknown field {0}")]
    Unknown(String),

    #[error("Invalid {0}")]
    Invalid(String),

    /// Passed every field check but still failed to deserialize.
    #[error("Invalid record: {0}")]
    Malformed(String),
}

fn lookup<T: Entity>(key: &str) -> Result<Option<&'static Field>, FieldError> {
    if BASE_KEYS.contains(&key) {
        return Ok(None);
    }
    T::FIELDS
        .iter()
        .find(|field| field.name == key)
        .map(Some)
        .ok_or_else(|| FieldError::Unknown(key.to_string()))
}

fn check<T: Entity>(field: &Field, value: &Value) -> Result<(), FieldError> {
    let ok = if value.is_null() {
        !T::REQUIRED.contains(&field.name)
    } else {
        field.kind.accepts(value)
    };
    if ok {
        Ok(())
    } else {
        Err(FieldError::Invalid(field.name.to_string()))
    }
}

fn decode<T: Entity>(record: Map<String, Value>) -> Result<T, FieldError> {
    serde_json::from_value(Value::Object(record)).map_err(|e| FieldError::Malformed(e.to_string()))
}

/// Builds a brand-new entity from a request body.
///
/// Required fields are checked first, in declared order. `injected` carries values the
/// caller supplies from outside the body (the parent id from the URL) and always wins
/// over whatever the body says. Identity and timestamps are always freshly generated.
pub fn build<T: Entity>(body: &Map<String, Value>, injected: Map<String, Value>) -> Result<T, FieldError> {
    if let Some(missing) = T::REQUIRED.iter().find(|name| !body.contains_key(**name)) {
        return Err(FieldError::Missing(*missing));
    }

    let mut record = Map::new();
    for (key, value) in body {
        let Some(field) = lookup::<T>(key)? else { continue };
        if field.access == Access::Managed || injected.contains_key(key) {
            continue;
        }
        check::<T>(field, value)?;
        if !value.is_null() {
            record.insert(key.clone(), value.clone());
        }
    }
    record.extend(injected);

    if let Value::Object(base) =
        serde_json::to_value(super::Base::new()).map_err(|e| FieldError::Malformed(e.to_string()))?
    {
        record.extend(base);
    }
    decode(record)
}

/// Applies an update body to a copy of `current`.
///
/// Only [`Access::Mutable`] fields change; identity, timestamps, parent links and
/// managed fields keep their stored values. A `null` clears an optional field.
pub fn patch<T: Entity>(current: &T, body: &Map<String, Value>) -> Result<T, FieldError> {
    let mut changes = Vec::new();
    for (key, value) in body {
        let Some(field) = lookup::<T>(key)? else { continue };
        if field.access != Access::Mutable {
            continue;
        }
        check::<T>(field, value)?;
        changes.push((key, value));
    }

    let mut record = match serde_json::to_value(current) {
        Ok(Value::Object(record)) => record,
        Ok(_) => return Err(FieldError::Malformed("entity is not an object".to_string())),
        Err(e) => return Err(FieldError::Malformed(e.to_string())),
    };
    for (key, value) in changes {
        if value.is_null() {
            record.remove(key);
        } else {
            record.insert(key.clone(), value.clone());
        }
    }
    decode(record)
}
