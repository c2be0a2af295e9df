use super::{Base, Entity, EntityKind, Field, FieldKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub base: Base,
    pub email: String,
    /// Kept in storage, never sent over the wire.
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl User {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            base: Base::new(),
            email: email.into(),
            password: password.into(),
            first_name: None,
            last_name: None,
        }
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;
    const FIELDS: &'static [Field] = &[
        Field::mutable("email", FieldKind::Text),
        Field::mutable("password", FieldKind::Text),
        Field::mutable("first_name", FieldKind::Text),
        Field::mutable("last_name", FieldKind::Text),
    ];
    const REQUIRED: &'static [&'static str] = &["email", "password"];

    fn base(&self) -> &Base {
        &self.base
    }

    fn to_wire(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut wire = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        wire.remove("password");
        Ok(wire)
    }
}
