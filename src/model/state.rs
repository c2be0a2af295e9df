use super::{Base, Entity, EntityKind, Field, FieldKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(flatten)]
    pub base: Base,
    pub name: String,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: Base::new(),
            name: name.into(),
        }
    }
}

impl Entity for State {
    const KIND: EntityKind = EntityKind::State;
    const FIELDS: &'static [Field] = &[Field::mutable("name", FieldKind::Text)];
    const REQUIRED: &'static [&'static str] = &["name"];

    fn base(&self) -> &Base {
        &self.base
    }
}
