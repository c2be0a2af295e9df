use super::{Base, Child, Entity, EntityKind, Field, FieldKind, State};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(flatten)]
    pub base: Base,
    pub state_id: String,
    pub name: String,
}

impl City {
    pub fn new(state_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            base: Base::new(),
            state_id: state_id.into(),
            name: name.into(),
        }
    }
}

impl Entity for City {
    const KIND: EntityKind = EntityKind::City;
    const FIELDS: &'static [Field] = &[
        Field::fixed("state_id", FieldKind::Text),
        Field::mutable("name", FieldKind::Text),
    ];
    const REQUIRED: &'static [&'static str] = &["name"];

    fn base(&self) -> &Base {
        &self.base
    }
}

impl Child for City {
    type Parent = State;
    const PARENT_KEY: &'static str = "state_id";

    fn parent_id(&self) -> &str {
        &self.state_id
    }
}
