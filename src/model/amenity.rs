use super::{Base, Entity, EntityKind, Field, FieldKind};
use serde::{Deserialize, Serialize};

/// A feature a place can offer. Linked to places through `Place::amenity_ids`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    #[serde(flatten)]
    pub base: Base,
    pub name: String,
}

impl Amenity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: Base::new(),
            name: name.into(),
        }
    }
}

impl Entity for Amenity {
    const KIND: EntityKind = EntityKind::Amenity;
    const FIELDS: &'static [Field] = &[Field::mutable("name", FieldKind::Text)];
    const REQUIRED: &'static [&'static str] = &["name"];

    fn base(&self) -> &Base {
        &self.base
    }
}
