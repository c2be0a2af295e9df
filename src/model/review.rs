use super::{Base, Child, Entity, EntityKind, Field, FieldKind, Place};
use serde::{Deserialize, Serialize};

/// A user's text review of a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(flatten)]
    pub base: Base,
    pub place_id: String,
    pub user_id: String,
    pub text: String,
}

impl Review {
    pub fn new(place_id: impl Into<String>, user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            base: Base::new(),
            place_id: place_id.into(),
            user_id: user_id.into(),
            text: text.into(),
        }
    }
}

impl Entity for Review {
    const KIND: EntityKind = EntityKind::Review;
    const FIELDS: &'static [Field] = &[
        Field::fixed("place_id", FieldKind::Text),
        Field::fixed("user_id", FieldKind::Text),
        Field::mutable("text", FieldKind::Text),
    ];
    const REQUIRED: &'static [&'static str] = &["user_id", "text"];

    fn base(&self) -> &Base {
        &self.base
    }

    fn owner_id(&self) -> Option<&str> {
        Some(&self.user_id)
    }
}

impl Child for Review {
    type Parent = Place;
    const PARENT_KEY: &'static str = "place_id";

    fn parent_id(&self) -> &str {
        &self.place_id
    }
}
