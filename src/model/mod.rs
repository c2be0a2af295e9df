//! The six HBNB entity types and the traits that let generic code handle them.
//!
//! Every entity flattens a [`Base`] (id + timestamps) and implements
//! [`ActorEntity`](entity_actor::ActorEntity) so one `ResourceActor` per type can own its
//! table. [`Entity`] adds what the HTTP protocol needs on top: a field schema,
//! required-field order and the wire form. [`Child`] describes the
//! State → City → Place → Review containment chain.

pub mod amenity;
pub mod base;
pub mod city;
pub mod place;
pub mod review;
pub mod schema;
pub mod state;
pub mod user;

pub use amenity::Amenity;
pub use base::{Base, TIMESTAMP_FORMAT};
pub use city::City;
pub use place::Place;
pub use review::Review;
pub use schema::{build, patch, Access, Field, FieldError, FieldKind};
pub use state::State;
pub use user::User;

use entity_actor::ActorEntity;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Discriminant for the six entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Amenity,
    City,
    Place,
    Review,
    State,
    User,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Amenity,
        EntityKind::City,
        EntityKind::Place,
        EntityKind::Review,
        EntityKind::State,
        EntityKind::User,
    ];

    /// Class name used in snapshot keys and `__class__`.
    pub fn class_name(self) -> &'static str {
        match self {
            EntityKind::Amenity => "Amenity",
            EntityKind::City => "City",
            EntityKind::Place => "Place",
            EntityKind::Review => "Review",
            EntityKind::State => "State",
            EntityKind::User => "User",
        }
    }

    /// Plural name used by `/stats`.
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Amenity => "amenities",
            EntityKind::City => "cities",
            EntityKind::Place => "places",
            EntityKind::Review => "reviews",
            EntityKind::State => "states",
            EntityKind::User => "users",
        }
    }

    pub fn from_class_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.class_name() == name)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// A stored HBNB entity.
///
/// The serde representation is the full record (what the snapshot file holds);
/// [`Entity::to_wire`] is what HTTP clients see.
pub trait Entity: ActorEntity<Id = String> + Serialize + DeserializeOwned {
    const KIND: EntityKind;

    /// Every field a request body may mention, besides the base keys.
    const FIELDS: &'static [Field];

    /// Fields a create body must contain, checked in this order.
    const REQUIRED: &'static [&'static str];

    fn base(&self) -> &Base;

    /// The user this entity belongs to, for types that reference one.
    fn owner_id(&self) -> Option<&str> {
        None
    }

    fn to_wire(&self) -> Result<Map<String, Value>, serde_json::Error> {
        serde_json::to_value(self).map(|value| match value {
            Value::Object(map) => map,
            _ => Map::new(),
        })
    }
}

/// An entity that lives under a parent in the containment chain.
pub trait Child: Entity {
    type Parent: Entity;

    /// Name of the field holding the parent's id.
    const PARENT_KEY: &'static str;

    fn parent_id(&self) -> &str;
}

/// Wires a type into the storage engine: `id()` reads the flattened base id and
/// every save advances `updated_at`.
macro_rules! stored_entity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl entity_actor::ActorEntity for $ty {
                type Id = String;

                fn id(&self) -> &String {
                    &self.base.id
                }

                fn on_save(&mut self) {
                    self.base.touch();
                }
            }
        )+
    };
}

stored_entity!(Amenity, City, Place, Review, State, User);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_class_name(kind.class_name()), Some(kind));
        }
        assert_eq!(EntityKind::from_class_name("BaseModel"), None);
        assert_eq!(EntityKind::Amenity.collection(), "amenities");
        assert_eq!(EntityKind::City.to_string(), "City");
    }

    #[test]
    fn test_on_save_advances_updated_at_only() {
        let mut state = State::new("Texas");
        let before = state.base.clone();
        state.on_save();
        assert_eq!(state.base.id, before.id);
        assert_eq!(state.base.created_at, before.created_at);
        assert!(state.base.updated_at >= before.updated_at);
    }
}
