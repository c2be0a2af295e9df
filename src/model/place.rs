use super::{Base, Child, City, Entity, EntityKind, Field, FieldKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A rentable place in a city, owned by a user.
///
/// `amenity_ids` is never written from a request body; it changes only through
/// the place/amenity link operations. It is stored but left off the wire form,
/// where linked amenities are reached through their own route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(flatten)]
    pub base: Base,
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_rooms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_bathrooms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_guest: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_by_night: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amenity_ids: Vec<String>,
}

impl Place {
    pub fn new(city_id: impl Into<String>, user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            base: Base::new(),
            city_id: city_id.into(),
            user_id: user_id.into(),
            name: name.into(),
            description: None,
            number_rooms: None,
            number_bathrooms: None,
            max_guest: None,
            price_by_night: None,
            latitude: None,
            longitude: None,
            amenity_ids: Vec::new(),
        }
    }

    pub fn has_amenity(&self, amenity_id: &str) -> bool {
        self.amenity_ids.iter().any(|id| id == amenity_id)
    }

    /// Returns `false` if the amenity was already linked.
    pub fn link_amenity(&mut self, amenity_id: &str) -> bool {
        if self.has_amenity(amenity_id) {
            return false;
        }
        self.amenity_ids.push(amenity_id.to_string());
        true
    }

    /// Returns `false` if the amenity was not linked.
    pub fn unlink_amenity(&mut self, amenity_id: &str) -> bool {
        let before = self.amenity_ids.len();
        self.amenity_ids.retain(|id| id != amenity_id);
        self.amenity_ids.len() != before
    }
}

impl Entity for Place {
    const KIND: EntityKind = EntityKind::Place;
    const FIELDS: &'static [Field] = &[
        Field::fixed("city_id", FieldKind::Text),
        Field::fixed("user_id", FieldKind::Text),
        Field::mutable("name", FieldKind::Text),
        Field::mutable("description", FieldKind::Text),
        Field::mutable("number_rooms", FieldKind::Integer),
        Field::mutable("number_bathrooms", FieldKind::Integer),
        Field::mutable("max_guest", FieldKind::Integer),
        Field::mutable("price_by_night", FieldKind::Integer),
        Field::mutable("latitude", FieldKind::Float),
        Field::mutable("longitude", FieldKind::Float),
        Field::managed("amenity_ids", FieldKind::TextList),
    ];
    const REQUIRED: &'static [&'static str] = &["user_id", "name"];

    fn base(&self) -> &Base {
        &self.base
    }

    fn owner_id(&self) -> Option<&str> {
        Some(&self.user_id)
    }

    fn to_wire(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut wire = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        wire.remove("amenity_ids");
        Ok(wire)
    }
}

impl Child for Place {
    type Parent = City;
    const PARENT_KEY: &'static str = "city_id";

    fn parent_id(&self) -> &str {
        &self.city_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_omits_unset_optionals_and_empty_links() {
        let place = Place::new("c", "u", "Loft");
        let wire = place.to_wire().unwrap();
        assert_eq!(wire["name"], "Loft");
        assert_eq!(wire["city_id"], "c");
        assert!(!wire.contains_key("description"));
        assert!(!wire.contains_key("amenity_ids"));
        assert_eq!(wire["id"], place.base.id.as_str());
    }

    #[test]
    fn test_linked_amenities_are_stored_but_not_on_the_wire() {
        let mut place = Place::new("c", "u", "Loft");
        place.link_amenity("a");

        assert!(!place.to_wire().unwrap().contains_key("amenity_ids"));
        let stored = serde_json::to_value(&place).unwrap();
        assert_eq!(stored["amenity_ids"], serde_json::json!(["a"]));
    }

    #[test]
    fn test_link_and_unlink_amenity() {
        let mut place = Place::new("c", "u", "Loft");
        assert!(place.link_amenity("a"));
        assert!(!place.link_amenity("a"));
        assert_eq!(place.amenity_ids, vec!["a".to_string()]);

        assert!(place.unlink_amenity("a"));
        assert!(!place.unlink_amenity("a"));
        assert!(place.amenity_ids.is_empty());
    }
}
