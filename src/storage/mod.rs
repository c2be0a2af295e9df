//! # Storage
//!
//! The storage engine is six [`ResourceActor`]s, one table per entity type. [`Storage`]
//! bundles their clients (plus the optional on-disk snapshot) behind one cloneable
//! handle, and [`Session`] is the request-scoped view the HTTP layer works with.
//!
//! Generic code reaches the right table through [`Stored`]; code that has to handle
//! every type at once (the snapshot file, `/stats`) goes through [`Record`].

pub mod error;
pub mod file;
pub mod session;

pub use error::StorageError;
pub use file::FileStore;
pub use session::Session;

use crate::model::{Amenity, City, Entity, EntityKind, Place, Review, State, User};
use entity_actor::{FrameworkError, ResourceActor, ResourceClient};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Channel capacity for each table actor.
const TABLE_BUFFER: usize = 64;

/// One stored entity of any type.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Amenity(Amenity),
    City(City),
    Place(Place),
    Review(Review),
    State(State),
    User(User),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Amenity(_) => EntityKind::Amenity,
            Record::City(_) => EntityKind::City,
            Record::Place(_) => EntityKind::Place,
            Record::Review(_) => EntityKind::Review,
            Record::State(_) => EntityKind::State,
            Record::User(_) => EntityKind::User,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Record::Amenity(item) => &item.base.id,
            Record::City(item) => &item.base.id,
            Record::Place(item) => &item.base.id,
            Record::Review(item) => &item.base.id,
            Record::State(item) => &item.base.id,
            Record::User(item) => &item.base.id,
        }
    }

    /// Full stored form, as written to the snapshot file (without `__class__`).
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Record::Amenity(item) => serde_json::to_value(item),
            Record::City(item) => serde_json::to_value(item),
            Record::Place(item) => serde_json::to_value(item),
            Record::Review(item) => serde_json::to_value(item),
            Record::State(item) => serde_json::to_value(item),
            Record::User(item) => serde_json::to_value(item),
        }
    }

    pub fn from_value(kind: EntityKind, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            EntityKind::Amenity => Record::Amenity(serde_json::from_value(value)?),
            EntityKind::City => Record::City(serde_json::from_value(value)?),
            EntityKind::Place => Record::Place(serde_json::from_value(value)?),
            EntityKind::Review => Record::Review(serde_json::from_value(value)?),
            EntityKind::State => Record::State(serde_json::from_value(value)?),
            EntityKind::User => Record::User(serde_json::from_value(value)?),
        })
    }
}

/// An entity type with a table in [`Storage`].
pub trait Stored: Entity {
    fn table(storage: &Storage) -> &ResourceClient<Self>;

    fn into_record(self) -> Record;

    fn from_record(record: Record) -> Option<Self>;

    fn peek(record: &Record) -> Option<&Self>;
}

macro_rules! stored {
    ($($ty:ident => $table:ident),+ $(,)?) => {
        $(
            impl Stored for $ty {
                fn table(storage: &Storage) -> &ResourceClient<Self> {
                    &storage.tables.$table
                }

                fn into_record(self) -> Record {
                    Record::$ty(self)
                }

                fn from_record(record: Record) -> Option<Self> {
                    match record {
                        Record::$ty(item) => Some(item),
                        _ => None,
                    }
                }

                fn peek(record: &Record) -> Option<&Self> {
                    match record {
                        Record::$ty(item) => Some(item),
                        _ => None,
                    }
                }
            }
        )+
    };
}

stored! {
    Amenity => amenities,
    City => cities,
    Place => places,
    Review => reviews,
    State => states,
    User => users,
}

/// Clients for the six table actors.
#[derive(Clone)]
pub struct Tables {
    pub amenities: ResourceClient<Amenity>,
    pub cities: ResourceClient<City>,
    pub places: ResourceClient<Place>,
    pub reviews: ResourceClient<Review>,
    pub states: ResourceClient<State>,
    pub users: ResourceClient<User>,
}

impl Tables {
    /// Spawns one actor per table, preloaded with `records`.
    ///
    /// Must be called from inside a Tokio runtime. The returned handles finish once
    /// every clone of the returned `Tables` has been dropped.
    pub fn spawn(records: Vec<Record>) -> (Self, Vec<JoinHandle<()>>) {
        let mut amenities = Vec::new();
        let mut cities = Vec::new();
        let mut places = Vec::new();
        let mut reviews = Vec::new();
        let mut states = Vec::new();
        let mut users = Vec::new();
        for record in records {
            match record {
                Record::Amenity(item) => amenities.push(item),
                Record::City(item) => cities.push(item),
                Record::Place(item) => places.push(item),
                Record::Review(item) => reviews.push(item),
                Record::State(item) => states.push(item),
                Record::User(item) => users.push(item),
            }
        }

        let (amenity_actor, amenities) = ResourceActor::with_items(TABLE_BUFFER, amenities);
        let (city_actor, cities) = ResourceActor::with_items(TABLE_BUFFER, cities);
        let (place_actor, places) = ResourceActor::with_items(TABLE_BUFFER, places);
        let (review_actor, reviews) = ResourceActor::with_items(TABLE_BUFFER, reviews);
        let (state_actor, states) = ResourceActor::with_items(TABLE_BUFFER, states);
        let (user_actor, users) = ResourceActor::with_items(TABLE_BUFFER, users);

        let handles = vec![
            tokio::spawn(amenity_actor.run()),
            tokio::spawn(city_actor.run()),
            tokio::spawn(place_actor.run()),
            tokio::spawn(review_actor.run()),
            tokio::spawn(state_actor.run()),
            tokio::spawn(user_actor.run()),
        ];

        let tables = Self {
            amenities,
            cities,
            places,
            reviews,
            states,
            users,
        };
        (tables, handles)
    }
}

/// Shared handle to the storage engine.
///
/// Cheap to clone: every clone talks to the same six actors and the same snapshot file.
#[derive(Clone)]
pub struct Storage {
    tables: Tables,
    snapshot: Option<Arc<FileStore>>,
}

impl Storage {
    /// Memory-only storage over already running tables.
    pub fn new(tables: Tables) -> Self {
        Self {
            tables,
            snapshot: None,
        }
    }

    /// Rewrites `store` after every committed session.
    pub fn with_snapshot(mut self, store: FileStore) -> Self {
        self.snapshot = Some(Arc::new(store));
        self
    }

    pub fn snapshot(&self) -> Option<&FileStore> {
        self.snapshot.as_deref()
    }

    /// Opens a request-scoped session.
    pub fn session(&self) -> Session {
        Session::new(self.clone())
    }

    pub async fn count_kind(&self, kind: EntityKind) -> Result<usize, FrameworkError> {
        match kind {
            EntityKind::Amenity => self.tables.amenities.count().await,
            EntityKind::City => self.tables.cities.count().await,
            EntityKind::Place => self.tables.places.count().await,
            EntityKind::Review => self.tables.reviews.count().await,
            EntityKind::State => self.tables.states.count().await,
            EntityKind::User => self.tables.users.count().await,
        }
    }

    /// Every stored entity across all tables.
    pub async fn records(&self) -> Result<Vec<Record>, FrameworkError> {
        let mut records = Vec::new();
        records.extend(self.tables.amenities.all().await?.into_iter().map(Record::Amenity));
        records.extend(self.tables.cities.all().await?.into_iter().map(Record::City));
        records.extend(self.tables.places.all().await?.into_iter().map(Record::Place));
        records.extend(self.tables.reviews.all().await?.into_iter().map(Record::Review));
        records.extend(self.tables.states.all().await?.into_iter().map(Record::State));
        records.extend(self.tables.users.all().await?.into_iter().map(Record::User));
        Ok(records)
    }

    /// Upserts one record and returns the stored copy.
    pub(crate) async fn put(&self, record: Record) -> Result<Record, FrameworkError> {
        Ok(match record {
            Record::Amenity(item) => Record::Amenity(self.tables.amenities.save(item).await?),
            Record::City(item) => Record::City(self.tables.cities.save(item).await?),
            Record::Place(item) => Record::Place(self.tables.places.save(item).await?),
            Record::Review(item) => Record::Review(self.tables.reviews.save(item).await?),
            Record::State(item) => Record::State(self.tables.states.save(item).await?),
            Record::User(item) => Record::User(self.tables.users.save(item).await?),
        })
    }

    /// Removes one record. Removing something already gone is not an error.
    pub(crate) async fn remove(&self, kind: EntityKind, id: &str) -> Result<(), FrameworkError> {
        let id = id.to_string();
        let result = match kind {
            EntityKind::Amenity => self.tables.amenities.delete(id).await,
            EntityKind::City => self.tables.cities.delete(id).await,
            EntityKind::Place => self.tables.places.delete(id).await,
            EntityKind::Review => self.tables.reviews.delete(id).await,
            EntityKind::State => self.tables.states.delete(id).await,
            EntityKind::User => self.tables.users.delete(id).await,
        };
        match result {
            Err(FrameworkError::NotFound(id)) => {
                debug!(entity_type = %kind, %id, "Already removed");
                Ok(())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_routes_records_to_their_tables() {
        let state = State::new("Texas");
        let city = City::new(&state.base.id, "Austin");
        let records = vec![Record::State(state.clone()), Record::City(city.clone())];

        let (tables, _handles) = Tables::spawn(records);
        let storage = Storage::new(tables);

        assert_eq!(storage.count_kind(EntityKind::State).await.unwrap(), 1);
        assert_eq!(storage.count_kind(EntityKind::City).await.unwrap(), 1);
        assert_eq!(storage.count_kind(EntityKind::Place).await.unwrap(), 0);
        assert_eq!(
            State::table(&storage).get(state.base.id.clone()).await.unwrap(),
            Some(state)
        );
    }

    #[tokio::test]
    async fn test_remove_missing_is_ok() {
        let (tables, _handles) = Tables::spawn(Vec::new());
        let storage = Storage::new(tables);
        storage.remove(EntityKind::Amenity, "ghost").await.unwrap();
    }

    #[test]
    fn test_record_value_round_trip_keeps_kind() {
        let record = Record::User(User::new("a@b.c", "pw"));
        let value = record.to_value().unwrap();
        assert_eq!(value["password"], "pw");
        let back = Record::from_value(EntityKind::User, value).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.kind(), EntityKind::User);
    }
}
