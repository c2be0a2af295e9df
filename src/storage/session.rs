//! Request-scoped view of storage.
//!
//! A [`Session`] stages writes locally: `add` and `delete` change nothing in the
//! tables until [`Session::save`] commits them. Reads made through the session see
//! its own staged writes. Whatever is still staged when the session is closed (or
//! dropped) is discarded, so a request that fails halfway leaves no trace.

use super::{Record, Storage, StorageError, Stored};
use crate::model::EntityKind;
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone)]
enum Staged {
    Save(Record),
    Delete(EntityKind, String),
}

impl Staged {
    fn targets(&self, kind: EntityKind, id: &str) -> bool {
        match self {
            Staged::Save(record) => record.kind() == kind && record.id() == id,
            Staged::Delete(k, staged_id) => *k == kind && staged_id == id,
        }
    }

    fn kind(&self) -> EntityKind {
        match self {
            Staged::Save(record) => record.kind(),
            Staged::Delete(kind, _) => *kind,
        }
    }
}

pub struct Session {
    storage: Storage,
    staged: Vec<Staged>,
    closed: bool,
}

impl Session {
    pub(crate) fn new(storage: Storage) -> Self {
        Self {
            storage,
            staged: Vec::new(),
            closed: false,
        }
    }

    /// Looks up one entity by id. Staged writes shadow the table.
    pub async fn get<T: Stored>(&self, id: &str) -> Result<Option<T>, StorageError> {
        if let Some(staged) = self.staged.iter().rev().find(|s| s.targets(T::KIND, id)) {
            return Ok(match staged {
                Staged::Save(record) => T::peek(record).cloned(),
                Staged::Delete(..) => None,
            });
        }
        Ok(T::table(&self.storage).get(id.to_string()).await?)
    }

    /// Every entity of one type, in no particular order.
    pub async fn all<T: Stored>(&self) -> Result<Vec<T>, StorageError> {
        let stored = T::table(&self.storage).all().await?;
        if !self.has_staged(T::KIND) {
            return Ok(stored);
        }

        let mut items: HashMap<String, T> = stored
            .into_iter()
            .map(|item| (item.base().id.clone(), item))
            .collect();
        for staged in &self.staged {
            match staged {
                Staged::Save(record) => {
                    if let Some(item) = T::peek(record) {
                        items.insert(item.base().id.clone(), item.clone());
                    }
                }
                Staged::Delete(kind, id) if *kind == T::KIND => {
                    items.remove(id);
                }
                Staged::Delete(..) => {}
            }
        }
        Ok(items.into_values().collect())
    }

    pub async fn count<T: Stored>(&self) -> Result<usize, StorageError> {
        if self.has_staged(T::KIND) {
            return Ok(self.all::<T>().await?.len());
        }
        Ok(T::table(&self.storage).count().await?)
    }

    /// Count by runtime kind, for callers iterating over [`EntityKind::ALL`].
    pub async fn count_kind(&self, kind: EntityKind) -> Result<usize, StorageError> {
        use crate::model::{Amenity, City, Place, Review, State, User};
        match kind {
            EntityKind::Amenity => self.count::<Amenity>().await,
            EntityKind::City => self.count::<City>().await,
            EntityKind::Place => self.count::<Place>().await,
            EntityKind::Review => self.count::<Review>().await,
            EntityKind::State => self.count::<State>().await,
            EntityKind::User => self.count::<User>().await,
        }
    }

    /// Stages an insert or replacement.
    pub fn add<T: Stored>(&mut self, item: T) {
        self.staged.push(Staged::Save(item.into_record()));
    }

    /// Stages removal of `item`.
    pub fn delete<T: Stored>(&mut self, item: &T) {
        self.staged
            .push(Staged::Delete(T::KIND, item.base().id.clone()));
    }

    /// Commits every staged write, in staging order, and returns the stored copies of
    /// the saved entities (with `updated_at` advanced).
    ///
    /// Each staged save replaces the whole stored record, so of two sessions that
    /// read, modify and save the same entity, the later commit wins outright. A
    /// concurrent place update and amenity link can drop the link this way.
    ///
    /// When a snapshot file is configured it is rewritten after the commit.
    pub async fn save(&mut self) -> Result<Vec<Record>, StorageError> {
        let staged = std::mem::take(&mut self.staged);
        if staged.is_empty() {
            return Ok(Vec::new());
        }

        let writes = staged.len();
        let mut stored = Vec::new();
        for op in staged {
            match op {
                Staged::Save(record) => stored.push(self.storage.put(record).await?),
                Staged::Delete(kind, id) => self.storage.remove(kind, &id).await?,
            }
        }
        debug!(writes, "Session committed");

        if let Some(snapshot) = self.storage.snapshot() {
            snapshot.write(&self.storage).await?;
        }
        Ok(stored)
    }

    /// Ends the session. Uncommitted writes are discarded. Safe to call more than once.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if !self.staged.is_empty() {
            info!(discarded = self.staged.len(), "Session closed with uncommitted writes");
            self.staged.clear();
        }
    }

    fn has_staged(&self, kind: EntityKind) -> bool {
        self.staged.iter().any(|staged| staged.kind() == kind)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amenity, State};
    use crate::storage::Tables;
    use entity_actor::mock::{create_mock_client, expect_delete, expect_get, expect_save, MockClient};
    use entity_actor::FrameworkError;

    fn storage() -> Storage {
        let (tables, _handles) = Tables::spawn(Vec::new());
        Storage::new(tables)
    }

    #[tokio::test]
    async fn test_staged_writes_are_visible_only_to_their_session() {
        let storage = storage();
        let mut session = storage.session();
        let state = State::new("Texas");
        session.add(state.clone());

        let seen: Option<State> = session.get(&state.base.id).await.unwrap();
        assert_eq!(seen, Some(state.clone()));
        assert_eq!(session.count::<State>().await.unwrap(), 1);

        let other = storage.session();
        assert_eq!(other.get::<State>(&state.base.id).await.unwrap(), None);
        assert_eq!(other.count::<State>().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_save_commits_and_advances_updated_at() {
        let storage = storage();
        let mut session = storage.session();
        let state = State::new("Texas");
        session.add(state.clone());

        let stored = session.save().await.unwrap();
        assert_eq!(stored.len(), 1);
        let stored = State::from_record(stored[0].clone()).unwrap();
        assert_eq!(stored.base.created_at, state.base.created_at);
        assert!(stored.base.updated_at >= state.base.updated_at);

        let other = storage.session();
        assert_eq!(other.get::<State>(&state.base.id).await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn test_close_discards_uncommitted_writes() {
        let storage = storage();
        let mut session = storage.session();
        session.add(Amenity::new("Wifi"));
        session.close();
        session.close();
        drop(session);

        {
            let mut dropped = storage.session();
            dropped.add(Amenity::new("Pool"));
        }

        assert_eq!(storage.session().count::<Amenity>().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_staged_delete_hides_stored_entity() {
        let storage = storage();
        let wifi = Amenity::new("Wifi");
        let pool = Amenity::new("Pool");

        let mut session = storage.session();
        session.add(wifi.clone());
        session.add(pool.clone());
        session.save().await.unwrap();

        let mut session = storage.session();
        session.delete(&wifi);
        assert_eq!(session.get::<Amenity>(&wifi.base.id).await.unwrap(), None);
        let remaining = session.all::<Amenity>().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].base.id, pool.base.id);

        session.save().await.unwrap();
        assert_eq!(storage.count_kind(EntityKind::Amenity).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_deleting_twice_commits_cleanly() {
        let storage = storage();
        let wifi = Amenity::new("Wifi");
        let mut session = storage.session();
        session.add(wifi.clone());
        session.save().await.unwrap();

        let mut first = storage.session();
        let mut second = storage.session();
        first.delete(&wifi);
        second.delete(&wifi);
        first.save().await.unwrap();
        second.save().await.unwrap();

        assert_eq!(storage.session().count_kind(EntityKind::Amenity).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_save_commits_in_staging_order() {
        let (mut tables, _handles) = Tables::spawn(Vec::new());
        let (client, mut receiver) = create_mock_client::<Amenity>(4);
        tables.amenities = client;
        let storage = Storage::new(tables);

        let wifi = Amenity::new("Wifi");
        let pool = Amenity::new("Pool");
        let pool_id = pool.base.id.clone();
        let mut session = storage.session();
        let staged = wifi.clone();
        let commit = tokio::spawn(async move {
            let found = session.get::<Amenity>(&pool_id).await?;
            session.add(staged);
            if let Some(pool) = found {
                session.delete(&pool);
            }
            session.save().await.map(|stored| stored.len())
        });

        let (id, respond_to) = expect_get(&mut receiver).await.unwrap();
        assert_eq!(id, pool.base.id);
        respond_to.send(Ok(Some(pool.clone()))).unwrap();

        let (item, respond_to) = expect_save(&mut receiver).await.unwrap();
        assert_eq!(item.base.id, wifi.base.id);
        respond_to.send(Ok(item)).unwrap();

        // Already gone by the time the delete lands; the commit still succeeds.
        let (id, respond_to) = expect_delete(&mut receiver).await.unwrap();
        assert_eq!(id, pool.base.id);
        respond_to.send(Err(FrameworkError::NotFound(id))).unwrap();

        assert_eq!(commit.await.unwrap().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_all_overlays_staged_writes_on_the_table() {
        let mut mock = MockClient::<Amenity>::new();
        let (mut tables, _handles) = Tables::spawn(Vec::new());
        tables.amenities = mock.client();
        let storage = Storage::new(tables);

        let wifi = Amenity::new("Wifi");
        let pool = Amenity::new("Pool");
        mock.expect_all().return_ok(vec![wifi.clone(), pool.clone()]);

        let mut session = storage.session();
        session.delete(&wifi);
        session.add(Amenity::new("Sauna"));
        let mut names: Vec<String> = session
            .all::<Amenity>()
            .await
            .unwrap()
            .into_iter()
            .map(|amenity| amenity.name)
            .collect();
        names.sort();
        assert_eq!(names, ["Pool", "Sauna"]);

        session.close();
        mock.verify();
    }

    #[tokio::test]
    async fn test_save_with_nothing_staged_is_a_no_op() {
        let storage = storage();
        let mut session = storage.session();
        assert!(session.save().await.unwrap().is_empty());
    }
}
