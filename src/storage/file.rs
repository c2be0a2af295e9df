//! JSON snapshot persistence.
//!
//! The file is one JSON object keyed by `"<Class>.<id>"`; each value is the entity's
//! full stored form plus a `__class__` tag. A missing file is an empty store. Every
//! write replaces the file wholesale through a temporary sibling and a rename, so a
//! crash mid-write never leaves a truncated snapshot behind.

use super::{Record, Storage, StorageError};
use crate::model::EntityKind;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

const CLASS_KEY: &str = "__class__";

pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record from the snapshot. A missing file yields no records.
    pub async fn load(&self) -> Result<Vec<Record>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No snapshot found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::io(&self.path)(e)),
        };

        let objects: Map<String, Value> = serde_json::from_slice(&bytes)?;
        let mut records = Vec::with_capacity(objects.len());
        for (key, value) in objects {
            records.push(decode(&key, value)?);
        }
        info!(path = %self.path.display(), records = records.len(), "Snapshot loaded");
        Ok(records)
    }

    /// Replaces the snapshot with the current contents of `storage`.
    ///
    /// Writers are serialized, and the tables are read while holding the lock, so the
    /// last write to finish always reflects the latest committed state.
    pub async fn write(&self, storage: &Storage) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut objects = Map::new();
        for record in storage.records().await? {
            let key = format!("{}.{}", record.kind().class_name(), record.id());
            objects.insert(key, encode(&record)?);
        }
        let bytes = serde_json::to_vec(&objects)?;

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(StorageError::io(&tmp))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(StorageError::io(&self.path))?;

        debug!(path = %self.path.display(), records = objects.len(), "Snapshot written");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn encode(record: &Record) -> Result<Value, StorageError> {
    let mut value = record.to_value()?;
    if let Value::Object(map) = &mut value {
        map.insert(CLASS_KEY.to_string(), Value::from(record.kind().class_name()));
    }
    Ok(value)
}

fn decode(key: &str, mut value: Value) -> Result<Record, StorageError> {
    let kind = key
        .split_once('.')
        .and_then(|(class, _)| EntityKind::from_class_name(class))
        .ok_or_else(|| StorageError::UnknownClass(key.to_string()))?;
    if let Value::Object(map) = &mut value {
        map.remove(CLASS_KEY);
    }
    Ok(Record::from_value(kind, value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amenity, City, Place, State, User};
    use crate::storage::Tables;

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("file.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_then_load_restores_every_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");

        let state = State::new("Texas");
        let city = City::new(&state.base.id, "Austin");
        let user = User::new("ada@example.com", "secret");
        let mut place = Place::new(&city.base.id, &user.base.id, "Loft");
        place.price_by_night = Some(120);
        place.latitude = Some(30.27);
        let wifi = Amenity::new("Wifi");
        place.link_amenity(&wifi.base.id);

        let mut expected = vec![
            Record::State(state),
            Record::City(city),
            Record::User(user),
            Record::Place(place),
            Record::Amenity(wifi),
        ];
        let (tables, _handles) = Tables::spawn(expected.clone());
        let storage = Storage::new(tables);

        let store = FileStore::new(&path);
        store.write(&storage).await.unwrap();
        assert!(!store.tmp_path().exists());

        let mut loaded = FileStore::new(&path).load().await.unwrap();
        let order = |r: &Record| (r.kind(), r.id().to_string());
        loaded.sort_by_key(order);
        expected.sort_by_key(order);
        assert_eq!(loaded, expected);
    }

    #[tokio::test]
    async fn test_file_layout_uses_class_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        let state = State::new("Texas");
        let (tables, _handles) = Tables::spawn(vec![Record::State(state.clone())]);

        FileStore::new(&path).write(&Storage::new(tables)).await.unwrap();

        let raw: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        let entry = &raw[format!("State.{}", state.base.id)];
        assert_eq!(entry["__class__"], "State");
        assert_eq!(entry["name"], "Texas");
        assert_eq!(entry["id"], state.base.id.as_str());
    }

    #[tokio::test]
    async fn test_unknown_class_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        std::fs::write(&path, r#"{"BaseModel.1": {"id": "1"}}"#).unwrap();

        let err = FileStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StorageError::UnknownClass(key) if key == "BaseModel.1"));
    }
}
