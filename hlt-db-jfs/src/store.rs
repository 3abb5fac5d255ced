use jfs::Store;
use parking_lot::RwLock;
use serde_json::Value;
use std::{collections::HashMap, io, path::Path};

/// A minimal key-value storage for JSON documents.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> io::Result<Option<Value>>;
    fn set(&self, key: &str, value: &Value) -> io::Result<()>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// Stores every key in a separate JSON file.
pub struct JsonFileStore {
    json_store: Store,
}

impl JsonFileStore {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self { json_store })
    }
    pub fn path(&self) -> &Path {
        self.json_store.path()
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> io::Result<Option<Value>> {
        match self.json_store.get::<Value>(key) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
    fn set(&self, key: &str, value: &Value) -> io::Result<()> {
        self.json_store.save_with_id(value, key)?;
        Ok(())
    }
    fn remove(&self, key: &str) -> io::Result<()> {
        match self.json_store.delete(key) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

/// Volatile storage, e.g. for testing.
#[derive(Default)]
pub struct InMemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<Value>> {
        Ok(self.values.read().get(key).cloned())
    }
    fn set(&self, key: &str, value: &Value) -> io::Result<()> {
        self.values.write().insert(key.to_string(), value.clone());
        Ok(())
    }
    fn remove(&self, key: &str) -> io::Result<()> {
        self.values.write().remove(key);
        Ok(())
    }
}
