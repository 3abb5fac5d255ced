//! Persistence of runtime modifications in a key-value store.
//!
//! Every collection is stored as a single JSON document under
//! a fixed key. Unreadable documents are treated as empty.

use hlt_core::db::DbConnections;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{path::Path, sync::Arc};

mod catalog;
mod models;
mod repo_impl;
mod store;

pub use self::{
    catalog::{places_to_json, Catalog},
    store::{InMemoryStore, JsonFileStore, KeyValueStore},
};

pub const IMAGE_OVERRIDES_KEY: &str = "huelvalate_img_overrides";
pub const TEXT_OVERRIDES_KEY: &str = "huelvalate_text_overrides";
pub const ADDED_PLACES_KEY: &str = "huelvalate_new_places";
pub const FAVORITES_KEY_PREFIX: &str = "huelvalate_favorites_";

type BoxedStore = Box<dyn KeyValueStore + Send + Sync>;

type SharedStore = Arc<RwLock<BoxedStore>>;

/// Read access to the store.
///
/// Modifications are only possible through a [`DbReadWrite`].
pub struct DbReadOnly<'a> {
    store: RwLockReadGuard<'a, BoxedStore>,
    catalog: &'a Catalog,
}

pub struct DbReadWrite<'a> {
    store: RwLockWriteGuard<'a, BoxedStore>,
    catalog: &'a Catalog,
}

/// Common access of both connection types.
pub(crate) trait DbAccess {
    fn store(&self) -> &dyn KeyValueStore;
    fn catalog(&self) -> &Catalog;
}

impl DbAccess for DbReadOnly<'_> {
    fn store(&self) -> &dyn KeyValueStore {
        &**self.store
    }
    fn catalog(&self) -> &Catalog {
        self.catalog
    }
}

impl DbAccess for DbReadWrite<'_> {
    fn store(&self) -> &dyn KeyValueStore {
        &**self.store
    }
    fn catalog(&self) -> &Catalog {
        self.catalog
    }
}

#[derive(Clone)]
pub struct Connections {
    // Multiple readers may access the store concurrently
    // while modifications are serialized.
    store: SharedStore,
    catalog: Arc<Catalog>,
}

impl Connections {
    pub fn new<S>(store: S, catalog: Catalog) -> Self
    where
        S: KeyValueStore + Send + Sync + 'static,
    {
        Self {
            store: Arc::new(RwLock::new(Box::new(store))),
            catalog: Arc::new(catalog),
        }
    }

    pub fn in_memory(catalog: Catalog) -> Self {
        log::info!("Using a volatile in-memory store");
        Self::new(InMemoryStore::default(), catalog)
    }

    pub fn init<P: AsRef<Path>>(data_dir: P, catalog: Catalog) -> anyhow::Result<Self> {
        let store = JsonFileStore::try_new(data_dir.as_ref())?;
        log::info!("Storing data in {}", store.path().display());
        Ok(Self::new(store, catalog))
    }

    pub fn shared(&self) -> DbReadOnly<'_> {
        DbReadOnly {
            store: self.store.read(),
            catalog: &self.catalog,
        }
    }

    pub fn exclusive(&self) -> DbReadWrite<'_> {
        DbReadWrite {
            store: self.store.write(),
            catalog: &self.catalog,
        }
    }
}

impl DbConnections for Connections {
    type Shared<'a> = DbReadOnly<'a>;
    type Exclusive<'a> = DbReadWrite<'a>;

    fn shared(&self) -> Self::Shared<'_> {
        Connections::shared(self)
    }
    fn exclusive(&self) -> Self::Exclusive<'_> {
        Connections::exclusive(self)
    }
}
