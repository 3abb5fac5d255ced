use crate::{
    models, DbAccess, DbReadOnly, DbReadWrite, ADDED_PLACES_KEY, FAVORITES_KEY_PREFIX,
    IMAGE_OVERRIDES_KEY, TEXT_OVERRIDES_KEY,
};
use hlt_core::{entities::*, repositories::*};
use serde::{de::DeserializeOwned, Serialize};

type Result<T> = std::result::Result<T, Error>;

fn favorites_key(visitor: &Id) -> String {
    format!("{FAVORITES_KEY_PREFIX}{visitor}")
}

/// Best effort: missing or corrupt documents are read as `None`.
fn load<T, D>(db: &D, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    D: DbAccess + ?Sized,
{
    let value = match db.store().get(key) {
        Ok(value) => value?,
        Err(err) => {
            log::warn!("Unable to read '{key}': {err}");
            return None;
        }
    };
    serde_json::from_value(value)
        .inspect_err(|err| log::warn!("Ignoring corrupt data of '{key}': {err}"))
        .ok()
}

fn save<T, D>(db: &D, key: &str, value: &T) -> Result<()>
where
    T: Serialize,
    D: DbAccess + ?Sized,
{
    let value = serde_json::to_value(value).map_err(anyhow::Error::from)?;
    db.store().set(key, &value)?;
    Ok(())
}

fn delete<D: DbAccess + ?Sized>(db: &D, key: &str) -> Result<()> {
    db.store().remove(key)?;
    Ok(())
}

macro_rules! impl_read_repos {
    ($db:ty) => {
        impl CatalogRepo for $db {
            fn all_categories(&self) -> Result<Vec<Category>> {
                Ok(self.catalog().categories.clone())
            }
            fn catalog_places(&self) -> Result<Vec<Place>> {
                Ok(self.catalog().places.clone())
            }
            fn all_blog_posts(&self) -> Result<Vec<BlogPost>> {
                Ok(self.catalog().posts.clone())
            }
        }

        impl ImageOverrideRepo for $db {
            fn image_overrides(&self) -> Result<Overrides> {
                Ok(load(self, IMAGE_OVERRIDES_KEY).unwrap_or_default())
            }
        }

        impl TextOverrideRepo for $db {
            fn text_overrides(&self) -> Result<Overrides> {
                Ok(load(self, TEXT_OVERRIDES_KEY).unwrap_or_default())
            }
        }

        impl AddedPlaceRepo for $db {
            fn added_places(&self) -> Result<Vec<Place>> {
                let places: Vec<models::Place> =
                    load(self, ADDED_PLACES_KEY).unwrap_or_default();
                Ok(places
                    .into_iter()
                    .filter_map(|p| {
                        Place::try_from(p)
                            .inspect_err(|err| log::warn!("Ignoring invalid place: {err}"))
                            .ok()
                    })
                    .collect())
            }
        }

        impl FavoriteRepo for $db {
            fn favorites(&self, visitor: &Id) -> Result<Vec<Id>> {
                let ids: Vec<String> = load(self, &favorites_key(visitor)).unwrap_or_default();
                Ok(ids.into_iter().map(Id::from).collect())
            }
        }

        impl ImageCacheRepo for $db {
            fn cached_image(&self, key: &str) -> Result<Option<String>> {
                Ok(load::<String, _>(self, key).filter(|x| !x.is_empty()))
            }
        }
    };
}

impl_read_repos!(DbReadOnly<'_>);
impl_read_repos!(DbReadWrite<'_>);

impl ImageOverrideRepoMut for DbReadWrite<'_> {
    fn replace_image_overrides(&self, overrides: &Overrides) -> Result<()> {
        save(self, IMAGE_OVERRIDES_KEY, overrides)
    }
    fn delete_image_overrides(&self) -> Result<()> {
        delete(self, IMAGE_OVERRIDES_KEY)
    }
}

impl TextOverrideRepoMut for DbReadWrite<'_> {
    fn replace_text_overrides(&self, overrides: &Overrides) -> Result<()> {
        save(self, TEXT_OVERRIDES_KEY, overrides)
    }
    fn delete_text_overrides(&self) -> Result<()> {
        delete(self, TEXT_OVERRIDES_KEY)
    }
}

impl AddedPlaceRepoMut for DbReadWrite<'_> {
    fn replace_added_places(&self, places: &[Place]) -> Result<()> {
        let places: Vec<models::Place> = places.iter().cloned().map(Into::into).collect();
        save(self, ADDED_PLACES_KEY, &places)
    }
    fn delete_added_places(&self) -> Result<()> {
        delete(self, ADDED_PLACES_KEY)
    }
}

impl FavoriteRepoMut for DbReadWrite<'_> {
    fn replace_favorites(&self, visitor: &Id, ids: &[Id]) -> Result<()> {
        let ids: Vec<&str> = ids.iter().map(Id::as_str).collect();
        save(self, &favorites_key(visitor), &ids)
    }
}

impl ImageCacheRepoMut for DbReadWrite<'_> {
    fn cache_image(&self, key: &str, image: &str) -> Result<()> {
        save(self, key, &image)
    }
    fn delete_cached_image(&self, key: &str) -> Result<()> {
        delete(self, key)
    }
}
