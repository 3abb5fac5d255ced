// Low-level storage access traits.
// Every mutable overlay is stored as a single JSON blob
// under a fixed key, so the repositories load and replace
// whole collections instead of single records.
// Replacing a collection is only possible through the `*Mut`
// traits that are implemented by exclusive connections.

use crate::entities::*;
use std::{collections::BTreeMap, io};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

/// Replacement values keyed by the id of a place, a blog post or a category.
pub type Overrides = BTreeMap<String, String>;

/// Bundled, read-only content.
pub trait CatalogRepo {
    fn all_categories(&self) -> Result<Vec<Category>>;
    fn catalog_places(&self) -> Result<Vec<Place>>;
    fn all_blog_posts(&self) -> Result<Vec<BlogPost>>;

    fn get_category(&self, id: CategoryId) -> Result<Category> {
        self.all_categories()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(Error::NotFound)
    }
}

pub trait ImageOverrideRepo {
    fn image_overrides(&self) -> Result<Overrides>;

    fn get_image_override(&self, id: &str) -> Result<Option<String>> {
        Ok(self
            .image_overrides()?
            .remove(id)
            .filter(|url| !url.is_empty()))
    }
}

pub trait ImageOverrideRepoMut: ImageOverrideRepo {
    fn replace_image_overrides(&self, overrides: &Overrides) -> Result<()>;
    fn delete_image_overrides(&self) -> Result<()>;
}

pub trait TextOverrideRepo {
    fn text_overrides(&self) -> Result<Overrides>;

    fn get_text_override(&self, id: &str) -> Result<Option<String>> {
        Ok(self
            .text_overrides()?
            .remove(id)
            .filter(|text| !text.is_empty()))
    }
}

pub trait TextOverrideRepoMut: TextOverrideRepo {
    fn replace_text_overrides(&self, overrides: &Overrides) -> Result<()>;
    fn delete_text_overrides(&self) -> Result<()>;
}

/// Places that have been added by an administrator at runtime.
pub trait AddedPlaceRepo {
    fn added_places(&self) -> Result<Vec<Place>>;
}

pub trait AddedPlaceRepoMut: AddedPlaceRepo {
    fn replace_added_places(&self, places: &[Place]) -> Result<()>;
    fn delete_added_places(&self) -> Result<()>;
}

pub trait FavoriteRepo {
    fn favorites(&self, visitor: &Id) -> Result<Vec<Id>>;
}

pub trait FavoriteRepoMut: FavoriteRepo {
    fn replace_favorites(&self, visitor: &Id, ids: &[Id]) -> Result<()>;
}

/// Previously generated images keyed by a sanitized cache key.
pub trait ImageCacheRepo {
    fn cached_image(&self, key: &str) -> Result<Option<String>>;
}

pub trait ImageCacheRepoMut: ImageCacheRepo {
    fn cache_image(&self, key: &str, image: &str) -> Result<()>;
    fn delete_cached_image(&self, key: &str) -> Result<()>;
}
