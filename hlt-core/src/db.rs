use crate::repositories::*;

pub trait ReadOnlyDb:
    CatalogRepo + ImageOverrideRepo + TextOverrideRepo + AddedPlaceRepo + FavoriteRepo + ImageCacheRepo
{
}

impl<T> ReadOnlyDb for T where
    T: CatalogRepo
        + ImageOverrideRepo
        + TextOverrideRepo
        + AddedPlaceRepo
        + FavoriteRepo
        + ImageCacheRepo
{
}

pub trait Db:
    ReadOnlyDb
    + ImageOverrideRepoMut
    + TextOverrideRepoMut
    + AddedPlaceRepoMut
    + FavoriteRepoMut
    + ImageCacheRepoMut
{
}

impl<T> Db for T where
    T: ReadOnlyDb
        + ImageOverrideRepoMut
        + TextOverrideRepoMut
        + AddedPlaceRepoMut
        + FavoriteRepoMut
        + ImageCacheRepoMut
{
}

/// Opens short-lived connections.
///
/// Use cases that wait for slow external services must not
/// hold a connection in the meantime. They use this trait
/// to connect before and after the call instead.
pub trait DbConnections {
    type Shared<'a>: ReadOnlyDb
    where
        Self: 'a;
    type Exclusive<'a>: Db
    where
        Self: 'a;

    fn shared(&self) -> Self::Shared<'_>;
    fn exclusive(&self) -> Self::Exclusive<'_>;
}
