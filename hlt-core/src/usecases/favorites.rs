use super::{browse::all_places, prelude::*};

pub fn favorites<R: FavoriteRepo>(repo: &R, visitor: &Id) -> Result<Vec<Id>> {
    Ok(repo.favorites(visitor)?)
}

/// Add or remove a place or blog post from the favorites.
///
/// Returns `true` if the item is a favorite afterwards.
pub fn toggle_favorite<R: FavoriteRepoMut>(repo: &R, visitor: &Id, id: &Id) -> Result<bool> {
    if !id.is_valid() {
        return Err(Error::Id);
    }
    let mut ids = repo.favorites(visitor)?;
    let favorite = if let Some(idx) = ids.iter().position(|x| x == id) {
        ids.remove(idx);
        false
    } else {
        ids.push(id.clone());
        true
    };
    repo.replace_favorites(visitor, &ids)?;
    log::debug!("Visitor {visitor} toggled favorite {id}: {favorite}");
    Ok(favorite)
}

/// Personal travel guide.
#[derive(Debug, Clone)]
pub struct Guide {
    pub places: Vec<Place>,
    pub posts: Vec<BlogPost>,
}

pub fn guide<R>(repo: &R, visitor: &Id) -> Result<Guide>
where
    R: FavoriteRepo + CatalogRepo + AddedPlaceRepo,
{
    let ids = repo.favorites(visitor)?;
    let places = all_places(repo)?
        .into_iter()
        .filter(|p| ids.contains(&p.id))
        .collect();
    let posts = repo
        .all_blog_posts()?
        .into_iter()
        .filter(|p| ids.contains(&p.id))
        .collect();
    Ok(Guide { places, posts })
}
