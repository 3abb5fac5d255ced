use super::prelude::*;
use crate::util::sort::sort_by_date;
use time::OffsetDateTime;

/// Number of places that are shown per page of a category.
pub const ITEMS_PER_PAGE: usize = 6;

/// Number of blog posts that are featured on the home page.
pub const FEATURED_POSTS: usize = 3;

/// Added places come first, followed by the bundled places.
pub fn all_places<R>(repo: &R) -> Result<Vec<Place>>
where
    R: AddedPlaceRepo + CatalogRepo,
{
    let mut places = repo.added_places()?;
    places.extend(repo.catalog_places()?);
    Ok(places)
}

pub fn get_place<R>(repo: &R, id: &str) -> Result<Place>
where
    R: AddedPlaceRepo + CatalogRepo,
{
    all_places(repo)?
        .into_iter()
        .find(|p| p.id.as_str() == id)
        .ok_or(Error::Repo(RepoError::NotFound))
}

/// The header image of a category can be replaced by an image override
/// that is keyed by the category id.
pub fn category_header_image<R>(repo: &R, category: &Category) -> Result<String>
where
    R: ImageOverrideRepo,
{
    Ok(repo
        .get_image_override(category.id.as_str())?
        .unwrap_or_else(|| category.cover_image.clone()))
}

#[derive(Debug, Clone)]
pub struct CategoryTile {
    pub category: Category,
    pub header_image: String,
}

pub fn category_tiles<R>(repo: &R) -> Result<Vec<CategoryTile>>
where
    R: CatalogRepo + ImageOverrideRepo,
{
    repo.all_categories()?
        .into_iter()
        .map(|category| {
            let header_image = category_header_image(repo, &category)?;
            Ok(CategoryTile {
                category,
                header_image,
            })
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct CategoryPage {
    pub category: Category,
    pub header_image: String,
    /// All places up to the requested page.
    pub places: Vec<Place>,
    pub total: usize,
    pub page: usize,
    pub has_more: bool,
}

pub fn browse_category<R>(repo: &R, id: CategoryId, page: usize) -> Result<CategoryPage>
where
    R: CatalogRepo + AddedPlaceRepo + ImageOverrideRepo,
{
    browse_category_in_year(repo, id, page, OffsetDateTime::now_utc().year())
}

/// Pages are counted from 1, every page extends the list
/// of the previous one.
pub fn browse_category_in_year<R>(
    repo: &R,
    id: CategoryId,
    page: usize,
    current_year: i32,
) -> Result<CategoryPage>
where
    R: CatalogRepo + AddedPlaceRepo + ImageOverrideRepo,
{
    let category = repo.get_category(id)?;
    let header_image = category_header_image(repo, &category)?;
    let mut places: Vec<_> = all_places(repo)?
        .into_iter()
        .filter(|p| p.category == id)
        .collect();
    sort_by_date(&mut places, current_year);
    let page = page.max(1);
    let total = places.len();
    let visible = page.saturating_mul(ITEMS_PER_PAGE).min(total);
    places.truncate(visible);
    Ok(CategoryPage {
        category,
        header_image,
        places,
        total,
        page,
        has_more: visible < total,
    })
}

#[derive(Debug, Clone)]
pub struct Home {
    pub categories: Vec<CategoryTile>,
    /// Places that can be shown on a map.
    pub markers: Vec<Place>,
    pub featured_posts: Vec<BlogPost>,
}

pub fn home<R>(repo: &R) -> Result<Home>
where
    R: CatalogRepo + AddedPlaceRepo + ImageOverrideRepo,
{
    let categories = category_tiles(repo)?;
    let markers = repo
        .catalog_places()?
        .into_iter()
        .chain(repo.added_places()?)
        .filter(|p| p.coordinates.is_some())
        .collect();
    let featured_posts = repo
        .all_blog_posts()?
        .into_iter()
        .take(FEATURED_POSTS)
        .collect();
    Ok(Home {
        categories,
        markers,
        featured_posts,
    })
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use hlt_entities::builders::*;

    fn event(id: &str, date: Option<&str>) -> Place {
        Place::build()
            .id(id)
            .category(CategoryId::Agenda)
            .date(date)
            .finish()
    }

    #[test]
    fn added_places_come_first() {
        let db = MockDb::default();
        db.catalog_places.borrow_mut().push(Place::build().id("s-1").finish());
        db.added_places.borrow_mut().push(Place::build().id("new").finish());
        let ids: Vec<_> = all_places(&db)
            .unwrap()
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(vec!["new", "s-1"], ids);
    }

    #[test]
    fn get_unknown_place() {
        let db = MockDb::default();
        assert!(matches!(
            get_place(&db, "x"),
            Err(Error::Repo(RepoError::NotFound))
        ));
    }

    #[test]
    fn browse_category_sorted_by_date_and_paginated() {
        let db = MockDb::default();
        {
            let mut places = db.catalog_places.borrow_mut();
            for i in 0..8 {
                places.push(event(&format!("no-date-{i}"), None));
            }
            places.push(event("april", Some("Abril")));
            places.push(event("feb", Some("6 - 8 Feb 2026")));
            places.push(Place::build().id("beach").category(CategoryId::Playas).finish());
        }
        db.added_places
            .borrow_mut()
            .push(event("jan", Some("23 Ene 2026 - 20:00")));

        let first = browse_category_in_year(&db, CategoryId::Agenda, 1, 2026).unwrap();
        assert_eq!(11, first.total);
        assert_eq!(ITEMS_PER_PAGE, first.places.len());
        assert!(first.has_more);
        let ids: Vec<_> = first.places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            vec!["jan", "feb", "april", "no-date-0", "no-date-1", "no-date-2"],
            ids
        );

        let second = browse_category_in_year(&db, CategoryId::Agenda, 2, 2026).unwrap();
        assert_eq!(11, second.places.len());
        assert!(!second.has_more);
        assert_eq!("no-date-7", second.places[10].id.as_str());

        let zero = browse_category_in_year(&db, CategoryId::Agenda, 0, 2026).unwrap();
        assert_eq!(1, zero.page);
        assert_eq!(ITEMS_PER_PAGE, zero.places.len());
    }

    #[test]
    fn category_header_image_can_be_overridden() {
        let db = MockDb::default();
        let page = browse_category_in_year(&db, CategoryId::Playas, 1, 2026).unwrap();
        assert_eq!("cover-playas", page.header_image);
        assert!(page.places.is_empty());
        assert!(!page.has_more);

        db.image_overrides
            .borrow_mut()
            .insert("playas".into(), "https://img/beach.jpg".into());
        let page = browse_category_in_year(&db, CategoryId::Playas, 1, 2026).unwrap();
        assert_eq!("https://img/beach.jpg", page.header_image);
    }

    #[test]
    fn unknown_category() {
        let db = MockDb::default();
        db.categories.borrow_mut().clear();
        assert!(browse_category_in_year(&db, CategoryId::Playas, 1, 2026).is_err());
    }

    #[test]
    fn home_overview() {
        let db = MockDb::default();
        let pos = MapPoint::try_from_lat_lng_deg(37.91, -6.91).unwrap();
        db.catalog_places
            .borrow_mut()
            .push(Place::build().id("a").pos(pos).finish());
        db.catalog_places
            .borrow_mut()
            .push(Place::build().id("b").finish());
        db.added_places
            .borrow_mut()
            .push(Place::build().id("c").pos(pos).finish());
        for i in 0..5 {
            db.posts
                .borrow_mut()
                .push(BlogPost::build().id(&format!("post-{i}")).finish());
        }
        let home = home(&db).unwrap();
        assert_eq!(6, home.categories.len());
        let markers: Vec<_> = home.markers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(vec!["a", "c"], markers);
        assert_eq!(FEATURED_POSTS, home.featured_posts.len());
        assert_eq!("post-0", home.featured_posts[0].id.as_str());
    }
}
