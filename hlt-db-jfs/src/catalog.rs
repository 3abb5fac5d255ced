use crate::models;
use anyhow::Context as _;
use hlt_core::entities::*;
use std::{fs, path::Path};

const BUNDLED_CATALOG: &str = include_str!("huelvalate.catalog.json");

/// Read-only content: categories, blog posts and places.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub posts: Vec<BlogPost>,
    pub places: Vec<Place>,
}

impl Catalog {
    pub fn bundled() -> anyhow::Result<Self> {
        Self::from_json(BUNDLED_CATALOG).context("Invalid bundled catalog")
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::info!("Loading catalog from {}", path.display());
        let json = fs::read_to_string(path)
            .with_context(|| format!("Unable to read catalog file {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let models::CatalogFile {
            categories,
            posts,
            places,
        } = serde_json::from_str(json)?;
        let categories = categories
            .into_iter()
            .map(Category::try_from)
            .collect::<anyhow::Result<Vec<_>>>()?;
        let places = places
            .into_iter()
            .map(Place::try_from)
            .collect::<anyhow::Result<Vec<_>>>()?;
        let posts: Vec<_> = posts.into_iter().map(BlogPost::from).collect();
        log::debug!(
            "Loaded catalog with {} categories, {} places and {} posts",
            categories.len(),
            places.len(),
            posts.len()
        );
        Ok(Self {
            categories,
            posts,
            places,
        })
    }
}

/// Serialize places in the same format as the `places`
/// of a catalog file.
pub fn places_to_json(places: Vec<Place>) -> serde_json::Result<String> {
    let places: Vec<models::Place> = places.into_iter().map(Into::into).collect();
    serde_json::to_string_pretty(&places)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_bundled_catalog() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(6, catalog.categories.len());
        assert_eq!(79, catalog.places.len());
        assert_eq!(10, catalog.posts.len());
        for id in CategoryId::all() {
            assert!(catalog.categories.iter().any(|c| c.id == id));
            assert!(catalog.places.iter().any(|p| p.category == id));
        }
        let beach = catalog
            .places
            .iter()
            .find(|p| p.id.as_str() == "p-1")
            .unwrap();
        assert_eq!(CategoryId::Playas, beach.category);
        let weather = beach.weather.as_ref().unwrap();
        assert_eq!(Some(22.0), weather.water_temp);
        assert_eq!(Some(BeachFlag::Green), weather.flag);
        let trail = catalog
            .places
            .iter()
            .find(|p| p.id.as_str() == "s-1")
            .unwrap();
        assert_eq!(Difficulty::Media, trail.hiking.as_ref().unwrap().difficulty);
        assert!(trail.coordinates.is_some());
        assert!(catalog.posts.iter().all(|p| !p.slug.is_empty()));
    }

    #[test]
    fn reject_unknown_categories() {
        let json = r#"{"categories":[{"id":"cines","title":"","description":"","iconName":"","color":"","coverImage":""}]}"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn reject_invalid_coordinates() {
        let json = r#"{"categories":[],"places":[{"id":"x","categoryId":"playas","title":"","location":"","shortDescription":"","coordinates":{"lat":137.0,"lng":0.0}}]}"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn export_places_in_catalog_format() {
        let catalog = Catalog::bundled().unwrap();
        let json = places_to_json(catalog.places.clone()).unwrap();
        assert!(json.contains("\"categoryId\": \"playas\""));
        assert!(json.contains("\"shortDescription\""));
        let reloaded =
            Catalog::from_json(&format!(r#"{{"categories":[],"places":{json}}}"#)).unwrap();
        assert_eq!(catalog.places, reloaded.places);
    }
}
