use super::{browse::all_places, prelude::*};
use url::Url;

/// Rating of places that have not been rated yet.
pub const DEFAULT_RATING: f64 = 4.5;

/// Water temperature (°C) of beaches without measurements.
pub const DEFAULT_WATER_TEMP: f64 = 20.0;

#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: Password,
}

pub fn login(credentials: &AdminCredentials, username: &str, password: &str) -> Result<()> {
    if credentials.username != username || !credentials.password.verify(password) {
        log::info!("Failed admin login attempt for '{username}'");
        return Err(Error::Credentials);
    }
    log::info!("Admin '{username}' logged in");
    Ok(())
}

/// Returns `false` if nothing has been changed.
pub fn set_image_override<R: ImageOverrideRepoMut>(repo: &R, id: &str, url: &str) -> Result<bool> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::Url);
    }
    Url::parse(url)?;
    let mut overrides = repo.image_overrides()?;
    if overrides.get(id).map(String::as_str) == Some(url) {
        return Ok(false);
    }
    overrides.insert(id.to_string(), url.to_string());
    repo.replace_image_overrides(&overrides)?;
    log::debug!("Replaced image of {id}");
    Ok(true)
}

pub fn clear_image_override<R: ImageOverrideRepoMut>(repo: &R, id: &str) -> Result<bool> {
    let mut overrides = repo.image_overrides()?;
    if overrides.remove(id).is_none() {
        return Ok(false);
    }
    repo.replace_image_overrides(&overrides)?;
    Ok(true)
}

/// An empty text removes the override.
pub fn set_text_override<R: TextOverrideRepoMut>(repo: &R, id: &str, text: &str) -> Result<bool> {
    let mut overrides = repo.text_overrides()?;
    let changed = if text.is_empty() {
        overrides.remove(id).is_some()
    } else if overrides.get(id).map(String::as_str) == Some(text) {
        false
    } else {
        overrides.insert(id.to_string(), text.to_string());
        true
    };
    if changed {
        repo.replace_text_overrides(&overrides)?;
        log::debug!("Replaced text of {id}");
    }
    Ok(changed)
}

pub fn text_override<R: TextOverrideRepo>(repo: &R, id: &str) -> Result<Option<String>> {
    Ok(repo.get_text_override(id)?)
}

#[derive(Debug, Clone)]
pub struct NewPlace {
    /// A random id is assigned if missing.
    pub id: Option<String>,
    pub category: CategoryId,
    pub title: String,
    pub location: String,
    pub short_description: String,
    pub full_description: Option<String>,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub date: Option<String>,
    pub rating: Option<f64>,
    pub position: Option<MapPoint>,
    pub weather: Option<WeatherInfo>,
    pub hiking: Option<HikingDetails>,
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl TryFrom<NewPlace> for Place {
    type Error = Error;
    fn try_from(p: NewPlace) -> Result<Self> {
        let NewPlace {
            id,
            category,
            title,
            location,
            short_description,
            full_description,
            image_url,
            tags,
            date,
            rating,
            position,
            weather,
            hiking,
        } = p;
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::Title);
        }
        let location = location.trim();
        if location.is_empty() {
            return Err(Error::Location);
        }
        let short_description = short_description.trim();
        if short_description.is_empty() {
            return Err(Error::Description);
        }
        if let Some(r) = rating {
            if !(0.0..=5.0).contains(&r) {
                return Err(Error::Rating);
            }
        }
        let image_url = non_blank(image_url);
        if let Some(url) = &image_url {
            Url::parse(url)?;
        }
        let id = match non_blank(id) {
            Some(id) => Id::from(id),
            None => Id::new(),
        };
        let tags = tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        Ok(Place {
            id,
            category,
            title: title.to_string(),
            location: location.to_string(),
            short_description: short_description.to_string(),
            full_description: non_blank(full_description),
            image_url: image_url.unwrap_or_default(),
            tags,
            weather,
            hiking,
            date: non_blank(date),
            rating,
            coordinates: position,
        })
    }
}

pub fn add_place<R>(repo: &R, new_place: NewPlace) -> Result<Place>
where
    R: AddedPlaceRepoMut + CatalogRepo,
{
    let place = Place::try_from(new_place)?;
    if all_places(repo)?.iter().any(|p| p.id == place.id) {
        return Err(Error::Repo(RepoError::AlreadyExists));
    }
    let mut added = repo.added_places()?;
    added.push(place.clone());
    repo.replace_added_places(&added)?;
    log::info!("Added place {} ({})", place.id, place.title);
    Ok(place)
}

/// Only places that have been added at runtime can be removed.
pub fn remove_place<R: AddedPlaceRepoMut>(repo: &R, id: &str) -> Result<()> {
    let mut added = repo.added_places()?;
    let count = added.len();
    added.retain(|p| p.id.as_str() != id);
    if added.len() == count {
        return Err(Error::Repo(RepoError::NotFound));
    }
    repo.replace_added_places(&added)?;
    log::info!("Removed place {id}");
    Ok(())
}

/// All places with every override applied, ready
/// to be exported as a new bundled catalog.
pub fn generate_report<R>(repo: &R) -> Result<Vec<Place>>
where
    R: CatalogRepo + AddedPlaceRepo + ImageOverrideRepo + TextOverrideRepo,
{
    let images = repo.image_overrides()?;
    let texts = repo.text_overrides()?;
    let places = repo
        .catalog_places()?
        .into_iter()
        .chain(repo.added_places()?)
        .map(|mut p| {
            if let Some(url) = images.get(p.id.as_str()).filter(|x| !x.is_empty()) {
                p.image_url = url.clone();
            }
            if let Some(text) = texts.get(p.id.as_str()).filter(|x| !x.is_empty()) {
                p.full_description = Some(text.clone());
            }
            p.rating = p.rating.or(Some(DEFAULT_RATING));
            if let Some(weather) = &mut p.weather {
                weather.water_temp = weather.water_temp.or(Some(DEFAULT_WATER_TEMP));
            }
            p
        })
        .collect();
    Ok(places)
}

/// Discard all modifications that have been made at runtime.
pub fn clear_all_changes<R>(repo: &R) -> Result<()>
where
    R: AddedPlaceRepoMut + ImageOverrideRepoMut + TextOverrideRepoMut,
{
    repo.delete_image_overrides()?;
    repo.delete_text_overrides()?;
    repo.delete_added_places()?;
    log::warn!("All changes have been discarded");
    Ok(())
}
