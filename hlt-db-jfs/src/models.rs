// Storage representation of the entities.
//
// The field names (camelCase) must stay compatible with
// the bundled catalog and with already persisted data.

use hlt_core::entities as e;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon_name: String,
    pub color: String,
    pub cover_image: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    pub temp: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_temp: Option<f64>,
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hiking {
    pub distance_km: f64,
    pub time_minutes: u32,
    pub difficulty: String,
    pub circular: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub category_id: String,
    pub title: String,
    pub location: String,
    pub short_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hiking: Option<Hiking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub date: String,
    pub read_time: String,
    pub image_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub posts: Vec<BlogPost>,
    #[serde(default)]
    pub places: Vec<Place>,
}

impl TryFrom<Category> for e::Category {
    type Error = anyhow::Error;
    fn try_from(from: Category) -> anyhow::Result<Self> {
        let Category {
            id,
            title,
            description,
            icon_name,
            color,
            cover_image,
        } = from;
        let id = id
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown category '{id}'"))?;
        Ok(Self {
            id,
            title,
            description,
            icon_name,
            color,
            cover_image,
        })
    }
}

impl TryFrom<Weather> for e::WeatherInfo {
    type Error = anyhow::Error;
    fn try_from(from: Weather) -> anyhow::Result<Self> {
        Ok(Self {
            temp: from.temp,
            water_temp: from.water_temp,
            condition: from.condition.parse()?,
            flag: from.flag.map(|f| f.parse()).transpose()?,
        })
    }
}

impl From<e::WeatherInfo> for Weather {
    fn from(from: e::WeatherInfo) -> Self {
        Self {
            temp: from.temp,
            water_temp: from.water_temp,
            condition: from.condition.to_string(),
            flag: from.flag.map(|f| f.to_string()),
        }
    }
}

impl TryFrom<Hiking> for e::HikingDetails {
    type Error = anyhow::Error;
    fn try_from(from: Hiking) -> anyhow::Result<Self> {
        Ok(Self {
            distance_km: from.distance_km,
            time_minutes: from.time_minutes,
            difficulty: from.difficulty.parse()?,
            circular: from.circular,
        })
    }
}

impl From<e::HikingDetails> for Hiking {
    fn from(from: e::HikingDetails) -> Self {
        Self {
            distance_km: from.distance_km,
            time_minutes: from.time_minutes,
            difficulty: from.difficulty.to_string(),
            circular: from.circular,
        }
    }
}

impl TryFrom<Place> for e::Place {
    type Error = anyhow::Error;
    fn try_from(from: Place) -> anyhow::Result<Self> {
        let Place {
            id,
            category_id,
            title,
            location,
            short_description,
            full_description,
            image_url,
            tags,
            weather,
            hiking,
            date,
            rating,
            coordinates,
        } = from;
        let category = category_id
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown category '{category_id}' of place {id}"))?;
        let coordinates = coordinates
            .map(|Coordinates { lat, lng }| {
                e::MapPoint::try_from_lat_lng_deg(lat, lng)
                    .ok_or_else(|| anyhow::anyhow!("Invalid coordinates of place {id}"))
            })
            .transpose()?;
        Ok(Self {
            id: id.into(),
            category,
            title,
            location,
            short_description,
            full_description,
            image_url,
            tags,
            weather: weather.map(TryInto::try_into).transpose()?,
            hiking: hiking.map(TryInto::try_into).transpose()?,
            date,
            rating,
            coordinates,
        })
    }
}

impl From<e::Place> for Place {
    fn from(from: e::Place) -> Self {
        let e::Place {
            id,
            category,
            title,
            location,
            short_description,
            full_description,
            image_url,
            tags,
            weather,
            hiking,
            date,
            rating,
            coordinates,
        } = from;
        Self {
            id: id.into(),
            category_id: category.as_str().to_string(),
            title,
            location,
            short_description,
            full_description,
            image_url,
            tags,
            weather: weather.map(Into::into),
            hiking: hiking.map(Into::into),
            date,
            rating,
            coordinates: coordinates.map(|pos| {
                let (lat, lng) = pos.to_lat_lng_deg();
                Coordinates { lat, lng }
            }),
        }
    }
}

impl From<BlogPost> for e::BlogPost {
    fn from(from: BlogPost) -> Self {
        let BlogPost {
            id,
            slug,
            title,
            excerpt,
            content,
            author,
            date,
            read_time,
            image_url,
            tags,
        } = from;
        Self {
            id: id.into(),
            slug,
            title,
            excerpt,
            content,
            author,
            date,
            read_time,
            image_url,
            tags,
        }
    }
}
