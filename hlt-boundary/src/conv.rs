use super::*;
use hlt_entities as e;

impl From<e::category::Category> for Category {
    fn from(from: e::category::Category) -> Self {
        let e::category::Category {
            id,
            title,
            description,
            icon_name,
            color,
            cover_image,
        } = from;
        Self {
            id: id.as_str().to_string(),
            title,
            description,
            icon_name,
            color,
            cover_image,
        }
    }
}

impl From<e::geo::MapPoint> for Coordinates {
    fn from(from: e::geo::MapPoint) -> Self {
        let (lat, lng) = from.to_lat_lng_deg();
        Self { lat, lng }
    }
}

impl From<e::place::WeatherInfo> for Weather {
    fn from(from: e::place::WeatherInfo) -> Self {
        let e::place::WeatherInfo {
            temp,
            water_temp,
            condition,
            flag,
        } = from;
        Self {
            temp,
            water_temp,
            condition: condition.to_string(),
            flag: flag.map(|f| f.to_string()),
        }
    }
}

impl TryFrom<Weather> for e::place::WeatherInfo {
    type Error = String;
    fn try_from(from: Weather) -> Result<Self, Self::Error> {
        let Weather {
            temp,
            water_temp,
            condition,
            flag,
        } = from;
        let condition = condition
            .parse()
            .map_err(|_| format!("Invalid weather condition: {condition}"))?;
        let flag = flag
            .map(|f| f.parse().map_err(|_| format!("Invalid beach flag: {f}")))
            .transpose()?;
        Ok(Self {
            temp,
            water_temp,
            condition,
            flag,
        })
    }
}

impl From<e::place::HikingDetails> for Hiking {
    fn from(from: e::place::HikingDetails) -> Self {
        let e::place::HikingDetails {
            distance_km,
            time_minutes,
            difficulty,
            circular,
        } = from;
        Self {
            distance_km,
            time_minutes,
            difficulty: difficulty.to_string(),
            circular,
        }
    }
}

impl TryFrom<Hiking> for e::place::HikingDetails {
    type Error = String;
    fn try_from(from: Hiking) -> Result<Self, Self::Error> {
        let Hiking {
            distance_km,
            time_minutes,
            difficulty,
            circular,
        } = from;
        let difficulty = difficulty
            .parse()
            .map_err(|_| format!("Invalid difficulty: {difficulty}"))?;
        Ok(Self {
            distance_km,
            time_minutes,
            difficulty,
            circular,
        })
    }
}

impl From<e::place::Place> for Place {
    fn from(from: e::place::Place) -> Self {
        let e::place::Place {
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
            coordinates: coordinates.map(Into::into),
        }
    }
}

impl From<e::blog::BlogPost> for BlogPost {
    fn from(from: e::blog::BlogPost) -> Self {
        let e::blog::BlogPost {
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
