use crate::{category::CategoryId, geo::MapPoint, id::Id};
use strum::{AsRefStr, Display, EnumString};

/// A single point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id: Id,
    pub category: CategoryId,
    pub title: String,
    /// Name of the town or area, e.g. "Cortegana".
    pub location: String,
    pub short_description: String,
    pub full_description: Option<String>,
    pub image_url: String,
    pub tags: Vec<String>,
    /// Only available for beaches.
    pub weather: Option<WeatherInfo>,
    /// Only available for hiking trails.
    pub hiking: Option<HikingDetails>,
    /// Free text date of events, e.g. "24 - 27 Feb 2026" or "Pentecostés".
    pub date: Option<String>,
    pub rating: Option<f64>,
    pub coordinates: Option<MapPoint>,
}

impl Place {
    pub fn has_tag_containing(&self, needle: &str) -> bool {
        self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherInfo {
    /// Air temperature in °C
    pub temp: f64,
    /// Water temperature in °C
    pub water_temp: Option<f64>,
    pub condition: WeatherCondition,
    pub flag: Option<BeachFlag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Windy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum BeachFlag {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HikingDetails {
    pub distance_km: f64,
    pub time_minutes: u32,
    pub difficulty: Difficulty,
    pub circular: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, AsRefStr, Display, EnumString)]
pub enum Difficulty {
    Baja,
    Media,
    Alta,
    Experto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_enum_values() {
        assert_eq!(Ok(WeatherCondition::Windy), "windy".parse());
        assert_eq!(Ok(BeachFlag::Yellow), "yellow".parse());
        assert_eq!(Ok(Difficulty::Experto), "Experto".parse());
        assert!("experto".parse::<Difficulty>().is_err());
        assert_eq!("green", BeachFlag::Green.as_ref());
    }

    #[test]
    fn difficulty_is_ordered() {
        assert!(Difficulty::Baja < Difficulty::Media);
        assert!(Difficulty::Alta < Difficulty::Experto);
    }
}
