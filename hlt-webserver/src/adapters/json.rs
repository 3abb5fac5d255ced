pub use hlt_boundary::*;

use crate::core::{entities as e, gateways::ai, usecases};

pub mod from_json {
    //! JSON -> Entity

    use super::*;
    use anyhow::{anyhow, Context as _};

    // NOTE:
    // We cannot impl From<T> here, because the JSON structs
    // and the use case types both are outside this crate.

    pub fn position(lat: f64, lng: f64) -> anyhow::Result<e::MapPoint> {
        e::MapPoint::try_from_lat_lng_deg(lat, lng)
            .ok_or_else(|| anyhow!("Invalid position: {lat},{lng}"))
    }

    pub fn chat_message(from: ChatMessage) -> ai::ChatMessage {
        let ChatMessage { role, text } = from;
        let role = match role {
            ChatRole::User => ai::ChatRole::User,
            ChatRole::Model => ai::ChatRole::Model,
        };
        ai::ChatMessage { role, text }
    }

    pub fn try_new_place(p: NewPlace) -> anyhow::Result<usecases::NewPlace> {
        let NewPlace {
            id,
            category_id,
            title,
            location,
            short_description,
            full_description,
            image_url,
            tags,
            date,
            rating,
            lat,
            lng,
            weather,
            hiking,
        } = p;
        let category = category_id
            .parse::<e::CategoryId>()
            .map_err(|_| anyhow!("Unknown category: {category_id}"))?;
        let position = match (lat, lng) {
            (Some(lat), Some(lng)) => Some(position(lat, lng)?),
            (None, None) => None,
            _ => return Err(anyhow!("Incomplete position")),
        };
        let weather = weather
            .map(e::WeatherInfo::try_from)
            .transpose()
            .map_err(|err| anyhow!(err))
            .context("Invalid weather")?;
        let hiking = hiking
            .map(e::HikingDetails::try_from)
            .transpose()
            .map_err(|err| anyhow!(err))
            .context("Invalid hiking details")?;
        Ok(usecases::NewPlace {
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
        })
    }
}

pub mod to_json {
    //! Use case -> JSON

    use super::*;

    pub fn category_tile(from: usecases::CategoryTile) -> CategoryTile {
        let usecases::CategoryTile {
            category,
            header_image,
        } = from;
        CategoryTile {
            category: category.into(),
            header_image,
        }
    }

    pub fn home(from: usecases::Home) -> Home {
        let usecases::Home {
            categories,
            markers,
            featured_posts,
        } = from;
        Home {
            categories: categories.into_iter().map(category_tile).collect(),
            markers: markers.into_iter().map(Into::into).collect(),
            featured_posts: featured_posts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn category_page(from: usecases::CategoryPage) -> CategoryPage {
        let usecases::CategoryPage {
            category,
            header_image,
            places,
            total,
            page,
            has_more,
        } = from;
        CategoryPage {
            category: category.into(),
            header_image,
            places: places.into_iter().map(Into::into).collect(),
            total,
            page,
            has_more,
        }
    }

    pub fn share_link(from: usecases::ShareLink) -> ShareLink {
        let usecases::ShareLink { title, text, url } = from;
        ShareLink { title, text, url }
    }

    pub fn image_resolution(from: usecases::ImageResolution) -> ImageResolution {
        let usecases::ImageResolution {
            src,
            source,
            fallback,
        } = from;
        let source = match source {
            usecases::ImageSource::Override => ImageSource::Override,
            usecases::ImageSource::Cache => ImageSource::Cache,
            usecases::ImageSource::Static => ImageSource::Static,
            usecases::ImageSource::Generated => ImageSource::Generated,
            usecases::ImageSource::Placeholder => ImageSource::Placeholder,
        };
        ImageResolution {
            src,
            source,
            fallback: fallback.to_string(),
        }
    }

    pub fn place_text(from: usecases::PlaceText) -> PlaceText {
        let usecases::PlaceText { text, source } = from;
        let source = match source {
            usecases::TextSource::Override => TextSource::Override,
            usecases::TextSource::Description => TextSource::Description,
            usecases::TextSource::Generated => TextSource::Generated,
            usecases::TextSource::Fallback => TextSource::Fallback,
        };
        PlaceText { text, source }
    }

    pub fn search_response(from: usecases::SearchOutcome) -> SearchResponse {
        let usecases::SearchOutcome {
            mode,
            status,
            results,
        } = from;
        let mode = match mode {
            usecases::SearchMode::Empty => SearchMode::Empty,
            usecases::SearchMode::Nearby => SearchMode::Nearby,
            usecases::SearchMode::Ai => SearchMode::Ai,
            usecases::SearchMode::Fallback => SearchMode::Fallback,
        };
        let results = results
            .into_iter()
            .map(|hit| SearchHit {
                place: hit.place.into(),
                distance_km: hit.distance_km,
            })
            .collect();
        SearchResponse {
            mode,
            status,
            results,
        }
    }

    pub fn directions(from: ai::Directions, maps_url: String) -> Directions {
        let ai::Directions {
            text,
            grounding_chunks,
        } = from;
        Directions {
            text,
            grounding_chunks,
            maps_url,
        }
    }

    pub fn guide(from: usecases::Guide) -> Guide {
        let usecases::Guide { places, posts } = from;
        Guide {
            places: places.into_iter().map(Into::into).collect(),
            posts: posts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn route(from: usecases::Route, query: String) -> Route {
        let usecases::Route { view, post, place } = from;
        Route {
            view: view.to_string(),
            post: post.map(Into::into),
            place: place.map(Into::into),
            query,
        }
    }
}
