use askama::Template;
use hlt_core::{entities::*, gateways::ai::PlaceDigest};
use serde::Serialize;

#[derive(Template)]
#[template(path = "prompts/place_details.txt")]
struct PlaceDetailsTemplate<'a> {
    title: &'a str,
    location: &'a str,
    date: &'a str,
    is_beach: bool,
    is_trail: bool,
    is_heritage: bool,
    is_event: bool,
}

pub fn place_details(place: &Place) -> askama::Result<String> {
    let category = place.category;
    PlaceDetailsTemplate {
        title: &place.title,
        location: &place.location,
        date: place.date.as_deref().unwrap_or_default(),
        is_beach: category == CategoryId::Playas,
        is_trail: matches!(
            category,
            CategoryId::Senderismo | CategoryId::MonumentosNaturales
        ),
        is_heritage: category == CategoryId::Patrimonio,
        is_event: category == CategoryId::Agenda,
    }
    .render()
}

#[derive(Template)]
#[template(path = "prompts/place_image.txt")]
struct PlaceImageTemplate<'a> {
    title: &'a str,
    location: &'a str,
    description: &'a str,
}

pub fn place_image(title: &str, location: &str, description: &str) -> askama::Result<String> {
    PlaceImageTemplate {
        title,
        location,
        description,
    }
    .render()
}

/// Compact representation with short keys to save tokens.
#[derive(Serialize)]
struct SearchContext<'a> {
    id: &'a str,
    title: &'a str,
    tags: &'a [String],
    desc: &'a str,
    loc: &'a str,
}

#[derive(Template)]
#[template(path = "prompts/search.txt")]
struct SearchTemplate<'a> {
    places_json: &'a str,
    query: &'a str,
}

pub fn search(query: &str, places: &[PlaceDigest]) -> anyhow::Result<String> {
    let context: Vec<_> = places
        .iter()
        .map(|p| SearchContext {
            id: &p.id,
            title: &p.title,
            tags: &p.tags,
            desc: &p.description,
            loc: &p.location,
        })
        .collect();
    let places_json = serde_json::to_string(&context)?;
    Ok(SearchTemplate {
        places_json: &places_json,
        query,
    }
    .render()?)
}

#[derive(Template)]
#[template(path = "prompts/directions.txt")]
struct DirectionsTemplate<'a> {
    lat: f64,
    lng: f64,
    title: &'a str,
    location: &'a str,
}

pub fn directions(from: MapPoint, title: &str, location: &str) -> askama::Result<String> {
    let (lat, lng) = from.to_lat_lng_deg();
    DirectionsTemplate {
        lat,
        lng,
        title,
        location,
    }
    .render()
}

#[derive(Template)]
#[template(path = "prompts/assistant.txt")]
struct AssistantTemplate;

pub fn assistant() -> askama::Result<String> {
    AssistantTemplate.render()
}
