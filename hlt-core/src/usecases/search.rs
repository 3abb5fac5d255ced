use super::{browse::all_places, prelude::*, quota::QuotaBreaker};
use lazy_static::lazy_static;
use regex::Regex;

/// Maximum distance of places that are found by "near me" queries.
pub const NEARBY_RADIUS_KM: f64 = 50.0;

const MIN_TOPIC_LEN: usize = 3;

lazy_static! {
    static ref NEAR_ME: Regex = Regex::new(r"(?i)cerca|near|aquí|aqui").unwrap();
    static ref NEAR_ME_WORDS: Regex = Regex::new(r"cerca|de|mi|near|me|aqui|aquí|\s+").unwrap();
}

pub fn is_near_me(query: &str) -> bool {
    NEAR_ME.is_match(query)
}

/// Strip the "near me" phrase from a query to get the actual topic,
/// e.g. "playas cerca de mi" becomes "playas".
pub fn extract_topic(query: &str) -> String {
    NEAR_ME_WORDS
        .replace_all(&query.to_lowercase(), " ")
        .trim()
        .to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub place: Place,
    pub distance_km: Option<f64>,
}

impl From<Place> for SearchHit {
    fn from(place: Place) -> Self {
        Self {
            place,
            distance_km: None,
        }
    }
}

fn matches_topic(place: &Place, topic: &str) -> bool {
    place.title.to_lowercase().contains(topic)
        || place.has_tag_containing(topic)
        || place.category.as_str().contains(topic)
        || place.short_description.to_lowercase().contains(topic)
}

pub fn search_nearby(places: Vec<Place>, position: MapPoint, topic: &str) -> Vec<SearchHit> {
    let topic = topic.to_lowercase();
    let mut hits: Vec<_> = places
        .into_iter()
        .filter_map(|place| {
            let pos = place.coordinates?;
            let distance = MapPoint::haversine_distance(position, pos).to_km();
            (distance <= NEARBY_RADIUS_KM).then_some((place, distance))
        })
        .filter(|(place, _)| topic.chars().count() < MIN_TOPIC_LEN || matches_topic(place, &topic))
        .map(|(place, distance)| SearchHit {
            place,
            distance_km: Some(distance),
        })
        .collect();
    hits.sort_by(|a, b| a.distance_km.partial_cmp(&b.distance_km).unwrap_or(std::cmp::Ordering::Equal));
    hits
}

/// Plain substring search that is used if the AI service is not available.
pub fn fallback_search(places: Vec<Place>, query: &str) -> Vec<Place> {
    let q = query.to_lowercase();
    places
        .into_iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&q)
                || p.has_tag_containing(&q)
                || p.location.to_lowercase().contains(&q)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Empty,
    Nearby,
    Ai,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    /// The current position of the visitor, if known.
    pub position: Option<MapPoint>,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub mode: SearchMode,
    pub status: Option<String>,
    pub results: Vec<SearchHit>,
}

impl SearchOutcome {
    fn empty() -> Self {
        Self {
            mode: SearchMode::Empty,
            status: None,
            results: vec![],
        }
    }
}

fn ai_search<A: AiGateway + ?Sized>(
    ai: &A,
    breaker: &QuotaBreaker,
    places: Vec<Place>,
    query: &str,
) -> (SearchMode, Vec<Place>) {
    if breaker.is_open() {
        return (SearchMode::Fallback, fallback_search(places, query));
    }
    let digests: Vec<PlaceDigest> = places.iter().map(PlaceDigest::from).collect();
    match ai.rank_places(query, &digests) {
        Ok(ids) => {
            let mut ranked: Vec<_> = places
                .into_iter()
                .filter_map(|p| {
                    let rank = ids.iter().position(|id| id == p.id.as_str())?;
                    Some((rank, p))
                })
                .collect();
            ranked.sort_by_key(|(rank, _)| *rank);
            (SearchMode::Ai, ranked.into_iter().map(|(_, p)| p).collect())
        }
        Err(err) => {
            breaker.observe(&err);
            log::warn!("AI search failed: {err}");
            (SearchMode::Fallback, fallback_search(places, query))
        }
    }
}

pub fn search<C, A>(
    db: &C,
    ai: &A,
    breaker: &QuotaBreaker,
    req: &SearchRequest,
) -> Result<SearchOutcome>
where
    C: DbConnections,
    A: AiGateway + ?Sized,
{
    let query = req.query.trim();
    if query.is_empty() {
        return Ok(SearchOutcome::empty());
    }
    let places = all_places(&db.shared())?;
    let mut status = None;
    if is_near_me(query) {
        if let Some(pos) = req.position {
            let results = search_nearby(places, pos, &extract_topic(query));
            let status = if results.is_empty() {
                "No hay lugares cercanos registrados.".to_string()
            } else {
                format!("Encontrados {} lugares en 50km", results.len())
            };
            return Ok(SearchOutcome {
                mode: SearchMode::Nearby,
                status: Some(status),
                results,
            });
        }
        status = Some("Ubicación no disponible. Buscando por texto...".to_string());
    }
    let (mode, places) = ai_search(ai, breaker, places, query);
    Ok(SearchOutcome {
        mode,
        status,
        results: places.into_iter().map(SearchHit::from).collect(),
    })
}
