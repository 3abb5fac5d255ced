use super::*;
use rocket::FromForm;

/// Query parameters of a deep link into the web app.
#[derive(Debug, FromForm)]
pub struct RouteQuery {
    view: Option<String>,
    id: Option<String>,
    #[field(name = "placeId")]
    place_id: Option<String>,
}

#[get("/route?<query..>")]
pub fn get_route(db: jfs::Connections, query: RouteQuery) -> Result<json::Route> {
    let RouteQuery { view, id, place_id } = query;
    let params = usecases::RouteParams { view, id, place_id };
    let route = usecases::resolve_route(&db.shared(), &params)?;
    let canonical = usecases::RouteParams {
        view: Some(route.view.to_string()),
        id: route.post.as_ref().and(params.id),
        place_id: route.place.as_ref().map(|p| p.id.to_string()),
    };
    Ok(Json(to_json::route(route, canonical.query_string())))
}

#[get("/search?<q>&<lat>&<lng>")]
pub async fn get_search(
    db: jfs::Connections,
    ai: Ai,
    q: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<json::SearchResponse> {
    let position = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(
            from_json::position(lat, lng)
                .map_err(|_| ApiError::Parameter(ParameterError::InvalidPosition))?,
        ),
        _ => None,
    };
    let req = usecases::SearchRequest {
        query: q.unwrap_or_default(),
        position,
    };
    let outcome = blocking(move || {
        Ok(usecases::search(
            &db,
            &*ai.gateway,
            &ai.breaker,
            &req,
        )?)
    })
    .await?;
    Ok(Json(to_json::search_response(outcome)))
}
