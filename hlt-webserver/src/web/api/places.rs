use super::*;

#[get("/places/<id>")]
pub fn get_place(db: jfs::Connections, cfg: &State<Cfg>, id: &str) -> Result<json::PlaceDetail> {
    let place = usecases::get_place(&db.shared(), id)?;
    let share = usecases::place_share_link(&cfg.public_url, &place);
    let maps_url = usecases::maps_search_url(&place);
    Ok(Json(json::PlaceDetail {
        place: place.into(),
        share: to_json::share_link(share),
        maps_url,
    }))
}

#[get("/places/<id>/image?<generate>")]
pub async fn get_place_image(
    db: jfs::Connections,
    ai: Ai,
    admin: AdminMode,
    id: String,
    generate: Option<bool>,
) -> Result<json::ImageResolution> {
    let opts = usecases::ResolveImageOptions {
        generate: generate.unwrap_or(false),
        admin: admin.0,
    };
    let resolution = blocking(move || {
        let place = usecases::get_place(&db.shared(), &id)?;
        Ok(usecases::resolve_place_image(
            &db,
            &*ai.gateway,
            &ai.breaker,
            &place,
            opts,
        )?)
    })
    .await?;
    Ok(Json(to_json::image_resolution(resolution)))
}

#[get("/places/<id>/details")]
pub async fn get_place_details(
    db: jfs::Connections,
    ai: Ai,
    admin: AdminMode,
    id: String,
) -> Result<json::PlaceText> {
    let text = blocking(move || {
        Ok(usecases::place_details(
            &db,
            &*ai.gateway,
            &ai.breaker,
            &id,
            admin.0,
        )?)
    })
    .await?;
    Ok(Json(to_json::place_text(text)))
}

#[post("/places/<id>/directions", format = "application/json", data = "<position>")]
pub async fn post_directions(
    db: jfs::Connections,
    ai: Ai,
    id: String,
    position: JsonResult<'_, json::Position>,
) -> Result<json::Directions> {
    let json::Position { lat, lng } = position?.into_inner();
    let from = from_json::position(lat, lng)
        .map_err(|_| ApiError::Parameter(ParameterError::InvalidPosition))?;
    let place = usecases::get_place(&db.shared(), &id)?;
    let maps_url = usecases::maps_search_url(&place);
    let directions =
        blocking(move || Ok(usecases::directions(&*ai.gateway, &ai.breaker, from, &place)))
            .await?;
    Ok(Json(to_json::directions(directions, maps_url)))
}
