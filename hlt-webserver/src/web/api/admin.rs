use super::*;
use serde::Serialize;

#[post("/login", format = "application/json", data = "<login>")]
pub fn post_login(
    cfg: &State<Cfg>,
    cookies: &CookieJar<'_>,
    login: JsonResult<json::Credentials>,
) -> Result<json::AdminSession> {
    let json::Credentials { username, password } = login?.into_inner();
    usecases::login(&cfg.admin, &username, &password)?;
    info!("Administrator '{username}' logged in");
    cookies.add_private(Cookie::build((COOKIE_ADMIN_KEY, username)).same_site(SameSite::Lax));
    Ok(Json(json::AdminSession { admin: true }))
}

#[post("/logout")]
pub fn post_logout(cookies: &CookieJar<'_>) -> Json<json::AdminSession> {
    cookies.remove_private(COOKIE_ADMIN_KEY);
    Json(json::AdminSession { admin: false })
}

#[get("/admin/session")]
pub fn get_session(admin: AdminMode) -> Json<json::AdminSession> {
    Json(json::AdminSession { admin: admin.0 })
}

#[put(
    "/admin/overrides/images/<id>",
    format = "application/json",
    data = "<data>"
)]
pub fn put_image_override(
    db: jfs::Connections,
    _admin: Admin,
    id: &str,
    data: JsonResult<json::ImageOverride>,
) -> Result<bool> {
    let json::ImageOverride { url } = data?.into_inner();
    let changed = usecases::set_image_override(&db.exclusive(), id, &url)?;
    Ok(Json(changed))
}

#[delete("/admin/overrides/images/<id>")]
pub fn delete_image_override(db: jfs::Connections, _admin: Admin, id: &str) -> Result<bool> {
    let removed = usecases::clear_image_override(&db.exclusive(), id)?;
    Ok(Json(removed))
}

#[put(
    "/admin/overrides/texts/<id>",
    format = "application/json",
    data = "<data>"
)]
pub fn put_text_override(
    db: jfs::Connections,
    _admin: Admin,
    id: &str,
    data: JsonResult<json::TextOverride>,
) -> Result<bool> {
    let json::TextOverride { text } = data?.into_inner();
    let changed = usecases::set_text_override(&db.exclusive(), id, &text)?;
    Ok(Json(changed))
}

#[post("/admin/places", format = "application/json", data = "<new_place>")]
pub fn post_place(
    db: jfs::Connections,
    admin: Admin,
    new_place: JsonResult<json::NewPlace>,
) -> Result<json::Place> {
    let new_place =
        from_json::try_new_place(new_place?.into_inner()).map_err(ApiError::bad_request)?;
    let place = usecases::add_place(&db.exclusive(), new_place)?;
    debug!("Place {} has been added by {}", place.id, admin.username());
    Ok(Json(place.into()))
}

#[delete("/admin/places/<id>")]
pub fn delete_place(db: jfs::Connections, _admin: Admin, id: &str) -> StatusResult {
    usecases::remove_place(&db.exclusive(), id)?;
    Ok(Status::NoContent)
}

#[post("/admin/places/<id>/image/regenerate")]
pub async fn post_regenerate_image(
    db: jfs::Connections,
    ai: Ai,
    _admin: Admin,
    id: String,
) -> Result<json::ImageResolution> {
    let resolution = blocking(move || {
        let place = usecases::get_place(&db.shared(), &id)?;
        Ok(usecases::regenerate_place_image(
            &db,
            &*ai.gateway,
            &ai.breaker,
            &place,
        )?)
    })
    .await?;
    Ok(Json(to_json::image_resolution(resolution)))
}

#[get("/admin/report")]
pub fn get_report(
    db: jfs::Connections,
    _admin: Admin,
) -> result::Result<(ContentType, String), ApiError> {
    let places = usecases::generate_report(&db.shared())?;
    let json = hlt_db_jfs::places_to_json(places)?;
    Ok((ContentType::JSON, json))
}

#[derive(Serialize)]
struct ReportRecord {
    id: String,
    category: String,
    title: String,
    location: String,
    lat: Option<f64>,
    lng: Option<f64>,
    date: Option<String>,
    rating: Option<f64>,
    image_url: String,
    tags: String,
    short_description: String,
}

impl From<Place> for ReportRecord {
    fn from(p: Place) -> Self {
        let (lat, lng) = p.coordinates.map(MapPoint::to_lat_lng_deg).unzip();
        Self {
            id: p.id.into(),
            category: p.category.as_str().to_string(),
            title: p.title,
            location: p.location,
            lat,
            lng,
            date: p.date,
            rating: p.rating,
            image_url: p.image_url,
            tags: p.tags.join(","),
            short_description: p.short_description,
        }
    }
}

#[get("/admin/report.csv")]
pub fn get_report_csv(
    db: jfs::Connections,
    _admin: Admin,
) -> result::Result<(ContentType, String), ApiError> {
    let places = usecases::generate_report(&db.shared())?;
    let mut wtr = csv::Writer::from_writer(vec![]);
    for place in places {
        wtr.serialize(ReportRecord::from(place))?;
    }
    wtr.flush()?;
    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok((ContentType::CSV, data))
}

#[delete("/admin/changes")]
pub fn delete_changes(db: jfs::Connections, admin: Admin) -> StatusResult {
    usecases::clear_all_changes(&db.exclusive())?;
    info!("All changes have been discarded by {}", admin.username());
    Ok(Status::NoContent)
}
