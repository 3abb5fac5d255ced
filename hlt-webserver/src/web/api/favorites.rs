use super::*;

#[get("/favorites")]
pub fn get_favorites(db: jfs::Connections, visitor: Visitor) -> Result<Vec<String>> {
    let ids = usecases::favorites(&db.shared(), &visitor.0)?;
    Ok(Json(ids.into_iter().map(Into::into).collect()))
}

#[post("/favorites/<id>")]
pub fn post_favorite(
    db: jfs::Connections,
    visitor: Visitor,
    id: &str,
) -> Result<json::FavoriteState> {
    let id = Id::from(id);
    let favorite = usecases::toggle_favorite(&db.exclusive(), &visitor.0, &id)?;
    Ok(Json(json::FavoriteState {
        id: id.into(),
        favorite,
    }))
}

#[get("/guide")]
pub fn get_guide(db: jfs::Connections, visitor: Visitor) -> Result<json::Guide> {
    let guide = usecases::guide(&db.shared(), &visitor.0)?;
    Ok(Json(to_json::guide(guide)))
}
