use super::*;

#[get("/home")]
pub fn get_home(db: jfs::Connections) -> Result<json::Home> {
    let home = usecases::home(&db.shared())?;
    Ok(Json(to_json::home(home)))
}

#[get("/categories")]
pub fn get_categories(db: jfs::Connections) -> Result<Vec<json::CategoryTile>> {
    let tiles = usecases::category_tiles(&db.shared())?
        .into_iter()
        .map(to_json::category_tile)
        .collect();
    Ok(Json(tiles))
}

#[get("/categories/<id>?<page>")]
pub fn get_category(
    db: jfs::Connections,
    id: &str,
    page: Option<usize>,
) -> Result<json::CategoryPage> {
    let id = id
        .parse::<CategoryId>()
        .map_err(|_| ApiError::Repo(RepoError::NotFound))?;
    let page = usecases::browse_category(&db.shared(), id, page.unwrap_or(1))?;
    Ok(Json(to_json::category_page(page)))
}
