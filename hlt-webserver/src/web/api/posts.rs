use super::*;

#[get("/posts")]
pub fn get_posts(db: jfs::Connections) -> Result<Vec<json::BlogPost>> {
    let posts = usecases::blog_posts(&db.shared())?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

#[get("/posts/<slug_or_id>?<generate>")]
pub async fn get_post(
    db: jfs::Connections,
    ai: Ai,
    cfg: &State<Cfg>,
    admin: AdminMode,
    slug_or_id: String,
    generate: Option<bool>,
) -> Result<json::PostDetail> {
    let post = usecases::find_post(&db.shared(), &slug_or_id)?
        .ok_or(ApiError::Repo(RepoError::NotFound))?;
    let share = usecases::post_share_link(&cfg.public_url, &post);
    let opts = usecases::ResolveImageOptions {
        generate: generate.unwrap_or(false),
        admin: admin.0,
    };
    let (post, image) = blocking(move || {
        let image = usecases::resolve_post_image(&db, &*ai.gateway, &ai.breaker, &post, opts)?;
        Ok((post, image))
    })
    .await?;
    Ok(Json(json::PostDetail {
        post: post.into(),
        share: to_json::share_link(share),
        image: to_json::image_resolution(image),
    }))
}
