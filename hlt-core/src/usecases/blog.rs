use super::prelude::*;

pub fn blog_posts<R: CatalogRepo>(repo: &R) -> Result<Vec<BlogPost>> {
    Ok(repo.all_blog_posts()?)
}

/// Find a post by its slug or its id.
pub fn find_post<R: CatalogRepo>(repo: &R, slug_or_id: &str) -> Result<Option<BlogPost>> {
    Ok(repo
        .all_blog_posts()?
        .into_iter()
        .find(|p| p.is_referenced_by(slug_or_id)))
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use hlt_entities::builders::*;

    #[test]
    fn find_post_by_slug_or_id() {
        let db = MockDb::default();
        db.posts
            .borrow_mut()
            .push(BlogPost::build().id("1").slug("rocio-2026").finish());
        assert!(find_post(&db, "rocio-2026").unwrap().is_some());
        assert!(find_post(&db, "1").unwrap().is_some());
        assert!(find_post(&db, "2").unwrap().is_none());
        assert_eq!(1, blog_posts(&db).unwrap().len());
    }
}
