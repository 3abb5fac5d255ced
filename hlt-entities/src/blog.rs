use crate::id::Id;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub id: Id,
    /// URL friendly name used for deep links.
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// Rich text (HTML)
    pub content: String,
    pub author: String,
    pub date: String,
    pub read_time: String,
    pub image_url: String,
    pub tags: Vec<String>,
}

impl BlogPost {
    /// A post can be referenced either by its slug or by its id.
    pub fn is_referenced_by(&self, slug_or_id: &str) -> bool {
        self.slug == slug_or_id || self.id.as_str() == slug_or_id
    }
}
