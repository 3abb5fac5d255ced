use super::{admin::set_image_override, prelude::*, quota::QuotaBreaker};

pub const CACHE_KEY_PREFIX: &str = "huelvalate_img_v1_";

pub const PLACEHOLDER_COAST: &str =
    "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?q=80&w=600&auto=format&fit=crop";
pub const PLACEHOLDER_SIERRA: &str =
    "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?q=80&w=600&auto=format&fit=crop";
pub const PLACEHOLDER_BLOG: &str =
    "https://images.unsplash.com/photo-1486312338219-ce68d2c6f44d?q=80&w=800&auto=format&fit=crop";

/// Location that is used to build the cache key of blog post images.
const BLOG_LOCATION: &str = "Blog";

pub fn cache_key(title: &str, location: &str) -> String {
    let sanitized: String = format!("{title}_{location}")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{CACHE_KEY_PREFIX}{}", sanitized.to_lowercase())
}

pub fn placeholder(category: CategoryId) -> &'static str {
    if category.is_coastal() {
        PLACEHOLDER_COAST
    } else {
        PLACEHOLDER_SIERRA
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Override,
    Cache,
    Static,
    Generated,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolution {
    pub src: String,
    pub source: ImageSource,
    /// Shown by clients if `src` cannot be loaded.
    pub fallback: &'static str,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveImageOptions {
    /// Ask the AI service for an image if nothing else is available.
    pub generate: bool,
    /// Persist generated images as overrides.
    pub admin: bool,
}

struct ImageSubject<'a> {
    override_id: &'a str,
    title: &'a str,
    location: &'a str,
    description: &'a str,
    static_url: &'a str,
    placeholder: &'static str,
}

impl<'a> From<&'a Place> for ImageSubject<'a> {
    fn from(p: &'a Place) -> Self {
        Self {
            override_id: p.id.as_str(),
            title: &p.title,
            location: &p.location,
            description: &p.short_description,
            static_url: &p.image_url,
            placeholder: placeholder(p.category),
        }
    }
}

impl<'a> From<&'a BlogPost> for ImageSubject<'a> {
    fn from(p: &'a BlogPost) -> Self {
        Self {
            override_id: p.id.as_str(),
            title: &p.title,
            location: BLOG_LOCATION,
            description: &p.excerpt,
            static_url: &p.image_url,
            placeholder: PLACEHOLDER_BLOG,
        }
    }
}

impl ImageSubject<'_> {
    fn cache_key(&self) -> String {
        cache_key(self.title, self.location)
    }

    fn resolution(&self, src: impl Into<String>, source: ImageSource) -> ImageResolution {
        ImageResolution {
            src: src.into(),
            source,
            fallback: self.placeholder,
        }
    }
}

/// Resolve the image without asking the AI service.
fn lookup<R>(repo: &R, subject: &ImageSubject) -> Result<Option<ImageResolution>>
where
    R: ImageOverrideRepo + ImageCacheRepo,
{
    if let Some(url) = repo.get_image_override(subject.override_id)? {
        return Ok(Some(subject.resolution(url, ImageSource::Override)));
    }
    if let Some(image) = repo.cached_image(&subject.cache_key())? {
        return Ok(Some(subject.resolution(image, ImageSource::Cache)));
    }
    if !subject.static_url.is_empty() {
        return Ok(Some(subject.resolution(subject.static_url, ImageSource::Static)));
    }
    Ok(None)
}

fn generate<A>(ai: &A, breaker: &QuotaBreaker, subject: &ImageSubject) -> Option<String>
where
    A: AiGateway + ?Sized,
{
    if breaker.is_open() {
        return None;
    }
    match ai.generate_image(subject.title, subject.location, subject.description) {
        Ok(Some(image)) if !image.is_empty() => Some(image),
        Ok(_) => None,
        Err(err) => {
            breaker.observe(&err);
            log::warn!("Unable to generate image for '{}': {err}", subject.title);
            None
        }
    }
}

/// Cache a generated image and optionally store it as override.
///
/// With `replace == false` an override that has been set
/// while the image was generated is kept.
fn store_generated<R>(
    repo: &R,
    subject: &ImageSubject,
    image: &str,
    admin: bool,
    replace: bool,
) -> Result<()>
where
    R: ImageOverrideRepoMut + ImageCacheRepoMut,
{
    if let Err(err) = repo.cache_image(&subject.cache_key(), image) {
        log::warn!("Unable to cache generated image: {err}");
    }
    if !admin {
        return Ok(());
    }
    if replace || repo.get_image_override(subject.override_id)?.is_none() {
        set_image_override(repo, subject.override_id, image)?;
    }
    Ok(())
}

fn resolve<C, A>(
    db: &C,
    ai: &A,
    breaker: &QuotaBreaker,
    subject: &ImageSubject,
    opts: ResolveImageOptions,
) -> Result<ImageResolution>
where
    C: DbConnections,
    A: AiGateway + ?Sized,
{
    let resolution = lookup(&db.shared(), subject)?;
    if let Some(resolution) = resolution {
        return Ok(resolution);
    }
    if opts.generate {
        if let Some(image) = generate(ai, breaker, subject) {
            store_generated(&db.exclusive(), subject, &image, opts.admin, false)?;
            return Ok(subject.resolution(image, ImageSource::Generated));
        }
    }
    Ok(subject.resolution(subject.placeholder, ImageSource::Placeholder))
}

pub fn resolve_place_image<C, A>(
    db: &C,
    ai: &A,
    breaker: &QuotaBreaker,
    place: &Place,
    opts: ResolveImageOptions,
) -> Result<ImageResolution>
where
    C: DbConnections,
    A: AiGateway + ?Sized,
{
    resolve(db, ai, breaker, &place.into(), opts)
}

pub fn resolve_post_image<C, A>(
    db: &C,
    ai: &A,
    breaker: &QuotaBreaker,
    post: &BlogPost,
    opts: ResolveImageOptions,
) -> Result<ImageResolution>
where
    C: DbConnections,
    A: AiGateway + ?Sized,
{
    resolve(db, ai, breaker, &post.into(), opts)
}

/// Drop the cached image and ask for a new one.
///
/// The current override stays in place until a new
/// image has been generated successfully.
pub fn regenerate_place_image<C, A>(
    db: &C,
    ai: &A,
    breaker: &QuotaBreaker,
    place: &Place,
) -> Result<ImageResolution>
where
    C: DbConnections,
    A: AiGateway + ?Sized,
{
    let subject = ImageSubject::from(place);
    db.exclusive().delete_cached_image(&subject.cache_key())?;
    if let Some(image) = generate(ai, breaker, &subject) {
        store_generated(&db.exclusive(), &subject, &image, true, true)?;
        log::info!("Regenerated image of place {}", place.id);
        return Ok(subject.resolution(image, ImageSource::Generated));
    }
    let opts = ResolveImageOptions {
        generate: false,
        admin: true,
    };
    resolve(db, ai, breaker, &subject, opts)
}

#[cfg(test)]
mod tests {
    use super::{
        super::tests::{MockAi, MockDb},
        *,
    };
    use hlt_entities::builders::*;

    fn place(image_url: &str) -> Place {
        Place::build()
            .id("p1")
            .category(CategoryId::Playas)
            .title("Playa de la Bota")
            .location("Punta Umbría")
            .image_url(image_url)
            .finish()
    }

    const GENERATE: ResolveImageOptions = ResolveImageOptions {
        generate: true,
        admin: false,
    };

    #[test]
    fn sanitize_cache_keys() {
        assert_eq!(
            "huelvalate_img_v1_playa_de_la_bota_punta_umbr_a",
            cache_key("Playa de la Bota", "Punta Umbría")
        );
        assert_eq!("huelvalate_img_v1_a_blog", cache_key("A", "Blog"));
    }

    #[test]
    fn placeholders_by_category() {
        assert_eq!(PLACEHOLDER_COAST, placeholder(CategoryId::Playas));
        assert_eq!(PLACEHOLDER_SIERRA, placeholder(CategoryId::Senderismo));
        assert_eq!(PLACEHOLDER_SIERRA, placeholder(CategoryId::Agenda));
    }

    #[test]
    fn override_wins() {
        let db = MockDb::default();
        let ai = MockAi::default();
        let breaker = QuotaBreaker::new();
        let p = place("https://img/static.jpg");
        db.cache
            .borrow_mut()
            .insert(cache_key(&p.title, &p.location), "data:cached".into());
        db.image_overrides
            .borrow_mut()
            .insert("p1".into(), "https://img/override.jpg".into());
        let res = resolve_place_image(&db, &ai, &breaker, &p, GENERATE).unwrap();
        assert_eq!(ImageSource::Override, res.source);
        assert_eq!("https://img/override.jpg", res.src);
        assert_eq!(PLACEHOLDER_COAST, res.fallback);
    }

    #[test]
    fn cache_before_static() {
        let db = MockDb::default();
        let ai = MockAi::default();
        let breaker = QuotaBreaker::new();
        let p = place("https://img/static.jpg");
        db.cache
            .borrow_mut()
            .insert(cache_key(&p.title, &p.location), "data:cached".into());
        let res = resolve_place_image(&db, &ai, &breaker, &p, Default::default()).unwrap();
        assert_eq!(ImageSource::Cache, res.source);
        assert_eq!("data:cached", res.src);
    }

    #[test]
    fn static_image_without_generation() {
        let db = MockDb::default();
        let ai = MockAi::default();
        *ai.image.borrow_mut() = Ok(Some("data:image/png;base64,AAA".into()));
        let breaker = QuotaBreaker::new();
        let res =
            resolve_place_image(&db, &ai, &breaker, &place("https://img/s.jpg"), GENERATE).unwrap();
        assert_eq!(ImageSource::Static, res.source);
        assert_eq!(0, ai.calls.get());
    }

    #[test]
    fn placeholder_if_nothing_is_available() {
        let db = MockDb::default();
        let ai = MockAi::default();
        let breaker = QuotaBreaker::new();
        let res = resolve_place_image(&db, &ai, &breaker, &place(""), Default::default()).unwrap();
        assert_eq!(ImageSource::Placeholder, res.source);
        assert_eq!(PLACEHOLDER_COAST, res.src);
        assert_eq!(0, ai.calls.get());
    }

    #[test]
    fn generate_and_cache_missing_images() {
        let db = MockDb::default();
        let ai = MockAi::default();
        *ai.image.borrow_mut() = Ok(Some("data:image/png;base64,AAA".into()));
        let breaker = QuotaBreaker::new();
        let p = place("");
        let res = resolve_place_image(&db, &ai, &breaker, &p, GENERATE).unwrap();
        assert_eq!(ImageSource::Generated, res.source);
        assert_eq!(
            Some(&"data:image/png;base64,AAA".to_string()),
            db.cache.borrow().get(&cache_key(&p.title, &p.location))
        );
        assert!(db.image_overrides.borrow().is_empty());

        let admin = ResolveImageOptions {
            generate: true,
            admin: true,
        };
        db.cache.borrow_mut().clear();
        resolve_place_image(&db, &ai, &breaker, &p, admin).unwrap();
        assert_eq!(
            Some(&"data:image/png;base64,AAA".to_string()),
            db.image_overrides.borrow().get("p1")
        );
    }

    #[test]
    fn quota_errors_trip_the_breaker() {
        let db = MockDb::default();
        let ai = MockAi::default();
        *ai.image.borrow_mut() = Err(AiError::Quota("429".into()));
        let breaker = QuotaBreaker::new();
        let res = resolve_place_image(&db, &ai, &breaker, &place(""), GENERATE).unwrap();
        assert_eq!(ImageSource::Placeholder, res.source);
        assert!(breaker.is_open());
        resolve_place_image(&db, &ai, &breaker, &place(""), GENERATE).unwrap();
        assert_eq!(1, ai.calls.get());
    }

    #[test]
    fn blog_post_images() {
        let db = MockDb::default();
        let ai = MockAi::default();
        let breaker = QuotaBreaker::new();
        let post = BlogPost::build().id("1").title("Rocío").finish();
        let res = resolve_post_image(&db, &ai, &breaker, &post, Default::default()).unwrap();
        assert_eq!(PLACEHOLDER_BLOG, res.src);
        db.cache
            .borrow_mut()
            .insert(cache_key("Rocío", "Blog"), "data:x".into());
        let res = resolve_post_image(&db, &ai, &breaker, &post, Default::default()).unwrap();
        assert_eq!(ImageSource::Cache, res.source);
    }

    #[test]
    fn regenerate_replaces_cache_and_override() {
        let db = MockDb::default();
        let ai = MockAi::default();
        let breaker = QuotaBreaker::new();
        let p = place("https://img/static.jpg");
        let key = cache_key(&p.title, &p.location);
        db.cache.borrow_mut().insert(key.clone(), "data:old".into());
        db.image_overrides
            .borrow_mut()
            .insert("p1".into(), "https://img/old.jpg".into());

        // Nothing generated: the override is kept
        let res = regenerate_place_image(&db, &ai, &breaker, &p).unwrap();
        assert_eq!(ImageSource::Override, res.source);
        assert!(db.cache.borrow().get(&key).is_none());

        *ai.image.borrow_mut() = Ok(Some("data:new".into()));
        let res = regenerate_place_image(&db, &ai, &breaker, &p).unwrap();
        assert_eq!(ImageSource::Generated, res.source);
        assert_eq!(Some(&"data:new".to_string()), db.cache.borrow().get(&key));
        assert_eq!(
            Some(&"data:new".to_string()),
            db.image_overrides.borrow().get("p1")
        );
    }
}
