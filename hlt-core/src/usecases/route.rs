use super::{blog::find_post, browse::all_places, prelude::*};
use std::{fmt, str::FromStr};
use url::form_urlencoded;

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Home,
    Blog,
    PostDetail,
    Category(CategoryId),
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Blog => "blog",
            Self::PostDetail => "post_detail",
            Self::Category(id) => id.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownView;

impl FromStr for View {
    type Err = UnknownView;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "home" => Self::Home,
            "blog" => Self::Blog,
            "post_detail" => Self::PostDetail,
            _ => Self::Category(s.parse().map_err(|_| UnknownView)?),
        })
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw query parameters of a deep link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    pub view: Option<String>,
    pub id: Option<String>,
    pub place_id: Option<String>,
}

impl RouteParams {
    pub fn query_string(&self) -> String {
        let view = self
            .view
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let mut query =
            form_urlencoded::Serializer::for_suffix(Route::query_string(view, self.id.as_deref()), 0);
        if let Some(place_id) = &self.place_id {
            query.append_pair("placeId", place_id);
        }
        query.finish()
    }
}

#[derive(Debug, Clone)]
pub struct Route {
    pub view: View,
    pub post: Option<BlogPost>,
    /// Place that is opened on top of the view.
    pub place: Option<Place>,
}

impl Route {
    /// The home view is the default and therefore never
    /// written into the query.
    pub fn query_string(view: View, id: Option<&str>) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if view != View::Home {
            query.append_pair("view", view.as_str());
        }
        if let Some(id) = id {
            query.append_pair("id", id);
        }
        query.finish()
    }
}

pub fn resolve_route<R>(repo: &R, params: &RouteParams) -> Result<Route>
where
    R: CatalogRepo + AddedPlaceRepo,
{
    let mut view = match params.view.as_deref() {
        Some(v) => v.parse().unwrap_or_else(|_| {
            log::debug!("Unknown view '{v}'");
            View::Home
        }),
        None => View::Home,
    };
    let place = match &params.place_id {
        Some(id) => all_places(repo)?
            .into_iter()
            .find(|p| p.id.as_str() == id),
        None => None,
    };
    let mut post = None;
    if view == View::PostDetail {
        if let Some(id) = &params.id {
            post = find_post(repo, id)?;
            if post.is_none() {
                view = View::Blog;
            }
        }
    }
    Ok(Route { view, post, place })
}

/// Close the place overlay without leaving the current view.
pub fn close_place(params: &RouteParams) -> RouteParams {
    RouteParams {
        place_id: None,
        ..params.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub title: String,
    pub text: String,
    pub url: String,
}

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

pub fn post_share_link(base_url: &str, post: &BlogPost) -> ShareLink {
    ShareLink {
        title: post.title.clone(),
        text: post.excerpt.clone(),
        url: format!(
            "{}/?{}",
            trim_base(base_url),
            Route::query_string(View::PostDetail, Some(&post.slug))
        ),
    }
}

pub fn place_share_link(base_url: &str, place: &Place) -> ShareLink {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("placeId", place.id.as_str())
        .finish();
    ShareLink {
        title: place.title.clone(),
        text: format!(
            "¡Mira este plan en HuelvaLate!\n\n{} ({})\n{}",
            place.title, place.location, place.short_description
        ),
        url: format!("{}/?{query}", trim_base(base_url)),
    }
}

pub fn maps_search_url(place: &Place) -> String {
    let query = format!("{} {} Huelva", place.title, place.location);
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{MAPS_SEARCH_URL}{encoded}")
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use hlt_entities::builders::*;

    fn params(view: Option<&str>, id: Option<&str>, place_id: Option<&str>) -> RouteParams {
        RouteParams {
            view: view.map(Into::into),
            id: id.map(Into::into),
            place_id: place_id.map(Into::into),
        }
    }

    fn db() -> MockDb {
        let db = MockDb::default();
        db.posts
            .borrow_mut()
            .push(BlogPost::build().id("7").slug("guia-rocio").finish());
        db.catalog_places
            .borrow_mut()
            .push(Place::build().id("s-1").finish());
        db
    }

    #[test]
    fn parse_views() {
        assert_eq!(Ok(View::Home), "home".parse());
        assert_eq!(Ok(View::PostDetail), "post_detail".parse());
        assert_eq!(
            Ok(View::Category(CategoryId::Playas)),
            "playas".parse::<View>()
        );
        assert!("foo".parse::<View>().is_err());
        assert_eq!("monumentos_naturales", View::Category(CategoryId::MonumentosNaturales).to_string());
    }

    #[test]
    fn resolve_default_and_unknown_views() {
        let db = db();
        let route = resolve_route(&db, &RouteParams::default()).unwrap();
        assert_eq!(View::Home, route.view);
        let route = resolve_route(&db, &params(Some("nowhere"), None, None)).unwrap();
        assert_eq!(View::Home, route.view);
        let route = resolve_route(&db, &params(Some("senderismo"), None, None)).unwrap();
        assert_eq!(View::Category(CategoryId::Senderismo), route.view);
    }

    #[test]
    fn resolve_post_detail() {
        let db = db();
        let route = resolve_route(&db, &params(Some("post_detail"), Some("guia-rocio"), None)).unwrap();
        assert_eq!(View::PostDetail, route.view);
        assert_eq!("7", route.post.unwrap().id.as_str());

        let route = resolve_route(&db, &params(Some("post_detail"), Some("7"), None)).unwrap();
        assert!(route.post.is_some());

        let route = resolve_route(&db, &params(Some("post_detail"), Some("x"), None)).unwrap();
        assert_eq!(View::Blog, route.view);
        assert!(route.post.is_none());

        let route = resolve_route(&db, &params(Some("post_detail"), None, None)).unwrap();
        assert_eq!(View::PostDetail, route.view);
        assert!(route.post.is_none());
    }

    #[test]
    fn resolve_deep_linked_place() {
        let db = db();
        let route = resolve_route(&db, &params(Some("blog"), None, Some("s-1"))).unwrap();
        assert_eq!(View::Blog, route.view);
        assert_eq!("s-1", route.place.unwrap().id.as_str());
        let route = resolve_route(&db, &params(None, None, Some("unknown"))).unwrap();
        assert!(route.place.is_none());
    }

    #[test]
    fn build_query_strings() {
        assert_eq!("", Route::query_string(View::Home, None));
        assert_eq!("view=blog", Route::query_string(View::Blog, None));
        assert_eq!(
            "view=post_detail&id=guia-rocio",
            Route::query_string(View::PostDetail, Some("guia-rocio"))
        );
        let p = params(Some("playas"), None, Some("s-1"));
        assert_eq!("view=playas&placeId=s-1", p.query_string());
        assert_eq!("view=playas", close_place(&p).query_string());
        assert_eq!(Some("playas".to_string()), close_place(&p).view);
    }

    #[test]
    fn share_links() {
        let post = BlogPost::build()
            .slug("guia-rocio")
            .title("Guía")
            .excerpt("Todo sobre El Rocío")
            .finish();
        let link = post_share_link("https://huelvalate.es/", &post);
        assert_eq!("https://huelvalate.es/?view=post_detail&id=guia-rocio", link.url);
        assert_eq!("Guía", link.title);
        assert_eq!("Todo sobre El Rocío", link.text);

        let place = Place::build()
            .id("s-1")
            .title("Peña de Arias Montano")
            .location("Alájar")
            .short_description("Mirador")
            .finish();
        let link = place_share_link("https://huelvalate.es", &place);
        assert_eq!("https://huelvalate.es/?placeId=s-1", link.url);
        assert_eq!(
            "¡Mira este plan en HuelvaLate!\n\nPeña de Arias Montano (Alájar)\nMirador",
            link.text
        );
    }

    #[test]
    fn maps_url() {
        let place = Place::build().title("Castillo").location("Niebla").finish();
        assert_eq!(
            "https://www.google.com/maps/search/?api=1&query=Castillo+Niebla+Huelva",
            maps_search_url(&place)
        );
    }
}
