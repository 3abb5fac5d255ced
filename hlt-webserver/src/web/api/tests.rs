use super::*;

pub mod prelude {

    use crate::web::{self, api, jfs};

    pub use crate::web::tests::prelude::{LocalResponse as Response, *};

    pub fn setup() -> (Client, jfs::Connections) {
        web::tests::setup(vec![("/", api::routes())])
    }

    pub fn setup_with_exhausted_quota() -> (Client, jfs::Connections) {
        let ai = DummyAi {
            quota_exhausted: true,
        };
        web::tests::setup_with_ai(vec![("/", api::routes())], ai)
    }

    pub fn test_json(r: &Response) {
        assert_eq!(
            r.headers().get("Content-Type").collect::<Vec<_>>()[0],
            "application/json"
        );
    }

    pub fn login(client: &Client) {
        let res = client
            .post("/login")
            .header(ContentType::JSON)
            .body(format!(
                r#"{{"username":"{ADMIN_USERNAME}","password":"{ADMIN_PASSWORD}"}}"#
            ))
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
    }
}

use self::prelude::*;

fn json_body<T: serde::de::DeserializeOwned>(res: Response) -> T {
    serde_json::from_str(&res.into_string().unwrap()).unwrap()
}

#[test]
fn get_version() {
    let (client, _) = setup();
    let res = client.get("/version").dispatch();
    assert_eq!(res.status(), Status::Ok);
    assert_eq!(res.into_string().unwrap(), DUMMY_VERSION);
}

#[test]
fn get_home() {
    let (client, _) = setup();
    let res = client.get("/home").dispatch();
    assert_eq!(res.status(), Status::Ok);
    test_json(&res);
    let home: json::Home = json_body(res);
    assert_eq!(home.categories.len(), 6);
    assert_eq!(home.featured_posts.len(), 3);
    assert!(home.markers.iter().all(|p| p.coordinates.is_some()));
}

#[test]
fn browse_a_category_page_by_page() {
    let (client, _) = setup();
    let res = client.get("/categories/playas").dispatch();
    assert_eq!(res.status(), Status::Ok);
    let page: json::CategoryPage = json_body(res);
    assert_eq!(page.category.title, "Costa de la Luz");
    assert_eq!(page.places.len(), 6);
    assert_eq!(page.total, 11);
    assert!(page.has_more);

    let res = client.get("/categories/playas?page=2").dispatch();
    let page: json::CategoryPage = json_body(res);
    assert_eq!(page.places.len(), 11);
    assert!(!page.has_more);
}

#[test]
fn unknown_category_is_not_found() {
    let (client, _) = setup();
    let res = client.get("/categories/museos").dispatch();
    assert_eq!(res.status(), Status::NotFound);
    test_json(&res);
    let err: json::Error = json_body(res);
    assert_eq!(err.http_status, 404);
}

#[test]
fn get_a_place_with_share_link() {
    let (client, _) = setup();
    let res = client.get("/places/p-7").dispatch();
    assert_eq!(res.status(), Status::Ok);
    let detail: json::PlaceDetail = json_body(res);
    assert_eq!(detail.place.title, "Playa del Espigón");
    assert_eq!(detail.share.url, "https://huelvalate.es/?placeId=p-7");
    assert!(detail
        .maps_url
        .starts_with("https://www.google.com/maps/search/?api=1&query=Playa+del+Espig"));

    let res = client.get("/places/does-not-exist").dispatch();
    assert_eq!(res.status(), Status::NotFound);
}

#[test]
fn resolve_place_images() {
    let (client, db) = setup();
    let res = client.get("/places/p-7/image").dispatch();
    let image: json::ImageResolution = json_body(res);
    assert_eq!(image.source, json::ImageSource::Static);

    db.exclusive()
        .replace_image_overrides(&[("p-7".to_string(), "https://x.es/a.jpg".to_string())].into())
        .unwrap();
    let res = client.get("/places/p-7/image").dispatch();
    let image: json::ImageResolution = json_body(res);
    assert_eq!(image.source, json::ImageSource::Override);
    assert_eq!(image.src, "https://x.es/a.jpg");
}

#[test]
fn generate_place_details() {
    let (client, db) = setup();
    let res = client.get("/places/p-7/details").dispatch();
    assert_eq!(res.status(), Status::Ok);
    let text: json::PlaceText = json_body(res);
    assert_eq!(text.source, json::TextSource::Generated);
    assert!(text.text.contains("Playa del Espigón"));
    // Only administrators persist generated texts
    assert!(db.shared().text_overrides().unwrap().is_empty());
}

#[test]
fn resting_details_after_quota_has_been_exhausted() {
    let (client, _) = setup_with_exhausted_quota();
    let res = client.get("/places/p-7/details").dispatch();
    let text: json::PlaceText = json_body(res);
    assert_eq!(text.source, json::TextSource::Fallback);
    assert_eq!(text.text, usecases::DETAILS_RESTING);
    let res = client
        .post("/assistant/chat")
        .header(ContentType::JSON)
        .body(r#"{"message":"Hola"}"#)
        .dispatch();
    let reply: json::ChatReply = json_body(res);
    assert_eq!(reply.reply, usecases::CHAT_RESTING);
}

#[test]
fn get_directions() {
    let (client, _) = setup();
    let res = client
        .post("/places/p-7/directions")
        .header(ContentType::JSON)
        .body(r#"{"lat":37.26,"lng":-6.95}"#)
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    let directions: json::Directions = json_body(res);
    assert!(directions.text.contains("Playa del Espigón"));
    assert_eq!(directions.grounding_chunks.len(), 1);
    assert_eq!(
        directions.grounding_chunks[0]["maps"]["title"],
        "Playa del Espigón"
    );
    assert!(!directions.maps_url.is_empty());

    let res = client
        .post("/places/p-7/directions")
        .header(ContentType::JSON)
        .body(r#"{"lat":137.26,"lng":-6.95}"#)
        .dispatch();
    assert_eq!(res.status(), Status::BadRequest);
}

#[test]
fn get_a_post_by_slug_or_id() {
    let (client, _) = setup();
    let res = client.get("/posts").dispatch();
    let posts: Vec<json::BlogPost> = json_body(res);
    assert_eq!(posts.len(), 10);

    let res = client.get("/posts/legado-britanico").dispatch();
    assert_eq!(res.status(), Status::Ok);
    let detail: json::PostDetail = json_body(res);
    assert_eq!(detail.post.id, "blog-5");
    assert_eq!(
        detail.share.url,
        "https://huelvalate.es/?view=post_detail&id=legado-britanico"
    );

    let res = client.get("/posts/blog-5").dispatch();
    assert_eq!(res.status(), Status::Ok);
    let res = client.get("/posts/unknown").dispatch();
    assert_eq!(res.status(), Status::NotFound);
}

#[test]
fn resolve_deep_links() {
    let (client, _) = setup();
    let res = client
        .get("/route?view=post_detail&id=legado-britanico&placeId=p-7")
        .dispatch();
    let route: json::Route = json_body(res);
    assert_eq!(route.view, "post_detail");
    assert_eq!(route.post.unwrap().id, "blog-5");
    assert_eq!(route.place.unwrap().id, "p-7");
    assert_eq!(route.query, "view=post_detail&id=legado-britanico&placeId=p-7");

    let res = client.get("/route?view=post_detail&id=missing").dispatch();
    let route: json::Route = json_body(res);
    assert_eq!(route.view, "blog");
    assert_eq!(route.query, "view=blog");

    let res = client.get("/route?view=unknown").dispatch();
    let route: json::Route = json_body(res);
    assert_eq!(route.view, "home");
    assert_eq!(route.query, "");
}

#[test]
fn search_nearby_places() {
    let (client, _) = setup();
    let res = client
        .get("/search?q=playas%20cerca&lat=37.26&lng=-6.95")
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    let outcome: json::SearchResponse = json_body(res);
    assert_eq!(outcome.mode, json::SearchMode::Nearby);
    assert!(!outcome.results.is_empty());
    assert!(outcome.results.iter().all(|hit| hit.distance_km.is_some()));

    let res = client.get("/search").dispatch();
    let outcome: json::SearchResponse = json_body(res);
    assert_eq!(outcome.mode, json::SearchMode::Empty);
}

#[test]
fn search_with_ai_ranking() {
    let (client, _) = setup();
    let res = client.get("/search?q=castillos").dispatch();
    let outcome: json::SearchResponse = json_body(res);
    assert_eq!(outcome.mode, json::SearchMode::Ai);
    assert_eq!(outcome.results.len(), 2);
}

#[test]
fn chat_with_the_assistant() {
    let (client, _) = setup();
    let res = client
        .post("/assistant/chat")
        .header(ContentType::JSON)
        .body(r#"{"history":[{"role":"user","text":"Hola"},{"role":"model","text":"¡Hola!"}],"message":"¿Qué comer?"}"#)
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    let reply: json::ChatReply = json_body(res);
    assert_eq!(reply.reply, "Tartessos responde: ¿Qué comer?");

    let res = client
        .post("/assistant/chat")
        .header(ContentType::JSON)
        .body(r#"{"message":"  "}"#)
        .dispatch();
    assert_eq!(res.status(), Status::BadRequest);
}

#[test]
fn toggle_favorites_of_a_visitor() {
    let (client, _) = setup();
    let res = client.get("/favorites").dispatch();
    let ids: Vec<String> = json_body(res);
    assert!(ids.is_empty());

    let res = client.post("/favorites/p-7").dispatch();
    let state: json::FavoriteState = json_body(res);
    assert!(state.favorite);
    client.post("/favorites/blog-5").dispatch();

    let res = client.get("/favorites").dispatch();
    let ids: Vec<String> = json_body(res);
    assert_eq!(ids, vec!["p-7", "blog-5"]);

    let res = client.get("/guide").dispatch();
    let guide: json::Guide = json_body(res);
    assert_eq!(guide.places.len(), 1);
    assert_eq!(guide.posts.len(), 1);

    let res = client.post("/favorites/p-7").dispatch();
    let state: json::FavoriteState = json_body(res);
    assert!(!state.favorite);
}

#[test]
fn admin_routes_require_login() {
    let (client, _) = setup();
    let res = client.get("/admin/report").dispatch();
    assert_eq!(res.status(), Status::Unauthorized);
    let res = client.get("/admin/session").dispatch();
    let session: json::AdminSession = json_body(res);
    assert!(!session.admin);

    let res = client
        .post("/login")
        .header(ContentType::JSON)
        .body(r#"{"username":"admin","password":"wrong-password"}"#)
        .dispatch();
    assert_eq!(res.status(), Status::Unauthorized);
    test_json(&res);

    login(&client);
    let res = client.get("/admin/session").dispatch();
    let session: json::AdminSession = json_body(res);
    assert!(session.admin);

    client.post("/logout").dispatch();
    let res = client.get("/admin/report").dispatch();
    assert_eq!(res.status(), Status::Unauthorized);
}

#[test]
fn override_images_and_texts() {
    let (client, db) = setup();
    login(&client);
    let res = client
        .put("/admin/overrides/images/p-7")
        .header(ContentType::JSON)
        .body(r#"{"url":"https://x.es/b.jpg"}"#)
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    assert_eq!(
        db.shared().get_image_override("p-7").unwrap().as_deref(),
        Some("https://x.es/b.jpg")
    );

    let res = client
        .put("/admin/overrides/images/p-7")
        .header(ContentType::JSON)
        .body(r#"{"url":"not a url"}"#)
        .dispatch();
    assert_eq!(res.status(), Status::BadRequest);

    let res = client.delete("/admin/overrides/images/p-7").dispatch();
    assert_eq!(res.status(), Status::Ok);
    assert!(db.shared().get_image_override("p-7").unwrap().is_none());

    client
        .put("/admin/overrides/texts/p-7")
        .header(ContentType::JSON)
        .body(r#"{"text":"Texto corregido"}"#)
        .dispatch();
    let res = client.get("/places/p-7/details").dispatch();
    let text: json::PlaceText = json_body(res);
    assert_eq!(text.source, json::TextSource::Override);
    assert_eq!(text.text, "Texto corregido");
}

#[test]
fn add_and_remove_places() {
    let (client, _) = setup();
    login(&client);
    let new_place = r#"{
        "id": "new-1",
        "category_id": "agenda",
        "title": "Noche de San Juan",
        "location": "Punta Umbría",
        "short_description": "Hogueras en la playa",
        "date": "23 de Junio",
        "lat": 37.18,
        "lng": -6.96
    }"#;
    let res = client
        .post("/admin/places")
        .header(ContentType::JSON)
        .body(new_place)
        .dispatch();
    assert_eq!(res.status(), Status::Ok);
    let place: json::Place = json_body(res);
    assert_eq!(place.id, "new-1");
    assert_eq!(place.category_id, "agenda");

    let res = client
        .post("/admin/places")
        .header(ContentType::JSON)
        .body(new_place)
        .dispatch();
    assert_eq!(res.status(), Status::Conflict);

    let res = client.get("/places/new-1").dispatch();
    assert_eq!(res.status(), Status::Ok);

    let res = client.delete("/admin/places/p-7").dispatch();
    assert_eq!(res.status(), Status::NotFound);
    let res = client.delete("/admin/places/new-1").dispatch();
    assert_eq!(res.status(), Status::NoContent);
    let res = client.get("/places/new-1").dispatch();
    assert_eq!(res.status(), Status::NotFound);
}

#[test]
fn reject_invalid_new_places() {
    let (client, _) = setup();
    login(&client);
    let res = client
        .post("/admin/places")
        .header(ContentType::JSON)
        .body(r#"{"category_id":"museos","title":"X","location":"Y","short_description":"Z"}"#)
        .dispatch();
    assert_eq!(res.status(), Status::BadRequest);
    let res = client
        .post("/admin/places")
        .header(ContentType::JSON)
        .body(r#"{"category_id":"agenda","title":" ","location":"Y","short_description":"Z"}"#)
        .dispatch();
    assert_eq!(res.status(), Status::BadRequest);
}

#[test]
fn regenerate_an_image() {
    let (client, db) = setup();
    login(&client);
    let res = client.post("/admin/places/p-7/image/regenerate").dispatch();
    assert_eq!(res.status(), Status::Ok);
    let image: json::ImageResolution = json_body(res);
    assert_eq!(image.source, json::ImageSource::Generated);
    assert_eq!(
        db.shared().get_image_override("p-7").unwrap().as_deref(),
        Some("data:image/png;base64,AAAA")
    );
}

#[test]
fn export_reports() {
    let (client, _) = setup();
    login(&client);
    client
        .put("/admin/overrides/texts/p-7")
        .header(ContentType::JSON)
        .body(r#"{"text":"Arena fina"}"#)
        .dispatch();

    let res = client.get("/admin/report").dispatch();
    assert_eq!(res.status(), Status::Ok);
    test_json(&res);
    let report: serde_json::Value = json_body(res);
    let places = report.as_array().unwrap();
    assert_eq!(places.len(), 79);
    let p7 = places.iter().find(|p| p["id"] == "p-7").unwrap();
    assert_eq!(p7["fullDescription"], "Arena fina");
    assert_eq!(p7["rating"], usecases::DEFAULT_RATING);

    let res = client.get("/admin/report.csv").dispatch();
    assert_eq!(res.status(), Status::Ok);
    let csv = res.into_string().unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("id,category,title"));
    assert_eq!(lines.count(), 79);
}

#[test]
fn discard_all_changes() {
    let (client, db) = setup();
    login(&client);
    client
        .put("/admin/overrides/texts/p-7")
        .header(ContentType::JSON)
        .body(r#"{"text":"Arena fina"}"#)
        .dispatch();
    let res = client.delete("/admin/changes").dispatch();
    assert_eq!(res.status(), Status::NoContent);
    assert!(db.shared().text_overrides().unwrap().is_empty());
}
