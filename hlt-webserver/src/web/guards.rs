use std::sync::Arc;

use rocket::{
    self,
    http::{Cookie, SameSite, Status},
    request::{FromRequest, Outcome, Request},
    State,
};

use crate::core::{entities::Id, gateways::ai::AiGateway, usecases::QuotaBreaker};

pub const COOKIE_ADMIN_KEY: &str = "huelvalate_admin_session";
pub const COOKIE_VISITOR_KEY: &str = "huelvalate_visitor";

/// An authenticated administrator.
#[derive(Debug)]
pub struct Admin(String);

impl Admin {
    pub fn username(&self) -> &str {
        &self.0
    }
}

fn admin_from_cookie(request: &Request) -> Option<String> {
    request
        .cookies()
        .get_private(COOKIE_ADMIN_KEY)
        .map(|cookie| cookie.value().to_string())
        .filter(|username| !username.is_empty())
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Admin {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match admin_from_cookie(request) {
            Some(username) => Outcome::Success(Admin(username)),
            None => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}

/// Whether the request has been sent by an administrator.
///
/// Unlike [`Admin`] this guard never fails.
#[derive(Debug, Clone, Copy)]
pub struct AdminMode(pub bool);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminMode {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(AdminMode(admin_from_cookie(request).is_some()))
    }
}

/// Anonymous visitor that is recognized by a private cookie.
#[derive(Debug)]
pub struct Visitor(pub Id);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Visitor {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let cookies = request.cookies();
        if let Some(id) = cookies
            .get_private(COOKIE_VISITOR_KEY)
            .map(|cookie| Id::from(cookie.value()))
            .filter(Id::is_valid)
        {
            return Outcome::Success(Visitor(id));
        }
        let id = Id::new();
        debug!("New visitor {id}");
        cookies.add_private(
            Cookie::build((COOKIE_VISITOR_KEY, id.to_string()))
                .same_site(SameSite::Lax)
                .permanent(),
        );
        Outcome::Success(Visitor(id))
    }
}

/// The AI gateway together with its quota breaker.
#[derive(Clone)]
pub struct Ai {
    pub gateway: Arc<dyn AiGateway + Send + Sync>,
    pub breaker: Arc<QuotaBreaker>,
}

impl Ai {
    pub fn new(gateway: Arc<dyn AiGateway + Send + Sync>) -> Self {
        Self {
            gateway,
            breaker: Arc::new(QuotaBreaker::new()),
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Ai {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        request
            .guard::<&State<Ai>>()
            .await
            .map(|ai| ai.inner().clone())
    }
}

pub struct Version(pub &'static str);
