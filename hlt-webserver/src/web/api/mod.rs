use std::{fmt::Display, result};

use hlt_boundary::Error as JsonErrorResponse;
use rocket::serde::json::{Error as JsonError, Json};
use rocket::{
    self, delete, get,
    http::{ContentType, Cookie, CookieJar, SameSite, Status},
    post, put,
    response::{self, Responder},
    routes, Route, State,
};

use super::{guards::*, jfs, Cfg};
use crate::{
    adapters::json::{self, from_json, to_json},
    core::{prelude::*, usecases},
};

mod admin;
mod assistant;
mod browse;
mod error;
mod favorites;
mod navigation;
mod places;
mod posts;
mod util;

pub use self::error::Error as ApiError;
use self::error::{ParameterError, RepoError};

#[cfg(test)]
pub mod tests;

type Result<T> = result::Result<Json<T>, ApiError>;
type JsonResult<'a, T> = result::Result<Json<T>, JsonError<'a>>;
type StatusResult = result::Result<Status, ApiError>;

pub fn routes() -> Vec<Route> {
    routes![
        // ---   browse   --- //
        browse::get_home,
        browse::get_categories,
        browse::get_category,
        // ---   places   --- //
        places::get_place,
        places::get_place_image,
        places::get_place_details,
        places::post_directions,
        // ---   posts   --- //
        posts::get_posts,
        posts::get_post,
        // ---   navigation   --- //
        navigation::get_route,
        navigation::get_search,
        // ---   assistant   --- //
        assistant::post_chat,
        // ---   favorites   --- //
        favorites::get_favorites,
        favorites::post_favorite,
        favorites::get_guide,
        // ---   admin   --- //
        admin::post_login,
        admin::post_logout,
        admin::get_session,
        admin::put_image_override,
        admin::delete_image_override,
        admin::put_text_override,
        admin::post_place,
        admin::delete_place,
        admin::post_regenerate_image,
        admin::get_report,
        admin::get_report_csv,
        admin::delete_changes,
        // ---   util   --- //
        util::get_version,
    ]
}

/// Run a use case that might wait for the AI service
/// on the blocking thread pool.
async fn blocking<T, F>(f: F) -> result::Result<T, ApiError>
where
    F: FnOnce() -> result::Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    rocket::tokio::task::spawn_blocking(f).await?
}

fn json_error_response<'r, 'o: 'r, E: Display>(
    req: &'r rocket::Request<'_>,
    err: &E,
    status: Status,
) -> response::Result<'o> {
    let message = err.to_string();
    let boundary_error = JsonErrorResponse {
        http_status: status.code,
        message,
    };
    Json(boundary_error).respond_to(req).map(|mut res| {
        res.set_status(status);
        res
    })
}
