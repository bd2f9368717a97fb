//! Page handlers.
//!
//! ```text
//! GET  /                  landing page
//! GET  /share/{username}  shareable summary, 404 when unavailable
//! GET  /compute           empty form
//! POST /compute           results, or the form with an inline error
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, post, web};
use maud::Markup;
use serde::Deserialize;

use crate::domain::{Error, USER_NOT_FOUND_MESSAGE, Username};
use crate::inbound::http::error::PageResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{assets, cache_control, views};

/// Inline error for a blank form submission.
pub const BLANK_USERNAME_MESSAGE: &str = "Enter a GitHub username";

/// Form body posted to `/compute`.
#[derive(Debug, Deserialize)]
pub struct ComputeForm {
    #[serde(default)]
    username: String,
}

/// Register the page routes and the stylesheet.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(landing)
        .service(share)
        .service(compute_form)
        .service(compute)
        .service(assets::stylesheet);
}

#[get("/")]
pub async fn landing() -> Markup {
    views::landing()
}

/// Render the share page for `username`.
///
/// Every lookup failure, and a blank path segment, answers 404 with the
/// generic "User not found" page.
#[get("/share/{username}")]
pub async fn share(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    let username =
        Username::new(path.into_inner()).map_err(|_| Error::not_found(USER_NOT_FOUND_MESSAGE))?;
    let summary = state.profiles.summarise(&username).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .insert_header(cache_control::header(cache_control::SHARE_PAGE))
        .body(views::share(&username, &summary).into_string()))
}

#[get("/compute")]
pub async fn compute_form() -> Markup {
    views::compute_form(None, None)
}

/// Handle a compute submission.
///
/// Failures stay on the form with a 200 status so the visitor can retry.
#[post("/compute")]
pub async fn compute(state: web::Data<HttpState>, form: web::Form<ComputeForm>) -> Markup {
    let raw = form.into_inner().username;
    let Ok(username) = Username::new(&raw) else {
        return views::compute_form(None, Some(BLANK_USERNAME_MESSAGE));
    };
    match state.profiles.summarise(&username).await {
        Ok(summary) => views::compute_results(&username, &summary),
        Err(_) => views::compute_form(Some(username.as_str()), Some(USER_NOT_FOUND_MESSAGE)),
    }
}
