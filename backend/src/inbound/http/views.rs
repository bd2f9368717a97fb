//! HTML views rendered with maud.
//!
//! Every interpolated value passes through maud's escaping, so logins and
//! URLs from upstream can never inject markup.

use actix_web::http::StatusCode;
use maud::{DOCTYPE, Markup, html};
use url::Url;

use crate::domain::{ProfileSummary, Username};

const SITE_NAME: &str = "Contributions Card";
const STYLESHEET_PATH: &str = "/static/style.css";
// Only the path of this base is ever rendered.
const LINK_BASE: &str = "http://localhost/";

/// Permalink path for `username`, with the login percent-encoded as a single
/// path segment.
#[must_use]
pub fn share_path(username: &Username) -> String {
    let Ok(mut url) = Url::parse(LINK_BASE) else {
        return format!("/share/{username}");
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push("share").push(username.as_str());
    }
    url.path().to_owned()
}

fn layout(title: &str, head: Option<Markup>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · " (SITE_NAME) }
                link rel="stylesheet" href=(STYLESHEET_PATH);
                @if let Some(head) = head {
                    (head)
                }
            }
            body {
                header {
                    a .brand href="/" { (SITE_NAME) }
                }
                main { (body) }
            }
        }
    }
}

fn summary_card(username: &Username, summary: &ProfileSummary) -> Markup {
    html! {
        article .card {
            img .avatar src=(summary.avatar_url().as_str()) alt={ (username) "'s avatar" }
                width="96" height="96";
            h2 .login { (username) }
            dl .stats {
                dt { "Contributions" }
                dd .contributions { (summary.contribution_count()) }
                dt { "Repositories" }
                dd .repositories { (summary.repository_count()) }
            }
        }
    }
}

/// Landing page with a link to the compute form.
#[must_use]
pub fn landing() -> Markup {
    layout(
        "Welcome",
        None,
        html! {
            section .hero {
                h1 { "How much did you ship this year?" }
                p { "Enter a GitHub username to see a contributions summary you can share." }
                a .button href="/compute" { "Get your card" }
            }
        },
    )
}

/// Compute form, optionally pre-filled and with an inline error.
#[must_use]
pub fn compute_form(username: Option<&str>, error: Option<&str>) -> Markup {
    layout(
        "Compute",
        None,
        html! {
            form .compute method="post" action="/compute" {
                label for="username" { "GitHub username" }
                input #username type="text" name="username" value=(username.unwrap_or_default())
                    autocomplete="off" required;
                button type="submit" { "Compute" }
            }
            @if let Some(error) = error {
                p .error role="alert" { (error) }
            }
        },
    )
}

/// Results page shown after a successful compute.
#[must_use]
pub fn compute_results(username: &Username, summary: &ProfileSummary) -> Markup {
    let permalink = share_path(username);
    layout(
        "Results",
        None,
        html! {
            (summary_card(username, summary))
            p .share {
                "Share it: "
                a href=(permalink) { (permalink) }
            }
            a .button href="/compute" { "Try another username" }
        },
    )
}

/// Permalink page for one user's summary.
#[must_use]
pub fn share(username: &Username, summary: &ProfileSummary) -> Markup {
    let title = format!("{username}'s contributions");
    let description = format!(
        "{} contributions across {} repositories",
        summary.contribution_count(),
        summary.repository_count()
    );
    let head = html! {
        meta property="og:title" content=(title);
        meta property="og:description" content=(description);
        meta property="og:image" content=(summary.avatar_url().as_str());
    };
    layout(
        &title,
        Some(head),
        html! {
            (summary_card(username, summary))
            a .button href="/compute" { "Make your own" }
        },
    )
}

/// Generic error page.
#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let reason = status.canonical_reason().unwrap_or("Error");
    layout(
        reason,
        None,
        html! {
            section .error-page {
                h1 { (status.as_u16()) " " (reason) }
                p { (message) }
                a href="/" { "Back to the start" }
            }
        },
    )
}
