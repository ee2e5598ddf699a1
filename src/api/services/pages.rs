//! Embedded HTML pages

use actix_web::HttpResponse;
use rust_embed::Embed;
use tracing::{error, trace};

use crate::api::middleware::AuthContext;

use super::helpers::login_redirect;

#[derive(Embed)]
#[folder = "assets/"]
struct PageAssets;

fn serve_page(name: &str) -> HttpResponse {
    match PageAssets::get(name) {
        Some(content) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(content.data.into_owned()),
        None => {
            error!("Embedded page {} is missing", name);
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// `GET /` and `GET /create`
pub async fn index(auth: AuthContext) -> HttpResponse {
    if !auth.is_permitted() {
        return login_redirect();
    }
    trace!("Serving index page");
    serve_page("index.html")
}

pub async fn login_page() -> HttpResponse {
    serve_page("login.html")
}

pub async fn signup_page() -> HttpResponse {
    serve_page("signup.html")
}
