//! `/links` API

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{error, info};

use crate::api::middleware::AuthContext;
use crate::errors::ShortlyError;
use crate::services::LinkService;

use super::helpers::{error_from_shortly, login_redirect};

#[derive(Debug, Deserialize)]
pub struct NewLinkPayload {
    #[serde(default)]
    pub url: String,
}

/// `GET /links`: every link, ordered by id
pub async fn list_links(auth: AuthContext, links: web::Data<Arc<LinkService>>) -> HttpResponse {
    if !auth.is_permitted() {
        return login_redirect();
    }

    match links.list().await {
        Ok(all) => HttpResponse::Ok().json(all),
        Err(e) => {
            error!("Failed to list links: {}", e);
            error_from_shortly(&e)
        }
    }
}

/// `POST /links` with a JSON or form body `{url}`.
///
/// A missing or unreadable body is treated like an empty url.
pub async fn create_link(
    auth: AuthContext,
    links: web::Data<Arc<LinkService>>,
    payload: Option<web::Either<web::Json<NewLinkPayload>, web::Form<NewLinkPayload>>>,
) -> HttpResponse {
    if !auth.is_permitted() {
        return login_redirect();
    }

    let url = match payload {
        Some(web::Either::Left(json)) => json.into_inner().url,
        Some(web::Either::Right(form)) => form.into_inner().url,
        None => String::new(),
    };

    match links.shorten(&url).await {
        Ok(link) => HttpResponse::Ok().json(link),
        Err(e @ (ShortlyError::Validation(_) | ShortlyError::TitleFetch(_))) => {
            info!("Rejected link submission: {}", e);
            error_from_shortly(&e)
        }
        Err(e) => {
            error!("Failed to create link: {}", e);
            error_from_shortly(&e)
        }
    }
}
