//! Catch-all short code redirect

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use tracing::{debug, error};

use crate::errors::ShortlyError;
use crate::services::RedirectResolver;

use super::helpers::{error_from_shortly, redirect_to};

/// `GET /{code}`: record the visit, then 302 to the stored url.
/// Unknown codes go back to `/`.
pub async fn follow_code(
    path: web::Path<String>,
    resolver: web::Data<Arc<RedirectResolver>>,
) -> HttpResponse {
    let code = path.into_inner();

    match resolver.resolve(&code).await {
        Ok(target) => {
            debug!("Redirecting {} -> {} (visits={})", code, target.url, target.visits);
            redirect_to(&target.url)
        }
        Err(ShortlyError::NotFound(_)) => {
            debug!("Unknown short code {}", code);
            redirect_to("/")
        }
        Err(e) => {
            error!("Failed to record visit for {}: {}", code, e);
            error_from_shortly(&e)
        }
    }
}
