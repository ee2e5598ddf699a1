//! Response helpers shared by the handlers

use actix_web::HttpResponse;
use actix_web::http::{StatusCode, header};
use serde::Serialize;

use crate::errors::ShortlyError;

use super::error_code::ErrorCode;

/// JSON body for error responses
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

pub fn error_response(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((header::CONTENT_TYPE, "application/json; charset=utf-8"))
        .json(ApiError {
            code,
            message: message.into(),
        })
}

/// Map a `ShortlyError` to its HTTP status and error code
pub fn error_from_shortly(err: &ShortlyError) -> HttpResponse {
    error_response(err.http_status(), ErrorCode::from(err), err.message())
}

/// 302 to `location`
pub fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// 302 to the login page
pub fn login_redirect() -> HttpResponse {
    redirect_to("/login")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_rt::test]
    async fn test_error_from_shortly() {
        let resp = error_from_shortly(&ShortlyError::validation("URL cannot be empty"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], 3002);
        assert_eq!(json["message"], "URL cannot be empty");
    }

    #[test]
    fn test_redirect_to() {
        let resp = redirect_to("/signup");
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/signup");
    }
}
