//! HTTP API tests
//!
//! Full app (routes, session extractor, request-id middleware) over a real
//! SQLite database with a stub title fetcher.

mod common;

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, dev::ServiceResponse};
use async_trait::async_trait;
use serde_json::{Value, json};

use shortly::api::middleware::RequestIdMiddleware;
use shortly::errors::{Result, ShortlyError};
use shortly::services::RedirectResolver;
use shortly::storage::{Click, Link, LinkStore, SeaOrmStorage};

use common::create_services;

macro_rules! init_app {
    ($services:expr) => {{
        let services = $services.clone();
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .configure(move |cfg| services.configure(cfg)),
        )
        .await
    }};
}

fn location<B>(resp: &ServiceResponse<B>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "shortly_session")
        .map(|c| c.into_owned())
}

// =============================================================================
// Links
// =============================================================================

#[actix_rt::test]
async fn test_create_link_is_idempotent() {
    let (services, _storage, _dir) = create_services(false).await;
    let app = init_app!(services);

    let req = TestRequest::post()
        .uri("/links")
        .set_json(json!({"url": "http://www.github.com/"}))
        .to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;

    assert!(first["code"].is_string());
    assert_eq!(first["url"], "http://www.github.com/");
    assert_eq!(first["title"], "Title of http://www.github.com/");
    assert_eq!(first["visits"], 0);

    let req = TestRequest::post()
        .uri("/links")
        .set_json(json!({"url": "http://www.github.com/"}))
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(first["code"], second["code"]);
    assert_eq!(first["id"], second["id"]);
}

#[actix_rt::test]
async fn test_create_link_accepts_form_body() {
    let (services, storage, _dir) = create_services(false).await;
    let app = init_app!(services);

    let req = TestRequest::post()
        .uri("/links")
        .set_form([("url", "https://example.com/form")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        storage
            .find_by_url("https://example.com/form")
            .await
            .unwrap()
            .is_some()
    );
}

#[actix_rt::test]
async fn test_invalid_url_is_404() {
    let (services, storage, _dir) = create_services(false).await;
    let app = init_app!(services);

    let req = TestRequest::post()
        .uri("/links")
        .set_json(json!({"url": "definitely not a valid url"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3002);
    assert!(storage.list_links().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_title_failure_is_404_and_persists_nothing() {
    let (services, storage, _dir) = create_services(false).await;
    let app = init_app!(services);

    let req = TestRequest::post()
        .uri("/links")
        .set_json(json!({"url": "https://unreachable.example/"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3003);
    assert!(storage.list_links().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_list_links_returns_all_in_order() {
    let (services, storage, _dir) = create_services(false).await;
    storage
        .create("https://a.example/", None, "first")
        .await
        .unwrap();
    storage
        .create("https://b.example/", None, "second")
        .await
        .unwrap();
    let app = init_app!(services);

    let req = TestRequest::get().uri("/links").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, ["first", "second"]);
}

// =============================================================================
// Redirects
// =============================================================================

#[actix_rt::test]
async fn test_redirect_counts_visit() {
    let (services, storage, _dir) = create_services(false).await;
    storage
        .create("https://github.com/", Some("GitHub"), "gh2024")
        .await
        .unwrap();
    let app = init_app!(services);

    let req = TestRequest::get().uri("/gh2024").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "https://github.com/");

    let link = storage.find_by_code("gh2024").await.unwrap().unwrap();
    assert_eq!(link.visits, 1);
    assert_eq!(storage.list_clicks(link.id).await.unwrap().len(), 1);
}

/// Real store whose visit writes always fail
struct VisitWriteFails(Arc<SeaOrmStorage>);

#[async_trait]
impl LinkStore for VisitWriteFails {
    async fn find_by_url(&self, url: &str) -> Result<Option<Link>> {
        self.0.find_by_url(url).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>> {
        self.0.find_by_code(code).await
    }

    async fn create(&self, url: &str, title: Option<&str>, code: &str) -> Result<Link> {
        self.0.create(url, title, code).await
    }

    async fn increment_visits(&self, _link: &Link) -> Result<Link> {
        Err(ShortlyError::database_operation("no such table: clicks"))
    }

    async fn list_links(&self) -> Result<Vec<Link>> {
        self.0.list_links().await
    }

    async fn list_clicks(&self, link_id: i64) -> Result<Vec<Click>> {
        self.0.list_clicks(link_id).await
    }
}

#[actix_rt::test]
async fn test_failed_visit_write_is_500_not_redirect() {
    let (mut services, storage, _dir) = create_services(false).await;
    storage
        .create("https://github.com/", None, "gh1")
        .await
        .unwrap();
    services.redirect_resolver = Arc::new(RedirectResolver::new(Arc::new(VisitWriteFails(
        storage.clone(),
    ))));
    let app = init_app!(services);

    let req = TestRequest::get().uri("/gh1").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.headers().get(header::LOCATION).is_none());

    let link = storage.find_by_code("gh1").await.unwrap().unwrap();
    assert_eq!(link.visits, 0);
    assert!(storage.list_clicks(link.id).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_unknown_code_redirects_home() {
    let (services, storage, _dir) = create_services(true).await;
    let app = init_app!(services);

    for uri in ["/nonexistent-code", "/not/a/code", "/x%20y"] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND, "uri {}", uri);
        assert_eq!(location(&resp), "/");
    }

    assert!(storage.list_links().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_redirect_needs_no_session() {
    let (services, storage, _dir) = create_services(true).await;
    storage
        .create("https://github.com/", None, "open")
        .await
        .unwrap();
    let app = init_app!(services);

    let req = TestRequest::get().uri("/open").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), "https://github.com/");
}

// =============================================================================
// Sessions
// =============================================================================

#[actix_rt::test]
async fn test_anonymous_is_sent_to_login() {
    let (services, storage, _dir) = create_services(true).await;
    let app = init_app!(services);

    for uri in ["/", "/create", "/links"] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND, "uri {}", uri);
        assert_eq!(location(&resp), "/login");
    }

    let req = TestRequest::post()
        .uri("/links")
        .set_json(json!({"url": "https://github.com/"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/login");
    assert!(storage.list_links().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_login_pages_are_public() {
    let (services, _storage, _dir) = create_services(true).await;
    let app = init_app!(services);

    for uri in ["/login", "/signup"] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK, "uri {}", uri);
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("text/html"));
    }
}

#[actix_rt::test]
async fn test_signup_login_logout_flow() {
    let (services, _storage, _dir) = create_services(true).await;
    let app = init_app!(services);

    // signup starts a session
    let req = TestRequest::post()
        .uri("/signup")
        .set_form([("username", "Svnh"), ("password", "correct horse")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");
    let cookie = session_cookie(&resp).expect("session cookie");

    let req = TestRequest::get()
        .uri("/links")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // wrong password and unknown user both land on the login page, once
    for (user, pass) in [("Svnh", "wrong"), ("Phillip", "correct horse")] {
        let req = TestRequest::post()
            .uri("/login")
            .set_json(json!({"username": user, "password": pass}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/login");
        assert!(session_cookie(&resp).is_none());
    }

    let req = TestRequest::post()
        .uri("/login")
        .set_form([("username", "Svnh"), ("password", "correct horse")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/");
    let cookie = session_cookie(&resp).expect("session cookie");
    assert!(!cookie.value().is_empty());

    let req = TestRequest::get().uri("/logout").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/login");
    let cleared = session_cookie(&resp).expect("removal cookie");
    assert_eq!(cleared.value(), "");
}

#[actix_rt::test]
async fn test_duplicate_signup_goes_back_to_form() {
    let (services, _storage, _dir) = create_services(true).await;
    let app = init_app!(services);

    for expected in ["/", "/signup"] {
        let req = TestRequest::post()
            .uri("/signup")
            .set_form([("username", "Phillip"), ("password", "pw")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(location(&resp), expected);
    }
}

#[actix_rt::test]
async fn test_forged_cookie_is_ignored() {
    let (services, _storage, _dir) = create_services(true).await;
    let app = init_app!(services);

    let req = TestRequest::get()
        .uri("/links")
        .cookie(Cookie::new("shortly_session", "forged.token.value"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), "/login");
}

// =============================================================================
// Middleware
// =============================================================================

#[actix_rt::test]
async fn test_every_response_has_request_id() {
    let (services, _storage, _dir) = create_services(true).await;
    let app = init_app!(services);

    for uri in ["/", "/login", "/nonexistent-code"] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.headers().contains_key("x-request-id"), "uri {}", uri);
    }
}
