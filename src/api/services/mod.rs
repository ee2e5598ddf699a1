pub mod auth;
pub mod error_code;
pub mod helpers;
pub mod links;
pub mod pages;
pub mod redirect;

use actix_web::web;

pub use auth::login_rate_limiter;
pub use error_code::ErrorCode;

/// Register every route. The short code catch-all must stay last.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(pages::index)))
        .service(web::resource("/create").route(web::get().to(pages::index)))
        .service(
            web::resource("/links")
                .route(web::get().to(links::list_links))
                .route(web::post().to(links::create_link)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(pages::login_page))
                .route(web::post().to(auth::login).wrap(login_rate_limiter())),
        )
        .service(
            web::resource("/signup")
                .route(web::get().to(pages::signup_page))
                .route(web::post().to(auth::signup).wrap(login_rate_limiter())),
        )
        .service(web::resource("/logout").route(web::get().to(auth::logout)))
        .service(web::resource("/{code:.*}").route(web::get().to(redirect::follow_code)));
}
