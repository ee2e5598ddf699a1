//! Service layer for business logic
//!
//! Shared by the HTTP handlers and the CLI.

mod link_service;
mod redirect;
pub mod title;
mod user_service;

pub use link_service::LinkService;
pub use redirect::{RedirectResolver, RedirectTarget};
pub use title::{HttpTitleFetcher, TitleFetcher, UrlAsTitle, title_fetcher_from_config};
pub use user_service::UserService;
