pub mod auth;
pub mod request_id;

pub use auth::{AuthContext, SessionUser};
pub use request_id::{RequestId, RequestIdMiddleware};
