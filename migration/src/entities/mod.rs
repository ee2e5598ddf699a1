pub mod click;
pub mod link;
pub mod user;

pub use click::Entity as ClickEntity;
pub use link::Entity as LinkEntity;
pub use user::Entity as UserEntity;
