pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20261018_000001_urls_and_clicks;
mod m20261018_000002_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_000001_urls_and_clicks::Migration),
            Box::new(m20261018_000002_users::Migration),
        ]
    }
}
