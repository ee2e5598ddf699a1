use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::model_to_user;
use super::retry::StoreOp;
use crate::errors::Result;
use crate::storage::{User, UserStore};

use migration::entities::user;

#[async_trait]
impl UserStore for SeaOrmStorage {
    async fn find_user(&self, username: &str) -> Result<Option<User>> {
        let db = &self.db;

        let model = self.retry.run(StoreOp::FindUser, || async {
            user::Entity::find()
                .filter(user::Column::Username.eq(username))
                .one(db)
                .await
        })
        .await?;

        Ok(model.map(model_to_user))
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        let db = &self.db;

        let model = self.retry.run(StoreOp::CreateUser, || async {
            user::ActiveModel {
                username: Set(username.to_string()),
                password: Set(password_hash.to_string()),
                created_at: Set(chrono::Utc::now()),
                ..Default::default()
            }
            .insert(db)
            .await
        })
        .await?;

        info!("User created: {}", model.username);
        Ok(model_to_user(model))
    }
}
