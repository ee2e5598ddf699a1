//! Link and click persistence for SeaOrmStorage

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait, ExprTrait, QueryFilter,
    QueryOrder, TransactionTrait, sea_query::Expr,
};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::{model_to_click, model_to_link, new_link_active_model};
use super::retry::StoreOp;
use crate::errors::{Result, ShortlyError};
use crate::storage::{Click, Link, LinkStore};

use migration::entities::{click, link};

#[async_trait]
impl LinkStore for SeaOrmStorage {
    async fn find_by_url(&self, url: &str) -> Result<Option<Link>> {
        let db = &self.db;

        let model = self.retry.run(StoreOp::FindByUrl, || async {
            link::Entity::find()
                .filter(link::Column::Url.eq(url))
                .one(db)
                .await
        })
        .await?;

        Ok(model.map(model_to_link))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>> {
        let db = &self.db;

        let model = self.retry.run(
            StoreOp::FindByCode(code),
            || async {
                link::Entity::find()
                    .filter(link::Column::Code.eq(code))
                    .one(db)
                    .await
            },
        )
        .await?;

        Ok(model.map(model_to_link))
    }

    async fn create(&self, url: &str, title: Option<&str>, code: &str) -> Result<Link> {
        let db = &self.db;

        let model = self.retry.run(
            StoreOp::CreateLink(code),
            || async { new_link_active_model(url, title, code).insert(db).await },
        )
        .await?;

        info!("Short link created: {} -> {}", model.code, model.url);
        Ok(model_to_link(model))
    }

    async fn increment_visits(&self, link: &Link) -> Result<Link> {
        let db = &self.db;
        let link_id = link.id;

        let updated = self.retry.run(
            StoreOp::RecordVisit(&link.code),
            || async {
                let txn = db.begin().await?;

                let result = link::Entity::update_many()
                    .col_expr(
                        link::Column::Visits,
                        Expr::col(link::Column::Visits).add(Expr::val(1i64)),
                    )
                    .filter(link::Column::Id.eq(link_id))
                    .exec(&txn)
                    .await?;

                if result.rows_affected == 0 {
                    // Dropping the transaction rolls it back
                    return Ok(None);
                }

                click::Entity::insert(click::ActiveModel {
                    link_id: Set(link_id),
                    created_at: Set(chrono::Utc::now()),
                    ..Default::default()
                })
                .exec(&txn)
                .await?;

                let model = link::Entity::find_by_id(link_id).one(&txn).await?;
                txn.commit().await?;
                Ok::<_, DbErr>(model)
            },
        )
        .await?;

        let model = updated.ok_or_else(|| {
            ShortlyError::not_found(format!("Link {} no longer exists", link.code))
        })?;

        debug!("Visit recorded: {} (visits={})", model.code, model.visits);
        Ok(model_to_link(model))
    }

    async fn list_links(&self) -> Result<Vec<Link>> {
        let db = &self.db;

        let models = self.retry.run(StoreOp::ListLinks, || async {
            link::Entity::find()
                .order_by_asc(link::Column::Id)
                .all(db)
                .await
        })
        .await?;

        Ok(models.into_iter().map(model_to_link).collect())
    }

    async fn list_clicks(&self, link_id: i64) -> Result<Vec<Click>> {
        let db = &self.db;

        let models = self.retry.run(StoreOp::ListClicks(link_id), || async {
            click::Entity::find()
                .filter(click::Column::LinkId.eq(link_id))
                .order_by_asc(click::Column::Id)
                .all(db)
                .await
        })
        .await?;

        Ok(models.into_iter().map(model_to_click).collect())
    }
}
