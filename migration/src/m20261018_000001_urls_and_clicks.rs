use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Url::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Url::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Url::Url).text().not_null())
                    .col(ColumnDef::new(Url::Code).string_len(64).not_null())
                    .col(ColumnDef::new(Url::Title).text().null())
                    .col(
                        ColumnDef::new(Url::Visits)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Url::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One link per url, one url per code
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_urls_url")
                    .table(Url::Table)
                    .col(Url::Url)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_urls_code")
                    .table(Url::Table)
                    .col(Url::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Click::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Click::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Click::LinkId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Click::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clicks_link_id")
                            .from(Click::Table, Click::LinkId)
                            .to(Url::Table, Url::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_clicks_link_id")
                    .table(Click::Table)
                    .col(Click::LinkId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Click::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Url::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Url {
    #[sea_orm(iden = "urls")]
    Table,
    Id,
    Url,
    Code,
    Title,
    Visits,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Click {
    #[sea_orm(iden = "clicks")]
    Table,
    Id,
    LinkId,
    CreatedAt,
}
