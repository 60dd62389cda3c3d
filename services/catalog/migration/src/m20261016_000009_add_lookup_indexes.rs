use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Public listings filter on status and type, newest first.
        manager
            .create_index(
                Index::create()
                    .table(Movies::Table)
                    .col(Movies::Status)
                    .col(Movies::Type)
                    .name("idx_movies_status_type")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Movies::Table)
                    .col(Movies::CreatedAt)
                    .name("idx_movies_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Actors::Table)
                    .col(Actors::CreatedAt)
                    .name("idx_actors_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_actors_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_movies_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_movies_status_type").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Movies {
    Table,
    Status,
    Type,
    CreatedAt,
}

#[derive(Iden)]
enum Actors {
    Table,
    CreatedAt,
}
