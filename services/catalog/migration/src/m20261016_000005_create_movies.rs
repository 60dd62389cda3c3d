use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Movies::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Movies::Title).string().not_null())
                    .col(ColumnDef::new(Movies::StoryLine).text().not_null())
                    .col(ColumnDef::new(Movies::DirectorId).uuid())
                    .col(
                        ColumnDef::new(Movies::Writers)
                            .array(ColumnType::Uuid)
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .col(ColumnDef::new(Movies::ReleaseDate).date().not_null())
                    .col(ColumnDef::new(Movies::Status).string().not_null())
                    .col(ColumnDef::new(Movies::Type).string().not_null())
                    .col(
                        ColumnDef::new(Movies::Genres)
                            .array(ColumnType::Text)
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .col(
                        ColumnDef::new(Movies::Tags)
                            .array(ColumnType::Text)
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .col(ColumnDef::new(Movies::Language).string().not_null())
                    .col(ColumnDef::new(Movies::PosterUrl).string())
                    .col(ColumnDef::new(Movies::PosterPublicId).string())
                    .col(
                        ColumnDef::new(Movies::PosterResponsive)
                            .array(ColumnType::Text)
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .col(ColumnDef::new(Movies::TrailerUrl).string())
                    .col(ColumnDef::new(Movies::TrailerPublicId).string())
                    .col(
                        ColumnDef::new(Movies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Movies::Table, Movies::DirectorId)
                            .to(Actors::Table, Actors::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movies::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Movies {
    Table,
    Id,
    Title,
    StoryLine,
    DirectorId,
    Writers,
    ReleaseDate,
    Status,
    Type,
    Genres,
    Tags,
    Language,
    PosterUrl,
    PosterPublicId,
    PosterResponsive,
    TrailerUrl,
    TrailerPublicId,
    CreatedAt,
}

#[derive(Iden)]
enum Actors {
    Table,
    Id,
}
