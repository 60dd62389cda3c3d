use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Actors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Actors::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Actors::Name).string().not_null())
                    .col(ColumnDef::new(Actors::About).text().not_null())
                    .col(ColumnDef::new(Actors::Gender).string().not_null())
                    .col(ColumnDef::new(Actors::AvatarUrl).string())
                    .col(ColumnDef::new(Actors::AvatarPublicId).string())
                    .col(
                        ColumnDef::new(Actors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Actors::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Actors {
    Table,
    Id,
    Name,
    About,
    Gender,
    AvatarUrl,
    AvatarPublicId,
    CreatedAt,
}
