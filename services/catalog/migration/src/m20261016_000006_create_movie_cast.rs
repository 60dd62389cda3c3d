use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MovieCast::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MovieCast::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(MovieCast::MovieId).uuid().not_null())
                    .col(ColumnDef::new(MovieCast::ActorId).uuid().not_null())
                    .col(ColumnDef::new(MovieCast::RoleAs).string().not_null())
                    .col(
                        ColumnDef::new(MovieCast::LeadActor)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(MovieCast::Position).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(MovieCast::Table, MovieCast::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MovieCast::Table, MovieCast::ActorId)
                            .to(Actors::Table, Actors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(MovieCast::Table)
                    .col(MovieCast::MovieId)
                    .col(MovieCast::Position)
                    .name("idx_movie_cast_movie_id_position")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MovieCast::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MovieCast {
    Table,
    Id,
    MovieId,
    ActorId,
    RoleAs,
    LeadActor,
    Position,
}

#[derive(Iden)]
enum Movies {
    Table,
    Id,
}

#[derive(Iden)]
enum Actors {
    Table,
    Id,
}
