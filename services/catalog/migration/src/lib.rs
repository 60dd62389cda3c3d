use sea_orm_migration::prelude::*;

mod m20261016_000001_create_users;
mod m20261016_000002_create_email_verification_tokens;
mod m20261016_000003_create_password_reset_tokens;
mod m20261016_000004_create_actors;
mod m20261016_000005_create_movies;
mod m20261016_000006_create_movie_cast;
mod m20261016_000007_create_reviews;
mod m20261016_000008_create_outbox_events;
mod m20261016_000009_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_create_users::Migration),
            Box::new(m20261016_000002_create_email_verification_tokens::Migration),
            Box::new(m20261016_000003_create_password_reset_tokens::Migration),
            Box::new(m20261016_000004_create_actors::Migration),
            Box::new(m20261016_000005_create_movies::Migration),
            Box::new(m20261016_000006_create_movie_cast::Migration),
            Box::new(m20261016_000007_create_reviews::Migration),
            Box::new(m20261016_000008_create_outbox_events::Migration),
            Box::new(m20261016_000009_add_lookup_indexes::Migration),
        ]
    }
}
