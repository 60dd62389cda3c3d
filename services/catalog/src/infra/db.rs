use std::collections::HashMap;

use anyhow::{Context as _, anyhow};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Statement, TransactionError, TransactionTrait,
    sea_query::{Expr, Func, OnConflict},
};
use uuid::Uuid;

use reelhouse_catalog_schema::{
    actors, email_verification_tokens, movie_cast, movies, outbox_events, password_reset_tokens,
    reviews, users,
};
use reelhouse_domain::movie::MovieStatus;
use reelhouse_domain::pagination::PageRequest;
use reelhouse_domain::rating::Rating;

use crate::domain::repository::{
    ActorRepository, MovieRepository, RatingRepository, ReviewRepository, TokenRepository,
    UserRepository,
};
use crate::domain::types::{
    Actor, CastMember, MediaAsset, Movie, MovieCard, OutboxEvent, RatingStats, Review,
    ReviewWithOwner, StoredToken, TokenPurpose, User,
};
use crate::error::CatalogError;

fn flatten_txn(err: TransactionError<DbErr>) -> DbErr {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => e,
    }
}

/// Escape `%`, `_` and `\` for use inside a LIKE pattern.
fn like_contains(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

async fn insert_outbox_event(
    txn: &DatabaseTransaction,
    event: &OutboxEvent,
) -> Result<(), DbErr> {
    let now = Utc::now();
    outbox_events::ActiveModel {
        id: Set(event.id),
        kind: Set(event.kind.clone()),
        recipient: Set(event.recipient.clone()),
        payload: Set(event.payload.clone()),
        idempotency_key: Set(event.idempotency_key.clone()),
        attempts: Set(0),
        last_error: Set(None),
        created_at: Set(now),
        next_attempt_at: Set(now),
        processed_at: Set(None),
        failed_at: Set(None),
    }
    .insert(txn)
    .await?;
    Ok(())
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CatalogError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CatalogError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create_with_verification(
        &self,
        user: &User,
        token: &StoredToken,
        event: &OutboxEvent,
    ) -> Result<(), CatalogError> {
        let user = user.clone();
        let token = token.clone();
        let event = event.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(user.id),
                        name: Set(user.name),
                        email: Set(user.email),
                        password_hash: Set(user.password_hash),
                        role: Set(user.role.as_str().to_owned()),
                        is_verified: Set(user.is_verified),
                        created_at: Set(user.created_at),
                        updated_at: Set(user.updated_at),
                    }
                    .insert(txn)
                    .await?;
                    email_verification_tokens::ActiveModel {
                        owner_id: Set(token.owner_id),
                        token_hash: Set(token.token_hash),
                        created_at: Set(token.created_at),
                    }
                    .insert(txn)
                    .await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| {
                CatalogError::from_write(
                    flatten_txn(e),
                    "This email is already in use!",
                    "create user with verification token",
                )
            })
    }

    async fn mark_verified(&self, id: Uuid, event: &OutboxEvent) -> Result<(), CatalogError> {
        let event = event.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(id),
                        is_verified: Set(true),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    email_verification_tokens::Entity::delete_by_id(id)
                        .exec(txn)
                        .await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("mark user verified")?;
        Ok(())
    }

    async fn reset_password(
        &self,
        id: Uuid,
        password_hash: &str,
        event: &OutboxEvent,
    ) -> Result<(), CatalogError> {
        let password_hash = password_hash.to_owned();
        let event = event.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(id),
                        password_hash: Set(password_hash),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    password_reset_tokens::Entity::delete_by_id(id)
                        .exec(txn)
                        .await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("reset user password")?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, CatalogError> {
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        Ok(count)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        // Unknown roles get the least privilege.
        role: model.role.parse().unwrap_or_default(),
        is_verified: model.is_verified,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Token repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTokenRepository {
    pub db: DatabaseConnection,
}

impl TokenRepository for DbTokenRepository {
    async fn find(
        &self,
        purpose: TokenPurpose,
        owner_id: Uuid,
    ) -> Result<Option<StoredToken>, CatalogError> {
        let token = match purpose {
            TokenPurpose::EmailVerification => {
                email_verification_tokens::Entity::find_by_id(owner_id)
                    .one(&self.db)
                    .await
                    .context("find email verification token")?
                    .map(|m| StoredToken {
                        owner_id: m.owner_id,
                        token_hash: m.token_hash,
                        created_at: m.created_at,
                    })
            }
            TokenPurpose::PasswordReset => password_reset_tokens::Entity::find_by_id(owner_id)
                .one(&self.db)
                .await
                .context("find password reset token")?
                .map(|m| StoredToken {
                    owner_id: m.owner_id,
                    token_hash: m.token_hash,
                    created_at: m.created_at,
                }),
        };
        Ok(token)
    }

    async fn replace_with_outbox(
        &self,
        purpose: TokenPurpose,
        token: &StoredToken,
        event: &OutboxEvent,
    ) -> Result<(), CatalogError> {
        let token = token.clone();
        let event = event.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    upsert_token(txn, purpose, &token).await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("replace token with outbox")?;
        Ok(())
    }
}

/// Insert or overwrite the owner's token; the previous hash stops matching.
async fn upsert_token(
    txn: &DatabaseTransaction,
    purpose: TokenPurpose,
    token: &StoredToken,
) -> Result<(), DbErr> {
    match purpose {
        TokenPurpose::EmailVerification => {
            use email_verification_tokens::{ActiveModel, Column, Entity};
            Entity::insert(ActiveModel {
                owner_id: Set(token.owner_id),
                token_hash: Set(token.token_hash.clone()),
                created_at: Set(token.created_at),
            })
            .on_conflict(
                OnConflict::column(Column::OwnerId)
                    .update_columns([Column::TokenHash, Column::CreatedAt])
                    .to_owned(),
            )
            .exec(txn)
            .await?;
        }
        TokenPurpose::PasswordReset => {
            use password_reset_tokens::{ActiveModel, Column, Entity};
            Entity::insert(ActiveModel {
                owner_id: Set(token.owner_id),
                token_hash: Set(token.token_hash.clone()),
                created_at: Set(token.created_at),
            })
            .on_conflict(
                OnConflict::column(Column::OwnerId)
                    .update_columns([Column::TokenHash, Column::CreatedAt])
                    .to_owned(),
            )
            .exec(txn)
            .await?;
        }
    }
    Ok(())
}

// ── Actor repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbActorRepository {
    pub db: DatabaseConnection,
}

impl ActorRepository for DbActorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Actor>, CatalogError> {
        let model = actors::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find actor by id")?;
        Ok(model.map(actor_from_model))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Actor>, CatalogError> {
        let models = actors::Entity::find()
            .filter(actors::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find actors by ids")?;
        Ok(models.into_iter().map(actor_from_model).collect())
    }

    async fn create(&self, actor: &Actor) -> Result<(), CatalogError> {
        actor_to_active(actor)
            .insert(&self.db)
            .await
            .context("create actor")?;
        Ok(())
    }

    async fn update(&self, actor: &Actor) -> Result<(), CatalogError> {
        actor_to_active(actor)
            .update(&self.db)
            .await
            .context("update actor")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogError> {
        let result = actors::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete actor")?;
        Ok(result.rows_affected > 0)
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Actor>, CatalogError> {
        let models = actors::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(actors::Column::Name))).like(like_contains(name)))
            .order_by_asc(actors::Column::Name)
            .all(&self.db)
            .await
            .context("search actors by name")?;
        Ok(models.into_iter().map(actor_from_model).collect())
    }

    async fn latest(&self, limit: u64) -> Result<Vec<Actor>, CatalogError> {
        let models = actors::Entity::find()
            .order_by_desc(actors::Column::CreatedAt)
            .order_by_desc(actors::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .context("latest actors")?;
        Ok(models.into_iter().map(actor_from_model).collect())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Actor>, CatalogError> {
        let models = actors::Entity::find()
            .order_by_desc(actors::Column::CreatedAt)
            .order_by_desc(actors::Column::Id)
            .offset(page.offset())
            .limit(page.limit as u64)
            .all(&self.db)
            .await
            .context("list actors")?;
        Ok(models.into_iter().map(actor_from_model).collect())
    }
}

fn actor_to_active(actor: &Actor) -> actors::ActiveModel {
    actors::ActiveModel {
        id: Set(actor.id),
        name: Set(actor.name.clone()),
        about: Set(actor.about.clone()),
        gender: Set(actor.gender.clone()),
        avatar_url: Set(actor.avatar.as_ref().map(|a| a.url.clone())),
        avatar_public_id: Set(actor.avatar.as_ref().map(|a| a.public_id.clone())),
        created_at: Set(actor.created_at),
    }
}

fn actor_from_model(model: actors::Model) -> Actor {
    let avatar = match (model.avatar_url, model.avatar_public_id) {
        (Some(url), Some(public_id)) => Some(MediaAsset {
            url,
            public_id,
            responsive: Vec::new(),
        }),
        _ => None,
    };
    Actor {
        id: model.id,
        name: model.name,
        about: model.about,
        gender: model.gender,
        avatar,
        created_at: model.created_at,
    }
}

// ── Movie repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMovieRepository {
    pub db: DatabaseConnection,
}

impl DbMovieRepository {
    /// Attach cast rows, ordered by position, to each movie.
    async fn with_cast(&self, models: Vec<movies::Model>) -> Result<Vec<Movie>, CatalogError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let rows = movie_cast::Entity::find()
            .filter(movie_cast::Column::MovieId.is_in(ids))
            .order_by_asc(movie_cast::Column::MovieId)
            .order_by_asc(movie_cast::Column::Position)
            .all(&self.db)
            .await
            .context("load movie cast")?;

        let mut by_movie: HashMap<Uuid, Vec<CastMember>> = HashMap::new();
        for row in rows {
            by_movie.entry(row.movie_id).or_default().push(CastMember {
                id: row.id,
                actor_id: row.actor_id,
                role_as: row.role_as,
                lead_actor: row.lead_actor,
            });
        }
        Ok(models
            .into_iter()
            .map(|m| {
                let cast = by_movie.remove(&m.id).unwrap_or_default();
                movie_from_model(m, cast)
            })
            .collect())
    }
}

async fn insert_cast(txn: &DatabaseTransaction, movie: &Movie) -> Result<(), DbErr> {
    if movie.cast.is_empty() {
        return Ok(());
    }
    let rows = movie
        .cast
        .iter()
        .enumerate()
        .map(|(position, member)| movie_cast::ActiveModel {
            id: Set(member.id),
            movie_id: Set(movie.id),
            actor_id: Set(member.actor_id),
            role_as: Set(member.role_as.clone()),
            lead_actor: Set(member.lead_actor),
            position: Set(position as i32),
        });
    movie_cast::Entity::insert_many(rows).exec(txn).await?;
    Ok(())
}

impl MovieRepository for DbMovieRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Movie>, CatalogError> {
        let Some(model) = movies::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find movie by id")?
        else {
            return Ok(None);
        };
        Ok(self.with_cast(vec![model]).await?.pop())
    }

    async fn create(&self, movie: &Movie) -> Result<(), CatalogError> {
        let movie = movie.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    movie_to_active(&movie).insert(txn).await?;
                    insert_cast(txn, &movie).await?;
                    Ok(())
                })
            })
            .await
            .context("create movie with cast")?;
        Ok(())
    }

    async fn update(&self, movie: &Movie) -> Result<(), CatalogError> {
        let movie = movie.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    movie_to_active(&movie).update(txn).await?;
                    movie_cast::Entity::delete_many()
                        .filter(movie_cast::Column::MovieId.eq(movie.id))
                        .exec(txn)
                        .await?;
                    insert_cast(txn, &movie).await?;
                    Ok(())
                })
            })
            .await
            .context("update movie with cast")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogError> {
        let result = movies::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete movie")?;
        Ok(result.rows_affected > 0)
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Movie>, CatalogError> {
        let models = movies::Entity::find()
            .order_by_desc(movies::Column::CreatedAt)
            .order_by_desc(movies::Column::Id)
            .offset(page.offset())
            .limit(page.limit as u64)
            .all(&self.db)
            .await
            .context("list movies")?;
        self.with_cast(models).await
    }

    async fn search_by_title(
        &self,
        title: &str,
        public_only: bool,
    ) -> Result<Vec<Movie>, CatalogError> {
        let mut query = movies::Entity::find().filter(
            Expr::expr(Func::lower(Expr::col(movies::Column::Title))).like(like_contains(title)),
        );
        if public_only {
            query = query.filter(movies::Column::Status.eq(MovieStatus::Public.as_str()));
        }
        let models = query
            .order_by_desc(movies::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("search movies by title")?;
        self.with_cast(models).await
    }

    async fn latest_public(&self, limit: u64) -> Result<Vec<Movie>, CatalogError> {
        let models = movies::Entity::find()
            .filter(movies::Column::Status.eq(MovieStatus::Public.as_str()))
            .order_by_desc(movies::Column::CreatedAt)
            .order_by_desc(movies::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .context("latest public movies")?;
        self.with_cast(models).await
    }

    async fn count(&self) -> Result<u64, CatalogError> {
        let count = movies::Entity::find()
            .count(&self.db)
            .await
            .context("count movies")?;
        Ok(count)
    }
}

fn movie_to_active(movie: &Movie) -> movies::ActiveModel {
    movies::ActiveModel {
        id: Set(movie.id),
        title: Set(movie.title.clone()),
        story_line: Set(movie.story_line.clone()),
        director_id: Set(movie.director_id),
        writers: Set(movie.writers.clone()),
        release_date: Set(movie.release_date),
        status: Set(movie.status.as_str().to_owned()),
        kind: Set(movie.kind.clone()),
        genres: Set(movie.genres.clone()),
        tags: Set(movie.tags.clone()),
        language: Set(movie.language.clone()),
        poster_url: Set(movie.poster.as_ref().map(|p| p.url.clone())),
        poster_public_id: Set(movie.poster.as_ref().map(|p| p.public_id.clone())),
        poster_responsive: Set(movie
            .poster
            .as_ref()
            .map(|p| p.responsive.clone())
            .unwrap_or_default()),
        trailer_url: Set(movie.trailer.as_ref().map(|t| t.url.clone())),
        trailer_public_id: Set(movie.trailer.as_ref().map(|t| t.public_id.clone())),
        created_at: Set(movie.created_at),
    }
}

fn movie_from_model(model: movies::Model, cast: Vec<CastMember>) -> Movie {
    let poster = match (model.poster_url, model.poster_public_id) {
        (Some(url), Some(public_id)) => Some(MediaAsset {
            url,
            public_id,
            responsive: model.poster_responsive,
        }),
        _ => None,
    };
    let trailer = match (model.trailer_url, model.trailer_public_id) {
        (Some(url), Some(public_id)) => Some(MediaAsset {
            url,
            public_id,
            responsive: Vec::new(),
        }),
        _ => None,
    };
    Movie {
        id: model.id,
        title: model.title,
        story_line: model.story_line,
        director_id: model.director_id,
        writers: model.writers,
        cast,
        release_date: model.release_date,
        // Anything unrecognised stays out of public listings.
        status: model.status.parse().unwrap_or(MovieStatus::Private),
        kind: model.kind,
        genres: model.genres,
        tags: model.tags,
        language: model.language,
        poster,
        trailer,
        created_at: model.created_at,
    }
}

// ── Review repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReviewRepository {
    pub db: DatabaseConnection,
}

impl ReviewRepository for DbReviewRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, CatalogError> {
        let model = reviews::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find review by id")?;
        model.map(review_from_model).transpose()
    }

    async fn create(&self, review: &Review) -> Result<(), CatalogError> {
        reviews::ActiveModel {
            id: Set(review.id),
            owner_id: Set(review.owner_id),
            movie_id: Set(review.movie_id),
            rating: Set(review.rating.get() as i16),
            content: Set(review.content.clone()),
            created_at: Set(review.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            CatalogError::from_write(e, "Invalid request, review is already there!", "create review")
        })?;
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        rating: Rating,
        content: Option<&str>,
    ) -> Result<(), CatalogError> {
        reviews::ActiveModel {
            id: Set(id),
            rating: Set(rating.get() as i16),
            content: Set(content.map(str::to_owned)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update review")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogError> {
        let result = reviews::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete review")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_by_movie(&self, movie_id: Uuid) -> Result<Vec<ReviewWithOwner>, CatalogError> {
        let rows = reviews::Entity::find()
            .filter(reviews::Column::MovieId.eq(movie_id))
            .find_also_related(users::Entity)
            .order_by_desc(reviews::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list reviews by movie")?;
        rows.into_iter()
            .map(|(review, owner)| {
                Ok(ReviewWithOwner {
                    review: review_from_model(review)?,
                    owner_name: owner.map(|u| u.name).unwrap_or_default(),
                })
            })
            .collect()
    }

    async fn count(&self) -> Result<u64, CatalogError> {
        let count = reviews::Entity::find()
            .count(&self.db)
            .await
            .context("count reviews")?;
        Ok(count)
    }
}

fn review_from_model(model: reviews::Model) -> Result<Review, CatalogError> {
    let rating = Rating::new(model.rating as i64)
        .map_err(|e| anyhow!("review {} has rating {}: {e}", model.id, model.rating))?;
    Ok(Review {
        id: model.id,
        owner_id: model.owner_id,
        movie_id: model.movie_id,
        rating,
        content: model.content,
        created_at: model.created_at,
    })
}

// ── Rating repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRatingRepository {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct StatsRow {
    mean: Option<f64>,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct CardRow {
    id: Uuid,
    title: String,
    poster_url: Option<String>,
    poster_responsive: Vec<String>,
    review_count: i64,
}

impl From<CardRow> for MovieCard {
    fn from(row: CardRow) -> Self {
        MovieCard {
            id: row.id,
            title: row.title,
            poster: row.poster_url,
            responsive_posters: row.poster_responsive,
            review_count: row.review_count.max(0) as u64,
        }
    }
}

impl RatingRepository for DbRatingRepository {
    async fn stats(&self, movie_id: Uuid) -> Result<RatingStats, CatalogError> {
        let row = StatsRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT AVG(rating)::float8 AS mean, COUNT(*) AS count
            FROM reviews
            WHERE movie_id = $1
            "#,
            [movie_id.into()],
        ))
        .one(&self.db)
        .await
        .context("aggregate movie rating")?;

        Ok(match row {
            Some(StatsRow {
                mean: Some(mean),
                count,
            }) if count > 0 => RatingStats {
                mean,
                count: count as u64,
            },
            _ => RatingStats::default(),
        })
    }

    async fn most_reviewed(&self, kind: &str, limit: u64) -> Result<Vec<MovieCard>, CatalogError> {
        let rows = CardRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT m.id, m.title, m.poster_url, m.poster_responsive,
                   COUNT(r.id) AS review_count
            FROM movies m
            JOIN reviews r ON r.movie_id = m.id
            WHERE m.status = $1 AND m.type = $2
            GROUP BY m.id
            ORDER BY review_count DESC, m.id ASC
            LIMIT $3
            "#,
            [
                MovieStatus::Public.as_str().into(),
                kind.into(),
                (limit as i64).into(),
            ],
        ))
        .all(&self.db)
        .await
        .context("most reviewed movies")?;
        Ok(rows.into_iter().map(MovieCard::from).collect())
    }

    async fn sharing_tags(
        &self,
        tags: &[String],
        exclude: Uuid,
        limit: u64,
    ) -> Result<Vec<MovieCard>, CatalogError> {
        let rows = CardRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT m.id, m.title, m.poster_url, m.poster_responsive,
                   (SELECT COUNT(*) FROM reviews r WHERE r.movie_id = m.id) AS review_count
            FROM movies m
            WHERE m.tags && $1 AND m.id <> $2
            ORDER BY m.id ASC
            LIMIT $3
            "#,
            [tags.to_vec().into(), exclude.into(), (limit as i64).into()],
        ))
        .all(&self.db)
        .await
        .context("movies sharing tags")?;
        Ok(rows.into_iter().map(MovieCard::from).collect())
    }
}
