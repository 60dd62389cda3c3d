#![allow(async_fn_in_trait)]

use uuid::Uuid;

use reelhouse_domain::pagination::PageRequest;
use reelhouse_domain::rating::Rating;

use crate::domain::types::{
    Actor, AssetKind, MediaAsset, Movie, MovieCard, OutboxEvent, RatingStats, Review,
    ReviewWithOwner, StoredToken, TokenPurpose, Upload, User,
};
use crate::error::CatalogError;

/// Repository for accounts. Multi-row writes that also touch tokens or the
/// outbox run in one transaction.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CatalogError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CatalogError>;

    /// Insert the user, its first verification token and the mail event.
    /// A taken email is a `Conflict`.
    async fn create_with_verification(
        &self,
        user: &User,
        token: &StoredToken,
        event: &OutboxEvent,
    ) -> Result<(), CatalogError>;

    /// Set `is_verified`, drop the verification token, queue `event`.
    async fn mark_verified(&self, id: Uuid, event: &OutboxEvent) -> Result<(), CatalogError>;

    /// Store the new hash, drop the reset token, queue `event`.
    async fn reset_password(
        &self,
        id: Uuid,
        password_hash: &str,
        event: &OutboxEvent,
    ) -> Result<(), CatalogError>;

    async fn count(&self) -> Result<u64, CatalogError>;
}

/// Repository for hashed single-use tokens.
pub trait TokenRepository: Send + Sync {
    async fn find(
        &self,
        purpose: TokenPurpose,
        owner_id: Uuid,
    ) -> Result<Option<StoredToken>, CatalogError>;

    /// Replace the owner's live token of this purpose and queue `event`.
    async fn replace_with_outbox(
        &self,
        purpose: TokenPurpose,
        token: &StoredToken,
        event: &OutboxEvent,
    ) -> Result<(), CatalogError>;
}

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, CatalogError>;
    async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, CatalogError>;
}

pub trait ActorRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Actor>, CatalogError>;
    /// Actors among `ids`, in no particular order. Unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Actor>, CatalogError>;
    async fn create(&self, actor: &Actor) -> Result<(), CatalogError>;
    async fn update(&self, actor: &Actor) -> Result<(), CatalogError>;
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, CatalogError>;
    /// Case-insensitive substring match on the name.
    async fn search_by_name(&self, name: &str) -> Result<Vec<Actor>, CatalogError>;
    /// Newest first.
    async fn latest(&self, limit: u64) -> Result<Vec<Actor>, CatalogError>;
    /// Newest first.
    async fn list(&self, page: PageRequest) -> Result<Vec<Actor>, CatalogError>;
}

pub trait MovieRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Movie>, CatalogError>;
    /// Insert the movie with its cast rows.
    async fn create(&self, movie: &Movie) -> Result<(), CatalogError>;
    /// Overwrite the movie and replace its cast rows.
    async fn update(&self, movie: &Movie) -> Result<(), CatalogError>;
    /// Returns `true` if a row was deleted. Cast and reviews cascade.
    async fn delete(&self, id: Uuid) -> Result<bool, CatalogError>;
    /// Newest first.
    async fn list(&self, page: PageRequest) -> Result<Vec<Movie>, CatalogError>;
    /// Case-insensitive substring match on the title.
    async fn search_by_title(
        &self,
        title: &str,
        public_only: bool,
    ) -> Result<Vec<Movie>, CatalogError>;
    /// Public movies, newest first.
    async fn latest_public(&self, limit: u64) -> Result<Vec<Movie>, CatalogError>;
    async fn count(&self) -> Result<u64, CatalogError>;
}

pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, CatalogError>;
    /// A second review by the same owner on the same movie is a `Conflict`.
    async fn create(&self, review: &Review) -> Result<(), CatalogError>;
    async fn update(
        &self,
        id: Uuid,
        rating: Rating,
        content: Option<&str>,
    ) -> Result<(), CatalogError>;
    async fn delete(&self, id: Uuid) -> Result<bool, CatalogError>;
    async fn list_by_movie(&self, movie_id: Uuid) -> Result<Vec<ReviewWithOwner>, CatalogError>;
    async fn count(&self) -> Result<u64, CatalogError>;
}

/// Aggregate queries over reviews. Ties are broken by ascending movie id.
pub trait RatingRepository: Send + Sync {
    async fn stats(&self, movie_id: Uuid) -> Result<RatingStats, CatalogError>;

    /// Public movies of `kind` with at least one review, most reviewed first.
    async fn most_reviewed(&self, kind: &str, limit: u64) -> Result<Vec<MovieCard>, CatalogError>;

    /// Movies sharing at least one tag with `tags`, excluding `exclude`.
    async fn sharing_tags(
        &self,
        tags: &[String],
        exclude: Uuid,
        limit: u64,
    ) -> Result<Vec<MovieCard>, CatalogError>;
}

/// External asset store. Failures surface as `CatalogError::Upstream`.
pub trait MediaGateway: Send + Sync {
    async fn upload(&self, file: &Upload, kind: AssetKind) -> Result<MediaAsset, CatalogError>;
    async fn delete(&self, public_id: &str, kind: AssetKind) -> Result<(), CatalogError>;
}
