use bytes::Bytes;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use reelhouse_domain::movie::MovieStatus;
use reelhouse_domain::rating::Rating;
use reelhouse_domain::user::UserRole;

/// Account record.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Which single-use token a stored hash belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPurpose {
    EmailVerification,
    PasswordReset,
}

/// Hashed opaque token. At most one per `(purpose, owner_id)`.
#[derive(Debug, Clone)]
pub struct StoredToken {
    pub owner_id: Uuid,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Opaque token time-to-live in seconds.
pub const OPAQUE_TOKEN_TTL_SECS: i64 = 3600;

impl StoredToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.created_at + Duration::seconds(OPAQUE_TOKEN_TTL_SECS) <= now
    }
}

/// Outbox event for async mail delivery.
#[derive(Debug, Clone)]
pub struct OutboxEvent {
    pub id: Uuid,
    pub kind: String,
    pub recipient: String,
    pub payload: serde_json::Value,
    pub idempotency_key: String,
}

pub const EVENT_EMAIL_VERIFICATION_REQUESTED: &str = "email_verification_requested";
pub const EVENT_WELCOME: &str = "welcome";
pub const EVENT_PASSWORD_RESET_REQUESTED: &str = "password_reset_requested";
pub const EVENT_PASSWORD_RESET_COMPLETED: &str = "password_reset_completed";

impl OutboxEvent {
    pub fn new(kind: &str, recipient: &str, payload: serde_json::Value) -> Self {
        let id = Uuid::now_v7();
        Self {
            id,
            kind: kind.to_owned(),
            recipient: recipient.to_owned(),
            payload,
            idempotency_key: format!("{kind}:{id}"),
        }
    }
}

/// Asset stored with the media host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    pub url: String,
    pub public_id: String,
    /// Resolution-specific variants, posters only.
    pub responsive: Vec<String>,
}

/// Upload preset; selects the transformation and the resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Avatar,
    Poster,
    Trailer,
}

impl AssetKind {
    pub fn resource_type(self) -> &'static str {
        match self {
            Self::Avatar | Self::Poster => "image",
            Self::Trailer => "video",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Avatar => "avatar",
            Self::Poster => "poster",
            Self::Trailer => "trailer",
        }
    }
}

/// A file received in a multipart request.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl Upload {
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    pub fn is_video(&self) -> bool {
        self.content_type.starts_with("video/")
    }
}

#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub about: String,
    pub gender: String,
    pub avatar: Option<MediaAsset>,
    pub created_at: DateTime<Utc>,
}

/// One cast entry. Order in `Movie::cast` is the billing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMember {
    pub id: Uuid,
    pub actor_id: Uuid,
    pub role_as: String,
    pub lead_actor: bool,
}

#[derive(Debug, Clone)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub story_line: String,
    pub director_id: Option<Uuid>,
    pub writers: Vec<Uuid>,
    pub cast: Vec<CastMember>,
    pub release_date: NaiveDate,
    pub status: MovieStatus,
    pub kind: String,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    pub language: String,
    pub poster: Option<MediaAsset>,
    pub trailer: Option<MediaAsset>,
    pub created_at: DateTime<Utc>,
}

impl Movie {
    /// Every actor id referenced by director, writers and cast, deduplicated.
    pub fn actor_refs(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self
            .director_id
            .into_iter()
            .chain(self.writers.iter().copied())
            .chain(self.cast.iter().map(|c| c.actor_id))
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

/// Listing row used by the rating queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    pub id: Uuid,
    pub title: String,
    pub poster: Option<String>,
    pub responsive_posters: Vec<String>,
    pub review_count: u64,
}

#[derive(Debug, Clone)]
pub struct Review {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub movie_id: Uuid,
    pub rating: Rating,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Review joined with its author's display name.
#[derive(Debug, Clone)]
pub struct ReviewWithOwner {
    pub review: Review,
    pub owner_name: String,
}

/// Raw aggregate over one movie's reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingStats {
    pub mean: f64,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppInfo {
    pub movie_count: u64,
    pub review_count: u64,
    pub user_count: u64,
}

/// Result of a write that also cleaned up media. `warning` is set when the
/// cleanup failed; the write itself went through.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub value: T,
    pub warning: Option<String>,
}

impl<T> Outcome<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }
}
