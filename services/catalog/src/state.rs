use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbActorRepository, DbMovieRepository, DbRatingRepository, DbReviewRepository,
    DbTokenRepository, DbUserRepository,
};
use crate::infra::media::CloudinaryGateway;
use crate::infra::password::Argon2Hasher;
use crate::usecase::rating::RatingAggregator;
use crate::usecase::token::TokenService;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub media: CloudinaryGateway,
    pub tokens: TokenService,
    pub frontend_url: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn token_repo(&self) -> DbTokenRepository {
        DbTokenRepository {
            db: self.db.clone(),
        }
    }

    pub fn actor_repo(&self) -> DbActorRepository {
        DbActorRepository {
            db: self.db.clone(),
        }
    }

    pub fn movie_repo(&self) -> DbMovieRepository {
        DbMovieRepository {
            db: self.db.clone(),
        }
    }

    pub fn review_repo(&self) -> DbReviewRepository {
        DbReviewRepository {
            db: self.db.clone(),
        }
    }

    pub fn rating_repo(&self) -> DbRatingRepository {
        DbRatingRepository {
            db: self.db.clone(),
        }
    }

    pub fn hasher(&self) -> Argon2Hasher {
        Argon2Hasher
    }

    pub fn media(&self) -> CloudinaryGateway {
        self.media.clone()
    }

    pub fn ratings(&self) -> RatingAggregator<DbRatingRepository> {
        RatingAggregator {
            repo: self.rating_repo(),
        }
    }
}
