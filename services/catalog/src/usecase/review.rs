use chrono::Utc;
use uuid::Uuid;

use reelhouse_domain::movie::MovieStatus;
use reelhouse_domain::rating::{Rating, RatingSummary};

use crate::domain::repository::{MovieRepository, RatingRepository, ReviewRepository};
use crate::domain::types::{Review, ReviewWithOwner};
use crate::error::CatalogError;
use crate::usecase::movie::parse_movie_id;
use crate::usecase::rating::RatingAggregator;

fn parse_review_id(raw: &str) -> Result<Uuid, CatalogError> {
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::invalid("Invalid Review ID!"))
}

/// Accepts JSON integers in the rating scale only.
pub fn parse_rating(raw: Option<&serde_json::Value>) -> Result<Rating, CatalogError> {
    raw.and_then(serde_json::Value::as_i64)
        .and_then(|v| Rating::new(v).ok())
        .ok_or_else(|| CatalogError::invalid("Rating must be a number between 1 and 5!"))
}

fn normalize_content(content: Option<String>) -> Option<String> {
    content
        .map(|c| c.trim().to_owned())
        .filter(|c| !c.is_empty())
}

// ── AddReview ────────────────────────────────────────────────────────────────

pub struct AddReviewUseCase<M: MovieRepository, R: ReviewRepository, G: RatingRepository> {
    pub movies: M,
    pub reviews: R,
    pub ratings: RatingAggregator<G>,
}

impl<M: MovieRepository, R: ReviewRepository, G: RatingRepository> AddReviewUseCase<M, R, G> {
    /// Returns the movie's refreshed rating summary.
    pub async fn execute(
        &self,
        owner_id: Uuid,
        movie_id: &str,
        rating: Rating,
        content: Option<String>,
    ) -> Result<RatingSummary, CatalogError> {
        let movie_id = parse_movie_id(movie_id)?;
        let movie = self
            .movies
            .find_by_id(movie_id)
            .await?
            .filter(|m| m.status == MovieStatus::Public)
            .ok_or_else(|| CatalogError::not_found("Movie not found!"))?;

        let review = Review {
            id: Uuid::now_v7(),
            owner_id,
            movie_id: movie.id,
            rating,
            content: normalize_content(content),
            created_at: Utc::now(),
        };
        self.reviews.create(&review).await?;
        self.ratings.average_rating(movie.id).await
    }
}

// ── UpdateReview ─────────────────────────────────────────────────────────────

pub struct UpdateReviewUseCase<R: ReviewRepository> {
    pub reviews: R,
}

impl<R: ReviewRepository> UpdateReviewUseCase<R> {
    /// Only the review's owner may edit it; anyone else gets `NotFound`.
    pub async fn execute(
        &self,
        owner_id: Uuid,
        review_id: &str,
        rating: Rating,
        content: Option<String>,
    ) -> Result<(), CatalogError> {
        let review_id = parse_review_id(review_id)?;
        let review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .filter(|r| r.owner_id == owner_id)
            .ok_or_else(|| CatalogError::not_found("Review not found!"))?;
        let content = normalize_content(content);
        self.reviews
            .update(review.id, rating, content.as_deref())
            .await
    }
}

// ── RemoveReview ─────────────────────────────────────────────────────────────

pub struct RemoveReviewUseCase<R: ReviewRepository> {
    pub reviews: R,
}

impl<R: ReviewRepository> RemoveReviewUseCase<R> {
    pub async fn execute(&self, owner_id: Uuid, review_id: &str) -> Result<(), CatalogError> {
        let review_id = parse_review_id(review_id)?;
        let review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .filter(|r| r.owner_id == owner_id)
            .ok_or_else(|| CatalogError::not_found("Invalid request, review not found!"))?;
        self.reviews.delete(review.id).await?;
        Ok(())
    }
}

// ── GetReviewsByMovie ────────────────────────────────────────────────────────

pub struct MovieReviews {
    pub title: String,
    pub reviews: Vec<ReviewWithOwner>,
}

pub struct GetReviewsByMovieUseCase<M: MovieRepository, R: ReviewRepository> {
    pub movies: M,
    pub reviews: R,
}

impl<M: MovieRepository, R: ReviewRepository> GetReviewsByMovieUseCase<M, R> {
    pub async fn execute(&self, movie_id: &str) -> Result<MovieReviews, CatalogError> {
        let movie_id = parse_movie_id(movie_id)?;
        let movie = self
            .movies
            .find_by_id(movie_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Movie not found!"))?;
        let reviews = self.reviews.list_by_movie(movie.id).await?;
        Ok(MovieReviews {
            title: movie.title,
            reviews,
        })
    }
}
