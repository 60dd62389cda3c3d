use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use reelhouse_domain::rating::Rating;

use crate::domain::types::ReviewWithOwner;
use crate::error::CatalogError;
use crate::handlers::form::json_body;
use crate::middleware::CurrentUser;
use crate::state::AppState;
use crate::usecase::review::{
    AddReviewUseCase, GetReviewsByMovieUseCase, RemoveReviewUseCase, UpdateReviewUseCase,
    parse_rating,
};

/// Rating is kept as raw JSON so a string or fraction gets the rating
/// message instead of a generic body rejection.
#[derive(Deserialize)]
pub struct ReviewRequest {
    pub rating: Option<serde_json::Value>,
    pub content: Option<String>,
}

#[derive(Serialize)]
pub struct OwnerRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub owner: OwnerRef,
    pub content: Option<String>,
    pub rating: Rating,
}

impl From<ReviewWithOwner> for ReviewResponse {
    fn from(entry: ReviewWithOwner) -> Self {
        Self {
            id: entry.review.id,
            owner: OwnerRef {
                id: entry.review.owner_id,
                name: entry.owner_name,
            },
            content: entry.review.content,
            rating: entry.review.rating,
        }
    }
}

// ── POST /api/review/add/{movie_id} ──────────────────────────────────────────

pub async fn add_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(movie_id): Path<String>,
    body: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let body = json_body(body)?;
    let rating = parse_rating(body.rating.as_ref())?;
    let usecase = AddReviewUseCase {
        movies: state.movie_repo(),
        reviews: state.review_repo(),
        ratings: state.ratings(),
    };
    let reviews = usecase
        .execute(user.id, &movie_id, rating, body.content)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Your review has been added.", "reviews": reviews })),
    ))
}

// ── PATCH /api/review/{review_id} ────────────────────────────────────────────

pub async fn update_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(review_id): Path<String>,
    body: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let body = json_body(body)?;
    let rating = parse_rating(body.rating.as_ref())?;
    let usecase = UpdateReviewUseCase {
        reviews: state.review_repo(),
    };
    usecase
        .execute(user.id, &review_id, rating, body.content)
        .await?;
    Ok(Json(json!({ "message": "Your review has been updated." })))
}

// ── DELETE /api/review/{review_id} ───────────────────────────────────────────

pub async fn remove_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(review_id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let usecase = RemoveReviewUseCase {
        reviews: state.review_repo(),
    };
    usecase.execute(user.id, &review_id).await?;
    Ok(Json(json!({ "message": "Review removed successfully." })))
}

// ── GET /api/review/get-reviews-by-movie/{movie_id} ──────────────────────────

pub async fn get_reviews_by_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let usecase = GetReviewsByMovieUseCase {
        movies: state.movie_repo(),
        reviews: state.review_repo(),
    };
    let found = usecase.execute(&movie_id).await?;
    let reviews: Vec<ReviewResponse> = found.reviews.into_iter().map(ReviewResponse::from).collect();
    Ok(Json(json!({ "movie": { "title": found.title, "reviews": reviews } })))
}
