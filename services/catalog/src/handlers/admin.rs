use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use reelhouse_domain::rating::RatingSummary;

use crate::error::CatalogError;
use crate::handlers::form::query_params;
use crate::handlers::movie::TypeQuery;
use crate::state::AppState;
use crate::usecase::admin::AppInfoUseCase;
use crate::usecase::movie::TopRatedMoviesUseCase;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfoResponse {
    pub movie_count: u64,
    pub review_count: u64,
    pub user_count: u64,
}

#[derive(Serialize)]
pub struct MostRatedResponse {
    pub id: Uuid,
    pub title: String,
    pub reviews: RatingSummary,
}

// ── GET /api/admin/app-info ──────────────────────────────────────────────────

pub async fn app_info(State(state): State<AppState>) -> Result<impl IntoResponse, CatalogError> {
    let usecase = AppInfoUseCase {
        movies: state.movie_repo(),
        reviews: state.review_repo(),
        users: state.user_repo(),
    };
    let info = usecase.execute().await?;
    Ok(Json(json!({
        "appInfo": AppInfoResponse {
            movie_count: info.movie_count,
            review_count: info.review_count,
            user_count: info.user_count,
        }
    })))
}

// ── GET /api/admin/most-rated ────────────────────────────────────────────────

pub async fn most_rated(
    State(state): State<AppState>,
    query: Result<Query<TypeQuery>, QueryRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let query = query_params(query)?;
    let usecase = TopRatedMoviesUseCase {
        ratings: state.ratings(),
    };
    let movies: Vec<MostRatedResponse> = usecase
        .execute(query.kind.as_deref())
        .await?
        .into_iter()
        .map(|rated| MostRatedResponse {
            id: rated.movie.id,
            title: rated.movie.title,
            reviews: rated.reviews,
        })
        .collect();
    Ok(Json(json!({ "movies": movies })))
}
