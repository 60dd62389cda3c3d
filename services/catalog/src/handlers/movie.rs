use axum::{
    Json,
    extract::{
        Multipart, Path, Query, State,
        multipart::MultipartRejection,
        rejection::QueryRejection,
    },
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use reelhouse_domain::movie::MovieStatus;
use reelhouse_domain::pagination::PageRequest;
use reelhouse_domain::rating::RatingSummary;

use crate::domain::types::{Actor, Movie};
use crate::error::CatalogError;
use crate::handlers::actor::ActorResponse;
use crate::handlers::form::{FormData, query_params};
use crate::state::AppState;
use crate::usecase::media::UploadTrailerUseCase;
use crate::usecase::movie::{
    CreateMovieUseCase, GetMovieForUpdateUseCase, GetMovieUseCase, LatestMoviesUseCase,
    ListMoviesUseCase, MovieDetails, RelatedMoviesUseCase, RemoveMovieUseCase,
    SearchMoviesUseCase, SearchPublicMoviesUseCase, TopRatedMoviesUseCase, UpdateMovieUseCase,
};
use crate::usecase::rating::RatedMovie;

// ── Response types ───────────────────────────────────────────────────────────

/// Row shape of the admin listings.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub id: Uuid,
    pub title: String,
    pub poster: Option<String>,
    pub responsive_posters: Vec<String>,
    pub genres: Vec<String>,
    pub status: MovieStatus,
}

impl From<Movie> for MovieSummary {
    fn from(movie: Movie) -> Self {
        let (poster, responsive_posters) = match movie.poster {
            Some(p) => (Some(p.url), p.responsive),
            None => (None, Vec::new()),
        };
        Self {
            id: movie.id,
            title: movie.title,
            poster,
            responsive_posters,
            genres: movie.genres,
            status: movie.status,
        }
    }
}

/// Ranking row: top-rated, related and public search.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedMovieResponse {
    pub id: Uuid,
    pub title: String,
    pub poster: Option<String>,
    pub responsive_posters: Vec<String>,
    pub reviews: RatingSummary,
}

impl From<RatedMovie> for RatedMovieResponse {
    fn from(rated: RatedMovie) -> Self {
        Self {
            id: rated.movie.id,
            title: rated.movie.title,
            poster: rated.movie.poster,
            responsive_posters: rated.movie.responsive_posters,
            reviews: rated.reviews,
        }
    }
}

#[derive(Serialize)]
pub struct NamedRef {
    pub id: Uuid,
    pub name: String,
}

impl From<&Actor> for NamedRef {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            name: actor.name.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct CastProfile {
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastResponse<P> {
    pub id: Uuid,
    pub profile: P,
    pub role_as: String,
    pub lead_actor: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub id: Uuid,
    pub title: String,
    pub story_line: String,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    pub language: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub release_date: NaiveDate,
    pub cast: Vec<CastResponse<CastProfile>>,
    pub writers: Vec<NamedRef>,
    pub director: Option<NamedRef>,
    pub reviews: RatingSummary,
    pub poster: Option<String>,
    pub responsive_posters: Vec<String>,
    pub trailer: Option<String>,
}

impl MovieResponse {
    fn new(details: MovieDetails, reviews: RatingSummary) -> Self {
        let MovieDetails {
            movie,
            director,
            writers,
            cast,
        } = details;
        let (poster, responsive_posters) = match movie.poster {
            Some(poster) => (Some(poster.url), poster.responsive),
            None => (None, Vec::new()),
        };
        Self {
            id: movie.id,
            title: movie.title,
            story_line: movie.story_line,
            genres: movie.genres,
            tags: movie.tags,
            language: movie.language,
            kind: movie.kind,
            release_date: movie.release_date,
            cast: cast
                .into_iter()
                .map(|entry| CastResponse {
                    id: entry.member.id,
                    profile: CastProfile {
                        id: entry.actor.id,
                        name: entry.actor.name,
                        avatar: entry.actor.avatar.map(|a| a.url),
                    },
                    role_as: entry.member.role_as,
                    lead_actor: entry.member.lead_actor,
                })
                .collect(),
            writers: writers.iter().map(NamedRef::from).collect(),
            director: director.as_ref().map(NamedRef::from),
            reviews,
            poster,
            responsive_posters,
            trailer: movie.trailer.map(|t| t.url),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieForUpdateResponse {
    pub id: Uuid,
    pub title: String,
    pub story_line: String,
    pub poster: Option<String>,
    pub release_date: NaiveDate,
    pub status: MovieStatus,
    #[serde(rename = "type")]
    pub kind: String,
    pub language: String,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    pub director: Option<ActorResponse>,
    pub writers: Vec<ActorResponse>,
    pub cast: Vec<CastResponse<ActorResponse>>,
}

impl From<MovieDetails> for MovieForUpdateResponse {
    fn from(details: MovieDetails) -> Self {
        let MovieDetails {
            movie,
            director,
            writers,
            cast,
        } = details;
        Self {
            id: movie.id,
            title: movie.title,
            story_line: movie.story_line,
            poster: movie.poster.map(|p| p.url),
            release_date: movie.release_date,
            status: movie.status,
            kind: movie.kind,
            language: movie.language,
            genres: movie.genres,
            tags: movie.tags,
            director: director.map(ActorResponse::from),
            writers: writers.into_iter().map(ActorResponse::from).collect(),
            cast: cast
                .into_iter()
                .map(|entry| CastResponse {
                    id: entry.member.id,
                    profile: ActorResponse::from(entry.actor),
                    role_as: entry.member.role_as,
                    lead_actor: entry.member.lead_actor,
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestMovieResponse {
    pub id: Uuid,
    pub title: String,
    pub story_line: String,
    pub poster: Option<String>,
    pub responsive_posters: Vec<String>,
    pub trailer: Option<String>,
}

impl From<Movie> for LatestMovieResponse {
    fn from(movie: Movie) -> Self {
        let (poster, responsive_posters) = match movie.poster {
            Some(p) => (Some(p.url), p.responsive),
            None => (None, Vec::new()),
        };
        Self {
            id: movie.id,
            title: movie.title,
            story_line: movie.story_line,
            poster,
            responsive_posters,
            trailer: movie.trailer.map(|t| t.url),
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct TitleQuery {
    #[serde(default)]
    pub title: String,
}

#[derive(Deserialize)]
pub struct LatestQuery {
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
pub struct TypeQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

// ── POST /api/movie/upload-trailer ───────────────────────────────────────────

pub async fn upload_trailer(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let mut form = FormData::read(multipart).await?;
    let usecase = UploadTrailerUseCase {
        media: state.media(),
    };
    let asset = usecase.execute(form.take_file("video")).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "url": asset.url, "public_id": asset.public_id })),
    ))
}

// ── POST /api/movie/create ───────────────────────────────────────────────────

pub async fn create_movie(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let mut form = FormData::read(multipart).await?;
    let input = form.movie_input()?;
    let poster = form.take_file("poster");
    let usecase = CreateMovieUseCase {
        repo: state.movie_repo(),
        actors: state.actor_repo(),
        media: state.media(),
    };
    let movie = usecase.execute(input, poster).await?;
    tracing::info!(movie_id = %movie.id, "movie created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "movie": { "id": movie.id, "title": movie.title } })),
    ))
}

// ── PATCH /api/movie/update/{movie_id} ───────────────────────────────────────

#[derive(Serialize)]
pub struct UpdatedMovieResponse {
    pub message: &'static str,
    pub movie: UpdatedMovie,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Serialize)]
pub struct UpdatedMovie {
    pub id: Uuid,
    pub title: String,
    pub poster: Option<String>,
    pub genres: Vec<String>,
    pub status: MovieStatus,
}

pub async fn update_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let mut form = FormData::read(multipart).await?;
    let input = form.movie_input()?;
    let poster = form.take_file("poster");
    let usecase = UpdateMovieUseCase {
        repo: state.movie_repo(),
        actors: state.actor_repo(),
        media: state.media(),
    };
    let outcome = usecase.execute(&movie_id, input, poster).await?;
    let movie = outcome.value;
    Ok(Json(UpdatedMovieResponse {
        message: "movie is updated",
        movie: UpdatedMovie {
            id: movie.id,
            title: movie.title,
            poster: movie.poster.map(|p| p.url),
            genres: movie.genres,
            status: movie.status,
        },
        warning: outcome.warning,
    }))
}

// ── DELETE /api/movie/{movie_id} ─────────────────────────────────────────────

pub async fn remove_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let usecase = RemoveMovieUseCase {
        repo: state.movie_repo(),
        media: state.media(),
    };
    let outcome = usecase.execute(&movie_id).await?;
    let mut body = json!({ "message": "Movie deleted successfully" });
    if let Some(warning) = outcome.warning {
        body["warning"] = json!(warning);
    }
    Ok(Json(body))
}

// ── GET /api/movie/movies ────────────────────────────────────────────────────

pub async fn list_movies(
    State(state): State<AppState>,
    page: Result<Query<PageRequest>, QueryRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let page = query_params(page)?;
    let usecase = ListMoviesUseCase {
        repo: state.movie_repo(),
    };
    let movies: Vec<MovieSummary> = usecase
        .execute(page)
        .await?
        .into_iter()
        .map(MovieSummary::from)
        .collect();
    Ok(Json(json!({ "movies": movies })))
}

// ── GET /api/movie/for-update/{movie_id} ─────────────────────────────────────

pub async fn get_movie_for_update(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let usecase = GetMovieForUpdateUseCase {
        repo: state.movie_repo(),
        actors: state.actor_repo(),
    };
    let details = usecase.execute(&movie_id).await?;
    Ok(Json(json!({ "movie": MovieForUpdateResponse::from(details) })))
}

// ── GET /api/movie/search ────────────────────────────────────────────────────

pub async fn search_movies(
    State(state): State<AppState>,
    query: Result<Query<TitleQuery>, QueryRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let query = query_params(query)?;
    let usecase = SearchMoviesUseCase {
        repo: state.movie_repo(),
    };
    let results: Vec<MovieSummary> = usecase
        .execute(&query.title)
        .await?
        .into_iter()
        .map(MovieSummary::from)
        .collect();
    Ok(Json(json!({ "results": results })))
}

// ── GET /api/movie/latest-uploads ────────────────────────────────────────────

pub async fn latest_movies(
    State(state): State<AppState>,
    query: Result<Query<LatestQuery>, QueryRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let query = query_params(query)?;
    let usecase = LatestMoviesUseCase {
        repo: state.movie_repo(),
    };
    let movies: Vec<LatestMovieResponse> = usecase
        .execute(query.limit)
        .await?
        .into_iter()
        .map(LatestMovieResponse::from)
        .collect();
    Ok(Json(json!({ "movies": movies })))
}

// ── GET /api/movie/single/{movie_id} ─────────────────────────────────────────

pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let usecase = GetMovieUseCase {
        repo: state.movie_repo(),
        actors: state.actor_repo(),
        ratings: state.ratings(),
    };
    let (details, reviews) = usecase.execute(&movie_id).await?;
    Ok(Json(json!({ "movie": MovieResponse::new(details, reviews) })))
}

// ── GET /api/movie/related/{movie_id} ────────────────────────────────────────

pub async fn related_movies(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let usecase = RelatedMoviesUseCase {
        repo: state.movie_repo(),
        ratings: state.ratings(),
    };
    let movies: Vec<RatedMovieResponse> = usecase
        .execute(&movie_id)
        .await?
        .into_iter()
        .map(RatedMovieResponse::from)
        .collect();
    Ok(Json(json!({ "movies": movies })))
}

// ── GET /api/movie/top-rated ─────────────────────────────────────────────────

pub async fn top_rated_movies(
    State(state): State<AppState>,
    query: Result<Query<TypeQuery>, QueryRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let query = query_params(query)?;
    let usecase = TopRatedMoviesUseCase {
        ratings: state.ratings(),
    };
    let movies: Vec<RatedMovieResponse> = usecase
        .execute(query.kind.as_deref())
        .await?
        .into_iter()
        .map(RatedMovieResponse::from)
        .collect();
    Ok(Json(json!({ "movies": movies })))
}

// ── GET /api/movie/search-public ─────────────────────────────────────────────

pub async fn search_public_movies(
    State(state): State<AppState>,
    query: Result<Query<TitleQuery>, QueryRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let query = query_params(query)?;
    let usecase = SearchPublicMoviesUseCase {
        repo: state.movie_repo(),
        ratings: state.ratings(),
    };
    let results: Vec<RatedMovieResponse> = usecase
        .execute(&query.title)
        .await?
        .into_iter()
        .map(|(movie, reviews)| {
            let (poster, responsive_posters) = match movie.poster {
                Some(p) => (Some(p.url), p.responsive),
                None => (None, Vec::new()),
            };
            RatedMovieResponse {
                id: movie.id,
                title: movie.title,
                poster,
                responsive_posters,
                reviews,
            }
        })
        .collect();
    Ok(Json(json!({ "results": results })))
}
