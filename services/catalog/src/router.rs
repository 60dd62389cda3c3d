use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post},
};

use reelhouse_core::error::not_found;
use reelhouse_core::middleware::with_http_layers;

use crate::handlers::{
    actor::{
        create_actor, get_actor, latest_actors, list_actors, remove_actor, search_actors,
        update_actor,
    },
    admin::{app_info, most_rated},
    health::{healthz, readyz},
    movie::{
        create_movie, get_movie, get_movie_for_update, latest_movies, list_movies, related_movies,
        remove_movie, search_movies, search_public_movies, top_rated_movies, update_movie,
        upload_trailer,
    },
    review::{add_review, get_reviews_by_movie, remove_review, update_review},
    user::{
        create_user, forgot_password, is_auth, reset_password, resend_verification, sign_in,
        verify_email, verify_reset_token,
    },
};
use crate::middleware::{authenticate, require_admin};
use crate::state::AppState;

/// Trailer forms carry a full video file.
const TRAILER_BODY_LIMIT: usize = 100 * 1024 * 1024;
/// Forms carrying a poster or avatar image.
const IMAGE_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Routes that need a signed-in user. Layers run bottom-up, so
/// authentication wraps everything added before it.
fn signed_in(state: &AppState, routes: Router<AppState>) -> Router<AppState> {
    routes.route_layer(from_fn_with_state(state.clone(), authenticate))
}

/// Routes that need a signed-in admin.
fn admin_only(state: &AppState, routes: Router<AppState>) -> Router<AppState> {
    signed_in(state, routes.route_layer(from_fn(require_admin)))
}

fn user_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/create", post(create_user))
        .route("/sign-in", post(sign_in))
        .route("/verify-email", post(verify_email))
        .route("/resend-email-verification-token", post(resend_verification))
        .route("/forgot-password", post(forgot_password))
        .route("/verify-password-reset-token", post(verify_reset_token))
        .route("/reset-password", post(reset_password))
        .merge(signed_in(state, Router::new().route("/is-auth", get(is_auth))))
}

fn actor_routes(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route(
            "/create",
            post(create_actor).layer(DefaultBodyLimit::max(IMAGE_BODY_LIMIT)),
        )
        .route(
            "/update/{actor_id}",
            post(update_actor).layer(DefaultBodyLimit::max(IMAGE_BODY_LIMIT)),
        )
        .route("/{actor_id}", delete(remove_actor).fallback(not_found))
        .route("/search", get(search_actors))
        .route("/actors", get(list_actors));
    Router::new()
        .route("/latest-uploads", get(latest_actors))
        .route("/single/{actor_id}", get(get_actor))
        .merge(admin_only(state, admin))
}

fn movie_routes(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route(
            "/upload-trailer",
            post(upload_trailer).layer(DefaultBodyLimit::max(TRAILER_BODY_LIMIT)),
        )
        .route(
            "/create",
            post(create_movie).layer(DefaultBodyLimit::max(IMAGE_BODY_LIMIT)),
        )
        .route(
            "/update/{movie_id}",
            patch(update_movie).layer(DefaultBodyLimit::max(IMAGE_BODY_LIMIT)),
        )
        .route("/{movie_id}", delete(remove_movie).fallback(not_found))
        .route("/movies", get(list_movies))
        .route("/for-update/{movie_id}", get(get_movie_for_update))
        .route("/search", get(search_movies));
    Router::new()
        .route("/latest-uploads", get(latest_movies))
        .route("/single/{movie_id}", get(get_movie))
        .route("/related/{movie_id}", get(related_movies))
        .route("/top-rated", get(top_rated_movies))
        .route("/search-public", get(search_public_movies))
        .merge(admin_only(state, admin))
}

fn review_routes(state: &AppState) -> Router<AppState> {
    let authed = Router::new()
        .route("/add/{movie_id}", post(add_review))
        .route(
            "/{review_id}",
            patch(update_review)
                .delete(remove_review)
                .fallback(not_found),
        );
    Router::new()
        .route("/get-reviews-by-movie/{movie_id}", get(get_reviews_by_movie))
        .merge(signed_in(state, authed))
}

fn admin_routes(state: &AppState) -> Router<AppState> {
    admin_only(
        state,
        Router::new()
            .route("/app-info", get(app_info))
            .route("/most-rated", get(most_rated)),
    )
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // API
        .nest("/api/user", user_routes(&state))
        .nest("/api/actor", actor_routes(&state))
        .nest("/api/movie", movie_routes(&state))
        .nest("/api/review", review_routes(&state))
        .nest("/api/admin", admin_routes(&state))
        .fallback(not_found)
        .with_state(state);
    with_http_layers(router)
}
