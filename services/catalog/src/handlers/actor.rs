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
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reelhouse_domain::pagination::PageRequest;

use crate::domain::types::Actor;
use crate::error::CatalogError;
use crate::handlers::form::{FormData, query_params};
use crate::state::AppState;
use crate::usecase::actor::{
    ActorInput, CreateActorUseCase, GetActorUseCase, LatestActorsUseCase, ListActorsUseCase,
    RemoveActorUseCase, SearchActorsUseCase, UpdateActorUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ActorResponse {
    pub id: Uuid,
    pub name: String,
    pub about: String,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl From<Actor> for ActorResponse {
    fn from(actor: Actor) -> Self {
        Self {
            id: actor.id,
            name: actor.name,
            about: actor.about,
            gender: actor.gender,
            avatar: actor.avatar.map(|a| a.url),
        }
    }
}

#[derive(Serialize)]
pub struct ActorEnvelope {
    pub actor: ActorResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub name: String,
}

fn actor_input(mut form: FormData) -> ActorInput {
    ActorInput {
        name: form.text("name"),
        about: form.text("about"),
        gender: form.text("gender"),
        avatar: form.take_file("avatar"),
    }
}

// ── POST /api/actor/create ───────────────────────────────────────────────────

pub async fn create_actor(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let form = FormData::read(multipart).await?;
    let usecase = CreateActorUseCase {
        repo: state.actor_repo(),
        media: state.media(),
    };
    let actor = usecase.execute(actor_input(form)).await?;
    tracing::info!(actor_id = %actor.id, "actor created");
    Ok((
        StatusCode::CREATED,
        Json(ActorEnvelope {
            actor: actor.into(),
            warning: None,
        }),
    ))
}

// ── POST /api/actor/update/{actor_id} ────────────────────────────────────────

pub async fn update_actor(
    State(state): State<AppState>,
    Path(actor_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let form = FormData::read(multipart).await?;
    let usecase = UpdateActorUseCase {
        repo: state.actor_repo(),
        media: state.media(),
    };
    let outcome = usecase.execute(&actor_id, actor_input(form)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ActorEnvelope {
            actor: outcome.value.into(),
            warning: outcome.warning,
        }),
    ))
}

// ── DELETE /api/actor/{actor_id} ─────────────────────────────────────────────

pub async fn remove_actor(
    State(state): State<AppState>,
    Path(actor_id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let usecase = RemoveActorUseCase {
        repo: state.actor_repo(),
        media: state.media(),
    };
    let outcome = usecase.execute(&actor_id).await?;
    Ok(Json(MessageResponse {
        message: "Record removed successfully",
        warning: outcome.warning,
    }))
}

// ── GET /api/actor/search ────────────────────────────────────────────────────

pub async fn search_actors(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let query = query_params(query)?;
    let usecase = SearchActorsUseCase {
        repo: state.actor_repo(),
    };
    let results: Vec<ActorResponse> = usecase
        .execute(&query.name)
        .await?
        .into_iter()
        .map(ActorResponse::from)
        .collect();
    Ok(Json(serde_json::json!({ "results": results })))
}

// ── GET /api/actor/latest-uploads ────────────────────────────────────────────

pub async fn latest_actors(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, CatalogError> {
    let usecase = LatestActorsUseCase {
        repo: state.actor_repo(),
    };
    let actors: Vec<ActorResponse> = usecase
        .execute()
        .await?
        .into_iter()
        .map(ActorResponse::from)
        .collect();
    Ok(Json(actors))
}

// ── GET /api/actor/single/{id} ───────────────────────────────────────────────

pub async fn get_actor(
    State(state): State<AppState>,
    Path(actor_id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let usecase = GetActorUseCase {
        repo: state.actor_repo(),
    };
    let actor = usecase.execute(&actor_id).await?;
    Ok(Json(ActorEnvelope {
        actor: actor.into(),
        warning: None,
    }))
}

// ── GET /api/actor/actors ────────────────────────────────────────────────────

pub async fn list_actors(
    State(state): State<AppState>,
    page: Result<Query<PageRequest>, QueryRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let page = query_params(page)?;
    let usecase = ListActorsUseCase {
        repo: state.actor_repo(),
    };
    let profiles: Vec<ActorResponse> = usecase
        .execute(page)
        .await?
        .into_iter()
        .map(ActorResponse::from)
        .collect();
    Ok(Json(serde_json::json!({ "profiles": profiles })))
}
