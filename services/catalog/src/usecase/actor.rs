use chrono::Utc;
use uuid::Uuid;

use reelhouse_domain::pagination::PageRequest;

use crate::domain::repository::{ActorRepository, MediaGateway};
use crate::domain::types::{Actor, AssetKind, Outcome, Upload};
use crate::error::CatalogError;
use crate::usecase::media::discard_asset;

/// Number of actors returned by `latest-uploads`.
pub const LATEST_ACTORS_LIMIT: u64 = 12;

pub fn parse_actor_id(raw: &str) -> Result<Uuid, CatalogError> {
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::invalid("Invalid request"))
}

pub struct ActorInput {
    pub name: String,
    pub about: String,
    pub gender: String,
    pub avatar: Option<Upload>,
}

impl ActorInput {
    fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::invalid("Actor name is missing!"));
        }
        if self.about.trim().is_empty() {
            return Err(CatalogError::invalid("About is a required field!"));
        }
        if self.gender.trim().is_empty() {
            return Err(CatalogError::invalid("Gender is a required field!"));
        }
        if self.avatar.as_ref().is_some_and(|a| !a.is_image()) {
            return Err(CatalogError::invalid("Only image files are supported!"));
        }
        Ok(())
    }
}

// ── CreateActor ──────────────────────────────────────────────────────────────

pub struct CreateActorUseCase<R: ActorRepository, M: MediaGateway> {
    pub repo: R,
    pub media: M,
}

impl<R: ActorRepository, M: MediaGateway> CreateActorUseCase<R, M> {
    pub async fn execute(&self, input: ActorInput) -> Result<Actor, CatalogError> {
        input.validate()?;
        let avatar = match &input.avatar {
            Some(file) => Some(self.media.upload(file, AssetKind::Avatar).await?),
            None => None,
        };
        let actor = Actor {
            id: Uuid::now_v7(),
            name: input.name.trim().to_owned(),
            about: input.about.trim().to_owned(),
            gender: input.gender.trim().to_owned(),
            avatar,
            created_at: Utc::now(),
        };
        self.repo.create(&actor).await?;
        Ok(actor)
    }
}

// ── UpdateActor ──────────────────────────────────────────────────────────────

pub struct UpdateActorUseCase<R: ActorRepository, M: MediaGateway> {
    pub repo: R,
    pub media: M,
}

impl<R: ActorRepository, M: MediaGateway> UpdateActorUseCase<R, M> {
    /// A new avatar is stored before the row is written. The old one is
    /// removed best-effort afterwards.
    pub async fn execute(
        &self,
        actor_id: &str,
        input: ActorInput,
    ) -> Result<Outcome<Actor>, CatalogError> {
        let actor_id = parse_actor_id(actor_id)?;
        input.validate()?;
        let mut actor = self
            .repo
            .find_by_id(actor_id)
            .await?
            .ok_or_else(|| CatalogError::invalid("Invalid request, record not found"))?;

        let mut replaced = None;
        let mut uploaded = None;
        if let Some(file) = &input.avatar {
            let asset = self.media.upload(file, AssetKind::Avatar).await?;
            uploaded = Some(asset.clone());
            replaced = actor.avatar.replace(asset);
        }
        actor.name = input.name.trim().to_owned();
        actor.about = input.about.trim().to_owned();
        actor.gender = input.gender.trim().to_owned();

        if let Err(e) = self.repo.update(&actor).await {
            if let Some(asset) = &uploaded {
                discard_asset(&self.media, asset, AssetKind::Avatar).await;
            }
            return Err(e);
        }
        let warning = match &replaced {
            Some(old) => discard_asset(&self.media, old, AssetKind::Avatar).await,
            None => None,
        };
        Ok(Outcome {
            value: actor,
            warning,
        })
    }
}

// ── RemoveActor ──────────────────────────────────────────────────────────────

pub struct RemoveActorUseCase<R: ActorRepository, M: MediaGateway> {
    pub repo: R,
    pub media: M,
}

impl<R: ActorRepository, M: MediaGateway> RemoveActorUseCase<R, M> {
    pub async fn execute(&self, actor_id: &str) -> Result<Outcome<()>, CatalogError> {
        let actor_id = parse_actor_id(actor_id)?;
        let actor = self
            .repo
            .find_by_id(actor_id)
            .await?
            .ok_or_else(|| CatalogError::invalid("Invalid request, record not found"))?;

        self.repo.delete(actor.id).await?;
        let warning = match &actor.avatar {
            Some(avatar) => discard_asset(&self.media, avatar, AssetKind::Avatar).await,
            None => None,
        };
        Ok(Outcome { value: (), warning })
    }
}

// ── Queries ──────────────────────────────────────────────────────────────────

pub struct SearchActorsUseCase<R: ActorRepository> {
    pub repo: R,
}

impl<R: ActorRepository> SearchActorsUseCase<R> {
    pub async fn execute(&self, name: &str) -> Result<Vec<Actor>, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::invalid("Invalid request!"));
        }
        self.repo.search_by_name(name).await
    }
}

pub struct LatestActorsUseCase<R: ActorRepository> {
    pub repo: R,
}

impl<R: ActorRepository> LatestActorsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Actor>, CatalogError> {
        self.repo.latest(LATEST_ACTORS_LIMIT).await
    }
}

pub struct GetActorUseCase<R: ActorRepository> {
    pub repo: R,
}

impl<R: ActorRepository> GetActorUseCase<R> {
    pub async fn execute(&self, actor_id: &str) -> Result<Actor, CatalogError> {
        let actor_id = parse_actor_id(actor_id)?;
        self.repo
            .find_by_id(actor_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Invalid request, actor not found!"))
    }
}

pub struct ListActorsUseCase<R: ActorRepository> {
    pub repo: R,
}

impl<R: ActorRepository> ListActorsUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Actor>, CatalogError> {
        self.repo.list(page.clamped()).await
    }
}
