use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use reelhouse_domain::movie::{DEFAULT_MOVIE_TYPE, MovieStatus, is_known_genre};
use reelhouse_domain::pagination::PageRequest;
use reelhouse_domain::rating::RatingSummary;

use crate::domain::repository::{ActorRepository, MediaGateway, MovieRepository, RatingRepository};
use crate::domain::types::{Actor, AssetKind, CastMember, MediaAsset, Movie, Outcome, Upload};
use crate::error::CatalogError;
use crate::usecase::media::{discard_asset, merge_warnings};
use crate::usecase::rating::{RANKING_LIMIT, RatedMovie, RatingAggregator};

/// Default size of the public `latest-uploads` list.
pub const LATEST_MOVIES_LIMIT: u64 = 5;

pub fn parse_movie_id(raw: &str) -> Result<Uuid, CatalogError> {
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::invalid("Invalid Movie Id"))
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Movie fields as submitted, before validation. Ids are still raw strings.
#[derive(Debug, Clone, Default)]
pub struct MovieInput {
    pub title: String,
    pub story_line: String,
    pub director: Option<String>,
    pub writers: Vec<String>,
    pub cast: Vec<CastInput>,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    pub release_date: String,
    pub status: String,
    pub kind: String,
    pub language: String,
    pub trailer: Option<TrailerInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastInput {
    pub actor: String,
    pub role_as: String,
    #[serde(default)]
    pub lead_actor: bool,
}

/// Trailer previously stored through `upload-trailer`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrailerInput {
    pub url: String,
    pub public_id: String,
}

/// Validated movie fields, shared by create and update.
struct MovieFields {
    title: String,
    story_line: String,
    director_id: Option<Uuid>,
    writers: Vec<Uuid>,
    cast: Vec<CastMember>,
    genres: Vec<String>,
    tags: Vec<String>,
    release_date: NaiveDate,
    status: MovieStatus,
    kind: String,
    language: String,
    trailer: Option<MediaAsset>,
}

fn required(value: &str, message: &str) -> Result<String, CatalogError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CatalogError::invalid(message));
    }
    Ok(value.to_owned())
}

fn parse_ref(raw: &str, message: &str) -> Result<Uuid, CatalogError> {
    raw.trim().parse().map_err(|_| CatalogError::invalid(message))
}

impl MovieInput {
    fn validate(self) -> Result<MovieFields, CatalogError> {
        let title = required(&self.title, "Movie title is missing!")?;
        let story_line = required(&self.story_line, "Storyline is important!")?;
        let language = required(&self.language, "Language is missing!")?;
        let kind = required(&self.kind, "Movie type is missing!")?;
        let status = self
            .status
            .trim()
            .parse::<MovieStatus>()
            .map_err(|_| CatalogError::invalid("Movie status must be public or private!"))?;
        let release_date = NaiveDate::parse_from_str(self.release_date.trim(), "%Y-%m-%d")
            .map_err(|_| CatalogError::invalid("Release date is missing!"))?;

        if self.genres.iter().any(|g| !is_known_genre(g)) {
            return Err(CatalogError::invalid("Invalid genres!"));
        }
        let tags: Vec<String> = self
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .collect();

        let director_id = match self.director.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(parse_ref(raw, "invalid director id")?),
            _ => None,
        };
        let writers = self
            .writers
            .iter()
            .map(|w| parse_ref(w, "invalid writer id"))
            .collect::<Result<Vec<_>, _>>()?;
        let cast = self
            .cast
            .iter()
            .map(|c| {
                Ok(CastMember {
                    id: Uuid::now_v7(),
                    actor_id: parse_ref(&c.actor, "Invalid cast id!")?,
                    role_as: required(&c.role_as, "Role as is missing!")?,
                    lead_actor: c.lead_actor,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let trailer = match self.trailer {
            Some(t) => Some(MediaAsset {
                url: required(&t.url, "Trailer url is missing!")?,
                public_id: required(&t.public_id, "Trailer public_id is missing!")?,
                responsive: Vec::new(),
            }),
            None => None,
        };

        Ok(MovieFields {
            title,
            story_line,
            director_id,
            writers,
            cast,
            genres: self.genres,
            tags,
            release_date,
            status,
            kind,
            language,
            trailer,
        })
    }
}

fn check_poster(poster: Option<&Upload>) -> Result<(), CatalogError> {
    if poster.is_some_and(|p| !p.is_image()) {
        return Err(CatalogError::invalid("Only image files are supported!"));
    }
    Ok(())
}

/// Every referenced actor must exist at write time.
async fn ensure_actors_exist<A: ActorRepository>(
    actors: &A,
    movie: &Movie,
) -> Result<(), CatalogError> {
    let refs = movie.actor_refs();
    if refs.is_empty() {
        return Ok(());
    }
    let found = actors.find_many(&refs).await?;
    if found.len() != refs.len() {
        return Err(CatalogError::invalid("Invalid request, actor not found!"));
    }
    Ok(())
}

// ── CreateMovie ──────────────────────────────────────────────────────────────

pub struct CreateMovieUseCase<R: MovieRepository, A: ActorRepository, M: MediaGateway> {
    pub repo: R,
    pub actors: A,
    pub media: M,
}

impl<R: MovieRepository, A: ActorRepository, M: MediaGateway> CreateMovieUseCase<R, A, M> {
    pub async fn execute(
        &self,
        input: MovieInput,
        poster: Option<Upload>,
    ) -> Result<Movie, CatalogError> {
        let fields = input.validate()?;
        check_poster(poster.as_ref())?;

        let mut movie = Movie {
            id: Uuid::now_v7(),
            title: fields.title,
            story_line: fields.story_line,
            director_id: fields.director_id,
            writers: fields.writers,
            cast: fields.cast,
            release_date: fields.release_date,
            status: fields.status,
            kind: fields.kind,
            genres: fields.genres,
            tags: fields.tags,
            language: fields.language,
            poster: None,
            trailer: fields.trailer,
            created_at: Utc::now(),
        };
        ensure_actors_exist(&self.actors, &movie).await?;

        if let Some(file) = &poster {
            movie.poster = Some(self.media.upload(file, AssetKind::Poster).await?);
        }
        if let Err(e) = self.repo.create(&movie).await {
            // Do not leave an orphaned poster behind a failed insert.
            if let Some(uploaded) = &movie.poster {
                discard_asset(&self.media, uploaded, AssetKind::Poster).await;
            }
            return Err(e);
        }
        Ok(movie)
    }
}

// ── UpdateMovie ──────────────────────────────────────────────────────────────

pub struct UpdateMovieUseCase<R: MovieRepository, A: ActorRepository, M: MediaGateway> {
    pub repo: R,
    pub actors: A,
    pub media: M,
}

impl<R: MovieRepository, A: ActorRepository, M: MediaGateway> UpdateMovieUseCase<R, A, M> {
    /// Replaces every field. A new poster is stored first; the assets it
    /// replaces are removed best-effort once the row is written.
    pub async fn execute(
        &self,
        movie_id: &str,
        input: MovieInput,
        poster: Option<Upload>,
    ) -> Result<Outcome<Movie>, CatalogError> {
        let movie_id = parse_movie_id(movie_id)?;
        let mut movie = self
            .repo
            .find_by_id(movie_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Movie not found"))?;
        let fields = input.validate()?;
        check_poster(poster.as_ref())?;

        movie.title = fields.title;
        movie.story_line = fields.story_line;
        movie.director_id = fields.director_id;
        movie.writers = fields.writers;
        movie.cast = fields.cast;
        movie.release_date = fields.release_date;
        movie.status = fields.status;
        movie.kind = fields.kind;
        movie.genres = fields.genres;
        movie.tags = fields.tags;
        movie.language = fields.language;
        ensure_actors_exist(&self.actors, &movie).await?;

        let mut replaced = Vec::new();
        let mut uploaded = None;
        if let Some(file) = &poster {
            let asset = self.media.upload(file, AssetKind::Poster).await?;
            uploaded = Some(asset.clone());
            if let Some(old) = movie.poster.replace(asset) {
                replaced.push((old, AssetKind::Poster));
            }
        }
        if let Some(trailer) = fields.trailer {
            let changed = movie
                .trailer
                .as_ref()
                .is_none_or(|old| old.public_id != trailer.public_id);
            if changed {
                if let Some(old) = movie.trailer.replace(trailer) {
                    replaced.push((old, AssetKind::Trailer));
                }
            }
        }

        // The row keeps pointing at the old assets until the write lands.
        if let Err(e) = self.repo.update(&movie).await {
            if let Some(asset) = &uploaded {
                discard_asset(&self.media, asset, AssetKind::Poster).await;
            }
            return Err(e);
        }

        let mut warnings = Vec::with_capacity(replaced.len());
        for (old, kind) in &replaced {
            warnings.push(discard_asset(&self.media, old, *kind).await);
        }
        Ok(Outcome {
            value: movie,
            warning: merge_warnings(warnings),
        })
    }
}

// ── RemoveMovie ──────────────────────────────────────────────────────────────

pub struct RemoveMovieUseCase<R: MovieRepository, M: MediaGateway> {
    pub repo: R,
    pub media: M,
}

impl<R: MovieRepository, M: MediaGateway> RemoveMovieUseCase<R, M> {
    /// Poster and trailer are removed best-effort when present. A movie
    /// without a trailer is deleted all the same.
    pub async fn execute(&self, movie_id: &str) -> Result<Outcome<()>, CatalogError> {
        let movie_id = parse_movie_id(movie_id)?;
        let movie = self
            .repo
            .find_by_id(movie_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Movie not found"))?;

        self.repo.delete(movie.id).await?;
        let mut warnings = Vec::new();
        if let Some(poster) = &movie.poster {
            warnings.push(discard_asset(&self.media, poster, AssetKind::Poster).await);
        }
        if let Some(trailer) = &movie.trailer {
            warnings.push(discard_asset(&self.media, trailer, AssetKind::Trailer).await);
        }
        Ok(Outcome {
            value: (),
            warning: merge_warnings(warnings),
        })
    }
}

// ── Populated views ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CastEntry {
    pub member: CastMember,
    pub actor: Actor,
}

/// A movie with its actor references resolved. References to actors that
/// no longer exist are dropped.
#[derive(Debug, Clone)]
pub struct MovieDetails {
    pub movie: Movie,
    pub director: Option<Actor>,
    pub writers: Vec<Actor>,
    pub cast: Vec<CastEntry>,
}

async fn populate<A: ActorRepository>(
    actors: &A,
    movie: Movie,
) -> Result<MovieDetails, CatalogError> {
    let refs = movie.actor_refs();
    let by_id: HashMap<Uuid, Actor> = if refs.is_empty() {
        HashMap::new()
    } else {
        actors
            .find_many(&refs)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect()
    };

    let director = movie.director_id.and_then(|id| by_id.get(&id).cloned());
    let writers = movie
        .writers
        .iter()
        .filter_map(|id| by_id.get(id).cloned())
        .collect();
    let cast = movie
        .cast
        .iter()
        .filter_map(|member| {
            by_id.get(&member.actor_id).map(|actor| CastEntry {
                member: member.clone(),
                actor: actor.clone(),
            })
        })
        .collect();
    Ok(MovieDetails {
        movie,
        director,
        writers,
        cast,
    })
}

pub struct GetMovieForUpdateUseCase<R: MovieRepository, A: ActorRepository> {
    pub repo: R,
    pub actors: A,
}

impl<R: MovieRepository, A: ActorRepository> GetMovieForUpdateUseCase<R, A> {
    pub async fn execute(&self, movie_id: &str) -> Result<MovieDetails, CatalogError> {
        let movie_id = parse_movie_id(movie_id)?;
        let movie = self
            .repo
            .find_by_id(movie_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Movie not found"))?;
        populate(&self.actors, movie).await
    }
}

pub struct GetMovieUseCase<R: MovieRepository, A: ActorRepository, G: RatingRepository> {
    pub repo: R,
    pub actors: A,
    pub ratings: RatingAggregator<G>,
}

impl<R: MovieRepository, A: ActorRepository, G: RatingRepository> GetMovieUseCase<R, A, G> {
    pub async fn execute(
        &self,
        movie_id: &str,
    ) -> Result<(MovieDetails, RatingSummary), CatalogError> {
        let movie_id = parse_movie_id(movie_id)?;
        let movie = self
            .repo
            .find_by_id(movie_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Movie not found"))?;
        let details = populate(&self.actors, movie).await?;
        let reviews = self.ratings.average_rating(movie_id).await?;
        Ok((details, reviews))
    }
}

// ── Listings ─────────────────────────────────────────────────────────────────

pub struct ListMoviesUseCase<R: MovieRepository> {
    pub repo: R,
}

impl<R: MovieRepository> ListMoviesUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Movie>, CatalogError> {
        self.repo.list(page.clamped()).await
    }
}

pub struct SearchMoviesUseCase<R: MovieRepository> {
    pub repo: R,
}

impl<R: MovieRepository> SearchMoviesUseCase<R> {
    /// Admin search over every movie regardless of status.
    pub async fn execute(&self, title: &str) -> Result<Vec<Movie>, CatalogError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CatalogError::invalid("Invalid request!"));
        }
        self.repo.search_by_title(title, false).await
    }
}

pub struct SearchPublicMoviesUseCase<R: MovieRepository, G: RatingRepository> {
    pub repo: R,
    pub ratings: RatingAggregator<G>,
}

impl<R: MovieRepository, G: RatingRepository> SearchPublicMoviesUseCase<R, G> {
    pub async fn execute(&self, title: &str) -> Result<Vec<(Movie, RatingSummary)>, CatalogError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CatalogError::invalid("Invalid request!"));
        }
        let movies = self.repo.search_by_title(title, true).await?;
        let mut results = Vec::with_capacity(movies.len());
        for movie in movies {
            let reviews = self.ratings.average_rating(movie.id).await?;
            results.push((movie, reviews));
        }
        Ok(results)
    }
}

pub struct LatestMoviesUseCase<R: MovieRepository> {
    pub repo: R,
}

impl<R: MovieRepository> LatestMoviesUseCase<R> {
    pub async fn execute(&self, limit: Option<u64>) -> Result<Vec<Movie>, CatalogError> {
        let limit = limit.unwrap_or(LATEST_MOVIES_LIMIT).clamp(1, 100);
        self.repo.latest_public(limit).await
    }
}

// ── Rankings ─────────────────────────────────────────────────────────────────

pub struct RelatedMoviesUseCase<R: MovieRepository, G: RatingRepository> {
    pub repo: R,
    pub ratings: RatingAggregator<G>,
}

impl<R: MovieRepository, G: RatingRepository> RelatedMoviesUseCase<R, G> {
    pub async fn execute(&self, movie_id: &str) -> Result<Vec<RatedMovie>, CatalogError> {
        let movie_id = parse_movie_id(movie_id)?;
        let movie = self
            .repo
            .find_by_id(movie_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Movie not found"))?;
        self.ratings
            .related_movies(&movie.tags, movie.id, RANKING_LIMIT)
            .await
    }
}

pub struct TopRatedMoviesUseCase<G: RatingRepository> {
    pub ratings: RatingAggregator<G>,
}

impl<G: RatingRepository> TopRatedMoviesUseCase<G> {
    /// `kind` defaults to "Short Film" when absent or blank.
    pub async fn execute(&self, kind: Option<&str>) -> Result<Vec<RatedMovie>, CatalogError> {
        let kind = kind
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .unwrap_or(DEFAULT_MOVIE_TYPE);
        self.ratings.top_rated(kind, RANKING_LIMIT).await
    }
}
