//! Per-movie rating summaries and the rankings built on them.

use uuid::Uuid;

use reelhouse_domain::rating::RatingSummary;

use crate::domain::repository::RatingRepository;
use crate::domain::types::MovieCard;
use crate::error::CatalogError;

/// Default size of the top-rated and related lists.
pub const RANKING_LIMIT: u64 = 5;

/// A listing row enriched with its rating summary.
#[derive(Debug, Clone)]
pub struct RatedMovie {
    pub movie: MovieCard,
    pub reviews: RatingSummary,
}

pub struct RatingAggregator<R: RatingRepository> {
    pub repo: R,
}

impl<R: RatingRepository> RatingAggregator<R> {
    /// Mean rating to one decimal plus review count. A movie without
    /// reviews yields the empty summary.
    pub async fn average_rating(&self, movie_id: Uuid) -> Result<RatingSummary, CatalogError> {
        let stats = self.repo.stats(movie_id).await?;
        Ok(RatingSummary::from_stats(stats.mean, stats.count))
    }

    /// Public movies of `kind` that have reviews, most reviewed first.
    pub async fn top_rated(&self, kind: &str, limit: u64) -> Result<Vec<RatedMovie>, CatalogError> {
        let movies = self.repo.most_reviewed(kind, limit).await?;
        self.enrich(movies).await
    }

    /// Movies sharing a tag with `tags`, never including `exclude`.
    pub async fn related_movies(
        &self,
        tags: &[String],
        exclude: Uuid,
        limit: u64,
    ) -> Result<Vec<RatedMovie>, CatalogError> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }
        let movies = self.repo.sharing_tags(tags, exclude, limit).await?;
        self.enrich(movies).await
    }

    async fn enrich(&self, movies: Vec<MovieCard>) -> Result<Vec<RatedMovie>, CatalogError> {
        let mut rated = Vec::with_capacity(movies.len());
        for movie in movies {
            let reviews = self.average_rating(movie.id).await?;
            rated.push(RatedMovie { movie, reviews });
        }
        Ok(rated)
    }
}
