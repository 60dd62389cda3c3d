use uuid::Uuid;

use reelhouse_catalog::usecase::movie::{RelatedMoviesUseCase, TopRatedMoviesUseCase};
use reelhouse_catalog::usecase::rating::RatingAggregator;
use reelhouse_domain::movie::MovieStatus;
use reelhouse_domain::rating::RatingSummary;

use crate::helpers::{InMemoryCatalog, MockRatingRepo, test_movie};

fn aggregator(catalog: &InMemoryCatalog) -> RatingAggregator<MockRatingRepo> {
    RatingAggregator {
        repo: catalog.rating_repo(),
    }
}

#[tokio::test]
async fn should_average_ratings_to_one_decimal() {
    let catalog = InMemoryCatalog::default();
    let movie = test_movie("Heat", "Film", &["heist"]);
    catalog.add_movie(movie.clone());
    for rating in [4, 5, 3] {
        catalog.add_review(movie.id, rating);
    }

    let summary = aggregator(&catalog).average_rating(movie.id).await.unwrap();
    assert_eq!(summary.rating_avg.as_deref(), Some("4.0"));
    assert_eq!(summary.review_count, Some(3));

    catalog.add_review(movie.id, 5);
    let summary = aggregator(&catalog).average_rating(movie.id).await.unwrap();
    assert_eq!(summary.rating_avg.as_deref(), Some("4.3"));
}

#[tokio::test]
async fn should_return_empty_summary_for_unreviewed_movie() {
    let catalog = InMemoryCatalog::default();
    let summary = aggregator(&catalog)
        .average_rating(Uuid::now_v7())
        .await
        .unwrap();
    assert_eq!(summary, RatingSummary::empty());
    assert_eq!(serde_json::to_value(&summary).unwrap(), serde_json::json!({}));
}

#[tokio::test]
async fn should_rank_public_movies_of_kind_by_review_count() {
    let catalog = InMemoryCatalog::default();
    let few = test_movie("Few", "Film", &[]);
    let many = test_movie("Many", "Film", &[]);
    let unreviewed = test_movie("None", "Film", &[]);
    let other_kind = test_movie("Doc", "Documentary", &[]);
    let mut hidden = test_movie("Hidden", "Film", &[]);
    hidden.status = MovieStatus::Private;
    for movie in [&few, &many, &unreviewed, &other_kind, &hidden] {
        catalog.add_movie(movie.clone());
    }
    catalog.add_review(few.id, 5);
    for rating in [2, 3, 4] {
        catalog.add_review(many.id, rating);
    }
    catalog.add_review(other_kind.id, 5);
    catalog.add_review(hidden.id, 5);

    let ranked = TopRatedMoviesUseCase {
        ratings: aggregator(&catalog),
    }
    .execute(Some("Film"))
    .await
    .unwrap();

    let titles: Vec<&str> = ranked.iter().map(|r| r.movie.title.as_str()).collect();
    assert_eq!(titles, ["Many", "Few"]);
    assert_eq!(ranked[0].reviews.rating_avg.as_deref(), Some("3.0"));
    assert_eq!(ranked[1].reviews.review_count, Some(1));
}

#[tokio::test]
async fn should_break_review_count_ties_by_movie_id() {
    let catalog = InMemoryCatalog::default();
    let mut movies: Vec<_> = (0..3)
        .map(|i| test_movie(&format!("Short {i}"), "Short Film", &[]))
        .collect();
    for movie in &movies {
        catalog.add_movie(movie.clone());
        catalog.add_review(movie.id, 4);
    }

    let ranked = TopRatedMoviesUseCase {
        ratings: aggregator(&catalog),
    }
    .execute(None)
    .await
    .unwrap();

    movies.sort_by_key(|m| m.id);
    let expected: Vec<Uuid> = movies.iter().map(|m| m.id).collect();
    let actual: Vec<Uuid> = ranked.iter().map(|r| r.movie.id).collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn should_limit_top_rated_to_five() {
    let catalog = InMemoryCatalog::default();
    for i in 0..7 {
        let movie = test_movie(&format!("Film {i}"), "Film", &[]);
        catalog.add_movie(movie.clone());
        catalog.add_review(movie.id, 3);
    }
    let ranked = TopRatedMoviesUseCase {
        ratings: aggregator(&catalog),
    }
    .execute(Some(" Film "))
    .await
    .unwrap();
    assert_eq!(ranked.len(), 5);
}

#[tokio::test]
async fn should_relate_movies_by_shared_tags_excluding_self() {
    let catalog = InMemoryCatalog::default();
    let heat = test_movie("Heat", "Film", &["heist", "la"]);
    let ronin = test_movie("Ronin", "Film", &["heist"]);
    let collateral = test_movie("Collateral", "Film", &["la"]);
    let up = test_movie("Up", "Film", &["balloons"]);
    for movie in [&heat, &ronin, &collateral, &up] {
        catalog.add_movie(movie.clone());
    }

    let related = RelatedMoviesUseCase {
        repo: catalog.movie_repo(),
        ratings: aggregator(&catalog),
    }
    .execute(&heat.id.to_string())
    .await
    .unwrap();

    let ids: Vec<Uuid> = related.iter().map(|r| r.movie.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&ronin.id));
    assert!(ids.contains(&collateral.id));
    assert!(!ids.contains(&heat.id));
    assert!(related.iter().all(|r| r.reviews.is_empty()));
}

#[tokio::test]
async fn should_return_no_related_movies_without_tags() {
    let catalog = InMemoryCatalog::default();
    let bare = test_movie("Bare", "Film", &[]);
    catalog.add_movie(bare.clone());
    catalog.add_movie(test_movie("Other", "Film", &["heist"]));

    let related = RelatedMoviesUseCase {
        repo: catalog.movie_repo(),
        ratings: aggregator(&catalog),
    }
    .execute(&bare.id.to_string())
    .await
    .unwrap();
    assert!(related.is_empty());
}
