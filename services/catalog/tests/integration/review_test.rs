use uuid::Uuid;

use reelhouse_catalog::error::CatalogError;
use reelhouse_catalog::usecase::rating::RatingAggregator;
use reelhouse_catalog::usecase::review::{
    AddReviewUseCase, GetReviewsByMovieUseCase, RemoveReviewUseCase, UpdateReviewUseCase,
};
use reelhouse_domain::movie::MovieStatus;
use reelhouse_domain::rating::Rating;

use crate::helpers::{
    InMemoryCatalog, MockMovieRepo, MockRatingRepo, MockReviewRepo, test_movie,
};

fn add(catalog: &InMemoryCatalog) -> AddReviewUseCase<MockMovieRepo, MockReviewRepo, MockRatingRepo> {
    AddReviewUseCase {
        movies: catalog.movie_repo(),
        reviews: catalog.review_repo(),
        ratings: RatingAggregator {
            repo: catalog.rating_repo(),
        },
    }
}

fn rating(value: i64) -> Rating {
    Rating::new(value).unwrap()
}

#[tokio::test]
async fn should_add_review_and_return_refreshed_summary() {
    let catalog = InMemoryCatalog::default();
    let movie = test_movie("Heat", "Film", &[]);
    catalog.add_movie(movie.clone());
    catalog.add_review(movie.id, 2);

    let summary = add(&catalog)
        .execute(
            Uuid::now_v7(),
            &movie.id.to_string(),
            rating(5),
            Some("  Great heist.  ".to_owned()),
        )
        .await
        .unwrap();

    assert_eq!(summary.rating_avg.as_deref(), Some("3.5"));
    assert_eq!(summary.review_count, Some(2));
    let reviews = catalog.reviews.lock().unwrap();
    assert_eq!(reviews[1].content.as_deref(), Some("Great heist."));
}

#[tokio::test]
async fn should_reject_second_review_by_same_user() {
    let catalog = InMemoryCatalog::default();
    let movie = test_movie("Heat", "Film", &[]);
    catalog.add_movie(movie.clone());
    let owner = Uuid::now_v7();

    add(&catalog)
        .execute(owner, &movie.id.to_string(), rating(4), None)
        .await
        .unwrap();
    let err = add(&catalog)
        .execute(owner, &movie.id.to_string(), rating(1), None)
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Conflict(ref m) if m == "Invalid request, review is already there!"));
    assert_eq!(catalog.reviews.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_not_review_private_movie() {
    let catalog = InMemoryCatalog::default();
    let mut movie = test_movie("Draft", "Film", &[]);
    movie.status = MovieStatus::Private;
    catalog.add_movie(movie.clone());

    let err = add(&catalog)
        .execute(Uuid::now_v7(), &movie.id.to_string(), rating(4), None)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(ref m) if m == "Movie not found!"));
}

#[tokio::test]
async fn should_only_let_owner_update_or_remove_review() {
    let catalog = InMemoryCatalog::default();
    let movie = test_movie("Heat", "Film", &[]);
    catalog.add_movie(movie.clone());
    let owner = Uuid::now_v7();
    add(&catalog)
        .execute(owner, &movie.id.to_string(), rating(3), Some("ok".to_owned()))
        .await
        .unwrap();
    let review_id = catalog.reviews.lock().unwrap()[0].id.to_string();

    let updater = UpdateReviewUseCase {
        reviews: catalog.review_repo(),
    };
    let err = updater
        .execute(Uuid::now_v7(), &review_id, rating(1), None)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(ref m) if m == "Review not found!"));

    updater
        .execute(owner, &review_id, rating(5), Some("   ".to_owned()))
        .await
        .unwrap();
    {
        let reviews = catalog.reviews.lock().unwrap();
        assert_eq!(reviews[0].rating.get(), 5);
        assert!(reviews[0].content.is_none());
    }

    let remover = RemoveReviewUseCase {
        reviews: catalog.review_repo(),
    };
    let err = remover
        .execute(Uuid::now_v7(), &review_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
    remover.execute(owner, &review_id).await.unwrap();
    assert!(catalog.reviews.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_malformed_review_id() {
    let catalog = InMemoryCatalog::default();
    let err = RemoveReviewUseCase {
        reviews: catalog.review_repo(),
    }
    .execute(Uuid::now_v7(), "42")
    .await
    .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "Invalid Review ID!"));
}

#[tokio::test]
async fn should_list_reviews_with_owner_names() {
    let catalog = InMemoryCatalog::default();
    let movie = test_movie("Heat", "Film", &[]);
    catalog.add_movie(movie.clone());
    catalog.add_review(movie.id, 4);
    catalog.add_review(movie.id, 2);

    let found = GetReviewsByMovieUseCase {
        movies: catalog.movie_repo(),
        reviews: catalog.review_repo(),
    }
    .execute(&movie.id.to_string())
    .await
    .unwrap();

    assert_eq!(found.title, "Heat");
    assert_eq!(found.reviews.len(), 2);
    assert!(found.reviews.iter().all(|r| r.owner_name == "Reviewer"));

    let err = GetReviewsByMovieUseCase {
        movies: catalog.movie_repo(),
        reviews: catalog.review_repo(),
    }
    .execute(&Uuid::now_v7().to_string())
    .await
    .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}
