use bytes::Bytes;

use reelhouse_catalog::domain::types::{MediaAsset, Upload};
use reelhouse_catalog::error::CatalogError;
use reelhouse_catalog::usecase::media::UploadTrailerUseCase;
use reelhouse_catalog::usecase::movie::{
    CastInput, CreateMovieUseCase, GetMovieUseCase, LatestMoviesUseCase, MovieInput,
    RemoveMovieUseCase, SearchMoviesUseCase, SearchPublicMoviesUseCase, TrailerInput,
    UpdateMovieUseCase,
};
use reelhouse_catalog::usecase::rating::RatingAggregator;
use reelhouse_domain::movie::MovieStatus;

use crate::helpers::{
    InMemoryCatalog, MockActorRepo, MockMedia, MockMovieRepo, image_upload, test_actor,
    test_movie,
};

fn input(title: &str) -> MovieInput {
    MovieInput {
        title: title.to_owned(),
        story_line: "Two men on either side of the law.".to_owned(),
        genres: vec!["Crime".to_owned(), "Drama".to_owned()],
        tags: vec!["heist".to_owned(), " ".to_owned()],
        release_date: "1995-12-15".to_owned(),
        status: "public".to_owned(),
        kind: "Film".to_owned(),
        language: "English".to_owned(),
        trailer: Some(TrailerInput {
            url: "https://media.test/trailer-0".to_owned(),
            public_id: "trailer-0".to_owned(),
        }),
        ..MovieInput::default()
    }
}

fn create(
    catalog: &InMemoryCatalog,
    media: &MockMedia,
) -> CreateMovieUseCase<MockMovieRepo, MockActorRepo, MockMedia> {
    CreateMovieUseCase {
        repo: catalog.movie_repo(),
        actors: catalog.actor_repo(),
        media: media.clone(),
    }
}

fn update(
    catalog: &InMemoryCatalog,
    media: &MockMedia,
) -> UpdateMovieUseCase<MockMovieRepo, MockActorRepo, MockMedia> {
    UpdateMovieUseCase {
        repo: catalog.movie_repo(),
        actors: catalog.actor_repo(),
        media: media.clone(),
    }
}

#[tokio::test]
async fn should_create_movie_with_responsive_poster() {
    let catalog = InMemoryCatalog::default();
    let media = MockMedia::default();
    let lead = test_actor("Al Pacino");
    catalog.add_actor(lead.clone());
    let mut movie_input = input("Heat");
    movie_input.director = Some(lead.id.to_string());
    movie_input.cast = vec![CastInput {
        actor: lead.id.to_string(),
        role_as: "Vincent Hanna".to_owned(),
        lead_actor: true,
    }];

    let movie = create(&catalog, &media)
        .execute(movie_input, Some(image_upload()))
        .await
        .unwrap();

    let poster = movie.poster.clone().unwrap();
    assert!(poster.url.starts_with("https://media.test/poster-"));
    assert_eq!(poster.responsive.len(), 2);
    assert_eq!(movie.tags, ["heist"]);
    assert_eq!(movie.status, MovieStatus::Public);

    let stored = catalog.movie(movie.id).unwrap();
    assert_eq!(stored.poster, Some(poster));
    assert_eq!(stored.cast[0].actor_id, lead.id);
    assert!(stored.cast[0].lead_actor);
}

#[tokio::test]
async fn should_reject_unknown_cast_member() {
    let catalog = InMemoryCatalog::default();
    let media = MockMedia::default();
    let mut movie_input = input("Heat");
    movie_input.writers = vec![uuid::Uuid::now_v7().to_string()];

    let err = create(&catalog, &media)
        .execute(movie_input, Some(image_upload()))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "Invalid request, actor not found!"));
    assert!(media.uploaded.lock().unwrap().is_empty());
    assert!(catalog.movies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_unknown_genre_and_bad_status() {
    let catalog = InMemoryCatalog::default();
    let media = MockMedia::default();

    let mut bad_genre = input("Heat");
    bad_genre.genres.push("Space Opera Western".to_owned());
    let err = create(&catalog, &media)
        .execute(bad_genre, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "Invalid genres!"));

    let mut bad_status = input("Heat");
    bad_status.status = "draft".to_owned();
    let err = create(&catalog, &media)
        .execute(bad_status, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(_)));
}

#[tokio::test]
async fn should_reject_non_image_poster() {
    let catalog = InMemoryCatalog::default();
    let media = MockMedia::default();
    let video = Upload {
        file_name: "clip.mp4".to_owned(),
        content_type: "video/mp4".to_owned(),
        bytes: Bytes::from_static(b"mp4"),
    };
    let err = create(&catalog, &media)
        .execute(input("Heat"), Some(video))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "Only image files are supported!"));
}

#[tokio::test]
async fn should_replace_poster_and_remove_old_one() {
    let catalog = InMemoryCatalog::default();
    let media = MockMedia::default();
    let movie = create(&catalog, &media)
        .execute(input("Heat"), Some(image_upload()))
        .await
        .unwrap();
    let old_poster = movie.poster.unwrap().public_id;

    let updated = update(&catalog, &media)
        .execute(&movie.id.to_string(), input("Heat (1995)"), Some(image_upload()))
        .await
        .unwrap();

    assert!(updated.warning.is_none());
    assert_eq!(updated.value.title, "Heat (1995)");
    assert_ne!(updated.value.poster.as_ref().unwrap().public_id, old_poster);
    assert_eq!(media.deleted_ids(), [old_poster]);
    assert_eq!(catalog.movie(movie.id).unwrap().title, "Heat (1995)");
}

#[tokio::test]
async fn should_warn_when_replaced_poster_cannot_be_removed() {
    let catalog = InMemoryCatalog::default();
    let mut movie = test_movie("Heat", "Film", &["heist"]);
    movie.poster = Some(MediaAsset {
        url: "https://media.test/poster-old".to_owned(),
        public_id: "poster-old".to_owned(),
        responsive: Vec::new(),
    });
    catalog.add_movie(movie.clone());
    let media = MockMedia::failing_deletes();

    let updated = update(&catalog, &media)
        .execute(&movie.id.to_string(), input("Heat"), Some(image_upload()))
        .await
        .unwrap();

    assert_eq!(
        updated.warning.as_deref(),
        Some("Could not remove poster from cloud")
    );
    let stored = catalog.movie(movie.id).unwrap();
    assert_ne!(stored.poster.unwrap().public_id, "poster-old");
}

#[tokio::test]
async fn should_keep_stored_assets_when_update_fails() {
    let catalog = InMemoryCatalog::default();
    let media = MockMedia::default();
    let movie = create(&catalog, &media)
        .execute(input("Heat"), Some(image_upload()))
        .await
        .unwrap();
    let old_poster = movie.poster.clone().unwrap().public_id;
    catalog.fail_updates();

    let mut changed = input("Heat (1995)");
    changed.trailer = Some(TrailerInput {
        url: "https://media.test/trailer-9".to_owned(),
        public_id: "trailer-9".to_owned(),
    });
    let err = update(&catalog, &media)
        .execute(&movie.id.to_string(), changed, Some(image_upload()))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Internal(_)));

    let stored = catalog.movie(movie.id).unwrap();
    assert_eq!(stored.title, "Heat");
    assert_eq!(stored.poster.unwrap().public_id, old_poster);
    assert_eq!(stored.trailer.unwrap().public_id, "trailer-0");
    let fresh = media.uploaded.lock().unwrap().last().unwrap().public_id.clone();
    assert_ne!(fresh, old_poster);
    assert_eq!(media.deleted_ids(), [fresh]);
}

#[tokio::test]
async fn should_keep_trailer_when_same_one_is_resubmitted() {
    let catalog = InMemoryCatalog::default();
    let media = MockMedia::default();
    let movie = create(&catalog, &media)
        .execute(input("Heat"), None)
        .await
        .unwrap();

    update(&catalog, &media)
        .execute(&movie.id.to_string(), input("Heat"), None)
        .await
        .unwrap();
    assert!(media.deleted_ids().is_empty());

    let mut new_trailer = input("Heat");
    new_trailer.trailer = Some(TrailerInput {
        url: "https://media.test/trailer-9".to_owned(),
        public_id: "trailer-9".to_owned(),
    });
    update(&catalog, &media)
        .execute(&movie.id.to_string(), new_trailer, None)
        .await
        .unwrap();
    assert_eq!(media.deleted_ids(), ["trailer-0"]);
}

#[tokio::test]
async fn should_report_missing_movie_on_update() {
    let catalog = InMemoryCatalog::default();
    let media = MockMedia::default();
    let err = update(&catalog, &media)
        .execute(&uuid::Uuid::now_v7().to_string(), input("Heat"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));

    let err = update(&catalog, &media)
        .execute("not-an-id", input("Heat"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "Invalid Movie Id"));
}

#[tokio::test]
async fn should_delete_movie_without_trailer() {
    let catalog = InMemoryCatalog::default();
    let movie = test_movie("Bare", "Film", &[]);
    catalog.add_movie(movie.clone());
    catalog.add_review(movie.id, 4);
    let media = MockMedia::default();

    let outcome = RemoveMovieUseCase {
        repo: catalog.movie_repo(),
        media: media.clone(),
    }
    .execute(&movie.id.to_string())
    .await
    .unwrap();

    assert!(outcome.warning.is_none());
    assert!(media.deleted_ids().is_empty());
    assert!(catalog.movie(movie.id).is_none());
    assert!(catalog.reviews.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_delete_movie_even_when_media_cleanup_fails() {
    let catalog = InMemoryCatalog::default();
    let media = MockMedia::default();
    let movie = create(&catalog, &media)
        .execute(input("Heat"), Some(image_upload()))
        .await
        .unwrap();

    let outcome = RemoveMovieUseCase {
        repo: catalog.movie_repo(),
        media: MockMedia::failing_deletes(),
    }
    .execute(&movie.id.to_string())
    .await
    .unwrap();

    assert_eq!(
        outcome.warning.as_deref(),
        Some("Could not remove poster from cloud; Could not remove trailer from cloud")
    );
    assert!(catalog.movie(movie.id).is_none());
}

#[tokio::test]
async fn should_upload_video_trailers_only() {
    let media = MockMedia::default();
    let usecase = UploadTrailerUseCase {
        media: media.clone(),
    };

    let err = usecase.execute(None).await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "Video file is missing!"));
    let err = usecase.execute(Some(image_upload())).await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "Only video files are supported!"));

    let asset = usecase
        .execute(Some(Upload {
            file_name: "t.mp4".to_owned(),
            content_type: "video/mp4".to_owned(),
            bytes: Bytes::from_static(b"mp4"),
        }))
        .await
        .unwrap();
    assert!(asset.public_id.starts_with("trailer-"));
    assert!(asset.responsive.is_empty());
}

#[tokio::test]
async fn should_hide_private_movies_from_public_search_and_latest() {
    let catalog = InMemoryCatalog::default();
    let open = test_movie("Heat", "Film", &[]);
    let mut hidden = test_movie("Heatwave", "Film", &[]);
    hidden.status = MovieStatus::Private;
    catalog.add_movie(open.clone());
    catalog.add_movie(hidden.clone());
    catalog.add_review(open.id, 5);

    let admin = SearchMoviesUseCase {
        repo: catalog.movie_repo(),
    }
    .execute("HEAT")
    .await
    .unwrap();
    assert_eq!(admin.len(), 2);

    let public = SearchPublicMoviesUseCase {
        repo: catalog.movie_repo(),
        ratings: RatingAggregator {
            repo: catalog.rating_repo(),
        },
    }
    .execute("heat")
    .await
    .unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].0.id, open.id);
    assert_eq!(public[0].1.rating_avg.as_deref(), Some("5.0"));

    let latest = LatestMoviesUseCase {
        repo: catalog.movie_repo(),
    }
    .execute(None)
    .await
    .unwrap();
    assert_eq!(latest.len(), 1);

    let err = SearchMoviesUseCase {
        repo: catalog.movie_repo(),
    }
    .execute("  ")
    .await
    .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(_)));
}

#[tokio::test]
async fn should_drop_deleted_actors_from_movie_details() {
    let catalog = InMemoryCatalog::default();
    let kept = test_actor("Kept");
    catalog.add_actor(kept.clone());
    let mut movie = test_movie("Heat", "Film", &[]);
    movie.director_id = Some(uuid::Uuid::now_v7());
    movie.writers = vec![kept.id];
    catalog.add_movie(movie.clone());

    let (details, reviews) = GetMovieUseCase {
        repo: catalog.movie_repo(),
        actors: catalog.actor_repo(),
        ratings: RatingAggregator {
            repo: catalog.rating_repo(),
        },
    }
    .execute(&movie.id.to_string())
    .await
    .unwrap();

    assert!(details.director.is_none());
    assert_eq!(details.writers.len(), 1);
    assert_eq!(details.writers[0].name, "Kept");
    assert!(reviews.is_empty());
}
