use reelhouse_catalog::domain::types::MediaAsset;
use reelhouse_catalog::error::CatalogError;
use reelhouse_catalog::usecase::actor::{
    ActorInput, CreateActorUseCase, GetActorUseCase, LatestActorsUseCase, ListActorsUseCase,
    RemoveActorUseCase, SearchActorsUseCase, UpdateActorUseCase,
};
use reelhouse_domain::pagination::PageRequest;

use crate::helpers::{InMemoryCatalog, MockMedia, image_upload, test_actor};

fn input(name: &str) -> ActorInput {
    ActorInput {
        name: name.to_owned(),
        about: "Character actor.".to_owned(),
        gender: "male".to_owned(),
        avatar: None,
    }
}

#[tokio::test]
async fn should_create_actor_with_avatar() {
    let catalog = InMemoryCatalog::default();
    let media = MockMedia::default();
    let actor = CreateActorUseCase {
        repo: catalog.actor_repo(),
        media: media.clone(),
    }
    .execute(ActorInput {
        avatar: Some(image_upload()),
        ..input("  Robert De Niro ")
    })
    .await
    .unwrap();

    assert_eq!(actor.name, "Robert De Niro");
    let avatar = actor.avatar.unwrap();
    assert!(avatar.public_id.starts_with("avatar-"));
    assert!(avatar.responsive.is_empty());
    assert_eq!(catalog.actors.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_require_name_about_and_gender() {
    let catalog = InMemoryCatalog::default();
    let usecase = CreateActorUseCase {
        repo: catalog.actor_repo(),
        media: MockMedia::default(),
    };
    let cases = [
        (input(" "), "Actor name is missing!"),
        (ActorInput { about: String::new(), ..input("Al") }, "About is a required field!"),
        (ActorInput { gender: String::new(), ..input("Al") }, "Gender is a required field!"),
    ];
    for (bad, message) in cases {
        let err = usecase.execute(bad).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == message));
    }
    assert!(catalog.actors.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_swap_avatar_and_warn_on_failed_cleanup() {
    let catalog = InMemoryCatalog::default();
    let mut actor = test_actor("Val Kilmer");
    actor.avatar = Some(MediaAsset {
        url: "https://media.test/avatar-old".to_owned(),
        public_id: "avatar-old".to_owned(),
        responsive: Vec::new(),
    });
    catalog.add_actor(actor.clone());

    let updated = UpdateActorUseCase {
        repo: catalog.actor_repo(),
        media: MockMedia::failing_deletes(),
    }
    .execute(
        &actor.id.to_string(),
        ActorInput {
            avatar: Some(image_upload()),
            ..input("Val Kilmer")
        },
    )
    .await
    .unwrap();

    assert_eq!(
        updated.warning.as_deref(),
        Some("Could not remove avatar from cloud")
    );
    let stored = catalog.actors.lock().unwrap()[0].clone();
    assert_ne!(stored.avatar.unwrap().public_id, "avatar-old");
}

#[tokio::test]
async fn should_keep_old_avatar_when_update_fails() {
    let catalog = InMemoryCatalog::default();
    let media = MockMedia::default();
    let mut actor = test_actor("Val Kilmer");
    actor.avatar = Some(MediaAsset {
        url: "https://media.test/avatar-old".to_owned(),
        public_id: "avatar-old".to_owned(),
        responsive: Vec::new(),
    });
    catalog.add_actor(actor.clone());
    catalog.fail_updates();

    let err = UpdateActorUseCase {
        repo: catalog.actor_repo(),
        media: media.clone(),
    }
    .execute(
        &actor.id.to_string(),
        ActorInput {
            avatar: Some(image_upload()),
            ..input("Val Kilmer")
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CatalogError::Internal(_)));
    let stored = catalog.actors.lock().unwrap()[0].clone();
    assert_eq!(stored.avatar.unwrap().public_id, "avatar-old");
    let fresh = media.uploaded.lock().unwrap()[0].public_id.clone();
    assert_eq!(media.deleted_ids(), [fresh]);
}

#[tokio::test]
async fn should_remove_actor_and_its_avatar() {
    let catalog = InMemoryCatalog::default();
    let media = MockMedia::default();
    let mut actor = test_actor("Tom Sizemore");
    actor.avatar = Some(MediaAsset {
        url: "https://media.test/avatar-7".to_owned(),
        public_id: "avatar-7".to_owned(),
        responsive: Vec::new(),
    });
    catalog.add_actor(actor.clone());

    let outcome = RemoveActorUseCase {
        repo: catalog.actor_repo(),
        media: media.clone(),
    }
    .execute(&actor.id.to_string())
    .await
    .unwrap();

    assert!(outcome.warning.is_none());
    assert_eq!(media.deleted_ids(), ["avatar-7"]);
    assert!(catalog.actors.lock().unwrap().is_empty());

    let err = RemoveActorUseCase {
        repo: catalog.actor_repo(),
        media,
    }
    .execute(&actor.id.to_string())
    .await
    .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "Invalid request, record not found"));
}

#[tokio::test]
async fn should_search_actors_case_insensitively() {
    let catalog = InMemoryCatalog::default();
    for name in ["Al Pacino", "Alan Rickman", "Jon Voight"] {
        catalog.add_actor(test_actor(name));
    }
    let usecase = SearchActorsUseCase {
        repo: catalog.actor_repo(),
    };

    let found = usecase.execute("AL").await.unwrap();
    assert_eq!(found.len(), 2);
    let err = usecase.execute(" ").await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(_)));
}

#[tokio::test]
async fn should_list_newest_actors_first() {
    let catalog = InMemoryCatalog::default();
    for i in 0..15 {
        catalog.add_actor(test_actor(&format!("Actor {i}")));
    }

    let latest = LatestActorsUseCase {
        repo: catalog.actor_repo(),
    }
    .execute()
    .await
    .unwrap();
    assert_eq!(latest.len(), 12);
    assert_eq!(latest[0].name, "Actor 14");

    let page = ListActorsUseCase {
        repo: catalog.actor_repo(),
    }
    .execute(PageRequest { page_no: 1, limit: 10 })
    .await
    .unwrap();
    assert_eq!(page.len(), 5);
    assert_eq!(page[0].name, "Actor 4");
}

#[tokio::test]
async fn should_report_missing_actor() {
    let catalog = InMemoryCatalog::default();
    let usecase = GetActorUseCase {
        repo: catalog.actor_repo(),
    };
    let err = usecase
        .execute(&uuid::Uuid::now_v7().to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
    let err = usecase.execute("nope").await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(ref m) if m == "Invalid request"));
}
