//! Repository tests against a real MongoDB container
//!
//! Run with `cargo test -p domain_shows -- --ignored` (requires Docker).

use chrono::{TimeZone, Utc};
use domain_shows::{
    Address, DEFAULT_COLLECTION, MongoShowRepository, NewShow, ShowError, ShowRepository,
    ShowUpdate,
};
use mongodb::bson::{Document, doc, oid::ObjectId};
use test_utils::{TestDataBuilder, TestMongo, assertions::assert_some};

fn new_show(venue_name: &str) -> NewShow {
    NewShow {
        venue_name: venue_name.to_string(),
        address: Address {
            house_number: "1200".into(),
            street_name: "Main St".into(),
            zipcode: "78701".into(),
            city: "Austin".into(),
            state: "TX".into(),
        },
        other_bands: None,
        entry_time: Some(Utc.with_ymd_and_hms(2024, 5, 1, 19, 0, 0).unwrap()),
        start_time: Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap(),
        end_time: None,
        timezone: "America/Chicago".into(),
        ticket_link: Some("https://tickets.example.com/x".into()),
        rvsp_link: None,
        fb_link: None,
        is_past: None,
    }
}

fn repository(mongo: &TestMongo, test_name: &str) -> MongoShowRepository {
    let builder = TestDataBuilder::from_test_name(test_name);
    MongoShowRepository::new(&mongo.database(&builder.name("db", "shows")))
}

async fn created(repo: &MongoShowRepository, venue_name: &str) -> ObjectId {
    let id = repo.create_show(new_show(venue_name)).await.unwrap();
    ObjectId::parse_str(&id).unwrap()
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_then_get_matches_input() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "create_then_get");

    let input = new_show("Venue X");
    let id = repo.create_show(input.clone()).await.unwrap();
    let oid = ObjectId::parse_str(&id).unwrap();

    let show = assert_some(repo.get_show(oid).await.unwrap(), "created show");
    assert_eq!(show.id, id);
    assert_eq!(show.venue_name, input.venue_name);
    assert_eq!(show.address, input.address);
    assert_eq!(show.other_bands, None);
    assert_eq!(show.entry_time, input.entry_time);
    assert_eq!(show.start_time, input.start_time);
    assert_eq!(show.timezone, input.timezone);
    assert_eq!(show.ticket_link, input.ticket_link);
    assert!(show.items.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_then_get_is_absent() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "delete_then_get");
    let id = created(&repo, "Venue X").await;

    assert!(repo.delete_show(id).await.unwrap());
    assert!(repo.get_show(id).await.unwrap().is_none());
    assert!(!repo.delete_show(id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_add_item_appends_exactly_one_unchecked_item() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "add_item");
    let id = created(&repo, "Venue X").await;

    let show = assert_some(
        repo.add_item(id, "Soundcheck".into()).await.unwrap(),
        "show after add",
    );
    assert_eq!(show.items.len(), 1);
    assert_eq!(show.items[0].label, "Soundcheck");
    assert!(!show.items[0].checked);

    let show = assert_some(
        repo.add_item(id, "Load out".into()).await.unwrap(),
        "show after second add",
    );
    assert_eq!(show.items.len(), 2);
    assert_ne!(show.items[0].id, show.items[1].id);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_remove_missing_item_is_noop() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "remove_missing_item");
    let id = created(&repo, "Venue X").await;
    let before = assert_some(repo.add_item(id, "Soundcheck".into()).await.unwrap(), "show");

    let after = assert_some(
        repo.remove_item(id, "no-such-item".into()).await.unwrap(),
        "show after no-op removal",
    );
    assert_eq!(after, before);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_remove_item_leaves_other_items_untouched() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "remove_item");
    let id = created(&repo, "Venue X").await;

    repo.add_item(id, "Soundcheck".into()).await.unwrap();
    let before = assert_some(repo.add_item(id, "Load out".into()).await.unwrap(), "show");
    let removed = before.items[0].clone();

    let after = assert_some(
        repo.remove_item(id, removed.id.clone()).await.unwrap(),
        "show after removal",
    );
    assert_eq!(after.items.len(), 1);
    assert_eq!(after.items[0], before.items[1]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_changes_only_named_fields() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "update_partial");
    let id = created(&repo, "Venue X").await;
    let before = assert_some(repo.get_show(id).await.unwrap(), "show");

    let update = ShowUpdate {
        venue_name: Some("Venue Y".into()),
        other_bands: Some(Some(vec!["The Openers".into()])),
        ..Default::default()
    };
    let after = assert_some(repo.update_show(id, update).await.unwrap(), "updated show");

    assert_eq!(after.venue_name, "Venue Y");
    assert_eq!(after.other_bands, Some(vec!["The Openers".to_string()]));
    assert_eq!(after.address, before.address);
    assert_eq!(after.start_time, before.start_time);
    assert_eq!(after.ticket_link, before.ticket_link);
    assert_eq!(after.items, before.items);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_with_null_clears_optional_field() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "update_clear");
    let id = created(&repo, "Venue X").await;

    let set_bands = ShowUpdate {
        other_bands: Some(Some(vec!["The Openers".into()])),
        ..Default::default()
    };
    let show = assert_some(repo.update_show(id, set_bands).await.unwrap(), "show");
    assert!(show.other_bands.is_some());
    assert!(show.ticket_link.is_some());

    let clear: ShowUpdate =
        serde_json::from_str(r#"{"otherBands":null,"ticketLink":null}"#).unwrap();
    let after = assert_some(repo.update_show(id, clear).await.unwrap(), "cleared show");
    assert_eq!(after.other_bands, None);
    assert_eq!(after.ticket_link, None);
    assert_eq!(after.venue_name, show.venue_name);
    assert_eq!(after.start_time, show.start_time);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_empty_update_returns_current_state() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "update_empty");
    let id = created(&repo, "Venue X").await;
    let before = assert_some(repo.get_show(id).await.unwrap(), "show");

    let after = repo.update_show(id, ShowUpdate::default()).await.unwrap();
    assert_eq!(after, Some(before));
    assert!(
        repo.update_show(ObjectId::new(), ShowUpdate::default())
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_operations_on_missing_show_return_none() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "missing_show");
    let missing = ObjectId::new();

    assert!(repo.get_show(missing).await.unwrap().is_none());
    assert!(repo.add_item(missing, "x".into()).await.unwrap().is_none());
    assert!(repo.remove_item(missing, "x".into()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_shows_surfaces_decode_errors() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("list_decode_error");
    let db = mongo.database(&builder.name("db", "shows"));
    let repo = MongoShowRepository::new(&db);

    created(&repo, "Venue X").await;
    created(&repo, "Venue Y").await;
    assert_eq!(repo.list_shows().await.unwrap().len(), 2);

    let legacy = ObjectId::new();
    db.collection::<Document>(DEFAULT_COLLECTION)
        .insert_one(doc! { "_id": legacy, "name": "Venue Z", "items": [] })
        .await
        .unwrap();

    match repo.list_shows().await {
        Err(ShowError::Decode { id, .. }) => assert_eq!(id, legacy.to_hex()),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_custom_collection_name() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("custom_collection");
    let repo = MongoShowRepository::with_collection(&db, "shows_v2");

    created(&repo, "Venue X").await;
    let count = db
        .collection::<Document>("shows_v2")
        .count_documents(doc! {})
        .await
        .unwrap();
    assert_eq!(count, 1);
}
