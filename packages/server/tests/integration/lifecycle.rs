use sea_orm::EntityTrait;
use serde_json::json;

use common::FoodStatus;
use server::entity::food;

use crate::common::{TestApp, routes};

async fn status_of(app: &TestApp, id: i32) -> FoodStatus {
    food::Entity::find_by_id(id)
        .one(&app.db)
        .await
        .unwrap()
        .expect("food item should exist")
        .status
}

fn deliver_body() -> serde_json::Value {
    json!({"deliveryAddress": "Shelter A", "deliveryImage": "cGhvdG8="})
}

#[tokio::test]
async fn full_walk_reserve_pick_deliver_credits_karma() {
    let app = TestApp::spawn().await;
    let donor = app
        .create_authenticated_user("Dan", "dan@example.com", "donor")
        .await;
    let volunteer = app
        .create_authenticated_user("Vera", "vera@example.com", "volunteer")
        .await;
    let id = app.add_food(&donor, "Dal").await;

    let reserved = app
        .post_with_token(&routes::reserve(id), &json!({}), &volunteer)
        .await;
    assert_eq!(reserved.status, 200, "{}", reserved.text);
    assert_eq!(status_of(&app, id).await, FoodStatus::Reserved);

    let picked = app
        .post_with_token(&routes::pick(id), &json!({}), &volunteer)
        .await;
    assert_eq!(picked.status, 200, "{}", picked.text);
    assert_eq!(status_of(&app, id).await, FoodStatus::Picked);

    let delivered = app
        .post_with_token(&routes::deliver(id), &deliver_body(), &volunteer)
        .await;
    assert_eq!(delivered.status, 200, "{}", delivered.text);
    assert_eq!(delivered.body["message"], "Delivered successfully. +10 Karma!");
    assert_eq!(status_of(&app, id).await, FoodStatus::Delivered);

    let item = food::Entity::find_by_id(id)
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.delivery_address.as_deref(), Some("Shelter A"));
    assert!(item.delivered_at.is_some());
    assert!(item.reserved_by.is_some());

    let profile = app
        .get_with_token(routes::VOLUNTEER_PROFILE, &volunteer)
        .await;
    assert_eq!(profile.status, 200);
    assert_eq!(profile.body["karmaPoints"], 10);
    assert_eq!(profile.body["deliveriesCompleted"], 1);
}

#[tokio::test]
async fn concurrent_reserves_have_exactly_one_winner() {
    let app = TestApp::spawn().await;
    let donor = app
        .create_authenticated_user("Dan", "dan@example.com", "donor")
        .await;
    let alice = app
        .create_authenticated_user("Alice", "alice@example.com", "volunteer")
        .await;
    let bob = app
        .create_authenticated_user("Bob", "bob@example.com", "volunteer")
        .await;
    let id = app.add_food(&donor, "Dal").await;

    let reserve_path = routes::reserve(id);
    let empty_body = json!({});
    let (a, b) = tokio::join!(
        app.post_with_token(&reserve_path, &empty_body, &alice),
        app.post_with_token(&reserve_path, &empty_body, &bob),
    );

    let outcomes = [a.status, b.status];
    assert!(
        outcomes.contains(&200) && outcomes.contains(&400),
        "expected one winner and one conflict, got {outcomes:?}"
    );

    let item = food::Entity::find_by_id(id)
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.status, FoodStatus::Reserved);
    assert!(item.reserved_by.is_some());
}

#[tokio::test]
async fn reserving_an_already_reserved_item_conflicts() {
    let app = TestApp::spawn().await;
    let donor = app
        .create_authenticated_user("Dan", "dan@example.com", "donor")
        .await;
    let alice = app
        .create_authenticated_user("Alice", "alice@example.com", "volunteer")
        .await;
    let bob = app
        .create_authenticated_user("Bob", "bob@example.com", "volunteer")
        .await;
    let id = app.add_food(&donor, "Dal").await;

    let first = app
        .post_with_token(&routes::reserve(id), &json!({}), &alice)
        .await;
    assert_eq!(first.status, 200, "{}", first.text);

    let second = app
        .post_with_token(&routes::reserve(id), &json!({}), &bob)
        .await;
    assert_eq!(second.status, 400);
    assert_eq!(second.body["code"], "STATE_CONFLICT");
}

#[tokio::test]
async fn only_the_reserving_volunteer_can_pick() {
    let app = TestApp::spawn().await;
    let donor = app
        .create_authenticated_user("Dan", "dan@example.com", "donor")
        .await;
    let alice = app
        .create_authenticated_user("Alice", "alice@example.com", "volunteer")
        .await;
    let bob = app
        .create_authenticated_user("Bob", "bob@example.com", "volunteer")
        .await;
    let id = app.add_food(&donor, "Dal").await;

    let reserved = app
        .post_with_token(&routes::reserve(id), &json!({}), &alice)
        .await;
    assert_eq!(reserved.status, 200, "{}", reserved.text);

    let res = app.post_with_token(&routes::pick(id), &json!({}), &bob).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "STATE_CONFLICT");
    assert_eq!(status_of(&app, id).await, FoodStatus::Reserved);
}

#[tokio::test]
async fn deliver_before_pick_fails_and_credits_nothing() {
    let app = TestApp::spawn().await;
    let donor = app
        .create_authenticated_user("Dan", "dan@example.com", "donor")
        .await;
    let volunteer = app
        .create_authenticated_user("Vera", "vera@example.com", "volunteer")
        .await;
    let id = app.add_food(&donor, "Dal").await;

    let reserved = app
        .post_with_token(&routes::reserve(id), &json!({}), &volunteer)
        .await;
    assert_eq!(reserved.status, 200, "{}", reserved.text);

    let res = app
        .post_with_token(&routes::deliver(id), &deliver_body(), &volunteer)
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "STATE_CONFLICT");
    assert_eq!(status_of(&app, id).await, FoodStatus::Reserved);

    let profile = app
        .get_with_token(routes::VOLUNTEER_PROFILE, &volunteer)
        .await;
    assert_eq!(profile.body["karmaPoints"], 0);
    assert_eq!(profile.body["deliveriesCompleted"], 0);
}

#[tokio::test]
async fn deliver_by_the_wrong_volunteer_fails_and_credits_nothing() {
    let app = TestApp::spawn().await;
    let donor = app
        .create_authenticated_user("Dan", "dan@example.com", "donor")
        .await;
    let alice = app
        .create_authenticated_user("Alice", "alice@example.com", "volunteer")
        .await;
    let bob = app
        .create_authenticated_user("Bob", "bob@example.com", "volunteer")
        .await;
    let id = app.add_food(&donor, "Dal").await;

    for path in [routes::reserve(id), routes::pick(id)] {
        let res = app.post_with_token(&path, &json!({}), &alice).await;
        assert_eq!(res.status, 200, "{}", res.text);
    }

    let res = app
        .post_with_token(&routes::deliver(id), &deliver_body(), &bob)
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "STATE_CONFLICT");
    assert_eq!(status_of(&app, id).await, FoodStatus::Picked);

    for token in [&alice, &bob] {
        let profile = app.get_with_token(routes::VOLUNTEER_PROFILE, token).await;
        assert_eq!(profile.body["karmaPoints"], 0);
    }
}

#[tokio::test]
async fn deliver_without_an_image_is_a_validation_error() {
    let app = TestApp::spawn().await;
    let donor = app
        .create_authenticated_user("Dan", "dan@example.com", "donor")
        .await;
    let volunteer = app
        .create_authenticated_user("Vera", "vera@example.com", "volunteer")
        .await;
    let id = app.add_food(&donor, "Dal").await;

    for path in [routes::reserve(id), routes::pick(id)] {
        let res = app.post_with_token(&path, &json!({}), &volunteer).await;
        assert_eq!(res.status, 200, "{}", res.text);
    }

    let res = app
        .post_with_token(
            &routes::deliver(id),
            &json!({"deliveryAddress": "Shelter A", "deliveryImage": ""}),
            &volunteer,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert_eq!(status_of(&app, id).await, FoodStatus::Picked);
}

#[tokio::test]
async fn unreserve_returns_the_item_to_the_pool_for_others() {
    let app = TestApp::spawn().await;
    let donor = app
        .create_authenticated_user("Dan", "dan@example.com", "donor")
        .await;
    let alice = app
        .create_authenticated_user("Alice", "alice@example.com", "volunteer")
        .await;
    let bob = app
        .create_authenticated_user("Bob", "bob@example.com", "volunteer")
        .await;
    let id = app.add_food(&donor, "Dal").await;

    let reserved = app
        .post_with_token(&routes::reserve(id), &json!({}), &alice)
        .await;
    assert_eq!(reserved.status, 200, "{}", reserved.text);

    let released = app
        .post_with_token(&routes::unreserve(id), &json!({}), &alice)
        .await;
    assert_eq!(released.status, 200, "{}", released.text);

    let item = food::Entity::find_by_id(id)
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.status, FoodStatus::Available);
    assert!(item.reserved_by.is_none());
    assert!(item.reserved_at.is_none());

    let re_reserved = app
        .post_with_token(&routes::reserve(id), &json!({}), &bob)
        .await;
    assert_eq!(re_reserved.status, 200, "{}", re_reserved.text);
}

#[tokio::test]
async fn unreserve_by_a_non_holder_conflicts() {
    let app = TestApp::spawn().await;
    let donor = app
        .create_authenticated_user("Dan", "dan@example.com", "donor")
        .await;
    let alice = app
        .create_authenticated_user("Alice", "alice@example.com", "volunteer")
        .await;
    let bob = app
        .create_authenticated_user("Bob", "bob@example.com", "volunteer")
        .await;
    let id = app.add_food(&donor, "Dal").await;

    let reserved = app
        .post_with_token(&routes::reserve(id), &json!({}), &alice)
        .await;
    assert_eq!(reserved.status, 200, "{}", reserved.text);

    let res = app
        .post_with_token(&routes::unreserve(id), &json!({}), &bob)
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "STATE_CONFLICT");
    assert_eq!(status_of(&app, id).await, FoodStatus::Reserved);
}

#[tokio::test]
async fn repeated_deliveries_accumulate_karma() {
    let app = TestApp::spawn().await;
    let donor = app
        .create_authenticated_user("Dan", "dan@example.com", "donor")
        .await;
    let volunteer = app
        .create_authenticated_user("Vera", "vera@example.com", "volunteer")
        .await;

    for name in ["Dal", "Rice", "Bread"] {
        let id = app.add_food(&donor, name).await;
        for path in [routes::reserve(id), routes::pick(id)] {
            let res = app.post_with_token(&path, &json!({}), &volunteer).await;
            assert_eq!(res.status, 200, "{}", res.text);
        }
        let delivered = app
            .post_with_token(&routes::deliver(id), &deliver_body(), &volunteer)
            .await;
        assert_eq!(delivered.status, 200, "{}", delivered.text);
    }

    let profile = app
        .get_with_token(routes::VOLUNTEER_PROFILE, &volunteer)
        .await;
    assert_eq!(profile.body["karmaPoints"], 30);
    assert_eq!(profile.body["deliveriesCompleted"], 3);

    let history = app
        .get_with_token(routes::VOLUNTEER_DELIVERIES, &volunteer)
        .await;
    assert_eq!(history.status, 200);
    assert_eq!(history.body.as_array().unwrap().len(), 3);
}
