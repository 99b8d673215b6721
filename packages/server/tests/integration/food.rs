use serde_json::json;

use crate::common::{TestApp, food_payload, routes};

mod add {
    use super::*;

    #[tokio::test]
    async fn donor_can_list_a_food_item() {
        let app = TestApp::spawn().await;
        let donor = app
            .create_authenticated_user("Dan", "dan@example.com", "donor")
            .await;

        let res = app
            .post_with_token(routes::ADD, &food_payload("Dal"), &donor)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["message"], "Item added successfully");

        let listing = app.get_with_token(routes::MY_FOODS, &donor).await;
        assert_eq!(listing.status, 200);
        let items = listing.body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["foodName"], "Dal");
        assert_eq!(items[0]["status"], "available");
    }

    #[tokio::test]
    async fn volunteer_cannot_list_a_food_item() {
        let app = TestApp::spawn().await;
        let volunteer = app
            .create_authenticated_user("Vera", "vera@example.com", "volunteer")
            .await;

        let res = app
            .post_with_token(routes::ADD, &food_payload("Dal"), &volunteer)
            .await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn add_with_empty_required_field_is_rejected() {
        let app = TestApp::spawn().await;
        let donor = app
            .create_authenticated_user("Dan", "dan@example.com", "donor")
            .await;
        let mut body = food_payload("Dal");
        body["quantity"] = json!("");

        let res = app.post_with_token(routes::ADD, &body, &donor).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn add_with_unknown_category_is_rejected() {
        let app = TestApp::spawn().await;
        let donor = app
            .create_authenticated_user("Dan", "dan@example.com", "donor")
            .await;
        let mut body = food_payload("Dal");
        body["itemCategory"] = json!("frozen");

        let res = app.post_with_token(routes::ADD, &body, &donor).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn partial_update_touches_only_provided_fields() {
        let app = TestApp::spawn().await;
        let donor = app
            .create_authenticated_user("Dan", "dan@example.com", "donor")
            .await;
        let id = app.add_food(&donor, "Dal").await;

        let res = app
            .put_with_token(&routes::update(id), &json!({"quantity": "2 boxes"}), &donor)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);

        let listing = app.get_with_token(routes::MY_FOODS, &donor).await;
        let item = &listing.body.as_array().unwrap()[0];
        assert_eq!(item["quantity"], "2 boxes");
        assert_eq!(item["foodName"], "Dal");
        assert_eq!(item["address"], "12 MG Road");
    }

    #[tokio::test]
    async fn update_with_no_recognized_fields_is_rejected() {
        let app = TestApp::spawn().await;
        let donor = app
            .create_authenticated_user("Dan", "dan@example.com", "donor")
            .await;
        let id = app.add_food(&donor, "Dal").await;

        let res = app.put_with_token(&routes::update(id), &json!({}), &donor).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let listing = app.get_with_token(routes::MY_FOODS, &donor).await;
        assert_eq!(listing.body.as_array().unwrap()[0]["quantity"], "5 boxes");
    }

    #[tokio::test]
    async fn cannot_update_another_donors_item() {
        let app = TestApp::spawn().await;
        let donor = app
            .create_authenticated_user("Dan", "dan@example.com", "donor")
            .await;
        let other = app
            .create_authenticated_user("Eve", "eve@example.com", "donor")
            .await;
        let id = app.add_food(&donor, "Dal").await;

        let res = app
            .put_with_token(&routes::update(id), &json!({"quantity": "0"}), &other)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn cannot_update_a_picked_item() {
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
        let picked = app
            .post_with_token(&routes::pick(id), &json!({}), &volunteer)
            .await;
        assert_eq!(picked.status, 200, "{}", picked.text);

        let res = app
            .put_with_token(&routes::update(id), &json!({"quantity": "1 box"}), &donor)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "STATE_CONFLICT");

        let listing = app.get_with_token(routes::MY_FOODS, &donor).await;
        assert_eq!(listing.body.as_array().unwrap()[0]["quantity"], "5 boxes");
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn donor_can_delete_an_available_item() {
        let app = TestApp::spawn().await;
        let donor = app
            .create_authenticated_user("Dan", "dan@example.com", "donor")
            .await;
        let id = app.add_food(&donor, "Dal").await;

        let res = app.delete_with_token(&routes::delete(id), &donor).await;

        assert_eq!(res.status, 200, "{}", res.text);

        let listing = app.get_with_token(routes::MY_FOODS, &donor).await;
        assert!(listing.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cannot_delete_another_donors_item() {
        let app = TestApp::spawn().await;
        let donor = app
            .create_authenticated_user("Dan", "dan@example.com", "donor")
            .await;
        let other = app
            .create_authenticated_user("Eve", "eve@example.com", "donor")
            .await;
        let id = app.add_food(&donor, "Dal").await;

        let res = app.delete_with_token(&routes::delete(id), &other).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn cannot_delete_a_delivered_item() {
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
        let delivered = app
            .post_with_token(
                &routes::deliver(id),
                &json!({"deliveryAddress": "Shelter A", "deliveryImage": "cGhvdG8="}),
                &volunteer,
            )
            .await;
        assert_eq!(delivered.status, 200, "{}", delivered.text);

        let res = app.delete_with_token(&routes::delete(id), &donor).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "STATE_CONFLICT");
    }
}

mod listings {
    use super::*;

    #[tokio::test]
    async fn available_listing_is_shared_and_excludes_reserved_items() {
        let app = TestApp::spawn().await;
        let donor = app
            .create_authenticated_user("Dan", "dan@example.com", "donor")
            .await;
        let volunteer = app
            .create_authenticated_user("Vera", "vera@example.com", "volunteer")
            .await;
        let first = app.add_food(&donor, "Dal").await;
        let second = app.add_food(&donor, "Rice").await;

        let res = app.get_with_token(routes::AVAILABLE, &volunteer).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 2);

        let donor_view = app.get_with_token(routes::AVAILABLE, &donor).await;
        assert_eq!(donor_view.status, 200);

        let reserved = app
            .post_with_token(&routes::reserve(first), &json!({}), &volunteer)
            .await;
        assert_eq!(reserved.status, 200, "{}", reserved.text);

        let after = app.get_with_token(routes::AVAILABLE, &volunteer).await;
        let remaining = after.body.as_array().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["id"], second as i64);
    }

    #[tokio::test]
    async fn cart_shows_reserved_and_picked_items_only() {
        let app = TestApp::spawn().await;
        let donor = app
            .create_authenticated_user("Dan", "dan@example.com", "donor")
            .await;
        let volunteer = app
            .create_authenticated_user("Vera", "vera@example.com", "volunteer")
            .await;
        let reserved_id = app.add_food(&donor, "Dal").await;
        let picked_id = app.add_food(&donor, "Rice").await;
        let untouched = app.add_food(&donor, "Bread").await;

        for id in [reserved_id, picked_id] {
            let res = app
                .post_with_token(&routes::reserve(id), &json!({}), &volunteer)
                .await;
            assert_eq!(res.status, 200, "{}", res.text);
        }
        let picked = app
            .post_with_token(&routes::pick(picked_id), &json!({}), &volunteer)
            .await;
        assert_eq!(picked.status, 200, "{}", picked.text);

        let cart = app.get_with_token(routes::MY_CART, &volunteer).await;
        assert_eq!(cart.status, 200);
        let items = cart.body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i["id"] != untouched as i64));

        let statuses: Vec<&str> = items
            .iter()
            .map(|i| i["status"].as_str().unwrap())
            .collect();
        assert!(statuses.contains(&"reserved"));
        assert!(statuses.contains(&"picked"));
    }
}
