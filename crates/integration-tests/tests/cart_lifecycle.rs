//! Cart items and the pending order they create.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::{Method, StatusCode};
use serde_json::json;

use ecommerce_api::db::{CartItemRepository, RepositoryError};
use ecommerce_api::models::CartItem;
use ecommerce_core::{CartItemId, LifecycleError, OrderId, Price, UserId};
use ecommerce_integration_tests::{TestContext, assert_rejected, json_of};

#[tokio::test]
async fn test_first_item_opens_exactly_one_pending_order() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let user = ctx.create_user("U1").await;
    let order = OrderId::generate();

    let (cart_item, response) = ctx.add_cart_item(user, order, "Keyboard", 20).await;
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Cart item added successfully.");

    let response = ctx.request(Method::GET, user, "/api/v1/orders").send().await.unwrap();
    let (status, orders) = json_of(response).await;
    assert_eq!(status, StatusCode::OK);
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["orderId"], order.to_string());
    assert_eq!(orders[0]["status"], "Pending");

    let response = ctx
        .request(Method::GET, user, "/api/v2/cart-items")
        .send()
        .await
        .unwrap();
    let (status, items) = json_of(response).await;
    assert_eq!(status, StatusCode::OK);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["cartItemId"], cart_item.to_string());
    assert_eq!(items[0]["orderId"], order.to_string());
    assert_eq!(items[0]["userId"], user.to_string());
    assert_eq!(items[0]["price"], 20);
}

#[tokio::test]
async fn test_add_list_checkout_scenario() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let user = ctx.create_user("U1").await;
    let order = OrderId::generate();

    let (_, response) = ctx.add_cart_item(user, order, "Keyboard", 20).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx.checkout(user, order).await;
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Order checked out successfully.");
    assert_eq!(ctx.order_status(user, order).await, "Processed");

    // The closed order no longer counts as the cart.
    let response = ctx
        .request(Method::GET, user, "/api/v1/cart-items")
        .send()
        .await
        .unwrap();
    assert_rejected(response, "User does not have a pending order.").await;

    // A new order may be opened once the previous one is closed.
    let (_, response) = ctx.add_cart_item(user, OrderId::generate(), "Mouse", 5).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_second_pending_order_is_rejected() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let user = ctx.create_user("U1").await;

    let (_, response) = ctx.add_cart_item(user, OrderId::generate(), "Keyboard", 20).await;
    assert_eq!(response.status(), StatusCode::OK);

    let (_, response) = ctx.add_cart_item(user, OrderId::generate(), "Mouse", 5).await;
    assert_rejected(response, "Cannot add cart item. User already has a pending order.").await;
}

#[tokio::test]
async fn test_items_cannot_join_closed_or_foreign_orders() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let owner = ctx.create_user("Owner").await;
    let other = ctx.create_user("Other").await;
    let order = OrderId::generate();

    let (_, response) = ctx.add_cart_item(owner, order, "Keyboard", 20).await;
    assert_eq!(response.status(), StatusCode::OK);

    let (_, response) = ctx.add_cart_item(other, order, "Mouse", 5).await;
    assert_rejected(response, "Cannot add cart item. Order belongs to another user.").await;

    assert_eq!(ctx.cancel(owner, order).await.status(), StatusCode::OK);

    let (_, response) = ctx.add_cart_item(owner, order, "Mouse", 5).await;
    assert_rejected(
        response,
        "Cannot add cart item. Order is already processed or cancelled.",
    )
    .await;
}

#[tokio::test]
async fn test_duplicate_cart_item_is_rejected() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let user = ctx.create_user("U1").await;
    let order = OrderId::generate();

    let (cart_item, response) = ctx.add_cart_item(user, order, "Keyboard", 20).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx
        .request(Method::POST, user, "/api/v1/cart-items")
        .json(&json!({
            "cartItemId": cart_item,
            "orderId": order,
            "userId": user,
            "item": "Keyboard",
            "price": 20,
        }))
        .send()
        .await
        .unwrap();
    assert_rejected(response, "Cannot add cart item. Cart item already exists.").await;
}

#[tokio::test]
async fn test_update_cart_item() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let user = ctx.create_user("U1").await;
    let order = OrderId::generate();
    let (cart_item, _) = ctx.add_cart_item(user, order, "Keyboard", 20).await;

    let update = |item_id: CartItemId, price: i64| {
        ctx.request(Method::PUT, user, "/api/v1/cart-items")
            .json(&json!({
                "cartItemId": item_id,
                "orderId": order,
                "userId": user,
                "item": "Mechanical keyboard",
                "price": price,
            }))
            .send()
    };

    let (status, body) = json_of(update(cart_item, 35).await.unwrap()).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Cart item updated successfully.");

    let response = ctx
        .request(Method::GET, user, "/api/v1/cart-items")
        .send()
        .await
        .unwrap();
    let (_, items) = json_of(response).await;
    assert_eq!(items[0]["item"], "Mechanical keyboard");
    assert_eq!(items[0]["price"], 35);

    assert_rejected(
        update(CartItemId::generate(), 35).await.unwrap(),
        "Cannot update cart item. Cart item is not found for user.",
    )
    .await;

    let (status, body) = json_of(update(cart_item, 0).await.unwrap()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["price"], "'Price' must be greater than 0.");

    assert_eq!(ctx.checkout(user, order).await.status(), StatusCode::OK);
    assert_rejected(
        update(cart_item, 40).await.unwrap(),
        "Cannot update cart item. Order is already processed or cancelled.",
    )
    .await;
}

#[tokio::test]
async fn test_delete_cart_item() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let user = ctx.create_user("U1").await;
    let (cart_item, _) = ctx.add_cart_item(user, OrderId::generate(), "Keyboard", 20).await;
    let path = format!("/api/v1/cart-items/{cart_item}");

    let response = ctx.request(Method::DELETE, user, &path).send().await.unwrap();
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cart item deleted successfully.");

    let response = ctx.request(Method::DELETE, user, &path).send().await.unwrap();
    assert_rejected(response, "Cannot delete cart item. Cart item is not found.").await;
}

#[tokio::test]
async fn test_malformed_requests_are_bad_requests() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let user = ctx.create_user("U1").await;

    let response = ctx
        .request(Method::DELETE, user, "/api/v1/cart-items/not-a-uuid")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = ctx
        .request(Method::POST, user, "/api/v1/cart-items")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = ctx
        .request(Method::POST, user, "/api/v1/cart-items")
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"].as_object().unwrap().len(), 5);
}

#[tokio::test]
async fn test_concurrent_adds_never_open_two_pending_orders() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let user = ctx.create_user("Racer").await;

    let attempts = (0..8).map(|_| {
        let pool = ctx.pool.clone();
        tokio::spawn(async move {
            let item = CartItem {
                id: CartItemId::generate(),
                order_id: OrderId::generate(),
                user_id: user,
                item: "Widget".to_owned(),
                price: Price::new(1).unwrap(),
            };
            CartItemRepository::new(&pool).add(&item).await.is_ok()
        })
    });

    let mut successes = 0;
    for attempt in attempts.collect::<Vec<_>>() {
        if attempt.await.unwrap() {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);

    let (pending,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM orders WHERE user_id = $1 AND status = 'pending'",
    )
    .bind(user)
    .fetch_one(&ctx.pool)
    .await
    .unwrap();
    assert_eq!(pending, 1);
}

#[tokio::test]
async fn test_racing_users_on_one_order_id_get_ownership_rejection() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    for _ in 0..20 {
        let order_id = OrderId::generate();
        let users = [ctx.create_user("A").await, ctx.create_user("B").await];

        let attempts = users.map(|user_id: UserId| {
            let pool = ctx.pool.clone();
            tokio::spawn(async move {
                let item = CartItem {
                    id: CartItemId::generate(),
                    order_id,
                    user_id,
                    item: "Widget".to_owned(),
                    price: Price::new(1).unwrap(),
                };
                CartItemRepository::new(&pool).add(&item).await
            })
        });

        let mut successes = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(_) => successes += 1,
                Err(RepositoryError::Rejected(LifecycleError::OrderOwnedByAnotherUser)) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(successes, 1);
    }
}
