//! Order queries and transitions.

#![allow(clippy::unwrap_used)]

use reqwest::{Method, StatusCode};

use ecommerce_core::OrderId;
use ecommerce_integration_tests::{TestContext, assert_rejected, json_of};

#[tokio::test]
async fn test_cancel_pending_order() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let user = ctx.create_user("U1").await;
    let order = OrderId::generate();
    ctx.add_cart_item(user, order, "Keyboard", 20).await;

    let (status, body) = json_of(ctx.cancel(user, order).await).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Order updated successfully.");
    assert_eq!(ctx.order_status(user, order).await, "Cancelled");

    assert_rejected(
        ctx.cancel(user, order).await,
        "Cannot cancel order. Order is already processed or cancelled.",
    )
    .await;
    assert_rejected(
        ctx.checkout(user, order).await,
        "Cannot checkout order. Order is already processed or cancelled.",
    )
    .await;
}

#[tokio::test]
async fn test_checkout_requires_items() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let user = ctx.create_user("U1").await;
    let order = OrderId::generate();
    let (cart_item, _) = ctx.add_cart_item(user, order, "Keyboard", 20).await;

    let response = ctx
        .request(Method::DELETE, user, &format!("/api/v1/cart-items/{cart_item}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_rejected(
        ctx.checkout(user, order).await,
        "Cannot checkout order. Order has no cart items.",
    )
    .await;
    assert_eq!(ctx.order_status(user, order).await, "Pending");
}

#[tokio::test]
async fn test_transitions_are_scoped_to_the_order_owner() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let owner = ctx.create_user("Owner").await;
    let other = ctx.create_user("Other").await;
    let order = OrderId::generate();
    ctx.add_cart_item(owner, order, "Keyboard", 20).await;

    assert_rejected(
        ctx.checkout(other, order).await,
        "Cannot checkout order. Order does not exist for this user.",
    )
    .await;
    assert_rejected(
        ctx.cancel(other, order).await,
        "Cannot cancel order. Order does not exist for this user.",
    )
    .await;
    assert_eq!(ctx.order_status(owner, order).await, "Pending");
}

#[tokio::test]
async fn test_missing_orders_are_reported() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let user = ctx.create_user("No orders").await;

    let response = ctx.request(Method::GET, user, "/api/v2/orders").send().await.unwrap();
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User does not have any order.");

    let missing = OrderId::generate();
    let response = ctx
        .request(Method::GET, user, &format!("/api/v1/orders/{missing}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx
        .request(Method::DELETE, user, &format!("/api/v1/orders/{missing}"))
        .send()
        .await
        .unwrap();
    assert_rejected(response, "Cannot delete order. Order does not exist.").await;
}

#[tokio::test]
async fn test_delete_order_removes_its_items() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let user = ctx.create_user("U1").await;
    let order = OrderId::generate();
    let (cart_item, _) = ctx.add_cart_item(user, order, "Keyboard", 20).await;

    let response = ctx
        .request(Method::DELETE, user, &format!("/api/v1/orders/{order}"))
        .send()
        .await
        .unwrap();
    let (status, body) = json_of(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order deleted successfully.");

    let response = ctx
        .request(Method::DELETE, user, &format!("/api/v1/cart-items/{cart_item}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // With the pending order gone the user may open a new one.
    let (_, response) = ctx.add_cart_item(user, OrderId::generate(), "Mouse", 5).await;
    assert_eq!(response.status(), StatusCode::OK);
}
