//! End-to-end tests for the cart API.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - A seeded catalog (gb-cli seed)
//! - The API server running (cargo run -p greenbasket-api)

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use greenbasket_integration_tests::{api_base_url, client, fresh_session};

/// Fetch the first product in the catalog with stock available.
async fn first_in_stock_product(client: &reqwest::Client) -> Value {
    let products: Vec<Value> = client
        .get(format!("{}/products", api_base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    products
        .into_iter()
        .find(|p| p["stock"].as_i64().unwrap_or(0) > 2)
        .expect("seeded catalog has products in stock")
}

/// Add a product to a session's cart and return the response.
async fn add_to_cart(
    client: &reqwest::Client,
    session: &str,
    product_id: i64,
    quantity: i64,
) -> reqwest::Response {
    client
        .post(format!("{}/cart", api_base_url()))
        .json(&json!({
            "productId": product_id,
            "quantity": quantity,
            "sessionId": session,
        }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_empty_cart_lists_nothing() {
    let client = client();
    let session = fresh_session();

    let lines: Vec<Value> = client
        .get(format!("{}/cart/{session}", api_base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(lines.is_empty());
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_adding_same_product_twice_merges_into_one_line() {
    let client = client();
    let session = fresh_session();
    let product = first_in_stock_product(&client).await;
    let product_id = product["id"].as_i64().unwrap();

    let resp = add_to_cart(&client, &session, product_id, 1).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = add_to_cart(&client, &session, product_id, 2).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let line: Value = resp.json().await.unwrap();
    assert_eq!(line["quantity"].as_i64().unwrap(), 3);

    let lines: Vec<Value> = client
        .get(format!("{}/cart/{session}", api_base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"].as_i64().unwrap(), 3);
    assert_eq!(lines[0]["product"]["id"].as_i64().unwrap(), product_id);

    // Cleanup
    client
        .delete(format!("{}/cart/clear/{session}", api_base_url()))
        .send()
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_add_beyond_stock_fails_and_leaves_cart_unchanged() {
    let client = client();
    let session = fresh_session();
    let product = first_in_stock_product(&client).await;
    let product_id = product["id"].as_i64().unwrap();
    let stock = product["stock"].as_i64().unwrap();

    let resp = add_to_cart(&client, &session, product_id, stock + 1).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let message = resp.text().await.unwrap();
    assert!(message.contains("Insufficient stock"), "{message}");

    let lines: Vec<Value> = client
        .get(format!("{}/cart/{session}", api_base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(lines.is_empty());
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_add_unknown_product_returns_404() {
    let client = client();
    let session = fresh_session();

    let resp = add_to_cart(&client, &session, 999_999, 1).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_set_quantity_zero_removes_line() {
    let client = client();
    let session = fresh_session();
    let product = first_in_stock_product(&client).await;
    let product_id = product["id"].as_i64().unwrap();

    let line: Value = add_to_cart(&client, &session, product_id, 2)
        .await
        .json()
        .await
        .unwrap();
    let line_id = line["id"].as_i64().unwrap();

    let resp = client
        .put(format!("{}/cart/{line_id}", api_base_url()))
        .json(&0)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let lines: Vec<Value> = client
        .get(format!("{}/cart/{session}", api_base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(lines.is_empty());
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_set_quantity_above_stock_fails_and_keeps_old_quantity() {
    let client = client();
    let session = fresh_session();
    let product = first_in_stock_product(&client).await;
    let product_id = product["id"].as_i64().unwrap();
    let stock = product["stock"].as_i64().unwrap();

    let line: Value = add_to_cart(&client, &session, product_id, 1)
        .await
        .json()
        .await
        .unwrap();
    let line_id = line["id"].as_i64().unwrap();

    let resp = client
        .put(format!("{}/cart/{line_id}", api_base_url()))
        .json(&(stock + 1))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let lines: Vec<Value> = client
        .get(format!("{}/cart/{session}", api_base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(lines[0]["quantity"].as_i64().unwrap(), 1);

    // Cleanup
    client
        .delete(format!("{}/cart/clear/{session}", api_base_url()))
        .send()
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_remove_absent_line_returns_404_but_clear_is_idempotent() {
    let client = client();
    let session = fresh_session();

    let resp = client
        .delete(format!("{}/cart/999999", api_base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Clearing an empty cart is always 204
    let resp = client
        .delete(format!("{}/cart/clear/{session}", api_base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}
