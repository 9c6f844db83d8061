//! End-to-end tests for the product catalog API.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::Value;

use greenbasket_integration_tests::{api_base_url, client};

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_list_products_returns_seeded_catalog() {
    let client = client();

    let products: Vec<Value> = client
        .get(format!("{}/products", api_base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(!products.is_empty());
    for product in &products {
        assert!(product["id"].is_i64());
        assert!(product["name"].is_string());
        assert!(product["price"].is_string() || product["price"].is_number());
        assert!(product["stock"].as_i64().unwrap() >= 0);
    }
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_category_filter_only_returns_matching_products() {
    let client = client();

    let categories: Vec<String> = client
        .get(format!("{}/products/categories", api_base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!categories.is_empty());

    let category = &categories[0];
    let products: Vec<Value> = client
        .get(format!("{}/products?category={category}", api_base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(!products.is_empty());
    for product in &products {
        assert_eq!(product["category"].as_str().unwrap(), category);
    }
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_unknown_category_returns_empty_list_not_error() {
    let client = client();

    let resp = client
        .get(format!(
            "{}/products?category=no-such-category",
            api_base_url()
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let products: Vec<Value> = resp.json().await.unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_get_product_by_id() {
    let client = client();

    let products: Vec<Value> = client
        .get(format!("{}/products", api_base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = products[0]["id"].as_i64().unwrap();

    let product: Value = client
        .get(format!("{}/products/{id}", api_base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(product["id"].as_i64().unwrap(), id);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_get_unknown_product_returns_404() {
    let client = client();

    let resp = client
        .get(format!("{}/products/999999", api_base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_categories_are_distinct_and_sorted() {
    let client = client();

    let categories: Vec<String> = client
        .get(format!("{}/products/categories", api_base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let mut sorted = categories.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(categories, sorted);
}
