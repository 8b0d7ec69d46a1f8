//! Handler tests for Products domain
//!
//! These exercise the products router over the in-memory repository:
//! - Request deserialization and validation
//! - Response serialization
//! - HTTP status codes and error bodies

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use domain_products::*;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(repo: &InMemoryProductRepository) -> Router {
    handlers::router(ProductService::new(repo.clone()))
}

fn price(raw: &str) -> Decimal {
    raw.parse().unwrap()
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            request = request.header("content-type", "application/json");
            Body::from(serde_json::to_string(&body).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(request.body(body).unwrap()).await.unwrap()
}

async fn seed(repo: &InMemoryProductRepository, items: &[(&str, &str, &str)]) {
    for (name, description, amount) in items {
        repo.create(CreateProduct {
            name: name.to_string(),
            description: description.to_string(),
            price: price(amount),
        })
        .await
        .unwrap();
    }
}

#[tokio::test]
async fn test_create_product_returns_201() {
    let repo = InMemoryProductRepository::new();

    let response = send(
        app(&repo),
        "POST",
        "/",
        Some(json!({"name": "Widget", "description": "A widget", "price": "9.99"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, 1);
    assert_eq!(product.name, "Widget");
    assert_eq!(product.price, price("9.99"));
}

#[tokio::test]
async fn test_create_product_validates_input() {
    let repo = InMemoryProductRepository::new();

    let response = send(
        app(&repo),
        "POST",
        "/",
        Some(json!({"name": " ", "description": "A widget", "price": 0})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["price"].is_array());

    let stored = repo
        .search(&ProductCriteria::all(), &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(stored.total_elements, 0);
}

#[tokio::test]
async fn test_create_product_rejects_missing_fields() {
    let repo = InMemoryProductRepository::new();

    let response = send(app(&repo), "POST", "/", Some(json!({"name": "Widget"}))).await;

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_get_product_not_found() {
    let repo = InMemoryProductRepository::new();

    let response = send(app(&repo), "GET", "/42", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Product not found with id: 42");
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let repo = InMemoryProductRepository::new();

    for (method, body) in [
        ("GET", None),
        ("PATCH", Some(json!({"price": "1.00"}))),
        ("DELETE", None),
    ] {
        let response = send(app(&repo), method, "/not-a-number", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method}");
    }
}

#[tokio::test]
async fn test_update_keeps_absent_fields() {
    let repo = InMemoryProductRepository::new();
    seed(&repo, &[("Widget", "A widget", "9.99")]).await;

    let response = send(
        app(&repo),
        "PATCH",
        "/1",
        Some(json!({"name": null, "price": "19.99"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, 1);
    assert_eq!(product.name, "Widget");
    assert_eq!(product.description, "A widget");
    assert_eq!(product.price, price("19.99"));
}

#[tokio::test]
async fn test_update_rejects_blank_text() {
    let repo = InMemoryProductRepository::new();
    seed(&repo, &[("Widget", "A widget", "9.99")]).await;

    let response = send(app(&repo), "PATCH", "/1", Some(json!({"description": ""}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unchanged = repo.get_by_id(1).await.unwrap().unwrap();
    assert_eq!(unchanged.description, "A widget");
}

#[tokio::test]
async fn test_update_missing_product_is_404() {
    let repo = InMemoryProductRepository::new();

    let response = send(app(&repo), "PATCH", "/9", Some(json!({"price": "1.00"}))).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let repo = InMemoryProductRepository::new();
    seed(&repo, &[("Widget", "A widget", "9.99")]).await;

    let response = send(app(&repo), "DELETE", "/1", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.into_body().collect().await.unwrap().to_bytes().is_empty());

    let response = send(app(&repo), "DELETE", "/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_without_filters_returns_first_page() {
    let repo = InMemoryProductRepository::new();
    seed(
        &repo,
        &[
            ("Steel Bolt", "M8 hex bolt", "0.50"),
            ("Nut", "M8 nut", "0.20"),
            ("Anchor", "Wall anchor", "12.00"),
        ],
    )
    .await;

    let response = send(app(&repo), "GET", "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let page: Page<Product> = json_body(response.into_body()).await;
    assert_eq!(page.total_elements, 3);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.page, 0);
    assert_eq!(page.size, 20);
    let ids: Vec<i32> = page.content.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_search_by_name_is_case_insensitive() {
    let repo = InMemoryProductRepository::new();
    seed(
        &repo,
        &[("Steel Bolt", "M8 hex bolt", "0.50"), ("Nut", "M8 nut", "0.20")],
    )
    .await;

    let response = send(app(&repo), "GET", "/?name=bolt", None).await;

    let page: Page<Product> = json_body(response.into_body()).await;
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].name, "Steel Bolt");
}

#[tokio::test]
async fn test_search_price_range_is_inclusive() {
    let repo = InMemoryProductRepository::new();
    seed(
        &repo,
        &[
            ("Cheap", "below range", "9.99"),
            ("Low", "lower bound", "10.00"),
            ("High", "upper bound", "20.00"),
            ("Pricey", "above range", "20.01"),
        ],
    )
    .await;

    let response = send(app(&repo), "GET", "/?min_price=10&max_price=20", None).await;

    let page: Page<Product> = json_body(response.into_body()).await;
    let names: Vec<&str> = page.content.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Low", "High"]);
}

#[tokio::test]
async fn test_search_sort_and_paging() {
    let repo = InMemoryProductRepository::new();
    seed(
        &repo,
        &[
            ("A", "first", "3"),
            ("B", "second", "1"),
            ("C", "third", "2"),
            ("D", "fourth", "2"),
        ],
    )
    .await;

    let response = send(app(&repo), "GET", "/?sort=price:desc&page=1&size=2", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let page: Page<Product> = json_body(response.into_body()).await;
    assert_eq!(page.total_elements, 4);
    assert_eq!(page.total_pages, 2);
    let names: Vec<&str> = page.content.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["D", "B"]);
}

#[tokio::test]
async fn test_search_rejects_bad_parameters() {
    let repo = InMemoryProductRepository::new();

    for uri in [
        "/?size=0",
        "/?size=101",
        "/?sort=weight",
        "/?min_price=0",
        "/?max_price=-3",
        "/?page=minus-one",
    ] {
        let response = send(app(&repo), "GET", uri, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_end_to_end_lifecycle() {
    let repo = InMemoryProductRepository::new();

    let response = send(
        app(&repo),
        "POST",
        "/",
        Some(json!({"name": "Widget", "description": "A widget", "price": 9.99})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Product = json_body(response.into_body()).await;
    let uri = format!("/{}", created.id);

    let response = send(app(&repo), "GET", &uri, None).await;
    let fetched: Product = json_body(response.into_body()).await;
    assert_eq!(fetched, created);

    let response = send(app(&repo), "PATCH", &uri, Some(json!({"price": "19.99"}))).await;
    let updated: Value = json_body(response.into_body()).await;
    assert_eq!(
        updated,
        json!({"id": created.id, "name": "Widget", "description": "A widget", "price": "19.99"})
    );

    let response = send(app(&repo), "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(app(&repo), "GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
