#![allow(clippy::unwrap_used)]
// Integration tests for `DemoClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crmdash_api::{DemoClient, Endpoints, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DemoClient) {
    let server = MockServer::start().await;
    let endpoints = Endpoints::from_base(&server.uri()).unwrap();
    let client = DemoClient::with_client(reqwest::Client::new(), endpoints);
    (server, client)
}

// ── Users ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_users() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": { "street": "Kulas Light", "suite": "Apt. 556", "city": "Gwenborough", "zipcode": "92998-3874" },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": { "name": "Romaguera-Crona", "catchPhrase": "Multi-layered client-server neural-net", "bs": "harness real-time e-markets" }
        },
        {
            "id": 2,
            "name": "Ervin Howell",
            "email": "Shanna@melissa.tv",
            "address": { "city": "Wisokyburgh" },
            "company": { "name": "Deckow-Crist" }
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let users = client.list_users().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, 1);
    assert_eq!(users[0].company.as_ref().unwrap().name, "Romaguera-Crona");
    assert_eq!(users[1].address.as_ref().unwrap().city, "Wisokyburgh");
    assert_eq!(users[1].username, None);
}

#[tokio::test]
async fn test_list_users_empty_array() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let users = client.list_users().await.unwrap();
    assert!(users.is_empty());
}

// ── Products ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_products_with_and_without_rating() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 5,
            "title": "John Hardy Women's Legends Naga Bracelet",
            "price": 695,
            "description": "From our Legends Collection",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/71pWzhdJNwL._AC_UL640_QL65_ML3_.jpg"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let products = client.list_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].rating.unwrap().count, 120);
    assert_eq!(products[1].category, "jewelery");
    assert!(products[1].rating.is_none());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let result = client.list_products().await;

    match result {
        Err(Error::Status { status, url }) => {
            assert_eq!(status, 503);
            assert!(url.ends_with("/products"), "unexpected url: {url}");
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found_is_classified() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.list_users().await.unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_malformed_body_keeps_raw_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = client.list_users().await;

    assert!(
        matches!(&result, Err(Error::Deserialization { body, .. }) if body.contains("not json")),
        "expected Deserialization error, got: {result:?}"
    );
}
