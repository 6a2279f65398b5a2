//! Catalog client over real HTTP against a local mock server.

use moodeats_core::{AppConfig, CatalogClient, CatalogError, FetchError};
use std::fs;
use std::path::Path;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_PATH: &str = "/api/json/v1/1";

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

fn client_for(server: &MockServer) -> CatalogClient {
    let config = AppConfig {
        base_url: format!("{}{}", server.uri(), API_PATH),
        user_agent: "MoodEats/test".to_string(),
        ..AppConfig::default()
    };
    CatalogClient::from_config(&config).expect("client should build")
}

fn json_response(name: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "application/json")
        .set_body_string(fixture(name))
}

#[tokio::test]
async fn test_list_categories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/categories.php", API_PATH)))
        .and(header("user-agent", "MoodEats/test"))
        .respond_with(json_response("categories.json"))
        .expect(1)
        .mount(&server)
        .await;

    let categories = client_for(&server).list_categories().await.unwrap();
    assert_eq!(categories.len(), 14);
    assert_eq!(categories[0], "Beef");
}

#[tokio::test]
async fn test_filter_sends_category_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/filter.php", API_PATH)))
        .and(query_param("c", "Seafood"))
        .respond_with(json_response("filter_seafood.json"))
        .expect(1)
        .mount(&server)
        .await;

    let summaries = client_for(&server)
        .list_by_category("Seafood")
        .await
        .unwrap();
    let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["52959", "52802"]);
}

#[tokio::test]
async fn test_category_with_reserved_characters_is_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/filter.php", API_PATH)))
        .and(query_param("c", "Quick & Easy"))
        .respond_with(json_response("meals_null.json"))
        .expect(1)
        .mount(&server)
        .await;

    let summaries = client_for(&server)
        .list_by_category("Quick & Easy")
        .await
        .unwrap();
    assert!(summaries.is_empty());
}

#[tokio::test]
async fn test_lookup_and_null_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/lookup.php", API_PATH)))
        .and(query_param("i", "52802"))
        .respond_with(json_response("lookup_52802.json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/lookup.php", API_PATH)))
        .and(query_param("i", "1"))
        .respond_with(json_response("meals_null.json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let recipe = client.get_detail("52802").await.unwrap().unwrap();
    assert_eq!(recipe.name, "Fish pie");
    assert!(recipe.tags().is_empty());
    assert_eq!(recipe.video_id(), None);

    assert!(client.get_detail("1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_server_error_is_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/filter.php", API_PATH)))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_by_category("Beef")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Network(FetchError::HttpStatus { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_browse_hydrates_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/filter.php", API_PATH)))
        .and(query_param("c", "Seafood"))
        .respond_with(json_response("filter_seafood.json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/lookup.php", API_PATH)))
        .and(query_param("i", "52959"))
        .respond_with(json_response("lookup_52959.json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/lookup.php", API_PATH)))
        .and(query_param("i", "52802"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let hydrated = client_for(&server).browse("Seafood").await.unwrap();
    assert_eq!(hydrated.recipes.len(), 1);
    assert_eq!(hydrated.recipes[0].id, "52959");
    assert_eq!(hydrated.failures.len(), 1);
    assert_eq!(hydrated.failures[0].id, "52802");
}
