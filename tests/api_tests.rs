use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;
use std::sync::Arc;

use drink_pairing_api::{
    error::{AppError, AppResult},
    models::{CatalogSnapshot, Dish, DishAnalysis, DrinkSummary, Pairing, PairingResult},
    routes::{create_router, AppState},
    services::{
        catalog::InMemoryCatalog,
        engine::JitterSource,
        providers::PairingProvider,
    },
};

/// Picks the first alcoholic and first non-alcoholic drink of the snapshot
struct StubProvider;

#[async_trait::async_trait]
impl PairingProvider for StubProvider {
    async fn recommend(&self, dish: &Dish, snapshot: &CatalogSnapshot) -> AppResult<PairingResult> {
        let alcoholic = snapshot.drinks().iter().find(|d| d.is_alcoholic());
        let soft = snapshot.drinks().iter().find(|d| !d.is_alcoholic());
        let pairings = alcoholic
            .into_iter()
            .chain(soft)
            .map(|d| Pairing {
                drink: DrinkSummary::from(d),
                explanation: "Stub pick".to_string(),
                match_score: 90,
            })
            .collect();

        Ok(PairingResult {
            dish: dish.to_string(),
            dish_analysis: DishAnalysis {
                flavour_profile: "Stubbed".to_string(),
                key_characteristics: vec!["a".into(), "b".into(), "c".into()],
            },
            pairings,
        })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

struct FailingProvider;

#[async_trait::async_trait]
impl PairingProvider for FailingProvider {
    async fn recommend(&self, _dish: &Dish, _snapshot: &CatalogSnapshot) -> AppResult<PairingResult> {
        Err(AppError::ExternalApi("upstream unavailable".to_string()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

fn seeded_state() -> AppState {
    AppState::new(Arc::new(InMemoryCatalog::seeded())).with_jitter(JitterSource::Seeded(42))
}

fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(create_router(Arc::new(state))).unwrap()
}

fn non_alcoholic_count(body: &Value) -> usize {
    body["pairings"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["drink"]["abv"] == "0%")
        .count()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(seeded_state());
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server(seeded_state());
    let response = server
        .get("/health")
        .add_header("x-request-id".parse::<axum::http::HeaderName>().unwrap(), "abc-123".parse::<axum::http::HeaderValue>().unwrap())
        .await;

    assert_eq!(response.header("x-request-id"), "abc-123");
}

#[tokio::test]
async fn test_list_drinks() {
    let server = create_test_server(seeded_state());
    let response = server.get("/api/drinks").await;
    response.assert_status_ok();

    let drinks: Vec<Value> = response.json();
    assert_eq!(drinks.len(), 22);
    assert_eq!(drinks[0]["id"], 1);
    assert!(drinks[0]["recommendedFoods"].is_string());
}

#[tokio::test]
async fn test_list_drinks_by_type() {
    let server = create_test_server(seeded_state());
    let response = server.get("/api/drinks").add_query_param("type", "GIN").await;
    response.assert_status_ok();

    let drinks: Vec<Value> = response.json();
    assert_eq!(drinks.len(), 3);
    assert!(drinks.iter().all(|d| d["type"] == "gin"));
}

#[tokio::test]
async fn test_search_drinks() {
    let server = create_test_server(seeded_state());
    let response = server.get("/api/drinks").add_query_param("q", "fuller").await;
    response.assert_status_ok();

    let drinks: Vec<Value> = response.json();
    assert!(!drinks.is_empty());
    assert!(drinks.iter().any(|d| d["name"] == "Fuller's London Pride"));
}

#[tokio::test]
async fn test_get_drink() {
    let server = create_test_server(seeded_state());
    let response = server.get("/api/drinks/2").await;
    response.assert_status_ok();

    let drink: Value = response.json();
    assert_eq!(drink["name"], "Fuller's London Pride");
}

#[tokio::test]
async fn test_get_missing_drink() {
    let server = create_test_server(seeded_state());
    server
        .get("/api/drinks/999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_drink_bad_id() {
    let server = create_test_server(seeded_state());
    server
        .get("/api/drinks/stout")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pairing_requires_dish() {
    let server = create_test_server(seeded_state());

    let response = server.get("/api/pairing").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Dish parameter is required");

    server
        .get("/api/pairing")
        .add_query_param("dish", "   ")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_fallback_pairing() {
    let server = create_test_server(seeded_state());
    let response = server
        .get("/api/pairing")
        .add_query_param("dish", "Fish and Chips")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["dish"], "Fish and Chips");
    assert!(body["dishAnalysis"]["flavourProfile"].is_string());

    let pairings = body["pairings"].as_array().unwrap();
    assert!((1..=3).contains(&pairings.len()));
    assert_eq!(non_alcoholic_count(&body), 1);
    assert_eq!(pairings[0]["matchScore"], 95);
    assert!(pairings[0]["drink"].get("recommendedFoods").is_none());
}

#[tokio::test]
async fn test_empty_catalog_is_server_error() {
    let state = AppState::new(Arc::new(InMemoryCatalog::new(Vec::new())));
    let server = create_test_server(state);

    let response = server
        .get("/api/pairing")
        .add_query_param("dish", "Roast Beef")
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["error"], "No drinks available in database");
}

#[tokio::test]
async fn test_generative_result_is_served() {
    let state = seeded_state().with_recommender(Arc::new(StubProvider));
    let server = create_test_server(state);

    let response = server
        .get("/api/pairing")
        .add_query_param("dish", "Roast Beef")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["dishAnalysis"]["flavourProfile"], "Stubbed");
    assert_eq!(body["pairings"].as_array().unwrap().len(), 2);
    assert!(body["pairings"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["explanation"] == "Stub pick"));
}

#[tokio::test]
async fn test_generative_failure_falls_back() {
    let failing = create_test_server(seeded_state().with_recommender(Arc::new(FailingProvider)));
    let plain = create_test_server(seeded_state());

    let from_failing: Value = failing
        .get("/api/pairing")
        .add_query_param("dish", "Roast Beef")
        .await
        .json();
    let from_plain: Value = plain
        .get("/api/pairing")
        .add_query_param("dish", "Roast Beef")
        .await
        .json();

    assert_eq!(from_failing, from_plain);
    assert_eq!(non_alcoholic_count(&from_failing), 1);
}
