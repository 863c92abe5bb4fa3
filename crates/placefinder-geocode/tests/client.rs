//! Integration tests for `GeocodeClient` using wiremock HTTP mocks.

use placefinder_core::Suggestion;
use placefinder_geocode::{GeocodeClient, GeocodeError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BIAS: (f64, f64) = (-116.539247, 33.825993);

fn test_client(base_url: &str) -> GeocodeClient {
    GeocodeClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn suggest_returns_suggestions_in_service_order() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "suggestions": [
            { "text": "Main St, Palm Springs, CA", "magicKey": "K-main", "isCollection": false },
            { "text": "Oak St, Palm Springs, CA", "magicKey": "K-oak", "isCollection": false }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/suggest"))
        .and(query_param("f", "json"))
        .and(query_param("token", "test-key"))
        .and(query_param("text", "st"))
        .and(query_param("location", "-116.539247,33.825993"))
        .and(query_param("maxSuggestions", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let suggestions = client
        .suggest("st", BIAS, 5)
        .await
        .expect("should parse suggestions");

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].text, "Main St, Palm Springs, CA");
    assert_eq!(suggestions[0].magic_key, "K-main");
    assert_eq!(suggestions[1].magic_key, "K-oak");
}

#[tokio::test]
async fn suggest_with_empty_result_is_ok() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/suggest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "suggestions": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let suggestions = client
        .suggest("zzzzzz", BIAS, 5)
        .await
        .expect("empty suggestion list is not an error");

    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn resolve_uses_first_candidate_and_maps_axes() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "candidates": [
            {
                "address": "123 Main St",
                "location": { "x": -116.5, "y": 33.8 },
                "score": 100.0
            },
            {
                "address": "123 Main St Unit B",
                "location": { "x": -116.6, "y": 33.9 },
                "score": 90.0
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/findAddressCandidates"))
        .and(query_param("magicKey", "K1"))
        .and(query_param("maxLocations", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let resolved = client
        .resolve(&Suggestion {
            text: "123 Main St".to_owned(),
            magic_key: "K1".to_owned(),
        })
        .await
        .expect("should resolve");

    assert_eq!(resolved.address, "123 Main St");
    assert!((resolved.latitude - 33.8).abs() < f64::EPSILON);
    assert!((resolved.longitude - -116.5).abs() < f64::EPSILON);
    // Latitude first in the user-facing rendering.
    assert_eq!(
        resolved.to_string(),
        "Address: 123 Main St\nLat/Long: [33.8, -116.5]"
    );
}

#[tokio::test]
async fn resolve_with_no_candidates_returns_err() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/findAddressCandidates"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .resolve(&Suggestion {
            text: "nowhere".to_owned(),
            magic_key: "K-none".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(GeocodeError::NoCandidates(ref k)) if k == "K-none"),
        "expected NoCandidates, got: {result:?}"
    );
}

#[tokio::test]
async fn api_error_envelope_returns_err() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {
            "code": 498,
            "message": "Invalid token."
        }
    });

    Mock::given(method("GET"))
        .and(path("/suggest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.suggest("main", BIAS, 5).await;

    assert!(result.is_err());
    let msg = result.unwrap_err().to_string();
    assert!(
        msg.contains("Invalid token."),
        "expected error message to contain 'Invalid token.', got: {msg}"
    );
}

#[tokio::test]
async fn http_error_status_returns_err() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/suggest"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.suggest("main", BIAS, 5).await;

    assert!(matches!(result, Err(GeocodeError::Http(_))));
}
