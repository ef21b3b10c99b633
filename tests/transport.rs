//! The reqwest transport against a local mock server.

use httpmock::prelude::*;
use hubspot_client::models::{Pipeline, TokenResponse};
use hubspot_client::{Config, HubSpot, HubSpotError};
use serde_json::json;

fn client_for(server: &MockServer, config: Config) -> HubSpot {
    HubSpot::new(config.base_url(server.base_url())).unwrap()
}

#[test]
fn api_key_travels_as_hapikey() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/deals/v1/pipelines")
            .query_param("hapikey", "demo");
        then.status(200).json_body(json!([
            {
                "pipelineId": "default",
                "label": "Sales Pipeline",
                "displayOrder": 0,
                "active": true,
                "stages": [
                    { "stageId": "appointmentscheduled", "label": "Appointment Scheduled",
                      "displayOrder": 0, "probability": 0.2, "active": true, "closedWon": false }
                ]
            }
        ]));
    });

    let hubspot = client_for(&server, Config::with_api_key("demo"));
    let response = hubspot.deal_pipelines().all().unwrap();

    mock.assert();
    assert_eq!(response.status(), 200);
    assert_eq!(response[0]["label"], "Sales Pipeline");

    let pipelines: Vec<Pipeline> = response.json().unwrap();
    assert_eq!(pipelines[0].pipeline_id.as_deref(), Some("default"));
    assert_eq!(pipelines[0].stages[0].probability, Some(0.2));
}

#[test]
fn bearer_token_and_json_body_are_sent() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/crm-objects/v1/objects/products")
            .header("authorization", "Bearer tok")
            .json_body(json!([{ "name": "name", "value": "Onboarding" }]));
        then.status(200)
            .json_body(json!({ "objectType": "PRODUCT", "portalId": 62515, "objectId": 1642767 }));
    });

    let hubspot = client_for(&server, Config::with_oauth_token("tok"));
    let response = hubspot
        .products()
        .create(&json!([{ "name": "name", "value": "Onboarding" }]))
        .unwrap();

    mock.assert();
    assert_eq!(response["objectId"], 1642767);
}

#[test]
fn token_exchange_sends_a_form() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/oauth/v1/token")
            .header("content-type", "application/x-www-form-urlencoded")
            .body_contains("grant_type=authorization_code")
            .body_contains("redirect_uri=https%3A%2F%2Fexample.com%2Fcb")
            .body_contains("code=abc");
        then.status(200).json_body(json!({
            "access_token": "at",
            "refresh_token": "rt",
            "expires_in": 21600
        }));
    });

    let hubspot = client_for(&server, Config::new());
    let response = hubspot
        .oauth2()
        .get_tokens_by_code("cid", "secret", "https://example.com/cb", "abc")
        .unwrap();

    mock.assert();
    let tokens: TokenResponse = response.json().unwrap();
    assert_eq!(tokens.refresh_token, "rt");
    assert_eq!(tokens.expires_in, 21600);
}

#[test]
fn error_status_is_surfaced() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/crm-objects/v1/objects/line_items/1");
        then.status(401).json_body(json!({
            "status": "error",
            "message": "The API key provided is invalid."
        }));
    });

    let hubspot = client_for(&server, Config::with_api_key("bad"));
    let err = hubspot.line_items().get_by_id(1).unwrap_err();

    assert_eq!(err.status(), Some(401));
    match err {
        HubSpotError::Status {
            message, response, ..
        } => {
            assert_eq!(message, "The API key provided is invalid.");
            assert_eq!(response["status"], "error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn error_without_message_falls_back_to_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/deals/v1/pipelines/nope");
        then.status(500).body("upstream exploded");
    });

    let hubspot = client_for(&server, Config::with_api_key("demo"));
    let err = hubspot.deal_pipelines().delete("nope").unwrap_err();

    assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    assert_eq!(err.response().unwrap().text(), "upstream exploded");
}

#[test]
fn empty_body_is_not_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/crm-objects/v1/objects/line_items/9");
        then.status(204);
    });

    let hubspot = client_for(&server, Config::with_api_key("demo"));
    let response = hubspot.line_items().delete(9).unwrap();

    assert_eq!(response.status(), 204);
    assert!(response.data().is_none());
    assert!(response["anything"].is_null());
}

#[test]
fn non_json_body_keeps_raw_text_and_headers() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/deals/v1/pipelines/default");
        then.status(200)
            .header("content-type", "text/plain")
            .header("x-hubspot-ratelimit-remaining", "99")
            .body("not json");
    });

    let hubspot = client_for(&server, Config::with_api_key("demo"));
    let response = hubspot.deal_pipelines().get_by_id("default").unwrap();

    assert!(response.data().is_none());
    assert_eq!(response.text(), "not json");
    assert_eq!(response.header("X-HubSpot-RateLimit-Remaining"), Some("99"));
    assert!(response.effective_url().contains("/deals/v1/pipelines/default"));
}

#[test]
fn connection_failure_is_a_transport_error() {
    // nothing listens on port 1
    let hubspot = HubSpot::new(Config::with_api_key("demo").base_url("http://127.0.0.1:1")).unwrap();
    let err = hubspot.deal_pipelines().all().unwrap_err();

    assert!(matches!(err, HubSpotError::RequestFailed(_)));
    assert_eq!(err.status(), None);
}

#[test]
fn raw_transport_passes_any_status_through() {
    use hubspot_client::{Body, ReqwestTransport, Transport};

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT)
            .path("/anything")
            .json_body(json!({ "label": "x" }));
        then.status(409).json_body(json!({ "message": "conflict" }));
    });

    let transport = ReqwestTransport::new().unwrap();
    let response = transport
        .put(
            &format!("{}/anything", server.base_url()),
            Some(Body::Json(json!({ "label": "x" }))),
        )
        .unwrap();

    assert_eq!(response.status(), 409);
    assert_eq!(response["message"], "conflict");
}
