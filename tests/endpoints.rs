//! Every endpoint method must produce the documented verb, URL and body.
//!
//! Requests are captured by an in-memory transport; nothing leaves the
//! process.

use std::sync::{Arc, Mutex};

use hubspot_client::models::{ObjectUpdate, PropertyValue};
use hubspot_client::{
    Body, ChangeLogParams, Config, Credentials, GetAllParams, HubSpot, HubSpotError, Method,
    Request, Response, Result, Transport,
};
use serde_json::{json, Value};

#[derive(Clone)]
struct RecordingTransport {
    requests: Arc<Mutex<Vec<Request>>>,
    status: u16,
    reply: Value,
}

impl RecordingTransport {
    fn new() -> Self {
        Self::replying(200, json!({ "ok": true }))
    }

    fn replying(status: u16, reply: Value) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            status,
            reply,
        }
    }

    fn last(&self) -> Request {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: Request) -> Result<Response> {
        self.requests.lock().unwrap().push(request);
        Ok(Response::from_json(self.status, self.reply.clone()))
    }
}

fn hubspot(config: Config) -> (HubSpot, RecordingTransport) {
    let transport = RecordingTransport::new();
    (HubSpot::with_transport(config, transport.clone()), transport)
}

fn with_key() -> (HubSpot, RecordingTransport) {
    hubspot(Config::with_api_key("demo"))
}

const API: &str = "https://api.hubapi.com";

// ---------------------------------------------------------------------------
// Deal pipelines
// ---------------------------------------------------------------------------

#[test]
fn pipelines_all() {
    let (hs, t) = with_key();
    hs.deal_pipelines().all().unwrap();

    let req = t.last();
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.url, format!("{API}/deals/v1/pipelines?hapikey=demo"));
    assert!(req.body.is_none());
}

#[test]
fn pipelines_get_by_id() {
    let (hs, t) = with_key();
    hs.deal_pipelines().get_by_id("default").unwrap();

    let req = t.last();
    assert_eq!(req.method, Method::Get);
    assert_eq!(
        req.url,
        format!("{API}/deals/v1/pipelines/default?hapikey=demo")
    );
}

#[test]
fn pipelines_create_posts_payload() {
    let (hs, t) = with_key();
    let pipeline = json!({
        "label": "API test pipeline",
        "displayOrder": 2,
        "stages": [{ "label": "Initial state", "displayOrder": 0, "probability": 0.1 }],
    });
    hs.deal_pipelines().create(&pipeline).unwrap();

    let req = t.last();
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.path(), format!("{API}/deals/v1/pipelines"));
    assert_eq!(req.json_body(), Some(&pipeline));
}

#[test]
fn pipelines_update_puts_payload() {
    let (hs, t) = with_key();
    let pipeline = json!({ "label": "Renamed", "stages": [] });
    hs.deal_pipelines().update("abc-123", &pipeline).unwrap();

    let req = t.last();
    assert_eq!(req.method, Method::Put);
    assert_eq!(req.path(), format!("{API}/deals/v1/pipelines/abc-123"));
    assert_eq!(req.json_body(), Some(&pipeline));
}

#[test]
fn pipelines_delete() {
    let (hs, t) = with_key();
    hs.deal_pipelines().delete("abc-123").unwrap();

    let req = t.last();
    assert_eq!(req.method, Method::Delete);
    assert_eq!(
        req.url,
        format!("{API}/deals/v1/pipelines/abc-123?hapikey=demo")
    );
}

// ---------------------------------------------------------------------------
// Line items / products
// ---------------------------------------------------------------------------

#[test]
fn line_items_get_all_without_params() {
    let (hs, t) = with_key();
    hs.line_items().get_all(&GetAllParams::default()).unwrap();

    assert_eq!(
        t.last().url,
        format!("{API}/crm-objects/v1/objects/line_items/paged?hapikey=demo")
    );
}

#[test]
fn line_items_get_all_encodes_params_in_order() {
    let (hs, t) = with_key();
    hs.line_items()
        .get_all(&GetAllParams {
            properties: vec!["name".into(), "price".into()],
            properties_with_history: vec!["quantity".into()],
            offset: Some(42),
            extra: vec![("includeDeletes".into(), "true".into())],
        })
        .unwrap();

    assert_eq!(
        t.last().url,
        format!(
            "{API}/crm-objects/v1/objects/line_items/paged?hapikey=demo\
             &properties=name&properties=price&propertiesWithHistory=quantity\
             &offset=42&includeDeletes=true"
        )
    );
}

#[test]
fn products_get_by_id() {
    let (hs, t) = with_key();
    hs.products().get_by_id(1642767).unwrap();

    let req = t.last();
    assert_eq!(req.method, Method::Get);
    assert_eq!(
        req.path(),
        format!("{API}/crm-objects/v1/objects/products/1642767")
    );
}

#[test]
fn products_get_batch_posts_ids() {
    let (hs, t) = with_key();
    hs.products().get_batch(&[1642767, 1642736]).unwrap();

    let req = t.last();
    assert_eq!(req.method, Method::Post);
    assert_eq!(
        req.path(),
        format!("{API}/crm-objects/v1/objects/products/batch-read")
    );
    assert_eq!(req.json_body(), Some(&json!({ "ids": [1642767, 1642736] })));
}

#[test]
fn line_items_create_posts_property_list() {
    let (hs, t) = with_key();
    let props = vec![
        PropertyValue::new("hs_product_id", "1642736"),
        PropertyValue::new("quantity", "50"),
    ];
    hs.line_items().create(&props).unwrap();

    let req = t.last();
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.path(), format!("{API}/crm-objects/v1/objects/line_items"));
    assert_eq!(
        req.json_body(),
        Some(&json!([
            { "name": "hs_product_id", "value": "1642736" },
            { "name": "quantity", "value": "50" },
        ]))
    );
}

#[test]
fn line_items_create_batch() {
    let (hs, t) = with_key();
    let batch = vec![
        vec![PropertyValue::new("name", "first")],
        vec![PropertyValue::new("name", "second")],
    ];
    hs.line_items().create_batch(&batch).unwrap();

    let req = t.last();
    assert_eq!(req.method, Method::Post);
    assert_eq!(
        req.path(),
        format!("{API}/crm-objects/v1/objects/line_items/batch-create")
    );
    assert_eq!(req.json_body().unwrap()[1][0]["value"], "second");
}

#[test]
fn products_update_puts_properties() {
    let (hs, t) = with_key();
    hs.products()
        .update(1642767, &[PropertyValue::new("price", "30.00")])
        .unwrap();

    let req = t.last();
    assert_eq!(req.method, Method::Put);
    assert_eq!(
        req.path(),
        format!("{API}/crm-objects/v1/objects/products/1642767")
    );
}

#[test]
fn products_update_batch_uses_object_ids() {
    let (hs, t) = with_key();
    let updates = vec![ObjectUpdate {
        object_id: 1642767,
        properties: vec![PropertyValue::new("price", "45.00")],
    }];
    hs.products().update_batch(&updates).unwrap();

    let req = t.last();
    assert_eq!(req.method, Method::Post);
    assert_eq!(
        req.path(),
        format!("{API}/crm-objects/v1/objects/products/batch-update")
    );
    assert_eq!(
        req.json_body(),
        Some(&json!([
            { "objectId": 1642767, "properties": [{ "name": "price", "value": "45.00" }] }
        ]))
    );
}

#[test]
fn line_items_delete() {
    let (hs, t) = with_key();
    hs.line_items().delete(9867220).unwrap();

    let req = t.last();
    assert_eq!(req.method, Method::Delete);
    assert_eq!(
        req.path(),
        format!("{API}/crm-objects/v1/objects/line_items/9867220")
    );
}

#[test]
fn line_items_delete_batch_posts_ids() {
    let (hs, t) = with_key();
    hs.line_items().delete_batch(&[9867220, 9867221]).unwrap();

    let req = t.last();
    assert_eq!(req.method, Method::Post);
    assert_eq!(
        req.path(),
        format!("{API}/crm-objects/v1/objects/line_items/batch-delete")
    );
    assert_eq!(req.json_body(), Some(&json!({ "ids": [9867220, 9867221] })));
}

#[test]
fn change_log_query_uses_millisecond_timestamp() {
    let (hs, t) = with_key();
    let mut params = ChangeLogParams::since(1_525_365_306_i64).unwrap();
    params.change_type = Some("UPDATED".into());
    hs.products().get_change_log(&params).unwrap();

    assert_eq!(
        t.last().url,
        format!(
            "{API}/crm-objects/v1/change-log/products?hapikey=demo\
             &timestamp=1525365306000&changeType=UPDATED"
        )
    );
    assert!(t
        .last()
        .query_pairs()
        .contains(&("timestamp".to_string(), "1525365306000".to_string())));
}

#[test]
fn query_values_are_percent_encoded() {
    let (hs, t) = with_key();
    hs.products()
        .get_all(&GetAllParams {
            properties: vec!["unit price".into()],
            ..Default::default()
        })
        .unwrap();

    let req = t.last();
    assert_eq!(req.query(), Some("hapikey=demo&properties=unit%20price"));
    assert_eq!(
        req.query_pairs()[1],
        ("properties".to_string(), "unit price".to_string())
    );
}

// ---------------------------------------------------------------------------
// Authentication and headers
// ---------------------------------------------------------------------------

#[test]
fn user_id_follows_the_key() {
    let (hs, t) = hubspot(Config::with_api_key("demo").user_id("77"));
    hs.deal_pipelines().all().unwrap();

    assert_eq!(
        t.last().url,
        format!("{API}/deals/v1/pipelines?hapikey=demo&userId=77")
    );
}

#[test]
fn oauth2_token_goes_in_the_header() {
    let (hs, t) = hubspot(Config::with_oauth_token("tok"));
    hs.products().get_by_id(1).unwrap();

    let req = t.last();
    assert_eq!(req.url, format!("{API}/crm-objects/v1/objects/products/1"));
    assert_eq!(req.header("authorization"), Some("Bearer tok"));
}

#[test]
fn legacy_access_token_goes_in_the_query() {
    let (hs, t) = hubspot(Config::new().credentials(Credentials::AccessToken("tok".into())));
    hs.deal_pipelines().all().unwrap();

    let req = t.last();
    assert_eq!(req.url, format!("{API}/deals/v1/pipelines?access_token=tok"));
    assert!(req.header("authorization").is_none());
}

#[test]
fn access_token_constructor_uses_the_query_parameter() {
    let (hs, t) = hubspot(Config::with_access_token("tok"));
    hs.products().get_by_id(1).unwrap();

    let req = t.last();
    assert_eq!(
        req.url,
        format!("{API}/crm-objects/v1/objects/products/1?access_token=tok")
    );
    assert!(req.header("authorization").is_none());

    let (hs, t) = hubspot(Config::with_oauth_token("tok"));
    hs.products().get_by_id(1).unwrap();
    assert!(!t.last().url.contains("access_token"));
}

#[test]
fn every_request_has_a_user_agent() {
    let (hs, t) = hubspot(Config::with_api_key("demo").user_agent("my-app/1.0"));
    hs.deal_pipelines().all().unwrap();

    assert_eq!(t.last().header("User-Agent"), Some("my-app/1.0"));
}

#[test]
fn default_headers_are_sent() {
    let (hs, t) = hubspot(Config::with_api_key("demo").default_header("X-Trace", "abc"));
    hs.line_items().get_by_id(5).unwrap();

    assert_eq!(t.last().header("x-trace"), Some("abc"));
}

#[test]
fn base_url_is_configurable() {
    let (hs, t) = hubspot(Config::with_api_key("demo").base_url("http://localhost:8080/"));
    hs.deal_pipelines().all().unwrap();

    assert_eq!(
        t.last().url,
        "http://localhost:8080/deals/v1/pipelines?hapikey=demo"
    );
}

#[test]
fn missing_credentials_fail_before_sending() {
    let (hs, t) = hubspot(Config::new());
    let err = hs.deal_pipelines().all().unwrap_err();

    assert!(matches!(err, HubSpotError::MissingCredentials));
    assert_eq!(t.count(), 0);
}

// ---------------------------------------------------------------------------
// OAuth 2.0
// ---------------------------------------------------------------------------

#[test]
fn tokens_by_code_posts_form_without_credentials() {
    let (hs, t) = with_key();
    hs.oauth2()
        .get_tokens_by_code("cid", "secret", "https://example.com/cb", "code-1")
        .unwrap();

    let req = t.last();
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url, format!("{API}/oauth/v1/token"));
    assert_eq!(
        req.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    let expected: Vec<(String, String)> = [
        ("grant_type", "authorization_code"),
        ("client_id", "cid"),
        ("client_secret", "secret"),
        ("redirect_uri", "https://example.com/cb"),
        ("code", "code-1"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(req.body, Some(Body::Form(expected)));
}

#[test]
fn tokens_by_refresh_works_without_any_credentials() {
    let (hs, t) = hubspot(Config::new());
    hs.oauth2()
        .get_tokens_by_refresh("cid", "secret", "refresh-1")
        .unwrap();

    let req = t.last();
    match req.body {
        Some(Body::Form(fields)) => {
            assert_eq!(fields[0], ("grant_type".into(), "refresh_token".into()));
            assert!(fields.iter().all(|(k, _)| k != "redirect_uri"));
            assert!(fields.contains(&("refresh_token".into(), "refresh-1".into())));
        }
        other => panic!("expected a form body, got {other:?}"),
    }
}

#[test]
fn token_introspection_urls() {
    let (hs, t) = hubspot(Config::with_oauth_token("tok"));
    let oauth = hs.oauth2();

    oauth.get_access_token_info("at-1").unwrap();
    let req = t.last();
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.url, format!("{API}/oauth/v1/access-tokens/at-1"));
    assert!(req.header("authorization").is_none());

    oauth.get_refresh_token_info("rt-1").unwrap();
    let req = t.last();
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.url, format!("{API}/oauth/v1/refresh-tokens/rt-1"));

    oauth.delete_refresh_token("rt-1").unwrap();
    let req = t.last();
    assert_eq!(req.method, Method::Delete);
    assert_eq!(req.url, format!("{API}/oauth/v1/refresh-tokens/rt-1"));
}

#[test]
fn auth_url_joins_scopes() {
    let (hs, t) = with_key();
    let url = hs.oauth2().get_auth_url(
        "5fd2bd3e",
        "https://www.example.com/auth-callback",
        &["contacts", "content"],
    );

    assert_eq!(
        url,
        "https://app.hubspot.com/oauth/authorize?client_id=5fd2bd3e&scope=contacts%20content\
         &redirect_uri=https%3A%2F%2Fwww.example.com%2Fauth-callback"
    );
    assert_eq!(t.count(), 0);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn non_success_status_surfaces_with_response() {
    let transport = RecordingTransport::replying(
        404,
        json!({ "status": "error", "message": "resource not found" }),
    );
    let hs = HubSpot::with_transport(Config::with_api_key("demo"), transport);

    let err = hs.products().get_by_id(404).unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "HTTP 404: resource not found");
    assert_eq!(err.response().unwrap()["status"], "error");
}
