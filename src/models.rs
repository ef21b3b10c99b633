//! Typed views of the documented HubSpot payloads.
//!
//! Endpoints accept and return untyped JSON; these models are a convenience
//! for callers, used through [`Response::json`](crate::Response::json) and as
//! request payloads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Deal pipelines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    /// Assigned by the API on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<String>,
    pub label: String,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub stages: Vec<PipelineStage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<String>,
    pub label: String,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_won: Option<bool>,
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// CRM objects (line items, products)
// ---------------------------------------------------------------------------

/// A `name`/`value` pair, the shape used to create and update CRM objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub name: String,
    pub value: String,
}

impl PropertyValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One entry of a batch update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectUpdate {
    pub object_id: u64,
    pub properties: Vec<PropertyValue>,
}

/// A stored property as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectProperty {
    pub value: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub versions: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmObject {
    pub object_type: String,
    pub portal_id: u64,
    pub object_id: u64,
    #[serde(default)]
    pub properties: HashMap<String, ObjectProperty>,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub is_deleted: bool,
}

impl CrmObject {
    /// Current value of a property.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.value.as_str())
    }
}

/// A page of objects from a `/paged` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedObjects {
    #[serde(default)]
    pub objects: Vec<CrmObject>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogEntry {
    pub object_id: u64,
    pub change_type: String,
    pub timestamp: i64,
}

// ---------------------------------------------------------------------------
// OAuth 2.0
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until the access token expires.
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessTokenInfo {
    pub token: String,
    #[serde(default)]
    pub user: Option<String>,
    pub hub_domain: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub hub_id: u64,
    pub app_id: u64,
    pub expires_in: u64,
    #[serde(default)]
    pub user_id: Option<u64>,
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokenInfo {
    pub token: String,
    #[serde(default)]
    pub user: Option<String>,
    pub hub_domain: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub hub_id: u64,
    pub client_id: String,
    #[serde(default)]
    pub user_id: Option<u64>,
    pub token_type: String,
}
