use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::json;

use crate::client::Client;
use crate::error::Result;
use crate::http::{QueryParams, RequestOptions, Response};
use crate::timestamp::{ms_timestamp, Timestamp};

/// CRM object families served by `/crm-objects/v1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrmObjectType {
    LineItems,
    Products,
}

impl CrmObjectType {
    /// Path segment of the object family.
    pub fn as_str(&self) -> &'static str {
        match self {
            CrmObjectType::LineItems => "line_items",
            CrmObjectType::Products => "products",
        }
    }
}

impl fmt::Display for CrmObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrmObjectType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "line_items" => Ok(CrmObjectType::LineItems),
            "products" => Ok(CrmObjectType::Products),
            other => Err(format!("unknown CRM object type '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Parameters for listing objects page by page.
#[derive(Debug, Clone, Default)]
pub struct GetAllParams {
    /// Properties to include; HubSpot returns none unless asked.
    pub properties: Vec<String>,
    pub properties_with_history: Vec<String>,
    /// `offset` of the previous page.
    pub offset: Option<u64>,
    /// Any other documented parameter, passed through.
    pub extra: Vec<(String, String)>,
}

impl GetAllParams {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .push_all("properties", &self.properties)
            .push_all("propertiesWithHistory", &self.properties_with_history)
            .push_opt("offset", self.offset);
        for (k, v) in &self.extra {
            query.push(k.as_str(), v);
        }
        query
    }
}

/// Parameters for reading the change log.
#[derive(Debug, Clone, Default)]
pub struct ChangeLogParams {
    /// Only changes after this time, in epoch milliseconds.
    pub timestamp: Option<i64>,
    /// `CREATED`, `UPDATED` or `DELETED`.
    pub change_type: Option<String>,
    /// Paging cursor: the last object id of the previous call.
    pub object_id: Option<u64>,
    pub extra: Vec<(String, String)>,
}

impl ChangeLogParams {
    /// Changes after the given time.
    pub fn since(time: impl Into<Timestamp>) -> Result<Self> {
        Ok(Self {
            timestamp: Some(ms_timestamp(time)?),
            ..Default::default()
        })
    }

    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .push_opt("timestamp", self.timestamp)
            .push_opt("changeType", self.change_type.as_deref())
            .push_opt("objectId", self.object_id);
        for (k, v) in &self.extra {
            query.push(k.as_str(), v);
        }
        query
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Line items, products and other `/crm-objects/v1` families.
pub struct CrmObjectsClient<'a> {
    client: &'a Client,
    object_type: CrmObjectType,
}

impl<'a> CrmObjectsClient<'a> {
    pub(crate) fn new(client: &'a Client, object_type: CrmObjectType) -> Self {
        Self {
            client,
            object_type,
        }
    }
}

impl CrmObjectsClient<'_> {
    pub fn object_type(&self) -> CrmObjectType {
        self.object_type
    }

    fn objects_url(&self, suffix: &str) -> String {
        self.client.url(&format!(
            "/crm-objects/v1/objects/{}{suffix}",
            self.object_type
        ))
    }

    /// List objects, one page at a time.
    pub fn get_all(&self, params: &GetAllParams) -> Result<Response> {
        let query = params.to_query().to_query_string();
        self.client
            .get(&self.objects_url("/paged"), Some(query.as_str()))
    }

    /// Get one object by id.
    pub fn get_by_id(&self, id: u64) -> Result<Response> {
        self.client.get(&self.objects_url(&format!("/{id}")), None)
    }

    /// Get several objects by id in one call.
    pub fn get_batch(&self, ids: &[u64]) -> Result<Response> {
        self.client.post(
            &self.objects_url("/batch-read"),
            RequestOptions::json(&json!({ "ids": ids }))?,
        )
    }

    /// Create an object from a list of [`PropertyValue`](crate::models::PropertyValue)s.
    pub fn create<T: Serialize + ?Sized>(&self, properties: &T) -> Result<Response> {
        self.client
            .post(&self.objects_url(""), RequestOptions::json(properties)?)
    }

    /// Create several objects; the payload is a list of property lists.
    pub fn create_batch<T: Serialize + ?Sized>(&self, objects: &T) -> Result<Response> {
        self.client.post(
            &self.objects_url("/batch-create"),
            RequestOptions::json(objects)?,
        )
    }

    pub fn update<T: Serialize + ?Sized>(&self, id: u64, properties: &T) -> Result<Response> {
        self.client.put(
            &self.objects_url(&format!("/{id}")),
            RequestOptions::json(properties)?,
        )
    }

    /// Update several objects by `objectId`; see
    /// [`ObjectUpdate`](crate::models::ObjectUpdate).
    pub fn update_batch<T: Serialize + ?Sized>(&self, objects: &T) -> Result<Response> {
        self.client.post(
            &self.objects_url("/batch-update"),
            RequestOptions::json(objects)?,
        )
    }

    pub fn delete(&self, id: u64) -> Result<Response> {
        self.client.delete(&self.objects_url(&format!("/{id}")))
    }

    pub fn delete_batch(&self, ids: &[u64]) -> Result<Response> {
        self.client.post(
            &self.objects_url("/batch-delete"),
            RequestOptions::json(&json!({ "ids": ids }))?,
        )
    }

    /// Recent creations, updates and deletions.
    pub fn get_change_log(&self, params: &ChangeLogParams) -> Result<Response> {
        let url = self
            .client
            .url(&format!("/crm-objects/v1/change-log/{}", self.object_type));
        let query = params.to_query().to_query_string();
        self.client.get(&url, Some(query.as_str()))
    }
}
