use std::borrow::Cow;
use std::fmt;
use std::ops::Index;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::Result;

static NULL: Value = Value::Null;

/// A HubSpot API response.
///
/// The body is parsed as JSON once, on construction. Bodies that are empty or
/// not JSON leave [`data`](Response::data) as `None`; the raw bytes stay
/// available through [`body`](Response::body).
///
/// Fields of the parsed body can be read by name or position:
///
/// ```
/// use hubspot_client::Response;
///
/// let response = Response::from_json(200, serde_json::json!({
///     "pipelineId": "default",
///     "stages": [{ "stageId": "appointmentscheduled" }],
/// }));
///
/// assert_eq!(response["pipelineId"], "default");
/// assert_eq!(response["stages"][0]["stageId"], "appointmentscheduled");
/// assert!(response["missing"].is_null());
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HeaderMap,
    url: String,
    body: Vec<u8>,
    data: Option<Value>,
}

impl Response {
    pub fn new(status: u16, headers: HeaderMap, url: impl Into<String>, body: Vec<u8>) -> Self {
        let data = if body.is_empty() {
            None
        } else {
            serde_json::from_slice(&body).ok()
        };

        Self {
            status,
            headers,
            url: url.into(),
            body,
            data,
        }
    }

    /// Build a response around an in-memory JSON value.
    pub fn from_json(status: u16, value: Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        Self {
            status,
            headers,
            url: String::new(),
            body: value.to_string().into_bytes(),
            data: Some(value),
        }
    }

    /// Read a blocking `reqwest` response to completion.
    pub(crate) fn from_reqwest(response: reqwest::blocking::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let url = response.url().to_string();
        let body = response.bytes()?.to_vec();
        Ok(Self::new(status, headers, url, body))
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of a header, looked up case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// All values of a header.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// The URL that produced this response, after redirects.
    pub fn effective_url(&self) -> &str {
        &self.url
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// The parsed JSON body.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut Value> {
        self.data.as_mut()
    }

    pub fn into_data(self) -> Option<Value> {
        self.data
    }

    /// Look up a field by key or an element by position.
    pub fn get<I: serde_json::value::Index>(&self, index: I) -> Option<&Value> {
        self.data.as_ref()?.get(index)
    }

    /// Look up a nested value by JSON pointer, e.g. `/stages/0/label`.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.data.as_ref()?.pointer(pointer)
    }

    /// Whether the body has a non-null field under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_null())
    }

    /// Set a field on the parsed body.
    ///
    /// An absent body becomes an empty object first. Array and scalar bodies
    /// are left untouched and nothing is set.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let data = self.data.get_or_insert_with(|| Value::Object(Map::new()));
        match data {
            Value::Object(map) => map.insert(key.into(), value),
            _ => None,
        }
    }

    /// Remove a field from the parsed body.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        match self.data.as_mut() {
            Some(Value::Object(map)) => map.remove(key),
            _ => None,
        }
    }

    /// Deserialize the body into a typed model.
    ///
    /// A body that is not JSON deserializes as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.data.clone().unwrap_or(Value::Null);
        Ok(serde_json::from_value(value)?)
    }
}

impl<I: serde_json::value::Index> Index<I> for Response {
    type Output = Value;

    fn index(&self, index: I) -> &Value {
        self.data.as_ref().map_or(&NULL, |d| &d[index])
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}\r\n", self.status)?;
        for (name, value) in &self.headers {
            write!(
                f,
                "{}: {}\r\n",
                name,
                value.to_str().unwrap_or("<binary>")
            )?;
        }
        write!(f, "\r\n{}", self.text())
    }
}
