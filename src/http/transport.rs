use std::time::Duration;

use reqwest::blocking::Client as ReqwestClient;
use reqwest::header::{HeaderName, HeaderValue};

use super::request::{Body, Method, Request};
use super::response::Response;
use crate::error::{HubSpotError, Result};

/// The HTTP client the API client forwards requests to.
///
/// Implementations send the request as-is and return whatever the server
/// answered, whatever the status. Status handling belongs to the caller.
pub trait Transport: Send + Sync {
    fn send(&self, request: Request) -> Result<Response>;

    fn get(&self, url: &str) -> Result<Response> {
        self.send(Request::new(Method::Get, url))
    }

    fn post(&self, url: &str, body: Option<Body>) -> Result<Response> {
        let request = Request::new(Method::Post, url);
        self.send(match body {
            Some(body) => request.with_body(body),
            None => request,
        })
    }

    fn put(&self, url: &str, body: Option<Body>) -> Result<Response> {
        let request = Request::new(Method::Put, url);
        self.send(match body {
            Some(body) => request.with_body(body),
            None => request,
        })
    }

    fn delete(&self, url: &str) -> Result<Response> {
        self.send(Request::new(Method::Delete, url))
    }
}

/// [`Transport`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: ReqwestClient,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = ReqwestClient::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    /// Wrap an already configured `reqwest` client (proxies, TLS, ...).
    pub fn from_client(http: ReqwestClient) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: Request) -> Result<Response> {
        let mut builder = self.http.request(request.method.into(), request.url.as_str());

        for (name, value) in &request.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| HubSpotError::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| HubSpotError::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            builder = builder.header(header_name, header_value);
        }

        builder = match request.body {
            Some(Body::Json(ref value)) => builder.json(value),
            Some(Body::Form(ref fields)) => builder.form(fields),
            None => builder,
        };

        let response = builder.send()?;
        Response::from_reqwest(response)
    }
}
