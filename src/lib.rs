//! HubSpot API client library for Rust.
//!
//! A thin, blocking client for the [HubSpot REST API](https://developers.hubspot.com/docs/api/overview).
//! Each endpoint method maps one documented operation to an HTTP verb and
//! URL and returns the wrapped [`Response`]; payloads are plain JSON.
//!
//! # Quick Start
//!
//! ```no_run
//! use hubspot_client::HubSpot;
//! use hubspot_client::models::PropertyValue;
//!
//! let hubspot = HubSpot::with_api_key("demo").unwrap();
//!
//! // List deal pipelines
//! let pipelines = hubspot.deal_pipelines().all().unwrap();
//! for p in pipelines.data().and_then(|d| d.as_array()).into_iter().flatten() {
//!     println!("{}: {}", p["pipelineId"], p["label"]);
//! }
//!
//! // Create a product
//! let product = hubspot
//!     .products()
//!     .create(&[PropertyValue::new("name", "Onboarding")])
//!     .unwrap();
//! println!("created {}", product["objectId"]);
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod models;
pub mod timestamp;

// Re-export the main public types at the crate root for convenience.
pub use client::{Client, HubSpot};
pub use config::{Config, Credentials};
pub use endpoints::{
    ChangeLogParams, CrmObjectType, CrmObjectsClient, DealPipelinesClient, GetAllParams,
    OAuth2Client,
};
pub use error::{HubSpotError, Result};
pub use http::{
    build_query_string, Body, Method, QueryParams, Request, RequestOptions, ReqwestTransport,
    Response, Transport,
};
pub use timestamp::ms_timestamp;
