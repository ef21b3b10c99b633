use serde::Serialize;

use crate::client::Client;
use crate::error::Result;
use crate::http::query::encode;
use crate::http::{RequestOptions, Response};

const PIPELINES_PATH: &str = "/deals/v1/pipelines";

/// Deal pipelines of a portal.
///
/// Every portal starts with a pipeline whose id is `default`.
pub struct DealPipelinesClient<'a> {
    client: &'a Client,
}

impl<'a> DealPipelinesClient<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

impl DealPipelinesClient<'_> {
    fn pipeline_url(&self, id: &str) -> String {
        self.client
            .url(&format!("{PIPELINES_PATH}/{}", encode(id)))
    }

    /// Get all deal pipelines of the portal.
    pub fn all(&self) -> Result<Response> {
        self.client.get(&self.client.url(PIPELINES_PATH), None)
    }

    /// Get a single deal pipeline.
    pub fn get_by_id(&self, id: &str) -> Result<Response> {
        self.client.get(&self.pipeline_url(id), None)
    }

    /// Create a deal pipeline.
    ///
    /// The API generates the pipeline id. When the payload has no stages a
    /// default set is created.
    pub fn create<T: Serialize + ?Sized>(&self, pipeline: &T) -> Result<Response> {
        self.client.post(
            &self.client.url(PIPELINES_PATH),
            RequestOptions::json(pipeline)?,
        )
    }

    /// Overwrite an existing deal pipeline.
    ///
    /// The stages in the payload replace the existing ones; stages that are
    /// left out are deleted.
    pub fn update<T: Serialize + ?Sized>(&self, id: &str, pipeline: &T) -> Result<Response> {
        self.client
            .put(&self.pipeline_url(id), RequestOptions::json(pipeline)?)
    }

    /// Delete a deal pipeline.
    pub fn delete(&self, id: &str) -> Result<Response> {
        self.client.delete(&self.pipeline_url(id))
    }
}
