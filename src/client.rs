use tracing::{debug, warn};

use crate::config::Config;
use crate::endpoints::{CrmObjectType, CrmObjectsClient, DealPipelinesClient, OAuth2Client};
use crate::error::{HubSpotError, Result};
use crate::http::query::encode;
use crate::http::{Method, Request, RequestOptions, ReqwestTransport, Response, Transport};

// ---------------------------------------------------------------------------
// Request plumbing
// ---------------------------------------------------------------------------

/// Shared logic for authenticating requests and handing them to the
/// transport. Every endpoint client borrows one of these.
pub struct Client {
    config: Config,
    transport: Box<dyn Transport>,
}

impl Client {
    /// Create a client backed by a blocking `reqwest` transport.
    pub fn new(config: Config) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client that forwards to the given transport.
    pub fn with_transport(config: Config, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Box::new(transport),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the full URL for an API path, e.g. `/deals/v1/pipelines`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Append authentication, `userId` and the caller's query string to an
    /// endpoint URL.
    ///
    /// `query_string` is expected in the `&k=v&k=v` form produced by
    /// [`build_query_string`](crate::http::build_query_string).
    pub fn generate_url(
        &self,
        endpoint: &str,
        query_string: Option<&str>,
        requires_auth: bool,
    ) -> String {
        let mut query = String::new();

        if requires_auth {
            if let Some((name, value)) = self.config.credentials.query_pair() {
                query.push_str(&format!("&{name}={}", encode(value)));
            }
            if let Some(ref user_id) = self.config.user_id {
                query.push_str(&format!("&userId={}", encode(user_id)));
            }
        }
        if let Some(qs) = query_string {
            query.push_str(qs);
        }

        let query = query.trim_start_matches('&');
        if query.is_empty() {
            endpoint.to_string()
        } else {
            format!("{endpoint}?{query}")
        }
    }

    /// Send a request and map non-2xx answers to [`HubSpotError::Status`].
    pub fn request(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
        query_string: Option<&str>,
        requires_auth: bool,
    ) -> Result<Response> {
        if requires_auth && self.config.credentials.is_none() {
            return Err(HubSpotError::MissingCredentials);
        }

        let mut request = Request::new(
            method,
            self.generate_url(endpoint, query_string, requires_auth),
        );

        for (name, value) in &self.config.default_headers {
            request.set_header(name.as_str(), value.as_str());
        }
        request.set_header("User-Agent", self.config.user_agent.as_str());
        if requires_auth {
            if let Some(token) = self.config.credentials.bearer() {
                request.set_header("Authorization", format!("Bearer {token}"));
            }
        }
        for (name, value) in options.headers {
            request.set_header(name, value);
        }
        request.body = options.body;

        debug!(method = %method, endpoint = request.path(), "sending HubSpot request");
        let response = self.transport.send(request)?;
        debug!(status = response.status(), "received HubSpot response");

        if !response.is_success() {
            warn!(
                method = %method,
                endpoint,
                status = response.status(),
                "HubSpot request failed"
            );
            return Err(HubSpotError::from_response(response));
        }

        Ok(response)
    }

    // ---- convenience wrappers for common HTTP verbs -----------------------

    pub fn get(&self, endpoint: &str, query_string: Option<&str>) -> Result<Response> {
        self.request(
            Method::Get,
            endpoint,
            RequestOptions::new(),
            query_string,
            true,
        )
    }

    pub fn post(&self, endpoint: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::Post, endpoint, options, None, true)
    }

    pub fn put(&self, endpoint: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::Put, endpoint, options, None, true)
    }

    pub fn delete(&self, endpoint: &str) -> Result<Response> {
        self.request(Method::Delete, endpoint, RequestOptions::new(), None, true)
    }
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Main entry point for interacting with the HubSpot API.
///
/// ```no_run
/// use hubspot_client::HubSpot;
///
/// let hubspot = HubSpot::with_api_key("demo").unwrap();
/// let pipelines = hubspot.deal_pipelines().all().unwrap();
/// println!("{}", pipelines[0]["label"]);
/// ```
pub struct HubSpot {
    client: Client,
}

impl HubSpot {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            client: Client::new(config)?,
        })
    }

    /// Create an instance authenticating with a developer API key.
    pub fn with_api_key(api_key: &str) -> Result<Self> {
        Self::new(Config::with_api_key(api_key))
    }

    /// Create an instance passing a legacy OAuth access token in the query
    /// string.
    pub fn with_access_token(token: &str) -> Result<Self> {
        Self::new(Config::with_access_token(token))
    }

    /// Create an instance authenticating with an OAuth 2.0 bearer token.
    pub fn with_oauth_token(token: &str) -> Result<Self> {
        Self::new(Config::with_oauth_token(token))
    }

    /// Create an instance configured from `HUBSPOT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    /// Create an instance that forwards to a custom transport.
    pub fn with_transport(config: Config, transport: impl Transport + 'static) -> Self {
        Self {
            client: Client::with_transport(config, transport),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    // -- endpoint accessors --------------------------------------------------

    pub fn deal_pipelines(&self) -> DealPipelinesClient<'_> {
        DealPipelinesClient::new(&self.client)
    }

    pub fn line_items(&self) -> CrmObjectsClient<'_> {
        CrmObjectsClient::new(&self.client, CrmObjectType::LineItems)
    }

    pub fn products(&self) -> CrmObjectsClient<'_> {
        CrmObjectsClient::new(&self.client, CrmObjectType::Products)
    }

    /// Generic accessor for any CRM object family.
    pub fn crm_objects(&self, object_type: CrmObjectType) -> CrmObjectsClient<'_> {
        CrmObjectsClient::new(&self.client, object_type)
    }

    pub fn oauth2(&self) -> OAuth2Client<'_> {
        OAuth2Client::new(&self.client)
    }
}
