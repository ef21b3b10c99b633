use std::fmt;
use std::time::Duration;

use crate::error::{HubSpotError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

/// How requests authenticate against the portal.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Credentials {
    /// Only unauthenticated endpoints (OAuth token exchange) are usable.
    #[default]
    None,
    /// Developer API key, sent as the `hapikey` query parameter.
    ApiKey(String),
    /// Legacy OAuth access token, sent as the `access_token` query parameter.
    AccessToken(String),
    /// OAuth 2.0 access token, sent as an `Authorization: Bearer` header.
    OAuth2(String),
}

impl Credentials {
    pub fn is_none(&self) -> bool {
        matches!(self, Credentials::None)
    }

    /// The `key=value` query pair carrying these credentials, if any.
    pub(crate) fn query_pair(&self) -> Option<(&'static str, &str)> {
        match self {
            Credentials::ApiKey(key) => Some(("hapikey", key)),
            Credentials::AccessToken(token) => Some(("access_token", token)),
            Credentials::None | Credentials::OAuth2(_) => None,
        }
    }

    pub(crate) fn bearer(&self) -> Option<&str> {
        match self {
            Credentials::OAuth2(token) => Some(token),
            _ => None,
        }
    }
}

// Keys never reach logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::None => f.write_str("None"),
            Credentials::ApiKey(_) => f.write_str("ApiKey(***)"),
            Credentials::AccessToken(_) => f.write_str("AccessToken(***)"),
            Credentials::OAuth2(_) => f.write_str("OAuth2(***)"),
        }
    }
}

/// Client configuration.
///
/// ```
/// use hubspot_client::{Config, Credentials};
///
/// let config = Config::new()
///     .credentials(Credentials::ApiKey("demo".into()))
///     .user_id("42");
/// assert_eq!(config.base_url, "https://api.hubapi.com");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub base_url: String,
    /// Appended as `userId` to authenticated requests.
    pub user_id: Option<String>,
    pub user_agent: String,
    pub timeout: Option<Duration>,
    /// Sent with every request; per-call headers take precedence.
    pub default_headers: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: Credentials::None,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_id: None,
            user_agent: format!("hubspot-client-rust/{}", env!("CARGO_PKG_VERSION")),
            timeout: None,
            default_headers: Vec::new(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self::new().credentials(Credentials::ApiKey(key.into()))
    }

    /// Legacy OAuth access token, sent as the `access_token` query parameter.
    pub fn with_access_token(token: impl Into<String>) -> Self {
        Self::new().credentials(Credentials::AccessToken(token.into()))
    }

    /// OAuth 2.0 access token, sent as an `Authorization: Bearer` header.
    pub fn with_oauth_token(token: impl Into<String>) -> Self {
        Self::new().credentials(Credentials::OAuth2(token.into()))
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Build a configuration from `HUBSPOT_*` environment variables.
    ///
    /// * `HUBSPOT_API_KEY` – developer API key
    /// * `HUBSPOT_ACCESS_TOKEN` – OAuth 2.0 bearer token (wins over the key)
    /// * `HUBSPOT_BASE_URL` – API root
    /// * `HUBSPOT_USER_ID` – `userId` sent with authenticated calls
    /// * `HUBSPOT_TIMEOUT_SECS` – request timeout in seconds
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Config::new();

        if let Some(token) = var("HUBSPOT_ACCESS_TOKEN") {
            config.credentials = Credentials::OAuth2(token);
        } else if let Some(key) = var("HUBSPOT_API_KEY") {
            config.credentials = Credentials::ApiKey(key);
        }
        if let Some(url) = var("HUBSPOT_BASE_URL") {
            config = config.base_url(url);
        }
        if let Some(id) = var("HUBSPOT_USER_ID") {
            config.user_id = Some(id);
        }
        if let Some(secs) = var("HUBSPOT_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| HubSpotError::Config {
                message: format!("HUBSPOT_TIMEOUT_SECS must be a whole number, got '{secs}'"),
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
