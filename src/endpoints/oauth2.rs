use crate::client::Client;
use crate::error::Result;
use crate::http::query::encode;
use crate::http::{Method, RequestOptions, Response};

pub const AUTHORIZE_URL: &str = "https://app.hubspot.com/oauth/authorize";

const TOKEN_PATH: &str = "/oauth/v1/token";

/// Build the URL that starts the OAuth 2.0 install flow for an app.
///
/// Scopes are joined with `%20`; the redirect URI is form-encoded.
///
/// ```
/// let url = hubspot_client::endpoints::oauth2::auth_url(
///     "client-id",
///     "https://example.com/cb",
///     &["contacts", "automation"],
/// );
/// assert_eq!(
///     url,
///     "https://app.hubspot.com/oauth/authorize?client_id=client-id\
///      &scope=contacts%20automation\
///      &redirect_uri=https%3A%2F%2Fexample.com%2Fcb"
/// );
/// ```
pub fn auth_url(client_id: &str, redirect_uri: &str, scopes: &[&str]) -> String {
    let scope = scopes
        .iter()
        .map(|s| encode(s))
        .collect::<Vec<_>>()
        .join("%20");
    let redirect: String = url::form_urlencoded::byte_serialize(redirect_uri.as_bytes()).collect();

    format!(
        "{AUTHORIZE_URL}?client_id={}&scope={scope}&redirect_uri={redirect}",
        encode(client_id)
    )
}

/// OAuth 2.0 token exchange and introspection.
///
/// None of these calls send the configured credentials.
pub struct OAuth2Client<'a> {
    client: &'a Client,
}

impl<'a> OAuth2Client<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

impl OAuth2Client<'_> {
    /// See [`auth_url`].
    pub fn get_auth_url(&self, client_id: &str, redirect_uri: &str, scopes: &[&str]) -> String {
        auth_url(client_id, redirect_uri, scopes)
    }

    /// Exchange the one-time `code` handed to the redirect URI for tokens.
    pub fn get_tokens_by_code(
        &self,
        client_id: &str,
        client_secret: &str,
        redirect_uri: &str,
        code: &str,
    ) -> Result<Response> {
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("redirect_uri", redirect_uri),
            ("code", code),
        ])
    }

    /// Get a fresh access token from a refresh token.
    ///
    /// HubSpot does not need the redirect URI here.
    pub fn get_tokens_by_refresh(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<Response> {
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token),
        ])
    }

    pub fn get_access_token_info(&self, token: &str) -> Result<Response> {
        let url = self
            .client
            .url(&format!("/oauth/v1/access-tokens/{}", encode(token)));
        self.unauthenticated(Method::Get, &url)
    }

    pub fn get_refresh_token_info(&self, token: &str) -> Result<Response> {
        self.unauthenticated(Method::Get, &self.refresh_token_url(token))
    }

    pub fn delete_refresh_token(&self, token: &str) -> Result<Response> {
        self.unauthenticated(Method::Delete, &self.refresh_token_url(token))
    }

    fn refresh_token_url(&self, token: &str) -> String {
        self.client
            .url(&format!("/oauth/v1/refresh-tokens/{}", encode(token)))
    }

    fn token_request(&self, fields: &[(&str, &str)]) -> Result<Response> {
        let options = RequestOptions::form(fields.iter().copied())
            .header("content-type", "application/x-www-form-urlencoded");
        self.client.request(
            Method::Post,
            &self.client.url(TOKEN_PATH),
            options,
            None,
            false,
        )
    }

    fn unauthenticated(&self, method: Method, url: &str) -> Result<Response> {
        self.client
            .request(method, url, RequestOptions::new(), None, false)
    }
}
