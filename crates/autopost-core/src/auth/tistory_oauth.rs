//! ============================================================================
//! Tistory OAuth 2.0 Client
//! ============================================================================
//! Builds the browser authorization URL and trades an authorization code for
//! an access token. Tistory answers the token request with a form-encoded
//! body (`access_token=...`) rather than JSON.
//! ============================================================================

use reqwest::Client;
use tracing::{debug, error, info};
use url::form_urlencoded;

use crate::config::{http_client, OAuthConfig};
use crate::types::{AccessToken, AuthError, AuthorizationCode, AuthorizationRequest};

/// OAuth 2.0 client for a registered Tistory app
pub struct TistoryOAuth {
    config: OAuthConfig,
    client: Client,
}

impl TistoryOAuth {
    /// Create a new OAuth client from validated credentials
    pub fn new(config: OAuthConfig) -> Result<Self, AuthError> {
        let client = http_client(config.http_timeout())?;
        Ok(Self { config, client })
    }

    /// URL the operator opens to approve the app. No network call.
    pub fn authorization_url(&self) -> String {
        let url = AuthorizationRequest::new(self.config.client_id(), self.config.redirect_uri())
            .to_url(self.config.authorize_url());

        debug!("Generated authorization URL for client {}", self.config.client_id());
        url
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Takes the code by value: once sent, it cannot be sent again.
    pub async fn exchange_code(&self, code: AuthorizationCode) -> Result<AccessToken, AuthError> {
        info!("Exchanging authorization code {}... for access token", code.preview());

        let params = [
            ("client_id", self.config.client_id()),
            ("client_secret", self.config.client_secret()),
            ("redirect_uri", self.config.redirect_uri()),
            ("code", code.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .client
            .post(self.config.token_url())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Token exchange failed: {} - {}", status, body);
            return Err(AuthError::TokenEndpoint {
                status: status.as_u16(),
                body,
            });
        }

        if form_urlencoded::parse(body.trim().as_bytes()).any(|(key, _)| key == "error") {
            error!("Token endpoint returned an error body: {}", body);
            return Err(AuthError::TokenEndpoint {
                status: status.as_u16(),
                body,
            });
        }

        let token = parse_token_response(&body)?;
        info!("Successfully obtained access token");
        Ok(token)
    }
}

/// Extract the access token from a form-encoded token response.
///
/// `access_token` is preferred; otherwise the first non-empty value is used.
/// A body without any `key=value` pair, or with an empty `access_token`, is
/// rejected.
pub fn parse_token_response(body: &str) -> Result<AccessToken, AuthError> {
    let body = body.trim();
    if !body.contains('=') {
        return Err(AuthError::MalformedTokenResponse(body.to_string()));
    }

    let mut fallback = None;
    for (key, value) in form_urlencoded::parse(body.as_bytes()) {
        if key == "access_token" {
            if value.is_empty() {
                return Err(AuthError::MalformedTokenResponse(body.to_string()));
            }
            return Ok(AccessToken::new(value.into_owned()));
        }
        if fallback.is_none() && !value.is_empty() {
            fallback = Some(value.into_owned());
        }
    }

    fallback
        .map(AccessToken::new)
        .ok_or_else(|| AuthError::MalformedTokenResponse(body.to_string()))
}
