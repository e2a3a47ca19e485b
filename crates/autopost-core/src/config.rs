//! ============================================================================
//! Configuration - OAuth client settings and publisher environment
//! ============================================================================
//! Both tools take their settings as explicit values. Environment lookups
//! go through a caller-supplied function so tests never touch the process
//! environment.
//! ============================================================================

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::types::{AccessToken, AuthError, PublishError};

/// Tistory host serving both the OAuth and the post APIs
pub const DEFAULT_PROVIDER_BASE: &str = "https://www.tistory.com";
/// Local port the redirect URI points at
pub const DEFAULT_CALLBACK_PORT: u16 = 5000;

pub const ENV_ACCESS_TOKEN: &str = "TISTORY_ACCESS_TOKEN";
pub const ENV_BLOG_NAME: &str = "TISTORY_BLOG_NAME";
pub const ENV_CATEGORY: &str = "BLOG_CATEGORY";
pub const ENV_OUTPUT_SINK: &str = "GITHUB_OUTPUT";
pub const ENV_API_BASE: &str = "TISTORY_API_BASE";
pub const ENV_HTTP_TIMEOUT: &str = "TISTORY_HTTP_TIMEOUT_SECS";
pub const ENV_CLIENT_ID: &str = "TISTORY_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "TISTORY_CLIENT_SECRET";

/// Redirect URI registered with the provider for a given local port
pub fn callback_uri(port: u16) -> String {
    format!("http://localhost:{}/callback", port)
}

/// Build the shared HTTP client, with an overall request timeout if one is set
pub(crate) fn http_client(timeout: Option<Duration>) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Read `TISTORY_HTTP_TIMEOUT_SECS`. Unparseable values are ignored with a warning.
pub fn http_timeout_from_lookup<F>(lookup: F) -> Option<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = non_blank(lookup(ENV_HTTP_TIMEOUT))?;
    match raw.parse::<u64>() {
        Ok(0) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => {
            warn!("Ignoring invalid {}={:?}", ENV_HTTP_TIMEOUT, raw);
            None
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============================================================================
// OAuth
// ============================================================================

/// OAuth client registration plus the endpoints it talks to
#[derive(Clone)]
pub struct OAuthConfig {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    authorize_url: String,
    token_url: String,
    http_timeout: Option<Duration>,
}

impl OAuthConfig {
    /// Fails fast when either credential is blank.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let client_id = client_id.into().trim().to_string();
        let client_secret = client_secret.into().trim().to_string();
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri: callback_uri(DEFAULT_CALLBACK_PORT),
            authorize_url: format!("{}/oauth/authorize", DEFAULT_PROVIDER_BASE),
            token_url: format!("{}/oauth/access_token", DEFAULT_PROVIDER_BASE),
            http_timeout: None,
        })
    }

    /// Point the redirect URI at `http://localhost:<port>/callback`
    pub fn with_callback_port(mut self, port: u16) -> Self {
        self.redirect_uri = callback_uri(port);
        self
    }

    /// Swap the provider host for both OAuth endpoints
    pub fn with_provider_base(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.authorize_url = format!("{}/oauth/authorize", base);
        self.token_url = format!("{}/oauth/access_token", base);
        self
    }

    pub fn with_http_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn authorize_url(&self) -> &str {
        &self.authorize_url
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout
    }
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("redirect_uri", &self.redirect_uri)
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

// ============================================================================
// Publisher
// ============================================================================

/// Credentials and destinations for the post publisher
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    pub access_token: AccessToken,
    pub blog_name: String,
    pub category: Option<String>,
    /// Step output file to append `post_id`/`post_url` to
    pub output_path: Option<PathBuf>,
    pub api_base: String,
    pub http_timeout: Option<Duration>,
}

impl PublisherConfig {
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PublishError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = non_blank(lookup(ENV_ACCESS_TOKEN))
            .ok_or(PublishError::MissingEnv(ENV_ACCESS_TOKEN))?;
        let blog_name =
            non_blank(lookup(ENV_BLOG_NAME)).ok_or(PublishError::MissingEnv(ENV_BLOG_NAME))?;

        let api_base = non_blank(lookup(ENV_API_BASE))
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_PROVIDER_BASE.to_string());

        Ok(Self {
            access_token: AccessToken::new(access_token),
            blog_name,
            category: non_blank(lookup(ENV_CATEGORY)),
            output_path: non_blank(lookup(ENV_OUTPUT_SINK)).map(PathBuf::from),
            api_base,
            http_timeout: http_timeout_from_lookup(&lookup),
        })
    }
}
