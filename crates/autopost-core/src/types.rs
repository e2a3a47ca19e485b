//! ============================================================================
//! Core Types for autopost
//! ============================================================================
//! Credentials, publish payloads, and the error enums shared by the token
//! acquirer and the post publisher.
//! ============================================================================

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tag string attached to every post unless overridden
pub const DEFAULT_TAGS: &str = "개발일지,블로그자동화,Gemini AI,GitHub Actions";

// ============================================================================
// OAuth Types
// ============================================================================

/// Query sent to the provider's authorize endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub redirect_uri: String,
}

impl AuthorizationRequest {
    pub const RESPONSE_TYPE: &'static str = "code";

    pub fn new(client_id: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Encode against `authorize_url`. Parameter order is fixed.
    pub fn to_url(&self, authorize_url: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type={}",
            authorize_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            Self::RESPONSE_TYPE,
        )
    }
}

/// Authorization code delivered once by the provider redirect.
///
/// Deliberately not `Clone`: exchanging it consumes the value, so a code can
/// only be handed to the token endpoint once.
pub struct AuthorizationCode(String);

impl AuthorizationCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 20 characters, safe for logs
    pub fn preview(&self) -> &str {
        match self.0.char_indices().nth(20) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Debug for AuthorizationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthorizationCode({}...)", self.preview())
    }
}

/// Bearer credential returned by the token exchange
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Publish Types
// ============================================================================

/// Publication state of a post, encoded as the provider's numeric level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Private,
    Protected,
    #[default]
    Public,
}

impl Visibility {
    /// Numeric level sent in the `visibility` form field
    pub fn level(self) -> u8 {
        match self {
            Visibility::Private => 0,
            Visibility::Protected => 1,
            Visibility::Public => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
        }
    }
}

impl TryFrom<u8> for Visibility {
    type Error = PublishError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Visibility::Private),
            1 => Ok(Visibility::Protected),
            3 => Ok(Visibility::Public),
            other => Err(PublishError::InvalidVisibility(other)),
        }
    }
}

/// Everything needed for a single publish call
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub access_token: AccessToken,
    pub blog_name: String,
    pub title: String,
    pub content: String,
    pub visibility: Visibility,
    pub category: Option<String>,
    pub tags: String,
}

/// Identifiers of a successfully published post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResult {
    pub post_id: String,
    pub post_url: String,
}

// ============================================================================
// Errors
// ============================================================================

/// Failures of the token acquisition flow
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Client ID and client secret must both be provided")]
    MissingCredentials,

    #[error("Failed to start callback server on {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("Callback server error: {0}")]
    Callback(String),

    #[error("Timed out after {0:?} waiting for the OAuth callback")]
    CallbackTimeout(Duration),

    #[error("Interrupted while waiting for the OAuth callback")]
    Cancelled,

    #[error("No authorization code in callback")]
    MissingCode,

    #[error("Unexpected callback path: {0}")]
    UnexpectedPath(String),

    #[error("Authorization denied: {error} - {description}")]
    Denied { error: String, description: String },

    #[error("Token request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Token exchange failed ({status}): {body}")]
    TokenEndpoint { status: u16, body: String },

    #[error("Malformed token response: {0:?}")]
    MalformedTokenResponse(String),
}

/// Failures of the post publisher
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("{0} environment variable is not set")]
    MissingEnv(&'static str),

    #[error("Invalid visibility level {0} (expected 0, 1 or 3)")]
    InvalidVisibility(u8),

    #[error("File not found: {}", .0.display())]
    ContentNotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    ContentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse publish response: {0}")]
    InvalidResponse(String),

    #[error("Publish failed (status {status}): {message}")]
    Provider { status: String, message: String },

    #[error("Failed to write step outputs to {}: {source}", .path.display())]
    OutputSink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
