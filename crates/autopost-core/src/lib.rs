//! ============================================================================
//! AUTOPOST-CORE: Tistory Publishing Logic
//! ============================================================================
//! This crate handles all backend logic for the autopost tools:
//! - OAuth 2.0 authorization code flow with a one-shot local callback listener
//! - Access token exchange against the Tistory token endpoint
//! - Post publishing with embedded status checking
//! - CI step output sink for downstream automation
//! ============================================================================

pub mod auth;
pub mod config;
pub mod publisher;
pub mod types;

// Re-export main types for convenience
pub use auth::{CallbackReply, CallbackServer, TistoryOAuth, TokenAcquirer};
pub use config::{OAuthConfig, PublisherConfig};
pub use publisher::{append_outputs, load_content, TistoryPublisher};
pub use types::*;
