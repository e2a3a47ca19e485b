//! ============================================================================
//! Auth Module - Tistory OAuth 2.0 Authorization Code Flow
//! ============================================================================
//! - TistoryOAuth: authorization URL and code-for-token exchange
//! - CallbackServer: one-shot local listener for the browser redirect
//! - TokenAcquirer: ties the two together and answers the browser
//! ============================================================================

mod acquire;
mod callback_server;
mod page;
mod tistory_oauth;

pub use acquire::TokenAcquirer;
pub use callback_server::{CallbackReply, CallbackServer};
pub use page::render_success_page;
pub use tistory_oauth::{parse_token_response, TistoryOAuth};
