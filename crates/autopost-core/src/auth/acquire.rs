//! ============================================================================
//! Token Acquirer - One Pass of the Authorization Code Flow
//! ============================================================================
//! Waits for the redirect on an already bound CallbackServer, exchanges the
//! code, then answers the browser with the confirmation page (200) or an
//! error status (500). Opening the browser is left to the caller.
//! ============================================================================

use std::future::Future;
use std::time::Duration;

use tracing::{error, info};

use crate::auth::callback_server::CallbackServer;
use crate::auth::tistory_oauth::TistoryOAuth;
use crate::config::OAuthConfig;
use crate::types::{AccessToken, AuthError};

pub struct TokenAcquirer {
    oauth: TistoryOAuth,
    callback_timeout: Option<Duration>,
}

impl TokenAcquirer {
    pub fn new(config: OAuthConfig) -> Result<Self, AuthError> {
        Ok(Self {
            oauth: TistoryOAuth::new(config)?,
            callback_timeout: None,
        })
    }

    /// Give up waiting for the browser after `timeout`. `None` waits forever.
    pub fn with_callback_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.callback_timeout = timeout;
        self
    }

    pub fn authorization_url(&self) -> String {
        self.oauth.authorization_url()
    }

    /// Handle the single callback request and return the access token.
    ///
    /// `cancel` stays armed through the exchange: resolving it while the
    /// token request is in flight answers the browser with 500 and returns
    /// `AuthError::Cancelled`.
    pub async fn acquire<F>(
        &self,
        server: &CallbackServer,
        cancel: F,
    ) -> Result<AccessToken, AuthError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(cancel);

        info!("Waiting for OAuth callback on port {}", server.port());
        let (code, reply) = server
            .await_callback(self.callback_timeout, &mut cancel)
            .await?;

        let exchanged = tokio::select! {
            result = self.oauth.exchange_code(code) => result,
            _ = &mut cancel => {
                info!("Token exchange cancelled");
                Err(AuthError::Cancelled)
            }
        };

        match exchanged {
            Ok(token) => {
                reply.success(&token);
                Ok(token)
            }
            Err(e) => {
                error!("Token exchange failed: {}", e);
                reply.failure();
                Err(e)
            }
        }
    }
}
