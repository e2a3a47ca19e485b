//! ============================================================================
//! OAuth Callback Server
//! ============================================================================
//! Bounded-lifetime listener for the provider redirect: bind, accept exactly
//! one request (or give up on timeout/cancellation), then shut down.
//! ============================================================================

use std::collections::HashMap;
use std::future::Future;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use tiny_http::{Header, Request, Response, Server};
use tracing::{debug, error, info, warn};

use crate::auth::page::render_success_page;
use crate::types::{AccessToken, AuthError, AuthorizationCode};

const CALLBACK_PATH: &str = "/callback";

/// One-shot HTTP listener for the OAuth redirect
pub struct CallbackServer {
    server: Arc<Server>,
    port: u16,
}

impl CallbackServer {
    /// Bind on localhost. Port 0 picks a free port.
    pub fn bind(port: u16) -> Result<Self, AuthError> {
        let addr = format!("127.0.0.1:{}", port);
        let server = Server::http(&addr).map_err(|e| AuthError::Bind {
            addr: addr.clone(),
            reason: e.to_string(),
        })?;

        let port = server
            .server_addr()
            .to_ip()
            .map(|a| a.port())
            .ok_or_else(|| AuthError::Bind {
                addr,
                reason: "listener has no IP address".to_string(),
            })?;

        info!("Callback server listening on 127.0.0.1:{}", port);
        Ok(Self {
            server: Arc::new(server),
            port,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Wait for the single browser redirect and pull the authorization code
    /// out of it.
    ///
    /// `timeout` of `None` waits indefinitely. If `cancel` resolves first the
    /// listener is unblocked and `AuthError::Cancelled` is returned. A request
    /// without a usable code is answered here (400, or 404 for a foreign
    /// path); otherwise the returned `CallbackReply` must be used to answer
    /// the browser once the exchange is done.
    pub async fn await_callback<F>(
        &self,
        timeout: Option<Duration>,
        cancel: F,
    ) -> Result<(AuthorizationCode, CallbackReply), AuthError>
    where
        F: Future<Output = ()>,
    {
        let request = self.accept_one(timeout, cancel).await?;
        let url = request.url().to_string();
        debug!("Received callback: {}", url);

        match extract_code(&url) {
            Ok(code) => {
                info!("Received authorization code: {}...", code.preview());
                Ok((code, CallbackReply { request }))
            }
            Err(err) => {
                let status: u16 = match err {
                    AuthError::UnexpectedPath(_) => 404,
                    _ => 400,
                };
                warn!("Rejecting callback with {}: {}", status, err);
                respond(request, Response::from_string("").with_status_code(status));
                Err(err)
            }
        }
    }

    async fn accept_one<F>(&self, timeout: Option<Duration>, cancel: F) -> Result<Request, AuthError>
    where
        F: Future<Output = ()>,
    {
        let server = Arc::clone(&self.server);
        let waiter = tokio::task::spawn_blocking(move || match timeout {
            Some(limit) => server.recv_timeout(limit),
            None => server.recv().map(Some),
        });

        tokio::select! {
            joined = waiter => {
                let received = joined
                    .map_err(|e| AuthError::Callback(e.to_string()))?
                    .map_err(|e| AuthError::Callback(e.to_string()))?;
                match (received, timeout) {
                    (Some(request), _) => Ok(request),
                    (None, Some(limit)) => Err(AuthError::CallbackTimeout(limit)),
                    (None, None) => Err(AuthError::Callback("listener stopped".to_string())),
                }
            }
            _ = cancel => {
                info!("Callback wait cancelled");
                self.server.unblock();
                Err(AuthError::Cancelled)
            }
        }
    }
}

impl Drop for CallbackServer {
    fn drop(&mut self) {
        self.server.unblock();
    }
}

/// Pending answer to the browser that delivered the authorization code
#[derive(Debug)]
pub struct CallbackReply {
    request: Request,
}

impl CallbackReply {
    /// 200 with the confirmation page showing the token
    pub fn success(self, token: &AccessToken) {
        let html = render_success_page(token);
        let mut response = Response::from_string(html);
        if let Ok(header) =
            Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..])
        {
            response = response.with_header(header);
        }
        respond(self.request, response);
    }

    /// 500 after a failed exchange
    pub fn failure(self) {
        respond(self.request, Response::from_string("").with_status_code(500u16));
    }
}

fn respond(request: Request, response: Response<Cursor<Vec<u8>>>) {
    if let Err(e) = request.respond(response) {
        error!("Failed to answer callback request: {}", e);
    }
}

/// Pull `code` out of the redirect target (`/callback?code=...`)
fn extract_code(target: &str) -> Result<AuthorizationCode, AuthError> {
    let parsed = url::Url::parse(&format!("http://localhost{}", target))
        .map_err(|e| AuthError::Callback(format!("Failed to parse callback URL: {}", e)))?;

    if parsed.path() != CALLBACK_PATH {
        return Err(AuthError::UnexpectedPath(parsed.path().to_string()));
    }

    let params: HashMap<_, _> = parsed.query_pairs().collect();

    if let Some(error) = params.get("error") {
        let description = params
            .get("error_description")
            .map(|s| s.to_string())
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(AuthError::Denied {
            error: error.to_string(),
            description,
        });
    }

    match params.get("code") {
        Some(code) if !code.is_empty() => Ok(AuthorizationCode::new(code.to_string())),
        _ => Err(AuthError::MissingCode),
    }
}
