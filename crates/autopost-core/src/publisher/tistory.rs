//! ============================================================================
//! Tistory Publisher - Post Writing via the Tistory Open API
//! ============================================================================
//! Tistory reports application failures inside an HTTP 200 body, so success
//! is decided by both the transport status and `tistory.status == "200"`.
//! ============================================================================

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use crate::config::http_client;
use crate::types::{PublishError, PublishRequest, PublishResult};

/// Embedded status Tistory uses for success
const SUCCESS_STATUS: &str = "200";
const UNKNOWN_ERROR: &str = "unknown error";

/// Executor for Tistory post operations
pub struct TistoryPublisher {
    client: Client,
    api_base: String,
}

impl TistoryPublisher {
    /// Create a publisher against `api_base` (normally `https://www.tistory.com`)
    pub fn with_base_url(api_base: &str, timeout: Option<Duration>) -> Result<Self, PublishError> {
        Ok(Self {
            client: http_client(timeout)?,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Publish a single post
    pub async fn publish(&self, request: &PublishRequest) -> Result<PublishResult, PublishError> {
        info!(
            "Publishing to Tistory blog {}: {}",
            request.blog_name, request.title
        );

        let url = format!("{}/apis/post/write", self.api_base);
        let visibility = request.visibility.level().to_string();

        let mut form: Vec<(&str, &str)> = vec![
            ("access_token", request.access_token.as_str()),
            ("output", "json"),
            ("blogName", request.blog_name.as_str()),
            ("title", request.title.as_str()),
            ("content", request.content.as_str()),
            ("visibility", visibility.as_str()),
            ("tag", request.tags.as_str()),
        ];
        if let Some(category) = &request.category {
            form.push(("category", category.as_str()));
        }

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let result = interpret_response(&body)?;

        info!("Post published: {} ({})", result.post_id, result.post_url);
        Ok(result)
    }
}

// ============================================================================
// Tistory API Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct WriteResponse {
    #[serde(default)]
    tistory: WriteStatus,
}

#[derive(Debug, Default, Deserialize)]
struct WriteStatus {
    #[serde(default)]
    status: Option<Value>,
    #[serde(default, rename = "postId")]
    post_id: Option<Value>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Decide success from the embedded status of a 2xx body
fn interpret_response(body: &str) -> Result<PublishResult, PublishError> {
    let parsed: WriteResponse =
        serde_json::from_str(body).map_err(|e| PublishError::InvalidResponse(e.to_string()))?;
    let status = parsed.tistory;

    let is_success = matches!(&status.status, Some(Value::String(s)) if s == SUCCESS_STATUS);
    if !is_success {
        let code = match &status.status {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "missing".to_string(),
        };
        let message = status
            .error_message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        error!("Tistory rejected the post: {} - {}", code, message);
        return Err(PublishError::Provider {
            status: code,
            message,
        });
    }

    let post_id = match status.post_id {
        Some(Value::String(id)) if !id.is_empty() => id,
        Some(Value::Number(id)) => id.to_string(),
        _ => {
            return Err(PublishError::InvalidResponse(
                "success response without postId".to_string(),
            ))
        }
    };
    let post_url = match status.url {
        Some(url) if !url.is_empty() => url,
        _ => {
            return Err(PublishError::InvalidResponse(
                "success response without url".to_string(),
            ))
        }
    };

    Ok(PublishResult { post_id, post_url })
}
