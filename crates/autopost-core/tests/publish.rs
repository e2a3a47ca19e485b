use autopost_core::{
    AccessToken, PublishError, PublishRequest, PublishResult, TistoryPublisher, Visibility,
    DEFAULT_TAGS,
};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(category: Option<&str>, visibility: Visibility) -> PublishRequest {
    PublishRequest {
        access_token: AccessToken::new("tok"),
        blog_name: "myblog".to_string(),
        title: "Daily log".to_string(),
        content: "# Hello".to_string(),
        visibility,
        category: category.map(ToString::to_string),
        tags: DEFAULT_TAGS.to_string(),
    }
}

#[tokio::test]
async fn publish_success_returns_post_id_and_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apis/post/write"))
        .and(body_string_contains("access_token=tok"))
        .and(body_string_contains("output=json"))
        .and(body_string_contains("blogName=myblog"))
        .and(body_string_contains("visibility=3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tistory": { "status": "200", "postId": "42", "url": "http://x/42" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let publisher = TistoryPublisher::with_base_url(&server.uri(), None).unwrap();
    let result = publisher
        .publish(&request(None, Visibility::Public))
        .await
        .unwrap();

    assert_eq!(
        result,
        PublishResult {
            post_id: "42".to_string(),
            post_url: "http://x/42".to_string(),
        }
    );
}

#[tokio::test]
async fn publish_sends_category_and_visibility_level() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apis/post/write"))
        .and(body_string_contains("category=77"))
        .and(body_string_contains("visibility=0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tistory": { "status": "200", "postId": "1", "url": "http://x/1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let publisher = TistoryPublisher::with_base_url(&server.uri(), None).unwrap();
    let result = publisher
        .publish(&request(Some("77"), Visibility::Private))
        .await
        .unwrap();
    assert_eq!(result.post_id, "1");
}

#[tokio::test]
async fn embedded_failure_surfaces_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apis/post/write"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tistory": { "status": "404", "error_message": "bad blog" }
        })))
        .mount(&server)
        .await;

    let publisher = TistoryPublisher::with_base_url(&server.uri(), None).unwrap();
    let err = publisher
        .publish(&request(None, Visibility::Public))
        .await
        .unwrap_err();

    match err {
        PublishError::Provider { status, message } => {
            assert_eq!(status, "404");
            assert_eq!(message, "bad blog");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn http_error_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apis/post/write"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let publisher = TistoryPublisher::with_base_url(&server.uri(), None).unwrap();
    let err = publisher
        .publish(&request(None, Visibility::Public))
        .await
        .unwrap_err();
    assert!(matches!(err, PublishError::Transport(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_failure() {
    let publisher = TistoryPublisher::with_base_url("http://127.0.0.1:9", None).unwrap();
    let err = publisher
        .publish(&request(None, Visibility::Public))
        .await
        .unwrap_err();
    assert!(matches!(err, PublishError::Transport(_)));
}
