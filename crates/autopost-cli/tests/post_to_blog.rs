use std::collections::HashMap;
use std::path::{Path, PathBuf};

use autopost_cli::publish::{run_publish, PublishArgs};
use autopost_core::{PublishError, Visibility, DEFAULT_TAGS};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn args(content: &Path) -> PublishArgs {
    PublishArgs {
        title: "Daily log".to_string(),
        content: content.to_path_buf(),
        visibility: Visibility::Public,
        tags: DEFAULT_TAGS.to_string(),
    }
}

fn env(pairs: Vec<(&str, String)>) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    move |key| map.get(key).cloned()
}

fn write_post(temp: &TempDir) -> PathBuf {
    let path = temp.path().join("post.md");
    std::fs::write(&path, "# Hello\n").unwrap();
    path
}

async fn mock_write(server: &MockServer, body: serde_json::Value, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/apis/post/write"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn success_appends_step_outputs() {
    let server = MockServer::start().await;
    mock_write(
        &server,
        serde_json::json!({"tistory": {"status": "200", "postId": "42", "url": "http://x/42"}}),
        1,
    )
    .await;

    let temp = TempDir::new().unwrap();
    let post = write_post(&temp);
    let outputs = temp.path().join("github_output");

    let result = run_publish(
        args(&post),
        env(vec![
            ("TISTORY_ACCESS_TOKEN", "tok".to_string()),
            ("TISTORY_BLOG_NAME", "myblog".to_string()),
            ("TISTORY_API_BASE", server.uri()),
            ("GITHUB_OUTPUT", outputs.display().to_string()),
        ]),
    )
    .await
    .unwrap();

    assert_eq!(result.post_id, "42");
    let written = std::fs::read_to_string(&outputs).unwrap();
    assert_eq!(written, "post_id=42\npost_url=http://x/42\n");
}

#[tokio::test]
async fn missing_access_token_never_reaches_the_network() {
    let server = MockServer::start().await;
    mock_write(&server, serde_json::json!({}), 0).await;

    let temp = TempDir::new().unwrap();
    let post = write_post(&temp);

    let err = run_publish(
        args(&post),
        env(vec![
            ("TISTORY_BLOG_NAME", "myblog".to_string()),
            ("TISTORY_API_BASE", server.uri()),
        ]),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PublishError>(),
        Some(PublishError::MissingEnv("TISTORY_ACCESS_TOKEN"))
    ));
}

#[tokio::test]
async fn missing_content_file_is_reported_distinctly() {
    let server = MockServer::start().await;
    mock_write(&server, serde_json::json!({}), 0).await;

    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.md");

    let err = run_publish(
        args(&missing),
        env(vec![
            ("TISTORY_ACCESS_TOKEN", "tok".to_string()),
            ("TISTORY_BLOG_NAME", "myblog".to_string()),
            ("TISTORY_API_BASE", server.uri()),
        ]),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PublishError>(),
        Some(PublishError::ContentNotFound(_))
    ));
}

#[tokio::test]
async fn embedded_failure_leaves_outputs_untouched() {
    let server = MockServer::start().await;
    mock_write(
        &server,
        serde_json::json!({"tistory": {"status": "404", "error_message": "bad blog"}}),
        1,
    )
    .await;

    let temp = TempDir::new().unwrap();
    let post = write_post(&temp);
    let outputs = temp.path().join("github_output");

    let err = run_publish(
        args(&post),
        env(vec![
            ("TISTORY_ACCESS_TOKEN", "tok".to_string()),
            ("TISTORY_BLOG_NAME", "myblog".to_string()),
            ("TISTORY_API_BASE", server.uri()),
            ("GITHUB_OUTPUT", outputs.display().to_string()),
        ]),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("bad blog"));
    assert!(!outputs.exists());
}
