//! Unit tests for the github_client crate.

use super::*; // Import items from lib.rs
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate}; // For constructing mock bodies

// --- Test Constants ---
const TEST_OWNER: &str = "test-owner";
const TEST_REPO: &str = "test-repo";
const TEST_PR: u64 = 42;

fn create_test_client(mock_server: &MockServer) -> GitHubClient {
    let octocrab = create_token_client("test-token", Some(&mock_server.uri()))
        .expect("Failed to create client");
    GitHubClient::new(octocrab)
}

fn not_found_body() -> serde_json::Value {
    json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest"
    })
}

fn review_json(id: u64, login: &str, state: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user": { "login": login, "id": id + 1000 },
        "body": "",
        "state": state,
        "submitted_at": "2024-01-15T10:30:00Z"
    })
}

#[tokio::test]
async fn test_list_pull_request_labels_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{TEST_OWNER}/{TEST_REPO}/issues/{TEST_PR}/labels"
        )))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "needs-security-review", "color": "d73a4a" },
            { "id": 2, "name": "documentation", "color": "0075ca" }
        ])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .list_pull_request_labels(TEST_OWNER, TEST_REPO, TEST_PR)
        .await;

    if let Err(e) = &result {
        eprintln!("list_pull_request_labels error: {e:?}");
    }
    assert_eq!(
        result.unwrap(),
        vec!["needs-security-review".to_string(), "documentation".to_string()]
    );
}

#[tokio::test]
async fn test_list_pull_request_labels_follows_pages() {
    let mock_server = MockServer::start().await;
    let route = format!("/repos/{TEST_OWNER}/{TEST_REPO}/issues/{TEST_PR}/labels");

    let first_page: Vec<serde_json::Value> = (0..100)
        .map(|i| json!({ "id": i, "name": format!("label-{i}") }))
        .collect();

    Mock::given(method("GET"))
        .and(path(route.clone()))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first_page))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": 100, "name": "last" }])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let labels = client
        .list_pull_request_labels(TEST_OWNER, TEST_REPO, TEST_PR)
        .await
        .expect("Failed to list labels");

    assert_eq!(labels.len(), 101);
    assert_eq!(labels[0], "label-0");
    assert_eq!(labels[100], "last");
}

#[tokio::test]
async fn test_list_pull_request_labels_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{TEST_OWNER}/{TEST_REPO}/issues/{TEST_PR}/labels"
        )))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_body()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .list_pull_request_labels(TEST_OWNER, TEST_REPO, TEST_PR)
        .await;

    assert!(matches!(result, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_list_pull_request_approvers_reduces_reviews() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{TEST_OWNER}/{TEST_REPO}/pulls/{TEST_PR}/reviews"
        )))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            review_json(1, "alice", "APPROVED"),
            review_json(2, "bob", "CHANGES_REQUESTED"),
            review_json(3, "carol", "COMMENTED"),
            review_json(4, "alice", "APPROVED"),
            review_json(5, "dave", "APPROVED"),
            review_json(6, "dave", "DISMISSED")
        ])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let approvers = client
        .list_pull_request_approvers(TEST_OWNER, TEST_REPO, TEST_PR)
        .await
        .expect("Failed to list approvers");

    assert_eq!(approvers, vec!["alice".to_string()]);
}

#[tokio::test]
async fn test_list_pull_request_reviews_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{TEST_OWNER}/{TEST_REPO}/pulls/{TEST_PR}/reviews"
        )))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Server Error"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .list_pull_request_reviews(TEST_OWNER, TEST_REPO, TEST_PR)
        .await;

    match result {
        Err(Error::RequestFailed { status, message }) => {
            assert_eq!(status, http::StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, "Server Error");
        }
        other => panic!("Expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_pull_request_labels_unauthorized_keeps_github_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{TEST_OWNER}/{TEST_REPO}/issues/{TEST_PR}/labels"
        )))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let error = client
        .list_pull_request_labels(TEST_OWNER, TEST_REPO, TEST_PR)
        .await
        .expect_err("401 should fail");

    assert!(matches!(
        &error,
        Error::RequestFailed { status, .. } if *status == http::StatusCode::UNAUTHORIZED
    ));
    assert!(error.to_string().contains("Bad credentials"));
}

#[tokio::test]
async fn test_list_pull_request_labels_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{TEST_OWNER}/{TEST_REPO}/issues/{TEST_PR}/labels"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "labels": "not a list"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .list_pull_request_labels(TEST_OWNER, TEST_REPO, TEST_PR)
        .await;

    assert!(matches!(result, Err(Error::Deserialization(_))));
}

#[tokio::test]
async fn test_list_pull_request_reviews_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{TEST_OWNER}/{TEST_REPO}/pulls/{TEST_PR}/reviews"
        )))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "API rate limit exceeded for installation ID 1234.",
            "documentation_url": "https://docs.github.com/rest/overview/resources-in-the-rest-api#rate-limiting"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .list_pull_request_reviews(TEST_OWNER, TEST_REPO, TEST_PR)
        .await;

    assert!(matches!(result, Err(Error::RateLimitExceeded)));
}

#[tokio::test]
async fn test_get_file_content_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{TEST_OWNER}/{TEST_REPO}/contents/.github/approvers.yml"
        )))
        .and(query_param("ref", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "file",
            "encoding": "base64",
            "size": 34,
            "name": "approvers.yml",
            "path": ".github/approvers.yml",
            "content": "bmVlZHMtcmV2aWV3OgogIC0gYWxpY2UKICAtIGJvYgo=\n",
            "sha": "3d21ec53a331a6f037a91c368710b99387d012c1"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let content = client
        .get_file_content(TEST_OWNER, TEST_REPO, ".github/approvers.yml", Some("abc123"))
        .await
        .expect("Failed to get file content");

    assert_eq!(content, "needs-review:\n  - alice\n  - bob\n");
}

#[tokio::test]
async fn test_get_file_content_strips_leading_slash() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{TEST_OWNER}/{TEST_REPO}/contents/approvers.yml"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "file",
            "encoding": "base64",
            "path": "approvers.yml",
            "content": "bmVlZHMtcmV2aWV3OgogIC0gYWxpY2UKICAtIGJvYgo=",
            "sha": "3d21ec53a331a6f037a91c368710b99387d012c1"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .get_file_content(TEST_OWNER, TEST_REPO, "/approvers.yml", None)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_get_file_content_encodes_path_segments() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{TEST_OWNER}/{TEST_REPO}/contents/review%20rules/approvers%23v2.yml"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "file",
            "encoding": "base64",
            "path": "review rules/approvers#v2.yml",
            "content": "bmVlZHMtcmV2aWV3OgogIC0gYWxpY2UKICAtIGJvYgo=",
            "sha": "3d21ec53a331a6f037a91c368710b99387d012c1"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let content = client
        .get_file_content(TEST_OWNER, TEST_REPO, "review rules/approvers#v2.yml", None)
        .await
        .expect("Failed to get file content");

    assert_eq!(content, "needs-review:\n  - alice\n  - bob\n");
}

#[test]
fn test_encode_content_path_keeps_separators() {
    assert_eq!(
        encode_content_path("/.github/review rules/a#b.yml"),
        ".github/review%20rules/a%23b.yml"
    );
}

#[tokio::test]
async fn test_get_file_content_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/repos/{TEST_OWNER}/{TEST_REPO}/contents/missing.yml"
        )))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_body()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .get_file_content(TEST_OWNER, TEST_REPO, "missing.yml", None)
        .await;

    assert!(matches!(result, Err(Error::NotFound)));
}

#[test]
fn test_create_token_client_rejects_invalid_api_url() {
    let result = create_token_client("test-token", Some("not a url"));

    assert!(matches!(result, Err(Error::AuthError(_))));
}
