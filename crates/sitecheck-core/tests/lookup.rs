//! Integration tests: lookup client against an in-process mock endpoint.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use sitecheck_core::lookup::{CheckResult, LookupError, ThreatLookup, ThreatLookupClient};
use sitecheck_core::{normalize, LookupConfig, Session, ThreatType};

use common::mock_safe_browsing::{self, MockResponse};

const TEST_KEY: &str = "test-api-key";

fn client_for(endpoint: &str, timeout: Duration) -> ThreatLookupClient {
    let config = LookupConfig::new(TEST_KEY)
        .unwrap()
        .with_endpoint(endpoint)
        .unwrap()
        .with_timeout(timeout)
        .unwrap();
    ThreatLookupClient::new(config).unwrap()
}

#[tokio::test]
async fn bare_domain_end_to_end_is_safe() {
    let server = mock_safe_browsing::start(MockResponse::ok("{}")).await;
    let client = client_for(&server.endpoint, Duration::from_secs(5));

    let url = normalize("example.com").unwrap();
    assert_eq!(url.as_str(), "https://example.com");

    let result = client.lookup(&url).await;
    assert_eq!(result, CheckResult::Safe);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].key.as_deref(), Some(TEST_KEY));
    assert_eq!(
        requests[0].body["threatInfo"]["threatEntries"],
        json!([{ "url": "https://example.com" }])
    );
    assert_eq!(
        requests[0].body["threatInfo"]["platformTypes"],
        json!(["ANY_PLATFORM"])
    );
    assert_eq!(
        requests[0].body["client"],
        json!({ "clientId": "sitecheck", "clientVersion": "1.0" })
    );
}

#[tokio::test]
async fn malware_match_is_unsafe() {
    let server = mock_safe_browsing::start(MockResponse::ok(
        r#"{"matches":[{"threatType":"MALWARE","platformType":"ANY_PLATFORM","threatEntryType":"URL","threat":{"url":"http://malware.testing.google.test/testing/malware/"},"cacheDuration":"300s"}]}"#,
    ))
    .await;
    let client = client_for(&server.endpoint, Duration::from_secs(5));

    let url = normalize("http://malware.testing.google.test/testing/malware/").unwrap();
    let result = client.lookup(&url).await;

    assert_eq!(
        result,
        CheckResult::Unsafe {
            threats: vec![ThreatType::Malware]
        }
    );
}

#[tokio::test]
async fn empty_matches_is_safe() {
    let server = mock_safe_browsing::start(MockResponse::ok(r#"{"matches":[]}"#)).await;
    let client = client_for(&server.endpoint, Duration::from_secs(5));

    let result = client.lookup(&normalize("example.org").unwrap()).await;
    assert_eq!(result, CheckResult::Safe);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = mock_safe_browsing::start(
        MockResponse::ok("{}").delayed(Duration::from_secs(3)),
    )
    .await;
    let client = client_for(&server.endpoint, Duration::from_millis(200));

    let result = client.lookup(&normalize("example.com").unwrap()).await;
    assert!(
        matches!(result, CheckResult::Error(LookupError::Timeout(_))),
        "{result:?}"
    );
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let client = client_for(
        &mock_safe_browsing::unreachable_endpoint(),
        Duration::from_secs(5),
    );

    let result = client.lookup(&normalize("example.com").unwrap()).await;
    let Some(error) = result.error() else {
        panic!("expected an error, got {result:?}");
    };
    assert_eq!(error.kind(), "transport");
    assert!(!error.to_string().contains(TEST_KEY));
}

#[tokio::test]
async fn non_json_body_is_unexpected_response() {
    let server = mock_safe_browsing::start(MockResponse::ok("<html>oops</html>")).await;
    let client = client_for(&server.endpoint, Duration::from_secs(5));

    let result = client.lookup(&normalize("example.com").unwrap()).await;
    assert!(
        matches!(result, CheckResult::Error(LookupError::UnexpectedResponse(_))),
        "{result:?}"
    );
}

#[tokio::test]
async fn bad_api_key_is_rejected() {
    let server = mock_safe_browsing::start(MockResponse::status(
        StatusCode::BAD_REQUEST,
        r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#,
    ))
    .await;
    let client = client_for(&server.endpoint, Duration::from_secs(5));

    let result = client.lookup(&normalize("example.com").unwrap()).await;
    let Some(LookupError::Rejected { status, detail }) = result.error() else {
        panic!("expected rejection, got {result:?}");
    };
    assert_eq!(*status, 400);
    assert!(detail.contains("API key not valid"));
}

#[tokio::test]
async fn outage_is_upstream_error_and_not_retried() {
    let server = mock_safe_browsing::start(MockResponse::status(
        StatusCode::INTERNAL_SERVER_ERROR,
        "backend unavailable",
    ))
    .await;
    let client = client_for(&server.endpoint, Duration::from_secs(5));

    let result = client.lookup(&normalize("example.com").unwrap()).await;
    assert_eq!(
        result,
        CheckResult::Error(LookupError::Upstream {
            status: 500,
            detail: "backend unavailable".to_string(),
        })
    );
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn redirect_is_not_followed() {
    let server = mock_safe_browsing::start(MockResponse::redirect(&format!(
        "{}?moved=1",
        mock_safe_browsing::PATH
    )))
    .await;
    let client = client_for(&server.endpoint, Duration::from_secs(5));

    let result = client.lookup(&normalize("example.com").unwrap()).await;
    let Some(LookupError::Upstream { status, .. }) = result.error() else {
        panic!("expected upstream error, got {result:?}");
    };
    assert_eq!(*status, 302);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
}

#[tokio::test]
async fn session_records_each_check_in_order() {
    let server = mock_safe_browsing::start(MockResponse::ok("{}")).await;
    let mut session = Session::new(client_for(&server.endpoint, Duration::from_secs(5)));

    for raw in ["first.example.com", "second.example.com", "third.example.com"] {
        let entry = session.check(raw).await.unwrap();
        assert!(entry.result().is_safe());
    }
    assert!(session.check("http://").await.is_err());

    let urls: Vec<&str> = session
        .history()
        .entries()
        .iter()
        .map(|entry| entry.url().as_str())
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://first.example.com",
            "https://second.example.com",
            "https://third.example.com"
        ]
    );
    assert_eq!(server.requests().len(), 3);

    session.clear_history();
    assert!(session.history().is_empty());
}
