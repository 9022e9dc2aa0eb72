use std::time::Duration;

use crolens_common::CrolensError;
use crolens_scrape::{FetchOptions, PageFetcher};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> PageFetcher {
    PageFetcher::new(FetchOptions::default()).expect("fetcher builds")
}

#[tokio::test]
async fn fetch_returns_body_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/landing"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<title>Acme</title>"))
        .mount(&server)
        .await;

    let page = fetcher()
        .fetch(&format!("{}/landing", server.uri()))
        .await
        .expect("fetch succeeds");

    assert_eq!(page.status, 200);
    assert!(page.body.contains("<title>Acme</title>"));
}

#[tokio::test]
async fn fetch_sends_browser_like_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "test-agent/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let opts = FetchOptions {
        user_agent: "test-agent/1.0".to_string(),
        ..FetchOptions::default()
    };
    PageFetcher::new(opts)
        .unwrap()
        .fetch(&server.uri())
        .await
        .expect("fetch succeeds");
}

#[tokio::test]
async fn http_403_maps_to_access_denied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = fetcher().fetch(&server.uri()).await.unwrap_err();
    assert!(matches!(err, CrolensError::AccessDenied));
    assert_eq!(err.status_code(), 403);
}

#[tokio::test]
async fn http_404_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fetcher().fetch(&server.uri()).await.unwrap_err();
    assert!(matches!(err, CrolensError::NotFound));
}

#[tokio::test]
async fn other_error_statuses_map_to_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = fetcher().fetch(&server.uri()).await.unwrap_err();
    assert!(matches!(err, CrolensError::Fetch(_)));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn slow_target_maps_to_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let opts = FetchOptions {
        timeout: Duration::from_millis(300),
        ..FetchOptions::default()
    };
    let err = PageFetcher::new(opts)
        .unwrap()
        .fetch(&server.uri())
        .await
        .unwrap_err();

    assert!(matches!(err, CrolensError::Timeout));
    assert_eq!(err.status_code(), 408);
}

#[tokio::test]
async fn unresolvable_host_maps_to_host_not_found() {
    // .invalid is reserved and never resolves (RFC 2606)
    let err = fetcher()
        .fetch("http://no-such-host.invalid/")
        .await
        .unwrap_err();

    assert!(matches!(err, CrolensError::HostNotFound(_)));
    assert!(err.user_message().contains("Website not found"));
}

#[tokio::test]
async fn malformed_url_is_rejected_before_any_request() {
    let err = fetcher().fetch("not a url at all").await.unwrap_err();
    assert!(matches!(err, CrolensError::InvalidInput(_)));
}
