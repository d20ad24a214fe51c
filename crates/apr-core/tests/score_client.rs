//! Integration tests for ScoreClient.
//!
//! Uses wiremock for HTTP mocking. Tests cover the concurrent pair fetch,
//! decode failures on either side, status mapping, bad targets and
//! cancellation.

use std::time::Duration;

use apr_core::{
    AprError, CancellationToken, CreditScore, ScoreClient, ScoreConfig, ScoreSource, UserId,
    SCORE_USER_AGENT,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_client(mock_server: &MockServer) -> ScoreClient {
    let config = ScoreConfig::default()
        .with_base_url(mock_server.uri())
        .with_timeout_secs(5);
    ScoreClient::new(config).expect("failed to create client")
}

async fn mount_score(mock_server: &MockServer, source: &str, user_id: u64, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/credit-score/{}", source, user_id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_fetch_scores_success() {
    let mock_server = MockServer::start().await;
    mount_score(&mock_server, "equifax", 1, r#"{"score": 250}"#).await;
    mount_score(&mock_server, "experian", 1, r#"{"score": 300}"#).await;

    let client = create_test_client(&mock_server);
    let pair = client
        .fetch_scores(UserId(1), &CancellationToken::new())
        .await
        .expect("fetch failed");

    assert_eq!(pair.equifax, CreditScore::new(250));
    assert_eq!(pair.experian, CreditScore::new(300));

    let apr = client
        .apr_for_user(UserId(1), &CancellationToken::new())
        .await
        .expect("apr failed");
    assert_eq!(apr, 2.0);
}

#[tokio::test]
async fn test_fetch_sends_user_agent() {
    let mock_server = MockServer::start().await;

    for source in ["equifax", "experian"] {
        Mock::given(method("GET"))
            .and(path(format!("/{}/credit-score/7", source)))
            .and(header("user-agent", SCORE_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"score": 700}"#))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = create_test_client(&mock_server);
    let apr = client
        .apr_for_user(UserId(7), &CancellationToken::new())
        .await
        .expect("apr failed");
    assert_eq!(apr, 7.0);
}

#[tokio::test]
async fn test_requests_run_concurrently() {
    let mock_server = MockServer::start().await;
    let delay = Duration::from_millis(400);

    for source in ["equifax", "experian"] {
        Mock::given(method("GET"))
            .and(path(format!("/{}/credit-score/2", source)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"score": 600}"#)
                    .set_delay(delay),
            )
            .mount(&mock_server)
            .await;
    }

    let client = create_test_client(&mock_server);
    let started = std::time::Instant::now();
    client
        .fetch_scores(UserId(2), &CancellationToken::new())
        .await
        .expect("fetch failed");

    // Sequential requests would need at least twice the delay.
    assert!(
        started.elapsed() < delay * 2,
        "pair fetch took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn test_missing_score_field_fails_whole_fetch() {
    let mock_server = MockServer::start().await;
    mount_score(&mock_server, "equifax", 3, r#"{"score": 810}"#).await;
    mount_score(&mock_server, "experian", 3, r#"{"rating": "good"}"#).await;

    let client = create_test_client(&mock_server);
    let result = client
        .fetch_scores(UserId(3), &CancellationToken::new())
        .await;

    match result {
        Err(AprError::Decode { side, message }) => {
            assert_eq!(side, ScoreSource::Experian);
            assert!(message.contains("score"), "message: {message}");
        }
        other => panic!("expected Decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_json_fails_whole_fetch() {
    let mock_server = MockServer::start().await;
    mount_score(&mock_server, "equifax", 4, "<html>oops</html>").await;
    mount_score(&mock_server, "experian", 4, r#"{"score": 500}"#).await;

    let client = create_test_client(&mock_server);
    let result = client
        .apr_for_user(UserId(4), &CancellationToken::new())
        .await;

    assert!(matches!(
        result,
        Err(AprError::Decode {
            side: ScoreSource::Equifax,
            ..
        })
    ));
}

#[tokio::test]
async fn test_non_success_status() {
    let mock_server = MockServer::start().await;
    mount_score(&mock_server, "equifax", 5, r#"{"score": 500}"#).await;
    Mock::given(method("GET"))
        .and(path("/experian/credit-score/5"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client
        .fetch_scores(UserId(5), &CancellationToken::new())
        .await;

    assert!(matches!(
        result,
        Err(AprError::UnexpectedStatus {
            side: ScoreSource::Experian,
            status: 503
        })
    ));
}

#[tokio::test]
async fn test_bad_target_sends_no_requests() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"score": 1}"#))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client
        .fetch_scores(UserId(0), &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(AprError::BadRequestTarget { .. })));
    mock_server.verify().await;
}

#[tokio::test]
async fn test_cancellation_during_flight() {
    let mock_server = MockServer::start().await;
    for source in ["equifax", "experian"] {
        Mock::given(method("GET"))
            .and(path(format!("/{}/credit-score/6", source)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"score": 600}"#)
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;
    }

    let client = create_test_client(&mock_server);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    let result = client.fetch_scores(UserId(6), &cancel).await;

    assert!(matches!(result, Err(AprError::Cancelled)));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    // Bind and drop a listener to get a port with nothing behind it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ScoreClient::new(
        ScoreConfig::default()
            .with_base_url(format!("http://{}", addr))
            .with_timeout_secs(2),
    )
    .unwrap();
    let result = client
        .fetch_scores(UserId(1), &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(AprError::Network { .. })));
}
