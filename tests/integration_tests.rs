//! Integration tests using mock HTTP server
//!
//! Tests the full flow: config → session → lazy login → paginated fetch → records

use deerberry::auth::LOGIN_PATH;
use deerberry::pagination::collect_pages;
use deerberry::{Client, ClientConfig, Error, InvestmentType};
use futures::StreamExt;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::Arc;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn login_ok(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Date", "Mon, 15 Jan 2024 10:00:00 GMT")
        .set_body_json(json!({
            "access_token": token,
            "refresh_token": "refresh",
            "expires_in": 1800
        }))
}

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new("investor@example.com", "s3cret").with_base_url(server.uri())
}

async fn mount_loans_page(server: &MockServer, offset: u64, total: u64, count: u64) {
    let data: Vec<_> = (offset..offset + count)
        .map(|i| json!({"loanId": 1000 - i, "interestRate": "11.50"}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/v1/loans"))
        .and(query_param("offset", offset.to_string()))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": total,
            "data": data
        })))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Lazy login
// ============================================================================

#[tokio::test]
async fn test_fresh_session_logs_in_once_before_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(login_ok("tok-1"))
        .expect(1)
        .mount(&server)
        .await;
    mount_loans_page(&server, 0, 250, 100).await;
    mount_loans_page(&server, 100, 250, 100).await;
    mount_loans_page(&server, 200, 250, 50).await;

    let client = Client::new(config_for(&server)).unwrap();
    let rows = client.loans().list(None).await.unwrap();
    assert_eq!(rows.len(), 250);

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<_> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(paths[0], LOGIN_PATH);
    assert_eq!(&paths[1..], &["/v1/loans", "/v1/loans", "/v1/loans"]);

    let offsets: Vec<_> = requests[1..]
        .iter()
        .map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "offset")
                .map(|(_, v)| v.into_owned())
                .unwrap()
        })
        .collect();
    assert_eq!(offsets, vec!["0", "100", "200"]);
}

#[tokio::test]
async fn test_stored_credential_skips_login() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let store = dir.path().join("credentials.json");
    std::fs::write(
        &store,
        r#"{"access_token": "tok-1", "refresh_token": "r", "expires_at": null}"#,
    )
    .unwrap();

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(login_ok("tok-new"))
        .expect(0)
        .mount(&server)
        .await;
    mount_loans_page(&server, 0, 3, 3).await;

    let client = Client::new(config_for(&server).with_credentials_path(&store)).unwrap();
    let rows = client.loans().list(None).await.unwrap();
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn test_login_persists_for_next_session() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let store = dir.path().join("nested").join("credentials.json");

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(login_ok("tok-1"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/loans"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0, "data": []})))
        .expect(2)
        .mount(&server)
        .await;

    let config = config_for(&server).with_credentials_path(&store);

    let first = Client::new(config.clone()).unwrap();
    first.loans().list(None).await.unwrap();
    assert!(store.exists());

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store).unwrap()).unwrap();
    assert_eq!(saved["access_token"], "tok-1");
    assert_eq!(saved["expires_at"], "2024-01-15T10:30:00Z");

    // Second session reads the file and never logs in
    let second = Client::new(config).unwrap();
    second.loans().list(None).await.unwrap();
}

#[tokio::test]
async fn test_login_failure_sends_no_page_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("blocked"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/investor/investments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0, "data": []})))
        .expect(0)
        .mount(&server)
        .await;

    let client = Client::new(config_for(&server)).unwrap();
    let err = client.investor().investments_current().await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 403, .. }));
    assert!(!client.authenticator().unwrap().is_authenticated().await);
}

#[tokio::test]
async fn test_concurrent_first_use_logs_in_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(login_ok("tok-1").set_delay(std::time::Duration::from_millis(100)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/loans"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 1, "data": [{}]})))
        .expect(4)
        .mount(&server)
        .await;

    let client = Arc::new(Client::new(config_for(&server)).unwrap());
    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.loans().list(None).await })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap().len(), 1);
    }
}

// ============================================================================
// Pagination through the session
// ============================================================================

#[tokio::test]
async fn test_limit_fetches_single_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(login_ok("tok-1"))
        .mount(&server)
        .await;
    mount_loans_page(&server, 0, 10_000, 100).await;

    let client = Client::new(config_for(&server)).unwrap();
    let pages = collect_pages(client.loans().pages(Some(50))).await.unwrap();

    assert_eq!(pages.len(), 1);
    let body: serde_json::Value = pages[0].json().unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 100);
}

#[tokio::test]
async fn test_page_failure_stops_stream_and_keeps_earlier_pages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(login_ok("tok-1"))
        .mount(&server)
        .await;
    mount_loans_page(&server, 0, 300, 100).await;
    Mock::given(method("GET"))
        .and(path("/v1/loans"))
        .and(query_param("offset", "100"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/loans"))
        .and(query_param("offset", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 300, "data": []})))
        .expect(0)
        .mount(&server)
        .await;

    let client = Client::new(config_for(&server)).unwrap();
    let mut pages = client.loans().pages(None);

    let mut kept = Vec::new();
    let mut failure = None;
    while let Some(page) = pages.next().await {
        match page.and_then(|p| p.error_for_status()) {
            Ok(page) => kept.push(page),
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }
    drop(pages);

    assert_eq!(kept.len(), 1);
    assert_eq!(failure.unwrap().status(), Some(500));
    let body: serde_json::Value = kept[0].json().unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 100);
}

#[tokio::test]
async fn test_investments_finished_rows() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(login_ok("tok-1"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/investor/investments"))
        .and(query_param("type", "FINISHED"))
        .and(query_param("pageSize", "2"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 3,
            "data": [
                {"loanId": 1, "originator": {"name": "A"}},
                {"loanId": 2, "originator": {"name": "B"}}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/investor/investments"))
        .and(query_param("type", "FINISHED"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 3,
            "data": [{"loanId": 3, "originator": {"name": "C"}}]
        })))
        .mount(&server)
        .await;

    let client = Client::new(config_for(&server).with_page_size(2)).unwrap();
    let rows = client
        .investor()
        .investments(InvestmentType::Finished, None)
        .await
        .unwrap();

    let names: Vec<_> = rows
        .iter()
        .map(|r| r["originator.name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

// ============================================================================
// Decimal decoding
// ============================================================================

#[tokio::test]
async fn test_loan_amounts_are_exact() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(login_ok("tok-1"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/loans/77"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"loan": {"loanId": "77", "countryId": 2, "countryIso": "PL",
            "loanOrignator": "Smart Pozyczka", "originatorId": 9,
            "issuedDate": "2024-03-01", "finalPaymentDate": "2024-05-30",
            "termType": "SHORT", "status": "CURRENT", "interestRate": "123.45",
            "loanAmount": 500.10, "assignedAmount": 0.1, "availableToInvest": 0.2,
            "minimumInvestmentAmount": 10, "investedAmount": 0,
            "currencySign": "EUR", "buyback": true, "sellback": false,
            "days": 90, "order_position": 2},
            "originator": {}, "borrower": {}, "schedule": [], "pledge": {}}"#,
        ))
        .mount(&server)
        .await;

    let client = Client::new(config_for(&server)).unwrap();
    let loan = client.loans().get("77").await.unwrap();

    assert_eq!(loan.loan.interest_rate, dec!(123.45));
    assert_eq!(loan.loan.loan_amount, dec!(500.10));
    assert_eq!(
        loan.loan.assigned_amount + loan.loan.available_to_invest,
        dec!(0.3)
    );
}
