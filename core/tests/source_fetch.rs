//! Fetcher tests against stub HTTP endpoints on a loopback listener.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use txnview_core::config::SourceConfig;
use txnview_core::error::ViewError;
use txnview_core::source::SourceClient;
use txnview_core::view::ViewState;

/// Responses served by path, `None` meaning a 500.
#[derive(Clone)]
struct StubSource {
    customers: Option<String>,
    transactions: Option<String>,
}

/// Serve `hits` requests on a background thread, then stop.
fn spawn_stub(stub: StubSource, hits: usize) -> SourceConfig {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for _ in 0..hits {
            let (mut stream, _) = match listener.accept() {
                Ok(conn) => conn,
                Err(_) => return,
            };
            let mut raw = Vec::new();
            let mut buf = [0u8; 512];
            // GET requests have no body; read until the header terminator.
            loop {
                match stream.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        raw.extend_from_slice(&buf[..n]);
                        if raw.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
            let request = String::from_utf8_lossy(&raw);
            let body = if request.starts_with("GET /customers") {
                stub.customers.clone()
            } else {
                stub.transactions.clone()
            };
            let response = match body {
                Some(b) => format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    b.len(),
                    b
                ),
                None => "HTTP/1.1 500 Internal Server Error\r\n\
                         Content-Length: 0\r\nConnection: close\r\n\r\n"
                    .to_string(),
            };
            let _ = stream.write_all(response.as_bytes());
        }
    });

    SourceConfig::from_base_url(&format!("http://{addr}"))
}

fn good_stub() -> StubSource {
    StubSource {
        customers: Some(r#"[{"id":1,"name":"Ann"},{"id":"2","name":"Bea"}]"#.into()),
        transactions: Some(
            r#"[{"id":10,"customer_id":"1","date":"2024-01-01","amount":5},
                {"id":11,"customer_id":2,"date":"2024-01-02","amount":"9.5"}]"#
                .into(),
        ),
    }
}

#[tokio::test]
async fn fetches_both_collections_as_one_snapshot() {
    let config = spawn_stub(good_stub(), 2);
    let client = SourceClient::new(config).unwrap();

    let snapshot = client.fetch_snapshot().await.unwrap();

    assert_eq!(snapshot.customers.len(), 2);
    assert_eq!(snapshot.transactions.len(), 2);
    // Loose representations normalized at the boundary.
    assert_eq!(snapshot.customers[1].id, 2);
    assert_eq!(snapshot.transactions[0].customer_id, 1);
    assert_eq!(snapshot.transactions[1].amount, 9.5);
}

#[tokio::test]
async fn one_failing_endpoint_fails_the_whole_fetch() {
    let stub = StubSource {
        transactions: None,
        ..good_stub()
    };
    let config = spawn_stub(stub, 2);
    let client = SourceClient::new(config).unwrap();

    let result = client.fetch_snapshot().await;
    assert!(
        matches!(result, Err(ViewError::SourceStatus { status: 500, .. })),
        "expected a status error, got {result:?}"
    );
}

#[tokio::test]
async fn failed_refresh_leaves_the_previous_snapshot_installed() {
    let config = spawn_stub(good_stub(), 2);
    let client = SourceClient::new(config).unwrap();
    let mut state = ViewState::new();
    state.install_snapshot(client.fetch_snapshot().await.unwrap());
    let before = state.base().to_vec();

    let bad_config = spawn_stub(
        StubSource {
            customers: None,
            ..good_stub()
        },
        2,
    );
    let bad_client = SourceClient::new(bad_config).unwrap();
    if let Ok(snapshot) = bad_client.fetch_snapshot().await {
        state.install_snapshot(snapshot);
    }

    assert_eq!(state.base(), &before[..],
        "a failed refresh must not install a partial snapshot");
}

#[tokio::test]
async fn malformed_payload_rejects_the_snapshot() {
    let stub = StubSource {
        customers: Some(r#"[{"id":"not-a-number","name":"Ann"}]"#.into()),
        ..good_stub()
    };
    let config = spawn_stub(stub, 2);
    let client = SourceClient::new(config).unwrap();

    let result = client.fetch_snapshot().await;
    assert!(
        matches!(result, Err(ViewError::MalformedPayload { .. })),
        "a non-numeric id must reject the whole payload, got {result:?}"
    );
}
