mod common;
use crate::common::init_tracing;

use axum::Router;
use axum::routing::get;
use plugsync::server::DevServer;
use tokio::net::TcpListener;

/// Spin up a throwaway upstream server and return its base URL.
async fn start_upstream() -> String {
    let app = Router::new()
        .route("/ping", get(|| async { "upstream-ok" }))
        .route("/echo-query", get(|uri: axum::http::Uri| async move {
            uri.query().unwrap_or("").to_string()
        }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn proxy_forwards_requests_to_upstream() {
    init_tracing();

    let upstream = start_upstream().await;
    // Port 0: tests must not squat the default dev port.
    let server = DevServer::init(0, &upstream).await.unwrap();

    let resp = reqwest::get(format!("http://{}/ping", server.local_addr()))
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.text().await.unwrap(), "upstream-ok");
}

#[tokio::test]
async fn proxy_preserves_query_strings() {
    init_tracing();

    let upstream = start_upstream().await;
    let server = DevServer::init(0, &upstream).await.unwrap();

    let resp = reqwest::get(format!(
        "http://{}/echo-query?page=blocks&tab=2",
        server.local_addr()
    ))
    .await
    .unwrap();

    assert_eq!(resp.text().await.unwrap(), "page=blocks&tab=2");
}

#[tokio::test]
async fn unreachable_upstream_yields_bad_gateway() {
    init_tracing();

    // Port 9 (discard) is about as unreachable as it gets locally.
    let server = DevServer::init(0, "http://127.0.0.1:9").await.unwrap();

    let resp = reqwest::get(format!("http://{}/anything", server.local_addr()))
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 502);
}

#[tokio::test]
async fn reload_without_clients_is_best_effort() {
    init_tracing();

    let server = DevServer::init(0, "http://127.0.0.1:9").await.unwrap();

    // No browser connected; both calls are silent no-ops.
    server.reload();
    server.reload_handle().reload();
}
