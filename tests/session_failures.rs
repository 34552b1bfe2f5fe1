//! Session-acquisition retry policy and error mapping, end to end.

mod common;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio::net::TcpListener;

use common::{proxy_config, start_mock_upstream, start_proxy, test_client, MockResponse};

const DEVICE_COOKIE: &str = "_device_id=retry-device; Path=/";
const SESSION_FAILURE_BODY: &str = "Failed to retrieve Device ID";

#[tokio::test]
async fn test_handshake_succeeds_on_fourth_attempt() {
    let handshakes = Arc::new(AtomicU32::new(0));
    let counter = handshakes.clone();
    let (upstream_addr, _requests) = start_mock_upstream(move |req| {
        let counter = counter.clone();
        async move {
            match req.path() {
                "/" => {
                    if counter.fetch_add(1, Ordering::SeqCst) < 3 {
                        MockResponse::new(503, "busy")
                    } else {
                        MockResponse::json("{}").with_cookie(DEVICE_COOKIE)
                    }
                }
                "/dapi/menu/pl" => MockResponse::json(r#"{"data":{}}"#),
                _ => MockResponse::new(500, "unexpected"),
            }
        }
    })
    .await;
    let (proxy_addr, shutdown) = start_proxy(proxy_config(upstream_addr)).await;

    let res = test_client()
        .get(format!("http://{}/api/menu?resId=1", proxy_addr))
        .send()
        .await
        .expect("proxy unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(
        handshakes.load(Ordering::SeqCst),
        4,
        "three failures then one success"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_handshake_budget_exhausted_yields_fixed_500() {
    let (upstream_addr, requests) = start_mock_upstream(|req| async move {
        match req.path() {
            "/" => MockResponse::new(500, "down"),
            _ => MockResponse::json("{}"),
        }
    })
    .await;
    let (proxy_addr, shutdown) = start_proxy(proxy_config(upstream_addr)).await;

    let res = test_client()
        .get(format!("http://{}/api/cuisines", proxy_addr))
        .send()
        .await
        .expect("proxy unreachable");

    assert_eq!(res.status(), 500);
    assert_eq!(res.text().await.unwrap(), SESSION_FAILURE_BODY);

    let log = requests.lock().unwrap();
    assert_eq!(log.len(), 4, "exactly four handshake attempts, nothing else");
    assert!(log.iter().all(|r| r.path() == "/"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_missing_device_cookie_is_not_retried() {
    let (upstream_addr, requests) = start_mock_upstream(|req| async move {
        match req.path() {
            // Handshake succeeds but issues no device cookie.
            "/" => MockResponse::json("{}").with_cookie("tid=xyz; Path=/"),
            _ => MockResponse::json("{}"),
        }
    })
    .await;
    let (proxy_addr, shutdown) = start_proxy(proxy_config(upstream_addr)).await;

    let res = test_client()
        .get(format!(
            "http://{}/api/search-results?searchQuery=dosa",
            proxy_addr
        ))
        .send()
        .await
        .expect("proxy unreachable");

    assert_eq!(res.status(), 500);
    assert_eq!(res.text().await.unwrap(), SESSION_FAILURE_BODY);

    let log = requests.lock().unwrap();
    assert_eq!(log.len(), 1, "a parsing failure must not be retried");
    assert_eq!(log[0].path(), "/");

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_http_error_status_is_reproduced_as_text() {
    let (upstream_addr, _requests) = start_mock_upstream(|req| async move {
        match req.path() {
            "/" => MockResponse::json("{}").with_cookie(DEVICE_COOKIE),
            "/dapi/restaurants/search/v3" => MockResponse::new(404, "no such page"),
            _ => MockResponse::new(500, "unexpected"),
        }
    })
    .await;
    let (proxy_addr, shutdown) = start_proxy(proxy_config(upstream_addr)).await;

    let res = test_client()
        .get(format!(
            "http://{}/api/search-results?searchQuery=pizza",
            proxy_addr
        ))
        .send()
        .await
        .expect("proxy unreachable");

    assert_eq!(res.status(), 404);
    let body = res.text().await.unwrap();
    assert!(body.contains("404"), "error detail should name the status: {body}");

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_http_error_is_json_for_restaurants() {
    let (upstream_addr, _requests) = start_mock_upstream(|req| async move {
        match req.path() {
            "/dapi/restaurants/list/v5" => MockResponse::new(429, "slow down"),
            _ => MockResponse::new(500, "unexpected"),
        }
    })
    .await;
    let (proxy_addr, shutdown) = start_proxy(proxy_config(upstream_addr)).await;

    let res = test_client()
        .get(format!("http://{}/api/restaurants", proxy_addr))
        .send()
        .await
        .expect("proxy unreachable");

    assert_eq!(res.status(), 429);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("429"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_transport_error_maps_to_500() {
    // Bind and immediately drop a listener so the port refuses connections.
    let dead = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = dead.local_addr().unwrap();
    drop(dead);

    let (proxy_addr, shutdown) = start_proxy(proxy_config(dead_addr)).await;

    let res = test_client()
        .get(format!("http://{}/api/restaurants", proxy_addr))
        .send()
        .await
        .expect("proxy unreachable");

    assert_eq!(res.status(), 500);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(!body["error"].as_str().unwrap().is_empty());

    shutdown.trigger();
}
