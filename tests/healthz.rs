//! End-to-end tests of the service's `/healthz` endpoint over real TCP.

use std::time::Duration;

use futures_util::future::join_all;
use service_health::health::{ComponentStatus, Readiness};
use service_health::lifecycle::Shutdown;

mod common;

#[tokio::test]
async fn test_healthz_under_concurrent_load() {
    let shutdown = Shutdown::new();
    let addr = common::start_service(Readiness::new(), &shutdown).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let url = format!("http://{}/healthz", addr);

    let requests = (0..50).map(|_| {
        let client = client.clone();
        let url = url.clone();
        tokio::spawn(async move { client.get(&url).send().await })
    });

    let results = join_all(requests).await;
    assert_eq!(results.len(), 50);
    for result in results {
        let response = result.unwrap().expect("request left unanswered");
        assert_eq!(response.status(), 200);
        let body = response.text().await.unwrap();
        assert!(body.contains("\"status\":\"ok\""), "unexpected body {}", body);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_healthz_reflects_readiness_changes() {
    let shutdown = Shutdown::new();
    let readiness = Readiness::new();
    readiness.register("slack");
    let addr = common::start_service(readiness.clone(), &shutdown).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let url = format!("http://{}/healthz", addr);

    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), 503);

    readiness.set("slack", ComponentStatus::Ok);
    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), 200);

    shutdown.trigger();
}

#[tokio::test]
async fn test_server_stops_on_shutdown() {
    let shutdown = Shutdown::new();
    let (listener, addr) = common::ephemeral_listener().await;
    let server = service_health::HttpServer::new(Default::default(), Readiness::new());
    let handle = tokio::spawn(server.run(listener, shutdown.clone()));

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let res = client.get(format!("http://{}/healthz", addr)).send().await.unwrap();
    assert_eq!(res.status(), 200);

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop after shutdown")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_shutdown_before_serving_is_not_lost() {
    let shutdown = Shutdown::new();
    // Signal arrives while startup is still binding.
    shutdown.trigger();

    let (listener, _addr) = common::ephemeral_listener().await;
    let server = service_health::HttpServer::new(Default::default(), Readiness::new());
    let handle = tokio::spawn(server.run(listener, shutdown.clone()));

    let result = tokio::time::timeout(Duration::from_secs(3), handle)
        .await
        .expect("server should stop after an early shutdown signal")
        .unwrap();
    assert!(result.is_ok());
}
