//! End-to-end tests of the `/ws/records` observer feed against a real
//! listener: registration, fan-out, disconnect, idle timeout, and shutdown.

#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::StreamExt;
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::time::{Instant, timeout};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use checkin_hub::app_state::AppState;
use checkin_hub::config::HubConfig;
use checkin_hub::server::build_app;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

const WAIT: Duration = Duration::from_secs(5);

struct TestServer {
    addr: SocketAddr,
    state: AppState,
    shutdown_tx: watch::Sender<bool>,
}

async fn start(config: HubConfig) -> TestServer {
    let (state, shutdown_tx) = AppState::new(config);
    let app = build_app(state.clone());
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("failed to bind");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    TestServer {
        addr,
        state,
        shutdown_tx,
    }
}

fn quiet_config() -> HubConfig {
    HubConfig {
        heartbeat_interval: None,
        idle_timeout: None,
        ..HubConfig::default()
    }
}

async fn connect(server: &TestServer) -> Client {
    let url = format!("ws://{}/ws/records", server.addr);
    let Ok((client, _)) = connect_async(url).await else {
        panic!("websocket connect failed");
    };
    client
}

async fn wait_for_observers(server: &TestServer, expected: usize) {
    let deadline = Instant::now() + WAIT;
    while server.state.observers.len().await != expected {
        if Instant::now() >= deadline {
            panic!("expected {expected} observers");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

async fn next_json(client: &mut Client) -> Value {
    loop {
        let Ok(Some(Ok(frame))) = timeout(WAIT, client.next()).await else {
            panic!("no frame received");
        };
        match frame {
            Message::Text(text) => {
                let Ok(value) = serde_json::from_str(text.as_str()) else {
                    panic!("not JSON: {}", text.as_str());
                };
                return value;
            }
            Message::Ping(_) | Message::Pong(_) => {}
            other => panic!("unexpected frame: {other:?}"),
        }
    }
}

/// Admits `count` check-ins whose names are about 1 MiB each, numbered from
/// zero, so a peer that is not reading backs up its socket.
async fn admit_large_checkins(server: &TestServer, count: usize) {
    let padding = "x".repeat(1 << 20);
    for i in 0..count {
        let name = format!("{i:03}-{padding}");
        let status = check_in(
            server,
            &json!({"name": name, "type": "guest", "currentTime": "t"}),
        )
        .await;
        assert_eq!(status, reqwest::StatusCode::OK);
    }
}

async fn check_in(server: &TestServer, body: &Value) -> reqwest::StatusCode {
    let url = format!("http://{}/api/checkin", server.addr);
    let Ok(response) = reqwest::Client::new().post(url).json(body).send().await else {
        panic!("check-in request failed");
    };
    response.status()
}

#[tokio::test]
async fn observer_receives_new_checkin() {
    let server = start(quiet_config()).await;
    let mut client = connect(&server).await;
    wait_for_observers(&server, 1).await;

    let status = check_in(
        &server,
        &json!({"name": "Ann", "type": "Guest", "currentTime": "2024-01-01T10:00:00"}),
    )
    .await;
    assert_eq!(status, reqwest::StatusCode::OK);

    let message = next_json(&mut client).await;
    assert_eq!(message["type"], "new_checkin");
    assert_eq!(message["data"]["name"], "Ann");
    assert_eq!(message["data"]["type"], "guest");
    assert_eq!(message["data"]["timestamp"], "2024-01-01T10:00:00");
    assert!(message["data"]["received_at"].as_str().is_some_and(|s| !s.is_empty()));

    let records = server.state.checkin_service.all_records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(
        &serde_json::to_value(records.first()).unwrap_or_default(),
        &message["data"]
    );
}

#[tokio::test]
async fn every_observer_gets_each_checkin_in_order() {
    let server = start(quiet_config()).await;
    let mut first = connect(&server).await;
    let mut second = connect(&server).await;
    wait_for_observers(&server, 2).await;

    for name in ["A", "B"] {
        let status = check_in(
            &server,
            &json!({"name": name, "type": "member", "currentTime": "t"}),
        )
        .await;
        assert_eq!(status, reqwest::StatusCode::OK);
    }

    for client in [&mut first, &mut second] {
        assert_eq!(next_json(client).await["data"]["name"], "A");
        assert_eq!(next_json(client).await["data"]["name"], "B");
    }
}

#[tokio::test]
async fn rejected_checkin_is_not_broadcast() {
    let server = start(quiet_config()).await;
    let mut client = connect(&server).await;
    wait_for_observers(&server, 1).await;

    let status = check_in(
        &server,
        &json!({"name": "Ann", "type": "volunteer", "currentTime": "t"}),
    )
    .await;
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);

    let status = check_in(
        &server,
        &json!({"name": "Bo", "type": "guest", "currentTime": "t"}),
    )
    .await;
    assert_eq!(status, reqwest::StatusCode::OK);

    // The first frame is the accepted check-in, not the rejected one.
    assert_eq!(next_json(&mut client).await["data"]["name"], "Bo");
}

#[tokio::test]
async fn closing_the_socket_deregisters() {
    let server = start(quiet_config()).await;
    let mut leaving = connect(&server).await;
    let mut staying = connect(&server).await;
    wait_for_observers(&server, 2).await;

    let _ = leaving.close(None).await;
    wait_for_observers(&server, 1).await;

    let status = check_in(
        &server,
        &json!({"name": "Ann", "type": "guest", "currentTime": "t"}),
    )
    .await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(next_json(&mut staying).await["data"]["name"], "Ann");
}

#[tokio::test]
async fn silent_observer_is_dropped_after_idle_timeout() {
    let server = start(HubConfig {
        heartbeat_interval: None,
        idle_timeout: Some(Duration::from_millis(200)),
        ..HubConfig::default()
    })
    .await;
    let _client = connect(&server).await;
    wait_for_observers(&server, 1).await;

    wait_for_observers(&server, 0).await;
}

#[tokio::test]
async fn heartbeat_keeps_responsive_observer_alive() {
    let server = start(HubConfig {
        heartbeat_interval: Some(Duration::from_millis(100)),
        idle_timeout: Some(Duration::from_millis(400)),
        ..HubConfig::default()
    })
    .await;
    let mut client = connect(&server).await;
    wait_for_observers(&server, 1).await;

    // Polling the stream lets the client answer pings with pongs.
    let mut pings = 0;
    let deadline = Instant::now() + Duration::from_secs(1);
    while Instant::now() < deadline {
        if let Ok(Some(Ok(Message::Ping(_)))) =
            timeout(Duration::from_millis(50), client.next()).await
        {
            pings += 1;
        }
    }
    assert!(pings > 0);
    assert_eq!(server.state.observers.len().await, 1);
}

#[tokio::test]
async fn shutdown_closes_observers() {
    let server = start(quiet_config()).await;
    let mut client = connect(&server).await;
    wait_for_observers(&server, 1).await;

    let _ = server.shutdown_tx.send(true);

    let Ok(frame) = timeout(WAIT, client.next()).await else {
        panic!("no close frame");
    };
    assert!(matches!(frame, Some(Ok(Message::Close(_))) | None));
    wait_for_observers(&server, 0).await;
}

#[tokio::test]
async fn stalled_reader_is_dropped_after_idle_timeout() {
    let server = start(HubConfig {
        heartbeat_interval: Some(Duration::from_millis(100)),
        idle_timeout: Some(Duration::from_millis(300)),
        ..HubConfig::default()
    })
    .await;
    // Connected but never polled again.
    let _client = connect(&server).await;
    wait_for_observers(&server, 1).await;

    admit_large_checkins(&server, 48).await;
    wait_for_observers(&server, 0).await;
}

#[tokio::test]
async fn shutdown_reclaims_stalled_reader() {
    let server = start(quiet_config()).await;
    let _client = connect(&server).await;
    wait_for_observers(&server, 1).await;

    admit_large_checkins(&server, 48).await;
    assert_eq!(server.state.observers.len().await, 1);

    let _ = server.shutdown_tx.send(true);
    wait_for_observers(&server, 0).await;
}

#[tokio::test]
async fn full_queue_skips_events_but_keeps_the_observer() {
    let server = start(HubConfig {
        observer_queue_capacity: 1,
        ..quiet_config()
    })
    .await;
    let mut client = connect(&server).await;
    wait_for_observers(&server, 1).await;

    // Nothing is read while these are admitted, so the queue overflows.
    let total = 48;
    admit_large_checkins(&server, total).await;
    assert_eq!(server.state.observers.len().await, 1);

    let mut seen = Vec::new();
    while let Ok(Some(Ok(frame))) = timeout(Duration::from_millis(500), client.next()).await {
        let Message::Text(text) = frame else {
            continue;
        };
        let Ok(message) = serde_json::from_str::<Value>(text.as_str()) else {
            panic!("not JSON");
        };
        let Some(index) = message["data"]["name"]
            .as_str()
            .and_then(|name| name.get(..3))
            .and_then(|prefix| prefix.parse::<usize>().ok())
        else {
            panic!("unexpected name");
        };
        seen.push(index);
    }
    assert!(!seen.is_empty());
    assert!(seen.len() < total, "no event was skipped");
    assert!(seen.windows(2).all(|pair| pair.first() < pair.get(1)));

    let status = check_in(
        &server,
        &json!({"name": "after", "type": "member", "currentTime": "t"}),
    )
    .await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(next_json(&mut client).await["data"]["name"], "after");
    assert_eq!(server.state.checkin_service.all_records().await.len(), total + 1);
}

#[tokio::test]
async fn zero_periods_disable_heartbeat_and_idle_timeout() {
    let server = start(HubConfig {
        heartbeat_interval: Some(Duration::ZERO),
        idle_timeout: Some(Duration::ZERO),
        ..HubConfig::default()
    })
    .await;
    let mut client = connect(&server).await;
    wait_for_observers(&server, 1).await;

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(server.state.observers.len().await, 1);

    let status = check_in(
        &server,
        &json!({"name": "Ann", "type": "guest", "currentTime": "t"}),
    )
    .await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(next_json(&mut client).await["data"]["name"], "Ann");
}
