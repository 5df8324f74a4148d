#![allow(dead_code)]

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use docq::registry::RegistrySnapshot;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, watch};

/// Serve an axum router on an ephemeral port, returning the origin.
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Wait until the registry publishes a snapshot matching `pred`.
pub async fn wait_for<F>(
    rx: &mut watch::Receiver<RegistrySnapshot>,
    mut pred: F,
) -> RegistrySnapshot
where
    F: FnMut(&RegistrySnapshot) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            {
                let snapshot = rx.borrow_and_update();
                if pred(&snapshot) {
                    return snapshot.clone();
                }
            }
            rx.changed().await.expect("sync task ended");
        }
    })
    .await
    .expect("registry condition not reached in time")
}

/// Scriptable stand-in for the backend's `/files` + `/ws/files` pair.
#[derive(Clone)]
pub struct Stub {
    events: broadcast::Sender<String>,
    pub files: Arc<Mutex<Vec<String>>>,
    pub pulls: Arc<AtomicUsize>,
    pub ws_conns: Arc<AtomicUsize>,
    /// Pushed to the client immediately after each WS handshake.
    pub greeting: Arc<Mutex<Option<String>>>,
    /// Number of leading WS connections to drop right after upgrade.
    pub drop_first: Arc<AtomicUsize>,
    /// Delay before `/files` responds.
    pub pull_delay: Arc<Mutex<Duration>>,
    /// When set, `/files` returns HTTP 500.
    pub fail_pull: Arc<AtomicBool>,
}

impl Stub {
    pub fn new(files: Vec<&str>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            events,
            files: Arc::new(Mutex::new(files.into_iter().map(String::from).collect())),
            pulls: Arc::new(AtomicUsize::new(0)),
            ws_conns: Arc::new(AtomicUsize::new(0)),
            greeting: Arc::new(Mutex::new(None)),
            drop_first: Arc::new(AtomicUsize::new(0)),
            pull_delay: Arc::new(Mutex::new(Duration::ZERO)),
            fail_pull: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/files", get(files_route))
            .route("/ws/files", any(ws_route))
            .with_state(self.clone())
    }

    /// HTTP side only: `/ws/files` does not exist, so upgrade attempts
    /// fail while `/files` keeps working.
    pub fn router_without_ws(&self) -> Router {
        Router::new()
            .route("/files", get(files_route))
            .with_state(self.clone())
    }

    /// Push a raw event to every connected WS client.
    pub fn send(&self, event: &str) {
        let _ = self.events.send(event.to_string());
    }
}

async fn files_route(State(stub): State<Stub>) -> Response {
    stub.pulls.fetch_add(1, Ordering::SeqCst);
    let delay = *stub.pull_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    if stub.fail_pull.load(Ordering::SeqCst) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            "store unavailable",
        )
            .into_response();
    }
    let files = stub.files.lock().unwrap().clone();
    Json(serde_json::json!({ "files": files })).into_response()
}

async fn ws_route(ws: WebSocketUpgrade, State(stub): State<Stub>) -> Response {
    // Subscribe before the handshake response so events sent right
    // after the client observes the connection are never missed.
    let rx = stub.events.subscribe();
    ws.on_upgrade(move |socket| serve_ws(socket, rx, stub))
}

async fn serve_ws(mut socket: WebSocket, mut rx: broadcast::Receiver<String>, stub: Stub) {
    stub.ws_conns.fetch_add(1, Ordering::SeqCst);
    if stub.drop_first.load(Ordering::SeqCst) > 0 {
        stub.drop_first.fetch_sub(1, Ordering::SeqCst);
        return;
    }
    let greeting = stub.greeting.lock().unwrap().clone();
    if let Some(text) = greeting {
        if socket.send(Message::Text(text.into())).await.is_err() {
            return;
        }
    }
    loop {
        tokio::select! {
            msg = socket.recv() => {
                if matches!(msg, None | Some(Err(_))) {
                    break;
                }
            }
            ev = rx.recv() => match ev {
                Ok(text) => {
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    }
}
