//! Live file-registry synchronization.
//!
//! One spawned task owns all registry mutation: it races a one-shot
//! pull of `/files` against the `/ws/files` push stream and publishes
//! full snapshots into a watch channel. The pull and the socket have no
//! ordering dependency; the pull result is applied whenever it
//! resolves, including while connecting or after the stream has died.
//! A pull that resolves after a push event has already landed is
//! discarded, since every push carries a complete snapshot at least as
//! fresh as the pull.

use super::{ConnectionState, FileEntry, RegistrySnapshot};
use crate::api::schema::{FileEvent, FilesResponse};
use crate::api::BackendClient;
use crate::config::WatchConfig;
use futures_util::StreamExt;
use std::pin::pin;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct RegistrySync;

impl RegistrySync {
    /// Start the live sync. The initial pull and the socket connect run
    /// concurrently; neither blocks the other.
    pub fn start(client: BackendClient, cfg: WatchConfig) -> RegistryWatcher {
        let (tx, rx) = watch::channel(RegistrySnapshot::empty());
        let cancel = CancellationToken::new();
        let task = SyncTask {
            client,
            cfg,
            tx,
            cancel: cancel.clone(),
            files: Vec::new(),
            connection: ConnectionState::Connecting,
            seen_push: false,
            loaded: false,
        };
        let handle = tokio::spawn(task.run());
        RegistryWatcher {
            rx,
            cancel,
            task: Some(handle),
        }
    }
}

/// Handle to a running sync task. Dropping it cancels the stream; the
/// socket is released on every exit path.
pub struct RegistryWatcher {
    rx: watch::Receiver<RegistrySnapshot>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RegistryWatcher {
    /// Subscribe to registry snapshots. The receiver wakes immediately
    /// with the current state, so new consumers never wait for the next
    /// publish to render.
    pub fn subscribe(&self) -> watch::Receiver<RegistrySnapshot> {
        let mut rx = self.rx.clone();
        rx.mark_changed();
        rx
    }

    /// Stop the live stream and wait for teardown. Safe to call more
    /// than once.
    pub async fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for RegistryWatcher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct SyncTask {
    client: BackendClient,
    cfg: WatchConfig,
    tx: watch::Sender<RegistrySnapshot>,
    cancel: CancellationToken,
    files: Vec<String>,
    connection: ConnectionState,
    seen_push: bool,
    loaded: bool,
}

type PullHandle = JoinHandle<crate::error::Result<FilesResponse>>;

impl SyncTask {
    async fn run(mut self) {
        let mut pull: Option<PullHandle> = Some(self.spawn_pull());
        let mut pull_pending = true;
        let mut attempt: u32 = 0;
        let mut resumed = false;

        loop {
            self.set_state(ConnectionState::Connecting);
            let connected = {
                let mut connect = pin!(connect_async(self.client.ws_files_url()));
                loop {
                    tokio::select! {
                        _ = self.cancel.cancelled() => {
                            self.abandon(&mut pull, ConnectionState::Closed);
                            return;
                        }
                        res = async { pull.as_mut().expect("pull pending").await }, if pull_pending => {
                            pull = None;
                            pull_pending = false;
                            self.apply_pull(res);
                        }
                        res = &mut connect => break res,
                    }
                }
            };
            let mut ws = match connected {
                Ok((ws, _)) => ws,
                Err(err) => {
                    warn!("live file stream failed to connect: {err}");
                    if self.retry_delay(&mut attempt).await {
                        continue;
                    }
                    self.drain_and_finish(pull.take(), ConnectionState::Failed)
                        .await;
                    return;
                }
            };
            attempt = 0;
            if resumed {
                // The stream may have missed events while down; refresh
                // the snapshot before trusting pushes again.
                if let Some(stale) = pull.take() {
                    stale.abort();
                }
                self.seen_push = false;
                pull = Some(self.spawn_pull());
                pull_pending = true;
            }
            resumed = true;
            self.set_state(ConnectionState::Open);

            loop {
                tokio::select! {
                    _ = self.cancel.cancelled() => {
                        let _ = ws.close(None).await;
                        self.abandon(&mut pull, ConnectionState::Closed);
                        return;
                    }
                    res = async { pull.as_mut().expect("pull pending").await }, if pull_pending => {
                        pull = None;
                        pull_pending = false;
                        self.apply_pull(res);
                    }
                    msg = ws.next() => match msg {
                        Some(Ok(Message::Text(text))) => self.apply_event(text.as_str()),
                        Some(Ok(_)) => {}
                        Some(Err(err)) => {
                            warn!("live file stream error: {err}");
                            if self.retry_delay(&mut attempt).await {
                                break;
                            }
                            self.drain_and_finish(pull.take(), ConnectionState::Failed)
                                .await;
                            return;
                        }
                        None => {
                            info!("live file stream closed by backend");
                            if self.retry_delay(&mut attempt).await {
                                break;
                            }
                            self.drain_and_finish(pull.take(), ConnectionState::Closed)
                                .await;
                            return;
                        }
                    }
                }
            }
        }
    }

    fn spawn_pull(&self) -> PullHandle {
        let client = self.client.clone();
        tokio::spawn(async move { client.list_files().await })
    }

    fn apply_pull(&mut self, res: Result<crate::error::Result<FilesResponse>, JoinError>) {
        self.loaded = true;
        match res {
            Ok(Ok(list)) if !self.seen_push => self.files = list.files,
            Ok(Ok(_)) => debug!("initial file list superseded by a push update"),
            // Not fatal: the registry stays empty and the push stream
            // may still deliver data.
            Ok(Err(err)) => warn!("initial file list fetch failed: {err}"),
            Err(err) => warn!("file list fetch task failed: {err}"),
        }
        self.publish();
    }

    fn apply_event(&mut self, raw: &str) {
        match serde_json::from_str::<FileEvent>(raw) {
            Ok(FileEvent::FileUpdated { files }) => {
                self.files = files;
                self.seen_push = true;
                self.loaded = true;
                self.publish();
            }
            Ok(FileEvent::FilesCleared) => {
                self.files.clear();
                self.seen_push = true;
                self.loaded = true;
                self.publish();
            }
            Ok(FileEvent::Unknown) => debug!("ignoring unrecognized file event: {raw}"),
            Err(err) => warn!("malformed file event: {err}"),
        }
    }

    /// Wait before the next reconnect attempt. Returns false when the
    /// policy is exhausted, disabled, or the watcher was cancelled.
    async fn retry_delay(&self, attempt: &mut u32) -> bool {
        if !self.cfg.reconnect || *attempt >= self.cfg.max_retries {
            return false;
        }
        *attempt += 1;
        info!(
            "reconnecting live file stream (attempt {}/{})",
            attempt, self.cfg.max_retries
        );
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(Duration::from_secs(self.cfg.retry_delay_secs)) => true,
        }
    }

    /// Cancelled teardown: discard any in-flight pull.
    fn abandon(&mut self, pull: &mut Option<PullHandle>, connection: ConnectionState) {
        if let Some(pending) = pull.take() {
            pending.abort();
        }
        self.set_state(connection);
    }

    /// The stream is over for good. A still-pending pull is drained so
    /// its result is not lost, and loading is always cleared so a
    /// consumer is never stuck on a loading state with no data coming.
    async fn drain_and_finish(&mut self, pull: Option<PullHandle>, connection: ConnectionState) {
        if let Some(mut pending) = pull {
            tokio::select! {
                _ = self.cancel.cancelled() => pending.abort(),
                res = &mut pending => self.apply_pull(res),
            }
        }
        self.loaded = true;
        self.set_state(connection);
    }

    fn set_state(&mut self, connection: ConnectionState) {
        self.connection = connection;
        self.publish();
    }

    fn publish(&self) {
        let files = self.files.iter().cloned().map(FileEntry::new).collect();
        let _ = self.tx.send(RegistrySnapshot {
            files,
            connection: self.connection,
            loaded: self.loaded,
        });
    }
}
