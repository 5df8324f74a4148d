use crate::api::BackendClient;
use crate::config::WatchConfig;
use crate::output;
use crate::registry::{ConnectionState, FileEntry, RegistrySync};
use anyhow::{Context, Result};
use tracing::debug;

/// List the backend's current files, or follow live updates until
/// Ctrl-C with `--watch`.
pub async fn files(client: &BackendClient, watch_mode: bool, cfg: &WatchConfig) -> Result<()> {
    if !watch_mode {
        let list = client.list_files().await.context("failed to list files")?;
        let entries: Vec<FileEntry> = list.files.into_iter().map(FileEntry::new).collect();
        output::print_files(&entries);
        return Ok(());
    }

    let mut watcher = RegistrySync::start(client.clone(), cfg.clone());
    let mut rx = watcher.subscribe();
    println!("watching for file updates (press Ctrl-C to stop)");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    debug!("file sync task ended");
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                output::print_snapshot(&snapshot);
                if matches!(
                    snapshot.connection,
                    ConnectionState::Closed | ConnectionState::Failed
                ) {
                    break;
                }
            }
        }
    }
    watcher.stop().await;
    Ok(())
}
