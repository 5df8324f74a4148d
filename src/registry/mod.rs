//! Live view of the files the backend currently has indexed.
//!
//! The registry combines a one-shot pull of `/files` with the
//! `/ws/files` push stream. The backend always sends full snapshots, so
//! the list is replaced wholesale on every update, never merged.

mod entry;
pub mod sync;

pub use entry::{FileEntry, FileKind};
pub use sync::{RegistrySync, RegistryWatcher};

/// State of the live update stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    /// Closed deliberately (teardown) or by the backend, without error.
    Closed,
    /// Connection failed and no further reconnect will be attempted.
    Failed,
}

/// Complete registry state published to watchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySnapshot {
    pub files: Vec<FileEntry>,
    pub connection: ConnectionState,
    /// False only until the initial pull resolves (or fails) or the
    /// first push event lands.
    pub loaded: bool,
}

impl RegistrySnapshot {
    pub(crate) fn empty() -> Self {
        Self {
            files: Vec::new(),
            connection: ConnectionState::Connecting,
            loaded: false,
        }
    }
}
