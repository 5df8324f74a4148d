//! Client library for a document question-answering backend.
//!
//! Typed REST client ([`api::BackendClient`]), a live file-registry
//! sync built on the backend's WebSocket push stream ([`registry`]),
//! and the terminal presentation used by the `docq` binary.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod registry;
