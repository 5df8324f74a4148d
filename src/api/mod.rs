//! Typed client for the document Q&A backend REST API.

pub mod client;
pub mod schema;

pub use client::BackendClient;
pub use schema::{FileEvent, Relevance, SourceSnippet};
