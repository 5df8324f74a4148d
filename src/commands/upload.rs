use crate::api::BackendClient;
use crate::registry::FileKind;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Upload a single document. No retry, no resumability; the backend ack
/// message is shown verbatim when present.
pub async fn upload(client: &BackendClient, path: &Path) -> Result<()> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if FileKind::of_name(name) == FileKind::Unknown {
        println!(
            "{} '{name}' has an unrecognized extension; the backend may reject it",
            style("warning:").yellow()
        );
    }
    let ack = client
        .upload(path)
        .await
        .with_context(|| format!("failed to upload '{}'", path.display()))?;
    match ack.message {
        Some(message) => println!("{message}"),
        None => println!("uploaded '{name}'"),
    }
    Ok(())
}
