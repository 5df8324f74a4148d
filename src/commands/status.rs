use crate::api::BackendClient;
use anyhow::Result;
use console::style;
use tracing::warn;

/// One-shot status check. Exactly one transition out of loading: ready
/// with a count, or unavailable.
pub async fn status(client: &BackendClient) -> Result<()> {
    match client.status().await {
        Ok(info) => {
            println!(
                "{} {} documents indexed",
                style("ready").green().bold(),
                info.documents_indexed
            );
            if !info.uploaded_files.is_empty() {
                println!("uploaded files:");
                for name in &info.uploaded_files {
                    println!("  {name}");
                }
            }
        }
        Err(err) => {
            warn!("status check failed: {err}");
            // Tell a broken document store apart from a dead backend.
            match client.health().await {
                Ok(_) => println!(
                    "{} backend is up but the document store is unavailable",
                    style("degraded").yellow().bold()
                ),
                Err(_) => println!("{} backend unavailable", style("unavailable").red().bold()),
            }
        }
    }
    Ok(())
}
