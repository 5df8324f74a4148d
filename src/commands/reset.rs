use crate::api::BackendClient;
use anyhow::Result;
use console::style;
use dialoguer::Confirm;
use tracing::warn;

const RESET_WARNING: &str = "This will completely reset the application.\n\
 - All uploaded files will be deleted\n\
 - The vector store will be cleared\n\
The backend must be restarted by hand afterwards. This action cannot be undone.\n\
Continue?";

/// Destructive backend reset behind a confirmation gate. Declining
/// issues no network call; there is no compensating action on success.
pub async fn reset(client: &BackendClient, yes: bool) -> Result<()> {
    let confirmed = yes
        || Confirm::new()
            .with_prompt(RESET_WARNING)
            .default(false)
            .interact()?;
    execute(client, confirmed).await
}

async fn execute(client: &BackendClient, confirmed: bool) -> Result<()> {
    if !confirmed {
        println!("reset cancelled");
        return Ok(());
    }
    match client.fresh_start().await {
        Ok(resp) => {
            println!("{}", style("Application has been reset.").green().bold());
            if let Some(message) = resp.message {
                println!("{message}");
            }
            println!("{}", resp.instructions);
        }
        Err(err) => {
            warn!("fresh start failed: {err}");
            println!(
                "{}",
                style("Failed to reset application. Please try again.").red()
            );
        }
    }
    Ok(())
}
