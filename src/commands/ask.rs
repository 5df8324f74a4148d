use crate::api::BackendClient;
use crate::error::Error;
use crate::output;
use anyhow::{bail, Result};
use console::style;
use dialoguer::Input;
use tracing::warn;

/// Ask a question, or enter an interactive prompt loop when no question
/// was given. Requests are strictly serial; there is never an in-flight
/// request to supersede.
pub async fn ask(client: &BackendClient, question: Option<String>, k: u8) -> Result<()> {
    match question {
        Some(q) => {
            if q.trim().is_empty() {
                bail!("question must not be empty");
            }
            ask_once(client, &q, k).await
        }
        None => interactive(client, k).await,
    }
}

async fn ask_once(client: &BackendClient, question: &str, k: u8) -> Result<()> {
    match client.ask(question, k).await {
        Ok(resp) => output::print_answer(&resp.answer, &resp.sources, question),
        Err(Error::EmptyQuestion) => bail!("question must not be empty"),
        Err(err) => {
            warn!("ask failed: {err}");
            println!(
                "{}",
                style("Failed to get answer. Please try again.").red()
            );
        }
    }
    Ok(())
}

async fn interactive(client: &BackendClient, k: u8) -> Result<()> {
    println!("interactive mode; empty line or 'exit' to quit");
    loop {
        let line: String = Input::<String>::new()
            .with_prompt("question")
            .allow_empty(true)
            .interact_text()?;
        let question = line.trim();
        if question.is_empty() || question == "exit" || question == "quit" {
            return Ok(());
        }
        ask_once(client, question, k).await?;
        println!();
    }
}
