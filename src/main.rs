use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use docq::api::BackendClient;
use docq::commands;
use docq::config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docq", version, about = "Terminal client for a document Q&A backend")]
struct Cli {
    /// Backend origin, e.g. http://127.0.0.1:8000
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Config file path (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show backend readiness and indexed-document count
    Status,
    /// Upload a single document (pdf, txt, md, docx)
    Upload {
        path: PathBuf,
    },
    /// Ask a question against the indexed documents
    Ask {
        /// The question; omit to enter an interactive prompt loop
        question: Option<String>,
        /// Number of source snippets to return
        #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
        k: u8,
    },
    /// List indexed files, optionally following live updates
    Files {
        /// Keep running and re-render on every backend push
        #[arg(long)]
        watch: bool,
    },
    /// Reset the backend state (destructive, requires confirmation)
    Reset {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "docq", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref(), cli.backend.as_deref())?;
    let client = BackendClient::new(&config.backend.url)?;

    match cli.command {
        Command::Status => commands::status(&client).await,
        Command::Upload { path } => commands::upload(&client, &path).await,
        Command::Ask { question, k } => commands::ask(&client, question, k).await,
        Command::Files { watch } => commands::files(&client, watch, &config.watch).await,
        Command::Reset { yes } => commands::reset(&client, yes).await,
        Command::Completions { .. } => Ok(()),
    }
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
