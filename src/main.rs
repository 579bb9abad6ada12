use anyhow::Context;
use clap::{ArgAction, Parser};
use provwiz::config::JsonConfigStore;
use provwiz::fetch::HttpModelFetcher;
use provwiz::prompt::TerminalPrompt;
use provwiz::Wizard;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Interactive provider authentication and model configuration wizard.
#[derive(Debug, Parser)]
#[command(name = "provwiz", version, about)]
struct Cli {
    /// Print the new provider config as JSON instead of saving it,
    /// for composition into a larger flow.
    #[arg(long)]
    append: bool,

    /// Configuration file path (default: the user config directory).
    #[arg(long, env = "PROVWIZ_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v: info, -vv: debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("provwiz={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let path = match cli.config {
        Some(path) => path,
        None => JsonConfigStore::default_path().context("resolving config path")?,
    };
    let mut store = JsonConfigStore::new(path);
    let fetcher = HttpModelFetcher::new().context("building HTTP client")?;
    let mut interact = TerminalPrompt::new();

    let mut wizard = Wizard::new(&mut store, &fetcher, &mut interact);
    if let Some(provider) = wizard.run(cli.append)? {
        println!("{}", serde_json::to_string_pretty(&provider)?);
    }
    Ok(())
}
