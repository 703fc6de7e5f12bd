//! menulint CLI - Review restaurant menus with a language model.

use clap::Parser;
use menulint_analyzer::Analyzer;
use menulint_cli::commands;
use menulint_cli::{Cli, Command, Config, Formatter};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> menulint_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load config, falling back to defaults when the file is absent
    let config_path = Config::path(cli.config.as_deref())?;
    let mut config = Config::load(&config_path)?;
    debug!("Using configuration at {}", config_path.display());

    // Command-line overrides
    config.apply_overrides(cli.model, cli.max_retries)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, cli.api_key, &formatter)
        }
        Command::Correct(args) => {
            let analyzer = build_analyzer(&config, cli.api_key)?;
            commands::execute_correct(args, &analyzer, &formatter).await
        }
        Command::Compare(args) => {
            let analyzer = build_analyzer(&config, cli.api_key)?;
            commands::execute_compare(args, &analyzer, &formatter).await
        }
        Command::Review(args) => {
            let analyzer = build_analyzer(&config, cli.api_key)?;
            commands::execute_review(args, &analyzer, &formatter).await
        }
    }
}

/// Built once per run and shared by reference
fn build_analyzer(config: &Config, api_key_flag: Option<String>) -> menulint_cli::Result<Analyzer> {
    let api_key = config.resolve_api_key(api_key_flag).unwrap_or_default();
    Ok(Analyzer::connect(
        config.gemini_config(api_key),
        config.analyzer.clone(),
    )?)
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
