//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    api_key_flag: Option<String>,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_config(config, api_key_flag, formatter),
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Init { force } => init_config(path, force, formatter),
    }
}

/// Print the effective configuration with the credential masked.
fn show_config(config: &Config, api_key_flag: Option<String>, formatter: &Formatter) -> Result<()> {
    let mut shown = config.clone();
    if shown.api_key.is_some() {
        shown.api_key = Some("<redacted>".to_string());
    }
    println!("{}", shown.to_toml()?);
    println!("{}", key_status(config, api_key_flag, formatter));
    Ok(())
}

/// Where the credential will come from, or a warning if nowhere.
fn key_status(config: &Config, api_key_flag: Option<String>, formatter: &Formatter) -> String {
    if config.resolve_api_key(api_key_flag).is_none() {
        formatter.warning("Nenhuma chave da API encontrada. Defina GEMINI_API_KEY ou use --api-key.")
    } else if config.api_key.is_none() {
        formatter.info("Chave da API lida do ambiente ou de --api-key.")
    } else {
        formatter.info("Chave da API definida no arquivo de configuração.")
    }
}

/// Write a default configuration file.
fn init_config(path: &Path, force: bool, formatter: &Formatter) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save(path)?;
    println!(
        "{}",
        formatter.success(&format!("Wrote default configuration to {}", path.display()))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_key_status() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let status = key_status(&Config::default(), Some("k".to_string()), &formatter);
        assert!(status.starts_with("ℹ"));

        let config = Config {
            api_key: Some("from-file".to_string()),
            ..Config::default()
        };
        let status = key_status(&config, None, &formatter);
        assert!(status.contains("arquivo de configuração"));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        init_config(&path, false, &formatter).unwrap();
        assert!(path.exists());
        assert!(matches!(
            init_config(&path, false, &formatter),
            Err(CliError::Config(_))
        ));
        assert!(init_config(&path, true, &formatter).is_ok());
    }
}
