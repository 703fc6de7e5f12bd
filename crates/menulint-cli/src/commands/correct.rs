//! Correct command implementation.

use crate::cli::CorrectArgs;
use crate::error::Result;
use crate::output::Formatter;
use menulint_analyzer::Analyzer;
use menulint_extract::{extract_file, DocumentKind};
use menulint_llm::Transport;
use tracing::info;

/// Execute the correct command.
pub async fn execute_correct<T: Transport>(
    args: CorrectArgs,
    analyzer: &Analyzer<T>,
    formatter: &Formatter,
) -> Result<()> {
    let menu = extract_file(&args.menu, DocumentKind::MENU).await?;
    info!("Read {} chars from {}", menu.char_count, args.menu.display());

    let corrections = analyzer.analyze_menu(&menu.text).await?;

    println!("{}", formatter.format_corrections(&corrections)?);
    if let Some(summary) = formatter.summary(Some(corrections.as_slice()), None) {
        println!("\n{}", summary);
    }

    Ok(())
}
