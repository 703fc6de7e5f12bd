//! Compare command implementation.

use crate::cli::CompareArgs;
use crate::error::Result;
use crate::output::Formatter;
use menulint_analyzer::Analyzer;
use menulint_extract::{extract_file, DocumentKind};
use menulint_llm::Transport;

/// Execute the compare command.
pub async fn execute_compare<T: Transport>(
    args: CompareArgs,
    analyzer: &Analyzer<T>,
    formatter: &Formatter,
) -> Result<()> {
    let (menu, reference) = tokio::try_join!(
        extract_file(&args.menu, DocumentKind::MENU),
        extract_file(&args.reference, DocumentKind::REFERENCE)
    )?;

    let results = analyzer.compare_menus(&menu.text, &reference.text).await?;

    println!("{}", formatter.format_comparison(&results)?);
    if let Some(summary) = formatter.summary(None, Some(results.as_slice())) {
        println!("\n{}", summary);
    }

    Ok(())
}
