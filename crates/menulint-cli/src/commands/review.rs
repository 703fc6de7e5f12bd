//! Review command implementation.

use crate::cli::ReviewArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use menulint_analyzer::Analyzer;
use menulint_extract::{extract_file, DocumentKind};
use menulint_llm::Transport;
use tracing::error;

/// Execute the review command.
///
/// Prints whatever succeeded, then fails if any analysis did.
pub async fn execute_review<T: Transport>(
    args: ReviewArgs,
    analyzer: &Analyzer<T>,
    formatter: &Formatter,
) -> Result<()> {
    let menu = extract_file(&args.menu, DocumentKind::MENU).await?;
    let reference = match &args.reference {
        Some(path) => Some(extract_file(path, DocumentKind::REFERENCE).await?),
        None => None,
    };

    let report = analyzer
        .review(&menu.text, reference.as_ref().map(|r| r.text.as_str()))
        .await;

    println!("{}", formatter.format_review(&report)?);

    let failed = report
        .failures()
        .inspect(|(label, e)| error!("{} analysis failed: {}", label, e))
        .count();
    if failed > 0 {
        return Err(CliError::ReviewFailed(failed));
    }

    Ok(())
}
