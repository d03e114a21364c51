use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, OutputOptions, connect};
use crate::display::{AnalysisDetail, format_analysis_detail};
use crate::error::Result;
use crate::remote::Backend;

/// Analyze one ticket and print the suggestions
pub async fn cmd_analyze(key: &str, output: OutputOptions) -> Result<()> {
    let (_, backend) = connect()?;
    let analysis = backend.analyze_ticket(key).await?;

    CommandOutput::new(json!(analysis))
        .with_text(format_analysis_detail(&AnalysisDetail::new(&analysis)))
        .print(output)
}

/// Ask the backend to analyze every ticket it knows
pub async fn cmd_analyze_all(output: OutputOptions) -> Result<()> {
    let (_, backend) = connect()?;
    let analyses = backend.analyze_tickets(None).await?;

    let mut text = format!("{}", format!("Analyzed {} issues", analyses.len()).green());
    for analysis in &analyses {
        let priority = analysis
            .priority_recommendation
            .as_deref()
            .unwrap_or("-");
        text.push_str(&format!(
            "\n  {} {} ({} suggestions)",
            analysis.issue_key.cyan(),
            priority,
            analysis.suggestions.len()
        ));
    }

    CommandOutput::new(json!(analyses))
        .with_text(text)
        .print(output)
}
