use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, OutputOptions, connect};
use crate::error::{DeckError, Result};
use crate::remote::Backend;
use crate::types::TicketUpdate;

/// Fields to change; unset fields are left alone
#[derive(Debug, Default)]
pub struct UpdateOptions {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Update an existing ticket
pub async fn cmd_update(key: &str, options: UpdateOptions, output: OutputOptions) -> Result<()> {
    let update = build_update(options)?;

    let (_, backend) = connect()?;
    let ticket = backend.update_ticket(key, &update).await?;

    CommandOutput::new(json!({
        "action": "updated",
        "issue": ticket,
    }))
    .with_text(format!("Updated {} {}", ticket.key.cyan(), ticket.summary))
    .print(output)
}

fn build_update(options: UpdateOptions) -> Result<TicketUpdate> {
    if options.summary.as_deref().is_some_and(|s| s.trim().is_empty()) {
        return Err(DeckError::InvalidInput("summary is required".to_string()));
    }

    let update = TicketUpdate {
        summary: options.summary.map(|s| s.trim().to_string()),
        description: options.description,
        status: options.status.map(|s| s.trim().to_string()),
    };
    if update.is_empty() {
        return Err(DeckError::InvalidInput(
            "nothing to update, pass --summary, --description or --status".to_string(),
        ));
    }
    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_update_requires_a_field() {
        let err = build_update(UpdateOptions::default()).unwrap_err();
        assert!(matches!(err, DeckError::InvalidInput(_)));
    }

    #[test]
    fn test_build_update_rejects_blank_summary() {
        let err = build_update(UpdateOptions {
            summary: Some("  ".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid input: summary is required");
    }

    #[test]
    fn test_build_update_keeps_only_given_fields() {
        let update = build_update(UpdateOptions {
            status: Some(" Done ".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(update.status.as_deref(), Some("Done"));
        assert_eq!(update.summary, None);
        assert_eq!(update.description, None);
    }
}
