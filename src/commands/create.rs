use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, OutputOptions, connect};
use crate::error::Result;
use crate::remote::Backend;
use crate::store::CreateForm;
use crate::types::IssueType;

/// Options for creating a ticket
pub struct CreateOptions {
    pub project_key: String,
    pub summary: String,
    pub description: String,
    pub issue_type: IssueType,
}

/// Create a new ticket
pub async fn cmd_create(options: CreateOptions, output: OutputOptions) -> Result<()> {
    let form = CreateForm {
        project_key: options.project_key,
        summary: options.summary,
        description: options.description,
        issue_type: options.issue_type,
    };
    let new = form.validate()?;

    let (_, backend) = connect()?;
    let ticket = backend.create_ticket(&new).await?;

    CommandOutput::new(json!({
        "action": "created",
        "issue": ticket,
    }))
    .with_text(format!("Created {} {}", ticket.key.cyan(), ticket.summary))
    .print(output)
}
