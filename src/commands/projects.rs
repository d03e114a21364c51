use serde_json::json;

use super::{CommandOutput, OutputOptions, connect};
use crate::display::format_projects_table;
use crate::error::Result;
use crate::remote::Backend;

/// List the projects known to the backend
pub async fn cmd_projects(output: OutputOptions) -> Result<()> {
    let (_, backend) = connect()?;
    let projects = backend.list_projects().await?;

    let text = if projects.is_empty() {
        "No projects found.".to_string()
    } else {
        format!(
            "{}\n\n{} project(s)",
            format_projects_table(&projects),
            projects.len()
        )
    };

    CommandOutput::new(json!(projects))
        .with_text(text)
        .print(output)
}
