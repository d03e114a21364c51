use serde_json::json;

use super::{CommandOutput, OutputOptions, connect};
use crate::display::format_ticket_detail;
use crate::error::Result;
use crate::remote::Backend;

/// Display a single ticket
pub async fn cmd_show(key: &str, output: OutputOptions) -> Result<()> {
    let (_, backend) = connect()?;
    let ticket = backend.get_ticket(key).await?;

    CommandOutput::new(json!(ticket))
        .with_text(format_ticket_detail(&ticket))
        .print(output)
}
