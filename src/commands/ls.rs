use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, OutputOptions, connect};
use crate::display::{EMPTY_STATE, compute_dashboard_view, format_ticket_table};
use crate::error::{DeckError, Result};
use crate::remote::{Backend, Operation};
use crate::store::{Dashboard, FilterCriteria, LoadOutcome};

/// List tickets, optionally following every continuation token
pub async fn cmd_ls(filter: FilterCriteria, all: bool, output: OutputOptions) -> Result<()> {
    let (config, backend) = connect()?;
    let mut deck = Dashboard::new(backend, config.page_size()?);

    load_tickets(&mut deck, all).await?;
    deck.set_filter(filter);

    let view = compute_dashboard_view(&deck);
    let visible = deck.visible_tickets();

    let json_output = json!({
        "issues": visible,
        "total": deck.list().page().total,
        "next_page_token": deck.list().page().next_page_token,
    });

    let text_output = if view.is_empty() {
        format!("{}\n{}", EMPTY_STATE, view.footer.dimmed())
    } else {
        let mut text = format_ticket_table(&view.rows);
        if view.load_more.is_some() {
            text.push_str(&format!(
                "\n{}",
                "More issues available, use --all to fetch every page".dimmed()
            ));
        }
        text.push_str(&format!("\n{}", view.footer.dimmed()));
        text
    };

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}

/// Load the first page and, with `all`, every following page
pub(crate) async fn load_tickets<B: Backend>(deck: &mut Dashboard<B>, all: bool) -> Result<()> {
    if deck.load_first().await == LoadOutcome::Failed {
        return Err(DeckError::request_failed(Operation::ListTickets));
    }

    while all && deck.list().can_load_more() {
        if deck.load_next().await == LoadOutcome::Failed {
            return Err(DeckError::request_failed(Operation::ListTickets));
        }
    }
    Ok(())
}
