//! Interactive dashboard driven by one-line commands on stdin.

use std::io::{self, Write};
use std::str::FromStr;

use owo_colors::OwoColorize;
use tracing::debug;

use super::connect;
use super::interactive::{confirm, prompt_text, read_line, select_option};
use crate::display::{
    AnalysisDetail, compute_dashboard_view, format_alert, format_analysis_detail, format_modal,
    render_dashboard,
};
use crate::error::{DeckError, Result};
use crate::remote::Backend;
use crate::store::{CreateForm, Dashboard, EditForm, Modal};
use crate::types::VALID_ISSUE_TYPES;

const HELP: &str = "\
Commands:
  m            create an issue
  e KEY        edit an issue
  a KEY        analyze an issue
  A            analyze all issues
  v KEY        view suggestions for an issue
  f FIELD=VAL  filter by status, priority or assignee
  c            clear filters
  n            load more issues
  r            reload from the first page
  h            show this help
  q            quit";

/// One line of dashboard input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardCommand {
    Create,
    Edit(String),
    Analyze(String),
    AnalyzeAll,
    ViewAnalysis(String),
    Filter(String),
    ClearFilters,
    LoadMore,
    Reload,
    Help,
    Quit,
}

impl FromStr for DashboardCommand {
    type Err = DeckError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (line, ""),
        };

        let with_arg = |make: fn(String) -> DashboardCommand, what: &str| {
            if arg.is_empty() {
                Err(DeckError::InvalidInput(format!("'{verb}' needs {what}")))
            } else {
                Ok(make(arg.to_string()))
            }
        };

        match verb {
            "m" => Ok(DashboardCommand::Create),
            "e" => with_arg(DashboardCommand::Edit, "an issue key"),
            "a" => with_arg(DashboardCommand::Analyze, "an issue key"),
            "A" => Ok(DashboardCommand::AnalyzeAll),
            "v" => with_arg(DashboardCommand::ViewAnalysis, "an issue key"),
            "f" => with_arg(DashboardCommand::Filter, "a field=value filter"),
            "c" => Ok(DashboardCommand::ClearFilters),
            "n" => Ok(DashboardCommand::LoadMore),
            "r" => Ok(DashboardCommand::Reload),
            "h" | "?" => Ok(DashboardCommand::Help),
            "q" => Ok(DashboardCommand::Quit),
            other => Err(DeckError::InvalidInput(format!(
                "unknown command '{other}', type h for help"
            ))),
        }
    }
}

/// Run the interactive dashboard until `q` or end of input
pub async fn cmd_dashboard() -> Result<()> {
    let (config, backend) = connect()?;
    let mut deck = Dashboard::new(backend, config.page_size()?);
    deck.load_first().await;

    loop {
        println!("{}", render_dashboard(&compute_dashboard_view(&deck)));
        // The alert was shown once; don't repeat it on the next screen
        deck.take_alert();

        print!("\n{} ", "ticketdeck>".cyan());
        io::stdout().flush()?;

        let Some(line) = read_line()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<DashboardCommand>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e.to_string().red());
                continue;
            }
        };

        match command {
            DashboardCommand::Create => create_interactively(&mut deck).await?,
            DashboardCommand::Edit(key) => edit_interactively(&mut deck, &key).await?,
            command => {
                if !run_command(&mut deck, command).await {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply a non-interactive command. Returns `false` when the user quits.
pub(crate) async fn run_command<B: Backend>(
    deck: &mut Dashboard<B>,
    command: DashboardCommand,
) -> bool {
    match command {
        DashboardCommand::Quit => return false,
        DashboardCommand::Help => println!("{HELP}"),
        DashboardCommand::Analyze(key) => {
            if let Err(e) = deck.analyze_one(&key).await {
                debug!(%key, error = %e, "analysis not stored");
            }
        }
        DashboardCommand::AnalyzeAll => {
            if let Err(e) = deck.analyze_all().await {
                debug!(error = %e, "bulk analysis not stored");
            }
        }
        DashboardCommand::ViewAnalysis(key) => match deck.analyses().get(&key) {
            Some(analysis) => {
                println!("{}\n", format_analysis_detail(&AnalysisDetail::new(analysis)))
            }
            None => println!("{}", format!("No analysis for {key} yet, run: a {key}").yellow()),
        },
        DashboardCommand::Filter(assignment) => {
            // A rejected assignment is reported through the alert
            let _ = deck.apply_filter(&assignment);
        }
        DashboardCommand::ClearFilters => deck.clear_filters(),
        DashboardCommand::LoadMore => {
            deck.load_next().await;
        }
        DashboardCommand::Reload => {
            deck.retry().await;
        }
        DashboardCommand::Create | DashboardCommand::Edit(_) => {}
    }
    true
}

async fn create_interactively<B: Backend>(deck: &mut Dashboard<B>) -> Result<()> {
    deck.open_create();
    loop {
        let Modal::Create(form) = deck.modal_mut() else {
            return Ok(());
        };
        fill_create_form(form)?;
        if let Some(preview) = format_modal(deck.modal()) {
            println!("{preview}");
        }

        match deck.submit_create().await {
            Ok(ticket) => {
                println!("Created {}", ticket.key.cyan());
                return Ok(());
            }
            Err(_) => {
                if let Some(alert) = deck.take_alert() {
                    println!("{}", format_alert(&alert));
                }
                if !confirm("Try again")? {
                    deck.close_modal();
                    return Ok(());
                }
            }
        }
    }
}

async fn edit_interactively<B: Backend>(deck: &mut Dashboard<B>, key: &str) -> Result<()> {
    if let Err(e) = deck.open_edit(key) {
        println!("{}", e.to_string().red());
        return Ok(());
    }
    loop {
        let Modal::Edit(form) = deck.modal_mut() else {
            return Ok(());
        };
        fill_edit_form(form)?;

        match deck.submit_edit().await {
            Ok(ticket) => {
                println!("Updated {}", ticket.key.cyan());
                return Ok(());
            }
            Err(_) => {
                if let Some(alert) = deck.take_alert() {
                    println!("{}", format_alert(&alert));
                }
                if !confirm("Try again")? {
                    deck.close_modal();
                    return Ok(());
                }
            }
        }
    }
}

/// Prompt for each create field, offering the current value as default
fn fill_create_form(form: &mut CreateForm) -> Result<()> {
    form.project_key = prompt_text("Project key", Some(form.project_key.as_str()))?;
    form.summary = prompt_text("Summary", Some(form.summary.as_str()))?;
    form.description = prompt_text("Description", Some(form.description.as_str()))?;

    let current = form.issue_type.to_string();
    let default = VALID_ISSUE_TYPES.iter().position(|t| *t == current);
    let choice = select_option("Issue type", VALID_ISSUE_TYPES, default)?;
    form.issue_type = VALID_ISSUE_TYPES[choice].parse()?;
    Ok(())
}

fn fill_edit_form(form: &mut EditForm) -> Result<()> {
    form.summary = prompt_text("Summary", Some(form.summary.as_str()))?;
    form.description = prompt_text("Description", Some(form.description.as_str()))?;
    form.status = prompt_text("Status", Some(form.status.as_str()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::scripted::{Call, ScriptedBackend, analysis, page, ticket, tickets};
    use crate::store::AlertLevel;

    fn parse(line: &str) -> Result<DashboardCommand> {
        line.parse()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("m").unwrap(), DashboardCommand::Create);
        assert_eq!(parse("A").unwrap(), DashboardCommand::AnalyzeAll);
        assert_eq!(
            parse("a PROJ-1").unwrap(),
            DashboardCommand::Analyze("PROJ-1".to_string())
        );
        assert_eq!(
            parse("  f status=In Progress ").unwrap(),
            DashboardCommand::Filter("status=In Progress".to_string())
        );
        assert_eq!(parse("q").unwrap(), DashboardCommand::Quit);
    }

    #[test]
    fn test_parse_rejects_missing_argument() {
        let err = parse("a").unwrap_err();
        assert_eq!(err.to_string(), "invalid input: 'a' needs an issue key");
    }

    #[test]
    fn test_parse_rejects_unknown_command() {
        assert!(matches!(parse("x"), Err(DeckError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_quit_stops_the_loop() {
        let mut deck = Dashboard::new(ScriptedBackend::new(), 50);
        assert!(!run_command(&mut deck, DashboardCommand::Quit).await);
        assert!(run_command(&mut deck, DashboardCommand::Help).await);
    }

    #[tokio::test]
    async fn test_analyze_and_filter_commands() {
        let mut deck = Dashboard::new(ScriptedBackend::new(), 50);
        deck.backend().push_page(page(
            vec![ticket("PROJ-1", "Done"), ticket("PROJ-2", "Open")],
            2,
            None,
        ));
        deck.backend().push_analysis(analysis("PROJ-1"));
        deck.load_first().await;

        run_command(&mut deck, DashboardCommand::Analyze("PROJ-1".to_string())).await;
        assert!(deck.analyses().contains("PROJ-1"));

        run_command(&mut deck, DashboardCommand::Filter("status=done".to_string())).await;
        assert_eq!(deck.visible_tickets().len(), 1);

        run_command(&mut deck, DashboardCommand::ClearFilters).await;
        assert_eq!(deck.visible_tickets().len(), 2);
    }

    #[tokio::test]
    async fn test_bad_filter_raises_alert() {
        let mut deck = Dashboard::new(ScriptedBackend::new(), 50);
        run_command(&mut deck, DashboardCommand::Filter("colour=red".to_string())).await;

        let alert = deck.alert().unwrap();
        assert_eq!(alert.level, AlertLevel::Error);
        assert!(!deck.filters().is_active());
    }

    #[tokio::test]
    async fn test_load_more_and_reload() {
        let mut deck = Dashboard::new(ScriptedBackend::new(), 50);
        deck.backend().push_page(page(tickets(1, 50), 60, Some("abc")));
        deck.backend().push_page(page(tickets(51, 10), 60, None));
        deck.backend().push_page(page(tickets(1, 50), 60, Some("abc")));
        deck.load_first().await;

        run_command(&mut deck, DashboardCommand::LoadMore).await;
        assert_eq!(deck.list().tickets().len(), 60);

        run_command(&mut deck, DashboardCommand::Reload).await;
        assert_eq!(deck.list().tickets().len(), 50);
        assert_eq!(deck.backend().fresh_list_calls(), 2);
        assert_eq!(
            deck.backend().calls()[1],
            Call::ListTickets {
                max_results: 50,
                token: Some("abc".to_string())
            }
        );
    }
}
