//! Terminal rendering of views and backend records.

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::store::{Alert, AlertLevel, Modal};
use crate::types::{Project, Ticket};

use super::tone::{priority_tone, status_tone};
use super::view::{AnalysisDetail, DashboardView, Screen, TicketRow};

pub const EMPTY_STATE: &str = "No issues found. Create your first issue to get started.";

/// A row in the ticket list table
#[derive(Tabled)]
struct TicketTableRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Summary")]
    summary: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "AI")]
    ai: String,
}

/// A row in the project table
#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Render ticket rows as a table. Table cells stay uncoloured so column
/// widths line up.
pub fn format_ticket_table(rows: &[TicketRow]) -> String {
    let rows: Vec<TicketTableRow> = rows
        .iter()
        .map(|row| TicketTableRow {
            key: row.key.clone(),
            summary: row.summary.clone(),
            status: row.status.clone(),
            priority: row.priority.clone(),
            assignee: row.assignee.clone(),
            ai: match (&row.ai_priority, row.confidence_percent) {
                (Some(p), Some(c)) => format!("{p} ({c}%)"),
                (Some(p), None) => p.clone(),
                (None, Some(c)) => format!("{c}%"),
                (None, None) => "-".to_string(),
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn format_projects_table(projects: &[Project]) -> String {
    let rows: Vec<ProjectRow> = projects
        .iter()
        .map(|p| ProjectRow {
            key: p.key.clone(),
            name: p.name.clone(),
            id: p.id.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Render one dashboard row as a coloured block
pub fn format_ticket_row(row: &TicketRow) -> String {
    let mut out = format!(
        "{} {} {} {}",
        format!("{:10}", row.key).cyan(),
        row.status_tone.paint(&format!("[{}]", row.status)),
        row.priority_tone.paint(&format!("[{}]", row.priority)),
        row.summary.bold()
    );

    if let Some(ref description) = row.description {
        let preview = description.lines().next().unwrap_or_default();
        out.push_str(&format!("\n    {}", preview.dimmed()));
    }

    out.push_str(&format!("\n    {} {}", "Assignee:".dimmed(), row.assignee));

    if let Some(ref ai) = row.ai_priority {
        out.push_str(&format!(
            "  {} {}",
            "AI priority:".dimmed(),
            row.ai_priority_tone.paint(ai)
        ));
    }
    if let Some(percent) = row.confidence_percent {
        out.push_str(&format!("  {} {percent}%", "Confidence:".dimmed()));
    }

    for suggestion in &row.suggestions {
        out.push_str(&format!("\n    • {suggestion}"));
    }
    if row.more_suggestions > 0 {
        out.push_str(&format!(
            "\n    {}",
            format!("+{} more suggestions", row.more_suggestions).dimmed()
        ));
    }

    let action = if row.analyzing {
        "Analyzing...".yellow().to_string()
    } else {
        row.action_label.to_string()
    };
    out.push_str(&format!("\n    [{action}]"));
    out
}

pub fn format_alert(alert: &Alert) -> String {
    match alert.level {
        AlertLevel::Info => alert.message.blue().to_string(),
        AlertLevel::Success => alert.message.green().to_string(),
        AlertLevel::Error => alert.message.red().to_string(),
    }
}

/// Render the whole dashboard screen
pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();

    if let Some(ref alert) = view.alert {
        out.push_str(&format_alert(alert));
        out.push_str("\n\n");
    }

    match &view.screen {
        Screen::Loading => {
            out.push_str(&"Loading issues...".dimmed().to_string());
            return out;
        }
        Screen::Error { message } => {
            out.push_str(&format!("{}\n", message.red().bold()));
            out.push_str(&format!("{}", "[r] Retry".yellow()));
            return out;
        }
        Screen::List => {}
    }

    let analyze_all = if view.analyzing_all {
        "Analyzing...".yellow().to_string()
    } else {
        "[A] Analyze All".to_string()
    };
    out.push_str(&format!(
        "{}  {}  {}  {}\n\n",
        "Issues".cyan().bold(),
        format!("Total: {}", view.total).dimmed(),
        "[m] Create Issue",
        analyze_all
    ));

    if view.is_empty() {
        out.push_str(&format!("{}\n", EMPTY_STATE.dimmed()));
    } else {
        for row in &view.rows {
            out.push_str(&format_ticket_row(row));
            out.push_str("\n\n");
        }
    }

    if let Some(load_more) = view.load_more {
        if load_more.loading {
            out.push_str(&format!("{}\n", "Loading more issues...".dimmed()));
        } else {
            out.push_str(&format!("{}\n", "[n] Load More".yellow()));
        }
    }

    out.push_str(&view.footer.dimmed().to_string());
    out
}

pub fn format_analysis_detail(detail: &AnalysisDetail) -> String {
    let mut out = format!("{}\n", detail.title.bold());

    if let Some(ref priority) = detail.priority_recommendation {
        out.push_str(&format!(
            "\n{} {}",
            "Recommended priority:".cyan(),
            priority_tone(Some(priority.as_str())).paint(priority)
        ));
    }
    if let (Some(percent), Some(confidence)) = (detail.confidence_percent, detail.confidence) {
        out.push_str(&format!(
            "\n{} {}",
            "Confidence:".cyan(),
            confidence
                .tone()
                .paint(&format!("{percent}% ({})", confidence.label()))
        ));
    }

    out.push_str(&format!("\n\n{}", "Suggestions:".cyan().bold()));
    if detail.suggestions.is_empty() {
        out.push_str(&format!("\n  {}", "none".dimmed()));
    }
    for (i, suggestion) in detail.suggestions.iter().enumerate() {
        out.push_str(&format!("\n  {}. {suggestion}", i + 1));
    }

    if !detail.recommended_actions.is_empty() {
        out.push_str(&format!("\n\n{}", "Recommended actions:".cyan().bold()));
        for action in &detail.recommended_actions {
            out.push_str(&format!("\n  - {action}"));
        }
    }
    out
}

pub fn format_ticket_detail(ticket: &Ticket) -> String {
    let mut out = format!("{} {}\n", ticket.key.cyan().bold(), ticket.summary.bold());

    out.push_str(&format!(
        "\n{:10} {}",
        "Status:",
        status_tone(&ticket.status).paint(&ticket.status)
    ));
    out.push_str(&format!(
        "\n{:10} {}",
        "Priority:",
        priority_tone(ticket.priority.as_deref())
            .paint(ticket.priority.as_deref().unwrap_or("Not Set"))
    ));
    out.push_str(&format!(
        "\n{:10} {}",
        "Assignee:",
        ticket.assignee.as_deref().unwrap_or("Unassigned")
    ));
    if let Some(ref created) = ticket.created {
        out.push_str(&format!("\n{:10} {}", "Created:", format_timestamp(created)));
    }
    if let Some(ref updated) = ticket.updated {
        out.push_str(&format!("\n{:10} {}", "Updated:", format_timestamp(updated)));
    }

    if let Some(ref description) = ticket.description
        && !description.is_empty()
    {
        out.push_str(&format!("\n\n{description}"));
    }
    out
}

/// Render the open form's current values
pub fn format_modal(modal: &Modal) -> Option<String> {
    match modal {
        Modal::None => None,
        Modal::Create(form) => Some(format!(
            "{}\n  project_key: {}\n  summary: {}\n  description: {}\n  issue_type: {}",
            "Create Issue".cyan().bold(),
            form.project_key,
            form.summary,
            form.description,
            form.issue_type
        )),
        Modal::Edit(form) => Some(format!(
            "{}\n  summary: {}\n  description: {}\n  status: {}",
            format!("Edit {}", form.key).cyan().bold(),
            form.summary,
            form.description,
            form.status
        )),
    }
}

/// Render a backend timestamp in UTC, or verbatim when it can't be parsed
pub fn format_timestamp(raw: &str) -> String {
    let parsed = raw.parse::<jiff::Timestamp>().ok().or_else(|| {
        jiff::fmt::strtime::parse("%Y-%m-%dT%H:%M:%S%.f%z", raw)
            .and_then(|tm| tm.to_timestamp())
            .ok()
    });
    match parsed {
        Some(ts) => ts.strftime("%Y-%m-%d %H:%M UTC").to_string(),
        None => raw.to_string(),
    }
}
