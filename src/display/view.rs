//! View models computed from the dashboard store.
//!
//! Everything here is a pure function of a [`Dashboard`], so rendering can
//! be tested without a terminal.

use crate::remote::Backend;
use crate::store::{Alert, Dashboard, LoadPhase};
use crate::types::{AnalysisResult, Ticket};

use super::tone::{Confidence, Tone, confidence_percent, priority_tone, status_tone};

/// Suggestions shown inline before collapsing into "+N more"
pub const INLINE_SUGGESTIONS: usize = 2;
/// Suggestions promoted to "recommended actions"
pub const RECOMMENDED_ACTIONS: usize = 3;
/// Longest recommended action shown before truncation
pub const ACTION_PREVIEW_CHARS: usize = 80;

/// Which full-screen state to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Error { message: String },
    List,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub screen: Screen,
    pub total: u64,
    pub analyzing_all: bool,
    pub rows: Vec<TicketRow>,
    /// `Some` when another page can be requested
    pub load_more: Option<LoadMoreView>,
    pub footer: String,
    pub alert: Option<Alert>,
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMoreView {
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketRow {
    pub key: String,
    pub summary: String,
    pub description: Option<String>,
    pub status: String,
    pub status_tone: Tone,
    pub priority: String,
    pub priority_tone: Tone,
    pub assignee: String,
    pub ai_priority: Option<String>,
    pub ai_priority_tone: Tone,
    pub suggestions: Vec<String>,
    pub more_suggestions: usize,
    pub confidence_percent: Option<u32>,
    pub action_label: &'static str,
    pub analyzing: bool,
}

impl TicketRow {
    pub fn new(ticket: &Ticket, analysis: Option<&AnalysisResult>, analyzing: bool) -> Self {
        let ai_priority = analysis.and_then(|a| a.priority_recommendation.clone());
        let suggestions: Vec<String> = analysis
            .map(|a| {
                a.suggestions
                    .iter()
                    .take(INLINE_SUGGESTIONS)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        let more_suggestions = analysis
            .map(|a| a.suggestions.len().saturating_sub(INLINE_SUGGESTIONS))
            .unwrap_or(0);

        Self {
            key: ticket.key.clone(),
            summary: ticket.summary.clone(),
            description: ticket.description.clone().filter(|d| !d.is_empty()),
            status: ticket.status.clone(),
            status_tone: status_tone(&ticket.status),
            priority: ticket
                .priority
                .clone()
                .unwrap_or_else(|| "Not Set".to_string()),
            priority_tone: priority_tone(ticket.priority.as_deref()),
            assignee: ticket
                .assignee
                .clone()
                .unwrap_or_else(|| "Unassigned".to_string()),
            ai_priority_tone: priority_tone(ai_priority.as_deref()),
            ai_priority,
            suggestions,
            more_suggestions,
            confidence_percent: analysis
                .and_then(|a| a.confidence_score)
                .map(confidence_percent),
            action_label: if analysis.is_some() {
                "Re-analyze"
            } else {
                "Analyze"
            },
            analyzing,
        }
    }
}

pub fn compute_dashboard_view<B: Backend>(deck: &Dashboard<B>) -> DashboardView {
    let list = deck.list();
    let analyses = deck.analyses();

    let screen = match list.phase() {
        LoadPhase::LoadingFirstPage => Screen::Loading,
        LoadPhase::Error(message) => Screen::Error {
            message: message.clone(),
        },
        LoadPhase::Idle | LoadPhase::LoadingNextPage => Screen::List,
    };

    let rows: Vec<TicketRow> = deck
        .visible_tickets()
        .into_iter()
        .map(|t| TicketRow::new(t, analyses.get(&t.key), analyses.is_analyzing(&t.key)))
        .collect();

    let load_more = list.page().next_page_token.as_ref().map(|_| LoadMoreView {
        loading: matches!(list.phase(), LoadPhase::LoadingNextPage),
    });

    let footer = format_footer(
        rows.len(),
        list.tickets().len(),
        deck.filters().is_active(),
        list.page().total,
    );

    DashboardView {
        screen,
        total: list.page().total,
        analyzing_all: analyses.is_analyzing_all(),
        rows,
        load_more,
        footer,
        alert: deck.alert().cloned(),
    }
}

pub fn format_footer(shown: usize, held: usize, filtered: bool, total: u64) -> String {
    format!(
        "Showing {} of {} issues{} • Total: {}",
        shown,
        held,
        if filtered { " (filtered)" } else { "" },
        total
    )
}

/// Full analysis view for the suggestions modal
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisDetail {
    pub title: String,
    pub priority_recommendation: Option<String>,
    pub confidence_percent: Option<u32>,
    pub confidence: Option<Confidence>,
    pub suggestions: Vec<String>,
    pub recommended_actions: Vec<String>,
}

impl AnalysisDetail {
    pub fn new(analysis: &AnalysisResult) -> Self {
        Self {
            title: format!("{}: {}", analysis.issue_key, analysis.summary),
            priority_recommendation: analysis.priority_recommendation.clone(),
            confidence_percent: analysis.confidence_score.map(confidence_percent),
            confidence: analysis.confidence_score.map(Confidence::from_score),
            suggestions: analysis.suggestions.clone(),
            recommended_actions: analysis
                .suggestions
                .iter()
                .take(RECOMMENDED_ACTIONS)
                .map(|s| truncate_chars(s, ACTION_PREVIEW_CHARS))
                .collect(),
        }
    }
}

/// Cut `text` to `max` characters, marking the cut with `...`
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max).collect();
    cut.push_str("...");
    cut
}
