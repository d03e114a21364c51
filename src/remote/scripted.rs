//! In-memory backend with canned responses for unit tests.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::error::{DeckError, Result};
use crate::types::{AnalysisResult, IssuesPage, NewTicket, Project, Ticket, TicketUpdate};

use super::{Backend, Operation};

/// A recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListProjects,
    ListTickets {
        max_results: u32,
        token: Option<String>,
    },
    GetTicket(String),
    CreateTicket(NewTicket),
    UpdateTicket(String, TicketUpdate),
    AnalyzeTicket(String),
    AnalyzeTickets(Option<Vec<String>>),
}

/// Responses are consumed in FIFO order per capability; `None` (or an empty
/// queue) answers with `RequestFailed`.
#[derive(Default)]
pub struct ScriptedBackend {
    projects: Mutex<VecDeque<Option<Vec<Project>>>>,
    pages: Mutex<VecDeque<Option<IssuesPage>>>,
    tickets: Mutex<VecDeque<Option<Ticket>>>,
    analyses: Mutex<VecDeque<Option<AnalysisResult>>>,
    bulk: Mutex<VecDeque<Option<Vec<AnalysisResult>>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_projects(&self, projects: Vec<Project>) {
        self.projects.lock().push_back(Some(projects));
    }

    pub fn push_page(&self, page: IssuesPage) {
        self.pages.lock().push_back(Some(page));
    }

    pub fn fail_page(&self) {
        self.pages.lock().push_back(None);
    }

    pub fn push_ticket(&self, ticket: Ticket) {
        self.tickets.lock().push_back(Some(ticket));
    }

    pub fn fail_ticket(&self) {
        self.tickets.lock().push_back(None);
    }

    pub fn push_analysis(&self, analysis: AnalysisResult) {
        self.analyses.lock().push_back(Some(analysis));
    }

    pub fn fail_analysis(&self) {
        self.analyses.lock().push_back(None);
    }

    pub fn push_bulk(&self, analyses: Vec<AnalysisResult>) {
        self.bulk.lock().push_back(Some(analyses));
    }

    pub fn fail_bulk(&self) {
        self.bulk.lock().push_back(None);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Number of `list_tickets` calls made without a continuation token
    pub fn fresh_list_calls(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, Call::ListTickets { token: None, .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

fn answer<T>(queue: &Mutex<VecDeque<Option<T>>>, operation: Operation) -> Result<T> {
    queue
        .lock()
        .pop_front()
        .flatten()
        .ok_or_else(|| DeckError::request_failed(operation))
}

impl Backend for ScriptedBackend {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.record(Call::ListProjects);
        answer(&self.projects, Operation::ListProjects)
    }

    async fn list_tickets(
        &self,
        max_results: u32,
        next_page_token: Option<&str>,
    ) -> Result<IssuesPage> {
        self.record(Call::ListTickets {
            max_results,
            token: next_page_token.map(str::to_string),
        });
        answer(&self.pages, Operation::ListTickets)
    }

    async fn get_ticket(&self, key: &str) -> Result<Ticket> {
        self.record(Call::GetTicket(key.to_string()));
        answer(&self.tickets, Operation::GetTicket)
    }

    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket> {
        self.record(Call::CreateTicket(ticket.clone()));
        answer(&self.tickets, Operation::CreateTicket)
    }

    async fn update_ticket(&self, key: &str, update: &TicketUpdate) -> Result<Ticket> {
        self.record(Call::UpdateTicket(key.to_string(), update.clone()));
        answer(&self.tickets, Operation::UpdateTicket)
    }

    async fn analyze_ticket(&self, key: &str) -> Result<AnalysisResult> {
        self.record(Call::AnalyzeTicket(key.to_string()));
        answer(&self.analyses, Operation::AnalyzeTicket)
    }

    async fn analyze_tickets(&self, keys: Option<&[String]>) -> Result<Vec<AnalysisResult>> {
        self.record(Call::AnalyzeTickets(keys.map(<[String]>::to_vec)));
        answer(&self.bulk, Operation::AnalyzeTickets)
    }
}

// Fixture builders

pub fn ticket(key: &str, status: &str) -> Ticket {
    Ticket {
        key: key.to_string(),
        summary: format!("Summary of {key}"),
        description: None,
        status: status.to_string(),
        assignee: None,
        priority: None,
        created: None,
        updated: None,
    }
}

/// `count` tickets keyed `PROJ-{start}`..
pub fn tickets(start: usize, count: usize) -> Vec<Ticket> {
    (start..start + count)
        .map(|n| ticket(&format!("PROJ-{n}"), "To Do"))
        .collect()
}

pub fn page(issues: Vec<Ticket>, total: u64, token: Option<&str>) -> IssuesPage {
    IssuesPage {
        issues,
        total,
        next_page_token: token.map(str::to_string),
    }
}

pub fn analysis(key: &str) -> AnalysisResult {
    AnalysisResult {
        issue_key: key.to_string(),
        summary: format!("Summary of {key}"),
        suggestions: vec![
            "Add reproduction steps".to_string(),
            "Link the failing build".to_string(),
        ],
        priority_recommendation: Some("High".to_string()),
        confidence_score: Some(0.82),
    }
}
