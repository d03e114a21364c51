//! Backend access for the dashboard.
//!
//! The [`Backend`] trait exposes one operation per backend capability. Every
//! failure, whatever its cause, surfaces as [`DeckError::RequestFailed`]
//! naming the operation; nothing is retried.
//!
//! [`DeckError::RequestFailed`]: crate::error::DeckError::RequestFailed

pub mod http;

use std::fmt;

use crate::error::Result;
use crate::types::{AnalysisResult, IssuesPage, NewTicket, Project, Ticket, TicketUpdate};

pub use http::HttpBackend;

/// Backend capabilities, used to label failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListProjects,
    ListTickets,
    GetTicket,
    CreateTicket,
    UpdateTicket,
    AnalyzeTicket,
    AnalyzeTickets,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            Operation::ListProjects => "fetch projects",
            Operation::ListTickets => "fetch issues",
            Operation::GetTicket => "fetch issue",
            Operation::CreateTicket => "create issue",
            Operation::UpdateTicket => "update issue",
            Operation::AnalyzeTicket => "analyze issue",
            Operation::AnalyzeTickets => "analyze issues",
        };
        f.write_str(action)
    }
}

/// Common interface for the dashboard backend
pub trait Backend: Send + Sync {
    fn list_projects(&self) -> impl std::future::Future<Output = Result<Vec<Project>>> + Send;

    /// Fetch one page of tickets. `next_page_token` continues a previous listing.
    fn list_tickets(
        &self,
        max_results: u32,
        next_page_token: Option<&str>,
    ) -> impl std::future::Future<Output = Result<IssuesPage>> + Send;

    fn get_ticket(&self, key: &str) -> impl std::future::Future<Output = Result<Ticket>> + Send;

    fn create_ticket(
        &self,
        ticket: &NewTicket,
    ) -> impl std::future::Future<Output = Result<Ticket>> + Send;

    fn update_ticket(
        &self,
        key: &str,
        update: &TicketUpdate,
    ) -> impl std::future::Future<Output = Result<Ticket>> + Send;

    fn analyze_ticket(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<AnalysisResult>> + Send;

    /// Run the bulk analysis. `None` lets the backend pick every ticket it knows.
    fn analyze_tickets(
        &self,
        keys: Option<&[String]>,
    ) -> impl std::future::Future<Output = Result<Vec<AnalysisResult>>> + Send;
}

#[cfg(test)]
pub(crate) mod scripted;
