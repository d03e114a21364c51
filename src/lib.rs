pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod remote;
pub mod store;
pub mod types;

pub use config::Config;
pub use error::{DeckError, Result};
pub use remote::{Backend, HttpBackend, Operation};
pub use store::{Alert, AlertLevel, Dashboard, FilterCriteria, LoadOutcome, LoadPhase, Modal};
pub use types::{
    AnalysisResult, IssueType, IssuesPage, NewTicket, Project, Ticket, TicketUpdate,
    VALID_ISSUE_TYPES,
};
