//! Wire records exchanged with the dashboard backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeckError;

/// A ticket as reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Issue key, e.g. `PROJ-12`
    pub key: String,
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Workflow state label, free text
    pub status: String,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

/// AI analysis attached to a single ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub issue_key: String,
    pub summary: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub priority_recommendation: Option<String>,
    /// Confidence in [0, 1]
    #[serde(default)]
    pub confidence_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub key: String,
    pub name: String,
    pub id: String,
}

/// One page of the ticket listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuesPage {
    pub issues: Vec<Ticket>,
    pub total: u64,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Issue types offered by the create form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IssueType {
    #[default]
    Task,
    Bug,
    Story,
    Epic,
}

pub const VALID_ISSUE_TYPES: &[&str] = &["Task", "Bug", "Story", "Epic"];

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueType::Task => "Task",
            IssueType::Bug => "Bug",
            IssueType::Story => "Story",
            IssueType::Epic => "Epic",
        };
        f.write_str(name)
    }
}

impl FromStr for IssueType {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "task" => Ok(IssueType::Task),
            "bug" => Ok(IssueType::Bug),
            "story" => Ok(IssueType::Story),
            "epic" => Ok(IssueType::Epic),
            _ => Err(DeckError::InvalidInput(format!(
                "unknown issue type '{}', expected one of: {}",
                s,
                VALID_ISSUE_TYPES.join(", ")
            ))),
        }
    }
}

/// Body of `POST /api/issues`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTicket {
    pub project_key: String,
    pub summary: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IssueType>,
}

/// Body of `PUT /api/issues/{key}`; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl TicketUpdate {
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// Body of `POST /api/analyze`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub issue_keys: Option<Vec<String>>,
}
