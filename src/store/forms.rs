//! Create and edit form state.

use crate::error::{DeckError, Result};
use crate::types::{IssueType, NewTicket, Ticket, TicketUpdate};

/// Fields of the "create issue" form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateForm {
    pub project_key: String,
    pub summary: String,
    pub description: String,
    pub issue_type: IssueType,
}

impl CreateForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check required fields and build the request body
    pub fn validate(&self) -> Result<NewTicket> {
        require("project key", &self.project_key)?;
        require("summary", &self.summary)?;
        require("description", &self.description)?;

        Ok(NewTicket {
            project_key: self.project_key.trim().to_string(),
            summary: self.summary.trim().to_string(),
            description: self.description.clone(),
            issue_type: Some(self.issue_type),
        })
    }
}

/// Fields of the "edit issue" form, seeded from the ticket being edited
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub key: String,
    pub summary: String,
    pub description: String,
    pub status: String,
}

impl EditForm {
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            key: ticket.key.clone(),
            summary: ticket.summary.clone(),
            description: ticket.description.clone().unwrap_or_default(),
            status: ticket.status.clone(),
        }
    }

    /// Build the update body. All three editable fields are always sent.
    pub fn to_update(&self) -> Result<TicketUpdate> {
        require("summary", &self.summary)?;

        Ok(TicketUpdate {
            summary: Some(self.summary.trim().to_string()),
            description: Some(self.description.clone()),
            status: Some(self.status.trim().to_string()),
        })
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DeckError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}

/// The modal currently open over the ticket list
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Modal {
    #[default]
    None,
    Create(CreateForm),
    Edit(EditForm),
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::None)
    }
}
