//! Filter projection over the loaded ticket collection.
//!
//! Every criterion is a case-insensitive substring match; criteria are ANDed
//! and an empty criterion does not filter.

use std::str::FromStr;

use crate::error::DeckError;
use crate::types::Ticket;

/// User-supplied filter criteria.
///
/// Each criterion is trimmed before matching, so a whitespace-only criterion
/// counts as empty and does not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub status: String,
    pub priority: String,
    pub assignee: String,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = assignee.into();
        self
    }

    /// Whether any criterion narrows the list
    pub fn is_active(&self) -> bool {
        [&self.status, &self.priority, &self.assignee]
            .iter()
            .any(|c| !c.trim().is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Apply a single `field=value` assignment. An empty value clears the field.
    pub fn apply(&mut self, assignment: &str) -> Result<(), DeckError> {
        let (field, value) = assignment.split_once('=').ok_or_else(|| {
            DeckError::InvalidInput(format!(
                "filter '{assignment}' must look like field=value"
            ))
        })?;

        let value = value.trim().to_string();
        match field.trim().to_lowercase().as_str() {
            "status" => self.status = value,
            "priority" => self.priority = value,
            "assignee" => self.assignee = value,
            other => {
                return Err(DeckError::InvalidInput(format!(
                    "unknown filter field '{other}', expected status, priority or assignee"
                )));
            }
        }
        Ok(())
    }

    /// Whether `ticket` satisfies every non-empty criterion
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if let Some(needle) = needle(&self.status)
            && !contains_ignore_case(&ticket.status, &needle)
        {
            return false;
        }

        // A ticket without a priority is never excluded by the priority filter
        if let Some(needle) = needle(&self.priority)
            && let Some(priority) = &ticket.priority
            && !contains_ignore_case(priority, &needle)
        {
            return false;
        }

        if let Some(needle) = needle(&self.assignee) {
            match &ticket.assignee {
                Some(assignee) if contains_ignore_case(assignee, &needle) => {}
                _ => return false,
            }
        }

        true
    }
}

impl FromStr for FilterCriteria {
    type Err = DeckError;

    /// Parse comma-separated `field=value` pairs
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut criteria = FilterCriteria::default();
        for assignment in s.split(',').map(str::trim).filter(|a| !a.is_empty()) {
            criteria.apply(assignment)?;
        }
        Ok(criteria)
    }
}

fn needle(criterion: &str) -> Option<String> {
    let trimmed = criterion.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

/// Project `tickets` through `criteria`, preserving input order
pub fn project<'a>(tickets: &'a [Ticket], criteria: &FilterCriteria) -> Vec<&'a Ticket> {
    if !criteria.is_active() {
        return tickets.iter().collect();
    }
    tickets.iter().filter(|t| criteria.matches(t)).collect()
}
