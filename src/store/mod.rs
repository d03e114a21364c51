//! Dashboard state store.
//!
//! [`Dashboard`] owns every piece of mutable UI state: the ticket list, the
//! analysis cache, the filter criteria, the open modal and the pending alert.
//! Views read it and call its methods; nothing else mutates it.

pub mod analysis;
pub mod filter;
pub mod forms;
pub mod list;

use tracing::debug;

use crate::error::{DeckError, Result};
use crate::remote::Backend;
use crate::types::{AnalysisResult, NewTicket, Ticket, TicketUpdate};

pub use analysis::{AnalysisCache, AnalyzingTarget};
pub use filter::{FilterCriteria, project};
pub use forms::{CreateForm, EditForm, Modal};
pub use list::{LoadOutcome, LoadPhase, PageState, TicketList};

/// Severity level for alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Success,
    Error,
}

/// A user-facing message waiting to be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub level: AlertLevel,
}

impl Alert {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: AlertLevel::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: AlertLevel::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: AlertLevel::Error,
        }
    }
}

pub struct Dashboard<B> {
    backend: B,
    list: TicketList,
    analyses: AnalysisCache,
    filters: FilterCriteria,
    modal: Modal,
    alert: Option<Alert>,
}

impl<B: Backend> Dashboard<B> {
    pub fn new(backend: B, page_size: u32) -> Self {
        Self {
            backend,
            list: TicketList::new(page_size),
            analyses: AnalysisCache::new(),
            filters: FilterCriteria::default(),
            modal: Modal::None,
            alert: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn list(&self) -> &TicketList {
        &self.list
    }

    pub fn analyses(&self) -> &AnalysisCache {
        &self.analyses
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// Mutable access to the open form's fields
    pub fn modal_mut(&mut self) -> &mut Modal {
        &mut self.modal
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Consume the pending alert
    pub fn take_alert(&mut self) -> Option<Alert> {
        self.alert.take()
    }

    /// Tickets passing the current filters, in collection order
    pub fn visible_tickets(&self) -> Vec<&Ticket> {
        project(self.list.tickets(), &self.filters)
    }

    pub fn find_ticket(&self, key: &str) -> Option<&Ticket> {
        self.list.get(key)
    }

    // Loading

    pub async fn load_first(&mut self) -> LoadOutcome {
        self.list.load_first(&self.backend).await
    }

    /// Append the next page. Asking past the last page raises an info alert.
    pub async fn load_next(&mut self) -> LoadOutcome {
        let outcome = self.list.load_next(&self.backend).await;
        if outcome == LoadOutcome::Skipped
            && self.list.page().next_page_token.is_none()
            && !self.list.is_loading()
            && self.list.error().is_none()
        {
            self.alert = Some(Alert::info("No more issues to load"));
        }
        outcome
    }

    /// Retry action of the error screen
    pub async fn retry(&mut self) -> LoadOutcome {
        self.load_first().await
    }

    // Mutations

    /// Create a ticket and reload the list. A failure raises an error alert.
    pub async fn create(&mut self, ticket: &NewTicket) -> Result<Ticket> {
        match self.list.create(&self.backend, ticket).await {
            Ok(created) => Ok(created),
            Err(e) => Err(self.raise(e)),
        }
    }

    /// Update a ticket and reload the list. A failure raises an error alert.
    pub async fn update(&mut self, key: &str, update: &TicketUpdate) -> Result<Ticket> {
        match self.list.update(&self.backend, key, update).await {
            Ok(updated) => Ok(updated),
            Err(e) => Err(self.raise(e)),
        }
    }

    pub fn open_create(&mut self) {
        self.modal = Modal::Create(CreateForm::new());
    }

    pub fn open_create_with(&mut self, form: CreateForm) {
        self.modal = Modal::Create(form);
    }

    pub fn open_edit(&mut self, key: &str) -> Result<()> {
        let ticket = self
            .list
            .get(key)
            .ok_or_else(|| DeckError::NotFound(key.to_string()))?;
        self.modal = Modal::Edit(EditForm::from_ticket(ticket));
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::None;
    }

    /// Submit the open create form. On failure the form stays open with its
    /// input and an error alert is raised.
    pub async fn submit_create(&mut self) -> Result<Ticket> {
        let Modal::Create(form) = &self.modal else {
            return Err(DeckError::InvalidInput("no create form is open".to_string()));
        };

        let new = match form.validate() {
            Ok(new) => new,
            Err(e) => return Err(self.raise(e)),
        };

        match self.list.create(&self.backend, &new).await {
            Ok(ticket) => {
                debug!(key = %ticket.key, "ticket created");
                self.modal = Modal::None;
                Ok(ticket)
            }
            Err(e) => Err(self.raise(e)),
        }
    }

    /// Submit the open edit form, with the same failure policy as create
    pub async fn submit_edit(&mut self) -> Result<Ticket> {
        let Modal::Edit(form) = &self.modal else {
            return Err(DeckError::InvalidInput("no edit form is open".to_string()));
        };

        let key = form.key.clone();
        let update = match form.to_update() {
            Ok(update) => update,
            Err(e) => return Err(self.raise(e)),
        };

        match self.list.update(&self.backend, &key, &update).await {
            Ok(ticket) => {
                debug!(key = %ticket.key, "ticket updated");
                self.modal = Modal::None;
                Ok(ticket)
            }
            Err(e) => Err(self.raise(e)),
        }
    }

    // Analysis

    /// Analyze one ticket. On failure the previous analysis is kept and an
    /// error alert is raised.
    pub async fn analyze_one(&mut self, key: &str) -> Result<AnalysisResult> {
        match self.analyses.analyze_one(&self.backend, key).await {
            Ok(analysis) => Ok(analysis),
            Err(e) => Err(self.raise(e)),
        }
    }

    /// Analyze every ticket the backend knows and replace all analyses
    pub async fn analyze_all(&mut self) -> Result<usize> {
        match self.analyses.analyze_all(&self.backend, None).await {
            Ok(received) => {
                self.alert = Some(Alert::success(format!("Analyzed {received} issues")));
                Ok(received)
            }
            Err(e) => Err(self.raise(e)),
        }
    }

    // Filters

    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        self.filters = criteria;
    }

    /// Apply one `field=value` assignment to the current filters
    pub fn apply_filter(&mut self, assignment: &str) -> Result<()> {
        let mut criteria = self.filters.clone();
        match criteria.apply(assignment) {
            Ok(()) => {
                self.filters = criteria;
                Ok(())
            }
            Err(e) => Err(self.raise(e)),
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Record `error` as the pending alert and hand it back to the caller
    fn raise(&mut self, error: DeckError) -> DeckError {
        self.alert = Some(Alert::error(error.to_string()));
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::scripted::{Call, ScriptedBackend, analysis, page, ticket, tickets};

    fn dashboard() -> Dashboard<ScriptedBackend> {
        Dashboard::new(ScriptedBackend::new(), 50)
    }

    #[tokio::test]
    async fn test_analyze_one_failure_scenario() {
        let mut deck = dashboard();
        deck.backend().push_page(page(tickets(1, 3), 3, None));
        deck.backend().fail_analysis();
        deck.load_first().await;

        assert!(deck.analyze_one("PROJ-1").await.is_err());
        assert!(deck.analyses().is_empty());
        assert_eq!(deck.analyses().analyzing(), None);

        let alert = deck.take_alert().unwrap();
        assert_eq!(alert.level, AlertLevel::Error);
        assert_eq!(alert.message, "Failed to analyze issue");
        assert!(deck.take_alert().is_none());
    }

    #[tokio::test]
    async fn test_analyze_all_raises_success_alert() {
        let mut deck = dashboard();
        deck.backend().push_bulk(vec![analysis("PROJ-1"), analysis("PROJ-2")]);

        assert_eq!(deck.analyze_all().await.unwrap(), 2);
        assert_eq!(deck.alert().unwrap().level, AlertLevel::Success);
    }

    #[tokio::test]
    async fn test_submit_create_success_closes_form_and_reloads() {
        let mut deck = dashboard();
        deck.backend().push_page(page(tickets(1, 2), 2, None));
        deck.backend().push_ticket(ticket("PROJ-3", "To Do"));
        deck.backend().push_page(page(tickets(1, 3), 3, None));
        deck.load_first().await;

        deck.open_create_with(CreateForm {
            project_key: "PROJ".to_string(),
            summary: "Crash".to_string(),
            description: "On save".to_string(),
            ..Default::default()
        });
        let created = deck.submit_create().await.unwrap();

        assert_eq!(created.key, "PROJ-3");
        assert_eq!(deck.modal(), &Modal::None);
        assert_eq!(deck.list().tickets().len(), 3);
        assert_eq!(deck.backend().fresh_list_calls(), 2);
    }

    #[tokio::test]
    async fn test_submit_create_failure_keeps_form_open() {
        let mut deck = dashboard();
        deck.backend().fail_ticket();

        let form = CreateForm {
            project_key: "PROJ".to_string(),
            summary: "Crash".to_string(),
            description: "On save".to_string(),
            ..Default::default()
        };
        deck.open_create_with(form.clone());

        assert!(deck.submit_create().await.is_err());
        assert_eq!(deck.modal(), &Modal::Create(form));
        assert_eq!(deck.take_alert().unwrap().message, "Failed to create issue");
        assert_eq!(deck.backend().fresh_list_calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_create_invalid_form_skips_backend() {
        let mut deck = dashboard();
        deck.open_create();

        assert!(matches!(
            deck.submit_create().await,
            Err(DeckError::InvalidInput(_))
        ));
        assert!(deck.modal().is_open());
        assert!(deck.backend().calls().is_empty());
        assert!(deck.alert().is_some());
    }

    #[tokio::test]
    async fn test_submit_edit_sends_form_fields() {
        let mut deck = dashboard();
        deck.backend().push_page(page(tickets(1, 1), 1, None));
        deck.backend().push_ticket(ticket("PROJ-1", "Done"));
        deck.backend().push_page(page(vec![ticket("PROJ-1", "Done")], 1, None));
        deck.load_first().await;

        deck.open_edit("PROJ-1").unwrap();
        if let Modal::Edit(form) = deck.modal_mut() {
            form.status = "Done".to_string();
        }
        deck.submit_edit().await.unwrap();

        let calls = deck.backend().calls();
        assert_eq!(
            calls[1],
            Call::UpdateTicket(
                "PROJ-1".to_string(),
                TicketUpdate {
                    summary: Some("Summary of PROJ-1".to_string()),
                    description: Some(String::new()),
                    status: Some("Done".to_string()),
                }
            )
        );
        assert_eq!(deck.list().tickets()[0].status, "Done");
        assert!(!deck.modal().is_open());
    }

    #[tokio::test]
    async fn test_open_edit_unknown_key() {
        let mut deck = dashboard();
        assert!(matches!(
            deck.open_edit("PROJ-404"),
            Err(DeckError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_visible_tickets_follow_filters() {
        let mut deck = dashboard();
        deck.backend().push_page(page(
            vec![ticket("PROJ-1", "Done"), ticket("PROJ-2", "In Progress")],
            2,
            None,
        ));
        deck.load_first().await;

        deck.set_filter(FilterCriteria::new().with_status("Done"));
        let keys: Vec<_> = deck.visible_tickets().iter().map(|t| t.key.clone()).collect();
        assert_eq!(keys, vec!["PROJ-1"]);
        assert_eq!(deck.list().tickets().len(), 2);

        deck.clear_filters();
        assert_eq!(deck.visible_tickets().len(), 2);
    }

    #[test]
    fn test_apply_filter_rejects_unknown_field() {
        let mut deck = dashboard();
        deck.apply_filter("status=Done").unwrap();
        assert!(deck.apply_filter("colour=red").is_err());
        assert_eq!(deck.filters().status, "Done");
    }

    #[tokio::test]
    async fn test_direct_create_failure_raises_alert() {
        let mut deck = dashboard();
        deck.backend().fail_ticket();

        let new = NewTicket {
            project_key: "PROJ".to_string(),
            summary: "Crash".to_string(),
            description: "On save".to_string(),
            issue_type: None,
        };
        assert!(deck.create(&new).await.is_err());

        let alert = deck.take_alert().unwrap();
        assert_eq!(alert.level, AlertLevel::Error);
        assert_eq!(alert.message, "Failed to create issue");
        assert_eq!(deck.backend().fresh_list_calls(), 0);
    }

    #[tokio::test]
    async fn test_direct_update_reloads_or_raises_alert() {
        let mut deck = dashboard();
        deck.backend().push_ticket(ticket("PROJ-1", "Done"));
        deck.backend().push_page(page(vec![ticket("PROJ-1", "Done")], 1, None));
        deck.backend().fail_ticket();

        let update = TicketUpdate {
            status: Some("Done".to_string()),
            ..Default::default()
        };
        deck.update("PROJ-1", &update).await.unwrap();
        assert!(deck.alert().is_none());
        assert_eq!(deck.list().tickets()[0].status, "Done");

        assert!(deck.update("PROJ-1", &update).await.is_err());
        assert_eq!(deck.take_alert().unwrap().message, "Failed to update issue");
        assert_eq!(deck.backend().fresh_list_calls(), 1);
    }

    #[tokio::test]
    async fn test_load_next_past_last_page_raises_info() {
        let mut deck = dashboard();
        deck.backend().push_page(page(tickets(1, 2), 2, None));
        deck.load_first().await;

        assert_eq!(deck.load_next().await, LoadOutcome::Skipped);
        let alert = deck.take_alert().unwrap();
        assert_eq!(alert.level, AlertLevel::Info);
        assert_eq!(alert.message, "No more issues to load");
        assert_eq!(deck.backend().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_load_next_in_error_state_raises_no_alert() {
        let mut deck = dashboard();
        deck.backend().fail_page();
        deck.load_first().await;

        assert_eq!(deck.load_next().await, LoadOutcome::Skipped);
        assert!(deck.alert().is_none());
    }

    #[tokio::test]
    async fn test_retry_after_failed_load() {
        let mut deck = dashboard();
        deck.backend().fail_page();
        deck.backend().push_page(page(tickets(1, 1), 1, None));

        assert_eq!(deck.load_first().await, LoadOutcome::Failed);
        assert!(deck.list().error().is_some());
        assert_eq!(deck.retry().await, LoadOutcome::Applied);
        assert!(deck.list().error().is_none());
    }
}
