//! The authoritative ticket collection and its pagination state.
//!
//! Loads are split into a pure `begin_*` / [`TicketList::finish`] pair so the
//! transitions can be driven without a backend. Every load carries a
//! generation number; a response for anything but the latest issued load is
//! discarded.

use tracing::{debug, warn};

use crate::error::Result;
use crate::remote::Backend;
use crate::types::{IssuesPage, NewTicket, Ticket, TicketUpdate};

/// Pagination bookkeeping as last reported by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub total: u64,
    /// `Some` only while more pages remain
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    LoadingFirstPage,
    LoadingNextPage,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    FirstPage,
    NextPage,
}

/// A load that has been issued and is waiting for its response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub kind: LoadKind,
    pub generation: u64,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was merged into the collection
    Applied,
    /// The backend call failed; the collection is untouched
    Failed,
    /// A newer load was issued meanwhile; the response was dropped
    Stale,
    /// Nothing to do (no further page, or a load already running)
    Skipped,
}

#[derive(Debug, Clone)]
pub struct TicketList {
    tickets: Vec<Ticket>,
    page: PageState,
    phase: LoadPhase,
    page_size: u32,
    generation: u64,
}

impl TicketList {
    pub fn new(page_size: u32) -> Self {
        Self {
            tickets: Vec::new(),
            page: PageState::default(),
            phase: LoadPhase::Idle,
            page_size,
            generation: 0,
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn get(&self, key: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.key == key)
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            LoadPhase::LoadingFirstPage | LoadPhase::LoadingNextPage
        )
    }

    /// Error message of the last failed load, if the list is in the error state
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Whether the "load more" control should be offered and enabled
    pub fn can_load_more(&self) -> bool {
        self.page.next_page_token.is_some() && !self.is_loading()
    }

    /// Issue a first-page load. Any load still in flight becomes stale.
    pub fn begin_first(&mut self) -> LoadRequest {
        self.generation += 1;
        self.phase = LoadPhase::LoadingFirstPage;
        LoadRequest {
            kind: LoadKind::FirstPage,
            generation: self.generation,
            token: None,
        }
    }

    /// Issue a next-page load, unless there is no next page or a load is running
    pub fn begin_next(&mut self) -> Option<LoadRequest> {
        if self.is_loading() || matches!(self.phase, LoadPhase::Error(_)) {
            return None;
        }
        let token = self.page.next_page_token.clone()?;

        self.generation += 1;
        self.phase = LoadPhase::LoadingNextPage;
        Some(LoadRequest {
            kind: LoadKind::NextPage,
            generation: self.generation,
            token: Some(token),
        })
    }

    /// Apply the response to `request`
    pub fn finish(&mut self, request: &LoadRequest, result: Result<IssuesPage>) -> LoadOutcome {
        if request.generation != self.generation {
            warn!(
                generation = request.generation,
                current = self.generation,
                "discarding response for superseded ticket load"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(page) => {
                let received = page.issues.len();
                match request.kind {
                    LoadKind::FirstPage => self.tickets = page.issues,
                    LoadKind::NextPage => self.tickets.extend(page.issues),
                }
                self.page = PageState {
                    total: page.total,
                    next_page_token: page.next_page_token.filter(|t| !t.is_empty()),
                };
                self.phase = LoadPhase::Idle;
                debug!(
                    received,
                    held = self.tickets.len(),
                    total = self.page.total,
                    "ticket page applied"
                );
                LoadOutcome::Applied
            }
            Err(e) => {
                warn!(error = %e, "ticket load failed");
                self.phase = LoadPhase::Error(e.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Replace the collection with a fresh first page
    pub async fn load_first<B: Backend>(&mut self, backend: &B) -> LoadOutcome {
        let request = self.begin_first();
        let result = backend.list_tickets(self.page_size, None).await;
        self.finish(&request, result)
    }

    /// Append the next page, if there is one
    pub async fn load_next<B: Backend>(&mut self, backend: &B) -> LoadOutcome {
        let Some(request) = self.begin_next() else {
            return LoadOutcome::Skipped;
        };
        let result = backend
            .list_tickets(self.page_size, request.token.as_deref())
            .await;
        self.finish(&request, result)
    }

    /// Create a ticket, then reload from the first page
    pub async fn create<B: Backend>(&mut self, backend: &B, ticket: &NewTicket) -> Result<Ticket> {
        let created = backend.create_ticket(ticket).await?;
        self.load_first(backend).await;
        Ok(created)
    }

    /// Update a ticket, then reload from the first page
    pub async fn update<B: Backend>(
        &mut self,
        backend: &B,
        key: &str,
        update: &TicketUpdate,
    ) -> Result<Ticket> {
        let updated = backend.update_ticket(key, update).await?;
        self.load_first(backend).await;
        Ok(updated)
    }
}
