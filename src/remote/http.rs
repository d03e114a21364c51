//! JSON-over-HTTP implementation of [`Backend`].

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::{DeckError, Result};
use crate::types::{
    AnalysisResult, AnalyzeRequest, IssuesPage, NewTicket, Project, Ticket, TicketUpdate,
};

use super::{Backend, Operation};

/// Backend reached over plain HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a backend rooted at `base_url`.
    ///
    /// No timeout is configured; a request runs until the server answers or
    /// the connection fails.
    pub fn new(base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(DeckError::Config(format!(
                "'{}' cannot be used as a base URL",
                base_url
            )));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| DeckError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL by appending path segments to the base URL.
    /// Each segment is percent-encoded, so ticket keys cannot escape their slot.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            debug!(%operation, error = %e, "request could not be sent");
            DeckError::request_failed(operation)
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(%operation, %status, "backend returned non-success status");
            return Err(DeckError::request_failed(operation));
        }

        response.json::<T>().await.map_err(|e| {
            debug!(%operation, error = %e, "response body could not be decoded");
            DeckError::request_failed(operation)
        })
    }
}

impl Backend for HttpBackend {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        let url = self.endpoint(&["api", "projects"]);
        debug!(%url, "listing projects");
        self.send(Operation::ListProjects, self.client.get(url)).await
    }

    async fn list_tickets(
        &self,
        max_results: u32,
        next_page_token: Option<&str>,
    ) -> Result<IssuesPage> {
        let url = self.endpoint(&["api", "issues"]);
        let mut query = vec![("max_results", max_results.to_string())];
        if let Some(token) = next_page_token {
            query.push(("next_page_token", token.to_string()));
        }
        debug!(%url, max_results, continued = next_page_token.is_some(), "listing tickets");
        self.send(Operation::ListTickets, self.client.get(url).query(&query)).await
    }

    async fn get_ticket(&self, key: &str) -> Result<Ticket> {
        let url = self.endpoint(&["api", "issues", key]);
        debug!(%url, "fetching ticket");
        self.send(Operation::GetTicket, self.client.get(url)).await
    }

    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket> {
        let url = self.endpoint(&["api", "issues"]);
        debug!(%url, project = %ticket.project_key, "creating ticket");
        self.send(Operation::CreateTicket, self.client.post(url).json(ticket)).await
    }

    async fn update_ticket(&self, key: &str, update: &TicketUpdate) -> Result<Ticket> {
        let url = self.endpoint(&["api", "issues", key]);
        debug!(%url, "updating ticket");
        self.send(Operation::UpdateTicket, self.client.put(url).json(update)).await
    }

    async fn analyze_ticket(&self, key: &str) -> Result<AnalysisResult> {
        let url = self.endpoint(&["api", "analyze", key]);
        debug!(%url, "analyzing ticket");
        self.send(Operation::AnalyzeTicket, self.client.post(url)).await
    }

    async fn analyze_tickets(&self, keys: Option<&[String]>) -> Result<Vec<AnalysisResult>> {
        let url = self.endpoint(&["api", "analyze"]);
        let body = AnalyzeRequest {
            issue_keys: keys.map(<[String]>::to_vec),
        };
        debug!(%url, selected = keys.map(<[String]>::len), "analyzing tickets");
        self.send(Operation::AnalyzeTickets, self.client.post(url).json(&body)).await
    }
}
