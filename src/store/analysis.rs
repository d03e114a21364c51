//! Latest AI analysis per ticket.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{DeckError, Result};
use crate::remote::Backend;
use crate::types::AnalysisResult;

/// What the single in-flight analysis is working on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzingTarget {
    Ticket(String),
    All,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisCache {
    entries: HashMap<String, AnalysisResult>,
    analyzing: Option<AnalyzingTarget>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AnalysisResult> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn analyzing(&self) -> Option<&AnalyzingTarget> {
        self.analyzing.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.analyzing.is_some()
    }

    /// Whether `key` itself is being analyzed (bulk runs do not count)
    pub fn is_analyzing(&self, key: &str) -> bool {
        matches!(&self.analyzing, Some(AnalyzingTarget::Ticket(k)) if k == key)
    }

    pub fn is_analyzing_all(&self) -> bool {
        self.analyzing == Some(AnalyzingTarget::All)
    }

    /// Mark `target` as in flight. Refused while another analysis runs.
    pub fn begin(&mut self, target: AnalyzingTarget) -> Result<()> {
        if self.analyzing.is_some() {
            return Err(DeckError::Busy("analysis"));
        }
        self.analyzing = Some(target);
        Ok(())
    }

    pub fn finish(&mut self) {
        self.analyzing = None;
    }

    /// Insert or overwrite the entry for `key`
    pub fn insert(&mut self, key: impl Into<String>, result: AnalysisResult) {
        self.entries.insert(key.into(), result);
    }

    /// Discard every entry and keep only `results`
    pub fn replace_all(&mut self, results: Vec<AnalysisResult>) {
        self.entries = results
            .into_iter()
            .map(|r| (r.issue_key.clone(), r))
            .collect();
    }

    pub async fn analyze_one<B: Backend>(
        &mut self,
        backend: &B,
        key: &str,
    ) -> Result<AnalysisResult> {
        self.begin(AnalyzingTarget::Ticket(key.to_string()))?;
        let result = backend.analyze_ticket(key).await;
        self.finish();

        let analysis = result?;
        debug!(key, suggestions = analysis.suggestions.len(), "analysis stored");
        self.insert(key, analysis.clone());
        Ok(analysis)
    }

    /// Run a bulk analysis and replace the cache with its results.
    /// Returns the number of analyses received.
    pub async fn analyze_all<B: Backend>(
        &mut self,
        backend: &B,
        keys: Option<&[String]>,
    ) -> Result<usize> {
        self.begin(AnalyzingTarget::All)?;
        let result = backend.analyze_tickets(keys).await;
        self.finish();

        let results = result?;
        let received = results.len();
        self.replace_all(results);
        debug!(received, "bulk analysis replaced cache");
        Ok(received)
    }
}
