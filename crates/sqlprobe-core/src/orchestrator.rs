//! Query execution and hint orchestration
//!
//! Runs are serialized by a single-permit latch: a run requested while
//! another is in flight is dropped, not queued. Hints bypass the latch and
//! never fail; any backend problem turns into [`FALLBACK_HINT`].

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{BackendError, EditorError};

/// Hint shown when the hint service cannot answer
pub const FALLBACK_HINT: &str =
    "Unable to get hint at this time. Try breaking down the problem into smaller steps.";

/// Outbound hint request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HintRequest {
    pub assignment_id: String,
    pub user_query: String,
}

/// Hint service reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HintResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub hint: Option<String>,
}

/// The external service that executes queries and produces hints
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Result of a successful run
    type Output: Send;

    async fn run_query(&self, query: &str) -> Result<Self::Output, BackendError>;

    async fn request_hint(&self, request: &HintRequest) -> Result<HintResponse, BackendError>;
}

/// Single-permit flag guarding run submission
#[derive(Debug, Default)]
pub struct RunLatch {
    held: AtomicBool,
}

impl RunLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the latch, or `None` if it is already held
    pub fn try_acquire(&self) -> Option<RunGuard<'_>> {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunGuard { latch: self })
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

/// Releases the latch when dropped
#[derive(Debug)]
pub struct RunGuard<'a> {
    latch: &'a RunLatch,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.latch.held.store(false, Ordering::Release);
    }
}

/// What happened to a run request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome<T> {
    /// The backend ran the query
    Completed(T),
    /// Another run was still in flight
    Busy,
    /// The query was empty or whitespace only
    EmptyQuery,
}

pub struct Orchestrator<B> {
    backend: B,
    assignment_id: Option<String>,
    latch: RunLatch,
}

impl<B: QueryBackend> Orchestrator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            assignment_id: None,
            latch: RunLatch::new(),
        }
    }

    pub fn with_assignment(mut self, assignment_id: impl Into<String>) -> Self {
        self.assignment_id = Some(assignment_id.into());
        self
    }

    pub fn set_assignment(&mut self, assignment_id: Option<String>) {
        self.assignment_id = assignment_id;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_running(&self) -> bool {
        self.latch.is_held()
    }

    /// Submit `query` for execution.
    ///
    /// Empty queries and requests made while a run is in flight are no-ops.
    /// The latch is released when the run settles, whatever the result.
    pub async fn run(&self, query: &str) -> Result<RunOutcome<B::Output>, EditorError> {
        if query.trim().is_empty() {
            return Ok(RunOutcome::EmptyQuery);
        }
        let Some(_guard) = self.latch.try_acquire() else {
            debug!("run already in flight, ignoring request");
            return Ok(RunOutcome::Busy);
        };

        match self.backend.run_query(query).await {
            Ok(output) => Ok(RunOutcome::Completed(output)),
            Err(e) => {
                warn!(error = %e, "query run failed");
                Err(e.into())
            }
        }
    }

    /// Ask the hint service about `query`.
    ///
    /// Returns `None` only when no assignment is loaded.
    pub async fn hint(&self, query: &str) -> Option<String> {
        let assignment_id = self.assignment_id.clone()?;
        let request = HintRequest {
            assignment_id,
            user_query: query.to_string(),
        };

        let hint = match self.backend.request_hint(&request).await {
            Ok(HintResponse {
                success: true,
                hint: Some(hint),
            }) => hint,
            Ok(_) => {
                warn!("hint service returned no hint");
                FALLBACK_HINT.to_string()
            }
            Err(e) => {
                warn!(error = %e, "hint request failed");
                FALLBACK_HINT.to_string()
            }
        };
        Some(hint)
    }
}
