//! Testing utilities including a mock completion service.
//!
//! Useful for testing code built on the summarizer without a model server.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, RwLock};

use crate::error::{Result, SummarizeError};
use crate::traits::completion::CompletionService;
use crate::types::completion::{
    Completion, CompletionRequest, GenerationParams, Role, Stage,
};

/// A scripted completion service.
///
/// Each stage has its own queue of responses. When a stage's queue is empty
/// the mock answers `"{stage} #{n}"`, where `n` is the 1-based number of the
/// call across all stages, so every answer is distinct and short enough to
/// pass the language check.
#[derive(Default)]
pub struct MockCompletion {
    /// Queued responses per stage
    responses: Arc<RwLock<HashMap<Stage, VecDeque<String>>>>,

    /// Stages answered with no choices at all
    empty_stages: Arc<RwLock<HashSet<Stage>>>,

    /// 1-based call number that fails
    fail_at: Option<usize>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockCall>>>,
}

/// Record of a call made to the mock.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub stage: Stage,
    pub system: String,
    pub user: String,
    pub params: GenerationParams,
}

/// Error returned by an injected failure.
#[derive(Debug, thiserror::Error)]
#[error("mock completion failure at call {0}")]
pub struct MockFailure(pub usize);

impl MockCompletion {
    /// Create a mock with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for a stage.
    pub fn with_response(self, stage: Stage, text: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .entry(stage)
            .or_default()
            .push_back(text.into());
        self
    }

    /// Answer every call of a stage as if the backend returned no choices.
    pub fn with_empty_choices(self, stage: Stage) -> Self {
        self.empty_stages.write().unwrap().insert(stage);
        self
    }

    /// Fail the `n`th call (1-based).
    pub fn failing_at(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Calls made for one stage.
    pub fn calls_for(&self, stage: Stage) -> Vec<MockCall> {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.stage == stage)
            .cloned()
            .collect()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

#[async_trait]
impl CompletionService for MockCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        let n = {
            let mut calls = self.calls.write().unwrap();
            calls.push(MockCall {
                stage: request.stage,
                system: request.content_of(Role::System).unwrap_or_default().to_string(),
                user: request.content_of(Role::User).unwrap_or_default().to_string(),
                params: request.params.clone(),
            });
            calls.len()
        };

        if self.fail_at == Some(n) {
            return Err(SummarizeError::completion(MockFailure(n)));
        }

        if self.empty_stages.read().unwrap().contains(&request.stage) {
            return Ok(Completion::empty());
        }

        let queued = self
            .responses
            .write()
            .unwrap()
            .get_mut(&request.stage)
            .and_then(VecDeque::pop_front);

        Ok(Completion::text(
            queued.unwrap_or_else(|| format!("{} #{}", request.stage, n)),
        ))
    }
}
