//! In-memory oracle for exercising the scoring pipeline without a model.
//!
//! [`MockOracle`] replays queued responses in order and records every prompt
//! it receives. Once the queue is exhausted it answers with the fallback
//! response, if one was configured, or fails with [`Error::Oracle`].
//!
//! # Thread Safety
//!
//! `MockOracle` is `Send + Sync + Clone`; clones share the same queue and
//! prompt log, so a clone handed to a scorer can be inspected afterwards.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, RwLock};

use crate::errors::{Error, Result};
use crate::oracle::{Oracle, OraclePrompt};

#[derive(Debug, Clone)]
enum Reply {
    Content(String),
    Failure(String),
}

/// Scripted oracle for tests.
///
/// # Example
///
/// ```rust,ignore
/// let oracle = MockOracle::new()
///     .with_response(r#"{"scores": {"communication": 80}}"#)
///     .with_failure("upstream timeout");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockOracle {
    replies: Arc<RwLock<VecDeque<Reply>>>,
    fallback: Option<String>,
    prompts: Arc<RwLock<Vec<OraclePrompt>>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.replies
            .write()
            .expect("Lock poisoned")
            .push_back(Reply::Content(content.into()));
        self
    }

    /// Queue a JSON value as a successful response
    pub fn with_json(self, value: serde_json::Value) -> Self {
        self.with_response(value.to_string())
    }

    /// Queue a transport failure
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.replies
            .write()
            .expect("Lock poisoned")
            .push_back(Reply::Failure(message.into()));
        self
    }

    /// Response returned whenever the queue is empty
    pub fn with_fallback(mut self, content: impl Into<String>) -> Self {
        self.fallback = Some(content.into());
        self
    }

    /// Every prompt received so far, in call order
    pub fn prompts(&self) -> Vec<OraclePrompt> {
        self.prompts.read().expect("Lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.read().expect("Lock poisoned").len()
    }

    fn next_reply(&self, prompt: &OraclePrompt) -> Result<String> {
        self.prompts
            .write()
            .expect("Lock poisoned")
            .push(prompt.clone());

        let queued = self.replies.write().expect("Lock poisoned").pop_front();
        match queued {
            Some(Reply::Content(content)) => Ok(content),
            Some(Reply::Failure(message)) => Err(Error::oracle(message)),
            None => self
                .fallback
                .clone()
                .ok_or_else(|| Error::oracle("mock oracle has no response queued")),
        }
    }
}

impl Oracle for MockOracle {
    fn complete(&self, prompt: &OraclePrompt) -> impl Future<Output = Result<String>> + Send {
        let reply = self.next_reply(prompt);
        async move { reply }
    }
}
