//! Boundary to the external language-model oracle.
//!
//! The oracle is an untrusted black box: it receives a rendered prompt and
//! returns free text that is expected (but never assumed) to contain a JSON
//! object. Retries, backoff, rate limiting and timeouts are the
//! implementation's concern; this crate makes exactly one call per score or
//! summary and treats any failure of that call as a failure of the whole unit.
//!
//! - [`prompts`]: renders scoring and summary prompts
//! - [`payload`]: recovers a JSON object from oracle text and reads fields leniently

pub mod payload;
pub mod prompts;

use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::errors::Result;

/// A rendered request for the oracle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OraclePrompt {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Generation settings applied to every rendered prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleSettings {
    /// Model identifier passed through to the oracle implementation
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl OracleSettings {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_tokens == 0 {
            return Err("oracle max_tokens must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "oracle temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        Ok(())
    }
}

pub fn default_max_tokens() -> u32 {
    1500
}

pub fn default_temperature() -> f32 {
    0.2 // low temperature keeps repeated scoring of the same answer stable
}

/// The external language-model call.
///
/// Implementations return the oracle's raw text content. Transport failures,
/// timeouts and cancellations are reported as [`crate::Error::Oracle`].
pub trait Oracle: Send + Sync {
    fn complete(&self, prompt: &OraclePrompt) -> impl Future<Output = Result<String>> + Send;
}

impl<T: Oracle> Oracle for &T {
    fn complete(&self, prompt: &OraclePrompt) -> impl Future<Output = Result<String>> + Send {
        (**self).complete(prompt)
    }
}

impl<T: Oracle> Oracle for std::sync::Arc<T> {
    fn complete(&self, prompt: &OraclePrompt) -> impl Future<Output = Result<String>> + Send {
        (**self).complete(prompt)
    }
}
