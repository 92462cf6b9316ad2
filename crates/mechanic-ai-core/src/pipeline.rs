//! Query orchestration.
//!
//! ```text
//! query ─▶ CorpusIndex::search ─▶ build_context ─▶ build_prompt
//!       ─▶ Generator::generate ─▶ parse::interpret ─▶ Outcome
//! ```
//!
//! Empty queries are rejected before anything runs. Once a query is
//! accepted every failure below this point, including a panic in a
//! collaborator, becomes a single [`Outcome::Error`]; nothing else escapes
//! to the caller.

use std::panic::{self, AssertUnwindSafe};

use anyhow::{Context, Result};

use crate::generate::Generator;
use crate::index::{build_context, CorpusIndex};
use crate::models::{Outcome, Query, QueryError};
use crate::parse;
use crate::prompt::build_prompt;

/// Number of chunks retrieved per query unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 3;

/// The retrieval-to-extraction pipeline.
///
/// Holds the loaded index and the generation client for the lifetime of the
/// session. Queries run one at a time; each call blocks until its outcome
/// is ready.
pub struct Pipeline<I, G> {
    index: I,
    generator: G,
    top_k: usize,
}

impl<I: CorpusIndex, G: Generator> Pipeline<I, G> {
    pub fn new(index: I, generator: G) -> Self {
        Self {
            index,
            generator,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Set how many chunks are retrieved per query (at least 1).
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k.max(1);
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Validate `input` and run it.
    ///
    /// Returns [`QueryError::Empty`] for blank input without touching the
    /// index or the generator.
    pub fn submit(&self, input: &str) -> Result<Outcome, QueryError> {
        let query = Query::new(input)?;
        Ok(self.run(&query))
    }

    /// Run an accepted query to exactly one outcome.
    pub fn run(&self, query: &Query) -> Outcome {
        let attempt = panic::catch_unwind(AssertUnwindSafe(|| self.extract(query)));

        match attempt {
            Ok(Ok(outcome)) => {
                tracing::debug!(kind = outcome.kind(), "query finished");
                outcome
            }
            Ok(Err(err)) => {
                let message = format!("{:#}", err);
                tracing::warn!(error = %message, "query failed");
                error_outcome(message)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(%message, "query panicked");
                error_outcome(format!("internal error: {}", message))
            }
        }
    }

    /// Retrieve context and build the prompt for `query` without calling
    /// the generator.
    pub fn prepare(&self, query: &Query) -> Result<String> {
        let chunks = self
            .index
            .search(query.as_str(), self.top_k)
            .context("corpus search failed")?;
        tracing::debug!(requested = self.top_k, retrieved = chunks.len(), "retrieved context");

        let context = build_context(&chunks);
        let prompt = build_prompt(query.as_str(), &context);
        tracing::debug!(bytes = prompt.len(), "built prompt");
        Ok(prompt)
    }

    fn extract(&self, query: &Query) -> Result<Outcome> {
        let prompt = self.prepare(query)?;
        let raw = self
            .generator
            .generate(&prompt)
            .context("model request failed")?;
        tracing::debug!(bytes = raw.len(), "received model output");

        let outcome = parse::interpret(query, &raw);
        match &outcome {
            Outcome::RawText { .. } => {
                tracing::warn!("model output was not valid JSON; showing raw text")
            }
            Outcome::Error { message } => tracing::warn!(%message, "model output had the wrong shape"),
            _ => {}
        }
        Ok(outcome)
    }
}

fn error_outcome(message: String) -> Outcome {
    let message = if message.trim().is_empty() {
        "unknown failure".to_string()
    } else {
        message
    };
    Outcome::Error { message }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
