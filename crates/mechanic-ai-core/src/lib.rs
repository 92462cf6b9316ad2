//! # Mechanic AI Core
//!
//! Pure logic for extracting specification tables from repair-manual text:
//! data model, prompt building, response parsing, and the pipeline that
//! ties a corpus index to a text generator.
//!
//! This crate does no network or filesystem I/O. The index, the generator,
//! and the embedder are traits; the `mechanic-ai` crate provides the
//! concrete implementations.

pub mod chunk;
pub mod embedding;
pub mod generate;
pub mod index;
pub mod models;
pub mod parse;
pub mod pipeline;
pub mod prompt;

pub use generate::Generator;
pub use index::CorpusIndex;
pub use models::{Outcome, Query, QueryError, SpecRecord};
pub use pipeline::Pipeline;
