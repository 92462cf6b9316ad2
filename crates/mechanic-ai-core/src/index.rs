//! The corpus index seam.
//!
//! The pipeline only needs ranked text back for a query. It never re-ranks,
//! filters, or deduplicates what the index returns.

use anyhow::Result;

/// A read-only nearest-neighbor index over text chunks.
pub trait CorpusIndex {
    /// Return up to `k` chunk texts, most relevant first.
    ///
    /// Returning fewer than `k` chunks (a small corpus) is not an error.
    fn search(&self, query: &str, k: usize) -> Result<Vec<String>>;
}

impl<T: CorpusIndex + ?Sized> CorpusIndex for &T {
    fn search(&self, query: &str, k: usize) -> Result<Vec<String>> {
        (**self).search(query, k)
    }
}

impl<T: CorpusIndex + ?Sized> CorpusIndex for Box<T> {
    fn search(&self, query: &str, k: usize) -> Result<Vec<String>> {
        (**self).search(query, k)
    }
}

/// Join retrieved chunks into a single context block, preserving order.
pub fn build_context<S: AsRef<str>>(chunks: &[S]) -> String {
    chunks
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}
