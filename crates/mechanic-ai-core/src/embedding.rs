//! Embedding trait and vector utilities.
//!
//! Concrete providers (fastembed, OpenAI-compatible HTTP) live in the
//! `mechanic-ai` app crate. The core only needs something that turns text
//! into vectors of a fixed dimensionality.

use anyhow::Result;

/// A deterministic text-to-vector mapping.
///
/// The same embedder (same model) must be used to build an index and to
/// embed queries against it.
pub trait Embedder: Send + Sync {
    /// Model identifier recorded in the index manifest (e.g. `"all-minilm-l6-v2"`).
    fn model_name(&self) -> &str;

    /// Vector dimensionality (e.g. `384`).
    fn dims(&self) -> usize;

    /// Embed a batch of texts, returning one vector per text in input order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text.
    fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.embed(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Empty embedding response"))
    }
}

/// Encode a float vector as little-endian `f32` bytes.
pub fn vec_to_bytes(vec: &[f32]) -> Vec<u8> {
    vec.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Decode little-endian `f32` bytes. Trailing bytes that do not form a
/// whole `f32` are ignored.
pub fn bytes_to_vec(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

/// Cosine similarity in `[-1.0, 1.0]`.
///
/// Returns `0.0` for empty vectors, vectors of different lengths, or a
/// zero-magnitude vector.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }
    dot / denom
}
