//! The text-generation seam.

use anyhow::Result;

/// A remote text-generation service.
///
/// One blocking call per query. Implementations must not retry; any failure
/// is returned as-is and reported by the pipeline as a system error.
pub trait Generator {
    /// Send `prompt` and return the model's raw text output.
    fn generate(&self, prompt: &str) -> Result<String>;
}

impl<T: Generator + ?Sized> Generator for &T {
    fn generate(&self, prompt: &str) -> Result<String> {
        (**self).generate(prompt)
    }
}

impl<T: Generator + ?Sized> Generator for Box<T> {
    fn generate(&self, prompt: &str) -> Result<String> {
        (**self).generate(prompt)
    }
}
