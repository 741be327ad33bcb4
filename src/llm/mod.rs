pub mod gemini;
mod prompt_builder;
mod prompts;

use anyhow::Result;

/// A source file queued for summarization.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub content: String,
    pub source: String,
}

/// Trait for talking to a generative-language backend (real or dummy).
pub trait GenAiClient: Send + Sync {
    /// Summarize a unified diff into a bullet list of changes.
    ///
    /// The diff is forwarded whole; transport and API errors propagate.
    fn summarize_diff(&self, diff: &str) -> Result<String>;

    /// Best-effort onboarding summary of a source file.
    ///
    /// Failures are logged and collapse to `None` so a batch of files can
    /// continue past individual errors.
    fn summarize_file(&self, doc: &SourceDocument) -> Option<String>;

    /// Embedding vector for a piece of text (typically a prior summary).
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// No-op / dummy client for development with --no-model or model=none.
pub struct NoopClient;

impl GenAiClient for NoopClient {
    fn summarize_diff(&self, diff: &str) -> Result<String> {
        Ok(format!(
            "[DUMMY SUMMARY] {} diff line(s) (LLM disabled)",
            diff.lines().count()
        ))
    }

    fn summarize_file(&self, doc: &SourceDocument) -> Option<String> {
        Some(format!(
            "[DUMMY SUMMARY] {} ({} chars)",
            doc.source,
            doc.content.len()
        ))
    }

    fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![0.0; 8])
    }
}
