use super::{prompt_builder, GenAiClient, SourceDocument};
use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Minimal request/response structs for the Gemini REST API.
#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Serialize)]
struct EmbedRequest {
    content: Content,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Embedding,
}

#[derive(Deserialize)]
struct Embedding {
    values: Vec<f32>,
}

/// Gemini-based implementation of GenAiClient.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    embedding_model: String,
    api_base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, embedding_model: String) -> Self {
        Self::with_base_url(api_key, model, embedding_model, DEFAULT_API_BASE_URL)
    }

    pub fn with_base_url(
        api_key: String,
        model: String,
        embedding_model: String,
        api_base_url: &str,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(90))
            .build()
            .expect("failed to build HTTP client");

        GeminiClient {
            client,
            api_key,
            model,
            embedding_model,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base_url, self.model
        )
    }

    fn embed_url(&self) -> String {
        format!(
            "{}/models/{}:embedContent",
            self.api_base_url, self.embedding_model
        )
    }

    /// One generateContent call; the ordered parts become a single user turn.
    fn generate(&self, parts: Vec<String>) -> Result<String> {
        let url = self.generate_url();

        log::info!("Calling Gemini model {:?}", self.model);

        let req = GenerateRequest {
            contents: vec![Content {
                parts: parts.into_iter().map(|text| Part { text }).collect(),
            }],
        };

        let resp = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&req)
            .send()
            .context("failed to send request to Gemini")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            return Err(anyhow!(
                "Gemini API error: HTTP {} - {}",
                status.as_u16(),
                text
            ));
        }

        let gen_resp: GenerateResponse = resp.json().context("failed to parse Gemini response")?;
        let content = gen_resp
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| anyhow!("no candidates returned from Gemini"))?;

        Ok(content)
    }
}

impl GenAiClient for GeminiClient {
    fn summarize_diff(&self, diff: &str) -> Result<String> {
        let prompt = prompt_builder::diff_summary_prompt(diff);

        log::debug!("Diff summary prompt:\n{}", truncate(&prompt.parts[1], 2000));

        self.generate(prompt.parts)
    }

    fn summarize_file(&self, doc: &SourceDocument) -> Option<String> {
        log::info!("Getting summary for {}", doc.source);

        let prompt = prompt_builder::file_summary_prompt(doc);

        log::debug!(
            "File summary prompt for {}:\n{}",
            doc.source,
            truncate(&prompt.parts[0], 2000)
        );

        match self.generate(prompt.parts) {
            Ok(summary) => Some(summary),
            Err(err) => {
                log::error!("Error while generating summary for {}: {err:#}", doc.source);
                None
            }
        }
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = self.embed_url();

        log::info!("Calling Gemini embedding model {:?}", self.embedding_model);

        let req = EmbedRequest {
            content: Content {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
        };

        let resp = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&req)
            .send()
            .context("failed to send embedding request to Gemini")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            return Err(anyhow!(
                "Gemini API error: HTTP {} - {}",
                status.as_u16(),
                text
            ));
        }

        let embed_resp: EmbedResponse = resp
            .json()
            .context("failed to parse Gemini embedding response")?;

        Ok(embed_resp.embedding.values)
    }
}

/// Truncate long strings for debug logging, respecting UTF-8 boundaries.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...\n[truncated {} chars]", &s[..end], s.len() - end)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Client pointed at a local port nothing listens on.
    fn offline_client() -> GeminiClient {
        GeminiClient::with_base_url(
            "test-key".to_string(),
            "gemini-1.5-flash".to_string(),
            "text-embedding-004".to_string(),
            "http://127.0.0.1:9",
        )
    }

    #[test]
    fn urls_include_the_configured_models() {
        let c = offline_client();
        assert_eq!(
            c.generate_url(),
            "http://127.0.0.1:9/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(
            c.embed_url(),
            "http://127.0.0.1:9/models/text-embedding-004:embedContent"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let c = GeminiClient::with_base_url(
            "k".to_string(),
            "m".to_string(),
            "e".to_string(),
            "http://localhost:8000/",
        );
        assert_eq!(c.generate_url(), "http://localhost:8000/models/m:generateContent");
    }

    #[test]
    fn deserialize_generate_response() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "* Added a thing [src/lib.rs]"}],
                    "role": "model"
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 8}
        }"#;
        let resp: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.candidates.len(), 1);
        assert_eq!(
            resp.candidates[0].content.parts[0].text.as_deref(),
            Some("* Added a thing [src/lib.rs]")
        );
    }

    #[test]
    fn deserialize_embed_response() {
        let json = r#"{"embedding": {"values": [0.013168523, -0.008711934, 0.046782676]}}"#;
        let resp: EmbedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.embedding.values.len(), 3);
        assert!((resp.embedding.values[0] - 0.013168523).abs() < 1e-6);
    }

    #[test]
    fn summarize_diff_propagates_transport_errors() {
        let c = offline_client();
        assert!(c.summarize_diff("diff --git a/x b/x\n+line").is_err());
    }

    #[test]
    fn embed_propagates_transport_errors() {
        let c = offline_client();
        assert!(c.embed("hello").is_err());
    }

    #[test]
    fn summarize_file_swallows_transport_errors() {
        let c = offline_client();
        let doc = SourceDocument {
            content: "short file".to_string(),
            source: "a.ts".to_string(),
        };
        assert_eq!(c.summarize_file(&doc), None);
    }

    #[test]
    fn log_truncate_respects_utf8_boundaries() {
        let s = format!("{}é tail", "a".repeat(99));
        let out = truncate(&s, 100);
        assert!(out.starts_with(&"a".repeat(99)));
        assert!(out.contains("[truncated"));
    }
}
