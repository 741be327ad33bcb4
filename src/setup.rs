use log::debug;
use crate::config::Config;
use crate::llm::gemini::GeminiClient;
use crate::llm::{GenAiClient, NoopClient};

/// Build the generative client based on CLI + config.
pub fn build_client(cfg: &Config) -> Box<dyn GenAiClient> {
    if cfg.no_model {
        debug!("Using NoopClient (no model calls)");
        return Box::new(NoopClient);
    }

    debug!("Using GeminiClient with model: {}", cfg.model);

    Box::new(GeminiClient::new(
        cfg.gemini_api_key.clone(),
        cfg.model.clone(),
        cfg.embedding_model.clone(),
    ))
}
