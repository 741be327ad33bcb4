use crate::cli_args::Cli;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";

/// Final resolved configuration for gitbrief.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub model: String,
    pub embedding_model: String,
    pub no_model: bool,
}

impl Config {
    /// Build the final config from CLI flags, environment, TOML file, and defaults.
    ///
    /// Precedence:
    ///   1. CLI flags (`--model`, `--api-key`)
    ///   2. Env vars `GITBRIEF_MODEL` / `GEMINI_API_KEY`
    ///   3. TOML `~/.config/gitbrief.toml`
    ///   4. Hardcoded defaults ("gemini-1.5-flash" / "text-embedding-004")
    ///
    /// A missing credential fails here, before any git or model work starts,
    /// rather than on the first remote call.
    pub fn from_sources(cli: &Cli) -> Result<Self> {
        let file_cfg = load_file_config().unwrap_or_default();

        let model = cli
            .model
            .clone()
            .or_else(|| env::var("GITBRIEF_MODEL").ok())
            .or(file_cfg.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let embedding_model = env::var("GITBRIEF_EMBEDDING_MODEL")
            .ok()
            .or(file_cfg.embedding_model)
            .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string());

        let no_model = cli.no_model || model.eq_ignore_ascii_case("none");

        let gemini_api_key = if no_model {
            String::new()
        } else {
            // clap already consulted GEMINI_API_KEY for the --api-key flag.
            cli.api_key.clone().or(file_cfg.gemini_api_key).ok_or_else(|| {
                anyhow!(
                    "GEMINI_API_KEY (or --api-key) is required unless --no-model or --model none is used"
                )
            })?
        };

        Ok(Config {
            gemini_api_key,
            model,
            embedding_model,
            no_model,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    /// Default generation model to use when not provided via CLI or env.
    pub model: Option<String>,
    /// Default embedding model to use when not provided via env.
    pub embedding_model: Option<String>,
    pub gemini_api_key: Option<String>,
}

/// Return `~/.config/gitbrief.toml`
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("gitbrief.toml"))
}

fn load_file_config() -> Option<FileConfig> {
    let path = config_path()?;
    if !path.exists() {
        return None;
    }

    let data = fs::read_to_string(&path).ok()?;
    toml::from_str::<FileConfig>(&data).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn file_config_parses_known_keys() {
        let cfg: FileConfig = toml::from_str(
            "model = \"gemini-1.5-pro\"\nembedding_model = \"text-embedding-004\"\n",
        )
        .unwrap();
        assert_eq!(cfg.model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(cfg.embedding_model.as_deref(), Some("text-embedding-004"));
        assert!(cfg.gemini_api_key.is_none());
    }

    #[test]
    fn no_model_skips_credential_requirement() {
        let cli = Cli::parse_from(["gitbrief", "--no-model"]);
        let cfg = Config::from_sources(&cli).unwrap();
        assert!(cfg.no_model);
        assert!(cfg.gemini_api_key.is_empty());
    }

    #[test]
    fn model_none_acts_like_no_model() {
        let cli = Cli::parse_from(["gitbrief", "--model", "none"]);
        let cfg = Config::from_sources(&cli).unwrap();
        assert!(cfg.no_model);
    }
}
