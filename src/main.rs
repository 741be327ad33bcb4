mod cli_args;
mod config;
mod git;
mod llm;
mod logging;
mod setup;

use std::fs;
use std::io::Read;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::ProgressBar;

use crate::cli_args::{Cli, Command};
use crate::config::Config;
use crate::llm::{GenAiClient, SourceDocument};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let cfg = Config::from_sources(&cli)?;
    let client = setup::build_client(&cfg);

    match &cli.command {
        Some(Command::Commit { hash }) => run_commit(client.as_ref(), hash),
        Some(Command::File { paths }) => run_files(client.as_ref(), paths),
        Some(Command::Embed { text }) => run_embed(client.as_ref(), text.as_deref()),
        None => run_staged(client.as_ref()),
    }
}

/// Default mode: summarize the full staged diff.
fn run_staged(client: &dyn GenAiClient) -> Result<()> {
    let branch = git::current_branch()?;
    let diff = git::staged_diff()?;

    if diff.trim().is_empty() {
        println!("No staged changes found.");
        return Ok(());
    }

    log::info!("Summarizing staged changes on {branch}");

    let summary = with_spinner("Summarizing staged diff...", || {
        client.summarize_diff(&diff)
    })?;

    println!();
    println!("----- Change Summary -----");
    println!("{summary}");
    println!("--------------------------");
    Ok(())
}

/// Summarize the diff introduced by a single commit.
fn run_commit(client: &dyn GenAiClient, hash: &str) -> Result<()> {
    let diff = git::commit_diff(hash)?;

    if diff.trim().is_empty() {
        println!("Commit {hash} has no textual diff.");
        return Ok(());
    }

    let summary = with_spinner("Summarizing commit diff...", || {
        client.summarize_diff(&diff)
    })?;

    let short: String = hash.chars().take(7).collect();
    println!();
    println!("----- Change Summary [{short}] -----");
    println!("{summary}");
    println!("------------------------------------");
    Ok(())
}

/// Best-effort onboarding summaries. Unreadable files and failed model
/// calls are logged and skipped so the rest of the batch still runs.
fn run_files(client: &dyn GenAiClient, paths: &[String]) -> Result<()> {
    let mut summarized = 0usize;

    for path in paths {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("Skipping {path}: {err}");
                continue;
            }
        };

        let doc = SourceDocument {
            content,
            source: path.clone(),
        };

        let summary = with_spinner(&format!("Summarizing {path}..."), || {
            client.summarize_file(&doc)
        });

        match summary {
            Some(text) => {
                summarized += 1;
                println!();
                println!("----- {path} -----");
                println!("{text}");
            }
            None => println!("[no summary for {path}]"),
        }
    }

    println!();
    println!("Summarized {summarized} of {} file(s).", paths.len());
    Ok(())
}

/// Embed the given text (or stdin when omitted) and print the vector as JSON.
fn run_embed(client: &dyn GenAiClient, text: Option<&str>) -> Result<()> {
    let text = match text {
        Some(t) => t.to_string(),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read text from stdin")?;
            buf
        }
    };

    if text.trim().is_empty() {
        println!("Nothing to embed.");
        return Ok(());
    }

    let vector = with_spinner("Generating embedding...", || client.embed(&text))?;

    log::info!("Embedding dimension: {}", vector.len());
    println!("{}", serde_json::to_string(&vector)?);
    Ok(())
}

/// Run `f` behind a spinner on stderr, clearing it when done.
fn with_spinner<T>(msg: &str, f: impl FnOnce() -> T) -> T {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    let out = f();
    pb.finish_and_clear();
    out
}
