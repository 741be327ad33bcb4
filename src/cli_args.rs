use clap::{ArgGroup, Parser, Subcommand};

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "gitbrief",
    version,
    about = "LLM-assisted summaries of diffs, commits, and source files"
)]
#[command(group(
    ArgGroup::new("model_group")
        .args(["model", "no_model"])
        .multiple(false)
))]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Generation model name (e.g. gemini-1.5-pro). If 'none', acts like --no-model.
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Disable model calls; return dummy responses instead
    #[arg(long, global = true)]
    pub no_model: bool,

    /// API key (otherwise uses GEMINI_API_KEY env var)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Subcommand (e.g. 'commit', 'file', 'embed')
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands, e.g. `gitbrief commit HEAD~1`
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summarize the diff introduced by a single commit
    Commit {
        /// Commit hash (or any git revision, e.g. HEAD~1)
        hash: String,
    },

    /// Explain source files for onboarding; failed files are skipped
    File {
        /// Paths of the files to summarize
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Generate an embedding vector for the given text (or stdin) as JSON
    Embed {
        /// Text to embed; reads stdin when omitted
        text: Option<String>,
    },
}
