pub mod run;
pub mod schema;
pub mod show;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Parser)]
#[command(name = "polyresearch")]
#[command(
    author,
    version,
    about = "Multi-perspective research assistant: 3 questions x 3 perspectives, researched in parallel"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive research loop (or research one topic with --topic)
    Run(RunArgs),

    /// Render a saved research session
    Show(ShowArgs),

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Parser, Clone)]
pub struct RunArgs {
    /// Path to config file (defaults apply when the default file is absent)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Research a single topic and exit instead of prompting
    #[arg(long)]
    pub topic: Option<String>,

    /// Override the model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Override the session output directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Language the researchers answer in
    #[arg(long, env = "POLYRESEARCH_LANGUAGE")]
    pub language: Option<String>,
}

#[derive(Parser, Clone)]
pub struct ShowArgs {
    /// Session file written by `run`
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Display width (defaults to the terminal width)
    #[arg(long)]
    pub width: Option<usize>,
}
