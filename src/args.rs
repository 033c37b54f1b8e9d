use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    name = "phishparams",
    about = "Extract phishing indicator parameters from email or URL text",
    version,
    long_about = None
)]
pub struct Args {
    /// Files to analyze ("-" reads stdin; stdin is used when nothing is given)
    pub inputs: Vec<PathBuf>,

    /// Analyze a bare URL string (repeatable)
    #[arg(short, long = "url")]
    pub urls: Vec<String>,

    /// Path to custom indicator pattern file
    #[arg(short, long)]
    pub patterns: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of worker threads
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Seed for the simulated reputation signals
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// Saved /predict response to attach as a risk assessment (single input only)
    #[arg(long)]
    pub prediction: Option<PathBuf>,

    /// Initialize indicator_patterns.json with default patterns
    #[arg(long)]
    pub init: bool,
}
