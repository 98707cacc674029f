use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "repohealth",
    version,
    about = "Repository health scoring from hosting platform activity signals"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and score one repository
    Analyze(AnalyzeCommand),
    /// Fetch and score two repositories side by side
    Compare(CompareCommand),
    /// Score a snapshot exported by `analyze --format json`
    Score(ScoreCommand),
}

#[derive(Args)]
pub struct TokenArgs {
    /// Personal access token; raises API rate limits
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Args)]
pub struct AnalyzeCommand {
    /// Repository URL or owner/repo
    pub repository: String,
    #[command(flatten)]
    pub auth: TokenArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Exit with status 1 when the total score is below this value
    #[arg(long, value_parser = parse_threshold)]
    pub fail_under: Option<f64>,
}

#[derive(Args)]
pub struct CompareCommand {
    pub left: String,
    pub right: String,
    #[command(flatten)]
    pub auth: TokenArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub snapshot: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[arg(long, value_parser = parse_threshold)]
    pub fail_under: Option<f64>,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

fn parse_threshold(value: &str) -> Result<f64, String> {
    let threshold: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (0.0..=100.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err("threshold must be between 0 and 100".to_string())
    }
}
