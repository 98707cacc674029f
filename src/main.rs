mod aggregate;
mod cli;
mod config;
mod error;
#[cfg(test)]
mod fixtures;
mod github;
mod identity;
mod pipeline;
mod report;
mod scoring;
mod types;

use crate::error::HealthError;
use crate::github::client::GitHubClient;
use crate::types::report::AnalysisReport;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const BELOW_THRESHOLD: i32 = 1;
    pub const INVALID_INPUT: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn threshold_exit(report: &AnalysisReport, fail_under: Option<f64>) -> i32 {
    match fail_under {
        Some(threshold) if report.score.total_score < threshold => {
            eprintln!(
                "warning: {} scored {:.1}, below the required {:.1}",
                report.snapshot.full_name, report.score.total_score, threshold
            );
            exit_code::BELOW_THRESHOLD
        }
        _ => exit_code::SUCCESS,
    }
}

fn run(cli: cli::Cli) -> Result<i32, HealthError> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(&cwd)?;

    match cli.command {
        cli::Commands::Analyze(cmd) => {
            let client = GitHubClient::new(&loaded, cmd.auth.token);
            let analysis = pipeline::run_analysis(&client, &cmd.repository, &loaded)?;
            let rendered = report::render(&analysis, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(threshold_exit(&analysis, cmd.fail_under))
        }
        cli::Commands::Compare(cmd) => {
            let client = GitHubClient::new(&loaded, cmd.auth.token);
            let comparison = pipeline::run_comparison(&client, &cmd.left, &cmd.right, &loaded)?;
            let rendered = report::render_comparison(&comparison, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Score(cmd) => {
            if !cmd.snapshot.exists() {
                return Err(HealthError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("snapshot file does not exist: {}", cmd.snapshot.display()),
                )));
            }
            let analysis = pipeline::score_snapshot_file(&cmd.snapshot, &loaded.scoring())?;
            let rendered = report::render(&analysis, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(threshold_exit(&analysis, cmd.fail_under))
        }
    }
}

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = match e {
                HealthError::IdentityInvalid(_) | HealthError::ConfigParse(_) => {
                    exit_code::INVALID_INPUT
                }
                _ => exit_code::RUNTIME_FAILURE,
            };
            std::process::exit(code);
        }
    }
}
