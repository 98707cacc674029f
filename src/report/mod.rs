pub mod json;
pub mod md;

use crate::error::HealthError;
use crate::types::report::{AnalysisReport, Comparison};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &AnalysisReport, format: OutputFormat) -> Result<String, HealthError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(HealthError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}

pub fn render_comparison(
    comparison: &Comparison,
    format: OutputFormat,
) -> Result<String, HealthError> {
    match format {
        OutputFormat::Json => json::to_json(comparison).map_err(HealthError::Json),
        OutputFormat::Md => Ok(md::comparison_to_markdown(comparison)),
    }
}
