mod json;
mod text;
mod yaml;

pub use json::to_json;
pub use text::{render_outline, render_result};
pub use yaml::to_yaml;

use crate::models::QueryResult;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Fold-marker text with the empty / bare-key / outline contract
    Text,
    Json,
    Yaml,
}

/// Format a query result according to the specified format
pub fn format_result(result: &QueryResult, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Text => Ok(render_result(result)),
        OutputFormat::Json => to_json(result),
        OutputFormat::Yaml => to_yaml(result),
    }
}
