use super::FormatError;
use crate::models::QueryResult;

/// Convert a query result to pretty-printed JSON
pub fn to_json(result: &QueryResult) -> Result<String, FormatError> {
    serde_json::to_string_pretty(result).map_err(FormatError::from)
}

/// Convert a query result to compact JSON
#[allow(dead_code)]
pub fn to_json_compact(result: &QueryResult) -> Result<String, FormatError> {
    serde_json::to_string(result).map_err(FormatError::from)
}
