use super::FormatError;
use crate::models::QueryResult;

/// Convert a query result to YAML
pub fn to_yaml(result: &QueryResult) -> Result<String, FormatError> {
    serde_yaml::to_string(result).map_err(FormatError::from)
}
