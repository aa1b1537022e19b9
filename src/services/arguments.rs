use crate::services::ServiceError;
use std::collections::BTreeMap;

/// Parses `key=value` pairs separated by `;`. Values may contain `=`.
pub fn parse_arguments(raw: &str) -> Result<BTreeMap<String, String>, ServiceError> {
    raw.split(';')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment
                .split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or(ServiceError::InvalidArguments)
        })
        .collect()
}
