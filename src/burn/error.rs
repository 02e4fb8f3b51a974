use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BurnError {
    #[error("Malformed transfer record #{index}: field `{field}` = '{value}': {reason}")]
    MalformedRecord {
        index: usize,
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("Unit price in USD is missing or not numeric")]
    MissingPrice,
}

impl BurnError {
    pub fn malformed(index: usize, field: &'static str, value: &str, reason: String) -> Self {
        Self::MalformedRecord {
            index,
            field,
            value: value.to_string(),
            reason,
        }
    }
}
