use crate::errors::CoreError;
use crate::models::portfolio::Portfolio;

/// Converts between a `Portfolio` and the JSON document kept in the slot.
pub struct StorageManager;

impl StorageManager {
    /// Portfolio → compact JSON array.
    pub fn serialize_portfolio(portfolio: &Portfolio) -> Result<String, CoreError> {
        serde_json::to_string(portfolio)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))
    }

    /// JSON array → Portfolio. A blank document reads as an empty portfolio;
    /// anything else that does not parse is an error.
    pub fn deserialize_portfolio(document: &str) -> Result<Portfolio, CoreError> {
        if document.trim().is_empty() {
            return Ok(Portfolio::new());
        }
        serde_json::from_str(document)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize portfolio: {e}")))
    }
}
