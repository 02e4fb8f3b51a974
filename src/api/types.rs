use serde::{Deserialize, Serialize};

// ============================================================
// Query params
// ============================================================

#[derive(Debug, Default, Deserialize)]
pub struct BurnsParams {
    /// Overrides the configured address matching policy for one request.
    pub case_sensitive: Option<bool>,
}

// ============================================================
// Response types
// ============================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub token: String,
    pub contract_address: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
