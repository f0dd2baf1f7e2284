use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

#[derive(Object, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    /// `connected` or `disconnected`
    pub database: String,
    #[oai(skip_serializing_if_is_none)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    pub fn connected() -> Self {
        Self {
            status: "ok".to_string(),
            database: "connected".to_string(),
            error: None,
        }
    }

    pub fn disconnected(err: String) -> Self {
        Self {
            status: "ok".to_string(),
            database: "disconnected".to_string(),
            error: Some(err),
        }
    }
}

/// Always answered with 200, the store state is reported in the body
#[derive(ApiResponse)]
pub enum HealthResponses {
    #[oai(status = 200)]
    Ok(Json<HealthResponse>),
}
