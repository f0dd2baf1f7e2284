use poem_openapi::Object;
use serde::{Deserialize, Serialize};

#[derive(Object, Deserialize, Serialize)]
pub struct BadRequestResponse {
    pub message: String,
}

#[derive(Object, Deserialize, Serialize)]
pub struct UnauthorizedResponse {
    pub message: String,
}

impl Default for UnauthorizedResponse {
    fn default() -> Self {
        Self {
            message: "Could not validate credentials".to_string(),
        }
    }
}

#[derive(Object, Deserialize, Serialize)]
pub struct ForbiddenResponse {
    pub message: String,
}

impl ForbiddenResponse {
    pub fn new(action: &str) -> Self {
        Self {
            message: format!("Not authorized to {} this item", action),
        }
    }
}

#[derive(Object, Deserialize, Serialize)]
pub struct NotFoundResponse {
    pub message: String,
}

impl NotFoundResponse {
    pub fn new(kind: &str) -> Self {
        Self {
            message: format!("{} not found", kind),
        }
    }
}

#[derive(Object, Deserialize, Serialize)]
pub struct ConflictResponse {
    pub message: String,
}

#[derive(Object, Deserialize, Serialize)]
pub struct InternalServerErrorResponse {
    pub message: String,
}

impl InternalServerErrorResponse {
    /// logs the failure with its location, the client only sees a generic message
    pub fn new(module: &str, function: &str, step: &str, err: &str) -> Self {
        tracing::error!("{}.{} failed to {}: {}", module, function, step, err);
        Self {
            message: "Internal server error".to_string(),
        }
    }
}
