use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::{
    core::db::ping,
    schema::health::{HealthResponse, HealthResponses},
    AppState,
};

#[derive(Tags)]
enum ApiHealthTags {
    Health,
}

pub struct ApiHealth;

#[OpenApi]
impl ApiHealth {
    #[oai(path = "/health", method = "get", tag = "ApiHealthTags::Health")]
    async fn health_api(&self, state: Data<&Arc<AppState>>) -> HealthResponses {
        match ping(&state.db).await {
            Ok(_) => HealthResponses::Ok(Json(HealthResponse::connected())),
            Err(err) => {
                tracing::warn!("health check cannot reach database: {}", err);
                HealthResponses::Ok(Json(HealthResponse::disconnected(err.to_string())))
            }
        }
    }
}
