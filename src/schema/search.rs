use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use super::{
    common::{BadRequestResponse, InternalServerErrorResponse},
    dsa_topic::DsaTopicResponse,
    project::ProjectResponse,
};

#[derive(Object, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct SearchResponse {
    pub query: String,
    pub projects: Vec<ProjectResponse>,
    pub dsa_topics: Vec<DsaTopicResponse>,
}

#[derive(ApiResponse)]
pub enum SearchResponses {
    #[oai(status = 200)]
    Ok(Json<SearchResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}
