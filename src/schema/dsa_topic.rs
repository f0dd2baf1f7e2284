use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use super::common::{
    BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
    UnauthorizedResponse,
};
use crate::model::dsa_topic::{DsaTopic, DsaTopicPatch, NewDsaTopic};

#[derive(Object, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DsaTopicResponse {
    pub id: String,
    pub topic_name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub problems_solved: Option<String>,
    pub resources: Option<String>,
    pub profile_id: String,
    /// `problems_solved` split on commas
    pub problems: Vec<String>,
}

impl From<DsaTopic> for DsaTopicResponse {
    fn from(value: DsaTopic) -> Self {
        let problems = value.problems().into_iter().map(String::from).collect();
        Self {
            id: value.id.to_string(),
            topic_name: value.topic_name,
            category: value.category,
            description: value.description,
            problems_solved: value.problems_solved,
            resources: value.resources,
            profile_id: value.profile_id.to_string(),
            problems,
        }
    }
}

#[derive(Object, Deserialize)]
pub struct DsaTopicCreateRequest {
    pub topic_name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub problems_solved: Option<String>,
    pub resources: Option<String>,
}

impl From<DsaTopicCreateRequest> for NewDsaTopic {
    fn from(value: DsaTopicCreateRequest) -> Self {
        Self {
            topic_name: value.topic_name,
            category: value.category,
            description: value.description,
            problems_solved: value.problems_solved,
            resources: value.resources,
        }
    }
}

#[derive(Object, Deserialize)]
pub struct DsaTopicUpdateRequest {
    pub topic_name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub problems_solved: Option<String>,
    pub resources: Option<String>,
}

impl From<DsaTopicUpdateRequest> for DsaTopicPatch {
    fn from(value: DsaTopicUpdateRequest) -> Self {
        Self {
            topic_name: value.topic_name,
            category: value.category,
            description: value.description,
            problems_solved: value.problems_solved,
            resources: value.resources,
        }
    }
}

#[derive(ApiResponse)]
pub enum DsaTopicListResponses {
    #[oai(status = 200)]
    Ok(Json<Vec<DsaTopicResponse>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum DsaTopicDetailResponses {
    #[oai(status = 200)]
    Ok(Json<DsaTopicResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum DsaTopicCreateResponses {
    #[oai(status = 201)]
    Created(Json<DsaTopicResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum DsaTopicUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<DsaTopicResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum DsaTopicDeleteResponses {
    #[oai(status = 204)]
    NoContent,

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}
