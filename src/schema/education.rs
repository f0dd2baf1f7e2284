use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use super::common::{
    BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
    UnauthorizedResponse,
};
use crate::model::education::{Education, EducationPatch, NewEducation};

#[derive(Object, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct EducationResponse {
    pub id: String,
    pub institution: String,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub grade: Option<String>,
    pub description: Option<String>,
    pub profile_id: String,
}

impl From<Education> for EducationResponse {
    fn from(value: Education) -> Self {
        Self {
            id: value.id.to_string(),
            institution: value.institution,
            degree: value.degree,
            field_of_study: value.field_of_study,
            start_year: value.start_year,
            end_year: value.end_year,
            grade: value.grade,
            description: value.description,
            profile_id: value.profile_id.to_string(),
        }
    }
}

/// `profile_id` is taken from the bearer token, never from the body
#[derive(Object, Deserialize)]
pub struct EducationCreateRequest {
    pub institution: String,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub grade: Option<String>,
    pub description: Option<String>,
}

impl From<EducationCreateRequest> for NewEducation {
    fn from(value: EducationCreateRequest) -> Self {
        Self {
            institution: value.institution,
            degree: value.degree,
            field_of_study: value.field_of_study,
            start_year: value.start_year,
            end_year: value.end_year,
            grade: value.grade,
            description: value.description,
        }
    }
}

#[derive(Object, Deserialize)]
pub struct EducationUpdateRequest {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub grade: Option<String>,
    pub description: Option<String>,
}

impl From<EducationUpdateRequest> for EducationPatch {
    fn from(value: EducationUpdateRequest) -> Self {
        Self {
            institution: value.institution,
            degree: value.degree,
            field_of_study: value.field_of_study,
            start_year: value.start_year,
            end_year: value.end_year,
            grade: value.grade,
            description: value.description,
        }
    }
}

#[derive(ApiResponse)]
pub enum EducationListResponses {
    #[oai(status = 200)]
    Ok(Json<Vec<EducationResponse>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum EducationDetailResponses {
    #[oai(status = 200)]
    Ok(Json<EducationResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum EducationCreateResponses {
    #[oai(status = 201)]
    Created(Json<EducationResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum EducationUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<EducationResponse>),

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
pub enum EducationDeleteResponses {
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
