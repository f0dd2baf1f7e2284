use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use super::common::{
    BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
    UnauthorizedResponse,
};
use crate::model::project::{NewProject, Project, ProjectPatch};

#[derive(Object, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ProjectResponse {
    pub id: String,
    pub project_name: String,
    pub techstack: Option<String>,
    pub description: Option<String>,
    pub project_url: Option<String>,
    pub profile_id: String,
}

impl From<Project> for ProjectResponse {
    fn from(value: Project) -> Self {
        Self {
            id: value.id.to_string(),
            project_name: value.project_name,
            techstack: value.techstack,
            description: value.description,
            project_url: value.project_url,
            profile_id: value.profile_id.to_string(),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct ProjectCreateRequest {
    pub project_name: String,
    pub techstack: Option<String>,
    pub description: Option<String>,
    pub project_url: Option<String>,
}

impl From<ProjectCreateRequest> for NewProject {
    fn from(value: ProjectCreateRequest) -> Self {
        Self {
            project_name: value.project_name,
            techstack: value.techstack,
            description: value.description,
            project_url: value.project_url,
        }
    }
}

#[derive(Object, Deserialize)]
pub struct ProjectUpdateRequest {
    pub project_name: Option<String>,
    pub techstack: Option<String>,
    pub description: Option<String>,
    pub project_url: Option<String>,
}

impl From<ProjectUpdateRequest> for ProjectPatch {
    fn from(value: ProjectUpdateRequest) -> Self {
        Self {
            project_name: value.project_name,
            techstack: value.techstack,
            description: value.description,
            project_url: value.project_url,
        }
    }
}

#[derive(ApiResponse)]
pub enum ProjectListResponses {
    #[oai(status = 200)]
    Ok(Json<Vec<ProjectResponse>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum ProjectDetailResponses {
    #[oai(status = 200)]
    Ok(Json<ProjectResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum ProjectCreateResponses {
    #[oai(status = 201)]
    Created(Json<ProjectResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum ProjectUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<ProjectResponse>),

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
pub enum ProjectDeleteResponses {
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
