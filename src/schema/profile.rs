use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use super::{
    certificate::CertificateResponse,
    common::{
        BadRequestResponse, ConflictResponse, ForbiddenResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
    dsa_topic::DsaTopicResponse,
    education::EducationResponse,
    project::ProjectResponse,
};
use crate::model::{
    certificate::Certificate,
    dsa_topic::DsaTopic,
    education::Education,
    profile::{NewProfile, Profile, ProfilePatch},
    project::Project,
};

#[derive(Object, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ProfileResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub leetcode: Option<String>,
    pub bio: Option<String>,
}

impl From<Profile> for ProfileResponse {
    fn from(value: Profile) -> Self {
        Self {
            id: value.id.to_string(),
            full_name: value.full_name,
            email: value.email,
            phone: value.phone,
            location: value.location,
            linkedin: value.linkedin,
            github: value.github,
            leetcode: value.leetcode,
            bio: value.bio,
        }
    }
}

/// Profile with every child collection embedded
#[derive(Object, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ProfileDetailResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub leetcode: Option<String>,
    pub bio: Option<String>,
    pub education: Vec<EducationResponse>,
    pub projects: Vec<ProjectResponse>,
    pub dsa_topics: Vec<DsaTopicResponse>,
    pub certificates: Vec<CertificateResponse>,
}

impl ProfileDetailResponse {
    pub fn new(
        profile: Profile,
        education: Vec<Education>,
        projects: Vec<Project>,
        dsa_topics: Vec<DsaTopic>,
        certificates: Vec<Certificate>,
    ) -> Self {
        Self {
            id: profile.id.to_string(),
            full_name: profile.full_name,
            email: profile.email,
            phone: profile.phone,
            location: profile.location,
            linkedin: profile.linkedin,
            github: profile.github,
            leetcode: profile.leetcode,
            bio: profile.bio,
            education: education.into_iter().map(EducationResponse::from).collect(),
            projects: projects.into_iter().map(ProjectResponse::from).collect(),
            dsa_topics: dsa_topics.into_iter().map(DsaTopicResponse::from).collect(),
            certificates: certificates
                .into_iter()
                .map(CertificateResponse::from)
                .collect(),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct ProfileCreateRequest {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub leetcode: Option<String>,
    pub bio: Option<String>,
}

impl From<ProfileCreateRequest> for NewProfile {
    fn from(value: ProfileCreateRequest) -> Self {
        Self {
            full_name: value.full_name,
            email: value.email,
            phone: value.phone,
            location: value.location,
            linkedin: value.linkedin,
            github: value.github,
            leetcode: value.leetcode,
            bio: value.bio,
        }
    }
}

#[derive(Object, Deserialize)]
pub struct ProfileUpdateRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub leetcode: Option<String>,
    pub bio: Option<String>,
}

impl From<ProfileUpdateRequest> for ProfilePatch {
    fn from(value: ProfileUpdateRequest) -> Self {
        Self {
            full_name: value.full_name,
            email: value.email,
            phone: value.phone,
            location: value.location,
            linkedin: value.linkedin,
            github: value.github,
            leetcode: value.leetcode,
            bio: value.bio,
        }
    }
}

#[derive(ApiResponse)]
pub enum ProfileCreateResponses {
    #[oai(status = 201)]
    Created(Json<ProfileResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 409)]
    Conflict(Json<ConflictResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum ProfileDetailResponses {
    #[oai(status = 200)]
    Ok(Json<ProfileDetailResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum ProfileUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<ProfileResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 409)]
    Conflict(Json<ConflictResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum ProfileDeleteResponses {
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
