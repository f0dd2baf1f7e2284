use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use super::common::{
    BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
    UnauthorizedResponse,
};
use crate::model::certificate::{Certificate, CertificatePatch, NewCertificate};

#[derive(Object, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct CertificateResponse {
    pub id: String,
    pub title: String,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub credential_url: Option<String>,
    pub description: Option<String>,
    pub profile_id: String,
}

impl From<Certificate> for CertificateResponse {
    fn from(value: Certificate) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            issuer: value.issuer,
            issue_date: value.issue_date,
            credential_url: value.credential_url,
            description: value.description,
            profile_id: value.profile_id.to_string(),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct CertificateCreateRequest {
    pub title: String,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub credential_url: Option<String>,
    pub description: Option<String>,
}

impl From<CertificateCreateRequest> for NewCertificate {
    fn from(value: CertificateCreateRequest) -> Self {
        Self {
            title: value.title,
            issuer: value.issuer,
            issue_date: value.issue_date,
            credential_url: value.credential_url,
            description: value.description,
        }
    }
}

#[derive(Object, Deserialize)]
pub struct CertificateUpdateRequest {
    pub title: Option<String>,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub credential_url: Option<String>,
    pub description: Option<String>,
}

impl From<CertificateUpdateRequest> for CertificatePatch {
    fn from(value: CertificateUpdateRequest) -> Self {
        Self {
            title: value.title,
            issuer: value.issuer,
            issue_date: value.issue_date,
            credential_url: value.credential_url,
            description: value.description,
        }
    }
}

#[derive(ApiResponse)]
pub enum CertificateListResponses {
    #[oai(status = 200)]
    Ok(Json<Vec<CertificateResponse>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum CertificateDetailResponses {
    #[oai(status = 200)]
    Ok(Json<CertificateResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum CertificateCreateResponses {
    #[oai(status = 201)]
    Created(Json<CertificateResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum CertificateUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<CertificateResponse>),

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
pub enum CertificateDeleteResponses {
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
