use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use crate::{
    core::{security::IssuedToken, utils::timestamp_to_string},
    schema::common::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
};

#[derive(Object, Deserialize)]
pub struct CredentialRequest {
    pub username: String,
    pub password: String,
}

#[derive(Object, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub exp: String,
    pub exp_in: i64,
    pub user_id: String,
    pub profile_id: String,
}

impl TokenResponse {
    pub fn new(issued: IssuedToken, now: i64) -> Self {
        Self {
            access_token: issued.token,
            token_type: "bearer".to_string(),
            exp: timestamp_to_string(issued.claims.exp),
            exp_in: issued.claims.exp - now,
            user_id: issued.claims.user_id.to_string(),
            profile_id: issued.claims.profile_id.to_string(),
        }
    }
}

#[derive(ApiResponse)]
pub enum RegisterResponses {
    #[oai(status = 201)]
    Created(Json<TokenResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 409)]
    Conflict(Json<ConflictResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum LoginResponses {
    #[oai(status = 200)]
    Ok(Json<TokenResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize)]
pub struct MeResponse {
    pub id: String,
    pub username: String,
    pub profile_id: Option<String>,
}

#[derive(ApiResponse)]
pub enum MeResponses {
    #[oai(status = 200)]
    Ok(Json<MeResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}
