use std::sync::Arc;

use chrono::Utc;
use poem::web::Data;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::{
    core::{
        credential_store::{login, register, CredentialError},
        security::BearerAuthorization,
    },
    repository::credential::get_credential_by_id,
    schema::{
        auth::{
            CredentialRequest, LoginResponses, MeResponse, MeResponses, RegisterResponses,
            TokenResponse,
        },
        common::{
            BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
            UnauthorizedResponse,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiAuthTags {
    Auth,
}

pub struct ApiAuth;

#[OpenApi]
impl ApiAuth {
    #[oai(path = "/auth/register", method = "post", tag = "ApiAuthTags::Auth")]
    async fn auth_register(
        &self,
        json: Json<CredentialRequest>,
        state: Data<&Arc<AppState>>,
    ) -> RegisterResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return RegisterResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_register",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let registered = match register(&mut tx, &state.config, &json.username, &json.password).await
        {
            Ok(val) => val,
            Err(CredentialError::BadRequest(message)) => {
                return RegisterResponses::BadRequest(Json(BadRequestResponse { message }));
            }
            Err(CredentialError::Conflict(message)) => {
                return RegisterResponses::Conflict(Json(ConflictResponse { message }));
            }
            Err(err) => {
                return RegisterResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_register",
                        "register credential",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // Commit db transaction
        if let Err(err) = tx.commit().await {
            return RegisterResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                "route.auth",
                "auth_register",
                "commit transaction",
                &err.to_string(),
            )));
        }

        RegisterResponses::Created(Json(TokenResponse::new(
            registered.token,
            Utc::now().timestamp(),
        )))
    }

    #[oai(path = "/auth/login", method = "post", tag = "ApiAuthTags::Auth")]
    async fn auth_login(
        &self,
        json: Json<CredentialRequest>,
        state: Data<&Arc<AppState>>,
    ) -> LoginResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return LoginResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_login",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let logged_in = match login(&mut tx, &state.config, &json.username, &json.password).await {
            Ok(val) => val,
            Err(CredentialError::Unauthorized) => {
                return LoginResponses::Unauthorized(Json(UnauthorizedResponse {
                    message: "Invalid username or password".to_string(),
                }));
            }
            Err(err) => {
                return LoginResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.auth",
                        "auth_login",
                        "login credential",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // Commit db transaction, login may have provisioned a profile
        if let Err(err) = tx.commit().await {
            return LoginResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                "route.auth",
                "auth_login",
                "commit transaction",
                &err.to_string(),
            )));
        }

        LoginResponses::Ok(Json(TokenResponse::new(
            logged_in.token,
            Utc::now().timestamp(),
        )))
    }

    #[oai(path = "/auth/me", method = "get", tag = "ApiAuthTags::Auth")]
    async fn auth_me(&self, state: Data<&Arc<AppState>>, auth: BearerAuthorization) -> MeResponses {
        let claims = auth.0;

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return MeResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                    "route.auth",
                    "auth_me",
                    "begin transaction",
                    &err.to_string(),
                )));
            }
        };

        let credential = match get_credential_by_id(&mut tx, &claims.user_id).await {
            Ok(Some(val)) => val,
            Ok(None) => return MeResponses::NotFound(Json(NotFoundResponse::new("User"))),
            Err(err) => {
                return MeResponses::InternalServerError(Json(InternalServerErrorResponse::new(
                    "route.auth",
                    "auth_me",
                    "get credential by id",
                    &err.to_string(),
                )));
            }
        };

        MeResponses::Ok(Json(MeResponse {
            id: credential.id.to_string(),
            username: credential.username,
            profile_id: Some(
                credential
                    .profile_id
                    .unwrap_or(claims.profile_id)
                    .to_string(),
            ),
        }))
    }
}
