use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};
use uuid::Uuid;

use crate::{
    core::{guard::authorize_record, security::BearerAuthorization, utils::parse_optional_uuid},
    repository::{
        certificate::{
            create_certificate, delete_certificate, get_certificate_by_id, list_certificate,
            update_certificate,
        },
        profile::get_profile_by_id,
    },
    schema::{
        common::{
            BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        },
        certificate::{
            CertificateCreateRequest, CertificateCreateResponses, CertificateDeleteResponses,
            CertificateDetailResponses, CertificateListResponses, CertificateResponse,
            CertificateUpdateRequest, CertificateUpdateResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiCertificateTags {
    Certificate,
}

pub struct ApiCertificate;

#[OpenApi]
impl ApiCertificate {
    #[oai(path = "/certificates", method = "get", tag = "ApiCertificateTags::Certificate")]
    async fn list_certificate_api(
        &self,
        Query(user_id): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
    ) -> CertificateListResponses {
        let profile_id = match parse_optional_uuid(user_id) {
            Ok(val) => val,
            Err(_) => {
                return CertificateListResponses::BadRequest(Json(BadRequestResponse {
                    message: "user_id must be a valid id".to_string(),
                }))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return CertificateListResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.certificate",
                        "list_certificate_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let data = match list_certificate(&mut tx, profile_id).await {
            Ok(val) => val,
            Err(err) => {
                return CertificateListResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.certificate",
                        "list_certificate_api",
                        "list certificate",
                        &err.to_string(),
                    ),
                ));
            }
        };
        CertificateListResponses::Ok(Json(
            data.into_iter().map(CertificateResponse::from).collect(),
        ))
    }

    #[oai(path = "/certificates/:id", method = "get", tag = "ApiCertificateTags::Certificate")]
    async fn get_certificate_api(
        &self,
        Path(id): Path<String>,
        state: Data<&Arc<AppState>>,
    ) -> CertificateDetailResponses {
        let id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return CertificateDetailResponses::NotFound(Json(NotFoundResponse::new(
                    "Certificate",
                )))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return CertificateDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.certificate",
                        "get_certificate_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        match get_certificate_by_id(&mut tx, &id).await {
            Ok(Some(val)) => CertificateDetailResponses::Ok(Json(CertificateResponse::from(val))),
            Ok(None) => {
                CertificateDetailResponses::NotFound(Json(NotFoundResponse::new("Certificate")))
            }
            Err(err) => CertificateDetailResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.certificate",
                    "get_certificate_api",
                    "get certificate by id",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(path = "/certificates", method = "post", tag = "ApiCertificateTags::Certificate")]
    async fn create_certificate_api(
        &self,
        json: Json<CertificateCreateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> CertificateCreateResponses {
        let claims = auth.0;

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return CertificateCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.certificate",
                        "create_certificate_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // owner comes from the token, never from the body
        match get_profile_by_id(&mut tx, &claims.profile_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return CertificateCreateResponses::NotFound(Json(NotFoundResponse::new("Profile")))
            }
            Err(err) => {
                return CertificateCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.certificate",
                        "create_certificate_api",
                        "get profile by id",
                        &err.to_string(),
                    ),
                ));
            }
        }
        let certificate = match create_certificate(&mut tx, None, claims.profile_id, json.0.into())
            .await
        {
            Ok(val) => val,
            Err(err) => {
                return CertificateCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.certificate",
                        "create_certificate_api",
                        "create certificate",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // Commit db transaction
        if let Err(err) = tx.commit().await {
            return CertificateCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.certificate",
                    "create_certificate_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        CertificateCreateResponses::Created(Json(CertificateResponse::from(certificate)))
    }

    #[oai(path = "/certificates/:id", method = "put", tag = "ApiCertificateTags::Certificate")]
    async fn update_certificate_api(
        &self,
        Path(id): Path<String>,
        json: Json<CertificateUpdateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> CertificateUpdateResponses {
        let claims = auth.0;
        let id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return CertificateUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "Certificate",
                )))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return CertificateUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.certificate",
                        "update_certificate_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let mut certificate = match get_certificate_by_id(&mut tx, &id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return CertificateUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "Certificate",
                )))
            }
            Err(err) => {
                return CertificateUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.certificate",
                        "update_certificate_api",
                        "get certificate by id",
                        &err.to_string(),
                    ),
                ));
            }
        };
        if !authorize_record(&claims, &certificate).is_allowed() {
            return CertificateUpdateResponses::Forbidden(Json(ForbiddenResponse::new("update")));
        }
        if let Err(err) = update_certificate(&mut tx, &mut certificate, json.0.into()).await {
            return CertificateUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.certificate",
                    "update_certificate_api",
                    "update certificate",
                    &err.to_string(),
                ),
            ));
        }

        // Commit db transaction
        if let Err(err) = tx.commit().await {
            return CertificateUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.certificate",
                    "update_certificate_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        CertificateUpdateResponses::Ok(Json(CertificateResponse::from(certificate)))
    }

    #[oai(path = "/certificates/:id", method = "delete", tag = "ApiCertificateTags::Certificate")]
    async fn delete_certificate_api(
        &self,
        Path(id): Path<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> CertificateDeleteResponses {
        let claims = auth.0;
        let id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return CertificateDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "Certificate",
                )))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return CertificateDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.certificate",
                        "delete_certificate_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let certificate = match get_certificate_by_id(&mut tx, &id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return CertificateDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "Certificate",
                )))
            }
            Err(err) => {
                return CertificateDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.certificate",
                        "delete_certificate_api",
                        "get certificate by id",
                        &err.to_string(),
                    ),
                ));
            }
        };
        if !authorize_record(&claims, &certificate).is_allowed() {
            return CertificateDeleteResponses::Forbidden(Json(ForbiddenResponse::new("delete")));
        }
        if let Err(err) = delete_certificate(&mut tx, &certificate.id).await {
            return CertificateDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.certificate",
                    "delete_certificate_api",
                    "delete certificate",
                    &err.to_string(),
                ),
            ));
        }

        // Commit db transaction
        if let Err(err) = tx.commit().await {
            return CertificateDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.certificate",
                    "delete_certificate_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        CertificateDeleteResponses::NoContent
    }
}
