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
        education::{
            create_education, delete_education, get_education_by_id, list_education,
            update_education,
        },
        profile::get_profile_by_id,
    },
    schema::{
        common::{
            BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        },
        education::{
            EducationCreateRequest, EducationCreateResponses, EducationDeleteResponses,
            EducationDetailResponses, EducationListResponses, EducationResponse,
            EducationUpdateRequest, EducationUpdateResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiEducationTags {
    Education,
}

pub struct ApiEducation;

#[OpenApi]
impl ApiEducation {
    #[oai(path = "/education", method = "get", tag = "ApiEducationTags::Education")]
    async fn list_education_api(
        &self,
        Query(user_id): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
    ) -> EducationListResponses {
        let profile_id = match parse_optional_uuid(user_id) {
            Ok(val) => val,
            Err(_) => {
                return EducationListResponses::BadRequest(Json(BadRequestResponse {
                    message: "user_id must be a valid id".to_string(),
                }))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return EducationListResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.education",
                        "list_education_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let data = match list_education(&mut tx, profile_id).await {
            Ok(val) => val,
            Err(err) => {
                return EducationListResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.education",
                        "list_education_api",
                        "list education",
                        &err.to_string(),
                    ),
                ));
            }
        };
        EducationListResponses::Ok(Json(
            data.into_iter().map(EducationResponse::from).collect(),
        ))
    }

    #[oai(path = "/education/:id", method = "get", tag = "ApiEducationTags::Education")]
    async fn get_education_api(
        &self,
        Path(id): Path<String>,
        state: Data<&Arc<AppState>>,
    ) -> EducationDetailResponses {
        let id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return EducationDetailResponses::NotFound(Json(NotFoundResponse::new(
                    "Education",
                )))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return EducationDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.education",
                        "get_education_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        match get_education_by_id(&mut tx, &id).await {
            Ok(Some(val)) => EducationDetailResponses::Ok(Json(EducationResponse::from(val))),
            Ok(None) => {
                EducationDetailResponses::NotFound(Json(NotFoundResponse::new("Education")))
            }
            Err(err) => EducationDetailResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.education",
                    "get_education_api",
                    "get education by id",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(path = "/education", method = "post", tag = "ApiEducationTags::Education")]
    async fn create_education_api(
        &self,
        json: Json<EducationCreateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> EducationCreateResponses {
        let claims = auth.0;

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return EducationCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.education",
                        "create_education_api",
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
                return EducationCreateResponses::NotFound(Json(NotFoundResponse::new("Profile")))
            }
            Err(err) => {
                return EducationCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.education",
                        "create_education_api",
                        "get profile by id",
                        &err.to_string(),
                    ),
                ));
            }
        }
        let education = match create_education(&mut tx, None, claims.profile_id, json.0.into())
            .await
        {
            Ok(val) => val,
            Err(err) => {
                return EducationCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.education",
                        "create_education_api",
                        "create education",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // Commit db transaction
        if let Err(err) = tx.commit().await {
            return EducationCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.education",
                    "create_education_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        EducationCreateResponses::Created(Json(EducationResponse::from(education)))
    }

    #[oai(path = "/education/:id", method = "put", tag = "ApiEducationTags::Education")]
    async fn update_education_api(
        &self,
        Path(id): Path<String>,
        json: Json<EducationUpdateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> EducationUpdateResponses {
        let claims = auth.0;
        let id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return EducationUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "Education",
                )))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return EducationUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.education",
                        "update_education_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let mut education = match get_education_by_id(&mut tx, &id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return EducationUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "Education",
                )))
            }
            Err(err) => {
                return EducationUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.education",
                        "update_education_api",
                        "get education by id",
                        &err.to_string(),
                    ),
                ));
            }
        };
        if !authorize_record(&claims, &education).is_allowed() {
            return EducationUpdateResponses::Forbidden(Json(ForbiddenResponse::new("update")));
        }
        if let Err(err) = update_education(&mut tx, &mut education, json.0.into()).await {
            return EducationUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.education",
                    "update_education_api",
                    "update education",
                    &err.to_string(),
                ),
            ));
        }

        // Commit db transaction
        if let Err(err) = tx.commit().await {
            return EducationUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.education",
                    "update_education_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        EducationUpdateResponses::Ok(Json(EducationResponse::from(education)))
    }

    #[oai(path = "/education/:id", method = "delete", tag = "ApiEducationTags::Education")]
    async fn delete_education_api(
        &self,
        Path(id): Path<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> EducationDeleteResponses {
        let claims = auth.0;
        let id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return EducationDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "Education",
                )))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return EducationDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.education",
                        "delete_education_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let education = match get_education_by_id(&mut tx, &id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return EducationDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "Education",
                )))
            }
            Err(err) => {
                return EducationDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.education",
                        "delete_education_api",
                        "get education by id",
                        &err.to_string(),
                    ),
                ));
            }
        };
        if !authorize_record(&claims, &education).is_allowed() {
            return EducationDeleteResponses::Forbidden(Json(ForbiddenResponse::new("delete")));
        }
        if let Err(err) = delete_education(&mut tx, &education.id).await {
            return EducationDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.education",
                    "delete_education_api",
                    "delete education",
                    &err.to_string(),
                ),
            ));
        }

        // Commit db transaction
        if let Err(err) = tx.commit().await {
            return EducationDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.education",
                    "delete_education_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        EducationDeleteResponses::NoContent
    }
}
