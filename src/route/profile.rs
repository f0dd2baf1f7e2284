use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use uuid::Uuid;

use crate::{
    core::{guard::authorize_record, security::BearerAuthorization, sqlx_utils::is_unique_violation},
    model::{dsa_topic::DsaTopicFilter, profile::ProfilePatch, project::ProjectFilter},
    repository::{
        certificate::list_certificate,
        dsa_topic::list_dsa_topic,
        education::list_education,
        profile::{
            create_profile, delete_profile, get_profile_by_email, get_profile_by_id,
            update_profile,
        },
        project::list_project,
    },
    schema::{
        common::{
            BadRequestResponse, ConflictResponse, ForbiddenResponse, InternalServerErrorResponse,
            NotFoundResponse,
        },
        profile::{
            ProfileCreateRequest, ProfileCreateResponses, ProfileDeleteResponses,
            ProfileDetailResponse, ProfileDetailResponses, ProfileResponse, ProfileUpdateRequest,
            ProfileUpdateResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiProfileTags {
    Profile,
}

fn email_conflict() -> ConflictResponse {
    ConflictResponse {
        message: "Email already registered".to_string(),
    }
}

pub struct ApiProfile;

#[OpenApi]
impl ApiProfile {
    #[oai(path = "/users", method = "post", tag = "ApiProfileTags::Profile")]
    async fn create_profile_api(
        &self,
        json: Json<ProfileCreateRequest>,
        state: Data<&Arc<AppState>>,
    ) -> ProfileCreateResponses {
        if json.full_name.trim().is_empty() || json.email.trim().is_empty() {
            return ProfileCreateResponses::BadRequest(Json(BadRequestResponse {
                message: "full_name and email are required".to_string(),
            }));
        }

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ProfileCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "create_profile_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        match get_profile_by_email(&mut tx, &json.email).await {
            Ok(None) => {}
            Ok(Some(_)) => return ProfileCreateResponses::Conflict(Json(email_conflict())),
            Err(err) => {
                return ProfileCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "create_profile_api",
                        "get profile by email",
                        &err.to_string(),
                    ),
                ));
            }
        }
        let profile = match create_profile(&mut tx, None, json.0.into()).await {
            Ok(val) => val,
            Err(err) if is_unique_violation(&err) => {
                return ProfileCreateResponses::Conflict(Json(email_conflict()))
            }
            Err(err) => {
                return ProfileCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "create_profile_api",
                        "create profile",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // Commit db transaction
        if let Err(err) = tx.commit().await {
            return ProfileCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.profile",
                    "create_profile_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        ProfileCreateResponses::Created(Json(ProfileResponse::from(profile)))
    }

    #[oai(path = "/users/:id", method = "get", tag = "ApiProfileTags::Profile")]
    async fn get_profile_api(
        &self,
        Path(id): Path<String>,
        state: Data<&Arc<AppState>>,
    ) -> ProfileDetailResponses {
        let id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => return ProfileDetailResponses::NotFound(Json(NotFoundResponse::new("User"))),
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ProfileDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "get_profile_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let profile = match get_profile_by_id(&mut tx, &id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return ProfileDetailResponses::NotFound(Json(NotFoundResponse::new("User")))
            }
            Err(err) => {
                return ProfileDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "get_profile_api",
                        "get profile by id",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let education = match list_education(&mut tx, Some(id)).await {
            Ok(val) => val,
            Err(err) => {
                return ProfileDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "get_profile_api",
                        "list education",
                        &err.to_string(),
                    ),
                ));
            }
        };
        let project_filter = ProjectFilter {
            profile_id: Some(id),
            ..Default::default()
        };
        let projects = match list_project(&mut tx, &project_filter).await {
            Ok(val) => val,
            Err(err) => {
                return ProfileDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "get_profile_api",
                        "list project",
                        &err.to_string(),
                    ),
                ));
            }
        };
        let dsa_topic_filter = DsaTopicFilter {
            profile_id: Some(id),
            ..Default::default()
        };
        let dsa_topics = match list_dsa_topic(&mut tx, &dsa_topic_filter).await {
            Ok(val) => val,
            Err(err) => {
                return ProfileDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "get_profile_api",
                        "list dsa topic",
                        &err.to_string(),
                    ),
                ));
            }
        };
        let certificates = match list_certificate(&mut tx, Some(id)).await {
            Ok(val) => val,
            Err(err) => {
                return ProfileDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "get_profile_api",
                        "list certificate",
                        &err.to_string(),
                    ),
                ));
            }
        };

        ProfileDetailResponses::Ok(Json(ProfileDetailResponse::new(
            profile,
            education,
            projects,
            dsa_topics,
            certificates,
        )))
    }

    #[oai(path = "/users/:id", method = "put", tag = "ApiProfileTags::Profile")]
    async fn update_profile_api(
        &self,
        Path(id): Path<String>,
        json: Json<ProfileUpdateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ProfileUpdateResponses {
        let claims = auth.0;
        let id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => return ProfileUpdateResponses::NotFound(Json(NotFoundResponse::new("User"))),
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ProfileUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "update_profile_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let mut profile = match get_profile_by_id(&mut tx, &id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return ProfileUpdateResponses::NotFound(Json(NotFoundResponse::new("User")))
            }
            Err(err) => {
                return ProfileUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "update_profile_api",
                        "get profile by id",
                        &err.to_string(),
                    ),
                ));
            }
        };
        if !authorize_record(&claims, &profile).is_allowed() {
            return ProfileUpdateResponses::Forbidden(Json(ForbiddenResponse::new("update")));
        }

        let patch: ProfilePatch = json.0.into();
        if let Some(email) = patch.email.as_deref().filter(|x| *x != profile.email) {
            match get_profile_by_email(&mut tx, email).await {
                Ok(None) => {}
                Ok(Some(_)) => return ProfileUpdateResponses::Conflict(Json(email_conflict())),
                Err(err) => {
                    return ProfileUpdateResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.profile",
                            "update_profile_api",
                            "get profile by email",
                            &err.to_string(),
                        ),
                    ));
                }
            }
        }
        match update_profile(&mut tx, &mut profile, patch).await {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                return ProfileUpdateResponses::Conflict(Json(email_conflict()))
            }
            Err(err) => {
                return ProfileUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "update_profile_api",
                        "update profile",
                        &err.to_string(),
                    ),
                ));
            }
        }

        // Commit db transaction
        if let Err(err) = tx.commit().await {
            return ProfileUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.profile",
                    "update_profile_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        ProfileUpdateResponses::Ok(Json(ProfileResponse::from(profile)))
    }

    /// Child records go with the profile, linked credentials are kept unlinked
    #[oai(path = "/users/:id", method = "delete", tag = "ApiProfileTags::Profile")]
    async fn delete_profile_api(
        &self,
        Path(id): Path<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ProfileDeleteResponses {
        let claims = auth.0;
        let id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => return ProfileDeleteResponses::NotFound(Json(NotFoundResponse::new("User"))),
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ProfileDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "delete_profile_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let profile = match get_profile_by_id(&mut tx, &id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return ProfileDeleteResponses::NotFound(Json(NotFoundResponse::new("User")))
            }
            Err(err) => {
                return ProfileDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.profile",
                        "delete_profile_api",
                        "get profile by id",
                        &err.to_string(),
                    ),
                ));
            }
        };
        if !authorize_record(&claims, &profile).is_allowed() {
            return ProfileDeleteResponses::Forbidden(Json(ForbiddenResponse::new("delete")));
        }
        if let Err(err) = delete_profile(&mut tx, &profile.id).await {
            return ProfileDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.profile",
                    "delete_profile_api",
                    "delete profile",
                    &err.to_string(),
                ),
            ));
        }

        // Commit db transaction
        if let Err(err) = tx.commit().await {
            return ProfileDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.profile",
                    "delete_profile_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        tracing::info!("profile {} deleted by {}", profile.id, claims.sub);
        ProfileDeleteResponses::NoContent
    }
}
