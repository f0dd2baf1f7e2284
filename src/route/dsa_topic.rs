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
    model::dsa_topic::DsaTopicFilter,
    repository::{
        dsa_topic::{
            create_dsa_topic, delete_dsa_topic, get_dsa_topic_by_id, list_dsa_topic,
            update_dsa_topic,
        },
        profile::get_profile_by_id,
    },
    schema::{
        common::{
            BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        },
        dsa_topic::{
            DsaTopicCreateRequest, DsaTopicCreateResponses, DsaTopicDeleteResponses,
            DsaTopicDetailResponses, DsaTopicListResponses, DsaTopicResponse,
            DsaTopicUpdateRequest, DsaTopicUpdateResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiDsaTopicTags {
    DsaTopic,
}

pub struct ApiDsaTopic;

#[OpenApi]
impl ApiDsaTopic {
    #[oai(path = "/dsa", method = "get", tag = "ApiDsaTopicTags::DsaTopic")]
    async fn list_dsa_topic_api(
        &self,
        Query(user_id): Query<Option<String>>,
        Query(category): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
    ) -> DsaTopicListResponses {
        let profile_id = match parse_optional_uuid(user_id) {
            Ok(val) => val,
            Err(_) => {
                return DsaTopicListResponses::BadRequest(Json(BadRequestResponse {
                    message: "user_id must be a valid id".to_string(),
                }))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return DsaTopicListResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.dsa_topic",
                        "list_dsa_topic_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let filter = DsaTopicFilter {
            profile_id,
            category,
        };
        let data = match list_dsa_topic(&mut tx, &filter).await {
            Ok(val) => val,
            Err(err) => {
                return DsaTopicListResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.dsa_topic",
                        "list_dsa_topic_api",
                        "list dsa_topic",
                        &err.to_string(),
                    ),
                ));
            }
        };
        DsaTopicListResponses::Ok(Json(
            data.into_iter().map(DsaTopicResponse::from).collect(),
        ))
    }

    #[oai(path = "/dsa/:id", method = "get", tag = "ApiDsaTopicTags::DsaTopic")]
    async fn get_dsa_topic_api(
        &self,
        Path(id): Path<String>,
        state: Data<&Arc<AppState>>,
    ) -> DsaTopicDetailResponses {
        let id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return DsaTopicDetailResponses::NotFound(Json(NotFoundResponse::new(
                    "DSA topic",
                )))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return DsaTopicDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.dsa_topic",
                        "get_dsa_topic_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        match get_dsa_topic_by_id(&mut tx, &id).await {
            Ok(Some(val)) => DsaTopicDetailResponses::Ok(Json(DsaTopicResponse::from(val))),
            Ok(None) => {
                DsaTopicDetailResponses::NotFound(Json(NotFoundResponse::new("DSA topic")))
            }
            Err(err) => DsaTopicDetailResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.dsa_topic",
                    "get_dsa_topic_api",
                    "get dsa_topic by id",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(path = "/dsa", method = "post", tag = "ApiDsaTopicTags::DsaTopic")]
    async fn create_dsa_topic_api(
        &self,
        json: Json<DsaTopicCreateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> DsaTopicCreateResponses {
        let claims = auth.0;

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return DsaTopicCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.dsa_topic",
                        "create_dsa_topic_api",
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
                return DsaTopicCreateResponses::NotFound(Json(NotFoundResponse::new("Profile")))
            }
            Err(err) => {
                return DsaTopicCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.dsa_topic",
                        "create_dsa_topic_api",
                        "get profile by id",
                        &err.to_string(),
                    ),
                ));
            }
        }
        let dsa_topic = match create_dsa_topic(&mut tx, None, claims.profile_id, json.0.into())
            .await
        {
            Ok(val) => val,
            Err(err) => {
                return DsaTopicCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.dsa_topic",
                        "create_dsa_topic_api",
                        "create dsa_topic",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // Commit db transaction
        if let Err(err) = tx.commit().await {
            return DsaTopicCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.dsa_topic",
                    "create_dsa_topic_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        DsaTopicCreateResponses::Created(Json(DsaTopicResponse::from(dsa_topic)))
    }

    #[oai(path = "/dsa/:id", method = "put", tag = "ApiDsaTopicTags::DsaTopic")]
    async fn update_dsa_topic_api(
        &self,
        Path(id): Path<String>,
        json: Json<DsaTopicUpdateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> DsaTopicUpdateResponses {
        let claims = auth.0;
        let id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return DsaTopicUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "DSA topic",
                )))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return DsaTopicUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.dsa_topic",
                        "update_dsa_topic_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let mut dsa_topic = match get_dsa_topic_by_id(&mut tx, &id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return DsaTopicUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "DSA topic",
                )))
            }
            Err(err) => {
                return DsaTopicUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.dsa_topic",
                        "update_dsa_topic_api",
                        "get dsa_topic by id",
                        &err.to_string(),
                    ),
                ));
            }
        };
        if !authorize_record(&claims, &dsa_topic).is_allowed() {
            return DsaTopicUpdateResponses::Forbidden(Json(ForbiddenResponse::new("update")));
        }
        if let Err(err) = update_dsa_topic(&mut tx, &mut dsa_topic, json.0.into()).await {
            return DsaTopicUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.dsa_topic",
                    "update_dsa_topic_api",
                    "update dsa_topic",
                    &err.to_string(),
                ),
            ));
        }

        // Commit db transaction
        if let Err(err) = tx.commit().await {
            return DsaTopicUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.dsa_topic",
                    "update_dsa_topic_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        DsaTopicUpdateResponses::Ok(Json(DsaTopicResponse::from(dsa_topic)))
    }

    #[oai(path = "/dsa/:id", method = "delete", tag = "ApiDsaTopicTags::DsaTopic")]
    async fn delete_dsa_topic_api(
        &self,
        Path(id): Path<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> DsaTopicDeleteResponses {
        let claims = auth.0;
        let id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return DsaTopicDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "DSA topic",
                )))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return DsaTopicDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.dsa_topic",
                        "delete_dsa_topic_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let dsa_topic = match get_dsa_topic_by_id(&mut tx, &id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return DsaTopicDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "DSA topic",
                )))
            }
            Err(err) => {
                return DsaTopicDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.dsa_topic",
                        "delete_dsa_topic_api",
                        "get dsa_topic by id",
                        &err.to_string(),
                    ),
                ));
            }
        };
        if !authorize_record(&claims, &dsa_topic).is_allowed() {
            return DsaTopicDeleteResponses::Forbidden(Json(ForbiddenResponse::new("delete")));
        }
        if let Err(err) = delete_dsa_topic(&mut tx, &dsa_topic.id).await {
            return DsaTopicDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.dsa_topic",
                    "delete_dsa_topic_api",
                    "delete dsa_topic",
                    &err.to_string(),
                ),
            ));
        }

        // Commit db transaction
        if let Err(err) = tx.commit().await {
            return DsaTopicDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.dsa_topic",
                    "delete_dsa_topic_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        DsaTopicDeleteResponses::NoContent
    }
}
