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
    model::project::ProjectFilter,
    repository::{
        project::{
            create_project, delete_project, get_project_by_id, list_project,
            update_project,
        },
        profile::get_profile_by_id,
    },
    schema::{
        common::{
            BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        },
        project::{
            ProjectCreateRequest, ProjectCreateResponses, ProjectDeleteResponses,
            ProjectDetailResponses, ProjectListResponses, ProjectResponse,
            ProjectUpdateRequest, ProjectUpdateResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiProjectTags {
    Project,
}

pub struct ApiProject;

#[OpenApi]
impl ApiProject {
    #[oai(path = "/projects", method = "get", tag = "ApiProjectTags::Project")]
    async fn list_project_api(
        &self,
        Query(user_id): Query<Option<String>>,
        Query(techstack): Query<Option<String>>,
        Query(sorted): Query<Option<bool>>,
        state: Data<&Arc<AppState>>,
    ) -> ProjectListResponses {
        let profile_id = match parse_optional_uuid(user_id) {
            Ok(val) => val,
            Err(_) => {
                return ProjectListResponses::BadRequest(Json(BadRequestResponse {
                    message: "user_id must be a valid id".to_string(),
                }))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ProjectListResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.project",
                        "list_project_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let filter = ProjectFilter {
            profile_id,
            techstack,
            sorted: sorted.unwrap_or(false),
        };
        let data = match list_project(&mut tx, &filter).await {
            Ok(val) => val,
            Err(err) => {
                return ProjectListResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.project",
                        "list_project_api",
                        "list project",
                        &err.to_string(),
                    ),
                ));
            }
        };
        ProjectListResponses::Ok(Json(
            data.into_iter().map(ProjectResponse::from).collect(),
        ))
    }

    #[oai(path = "/projects/:id", method = "get", tag = "ApiProjectTags::Project")]
    async fn get_project_api(
        &self,
        Path(id): Path<String>,
        state: Data<&Arc<AppState>>,
    ) -> ProjectDetailResponses {
        let id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return ProjectDetailResponses::NotFound(Json(NotFoundResponse::new(
                    "Project",
                )))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ProjectDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.project",
                        "get_project_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        match get_project_by_id(&mut tx, &id).await {
            Ok(Some(val)) => ProjectDetailResponses::Ok(Json(ProjectResponse::from(val))),
            Ok(None) => {
                ProjectDetailResponses::NotFound(Json(NotFoundResponse::new("Project")))
            }
            Err(err) => ProjectDetailResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.project",
                    "get_project_api",
                    "get project by id",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(path = "/projects", method = "post", tag = "ApiProjectTags::Project")]
    async fn create_project_api(
        &self,
        json: Json<ProjectCreateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ProjectCreateResponses {
        let claims = auth.0;

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ProjectCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.project",
                        "create_project_api",
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
                return ProjectCreateResponses::NotFound(Json(NotFoundResponse::new("Profile")))
            }
            Err(err) => {
                return ProjectCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.project",
                        "create_project_api",
                        "get profile by id",
                        &err.to_string(),
                    ),
                ));
            }
        }
        let project = match create_project(&mut tx, None, claims.profile_id, json.0.into())
            .await
        {
            Ok(val) => val,
            Err(err) => {
                return ProjectCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.project",
                        "create_project_api",
                        "create project",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // Commit db transaction
        if let Err(err) = tx.commit().await {
            return ProjectCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.project",
                    "create_project_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        ProjectCreateResponses::Created(Json(ProjectResponse::from(project)))
    }

    #[oai(path = "/projects/:id", method = "put", tag = "ApiProjectTags::Project")]
    async fn update_project_api(
        &self,
        Path(id): Path<String>,
        json: Json<ProjectUpdateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ProjectUpdateResponses {
        let claims = auth.0;
        let id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return ProjectUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "Project",
                )))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ProjectUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.project",
                        "update_project_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let mut project = match get_project_by_id(&mut tx, &id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return ProjectUpdateResponses::NotFound(Json(NotFoundResponse::new(
                    "Project",
                )))
            }
            Err(err) => {
                return ProjectUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.project",
                        "update_project_api",
                        "get project by id",
                        &err.to_string(),
                    ),
                ));
            }
        };
        if !authorize_record(&claims, &project).is_allowed() {
            return ProjectUpdateResponses::Forbidden(Json(ForbiddenResponse::new("update")));
        }
        if let Err(err) = update_project(&mut tx, &mut project, json.0.into()).await {
            return ProjectUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.project",
                    "update_project_api",
                    "update project",
                    &err.to_string(),
                ),
            ));
        }

        // Commit db transaction
        if let Err(err) = tx.commit().await {
            return ProjectUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.project",
                    "update_project_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        ProjectUpdateResponses::Ok(Json(ProjectResponse::from(project)))
    }

    #[oai(path = "/projects/:id", method = "delete", tag = "ApiProjectTags::Project")]
    async fn delete_project_api(
        &self,
        Path(id): Path<String>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> ProjectDeleteResponses {
        let claims = auth.0;
        let id = match Uuid::parse_str(&id) {
            Ok(val) => val,
            Err(_) => {
                return ProjectDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "Project",
                )))
            }
        };

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ProjectDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.project",
                        "delete_project_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let project = match get_project_by_id(&mut tx, &id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return ProjectDeleteResponses::NotFound(Json(NotFoundResponse::new(
                    "Project",
                )))
            }
            Err(err) => {
                return ProjectDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.project",
                        "delete_project_api",
                        "get project by id",
                        &err.to_string(),
                    ),
                ));
            }
        };
        if !authorize_record(&claims, &project).is_allowed() {
            return ProjectDeleteResponses::Forbidden(Json(ForbiddenResponse::new("delete")));
        }
        if let Err(err) = delete_project(&mut tx, &project.id).await {
            return ProjectDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.project",
                    "delete_project_api",
                    "delete project",
                    &err.to_string(),
                ),
            ));
        }

        // Commit db transaction
        if let Err(err) = tx.commit().await {
            return ProjectDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.project",
                    "delete_project_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        ProjectDeleteResponses::NoContent
    }
}
