use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};

use crate::{
    repository::search::{is_valid_query, search_dsa_topic, search_project, MIN_QUERY_LEN},
    schema::{
        common::{BadRequestResponse, InternalServerErrorResponse},
        dsa_topic::DsaTopicResponse,
        project::ProjectResponse,
        search::{SearchResponse, SearchResponses},
    },
    AppState,
};

#[derive(Tags)]
enum ApiSearchTags {
    Search,
}

pub struct ApiSearch;

#[OpenApi]
impl ApiSearch {
    /// Case-insensitive substring search over projects and DSA topics
    #[oai(path = "/search", method = "get", tag = "ApiSearchTags::Search")]
    async fn search_api(
        &self,
        Query(q): Query<Option<String>>,
        state: Data<&Arc<AppState>>,
    ) -> SearchResponses {
        let q = q.unwrap_or_default();
        if !is_valid_query(&q) {
            return SearchResponses::BadRequest(Json(BadRequestResponse {
                message: format!(
                    "Search query must be at least {} characters",
                    MIN_QUERY_LEN
                ),
            }));
        }

        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return SearchResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.search",
                        "search_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let projects = match search_project(&mut tx, &q).await {
            Ok(val) => val,
            Err(err) => {
                return SearchResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.search",
                        "search_api",
                        "search project",
                        &err.to_string(),
                    ),
                ));
            }
        };
        let dsa_topics = match search_dsa_topic(&mut tx, &q).await {
            Ok(val) => val,
            Err(err) => {
                return SearchResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.search",
                        "search_api",
                        "search dsa topic",
                        &err.to_string(),
                    ),
                ));
            }
        };

        SearchResponses::Ok(Json(SearchResponse {
            query: q,
            projects: projects.into_iter().map(ProjectResponse::from).collect(),
            dsa_topics: dsa_topics.into_iter().map(DsaTopicResponse::from).collect(),
        }))
    }
}
