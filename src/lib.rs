use std::sync::Arc;

use poem::{
    middleware::{AddData, AddDataEndpoint, Cors, CorsEndpoint, Tracing, TracingEndpoint},
    EndpointExt, Route,
};
use poem_openapi::OpenApiService;
use route::{
    auth::ApiAuth, certificate::ApiCertificate, dsa_topic::ApiDsaTopic, education::ApiEducation,
    health::ApiHealth, profile::ApiProfile, project::ApiProject, search::ApiSearch,
};
use settings::Config;
use sqlx::{Pool, Postgres};

pub mod cli;
pub mod core;
pub mod factory;
pub mod model;
pub mod repository;
pub mod route;
pub mod schema;
pub mod settings;

pub struct AppState {
    pub db: Pool<Postgres>,
    pub config: Config,
}

pub fn init_openapi_route(
    app_state: Arc<AppState>,
    config: &Config,
) -> TracingEndpoint<CorsEndpoint<AddDataEndpoint<Route, Arc<AppState>>>> {
    let prefix = config.prefix.clone().unwrap_or("/".to_string());
    let openapi_route = OpenApiService::new(
        (
            ApiAuth,
            ApiProfile,
            ApiEducation,
            ApiProject,
            ApiDsaTopic,
            ApiCertificate,
            ApiSearch,
            ApiHealth,
        ),
        "Portfolio",
        "1.0",
    )
    .server(prefix.clone());
    let openapi_json_endpoint = openapi_route.spec_endpoint();
    let ui = openapi_route.swagger_ui();
    Route::new()
        .nest(prefix, openapi_route)
        .nest("/docs", ui)
        .at("openapi.json", openapi_json_endpoint)
        .with(AddData::new(app_state))
        .with(Cors::new())
        .with(Tracing)
}
