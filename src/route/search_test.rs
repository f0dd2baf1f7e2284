use poem::{http::StatusCode, test::TestClient};
use sqlx::PgPool;

use crate::{
    core::test_utils::{offline_app_state, test_app_state},
    factory::{dsa_topic::DsaTopicFactory, profile::ProfileFactory, project::ProjectFactory},
    init_openapi_route,
    model::{dsa_topic::DsaTopic, project::Project},
};

#[sqlx::test]
#[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
async fn test_search_projects_and_topics(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let app_state = test_app_state(pool);
    let config = app_state.config.clone();
    let profile = ProfileFactory::new().generate_one(&app_state.db, ()).await?;
    let mut project_factory = ProjectFactory::<(&'static str, &'static str)>::new();
    project_factory.modified_one(|data, ext| Project {
        project_name: ext.0.to_string(),
        techstack: Some(ext.1.to_string()),
        description: Some("side project".to_string()),
        ..data.clone()
    });
    project_factory
        .generate_one(&app_state.db, profile.id, ("Graph Explorer", "Rust"))
        .await?;
    project_factory
        .generate_one(&app_state.db, profile.id, ("Blog", "Python"))
        .await?;
    let mut topic_factory = DsaTopicFactory::<&'static str>::new();
    topic_factory.modified_one(|data, ext| DsaTopic {
        topic_name: ext.to_string(),
        category: Some("Algorithm".to_string()),
        description: None,
        ..data.clone()
    });
    topic_factory
        .generate_one(&app_state.db, profile.id, "Graphs")
        .await?;
    topic_factory
        .generate_one(&app_state.db, profile.id, "Sorting")
        .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli.get("/api/search").query("q", &"GRAPH").send().await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("query").assert_string("GRAPH");
    let projects = body.get("projects").array();
    projects.assert_len(1);
    projects
        .get(0)
        .object()
        .get("project_name")
        .assert_string("Graph Explorer");
    let topics = body.get("dsa_topics").array();
    topics.assert_len(1);
    topics.get(0).object().get("topic_name").assert_string("Graphs");

    // When matching on techstack only
    let resp = cli.get("/api/search").query("q", &"python").send().await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("projects").array().assert_len(1);
    body.get("dsa_topics").array().assert_len(0);
    Ok(())
}

#[tokio::test]
async fn test_search_query_too_short() -> anyhow::Result<()> {
    // Given
    let app_state = offline_app_state()?;
    let config = app_state.config.clone();
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let one_char = cli.get("/api/search").query("q", &"a").send().await;
    let missing = cli.get("/api/search").send().await;

    // Expect
    one_char.assert_status(StatusCode::BAD_REQUEST);
    one_char
        .json()
        .await
        .value()
        .object()
        .get("message")
        .assert_string("Search query must be at least 2 characters");
    missing.assert_status(StatusCode::BAD_REQUEST);
    Ok(())
}
