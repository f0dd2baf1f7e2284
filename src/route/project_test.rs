use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    core::test_utils::{generate_test_credential, test_app_state},
    factory::{profile::ProfileFactory, project::ProjectFactory},
    init_openapi_route,
    model::project::Project,
};

fn names(json: &poem::test::TestJson) -> Vec<String> {
    json.value()
        .array()
        .iter()
        .map(|x| x.object().get("project_name").string().to_string())
        .collect()
}

#[sqlx::test]
#[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
async fn test_list_project_filters(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let app_state = test_app_state(pool);
    let config = app_state.config.clone();
    let alice = ProfileFactory::new().generate_one(&app_state.db, ()).await?;
    let bob = ProfileFactory::new().generate_one(&app_state.db, ()).await?;
    let mut factory = ProjectFactory::<(&'static str, &'static str)>::new();
    factory.modified_one(|data, ext| Project {
        project_name: ext.0.to_string(),
        techstack: Some(ext.1.to_string()),
        ..data.clone()
    });
    factory
        .generate_one(&app_state.db, alice.id, ("Website", "React, Node"))
        .await?;
    factory
        .generate_one(&app_state.db, alice.id, ("Compiler", "Rust"))
        .await?;
    factory
        .generate_one(&app_state.db, bob.id, ("Api", "Rust, Postgres"))
        .await?;
    factory
        .generate_one(&app_state.db, bob.id, ("Discount", "100% off_peak"))
        .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When sorted
    let resp = cli.get("/api/projects").query("sorted", &true).send().await;

    // Expect
    resp.assert_status_is_ok();
    assert_eq!(
        names(&resp.json().await),
        vec!["Api", "Compiler", "Discount", "Website"]
    );

    // When filtered by techstack, case-insensitive
    let resp = cli
        .get("/api/projects")
        .query("techstack", &"rust")
        .query("sorted", &true)
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    assert_eq!(names(&resp.json().await), vec!["Api", "Compiler"]);

    // When combined with owner
    let resp = cli
        .get("/api/projects")
        .query("techstack", &"RUST")
        .query("user_id", &alice.id.to_string())
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    assert_eq!(names(&resp.json().await), vec!["Compiler"]);

    // When wildcard characters are part of the filter
    let resp = cli
        .get("/api/projects")
        .query("techstack", &"0% off_")
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(names(&resp.json().await), vec!["Discount"]);
    let resp = cli
        .get("/api/projects")
        .query("techstack", &"R%t")
        .send()
        .await;
    resp.assert_status_is_ok();
    assert!(names(&resp.json().await).is_empty());
    Ok(())
}

#[sqlx::test]
#[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
async fn test_project_crud(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let app_state = test_app_state(pool);
    let config = app_state.config.clone();
    let alice = generate_test_credential(&app_state.db, &config, "alice", "pw1").await?;
    let bob = generate_test_credential(&app_state.db, &config, "bob", "pw2").await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/projects")
        .header("authorization", format!("Bearer {}", alice.token))
        .body_json(&json!({"project_name": "Portfolio", "techstack": "Rust"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::CREATED);
    let json = resp.json().await;
    let body = json.value().object();
    body.get("profile_id")
        .assert_string(&alice.registered.profile.id.to_string());
    let project_id = body.get("id").string().to_string();

    // When bob edits
    let resp = cli
        .put(format!("/api/projects/{}", project_id))
        .header("authorization", format!("Bearer {}", bob.token))
        .body_json(&json!({"project_name": "Stolen"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);
    let resp = cli.get(format!("/api/projects/{}", project_id)).send().await;
    resp.assert_status_is_ok();
    resp.json()
        .await
        .value()
        .object()
        .get("project_name")
        .assert_string("Portfolio");

    // When alice edits
    let resp = cli
        .put(format!("/api/projects/{}", project_id))
        .header("authorization", format!("Bearer {}", alice.token))
        .body_json(&json!({"description": "Personal site"}))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("project_name").assert_string("Portfolio");
    body.get("description").assert_string("Personal site");
    body.get("techstack").assert_string("Rust");
    Ok(())
}
