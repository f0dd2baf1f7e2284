use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    core::{
        security::issue_token,
        test_utils::{generate_test_credential, offline_app_state, test_app_state},
    },
    factory::{education::EducationFactory, profile::ProfileFactory},
    init_openapi_route,
    model::education::Education,
};

#[sqlx::test]
#[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
async fn test_education_ownership_flow(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let app_state = test_app_state(pool);
    let config = app_state.config.clone();
    let alice = generate_test_credential(&app_state.db, &config, "alice", "pw1").await?;
    let bob = generate_test_credential(&app_state.db, &config, "bob", "pw2").await?;
    let alice_profile_id = alice.registered.profile.id.to_string();
    let bob_profile_id = bob.registered.profile.id.to_string();
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When alice creates, claiming bob's profile in the body
    let resp = cli
        .post("/api/education")
        .header("authorization", format!("Bearer {}", alice.token))
        .body_json(&json!({
            "institution": "MIT",
            "degree": "BSc",
            "profile_id": bob_profile_id,
        }))
        .send()
        .await;

    // Expect the owner to come from the token
    resp.assert_status(StatusCode::CREATED);
    let json = resp.json().await;
    let body = json.value().object();
    body.get("profile_id").assert_string(&alice_profile_id);
    let education_id = body.get("id").string().to_string();

    // When bob updates or deletes
    let resp = cli
        .put(format!("/api/education/{}", education_id))
        .header("authorization", format!("Bearer {}", bob.token))
        .body_json(&json!({"grade": "F"}))
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
    let resp = cli
        .delete(format!("/api/education/{}", education_id))
        .header("authorization", format!("Bearer {}", bob.token))
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);

    // When alice updates one field
    let resp = cli
        .put(format!("/api/education/{}", education_id))
        .header("authorization", format!("Bearer {}", alice.token))
        .body_json(&json!({"grade": "A", "degree": null}))
        .send()
        .await;

    // Expect only the present field to change
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("grade").assert_string("A");
    body.get("degree").assert_string("BSc");
    body.get("institution").assert_string("MIT");

    // When listing per owner
    let resp = cli
        .get("/api/education")
        .query("user_id", &alice_profile_id)
        .send()
        .await;
    resp.assert_status_is_ok();
    resp.json().await.value().array().assert_len(1);
    let resp = cli
        .get("/api/education")
        .query("user_id", &bob_profile_id)
        .send()
        .await;
    resp.assert_status_is_ok();
    resp.json().await.value().array().assert_len(0);

    // When alice deletes
    let resp = cli
        .delete(format!("/api/education/{}", education_id))
        .header("authorization", format!("Bearer {}", alice.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NO_CONTENT);
    let resp = cli
        .get(format!("/api/education/{}", education_id))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    Ok(())
}

#[sqlx::test]
#[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
async fn test_list_education_ordered_by_end_year(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let app_state = test_app_state(pool);
    let config = app_state.config.clone();
    let profile = ProfileFactory::new().generate_one(&app_state.db, ()).await?;
    let mut factory = EducationFactory::new();
    factory.modified_many(|data, idx, _| Education {
        end_year: Some(format!("{}", 2010 + idx)),
        ..data.clone()
    });
    factory
        .generate_many(&app_state.db, 3, profile.id, ())
        .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli.get("/api/education").send().await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let years = json
        .value()
        .array()
        .iter()
        .map(|x| x.object().get("end_year").string().to_string())
        .collect::<Vec<String>>();
    assert_eq!(years, vec!["2012", "2011", "2010"]);
    Ok(())
}

#[sqlx::test]
#[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
async fn test_get_education_detail(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let app_state = test_app_state(pool);
    let config = app_state.config.clone();
    let profile = ProfileFactory::new().generate_one(&app_state.db, ()).await?;
    let education = EducationFactory::new()
        .generate_one(&app_state.db, profile.id, ())
        .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .get(format!("/api/education/{}", education.id))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    resp.assert_json(&json!({
        "id": education.id.to_string(),
        "institution": education.institution,
        "degree": education.degree,
        "field_of_study": education.field_of_study,
        "start_year": education.start_year,
        "end_year": education.end_year,
        "grade": education.grade,
        "description": education.description,
        "profile_id": profile.id.to_string(),
    }))
    .await;

    // When absent
    let resp = cli
        .get(format!("/api/education/{}", Uuid::now_v7()))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NOT_FOUND);
    Ok(())
}

#[sqlx::test]
#[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
async fn test_create_education_for_deleted_profile(pool: PgPool) -> anyhow::Result<()> {
    // Given a valid token whose profile no longer exists
    let app_state = test_app_state(pool);
    let config = app_state.config.clone();
    let token = issue_token("ghost", Uuid::now_v7(), Uuid::now_v7(), &config)?.token;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/education")
        .header("authorization", format!("Bearer {}", token))
        .body_json(&json!({"institution": "MIT"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_education_mutations_require_token() -> anyhow::Result<()> {
    // Given
    let app_state = offline_app_state()?;
    let config = app_state.config.clone();
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);
    let path = format!("/api/education/{}", Uuid::now_v7());

    // When
    let create = cli
        .post("/api/education")
        .body_json(&json!({"institution": "MIT"}))
        .send()
        .await;
    let update = cli
        .put(&path)
        .header("authorization", "Bearer not-a-token")
        .body_json(&json!({"grade": "A"}))
        .send()
        .await;
    let delete = cli.delete(&path).send().await;

    // Expect
    create.assert_status(StatusCode::UNAUTHORIZED);
    update.assert_status(StatusCode::UNAUTHORIZED);
    delete.assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_education_malformed_ids() -> anyhow::Result<()> {
    // Given
    let app_state = offline_app_state()?;
    let config = app_state.config.clone();
    let token = issue_token("alice", Uuid::now_v7(), Uuid::now_v7(), &config)?.token;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let detail = cli.get("/api/education/12").send().await;
    let delete = cli
        .delete("/api/education/12")
        .header("authorization", format!("Bearer {}", token))
        .send()
        .await;
    let list = cli
        .get("/api/education")
        .query("user_id", &"not-an-id")
        .send()
        .await;

    // Expect
    detail.assert_status(StatusCode::NOT_FOUND);
    delete.assert_status(StatusCode::NOT_FOUND);
    list.assert_status(StatusCode::BAD_REQUEST);
    Ok(())
}
