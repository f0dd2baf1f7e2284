use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    core::test_utils::{generate_test_credential, offline_app_state, test_app_state},
    factory::{
        certificate::CertificateFactory, dsa_topic::DsaTopicFactory, education::EducationFactory,
        profile::ProfileFactory, project::ProjectFactory,
    },
    init_openapi_route,
    model::profile::Profile,
};

#[sqlx::test]
#[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
async fn test_create_profile(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let app_state = test_app_state(pool);
    let config = app_state.config.clone();
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/users")
        .body_json(&json!({
            "full_name": "Alice Doe",
            "email": "alice@mail.com",
            "github": "https://github.com/alice",
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::CREATED);
    let json = resp.json().await;
    let body = json.value().object();
    body.get("full_name").assert_string("Alice Doe");
    body.get("github").assert_string("https://github.com/alice");
    body.get("bio").assert_null();

    // When the email is taken
    let resp = cli
        .post("/api/users")
        .body_json(&json!({"full_name": "Other", "email": "alice@mail.com"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::CONFLICT);
    Ok(())
}

#[sqlx::test]
#[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
async fn test_get_profile_with_children(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let app_state = test_app_state(pool);
    let config = app_state.config.clone();
    let profile = ProfileFactory::new().generate_one(&app_state.db, ()).await?;
    let other = ProfileFactory::new().generate_one(&app_state.db, ()).await?;
    EducationFactory::new()
        .generate_many(&app_state.db, 2, profile.id, ())
        .await?;
    ProjectFactory::new()
        .generate_many(&app_state.db, 3, profile.id, ())
        .await?;
    ProjectFactory::new()
        .generate_many(&app_state.db, 2, other.id, ())
        .await?;
    DsaTopicFactory::new()
        .generate_one(&app_state.db, profile.id, ())
        .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli.get(format!("/api/users/{}", profile.id)).send().await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("id").assert_string(&profile.id.to_string());
    body.get("email").assert_string(&profile.email);
    body.get("education").array().assert_len(2);
    body.get("projects").array().assert_len(3);
    body.get("dsa_topics").array().assert_len(1);
    body.get("certificates").array().assert_len(0);

    // When absent
    let resp = cli.get(format!("/api/users/{}", Uuid::now_v7())).send().await;

    // Expect
    resp.assert_status(StatusCode::NOT_FOUND);
    Ok(())
}

#[sqlx::test]
#[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
async fn test_update_profile(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let app_state = test_app_state(pool);
    let config = app_state.config.clone();
    let alice = generate_test_credential(&app_state.db, &config, "alice", "pw1").await?;
    let bob = generate_test_credential(&app_state.db, &config, "bob", "pw2").await?;
    let mut factory = ProfileFactory::<()>::new();
    factory.modified_one(|data, _| Profile {
        email: "taken@mail.com".to_string(),
        ..data.clone()
    });
    factory.generate_one(&app_state.db, ()).await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);
    let path = format!("/api/users/{}", alice.registered.profile.id);

    // When bob updates alice
    let resp = cli
        .put(&path)
        .header("authorization", format!("Bearer {}", bob.token))
        .body_json(&json!({"bio": "hacked"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);

    // When alice takes an existing email
    let resp = cli
        .put(&path)
        .header("authorization", format!("Bearer {}", alice.token))
        .body_json(&json!({"email": "taken@mail.com"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::CONFLICT);

    // When alice updates her bio
    let resp = cli
        .put(&path)
        .header("authorization", format!("Bearer {}", alice.token))
        .body_json(&json!({"full_name": "Alice Doe", "bio": "Rust developer"}))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("full_name").assert_string("Alice Doe");
    body.get("bio").assert_string("Rust developer");
    body.get("email").assert_string("alice@example.com");
    Ok(())
}

#[sqlx::test]
#[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
async fn test_delete_profile_cascades(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let app_state = test_app_state(pool);
    let config = app_state.config.clone();
    let alice = generate_test_credential(&app_state.db, &config, "alice", "pw1").await?;
    let bob = generate_test_credential(&app_state.db, &config, "bob", "pw2").await?;
    let profile_id = alice.registered.profile.id;
    EducationFactory::new()
        .generate_many(&app_state.db, 2, profile_id, ())
        .await?;
    ProjectFactory::new()
        .generate_many(&app_state.db, 2, profile_id, ())
        .await?;
    DsaTopicFactory::new()
        .generate_many(&app_state.db, 2, profile_id, ())
        .await?;
    CertificateFactory::new()
        .generate_many(&app_state.db, 2, profile_id, ())
        .await?;
    ProjectFactory::new()
        .generate_one(&app_state.db, bob.registered.profile.id, ())
        .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);
    let path = format!("/api/users/{}", profile_id);

    // When bob deletes alice
    let resp = cli
        .delete(&path)
        .header("authorization", format!("Bearer {}", bob.token))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);

    // When alice deletes herself
    let resp = cli
        .delete(&path)
        .header("authorization", format!("Bearer {}", alice.token))
        .send()
        .await;

    // Expect every child row gone, other profiles untouched
    resp.assert_status(StatusCode::NO_CONTENT);
    cli.get(&path).send().await.assert_status(StatusCode::NOT_FOUND);
    for table in [
        "public.education",
        "public.project",
        "public.dsa_topic",
        "public.certificate",
    ] {
        let count: (i64,) =
            sqlx::query_as(format!("SELECT COUNT(*) FROM {} WHERE profile_id = $1", table).as_str())
                .bind(profile_id)
                .fetch_one(&app_state.db)
                .await?;
        assert_eq!(count.0, 0, "{} rows left", table);
    }
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM public.project")
        .fetch_one(&app_state.db)
        .await?;
    assert_eq!(count.0, 1);
    let credential: (Option<Uuid>,) =
        sqlx::query_as("SELECT profile_id FROM public.credential WHERE username = $1")
            .bind("alice")
            .fetch_one(&app_state.db)
            .await?;
    assert_eq!(credential.0, None);
    Ok(())
}

#[tokio::test]
async fn test_profile_requests_rejected_before_store() -> anyhow::Result<()> {
    // Given
    let app_state = offline_app_state()?;
    let config = app_state.config.clone();
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let create = cli
        .post("/api/users")
        .body_json(&json!({"full_name": " ", "email": "alice@mail.com"}))
        .send()
        .await;
    let detail = cli.get("/api/users/not-an-id").send().await;
    let delete = cli
        .delete(format!("/api/users/{}", Uuid::now_v7()))
        .send()
        .await;

    // Expect
    create.assert_status(StatusCode::BAD_REQUEST);
    detail.assert_status(StatusCode::NOT_FOUND);
    delete.assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}
