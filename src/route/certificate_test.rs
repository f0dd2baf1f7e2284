use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    core::test_utils::{generate_test_credential, test_app_state},
    factory::{certificate::CertificateFactory, profile::ProfileFactory},
    init_openapi_route,
    model::certificate::Certificate,
};

#[sqlx::test]
#[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
async fn test_list_certificate_latest_first(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let app_state = test_app_state(pool);
    let config = app_state.config.clone();
    let profile = ProfileFactory::new().generate_one(&app_state.db, ()).await?;
    let mut factory = CertificateFactory::new();
    factory.modified_many(|data, idx, _| Certificate {
        issue_date: Some(format!("202{}-01-15", idx)),
        ..data.clone()
    });
    factory
        .generate_many(&app_state.db, 3, profile.id, ())
        .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .get("/api/certificates")
        .query("user_id", &profile.id.to_string())
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let dates = json
        .value()
        .array()
        .iter()
        .map(|x| x.object().get("issue_date").string().to_string())
        .collect::<Vec<String>>();
    assert_eq!(dates, vec!["2022-01-15", "2021-01-15", "2020-01-15"]);
    Ok(())
}

#[sqlx::test]
#[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
async fn test_certificate_update_by_owner(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let app_state = test_app_state(pool);
    let config = app_state.config.clone();
    let alice = generate_test_credential(&app_state.db, &config, "alice", "pw1").await?;
    let bob = generate_test_credential(&app_state.db, &config, "bob", "pw2").await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);
    let resp = cli
        .post("/api/certificates")
        .header("authorization", format!("Bearer {}", alice.token))
        .body_json(&json!({"title": "AWS Cloud Practitioner", "issuer": "AWS"}))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    let json = resp.json().await;
    let path = format!(
        "/api/certificates/{}",
        json.value().object().get("id").string()
    );

    // When bob updates
    let resp = cli
        .put(&path)
        .header("authorization", format!("Bearer {}", bob.token))
        .body_json(&json!({"title": "Mine now"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);

    // When alice updates
    let resp = cli
        .put(&path)
        .header("authorization", format!("Bearer {}", alice.token))
        .body_json(&json!({"issue_date": "2024-03-01"}))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("title").assert_string("AWS Cloud Practitioner");
    body.get("issue_date").assert_string("2024-03-01");
    Ok(())
}
