use poem::test::TestClient;
use sqlx::PgPool;

use crate::{
    core::test_utils::{offline_app_state, test_app_state},
    init_openapi_route,
};

#[sqlx::test]
#[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
async fn test_health_connected(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let app_state = test_app_state(pool);
    let config = app_state.config.clone();
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli.get("/api/health").send().await;

    // Expect
    resp.assert_status_is_ok();
    resp.assert_json(&serde_json::json!({"status": "ok", "database": "connected"}))
        .await;
    Ok(())
}

#[tokio::test]
async fn test_health_reports_unreachable_database() -> anyhow::Result<()> {
    // Given
    let app_state = offline_app_state()?;
    let config = app_state.config.clone();
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli.get("/api/health").send().await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("status").assert_string("ok");
    body.get("database").assert_string("disconnected");
    assert!(!body.get("error").string().is_empty());
    Ok(())
}
