use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::model::credential::{Credential, TABLE_NAME};

pub async fn get_credential_by_username(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
) -> anyhow::Result<Option<Credential>> {
    let res: Option<Credential> = sqlx::query_as(
        format!(
            r#"SELECT *
        FROM {}
        WHERE username = $1
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(username)
    .fetch_optional(&mut **tx)
    .await?;
    Ok(res)
}

pub async fn get_credential_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<Credential>> {
    let res: Option<Credential> =
        sqlx::query_as(format!("SELECT * FROM {} WHERE id = $1", TABLE_NAME).as_str())
            .bind(*id)
            .fetch_optional(&mut **tx)
            .await?;
    Ok(res)
}

pub async fn create_credential(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
    password_hash: String,
    profile_id: Option<Uuid>,
) -> anyhow::Result<Credential> {
    let credential = Credential {
        id: Uuid::now_v7(),
        username: username.to_string(),
        password_hash,
        profile_id,
    };
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, username, password_hash, profile_id)
        VALUES ($1, $2, $3, $4)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(credential.id)
    .bind(&credential.username)
    .bind(&credential.password_hash)
    .bind(credential.profile_id)
    .execute(&mut **tx)
    .await?;
    Ok(credential)
}

pub async fn link_credential_profile(
    tx: &mut Transaction<'_, Postgres>,
    credential: &mut Credential,
    profile_id: Uuid,
) -> anyhow::Result<()> {
    credential.profile_id = Some(profile_id);
    sqlx::query(format!("UPDATE {} SET profile_id = $1 WHERE id = $2", TABLE_NAME).as_str())
        .bind(profile_id)
        .bind(credential.id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn update_credential_password(
    tx: &mut Transaction<'_, Postgres>,
    credential: &mut Credential,
    password_hash: String,
) -> anyhow::Result<()> {
    credential.password_hash = password_hash;
    sqlx::query(
        format!("UPDATE {} SET password_hash = $1 WHERE id = $2", TABLE_NAME).as_str(),
    )
    .bind(&credential.password_hash)
    .bind(credential.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
