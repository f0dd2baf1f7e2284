use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    model::profile::{NewProfile, Profile, ProfilePatch, TABLE_NAME},
};

pub async fn get_profile_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<Profile>> {
    let stmt = query_builder(None, TABLE_NAME, &["id = $1".to_string()], vec![]);
    let data = binds_query_as::<Profile>(&stmt, vec![SqlxBinds::Uuid(*id)])
        .fetch_optional(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn get_profile_by_email(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
) -> anyhow::Result<Option<Profile>> {
    let stmt = query_builder(None, TABLE_NAME, &["email = $1".to_string()], vec![]);
    let data = binds_query_as::<Profile>(&stmt, vec![SqlxBinds::String(email.to_string())])
        .fetch_optional(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn create_profile(
    tx: &mut Transaction<'_, Postgres>,
    id: Option<Uuid>,
    data: NewProfile,
) -> anyhow::Result<Profile> {
    let new_profile = Profile::from_new(id.unwrap_or(Uuid::now_v7()), data);
    sqlx::query(
        format!(
            r#"
    INSERT INTO {} (id, full_name, email, phone, location, linkedin, github, leetcode, bio)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(new_profile.id)
    .bind(&new_profile.full_name)
    .bind(&new_profile.email)
    .bind(&new_profile.phone)
    .bind(&new_profile.location)
    .bind(&new_profile.linkedin)
    .bind(&new_profile.github)
    .bind(&new_profile.leetcode)
    .bind(&new_profile.bio)
    .execute(&mut **tx)
    .await?;
    Ok(new_profile)
}

pub async fn update_profile(
    tx: &mut Transaction<'_, Postgres>,
    profile: &mut Profile,
    patch: ProfilePatch,
) -> anyhow::Result<()> {
    profile.apply(patch);
    sqlx::query(
        format!(
            r#"
        UPDATE {}
        SET full_name = $1, email = $2, phone = $3, location = $4, linkedin = $5,
        github = $6, leetcode = $7, bio = $8
        WHERE id = $9"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&profile.full_name)
    .bind(&profile.email)
    .bind(&profile.phone)
    .bind(&profile.location)
    .bind(&profile.linkedin)
    .bind(&profile.github)
    .bind(&profile.leetcode)
    .bind(&profile.bio)
    .bind(profile.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// owned education, project, dsa topic and certificate rows go with it (ON DELETE CASCADE)
pub async fn delete_profile(tx: &mut Transaction<'_, Postgres>, id: &Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query(format!("DELETE FROM {} WHERE id = $1", TABLE_NAME).as_str())
        .bind(*id)
        .execute(&mut **tx)
        .await?;
    Ok(res.rows_affected() > 0)
}
