use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    model::education::{Education, EducationPatch, NewEducation, TABLE_NAME},
};

pub async fn list_education(
    tx: &mut Transaction<'_, Postgres>,
    profile_id: Option<Uuid>,
) -> anyhow::Result<Vec<Education>> {
    let mut binds: Vec<SqlxBinds> = vec![];
    let mut filters: Vec<String> = vec![];

    if let Some(val) = profile_id {
        binds.push(SqlxBinds::Uuid(val));
        filters.push(format!("profile_id = ${}", binds.len()));
    }

    let stmt = query_builder(
        None,
        TABLE_NAME,
        &filters,
        vec!["end_year DESC".to_string()],
    );
    let data = binds_query_as::<Education>(&stmt, binds)
        .fetch_all(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn get_education_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<Education>> {
    let stmt = query_builder(None, TABLE_NAME, &["id = $1".to_string()], vec![]);
    let data = binds_query_as::<Education>(&stmt, vec![SqlxBinds::Uuid(*id)])
        .fetch_optional(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn create_education(
    tx: &mut Transaction<'_, Postgres>,
    id: Option<Uuid>,
    profile_id: Uuid,
    data: NewEducation,
) -> anyhow::Result<Education> {
    let new_education = Education::from_new(id.unwrap_or(Uuid::now_v7()), profile_id, data);
    sqlx::query(
        format!(
            r#"
    INSERT INTO {} (id, institution, degree, field_of_study, start_year,
    end_year, grade, description, profile_id)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(new_education.id)
    .bind(&new_education.institution)
    .bind(&new_education.degree)
    .bind(&new_education.field_of_study)
    .bind(&new_education.start_year)
    .bind(&new_education.end_year)
    .bind(&new_education.grade)
    .bind(&new_education.description)
    .bind(new_education.profile_id)
    .execute(&mut **tx)
    .await?;
    Ok(new_education)
}

pub async fn update_education(
    tx: &mut Transaction<'_, Postgres>,
    education: &mut Education,
    patch: EducationPatch,
) -> anyhow::Result<()> {
    education.apply(patch);
    sqlx::query(
        format!(
            r#"
        UPDATE {}
        SET institution = $1, degree = $2, field_of_study = $3, start_year = $4,
        end_year = $5, grade = $6, description = $7
        WHERE id = $8"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&education.institution)
    .bind(&education.degree)
    .bind(&education.field_of_study)
    .bind(&education.start_year)
    .bind(&education.end_year)
    .bind(&education.grade)
    .bind(&education.description)
    .bind(education.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// hard delete, returns false when nothing matched
pub async fn delete_education(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<bool> {
    let res = sqlx::query(format!("DELETE FROM {} WHERE id = $1", TABLE_NAME).as_str())
        .bind(*id)
        .execute(&mut **tx)
        .await?;
    Ok(res.rows_affected() > 0)
}
