use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    model::certificate::{Certificate, CertificatePatch, NewCertificate, TABLE_NAME},
};

pub async fn list_certificate(
    tx: &mut Transaction<'_, Postgres>,
    profile_id: Option<Uuid>,
) -> anyhow::Result<Vec<Certificate>> {
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
        vec!["issue_date DESC".to_string()],
    );
    let data = binds_query_as::<Certificate>(&stmt, binds)
        .fetch_all(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn get_certificate_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<Certificate>> {
    let stmt = query_builder(None, TABLE_NAME, &["id = $1".to_string()], vec![]);
    let data = binds_query_as::<Certificate>(&stmt, vec![SqlxBinds::Uuid(*id)])
        .fetch_optional(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn create_certificate(
    tx: &mut Transaction<'_, Postgres>,
    id: Option<Uuid>,
    profile_id: Uuid,
    data: NewCertificate,
) -> anyhow::Result<Certificate> {
    let new_certificate = Certificate::from_new(id.unwrap_or(Uuid::now_v7()), profile_id, data);
    sqlx::query(
        format!(
            r#"
    INSERT INTO {} (id, title, issuer, issue_date, credential_url, description, profile_id)
    VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(new_certificate.id)
    .bind(&new_certificate.title)
    .bind(&new_certificate.issuer)
    .bind(&new_certificate.issue_date)
    .bind(&new_certificate.credential_url)
    .bind(&new_certificate.description)
    .bind(new_certificate.profile_id)
    .execute(&mut **tx)
    .await?;
    Ok(new_certificate)
}

pub async fn update_certificate(
    tx: &mut Transaction<'_, Postgres>,
    certificate: &mut Certificate,
    patch: CertificatePatch,
) -> anyhow::Result<()> {
    certificate.apply(patch);
    sqlx::query(
        format!(
            r#"
        UPDATE {}
        SET title = $1, issuer = $2, issue_date = $3, credential_url = $4, description = $5
        WHERE id = $6"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&certificate.title)
    .bind(&certificate.issuer)
    .bind(&certificate.issue_date)
    .bind(&certificate.credential_url)
    .bind(&certificate.description)
    .bind(certificate.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn delete_certificate(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<bool> {
    let res = sqlx::query(format!("DELETE FROM {} WHERE id = $1", TABLE_NAME).as_str())
        .bind(*id)
        .execute(&mut **tx)
        .await?;
    Ok(res.rows_affected() > 0)
}
