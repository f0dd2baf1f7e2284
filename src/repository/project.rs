use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::sqlx_utils::{binds_query_as, contains_pattern, query_builder, SqlxBinds},
    model::project::{NewProject, Project, ProjectFilter, ProjectPatch, TABLE_NAME},
};

pub async fn list_project(
    tx: &mut Transaction<'_, Postgres>,
    filter: &ProjectFilter,
) -> anyhow::Result<Vec<Project>> {
    let mut binds: Vec<SqlxBinds> = vec![];
    let mut filters: Vec<String> = vec![];

    if let Some(val) = filter.profile_id {
        binds.push(SqlxBinds::Uuid(val));
        filters.push(format!("profile_id = ${}", binds.len()));
    }
    if let Some(val) = filter.techstack.as_deref().filter(|x| !x.is_empty()) {
        binds.push(SqlxBinds::String(contains_pattern(val)));
        filters.push(format!("techstack ILIKE ${}", binds.len()));
    }

    let mut order_by: Vec<String> = vec![];
    if filter.sorted {
        order_by.push("project_name ASC".to_string());
    }

    let stmt = query_builder(None, TABLE_NAME, &filters, order_by);
    let data = binds_query_as::<Project>(&stmt, binds)
        .fetch_all(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn get_project_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<Project>> {
    let stmt = query_builder(None, TABLE_NAME, &["id = $1".to_string()], vec![]);
    let data = binds_query_as::<Project>(&stmt, vec![SqlxBinds::Uuid(*id)])
        .fetch_optional(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn create_project(
    tx: &mut Transaction<'_, Postgres>,
    id: Option<Uuid>,
    profile_id: Uuid,
    data: NewProject,
) -> anyhow::Result<Project> {
    let new_project = Project::from_new(id.unwrap_or(Uuid::now_v7()), profile_id, data);
    sqlx::query(
        format!(
            r#"
    INSERT INTO {} (id, project_name, techstack, description, project_url, profile_id)
    VALUES ($1, $2, $3, $4, $5, $6)"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(new_project.id)
    .bind(&new_project.project_name)
    .bind(&new_project.techstack)
    .bind(&new_project.description)
    .bind(&new_project.project_url)
    .bind(new_project.profile_id)
    .execute(&mut **tx)
    .await?;
    Ok(new_project)
}

pub async fn update_project(
    tx: &mut Transaction<'_, Postgres>,
    project: &mut Project,
    patch: ProjectPatch,
) -> anyhow::Result<()> {
    project.apply(patch);
    sqlx::query(
        format!(
            r#"
        UPDATE {}
        SET project_name = $1, techstack = $2, description = $3, project_url = $4
        WHERE id = $5"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&project.project_name)
    .bind(&project.techstack)
    .bind(&project.description)
    .bind(&project.project_url)
    .bind(project.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn delete_project(tx: &mut Transaction<'_, Postgres>, id: &Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query(format!("DELETE FROM {} WHERE id = $1", TABLE_NAME).as_str())
        .bind(*id)
        .execute(&mut **tx)
        .await?;
    Ok(res.rows_affected() > 0)
}
