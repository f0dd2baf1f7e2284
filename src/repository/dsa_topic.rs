use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::sqlx_utils::{binds_query_as, contains_pattern, query_builder, SqlxBinds},
    model::dsa_topic::{DsaTopic, DsaTopicFilter, DsaTopicPatch, NewDsaTopic, TABLE_NAME},
};

pub async fn list_dsa_topic(
    tx: &mut Transaction<'_, Postgres>,
    filter: &DsaTopicFilter,
) -> anyhow::Result<Vec<DsaTopic>> {
    let mut binds: Vec<SqlxBinds> = vec![];
    let mut filters: Vec<String> = vec![];

    if let Some(val) = filter.profile_id {
        binds.push(SqlxBinds::Uuid(val));
        filters.push(format!("profile_id = ${}", binds.len()));
    }
    if let Some(val) = filter.category.as_deref().filter(|x| !x.is_empty()) {
        binds.push(SqlxBinds::String(contains_pattern(val)));
        filters.push(format!("category ILIKE ${}", binds.len()));
    }

    let stmt = query_builder(
        None,
        TABLE_NAME,
        &filters,
        vec!["category ASC".to_string(), "topic_name ASC".to_string()],
    );
    let data = binds_query_as::<DsaTopic>(&stmt, binds)
        .fetch_all(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn get_dsa_topic_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<DsaTopic>> {
    let stmt = query_builder(None, TABLE_NAME, &["id = $1".to_string()], vec![]);
    let data = binds_query_as::<DsaTopic>(&stmt, vec![SqlxBinds::Uuid(*id)])
        .fetch_optional(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn create_dsa_topic(
    tx: &mut Transaction<'_, Postgres>,
    id: Option<Uuid>,
    profile_id: Uuid,
    data: NewDsaTopic,
) -> anyhow::Result<DsaTopic> {
    let new_topic = DsaTopic::from_new(id.unwrap_or(Uuid::now_v7()), profile_id, data);
    sqlx::query(
        format!(
            r#"
    INSERT INTO {} (id, topic_name, category, description, problems_solved, resources, profile_id)
    VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(new_topic.id)
    .bind(&new_topic.topic_name)
    .bind(&new_topic.category)
    .bind(&new_topic.description)
    .bind(&new_topic.problems_solved)
    .bind(&new_topic.resources)
    .bind(new_topic.profile_id)
    .execute(&mut **tx)
    .await?;
    Ok(new_topic)
}

pub async fn update_dsa_topic(
    tx: &mut Transaction<'_, Postgres>,
    topic: &mut DsaTopic,
    patch: DsaTopicPatch,
) -> anyhow::Result<()> {
    topic.apply(patch);
    sqlx::query(
        format!(
            r#"
        UPDATE {}
        SET topic_name = $1, category = $2, description = $3, problems_solved = $4, resources = $5
        WHERE id = $6"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&topic.topic_name)
    .bind(&topic.category)
    .bind(&topic.description)
    .bind(&topic.problems_solved)
    .bind(&topic.resources)
    .bind(topic.id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn delete_dsa_topic(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<bool> {
    let res = sqlx::query(format!("DELETE FROM {} WHERE id = $1", TABLE_NAME).as_str())
        .bind(*id)
        .execute(&mut **tx)
        .await?;
    Ok(res.rows_affected() > 0)
}
