use sqlx::{Postgres, Transaction};

use crate::{
    core::sqlx_utils::{binds_query_as, contains_pattern, query_builder, SqlxBinds},
    model::{
        dsa_topic::{DsaTopic, TABLE_NAME as DSA_TOPIC_TABLE_NAME},
        project::{Project, TABLE_NAME as PROJECT_TABLE_NAME},
    },
};

pub const MIN_QUERY_LEN: usize = 2;

/// rows with `text` in any of the given columns, case-insensitive
fn any_column_contains(columns: &[&str]) -> Vec<String> {
    let clause = columns
        .iter()
        .map(|x| format!("{} ILIKE $1", x))
        .collect::<Vec<String>>()
        .join(" OR ");
    vec![format!("({})", clause)]
}

pub async fn search_project(
    tx: &mut Transaction<'_, Postgres>,
    text: &str,
) -> anyhow::Result<Vec<Project>> {
    let filters = any_column_contains(&["project_name", "techstack", "description"]);
    let stmt = query_builder(None, PROJECT_TABLE_NAME, &filters, vec![]);
    let data = binds_query_as::<Project>(&stmt, vec![SqlxBinds::String(contains_pattern(text))])
        .fetch_all(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn search_dsa_topic(
    tx: &mut Transaction<'_, Postgres>,
    text: &str,
) -> anyhow::Result<Vec<DsaTopic>> {
    let filters = any_column_contains(&["topic_name", "category", "description"]);
    let stmt = query_builder(None, DSA_TOPIC_TABLE_NAME, &filters, vec![]);
    let data = binds_query_as::<DsaTopic>(&stmt, vec![SqlxBinds::String(contains_pattern(text))])
        .fetch_all(&mut **tx)
        .await?;
    Ok(data)
}

pub fn is_valid_query(text: &str) -> bool {
    text.chars().count() >= MIN_QUERY_LEN
}
