//! Seeding over the HTTP API.
//!
//! Both `seed` and `clear` log in as a regular user, so every row they touch
//! belongs to that user's profile and goes through the same ownership checks
//! as any other client.

use std::{collections::HashSet, path::Path};

use anyhow::{bail, Context};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    model::{
        certificate::{Certificate, NewCertificate},
        dsa_topic::{DsaTopic, NewDsaTopic},
        education::{Education, NewEducation},
        project::{NewProject, Project},
    },
    schema::auth::TokenResponse,
};

const EDUCATION_PATH: &str = "education";
const PROJECT_PATH: &str = "projects";
const DSA_TOPIC_PATH: &str = "dsa";
const CERTIFICATE_PATH: &str = "certificates";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SeedData {
    #[serde(default)]
    pub education: Vec<NewEducation>,
    #[serde(default)]
    pub projects: Vec<NewProject>,
    #[serde(default)]
    pub dsa_topics: Vec<NewDsaTopic>,
    #[serde(default)]
    pub certificates: Vec<NewCertificate>,
}

impl SeedData {
    pub async fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("read seed file {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parse seed file {}", path.display()))
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub skipped: usize,
}

/// Entries of `new` whose key is neither in `existing` nor repeated earlier in `new`
pub fn pending<N, E>(
    new: Vec<N>,
    existing: &[E],
    new_key: fn(&N) -> &str,
    existing_key: fn(&E) -> &str,
) -> Vec<N> {
    let mut seen: HashSet<String> = existing.iter().map(|x| existing_key(x).to_string()).collect();
    new.into_iter()
        .filter(|x| seen.insert(new_key(x).to_string()))
        .collect()
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self
            .http
            .request(method, format!("{}/{}", self.base_url, path));
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn check(resp: Response, action: &str) -> anyhow::Result<Response> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("{} failed with {}: {}", action, status, body);
        }
        Ok(resp)
    }

    pub async fn login(&mut self, username: &str, password: &str) -> anyhow::Result<TokenResponse> {
        let resp = self
            .request(Method::POST, "auth/login")
            .json(&serde_json::json!({"username": username, "password": password}))
            .send()
            .await?;
        let token: TokenResponse = Self::check(resp, "login").await?.json().await?;
        self.token = Some(token.access_token.clone());
        Ok(token)
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        profile_id: &str,
    ) -> anyhow::Result<Vec<T>> {
        let resp = self
            .request(Method::GET, path)
            .query(&[("user_id", profile_id)])
            .send()
            .await?;
        let data = Self::check(resp, &format!("list {}", path))
            .await?
            .json()
            .await?;
        Ok(data)
    }

    pub async fn create<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> anyhow::Result<T> {
        let resp = self.request(Method::POST, path).json(body).send().await?;
        let data = Self::check(resp, &format!("create {}", path))
            .await?
            .json()
            .await?;
        Ok(data)
    }

    pub async fn delete(&self, path: &str, id: &Uuid) -> anyhow::Result<()> {
        let resp = self
            .request(Method::DELETE, &format!("{}/{}", path, id))
            .send()
            .await?;
        Self::check(resp, &format!("delete {} {}", path, id)).await?;
        Ok(())
    }
}

async fn seed_kind<N: Serialize, E: DeserializeOwned>(
    client: &ApiClient,
    path: &str,
    profile_id: &str,
    new: Vec<N>,
    new_key: fn(&N) -> &str,
    existing_key: fn(&E) -> &str,
) -> anyhow::Result<SeedReport> {
    let total = new.len();
    let existing: Vec<E> = client.list(path, profile_id).await?;
    let todo = pending(new, &existing, new_key, existing_key);
    let mut report = SeedReport {
        created: 0,
        skipped: total - todo.len(),
    };
    for item in todo.iter() {
        client.create::<N, E>(path, item).await?;
        report.created += 1;
    }
    tracing::info!(
        "seed {}: created {}, skipped {}",
        path,
        report.created,
        report.skipped
    );
    Ok(report)
}

/// Log in and create every entry of `data` the user does not own yet.
pub async fn seed(
    base_url: &str,
    username: &str,
    password: &str,
    data: SeedData,
) -> anyhow::Result<SeedReport> {
    let mut client = ApiClient::new(base_url);
    let token = client.login(username, password).await?;
    let profile_id = token.profile_id;

    let reports = [
        seed_kind::<NewEducation, Education>(
            &client,
            EDUCATION_PATH,
            &profile_id,
            data.education,
            |x| x.institution.as_str(),
            |x| x.institution.as_str(),
        )
        .await?,
        seed_kind::<NewProject, Project>(
            &client,
            PROJECT_PATH,
            &profile_id,
            data.projects,
            |x| x.project_name.as_str(),
            |x| x.project_name.as_str(),
        )
        .await?,
        seed_kind::<NewDsaTopic, DsaTopic>(
            &client,
            DSA_TOPIC_PATH,
            &profile_id,
            data.dsa_topics,
            |x| x.topic_name.as_str(),
            |x| x.topic_name.as_str(),
        )
        .await?,
        seed_kind::<NewCertificate, Certificate>(
            &client,
            CERTIFICATE_PATH,
            &profile_id,
            data.certificates,
            |x| x.title.as_str(),
            |x| x.title.as_str(),
        )
        .await?,
    ];
    Ok(SeedReport {
        created: reports.iter().map(|x| x.created).sum(),
        skipped: reports.iter().map(|x| x.skipped).sum(),
    })
}

async fn clear_kind<E: DeserializeOwned>(
    client: &ApiClient,
    path: &str,
    profile_id: &str,
    id: fn(&E) -> Uuid,
) -> anyhow::Result<usize> {
    let existing: Vec<E> = client.list(path, profile_id).await?;
    for item in existing.iter() {
        client.delete(path, &id(item)).await?;
    }
    tracing::info!("clear {}: deleted {}", path, existing.len());
    Ok(existing.len())
}

/// Log in and delete every child row owned by the user's profile. Returns the number deleted.
pub async fn clear(base_url: &str, username: &str, password: &str) -> anyhow::Result<usize> {
    let mut client = ApiClient::new(base_url);
    let token = client.login(username, password).await?;
    let profile_id = token.profile_id;

    let mut deleted = 0;
    deleted += clear_kind::<Education>(&client, EDUCATION_PATH, &profile_id, |x| x.id).await?;
    deleted += clear_kind::<Project>(&client, PROJECT_PATH, &profile_id, |x| x.id).await?;
    deleted += clear_kind::<DsaTopic>(&client, DSA_TOPIC_PATH, &profile_id, |x| x.id).await?;
    deleted +=
        clear_kind::<Certificate>(&client, CERTIFICATE_PATH, &profile_id, |x| x.id).await?;
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str) -> NewProject {
        NewProject {
            project_name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_pending_skips_existing_and_repeated() {
        let existing = vec!["Blog".to_string()];
        let new = vec![
            project("Blog"),
            project("Compiler"),
            project("Compiler"),
            project("Game"),
        ];
        let res = pending(
            new,
            &existing,
            |x| x.project_name.as_str(),
            |x: &String| x.as_str(),
        );
        assert_eq!(res, vec![project("Compiler"), project("Game")]);
    }

    #[test]
    fn test_pending_with_nothing_existing() {
        let existing: Vec<String> = vec![];
        let res = pending(
            vec![project("Blog")],
            &existing,
            |x| x.project_name.as_str(),
            |x: &String| x.as_str(),
        );
        assert_eq!(res.len(), 1);
    }

    #[test]
    fn test_sample_seed_file_parses() {
        let data: SeedData =
            serde_json::from_str(include_str!("../../demos/seed_data.json")).unwrap();
        assert!(!data.education.is_empty());
        assert!(!data.projects.is_empty());
        assert!(!data.dsa_topics.is_empty());
        assert!(!data.certificates.is_empty());
        assert!(data.dsa_topics.iter().all(|x| x.category.is_some()));
    }

    #[test]
    fn test_api_client_trims_base_url() {
        let client = ApiClient::new("http://localhost:8000/api/");
        assert_eq!(client.base_url, "http://localhost:8000/api");
        assert!(client.token.is_none());
    }
}
