use chrono::NaiveDate;
use fake::{Dummy, Fake, Faker};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::model::certificate::Certificate;

const INSERT_CERTIFICATE: &str = r#"
    INSERT INTO public.certificate (id, title, issuer, issue_date, credential_url, description, profile_id)
    VALUES ($1, $2, $3, $4, $5, $6, $7)"#;

pub struct CertificateFactory<T: Clone> {
    modifier_one: fn(x: &Certificate, ext: T) -> Certificate,
    modifier_many: fn(x: &Certificate, idx: usize, ext: T) -> Certificate,
}

impl<T: Clone> Default for CertificateFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> CertificateFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Certificate, ext: T) -> Certificate) {
        self.modifier_one = modifier
    }

    pub fn modified_many(
        &mut self,
        modifier: fn(x: &Certificate, idx: usize, ext: T) -> Certificate,
    ) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(
        &mut self,
        db: &PgPool,
        profile_id: Uuid,
        ext: T,
    ) -> anyhow::Result<Certificate> {
        let data = CertificateDummy::generate_one(profile_id);
        let data = (self.modifier_one)(&data, ext);
        sqlx::query(INSERT_CERTIFICATE)
            .bind(data.id)
            .bind(&data.title)
            .bind(&data.issuer)
            .bind(&data.issue_date)
            .bind(&data.credential_url)
            .bind(&data.description)
            .bind(data.profile_id)
            .execute(db)
            .await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        profile_id: Uuid,
        ext: T,
    ) -> anyhow::Result<Vec<Certificate>> {
        let mut result: Vec<Certificate> = vec![];
        for idx in 0..num {
            let data = CertificateDummy::generate_one(profile_id);
            result.push((self.modifier_many)(&data, idx as usize, ext.clone()));
        }
        let mut tx = db.begin().await?;
        for item in result.iter() {
            sqlx::query(INSERT_CERTIFICATE)
                .bind(item.id)
                .bind(&item.title)
                .bind(&item.issuer)
                .bind(&item.issue_date)
                .bind(&item.credential_url)
                .bind(&item.description)
                .bind(item.profile_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[derive(Debug, Deserialize, Dummy, Clone)]
struct CertificateDummy {
    pub title: String,
    pub issuer: Option<String>,
    pub issue_date: NaiveDate,
    pub credential_url: Option<String>,
    pub description: Option<String>,
}

impl CertificateDummy {
    pub fn generate_one(profile_id: Uuid) -> Certificate {
        let dummy = Faker.fake::<Self>();
        Certificate {
            id: Uuid::now_v7(),
            title: dummy.title,
            issuer: dummy.issuer,
            issue_date: Some(dummy.issue_date.format("%Y-%m-%d").to_string()),
            credential_url: dummy.credential_url,
            description: dummy.description,
            profile_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::{
        factory::{certificate::CertificateFactory, profile::ProfileFactory},
        model::certificate::Certificate,
    };

    #[sqlx::test]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
    async fn test_generate_one_modified(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let profile = ProfileFactory::new().generate_one(&pool, ()).await?;

        // When
        let mut factory = CertificateFactory::<String>::new();
        factory.modified_one(|data, ext| Certificate {
            title: ext,
            ..data.clone()
        });
        factory
            .generate_one(&pool, profile.id, "AWS Cloud Practitioner".to_string())
            .await?;

        // Expect
        let res: (String,) = sqlx::query_as("SELECT title FROM public.certificate")
            .fetch_one(&pool)
            .await?;
        assert_eq!(res.0, "AWS Cloud Practitioner");
        Ok(())
    }
}
