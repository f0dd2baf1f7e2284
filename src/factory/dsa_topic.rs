use fake::{Dummy, Fake, Faker};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::model::dsa_topic::DsaTopic;

const INSERT_DSA_TOPIC: &str = r#"
    INSERT INTO public.dsa_topic (id, topic_name, category, description, problems_solved, resources, profile_id)
    VALUES ($1, $2, $3, $4, $5, $6, $7)"#;

const CATEGORIES: [&str; 2] = ["Data Structure", "Algorithm"];

pub struct DsaTopicFactory<T: Clone> {
    modifier_one: fn(x: &DsaTopic, ext: T) -> DsaTopic,
    modifier_many: fn(x: &DsaTopic, idx: usize, ext: T) -> DsaTopic,
}

impl<T: Clone> Default for DsaTopicFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> DsaTopicFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &DsaTopic, ext: T) -> DsaTopic) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &DsaTopic, idx: usize, ext: T) -> DsaTopic) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(
        &mut self,
        db: &PgPool,
        profile_id: Uuid,
        ext: T,
    ) -> anyhow::Result<DsaTopic> {
        let data = DsaTopicDummy::generate_one(profile_id);
        let data = (self.modifier_one)(&data, ext);
        sqlx::query(INSERT_DSA_TOPIC)
            .bind(data.id)
            .bind(&data.topic_name)
            .bind(&data.category)
            .bind(&data.description)
            .bind(&data.problems_solved)
            .bind(&data.resources)
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
    ) -> anyhow::Result<Vec<DsaTopic>> {
        let mut result: Vec<DsaTopic> = vec![];
        for idx in 0..num {
            let data = DsaTopicDummy::generate_one(profile_id);
            result.push((self.modifier_many)(&data, idx as usize, ext.clone()));
        }
        let mut tx = db.begin().await?;
        for item in result.iter() {
            sqlx::query(INSERT_DSA_TOPIC)
                .bind(item.id)
                .bind(&item.topic_name)
                .bind(&item.category)
                .bind(&item.description)
                .bind(&item.problems_solved)
                .bind(&item.resources)
                .bind(item.profile_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[derive(Debug, Deserialize, Dummy, Clone)]
struct DsaTopicDummy {
    pub topic_name: String,
    #[dummy(faker = "0..2")]
    pub category: usize,
    pub description: Option<String>,
    pub problems_solved: Option<String>,
    pub resources: Option<String>,
}

impl DsaTopicDummy {
    pub fn generate_one(profile_id: Uuid) -> DsaTopic {
        let dummy = Faker.fake::<Self>();
        DsaTopic {
            id: Uuid::now_v7(),
            topic_name: dummy.topic_name,
            category: Some(CATEGORIES[dummy.category].to_string()),
            description: dummy.description,
            problems_solved: dummy.problems_solved,
            resources: dummy.resources,
            profile_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::CATEGORIES;
    use crate::factory::{dsa_topic::DsaTopicFactory, profile::ProfileFactory};

    #[sqlx::test]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
    async fn test_generate_one(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let profile = ProfileFactory::new().generate_one(&pool, ()).await?;

        // When
        let topic = DsaTopicFactory::new()
            .generate_one(&pool, profile.id, ())
            .await?;

        // Expect
        let res: (Option<String>,) =
            sqlx::query_as("SELECT category FROM public.dsa_topic WHERE id = $1")
                .bind(topic.id)
                .fetch_one(&pool)
                .await?;
        assert!(CATEGORIES.contains(&res.0.unwrap().as_str()));
        Ok(())
    }
}
