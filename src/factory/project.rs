use fake::{faker::lorem::en::Sentence, Dummy, Fake, Faker};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::model::project::Project;

const INSERT_PROJECT: &str = r#"
    INSERT INTO public.project (id, project_name, techstack, description, project_url, profile_id)
    VALUES ($1, $2, $3, $4, $5, $6)"#;

pub struct ProjectFactory<T: Clone> {
    modifier_one: fn(x: &Project, ext: T) -> Project,
    modifier_many: fn(x: &Project, idx: usize, ext: T) -> Project,
}

impl<T: Clone> Default for ProjectFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ProjectFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Project, ext: T) -> Project) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Project, idx: usize, ext: T) -> Project) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(
        &mut self,
        db: &PgPool,
        profile_id: Uuid,
        ext: T,
    ) -> anyhow::Result<Project> {
        let data = ProjectDummy::generate_one(profile_id);
        let data = (self.modifier_one)(&data, ext);
        sqlx::query(INSERT_PROJECT)
            .bind(data.id)
            .bind(&data.project_name)
            .bind(&data.techstack)
            .bind(&data.description)
            .bind(&data.project_url)
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
    ) -> anyhow::Result<Vec<Project>> {
        let mut result: Vec<Project> = vec![];
        for idx in 0..num {
            let data = ProjectDummy::generate_one(profile_id);
            result.push((self.modifier_many)(&data, idx as usize, ext.clone()));
        }
        let mut tx = db.begin().await?;
        for item in result.iter() {
            sqlx::query(INSERT_PROJECT)
                .bind(item.id)
                .bind(&item.project_name)
                .bind(&item.techstack)
                .bind(&item.description)
                .bind(&item.project_url)
                .bind(item.profile_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[derive(Debug, Deserialize, Dummy, Clone)]
struct ProjectDummy {
    pub project_name: String,
    pub techstack: Option<String>,
    #[dummy(faker = "Sentence(3..8)")]
    pub description: String,
    pub project_url: Option<String>,
}

impl ProjectDummy {
    pub fn generate_one(profile_id: Uuid) -> Project {
        let dummy = Faker.fake::<Self>();
        Project {
            id: Uuid::now_v7(),
            project_name: dummy.project_name,
            techstack: dummy.techstack,
            description: Some(dummy.description),
            project_url: dummy.project_url,
            profile_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::{
        factory::{profile::ProfileFactory, project::ProjectFactory},
        model::project::Project,
    };

    #[sqlx::test]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requires DATABASE_URL")]
    async fn test_generate_many_modified(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let profile = ProfileFactory::new().generate_one(&pool, ()).await?;

        // When
        let mut factory = ProjectFactory::new();
        factory.modified_many(|data, idx, _| Project {
            project_name: format!("project {}", idx),
            ..data.clone()
        });
        factory.generate_many(&pool, 3, profile.id, ()).await?;

        // Expect
        let res: Vec<(String,)> =
            sqlx::query_as("SELECT project_name FROM public.project ORDER BY project_name")
                .fetch_all(&pool)
                .await?;
        assert_eq!(
            res.into_iter().map(|x| x.0).collect::<Vec<String>>(),
            vec!["project 0", "project 1", "project 2"]
        );
        Ok(())
    }
}
