use fake::{Dummy, Fake, Faker};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::model::education::Education;

const INSERT_EDUCATION: &str = r#"
    INSERT INTO public.education (id, institution, degree, field_of_study, start_year, end_year, grade, description, profile_id)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#;

/// Rows are always attached to an existing profile
pub struct EducationFactory<T: Clone> {
    modifier_one: fn(x: &Education, ext: T) -> Education,
    modifier_many: fn(x: &Education, idx: usize, ext: T) -> Education,
}

impl<T: Clone> Default for EducationFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> EducationFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Education, ext: T) -> Education) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Education, idx: usize, ext: T) -> Education) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(
        &mut self,
        db: &PgPool,
        profile_id: Uuid,
        ext: T,
    ) -> anyhow::Result<Education> {
        let data = EducationDummy::generate_one(profile_id);
        let data = (self.modifier_one)(&data, ext);
        sqlx::query(INSERT_EDUCATION)
            .bind(data.id)
            .bind(&data.institution)
            .bind(&data.degree)
            .bind(&data.field_of_study)
            .bind(&data.start_year)
            .bind(&data.end_year)
            .bind(&data.grade)
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
    ) -> anyhow::Result<Vec<Education>> {
        let mut result: Vec<Education> = vec![];
        for idx in 0..num {
            let data = EducationDummy::generate_one(profile_id);
            result.push((self.modifier_many)(&data, idx as usize, ext.clone()));
        }
        let mut tx = db.begin().await?;
        for item in result.iter() {
            sqlx::query(INSERT_EDUCATION)
                .bind(item.id)
                .bind(&item.institution)
                .bind(&item.degree)
                .bind(&item.field_of_study)
                .bind(&item.start_year)
                .bind(&item.end_year)
                .bind(&item.grade)
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
struct EducationDummy {
    pub institution: String,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    #[dummy(faker = "1990..2020")]
    pub start_year: u16,
    #[dummy(faker = "0..6")]
    pub duration: u16,
    pub grade: Option<String>,
    pub description: Option<String>,
}

impl EducationDummy {
    pub fn generate_one(profile_id: Uuid) -> Education {
        let dummy = Faker.fake::<Self>();
        Education {
            id: Uuid::now_v7(),
            institution: dummy.institution,
            degree: dummy.degree,
            field_of_study: dummy.field_of_study,
            start_year: Some(dummy.start_year.to_string()),
            end_year: Some((dummy.start_year + dummy.duration).to_string()),
            grade: dummy.grade,
            description: dummy.description,
            profile_id,
        }
    }
}
