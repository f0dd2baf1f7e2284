use fake::{
    faker::{internet::en::SafeEmail, name::en::Name},
    Dummy, Fake, Faker,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::model::profile::Profile;

const INSERT_PROFILE: &str = r#"
    INSERT INTO public.profile (id, full_name, email, phone, location, linkedin, github, leetcode, bio)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#;

pub struct ProfileFactory<T: Clone> {
    modifier_one: fn(x: &Profile, ext: T) -> Profile,
    modifier_many: fn(x: &Profile, idx: usize, ext: T) -> Profile,
}

impl<T: Clone> Default for ProfileFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ProfileFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Profile, ext: T) -> Profile) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Profile, idx: usize, ext: T) -> Profile) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<Profile> {
        let data = ProfileDummy::generate_one();
        let data = (self.modifier_one)(&data, ext);
        sqlx::query(INSERT_PROFILE)
            .bind(data.id)
            .bind(&data.full_name)
            .bind(&data.email)
            .bind(&data.phone)
            .bind(&data.location)
            .bind(&data.linkedin)
            .bind(&data.github)
            .bind(&data.leetcode)
            .bind(&data.bio)
            .execute(db)
            .await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<Profile>> {
        let data = ProfileDummy::generate_many(num);
        let mut result: Vec<Profile> = vec![];
        for (idx, item) in data.iter().enumerate() {
            result.push((self.modifier_many)(item, idx, ext.clone()));
        }
        let mut tx = db.begin().await?;
        for item in result.iter() {
            sqlx::query(INSERT_PROFILE)
                .bind(item.id)
                .bind(&item.full_name)
                .bind(&item.email)
                .bind(&item.phone)
                .bind(&item.location)
                .bind(&item.linkedin)
                .bind(&item.github)
                .bind(&item.leetcode)
                .bind(&item.bio)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[derive(Debug, Deserialize, Dummy, Clone)]
struct ProfileDummy {
    #[dummy(faker = "Name()")]
    pub full_name: String,
    #[dummy(faker = "SafeEmail()")]
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
}

impl ProfileDummy {
    fn into_profile(self, email: String) -> Profile {
        Profile {
            id: Uuid::now_v7(),
            full_name: self.full_name,
            email,
            phone: self.phone,
            location: self.location,
            linkedin: None,
            github: None,
            leetcode: None,
            bio: self.bio,
        }
    }

    pub fn generate_one() -> Profile {
        let dummy = Faker.fake::<Self>();
        let email = dummy.email.clone();
        dummy.into_profile(email)
    }

    /// emails get an index prefix so the unique constraint holds
    pub fn generate_many(num: u32) -> Vec<Profile> {
        (0..num)
            .map(|idx| {
                let dummy = Faker.fake::<Self>();
                let email = format!("{}.{}", idx, dummy.email);
                dummy.into_profile(email)
            })
            .collect()
    }
}
