use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::guard::Owned;

pub const TABLE_NAME: &str = "public.profile";

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub leetcode: Option<String>,
    pub bio: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct NewProfile {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub leetcode: Option<String>,
    pub bio: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub leetcode: Option<String>,
    pub bio: Option<String>,
}

impl NewProfile {
    /// empty profile created alongside a newly registered credential
    pub fn for_username(username: &str) -> Self {
        Self {
            full_name: username.to_string(),
            email: format!("{}@example.com", username),
            ..Default::default()
        }
    }
}

impl Profile {
    pub fn from_new(id: Uuid, data: NewProfile) -> Self {
        Self {
            id,
            full_name: data.full_name,
            email: data.email,
            phone: data.phone,
            location: data.location,
            linkedin: data.linkedin,
            github: data.github,
            leetcode: data.leetcode,
            bio: data.bio,
        }
    }

    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(val) = patch.full_name {
            self.full_name = val;
        }
        if let Some(val) = patch.email {
            self.email = val;
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
        if patch.location.is_some() {
            self.location = patch.location;
        }
        if patch.linkedin.is_some() {
            self.linkedin = patch.linkedin;
        }
        if patch.github.is_some() {
            self.github = patch.github;
        }
        if patch.leetcode.is_some() {
            self.leetcode = patch.leetcode;
        }
        if patch.bio.is_some() {
            self.bio = patch.bio;
        }
    }
}

impl Owned for Profile {
    fn owner_profile_id(&self) -> Uuid {
        self.id
    }
}
