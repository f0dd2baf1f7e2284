use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::guard::Owned;

pub const TABLE_NAME: &str = "public.project";

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub project_name: String,
    pub techstack: Option<String>,
    pub description: Option<String>,
    pub project_url: Option<String>,
    pub profile_id: Uuid,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct NewProject {
    pub project_name: String,
    pub techstack: Option<String>,
    pub description: Option<String>,
    pub project_url: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ProjectPatch {
    pub project_name: Option<String>,
    pub techstack: Option<String>,
    pub description: Option<String>,
    pub project_url: Option<String>,
}

/// list filters, all optional
#[derive(Clone, Debug, Default)]
pub struct ProjectFilter {
    pub profile_id: Option<Uuid>,
    pub techstack: Option<String>,
    pub sorted: bool,
}

impl Project {
    pub fn from_new(id: Uuid, profile_id: Uuid, data: NewProject) -> Self {
        Self {
            id,
            project_name: data.project_name,
            techstack: data.techstack,
            description: data.description,
            project_url: data.project_url,
            profile_id,
        }
    }

    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(val) = patch.project_name {
            self.project_name = val;
        }
        if patch.techstack.is_some() {
            self.techstack = patch.techstack;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if patch.project_url.is_some() {
            self.project_url = patch.project_url;
        }
    }
}

impl Owned for Project {
    fn owner_profile_id(&self) -> Uuid {
        self.profile_id
    }
}
