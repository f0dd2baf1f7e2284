use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::guard::Owned;

pub const TABLE_NAME: &str = "public.certificate";

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, FromRow)]
pub struct Certificate {
    pub id: Uuid,
    pub title: String,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub credential_url: Option<String>,
    pub description: Option<String>,
    pub profile_id: Uuid,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct NewCertificate {
    pub title: String,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub credential_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct CertificatePatch {
    pub title: Option<String>,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub credential_url: Option<String>,
    pub description: Option<String>,
}

impl Certificate {
    pub fn from_new(id: Uuid, profile_id: Uuid, data: NewCertificate) -> Self {
        Self {
            id,
            title: data.title,
            issuer: data.issuer,
            issue_date: data.issue_date,
            credential_url: data.credential_url,
            description: data.description,
            profile_id,
        }
    }

    pub fn apply(&mut self, patch: CertificatePatch) {
        if let Some(val) = patch.title {
            self.title = val;
        }
        if patch.issuer.is_some() {
            self.issuer = patch.issuer;
        }
        if patch.issue_date.is_some() {
            self.issue_date = patch.issue_date;
        }
        if patch.credential_url.is_some() {
            self.credential_url = patch.credential_url;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
    }
}

impl Owned for Certificate {
    fn owner_profile_id(&self) -> Uuid {
        self.profile_id
    }
}
