//! Ownership check applied before a record is mutated.

use uuid::Uuid;

use super::security::Claims;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allow)
    }
}

/// Records owned by a profile.
pub trait Owned {
    fn owner_profile_id(&self) -> Uuid;
}

/// `Allow` iff the token was minted for the profile owning the record.
pub fn authorize(claims: &Claims, resource_owner_profile_id: &Uuid) -> Access {
    if claims.profile_id == *resource_owner_profile_id {
        Access::Allow
    } else {
        Access::Deny
    }
}

pub fn authorize_record<R: Owned>(claims: &Claims, record: &R) -> Access {
    let access = authorize(claims, &record.owner_profile_id());
    if !access.is_allowed() {
        tracing::warn!(
            "deny {} (profile {}) on record owned by profile {}",
            claims.sub,
            claims.profile_id,
            record.owner_profile_id()
        );
    }
    access
}
