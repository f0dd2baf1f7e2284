use serde::Deserialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.credential";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Credential {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub profile_id: Option<Uuid>,
}
