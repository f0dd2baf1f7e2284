pub mod credential_store;
pub mod db;
pub mod guard;
pub mod security;
pub mod sqlx_utils;
pub mod test_utils;
pub mod utils;
