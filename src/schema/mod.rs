pub mod auth;
pub mod certificate;
pub mod common;
pub mod dsa_topic;
pub mod education;
pub mod health;
pub mod profile;
pub mod project;
pub mod search;
