pub mod certificate;
pub mod dsa_topic;
pub mod education;
pub mod profile;
pub mod project;
