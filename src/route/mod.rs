pub mod auth;
pub mod certificate;
#[cfg(test)]
mod certificate_test;
pub mod dsa_topic;
pub mod education;
#[cfg(test)]
mod education_test;
pub mod health;
#[cfg(test)]
mod health_test;
pub mod profile;
#[cfg(test)]
mod profile_test;
pub mod project;
#[cfg(test)]
mod project_test;
pub mod search;
#[cfg(test)]
mod search_test;
