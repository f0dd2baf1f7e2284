use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::guard::Owned;

pub const TABLE_NAME: &str = "public.education";

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, FromRow)]
pub struct Education {
    pub id: Uuid,
    pub institution: String,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub grade: Option<String>,
    pub description: Option<String>,
    pub profile_id: Uuid,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct NewEducation {
    pub institution: String,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub grade: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct EducationPatch {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub grade: Option<String>,
    pub description: Option<String>,
}

impl Education {
    pub fn from_new(id: Uuid, profile_id: Uuid, data: NewEducation) -> Self {
        Self {
            id,
            institution: data.institution,
            degree: data.degree,
            field_of_study: data.field_of_study,
            start_year: data.start_year,
            end_year: data.end_year,
            grade: data.grade,
            description: data.description,
            profile_id,
        }
    }

    /// copy the fields present in `patch`, keep the rest
    pub fn apply(&mut self, patch: EducationPatch) {
        if let Some(val) = patch.institution {
            self.institution = val;
        }
        if patch.degree.is_some() {
            self.degree = patch.degree;
        }
        if patch.field_of_study.is_some() {
            self.field_of_study = patch.field_of_study;
        }
        if patch.start_year.is_some() {
            self.start_year = patch.start_year;
        }
        if patch.end_year.is_some() {
            self.end_year = patch.end_year;
        }
        if patch.grade.is_some() {
            self.grade = patch.grade;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
    }
}

impl Owned for Education {
    fn owner_profile_id(&self) -> Uuid {
        self.profile_id
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_apply_only_present_fields() {
        let profile_id = Uuid::now_v7();
        let mut education = Education::from_new(
            Uuid::now_v7(),
            profile_id,
            NewEducation {
                institution: "State University".to_string(),
                degree: Some("B.Sc".to_string()),
                end_year: Some("2020".to_string()),
                ..Default::default()
            },
        );
        education.apply(EducationPatch {
            grade: Some("3.9".to_string()),
            end_year: Some("2021".to_string()),
            ..Default::default()
        });
        assert_eq!(education.institution, "State University");
        assert_eq!(education.degree, Some("B.Sc".to_string()));
        assert_eq!(education.end_year, Some("2021".to_string()));
        assert_eq!(education.grade, Some("3.9".to_string()));
        assert_eq!(education.field_of_study, None);
        assert_eq!(education.profile_id, profile_id);
    }
}
