use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::guard::Owned;

pub const TABLE_NAME: &str = "public.dsa_topic";

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, FromRow)]
pub struct DsaTopic {
    pub id: Uuid,
    pub topic_name: String,
    /// "Data Structure" or "Algorithm"
    pub category: Option<String>,
    pub description: Option<String>,
    /// comma separated problem names
    pub problems_solved: Option<String>,
    pub resources: Option<String>,
    pub profile_id: Uuid,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct NewDsaTopic {
    pub topic_name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub problems_solved: Option<String>,
    pub resources: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct DsaTopicPatch {
    pub topic_name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub problems_solved: Option<String>,
    pub resources: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct DsaTopicFilter {
    pub profile_id: Option<Uuid>,
    pub category: Option<String>,
}

impl DsaTopic {
    pub fn from_new(id: Uuid, profile_id: Uuid, data: NewDsaTopic) -> Self {
        Self {
            id,
            topic_name: data.topic_name,
            category: data.category,
            description: data.description,
            problems_solved: data.problems_solved,
            resources: data.resources,
            profile_id,
        }
    }

    pub fn apply(&mut self, patch: DsaTopicPatch) {
        if let Some(val) = patch.topic_name {
            self.topic_name = val;
        }
        if patch.category.is_some() {
            self.category = patch.category;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if patch.problems_solved.is_some() {
            self.problems_solved = patch.problems_solved;
        }
        if patch.resources.is_some() {
            self.resources = patch.resources;
        }
    }

    pub fn problems(&self) -> Vec<&str> {
        match &self.problems_solved {
            Some(val) => val
                .split(',')
                .map(|x| x.trim())
                .filter(|x| !x.is_empty())
                .collect(),
            None => vec![],
        }
    }
}

impl Owned for DsaTopic {
    fn owner_profile_id(&self) -> Uuid {
        self.profile_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problems_split() {
        let topic = DsaTopic::from_new(
            Uuid::now_v7(),
            Uuid::now_v7(),
            NewDsaTopic {
                topic_name: "Stacks".to_string(),
                problems_solved: Some("Valid Parentheses, Min Stack,, ".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(topic.problems(), vec!["Valid Parentheses", "Min Stack"]);
    }

    #[test]
    fn test_apply() {
        let mut topic = DsaTopic::from_new(
            Uuid::now_v7(),
            Uuid::now_v7(),
            NewDsaTopic {
                topic_name: "Queues".to_string(),
                category: Some("Data Structure".to_string()),
                ..Default::default()
            },
        );
        topic.apply(DsaTopicPatch {
            topic_name: Some("Deques".to_string()),
            ..Default::default()
        });
        assert_eq!(topic.topic_name, "Deques");
        assert_eq!(topic.category, Some("Data Structure".to_string()));
    }
}
