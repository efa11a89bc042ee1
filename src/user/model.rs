use chrono::{DateTime, Utc};

use crate::model::Language;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedChallenge {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub completed_languages: Vec<Language>,
    pub completed_at: DateTime<Utc>,
}
