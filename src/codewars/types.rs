use serde::{Deserialize, Serialize};

use crate::network::ResponseBody;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedChallengesDto {
    pub data: Vec<CompletedChallengeDto>,
    pub total_items: u32,
    pub total_pages: u32,
}

// Codewars may omit id, name or slug for retired katas.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedChallengeDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    #[serde(default)]
    pub completed_languages: Vec<String>,
    pub completed_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeDetailsDto {
    pub id: String,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub published_at: Option<String>,
    pub approved_at: Option<String>,
    pub languages: Option<Vec<String>>,
    pub url: Option<String>,
    pub rank: Option<RankDto>,
    pub created_at: Option<String>,
    pub created_by: Option<ActionByDto>,
    pub approved_by: Option<ActionByDto>,
    pub description: Option<String>,
    pub total_attempts: Option<i64>,
    pub total_completed: Option<i64>,
    pub total_stars: Option<i64>,
    pub vote_score: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub contributors_wanted: Option<bool>,
    pub unresolved: Option<UnresolvedDto>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RankDto {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ActionByDto {
    pub username: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UnresolvedDto {
    pub issues: Option<i64>,
    pub suggestions: Option<i64>,
}

impl ResponseBody for CompletedChallengesDto {}
impl ResponseBody for ChallengeDetailsDto {}
