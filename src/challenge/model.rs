use chrono::{DateTime, Utc};

use crate::model::Language;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankColor {
    White,
    Yellow,
    Blue,
    Purple,
    Unknown,
}

impl RankColor {
    pub fn parse(color: &str) -> Self {
        match color {
            "white" => RankColor::White,
            "yellow" => RankColor::Yellow,
            "blue" => RankColor::Blue,
            "purple" => RankColor::Purple,
            _ => RankColor::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rank {
    pub value: String,
    pub color: RankColor,
}

/// Who created or approved a challenge, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBy {
    pub name: String,
    pub url: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChallengeStats {
    pub total_attempts: i64,
    pub total_completed: i64,
    pub total_stars: i64,
    pub vote_score: i64,
    pub unresolved_issues: i64,
    pub unresolved_suggestions: i64,
}

impl ChallengeStats {
    /// Share of attempts that were completed, floored and clamped to 0..=100.
    pub fn success_percent(&self) -> u8 {
        if self.total_attempts <= 0 || self.total_completed < 0 {
            return 0;
        }
        let percent = self.total_completed.saturating_mul(100) / self.total_attempts;
        // clamped above, so the cast is lossless
        u8::try_from(percent.clamp(0, 100)).unwrap_or(100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeDetails {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub url: Option<String>,
    pub languages: Vec<Language>,
    pub tags: Vec<Tag>,
    pub rank: Option<Rank>,
    pub created_by: Option<ActionBy>,
    pub approved_by: Option<ActionBy>,
    pub stats: ChallengeStats,
}
