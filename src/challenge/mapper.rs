use chrono::{DateTime, Utc};
use tracing::warn;

use super::model::{ActionBy, ChallengeDetails, ChallengeStats, Rank, RankColor, Tag};
use crate::codewars::{ActionByDto, ChallengeDetailsDto, RankDto};
use crate::model::Language;

#[derive(Debug, Clone, Copy, Default)]
pub struct ChallengeDetailsMapper;

impl ChallengeDetailsMapper {
    pub fn to_domain(&self, from: ChallengeDetailsDto) -> ChallengeDetails {
        let unresolved = from.unresolved.as_ref();
        let stats = ChallengeStats {
            total_attempts: from.total_attempts.unwrap_or(0),
            total_completed: from.total_completed.unwrap_or(0),
            total_stars: from.total_stars.unwrap_or(0),
            vote_score: from.vote_score.unwrap_or(0),
            unresolved_issues: unresolved.and_then(|u| u.issues).unwrap_or(0),
            unresolved_suggestions: unresolved.and_then(|u| u.suggestions).unwrap_or(0),
        };

        ChallengeDetails {
            category: from.category.unwrap_or_default(),
            description: from.description.unwrap_or_default(),
            languages: from
                .languages
                .unwrap_or_default()
                .into_iter()
                .map(Language::new)
                .collect(),
            tags: from
                .tags
                .unwrap_or_default()
                .into_iter()
                .map(|name| Tag { name })
                .collect(),
            name: from.name.unwrap_or_default(),
            url: from.url,
            stats,
            rank: from.rank.map(rank_to_domain),
            created_by: from
                .created_by
                .map(|by| action_to_domain(by, from.created_at.as_deref())),
            approved_by: from
                .approved_by
                .map(|by| action_to_domain(by, from.approved_at.as_deref())),
            id: from.id,
        }
    }
}

fn rank_to_domain(rank: RankDto) -> Rank {
    Rank {
        value: rank.name.unwrap_or_default(),
        color: rank
            .color
            .as_deref()
            .map_or(RankColor::Unknown, RankColor::parse),
    }
}

fn action_to_domain(by: ActionByDto, date: Option<&str>) -> ActionBy {
    let date = date.and_then(|raw| match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(e) => {
            warn!(raw, "ignoring unparseable date: {}", e);
            None
        }
    });

    ActionBy {
        name: by.username,
        url: by.url,
        date,
    }
}
