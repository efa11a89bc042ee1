use chrono::{DateTime, Utc};

use super::model::CompletedChallenge;
use crate::codewars::CompletedChallengeDto;
use crate::model::Language;

#[derive(Debug, Clone, Copy, Default)]
pub struct CompletedChallengeMapper;

impl CompletedChallengeMapper {
    pub fn to_domain(
        &self,
        from: CompletedChallengeDto,
    ) -> Result<CompletedChallenge, chrono::ParseError> {
        let completed_at = DateTime::parse_from_rfc3339(&from.completed_at)?.with_timezone(&Utc);
        Ok(CompletedChallenge {
            id: from.id.unwrap_or_default(),
            name: from.name.unwrap_or_default(),
            slug: from.slug.unwrap_or_default(),
            completed_languages: from
                .completed_languages
                .into_iter()
                .map(Language::new)
                .collect(),
            completed_at,
        })
    }
}
