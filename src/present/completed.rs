use std::fmt;

use chrono::{Local, TimeZone};

use crate::user::CompletedChallenge;

/// "Apr 6, 2017, 4:32:09 PM"
const MEDIUM_DATE_TIME: &str = "%b %-d, %Y, %-I:%M:%S %p";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedChallengeUiModel {
    pub id: String,
    pub name: String,
    pub completed_languages: Vec<String>,
    pub completed_at: String,
}

impl fmt::Display for CompletedChallengeUiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.completed_at, self.name)?;
        if !self.completed_languages.is_empty() {
            write!(f, " [{}]", self.completed_languages.join(", "))?;
        }
        write!(f, "  ({})", self.id)
    }
}

#[derive(Debug, Clone)]
pub struct CompletedChallengeUiMapper<Tz: TimeZone = Local> {
    tz: Tz,
}

impl CompletedChallengeUiMapper<Local> {
    pub fn local() -> Self {
        Self { tz: Local }
    }
}

impl<Tz> CompletedChallengeUiMapper<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    pub fn with_timezone(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn to_ui(&self, from: CompletedChallenge) -> CompletedChallengeUiModel {
        CompletedChallengeUiModel {
            completed_at: from
                .completed_at
                .with_timezone(&self.tz)
                .format(MEDIUM_DATE_TIME)
                .to_string(),
            completed_languages: from
                .completed_languages
                .into_iter()
                .map(|language| language.name)
                .collect(),
            id: from.id,
            name: from.name,
        }
    }
}
