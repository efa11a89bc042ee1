use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};
use crossterm::style::{Color, Stylize};

use crate::challenge::{ActionBy, ChallengeDetails, ChallengeStats, Rank, RankColor};

/// "4/6/17, 4:32 PM"
const SHORT_DATE_TIME: &str = "%-m/%-d/%y, %-I:%M %p";

const RANK_WHITE: Color = Color::Rgb {
    r: 0xCA,
    g: 0xC4,
    b: 0xCF,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankUiModel {
    pub name: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionByUiModel {
    pub name: String,
    pub url: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeDetailsUiModel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub url: Option<String>,
    pub rank: Option<RankUiModel>,
    pub created_by: Option<ActionByUiModel>,
    pub approved_by: Option<ActionByUiModel>,
    pub languages: Vec<String>,
    pub tags: Vec<String>,
    pub stats: ChallengeStats,
}

#[derive(Debug, Clone)]
pub struct ChallengeDetailsUiMapper<Tz: TimeZone = Local> {
    tz: Tz,
}

impl ChallengeDetailsUiMapper<Local> {
    pub fn local() -> Self {
        Self { tz: Local }
    }
}

impl<Tz> ChallengeDetailsUiMapper<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    pub fn with_timezone(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn to_ui(&self, from: ChallengeDetails) -> ChallengeDetailsUiModel {
        ChallengeDetailsUiModel {
            rank: from.rank.and_then(rank_to_ui),
            created_by: from.created_by.map(|by| self.action_to_ui(by)),
            approved_by: from.approved_by.map(|by| self.action_to_ui(by)),
            languages: from.languages.into_iter().map(|l| l.name).collect(),
            tags: from.tags.into_iter().map(|t| t.name).collect(),
            id: from.id,
            name: from.name,
            description: from.description,
            category: from.category,
            url: from.url,
            stats: from.stats,
        }
    }

    fn action_to_ui(&self, by: ActionBy) -> ActionByUiModel {
        ActionByUiModel {
            name: by.name,
            url: by.url,
            date: by.date.map(|date| self.format(date)),
        }
    }

    fn format(&self, date: DateTime<Utc>) -> String {
        date.with_timezone(&self.tz)
            .format(SHORT_DATE_TIME)
            .to_string()
    }
}

fn rank_to_ui(rank: Rank) -> Option<RankUiModel> {
    let color = match rank.color {
        RankColor::White => RANK_WHITE,
        RankColor::Yellow => Color::Yellow,
        RankColor::Blue => Color::Blue,
        RankColor::Purple => Color::Cyan,
        RankColor::Unknown => return None,
    };
    if rank.value.is_empty() {
        return None;
    }
    Some(RankUiModel {
        name: rank.value,
        color,
    })
}

impl ChallengeDetailsUiModel {
    /// Multi-line terminal rendering. Colours are applied only when `styled`.
    pub fn render(&self, styled: bool) -> String {
        let mut lines = Vec::new();

        let mut header = if styled {
            self.name.as_str().bold().to_string()
        } else {
            self.name.clone()
        };
        if let Some(rank) = &self.rank {
            header.push_str("  ");
            if styled {
                header.push_str(&rank.name.as_str().with(rank.color).to_string());
            } else {
                header.push_str(&rank.name);
            }
        }
        lines.push(header);

        if !self.category.is_empty() {
            lines.push(format!("Category:  {}", self.category));
        }
        if !self.languages.is_empty() {
            lines.push(format!("Languages: {}", self.languages.join(", ")));
        }
        if !self.tags.is_empty() {
            lines.push(format!("Tags:      {}", self.tags.join(", ")));
        }
        if let Some(by) = &self.created_by {
            lines.push(format!("Created:   {}", action_line(by)));
        }
        if let Some(by) = &self.approved_by {
            lines.push(format!("Approved:  {}", action_line(by)));
        }

        let stats = &self.stats;
        lines.push(format!(
            "Stats:     {} attempts, {} completed ({}%), {} stars, score {}",
            stats.total_attempts,
            stats.total_completed,
            stats.success_percent(),
            stats.total_stars,
            stats.vote_score
        ));
        lines.push(format!(
            "Open:      {} issues, {} suggestions",
            stats.unresolved_issues, stats.unresolved_suggestions
        ));
        if let Some(url) = &self.url {
            lines.push(format!("URL:       {}", url));
        }

        let description = self.description.trim_end();
        if !description.is_empty() {
            lines.push(String::new());
            lines.push(description.to_string());
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn action_line(by: &ActionByUiModel) -> String {
    match &by.date {
        Some(date) => format!("{} on {}", by.name, date),
        None => by.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::Tag;
    use crate::model::Language;

    fn details() -> ChallengeDetails {
        ChallengeDetails {
            id: "5277c8a221e209d3f6000b56".to_string(),
            name: "Valid Braces".to_string(),
            category: "reference".to_string(),
            description: "Check the braces.\n".to_string(),
            url: None,
            languages: vec![Language::new("rust")],
            tags: vec![Tag {
                name: "Algorithms".to_string(),
            }],
            rank: Some(Rank {
                value: "4 kyu".to_string(),
                color: RankColor::Blue,
            }),
            created_by: Some(ActionBy {
                name: "xDranik".to_string(),
                url: None,
                date: Some(Utc.with_ymd_and_hms(2013, 11, 5, 0, 7, 31).unwrap()),
            }),
            approved_by: Some(ActionBy {
                name: "jhoffner".to_string(),
                url: None,
                date: Some(Utc.with_ymd_and_hms(2013, 12, 20, 14, 53, 6).unwrap()),
            }),
            stats: ChallengeStats {
                total_attempts: 4,
                total_completed: 1,
                ..ChallengeStats::default()
            },
        }
    }

    #[test]
    fn approver_comes_from_approved_by() {
        let ui = ChallengeDetailsUiMapper::with_timezone(Utc).to_ui(details());

        let creator = ui.created_by.unwrap();
        assert_eq!(creator.name, "xDranik");
        assert_eq!(creator.date.as_deref(), Some("11/5/13, 12:07 AM"));

        let approver = ui.approved_by.unwrap();
        assert_eq!(approver.name, "jhoffner");
        assert_eq!(approver.date.as_deref(), Some("12/20/13, 2:53 PM"));
    }

    #[test]
    fn rank_colors() {
        let mapper = ChallengeDetailsUiMapper::with_timezone(Utc);
        let with_rank = |value: &str, color| {
            let mut details = details();
            details.rank = Some(Rank {
                value: value.to_string(),
                color,
            });
            mapper.to_ui(details).rank
        };

        assert_eq!(with_rank("4 kyu", RankColor::Blue).unwrap().color, Color::Blue);
        assert_eq!(with_rank("1 kyu", RankColor::Purple).unwrap().color, Color::Cyan);
        assert_eq!(with_rank("8 kyu", RankColor::White).unwrap().color, RANK_WHITE);
        assert_eq!(with_rank("beta", RankColor::Unknown), None);
        assert_eq!(with_rank("", RankColor::Yellow), None);
    }

    #[test]
    fn plain_render() {
        let ui = ChallengeDetailsUiMapper::with_timezone(Utc).to_ui(details());
        let text = ui.render(false);

        assert!(text.starts_with("Valid Braces  4 kyu\n"));
        assert!(text.contains("Approved:  jhoffner on 12/20/13, 2:53 PM\n"));
        assert!(text.contains("4 attempts, 1 completed (25%)"));
        assert!(text.ends_with("Check the braces.\n"));
        assert!(!text.contains('\u{1b}'));
    }
}
