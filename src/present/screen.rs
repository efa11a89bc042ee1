use chrono::{Local, TimeZone};
use tracing::debug;

use super::details::{ChallengeDetailsUiMapper, ChallengeDetailsUiModel};
use crate::challenge::GetChallengeDetails;
use crate::error::AppError;
use crate::functional::{Left, Right};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeDetailsError {
    None,
    NetworkError,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeDetailsScreenState {
    pub is_loading: bool,
    pub error: ChallengeDetailsError,
    pub details: Option<ChallengeDetailsUiModel>,
    pub challenge_name: String,
}

/// Holds the state of the challenge details view and reloads it on demand.
pub struct ChallengeDetailsScreen<Tz: TimeZone = Local> {
    challenge_id: String,
    get_details: GetChallengeDetails,
    mapper: ChallengeDetailsUiMapper<Tz>,
    state: ChallengeDetailsScreenState,
}

impl<Tz> ChallengeDetailsScreen<Tz>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    pub fn new(
        challenge_id: impl Into<String>,
        challenge_name: impl Into<String>,
        get_details: GetChallengeDetails,
        mapper: ChallengeDetailsUiMapper<Tz>,
    ) -> Self {
        Self {
            challenge_id: challenge_id.into(),
            get_details,
            mapper,
            state: ChallengeDetailsScreenState {
                is_loading: true,
                error: ChallengeDetailsError::None,
                details: None,
                challenge_name: challenge_name.into(),
            },
        }
    }

    pub fn state(&self) -> &ChallengeDetailsScreenState {
        &self.state
    }

    pub async fn load(&mut self) -> &ChallengeDetailsScreenState {
        self.state.is_loading = true;

        let state = &mut self.state;
        match self.get_details.run(&self.challenge_id).await {
            Left(error) => {
                state.error = match error {
                    AppError::NotFound => ChallengeDetailsError::NotFound,
                    AppError::Api(_) => ChallengeDetailsError::NetworkError,
                };
                state.details = None;
            }
            Right(details) => {
                if state.challenge_name.is_empty() {
                    state.challenge_name.clone_from(&details.name);
                }
                state.error = ChallengeDetailsError::None;
                state.details = Some(self.mapper.to_ui(details));
            }
        }
        state.is_loading = false;

        &self.state
    }

    pub async fn retry(&mut self) -> &ChallengeDetailsScreenState {
        debug!(id = %self.challenge_id, "Retrying challenge details");
        self.load().await
    }
}
