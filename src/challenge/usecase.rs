use std::sync::Arc;

use super::model::ChallengeDetails;
use super::repository::ChallengeRepository;
use crate::error::AppError;
use crate::functional::Either;

pub struct GetChallengeDetails {
    repository: Arc<dyn ChallengeRepository>,
}

impl GetChallengeDetails {
    pub fn new(repository: Arc<dyn ChallengeRepository>) -> Self {
        Self { repository }
    }

    pub async fn run(&self, id: &str) -> Either<AppError, ChallengeDetails> {
        self.repository.details(id).await
    }
}
