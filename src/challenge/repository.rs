use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use super::mapper::ChallengeDetailsMapper;
use super::model::ChallengeDetails;
use crate::codewars::ChallengeApi;
use crate::error::AppError;
use crate::functional::Either;

#[async_trait]
pub trait ChallengeRepository: Send + Sync {
    async fn details(&self, id: &str) -> Either<AppError, ChallengeDetails>;
}

pub struct DefaultChallengeRepository {
    api: Arc<dyn ChallengeApi>,
    mapper: ChallengeDetailsMapper,
}

impl DefaultChallengeRepository {
    pub fn new(api: Arc<dyn ChallengeApi>) -> Self {
        Self {
            api,
            mapper: ChallengeDetailsMapper,
        }
    }
}

#[async_trait]
impl ChallengeRepository for DefaultChallengeRepository {
    async fn details(&self, id: &str) -> Either<AppError, ChallengeDetails> {
        let mapper = self.mapper;
        self.api
            .challenge_details(id)
            .await
            .if_left(|e| error!(id, "Failed to load challenge details: {}", e))
            .if_right(|dto| debug!(id, name = ?dto.name, "Challenge details loaded"))
            .map(|dto| mapper.to_domain(dto))
            .map_left(AppError::from_api)
    }
}
