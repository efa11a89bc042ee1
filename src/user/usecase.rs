use std::sync::Arc;

use super::repository::{ChallengePages, UserRepository};

pub struct GetUserCompletedChallenges {
    repository: Arc<dyn UserRepository>,
}

impl GetUserCompletedChallenges {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub fn run(&self, from_page: u32) -> ChallengePages {
        self.repository.completed_challenges(from_page)
    }
}
