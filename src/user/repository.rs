use std::sync::Arc;

use futures::StreamExt;
use futures::stream::BoxStream;
use tracing::warn;

use super::mapper::CompletedChallengeMapper;
use super::model::CompletedChallenge;
use super::source::{CompletedChallengesPagingSource, UserDataSource};
use crate::codewars::{CompletedChallengeDto, UserApi};
use crate::error::AppError;
use crate::paging::{Page, Pager, PagingConfig};

/// Codewars always answers with pages of this many items.
pub const CODEWARS_PAGE_SIZE: u32 = 200;

pub type ChallengePages = BoxStream<'static, Result<Page<CompletedChallenge>, AppError>>;

pub trait UserRepository: Send + Sync {
    /// Streams the current user's completed challenges, starting at page
    /// `from_page` (zero-based).
    fn completed_challenges(&self, from_page: u32) -> ChallengePages;
}

pub struct PagedUserRepository {
    api: Arc<dyn UserApi>,
    mapper: CompletedChallengeMapper,
    user_data_source: Arc<dyn UserDataSource>,
    config: PagingConfig,
}

impl PagedUserRepository {
    pub fn new(api: Arc<dyn UserApi>, user_data_source: Arc<dyn UserDataSource>) -> Self {
        Self {
            api,
            mapper: CompletedChallengeMapper,
            user_data_source,
            config: PagingConfig::new(CODEWARS_PAGE_SIZE),
        }
    }
}

impl UserRepository for PagedUserRepository {
    fn completed_challenges(&self, from_page: u32) -> ChallengePages {
        let source = CompletedChallengesPagingSource::new(
            Arc::clone(&self.api),
            self.user_data_source.user().id,
        );
        let mapper = self.mapper;

        Pager::<CompletedChallengeDto>::new(self.config, Arc::new(source))
            .stream(Some(from_page))
            .map(move |page| {
                page.map(|page| {
                    page.filter_map(|dto| {
                        let id = dto.id.clone().unwrap_or_default();
                        mapper
                            .to_domain(dto)
                            .inspect_err(|e| {
                                warn!(id = %id, "skipping challenge with bad timestamp: {}", e);
                            })
                            .ok()
                    })
                })
            })
            .boxed()
    }
}
