use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use super::model::User;
use crate::codewars::{CompletedChallengeDto, UserApi};
use crate::error::AppError;
use crate::paging::{LoadParams, LoadResult, Page, PagingSource, PagingState};

/// Supplies the user whose history is shown.
pub trait UserDataSource: Send + Sync {
    fn user(&self) -> User;
}

#[derive(Debug, Clone)]
pub struct InMemoryUserDataSource {
    username: String,
}

impl InMemoryUserDataSource {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

impl UserDataSource for InMemoryUserDataSource {
    fn user(&self) -> User {
        User {
            id: self.username.clone(),
        }
    }
}

/// Loads a user's completed challenges one Codewars page at a time. Keys are
/// zero-based page numbers.
pub struct CompletedChallengesPagingSource {
    api: Arc<dyn UserApi>,
    username: String,
}

impl CompletedChallengesPagingSource {
    pub fn new(api: Arc<dyn UserApi>, username: impl Into<String>) -> Self {
        Self {
            api,
            username: username.into(),
        }
    }
}

#[async_trait]
impl PagingSource<CompletedChallengeDto> for CompletedChallengesPagingSource {
    async fn load(&self, params: LoadParams) -> LoadResult<CompletedChallengeDto> {
        let page = params.key.unwrap_or(0);
        let size = params.load_size;
        debug!("Page {} is loading", page);

        self.api
            .completed_challenges(&self.username, page)
            .await
            .fold(
                |e| {
                    error!(
                        username = %self.username,
                        page,
                        "failed to load completed challenges: {}",
                        e
                    );
                    LoadResult::Error(AppError::from_api(e))
                },
                |result| {
                    // the last representable page has no successor
                    let next_key = page
                        .checked_add(1)
                        .filter(|next| !result.data.is_empty() && result.total_pages > *next);
                    let prev_key = page.checked_sub(1);

                    let (items_before, items_after) = if params.placeholders_enabled {
                        let remaining = i64::from(result.total_items)
                            - (i64::from(page) + 1).saturating_mul(i64::from(size));
                        let items_after = remaining.clamp(0, i64::from(size));
                        debug!("Next item bunch count: {}", items_after);
                        (
                            Some(page.saturating_mul(size)),
                            u32::try_from(items_after).ok(),
                        )
                    } else {
                        (None, None)
                    };

                    LoadResult::Page(Page {
                        data: result.data,
                        prev_key,
                        next_key,
                        items_before,
                        items_after,
                    })
                },
            )
    }

    fn refresh_key(&self, state: &PagingState) -> Option<u32> {
        let anchor = state.anchor_position?;
        let page = state.closest_page_to_position(anchor)?;
        page.prev_key
            .map(|key| key + 1)
            .or_else(|| page.next_key.and_then(|key| key.checked_sub(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codewars::CompletedChallengesDto;
    use crate::functional::{Either, Left, Right};
    use crate::network::ApiError;
    use crate::paging::PageInfo;

    struct FakeUserApi {
        total_items: u32,
        total_pages: u32,
        items: usize,
        fail: bool,
    }

    #[async_trait]
    impl UserApi for FakeUserApi {
        async fn completed_challenges(
            &self,
            _username: &str,
            _page: u32,
        ) -> Either<ApiError, CompletedChallengesDto> {
            if self.fail {
                return Left(ApiError::Http {
                    code: 500,
                    body: "oops".to_string(),
                });
            }
            let data = (0..self.items)
                .map(|i| CompletedChallengeDto {
                    id: Some(i.to_string()),
                    name: Some(format!("kata {i}")),
                    slug: None,
                    completed_languages: vec!["rust".to_string()],
                    completed_at: "2020-01-01T00:00:00Z".to_string(),
                })
                .collect();
            Right(CompletedChallengesDto {
                data,
                total_items: self.total_items,
                total_pages: self.total_pages,
            })
        }
    }

    fn source(api: FakeUserApi) -> CompletedChallengesPagingSource {
        CompletedChallengesPagingSource::new(Arc::new(api), "colbydauph")
    }

    fn params(key: Option<u32>, placeholders_enabled: bool) -> LoadParams {
        LoadParams {
            key,
            load_size: 200,
            placeholders_enabled,
        }
    }

    fn page(result: LoadResult<CompletedChallengeDto>) -> Page<CompletedChallengeDto> {
        match result {
            LoadResult::Page(page) => page,
            LoadResult::Error(e) => panic!("unexpected error {e}"),
        }
    }

    #[tokio::test]
    async fn first_page_has_next_and_no_prev() {
        let source = source(FakeUserApi {
            total_items: 450,
            total_pages: 3,
            items: 200,
            fail: false,
        });

        let first = page(source.load(params(None, true)).await);
        assert_eq!(first.prev_key, None);
        assert_eq!(first.next_key, Some(1));
        assert_eq!(first.items_before, Some(0));
        assert_eq!(first.items_after, Some(200));

        let last = page(source.load(params(Some(2), true)).await);
        assert_eq!(last.prev_key, Some(1));
        assert_eq!(last.next_key, None);
        assert_eq!(last.items_before, Some(400));
        assert_eq!(last.items_after, Some(0));
    }

    #[tokio::test]
    async fn middle_page_counts_partial_remainder() {
        let source = source(FakeUserApi {
            total_items: 450,
            total_pages: 3,
            items: 200,
            fail: false,
        });

        let middle = page(source.load(params(Some(1), true)).await);
        assert_eq!(middle.items_after, Some(50));
    }

    #[tokio::test]
    async fn empty_page_stops_paging() {
        let source = source(FakeUserApi {
            total_items: 0,
            total_pages: 5,
            items: 0,
            fail: false,
        });

        let empty = page(source.load(params(Some(0), false)).await);
        assert_eq!(empty.next_key, None);
        assert_eq!(empty.items_after, None);
        assert_eq!(empty.items_before, None);
    }

    #[tokio::test]
    async fn last_possible_page_has_no_next_key() {
        let source = source(FakeUserApi {
            total_items: 3,
            total_pages: u32::MAX,
            items: 1,
            fail: false,
        });

        let last = page(source.load(params(Some(u32::MAX), true)).await);
        assert_eq!(last.next_key, None);
        assert_eq!(last.prev_key, Some(u32::MAX - 1));
        assert_eq!(last.items_before, Some(u32::MAX));
        assert_eq!(last.items_after, Some(0));
    }

    #[tokio::test]
    async fn api_failure_becomes_load_error() {
        let source = source(FakeUserApi {
            total_items: 0,
            total_pages: 0,
            items: 0,
            fail: true,
        });

        assert!(matches!(
            source.load(params(None, true)).await,
            LoadResult::Error(AppError::Api(ApiError::Http { code: 500, .. }))
        ));
    }

    struct UnknownUserApi;

    #[async_trait]
    impl UserApi for UnknownUserApi {
        async fn completed_challenges(
            &self,
            _username: &str,
            _page: u32,
        ) -> Either<ApiError, CompletedChallengesDto> {
            Left(ApiError::Http {
                code: 404,
                body: r#"{"success":false}"#.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn unknown_user_is_narrowed_to_not_found() {
        let source = CompletedChallengesPagingSource::new(Arc::new(UnknownUserApi), "nobody");

        assert!(matches!(
            source.load(params(None, true)).await,
            LoadResult::Error(AppError::NotFound)
        ));
    }

    #[test]
    fn refresh_key_uses_neighbouring_keys() {
        let source = source(FakeUserApi {
            total_items: 0,
            total_pages: 0,
            items: 0,
            fail: false,
        });

        let state = PagingState {
            anchor_position: Some(250),
            pages: vec![
                PageInfo { prev_key: None, next_key: Some(1), len: 200 },
                PageInfo { prev_key: Some(0), next_key: Some(2), len: 200 },
            ],
        };
        assert_eq!(source.refresh_key(&state), Some(1));

        let first_only = PagingState {
            anchor_position: Some(3),
            pages: vec![PageInfo { prev_key: None, next_key: Some(1), len: 200 }],
        };
        assert_eq!(source.refresh_key(&first_only), Some(0));

        assert_eq!(source.refresh_key(&PagingState::default()), None);
    }
}
