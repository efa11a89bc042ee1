//! Page-keyed loading of remote lists.
//!
//! A [`PagingSource`] loads one page for a key. A [`Pager`] walks the keys
//! and exposes the pages as a stream.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    pub page_size: u32,
    pub initial_load_size: u32,
    pub enable_placeholders: bool,
}

impl PagingConfig {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            initial_load_size: page_size,
            enable_placeholders: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadParams {
    pub key: Option<u32>,
    pub load_size: u32,
    pub placeholders_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub prev_key: Option<u32>,
    pub next_key: Option<u32>,
    pub items_before: Option<u32>,
    pub items_after: Option<u32>,
}

impl<T> Page<T> {
    /// Maps every item, dropping those `f` rejects. Keys and placeholder
    /// counts are kept.
    pub fn filter_map<U>(self, f: impl FnMut(T) -> Option<U>) -> Page<U> {
        Page {
            data: self.data.into_iter().filter_map(f).collect(),
            prev_key: self.prev_key,
            next_key: self.next_key,
            items_before: self.items_before,
            items_after: self.items_after,
        }
    }
}

#[derive(Debug)]
pub enum LoadResult<T> {
    Page(Page<T>),
    Error(AppError),
}

/// Snapshot of loaded pages, used to pick a key when reloading.
#[derive(Debug, Clone, Default)]
pub struct PagingState {
    pub anchor_position: Option<usize>,
    pub pages: Vec<PageInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub prev_key: Option<u32>,
    pub next_key: Option<u32>,
    pub len: usize,
}

impl PagingState {
    /// Page containing `position`, or the last page when it lies past the end.
    pub fn closest_page_to_position(&self, position: usize) -> Option<&PageInfo> {
        let mut end = 0;
        for page in &self.pages {
            end += page.len;
            if position < end {
                return Some(page);
            }
        }
        self.pages.last()
    }
}

#[async_trait]
pub trait PagingSource<T>: Send + Sync {
    async fn load(&self, params: LoadParams) -> LoadResult<T>;

    fn refresh_key(&self, state: &PagingState) -> Option<u32>;
}

pub struct Pager<T> {
    config: PagingConfig,
    source: Arc<dyn PagingSource<T>>,
}

enum Cursor {
    Next { key: Option<u32>, first: bool },
    Done,
}

impl<T: Send + 'static> Pager<T> {
    pub fn new(config: PagingConfig, source: Arc<dyn PagingSource<T>>) -> Self {
        Self { config, source }
    }

    /// Yields pages starting at `initial_key` until a page has no next key.
    /// An error ends the stream after being yielded.
    pub fn stream(self, initial_key: Option<u32>) -> BoxStream<'static, Result<Page<T>, AppError>> {
        let Pager { config, source } = self;
        let start = Cursor::Next {
            key: initial_key,
            first: true,
        };

        stream::unfold(start, move |cursor| {
            let source = Arc::clone(&source);
            async move {
                let Cursor::Next { key, first } = cursor else {
                    return None;
                };
                let params = LoadParams {
                    key,
                    load_size: if first {
                        config.initial_load_size
                    } else {
                        config.page_size
                    },
                    placeholders_enabled: config.enable_placeholders,
                };

                match source.load(params).await {
                    LoadResult::Page(page) => {
                        let next = match page.next_key {
                            Some(key) => Cursor::Next {
                                key: Some(key),
                                first: false,
                            },
                            None => Cursor::Done,
                        };
                        Some((Ok(page), next))
                    }
                    LoadResult::Error(error) => Some((Err(error), Cursor::Done)),
                }
            }
        })
        .boxed()
    }
}
