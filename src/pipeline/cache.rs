//! Time-boxed catalog cache.
//!
//! Repeated lookups inside the freshness window reuse the last parse. A
//! failed fetch keeps serving the previous snapshot so a transient network
//! error never blanks the catalog. An empty catalog is never considered
//! fresh.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::models::Catalog;
use crate::pipeline::parse::parse_catalog;
use crate::services::FeedSource;

#[derive(Default)]
struct CacheState {
    catalog: Arc<Catalog>,
    fetched_at: Option<Instant>,
}

/// Catalog cache in front of a feed source.
pub struct FreshnessCache {
    source: Arc<dyn FeedSource>,
    window: Duration,
    state: Mutex<CacheState>,
}

impl FreshnessCache {
    pub fn new(source: Arc<dyn FeedSource>, window: Duration) -> Self {
        Self {
            source,
            window,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Current catalog, refetched when the cached one is empty or stale.
    pub async fn get_catalog(&self) -> Arc<Catalog> {
        let mut state = self.state.lock().await;

        if let Some(fetched_at) = state.fetched_at {
            if !state.catalog.is_empty() && fetched_at.elapsed() < self.window {
                log::debug!("Catalog cache hit ({} series)", state.catalog.len());
                return Arc::clone(&state.catalog);
            }
        }

        match self.source.fetch().await {
            Ok(raw) => {
                let outcome = parse_catalog(&raw);
                if !outcome.skipped.is_empty() {
                    log::debug!("Skipped malformed feed lines: {:?}", outcome.skipped);
                }
                if outcome.catalog.is_empty() {
                    log::warn!("Feed returned no series");
                } else {
                    log::info!("Loaded {} series from feed", outcome.catalog.len());
                }
                state.catalog = Arc::new(outcome.catalog);
                state.fetched_at = Some(Instant::now());
            }
            Err(e) if e.is_fetch_error() => {
                log::warn!("Feed fetch failed, serving cached catalog: {}", e);
            }
            Err(e) => {
                log::error!("Feed source error, serving cached catalog: {}", e);
            }
        }

        Arc::clone(&state.catalog)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted feed source for tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::error::{AppError, Result};
    use crate::services::FeedSource;

    /// Replays queued responses; repeats the last one when the queue runs dry.
    #[derive(Default)]
    pub struct ScriptedFeed {
        responses: Mutex<VecDeque<Option<String>>>,
        last: Mutex<Option<Option<String>>>,
        calls: AtomicUsize,
    }

    impl ScriptedFeed {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a successful document.
        pub fn push_ok(&self, body: impl Into<String>) {
            self.responses.lock().unwrap().push_back(Some(body.into()));
        }

        /// Queue a failed fetch.
        pub fn push_err(&self) {
            self.responses.lock().unwrap().push_back(None);
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FeedSource for ScriptedFeed {
        async fn fetch(&self) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.responses.lock().unwrap().pop_front();
            let response = match next {
                Some(response) => {
                    *self.last.lock().unwrap() = Some(response.clone());
                    response
                }
                None => self.last.lock().unwrap().clone().flatten(),
            };
            response.ok_or(AppError::FeedStatus {
                url: "scripted".into(),
                status: 503,
            })
        }
    }
}
