//! Thread list: the sidebar state (ordered threads plus the single selection).

use crate::ports::chat_store::{ChatStore, StoreError};
use crate::ports::chat_view::ChatView;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::cmp::Reverse;
use std::sync::{Arc, Mutex, MutexGuard};
use streamchat_domain::{Thread, ThreadId};
use tracing::{debug, warn};

#[derive(Default)]
struct ListState {
    threads: Vec<Thread>,
    selected: Option<ThreadId>,
}

/// Fetches, orders and renders the thread list.
///
/// Cheap to clone; clones share the same cached list, so a refresh started
/// from a finished turn re-marks whatever is selected when it completes.
#[derive(Clone)]
pub struct ThreadListService {
    store: Arc<dyn ChatStore>,
    view: Arc<dyn ChatView>,
    state: Arc<Mutex<ListState>>,
}

impl ThreadListService {
    pub fn new(store: Arc<dyn ChatStore>, view: Arc<dyn ChatView>) -> Self {
        Self {
            store,
            view,
            state: Arc::new(Mutex::new(ListState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Fetch, sort most-recent-first, render and re-mark the selection.
    pub async fn refresh(&self) -> Result<Vec<Thread>, StoreError> {
        let mut threads = self.store.list_threads().await?;
        sort_by_recent_activity(&mut threads, Utc::now());
        debug!("Thread list refreshed: {} threads", threads.len());

        let selected = {
            let mut state = self.lock();
            state.threads = threads.clone();
            state.selected.clone()
        };
        self.view.render_threads(&threads);
        self.view.set_active_thread(selected.as_ref());
        Ok(threads)
    }

    /// Like [`refresh`](Self::refresh), but a failure only logs and keeps
    /// the previous list.
    pub async fn refresh_best_effort(&self) {
        if let Err(e) = self.refresh().await {
            warn!("Failed to refresh thread list: {}", e);
        }
    }

    /// Mark `thread_id` as the single active entry (`None` clears it).
    pub fn select(&self, thread_id: Option<&ThreadId>) {
        self.lock().selected = thread_id.cloned();
        self.view.set_active_thread(thread_id);
    }

    pub fn selected(&self) -> Option<ThreadId> {
        self.lock().selected.clone()
    }

    /// Threads of the last successful refresh, in display order.
    pub fn snapshot(&self) -> Vec<Thread> {
        self.lock().threads.clone()
    }

    /// Cached entry for `thread_id`.
    pub fn find(&self, thread_id: &ThreadId) -> Option<Thread> {
        self.lock()
            .threads
            .iter()
            .find(|t| &t.id == thread_id)
            .cloned()
    }

    /// Update a cached name before the server confirms it.
    pub fn rename_local(&self, thread_id: &ThreadId, chat_name: &str) {
        let threads = {
            let mut state = self.lock();
            let Some(thread) = state.threads.iter_mut().find(|t| &t.id == thread_id) else {
                return;
            };
            thread.chat_name = Some(chat_name.to_string());
            state.threads.clone()
        };
        self.view.render_threads(&threads);
    }
}

/// Order threads by `last_activity_time`, newest first.
///
/// A missing timestamp counts as `now`; one that does not parse counts as
/// the Unix epoch. Ties keep their server order.
pub fn sort_by_recent_activity(threads: &mut [Thread], now: DateTime<Utc>) {
    threads.sort_by_cached_key(|t| {
        Reverse(match t.last_activity_time.as_deref() {
            None => now,
            Some(raw) => parse_timestamp(raw).unwrap_or_default(),
        })
    });
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    // naive timestamps are taken as UTC
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
