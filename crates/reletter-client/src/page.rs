//! The group-diary page: fetch, count, mark read.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use reletter_types::models::DiaryEntry;

use crate::api::DiaryApi;
use crate::format::{format_date_label, local_today};
use crate::identity::decode_viewer_identity;
use crate::marker::{MarkReport, mark_all_read};
use crate::notify::{DIARY_LOAD_FAILED, LOGIN_REQUIRED, Notifier};
use crate::session::SessionAccessor;
use crate::tally::{ReadTally, tally};

/// Which diary set a page shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupDateKey {
    group_id: String,
    date: String,
}

impl GroupDateKey {
    pub fn new(group_id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            date: date.into(),
        }
    }

    /// Key for a page opened with an optional `?date=` parameter; falls back
    /// to today's local date when it is absent or empty.
    pub fn with_default_date(group_id: impl Into<String>, date: Option<&str>) -> Self {
        let date = match date {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => local_today(),
        };
        Self::new(group_id, date)
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Both parts present. An incomplete key never reaches the network.
    pub fn is_complete(&self) -> bool {
        !self.group_id.is_empty() && !self.date.is_empty()
    }
}

impl fmt::Display for GroupDateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group {} on {}", self.group_id, self.date)
    }
}

/// What the rendering surface sees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub key: Option<GroupDateKey>,
    pub diaries: Vec<DiaryEntry>,
    /// Counted before this visit's mark-read requests went out.
    pub tally: ReadTally,
    pub date_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Group or date missing; nothing was requested.
    Skipped,
    MissingCredential,
    InvalidCredential,
    FetchFailed,
    Loaded { tally: ReadTally, marks: MarkReport },
}

/// Handle to a running page task. Aborting abandons whatever requests are in
/// flight; their responses are dropped with the task.
pub struct PipelineHandle<T> {
    task: JoinHandle<T>,
}

impl<T> PipelineHandle<T> {
    pub fn abort(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the task. `None` if it was aborted.
    pub async fn join(self) -> Option<T> {
        match self.task.await {
            Ok(v) => Some(v),
            Err(e) => {
                if !e.is_cancelled() {
                    error!("Page task failed: {}", e);
                }
                None
            }
        }
    }
}

#[derive(Clone)]
pub struct GroupDiaryPage {
    inner: Arc<PageInner>,
}

struct PageInner {
    api: Arc<dyn DiaryApi>,
    session: Arc<dyn SessionAccessor>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<PageState>,
}

impl GroupDiaryPage {
    pub fn new(
        api: Arc<dyn DiaryApi>,
        session: Arc<dyn SessionAccessor>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (state, _) = watch::channel(PageState::default());
        Self {
            inner: Arc::new(PageInner {
                api,
                session,
                notifier,
                state,
            }),
        }
    }

    pub fn state(&self) -> PageState {
        self.inner.state.borrow().clone()
    }

    /// Receive every state the page publishes.
    pub fn subscribe(&self) -> watch::Receiver<PageState> {
        self.inner.state.subscribe()
    }

    /// Run the page pipeline once for `key`.
    ///
    /// The tally is computed from the list as fetched, before any mark-read
    /// request is sent, so it shows what the viewer had read before this
    /// visit. Returns after every mark-read request has settled.
    pub async fn load(&self, key: &GroupDateKey) -> LoadOutcome {
        if !key.is_complete() {
            debug!("Skipping load, incomplete key: {:?}", key);
            return LoadOutcome::Skipped;
        }

        let Some(token) = self.inner.session.access_token() else {
            self.inner.notifier.alert(LOGIN_REQUIRED);
            return LoadOutcome::MissingCredential;
        };

        let viewer = match decode_viewer_identity(&token) {
            Ok(v) => v,
            Err(e) => {
                warn!("Cannot read viewer from access token: {}", e);
                self.inner.notifier.alert(LOGIN_REQUIRED);
                return LoadOutcome::InvalidCredential;
            }
        };

        let diaries = match self.inner.api.fetch_group_diaries(key, &token).await {
            Ok(d) => d,
            Err(e) => {
                error!("Failed to load diaries for {}: {}", key, e);
                self.inner.notifier.alert(DIARY_LOAD_FAILED);
                return LoadOutcome::FetchFailed;
            }
        };

        let counts = tally(&diaries, &viewer);
        self.inner.state.send_replace(PageState {
            key: Some(key.clone()),
            diaries: diaries.clone(),
            tally: counts,
            date_label: format_date_label(key.date()),
        });

        let marks = mark_all_read(self.inner.api.as_ref(), &diaries, &token).await;
        info!(
            "Loaded {}: {} read, {} unread, {} marked ({} failed)",
            key, counts.read, counts.unread, marks.succeeded, marks.failed
        );

        LoadOutcome::Loaded {
            tally: counts,
            marks,
        }
    }

    /// Run [`load`](Self::load) as a task.
    pub fn spawn_load(&self, key: GroupDateKey) -> PipelineHandle<LoadOutcome> {
        let page = self.clone();
        PipelineHandle {
            task: tokio::spawn(async move { page.load(&key).await }),
        }
    }

    /// Reload whenever the key changes. A change that arrives while a load is
    /// still running abandons that load and starts over with the new key. The
    /// task ends when the key sender is dropped or the handle is aborted.
    pub fn watch_key(&self, mut keys: watch::Receiver<GroupDateKey>) -> PipelineHandle<()> {
        let page = self.clone();
        let task = tokio::spawn(async move {
            loop {
                let key = keys.borrow_and_update().clone();
                tokio::select! {
                    _ = page.load(&key) => {
                        if keys.changed().await.is_err() {
                            break;
                        }
                    }
                    changed = keys.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        debug!("Key changed during load of {}, abandoning it", key);
                    }
                }
            }
        });
        PipelineHandle { task }
    }
}
