//! In-memory [`DiaryApi`] and helpers shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::StatusCode;
use tokio::sync::Notify;

use reletter_types::models::{DiaryEntry, Friend, Group};

use crate::api::DiaryApi;
use crate::error::{ClientError, Result};
use crate::identity::decode_viewer_identity;
use crate::notify::Notifier;
use crate::page::GroupDateKey;

pub fn diary(id: &str, read_by: &[&str]) -> DiaryEntry {
    DiaryEntry {
        id: id.into(),
        title: format!("Diary {}", id),
        content: format!("Content of {}", id),
        date: "2024-03-07T00:00:00.000Z".into(),
        image_url: None,
        author: None,
        read_by: read_by.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn diary_on(id: &str, date: &str) -> DiaryEntry {
    DiaryEntry {
        date: date.into(),
        ..diary(id, &[])
    }
}

/// Unsigned token whose claims segment carries `email`.
pub fn token_for(email: &str) -> String {
    let claims = serde_json::json!({ "email": email, "exp": 4_102_444_800u64 });
    format!(
        "{}.{}.unsigned",
        URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}

fn server_error() -> ClientError {
    ClientError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "boom".into(),
    }
}

/// Group that `FakeDiaryApi::with_diaries` files entries under.
pub const DEFAULT_GROUP: &str = "g1";

#[derive(Default)]
pub struct FakeDiaryApi {
    /// (group id, entry)
    store: Mutex<Vec<(String, DiaryEntry)>>,
    fail_fetch: AtomicBool,
    failing_marks: Mutex<HashSet<String>>,
    fetch_calls: AtomicUsize,
    mark_calls: AtomicUsize,
    fetched_keys: Mutex<Vec<GroupDateKey>>,
    friends: Mutex<Option<Vec<Friend>>>,
    groups: Mutex<Option<Vec<Group>>>,
    held_marks: Mutex<HashMap<String, Arc<Notify>>>,
    settled_marks: Mutex<Vec<String>>,
}

impl FakeDiaryApi {
    pub fn with_diaries(diaries: Vec<DiaryEntry>) -> Self {
        let api = Self::default();
        *api.store.lock().unwrap() = diaries
            .into_iter()
            .map(|d| (DEFAULT_GROUP.to_string(), d))
            .collect();
        api
    }

    pub fn add_to_group(&self, group_id: &str, diary: DiaryEntry) {
        self.store.lock().unwrap().push((group_id.to_string(), diary));
    }

    /// Make `mark_read` for `id` wait until the returned gate is notified.
    pub fn hold_mark_read_for(&self, id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.held_marks.lock().unwrap().insert(id.to_string(), gate.clone());
        gate
    }

    /// Ids whose `mark_read` call has returned, in completion order.
    pub fn settled_marks(&self) -> Vec<String> {
        self.settled_marks.lock().unwrap().clone()
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn fail_mark_read_for(&self, id: &str) {
        self.failing_marks.lock().unwrap().insert(id.to_string());
    }

    pub fn set_friends(&self, friends: Option<Vec<Friend>>) {
        *self.friends.lock().unwrap() = friends;
    }

    pub fn set_groups(&self, groups: Option<Vec<Group>>) {
        *self.groups.lock().unwrap() = groups;
    }

    pub fn diaries(&self) -> Vec<DiaryEntry> {
        self.store.lock().unwrap().iter().map(|(_, d)| d.clone()).collect()
    }

    pub fn diary(&self, id: &str) -> Option<DiaryEntry> {
        self.store
            .lock()
            .unwrap()
            .iter()
            .find(|(_, d)| d.id == id)
            .map(|(_, d)| d.clone())
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn mark_calls(&self) -> usize {
        self.mark_calls.load(Ordering::SeqCst)
    }

    pub fn fetched_keys(&self) -> Vec<GroupDateKey> {
        self.fetched_keys.lock().unwrap().clone()
    }

    fn apply_mark_read(&self, diary_id: &str, token: &str) -> Result<()> {
        if self.failing_marks.lock().unwrap().contains(diary_id) {
            return Err(server_error());
        }
        let viewer = decode_viewer_identity(token)?;
        let mut store = self.store.lock().unwrap();
        if let Some((_, entry)) = store.iter_mut().find(|(_, d)| d.id == diary_id) {
            if !entry.is_read_by(viewer.as_str()) {
                entry.read_by.push(viewer.to_string());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DiaryApi for FakeDiaryApi {
    async fn fetch_group_diaries(&self, key: &GroupDateKey, _token: &str) -> Result<Vec<DiaryEntry>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetched_keys.lock().unwrap().push(key.clone());
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(self
            .store
            .lock()
            .unwrap()
            .iter()
            .filter(|(g, d)| g == key.group_id() && d.calendar_date() == key.date())
            .map(|(_, d)| d.clone())
            .collect())
    }

    async fn mark_read(&self, diary_id: &str, token: &str) -> Result<()> {
        self.mark_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.held_marks.lock().unwrap().get(diary_id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let result = self.apply_mark_read(diary_id, token);
        self.settled_marks.lock().unwrap().push(diary_id.to_string());
        result
    }

    async fn fetch_friends(&self, _token: &str) -> Result<Vec<Friend>> {
        self.friends.lock().unwrap().clone().ok_or_else(server_error)
    }

    async fn fetch_groups(&self, _token: &str) -> Result<Vec<Group>> {
        self.groups.lock().unwrap().clone().ok_or_else(server_error)
    }
}

/// Notifier that keeps every alert for inspection.
#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
