use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use reletter_types::api::GroupDiaryQuery;
use reletter_types::models::{DiaryEntry, Friend, Group};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::page::GroupDateKey;

/// Remote diary API as seen by the client. Every call carries the caller's
/// bearer token; the server decides what the caller may see.
#[async_trait]
pub trait DiaryApi: Send + Sync {
    /// `GET /diaries/group/{group_id}?date={date}`
    async fn fetch_group_diaries(&self, key: &GroupDateKey, token: &str) -> Result<Vec<DiaryEntry>>;

    /// `POST /diaries/{diary_id}/read`. Idempotent on the server.
    async fn mark_read(&self, diary_id: &str, token: &str) -> Result<()>;

    /// `GET /users/friends/list`
    async fn fetch_friends(&self, token: &str) -> Result<Vec<Friend>>;

    /// `GET /users/groups`
    async fn fetch_groups(&self, token: &str) -> Result<Vec<Group>>;
}

/// [`DiaryApi`] over HTTP.
#[derive(Clone)]
pub struct HttpDiaryApi {
    client: Client,
    base_url: String,
    base: Url,
}

impl HttpDiaryApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let base_url = config.api_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url));
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
            base,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL with `segments` appended. Each segment is percent-encoded
    /// as a whole, so ids containing `/`, `?` or `#` stay a single segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str], token: &str) -> Result<T> {
        let resp = self
            .client
            .get(self.endpoint(segments)?)
            .bearer_auth(token)
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

async fn ensure_success(resp: Response) -> Result<Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

#[async_trait]
impl DiaryApi for HttpDiaryApi {
    async fn fetch_group_diaries(&self, key: &GroupDateKey, token: &str) -> Result<Vec<DiaryEntry>> {
        let url = self.endpoint(&["diaries", "group", key.group_id()])?;
        let resp = self
            .client
            .get(url)
            .query(&GroupDiaryQuery {
                date: key.date().to_string(),
            })
            .bearer_auth(token)
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        let body = resp.bytes().await?;
        let diaries: Vec<DiaryEntry> = serde_json::from_slice(&body)?;
        debug!("Fetched {} diaries for {}", diaries.len(), key);
        Ok(diaries)
    }

    async fn mark_read(&self, diary_id: &str, token: &str) -> Result<()> {
        let resp = self
            .client
            .post(self.endpoint(&["diaries", diary_id, "read"])?)
            .bearer_auth(token)
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }

    async fn fetch_friends(&self, token: &str) -> Result<Vec<Friend>> {
        self.get_json(&["users", "friends", "list"], token).await
    }

    async fn fetch_groups(&self, token: &str) -> Result<Vec<Group>> {
        self.get_json(&["users", "groups"], token).await
    }
}
