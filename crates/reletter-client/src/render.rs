use serde::Serialize;

use reletter_types::models::DiaryEntry;

use crate::page::PageState;
use crate::tally::ReadTally;

pub const NO_DIARIES: &str = "작성된 일기가 없습니다.";
pub const UNKNOWN_AUTHOR: &str = "작성자 없음";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiaryCard {
    pub id: String,
    pub title: String,
    /// `"{date} | {author}"`
    pub meta: String,
    pub image_url: Option<String>,
    pub content: String,
}

impl DiaryCard {
    pub fn new(entry: &DiaryEntry, api_base_url: &str) -> Self {
        let author = entry
            .author
            .as_ref()
            .and_then(|a| a.name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR);

        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            meta: format!("{} | {}", entry.calendar_date(), author),
            image_url: entry
                .image_url
                .as_deref()
                .filter(|u| !u.is_empty())
                .map(|u| absolute_url(api_base_url, u)),
            content: entry.content.clone(),
        }
    }
}

fn absolute_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Everything the rendering surface needs for the group-diary page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiaryPageView {
    pub heading: String,
    pub date_label: String,
    pub tally: ReadTally,
    pub cards: Vec<DiaryCard>,
    /// Shown instead of the cards when there are none.
    pub empty_message: Option<&'static str>,
}

impl DiaryPageView {
    pub fn from_state(state: &PageState, api_base_url: &str) -> Self {
        let date = state.key.as_ref().map(|k| k.date()).unwrap_or_default();
        let cards: Vec<DiaryCard> = state
            .diaries
            .iter()
            .map(|d| DiaryCard::new(d, api_base_url))
            .collect();

        Self {
            heading: format!("📘 그룹 일기 목록 ({})", date),
            date_label: state.date_label.clone(),
            tally: state.tally,
            empty_message: cards.is_empty().then_some(NO_DIARIES),
            cards,
        }
    }
}
