use serde::{Deserialize, Serialize};

/// Author summary embedded in a diary entry. The server populates it from
/// the user document, so either field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryAuthor {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A single dated diary post within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// ISO date or datetime string; the first ten characters are `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    /// Server-relative path, e.g. `/uploads/abc.png`.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, rename = "user")]
    pub author: Option<DiaryAuthor>,
    /// Viewer identifiers (emails) that have read this entry.
    /// A missing field deserializes to an empty list.
    #[serde(default)]
    pub read_by: Vec<String>,
}

impl DiaryEntry {
    pub fn is_read_by(&self, viewer: &str) -> bool {
        self.read_by.iter().any(|v| v == viewer)
    }

    /// Calendar date part of `date`, without any time-of-day suffix.
    pub fn calendar_date(&self) -> &str {
        self.date.get(..10).unwrap_or(&self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub members: Vec<GroupMember>,
}
