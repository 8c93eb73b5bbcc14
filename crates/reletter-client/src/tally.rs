use serde::Serialize;

use reletter_types::models::DiaryEntry;

use crate::identity::ViewerIdentity;

/// How many of the listed entries the viewer had already read.
/// `read + unread` always equals the number of entries counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReadTally {
    pub read: usize,
    pub unread: usize,
}

impl ReadTally {
    pub fn total(&self) -> usize {
        self.read + self.unread
    }
}

pub fn tally(diaries: &[DiaryEntry], viewer: &ViewerIdentity) -> ReadTally {
    let read = diaries
        .iter()
        .filter(|d| d.is_read_by(viewer.as_str()))
        .count();
    ReadTally {
        read,
        unread: diaries.len() - read,
    }
}
