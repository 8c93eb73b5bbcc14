//! Friends and groups shown next to the diary page.

use std::sync::Arc;

use tracing::{debug, error};

use reletter_types::models::{Friend, Group};

use crate::api::DiaryApi;
use crate::session::SessionAccessor;

pub const NO_GROUPS: &str = "아직 생성된 그룹이 없습니다.";
pub const NO_FRIENDS: &str = "아직 추가된 친구가 없습니다.";

/// At most one of a friend or a group is selected at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Friend(Friend),
    Group(Group),
}

pub struct Sidebar {
    api: Arc<dyn DiaryApi>,
    session: Arc<dyn SessionAccessor>,
    friends: Vec<Friend>,
    groups: Vec<Group>,
    selection: Selection,
}

impl Sidebar {
    pub fn new(api: Arc<dyn DiaryApi>, session: Arc<dyn SessionAccessor>) -> Self {
        Self {
            api,
            session,
            friends: Vec::new(),
            groups: Vec::new(),
            selection: Selection::None,
        }
    }

    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Fetch both lists concurrently. A failed list is logged and keeps its
    /// previous contents; the other list is still updated.
    pub async fn refresh(&mut self) {
        let Some(token) = self.session.access_token() else {
            debug!("No session, sidebar not refreshed");
            return;
        };

        let (friends, groups) = tokio::join!(
            self.api.fetch_friends(&token),
            self.api.fetch_groups(&token)
        );

        match friends {
            Ok(f) => self.friends = f,
            Err(e) => error!("Failed to load friend list: {}", e),
        }
        match groups {
            Ok(g) => self.groups = g,
            Err(e) => error!("Failed to load group list: {}", e),
        }
    }

    /// Select a friend by id, clearing any group selection.
    pub fn select_friend(&mut self, friend_id: &str) -> bool {
        match self.friends.iter().find(|f| f.id == friend_id) {
            Some(friend) => {
                self.selection = Selection::Friend(friend.clone());
                true
            }
            None => false,
        }
    }

    /// Select a group by id, clearing any friend selection.
    pub fn select_group(&mut self, group_id: &str) -> bool {
        match self.groups.iter().find(|g| g.id == group_id) {
            Some(group) => {
                self.selection = Selection::Group(group.clone());
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    pub fn view(&self) -> SidebarView {
        SidebarView {
            group_labels: self.groups.iter().map(|g| format!("💌 {}", g.name)).collect(),
            friend_labels: self.friends.iter().map(|f| f.name.clone()).collect(),
            groups_empty: self.groups.is_empty().then_some(NO_GROUPS),
            friends_empty: self.friends.is_empty().then_some(NO_FRIENDS),
            detail: match &self.selection {
                Selection::None => None,
                Selection::Friend(f) => Some(SelectionDetail::Friend {
                    name: f.name.clone(),
                    email: f.email.clone().unwrap_or_default(),
                }),
                Selection::Group(g) => Some(SelectionDetail::Group {
                    name: g.name.clone(),
                    members: g.members.iter().map(|m| m.name.clone()).collect(),
                }),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionDetail {
    Friend { name: String, email: String },
    Group { name: String, members: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarView {
    pub group_labels: Vec<String>,
    pub friend_labels: Vec<String>,
    pub groups_empty: Option<&'static str>,
    pub friends_empty: Option<&'static str>,
    pub detail: Option<SelectionDetail>,
}
