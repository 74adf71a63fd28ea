use crate::{ContentItem, GroupId, RunProgress, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub groups: Vec<GroupRowView>,
    pub active_index: usize,
    pub active_items: Vec<ContentItem>,
    pub total_items: usize,
    pub progress: Option<RunProgress>,
    /// Keyword being generated, for window or tab titles.
    pub title_hint: Option<String>,
    pub description: Option<String>,
    pub error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRowView {
    pub group_id: GroupId,
    pub url: String,
    pub keyword: String,
    pub label: &'static str,
    pub item_count: usize,
    pub is_active: bool,
}
