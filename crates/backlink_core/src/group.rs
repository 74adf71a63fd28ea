use crate::{ContentType, UrlKeywordPair};

pub type GroupId = u64;
pub type ItemId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub id: ItemId,
    pub content: String,
    pub content_type: ContentType,
    pub group_id: GroupId,
}

/// Accumulated output for one (url, keyword) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentGroup {
    pub id: GroupId,
    pub url: String,
    pub keyword: String,
    pub content_type: ContentType,
    pub items: Vec<ContentItem>,
}

impl ContentGroup {
    fn matches(&self, pair: &UrlKeywordPair) -> bool {
        self.url == pair.url && self.keyword == pair.keyword
    }
}

/// Ordered groups plus the active-group cursor.
///
/// Groups keep the order in which their pair was first answered. Within one
/// run a pair maps to exactly one group; a new run starts fresh groups even
/// for pairs seen before.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupStore {
    groups: Vec<ContentGroup>,
    active: usize,
    run_groups: Vec<GroupId>,
    next_group_id: GroupId,
    next_item_id: ItemId,
}

impl GroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget which groups belong to the current run.
    pub fn begin_run(&mut self) {
        self.run_groups.clear();
    }

    /// Append `contents` to the pair's group in this run, creating it if needed,
    /// and make that group active. An empty reply still opens the group so the
    /// pair keeps its place in the order.
    pub fn add_or_append(
        &mut self,
        pair: &UrlKeywordPair,
        content_type: ContentType,
        contents: Vec<String>,
    ) -> usize {
        let existing = self
            .groups
            .iter()
            .position(|group| self.run_groups.contains(&group.id) && group.matches(pair));

        let index = match existing {
            Some(index) => index,
            None => {
                self.next_group_id += 1;
                let id = self.next_group_id;
                self.groups.push(ContentGroup {
                    id,
                    url: pair.url.clone(),
                    keyword: pair.keyword.clone(),
                    content_type,
                    items: Vec::new(),
                });
                self.run_groups.push(id);
                self.groups.len() - 1
            }
        };

        let group = &mut self.groups[index];
        for content in contents {
            self.next_item_id += 1;
            group.items.push(ContentItem {
                id: self.next_item_id,
                content,
                content_type: group.content_type,
                group_id: group.id,
            });
        }
        self.active = index;
        index
    }

    /// Remove one item; its group goes too once empty.
    pub fn delete_item(&mut self, item_id: ItemId) -> bool {
        let Some((group_index, item_index)) = self.groups.iter().enumerate().find_map(|(gi, g)| {
            g.items
                .iter()
                .position(|item| item.id == item_id)
                .map(|ii| (gi, ii))
        }) else {
            return false;
        };

        self.groups[group_index].items.remove(item_index);
        if self.groups[group_index].items.is_empty() {
            self.remove_group_at(group_index);
        }
        true
    }

    pub fn delete_group(&mut self, group_id: GroupId) -> bool {
        match self.groups.iter().position(|group| group.id == group_id) {
            Some(index) => {
                self.remove_group_at(index);
                true
            }
            None => false,
        }
    }

    pub fn clear_all(&mut self) {
        self.groups.clear();
        self.run_groups.clear();
        self.active = 0;
    }

    pub fn set_active(&mut self, index: usize) -> bool {
        if index < self.groups.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    pub fn select_next(&mut self) -> bool {
        self.set_active(self.active + 1)
    }

    pub fn select_previous(&mut self) -> bool {
        match self.active.checked_sub(1) {
            Some(index) => self.set_active(index),
            None => false,
        }
    }

    pub fn groups(&self) -> &[ContentGroup] {
        &self.groups
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_group(&self) -> Option<&ContentGroup> {
        self.groups.get(self.active)
    }

    pub fn total_items(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn remove_group_at(&mut self, index: usize) {
        let removed = self.groups.remove(index);
        self.run_groups.retain(|id| *id != removed.id);

        // Keep the cursor on the same group when an earlier one disappears;
        // losing the active group steps back one.
        if index < self.active || (index == self.active && self.active > 0) {
            self.active -= 1;
        }
        self.active = self.active.min(self.groups.len().saturating_sub(1));
    }
}
