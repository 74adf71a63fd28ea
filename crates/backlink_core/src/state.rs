use crate::view_model::{AppViewModel, GroupRowView};
use crate::{
    content_type_label, BatchIntent, BatchPlan, BatchRequest, ContentGroup, Effect, FormSettings,
    GroupStore, RunProgress,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Generating,
    Describing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveRun {
    plan: BatchPlan,
    settings: FormSettings,
    in_flight: BatchIntent,
}

/// Session state for one user: groups, the run in flight and UI messages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    store: GroupStore,
    run: Option<ActiveRun>,
    progress: Option<RunProgress>,
    describing: bool,
    description: Option<String>,
    error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        if self.run.is_some() {
            SessionState::Generating
        } else if self.describing {
            SessionState::Describing
        } else {
            SessionState::Idle
        }
    }

    pub fn groups(&self) -> &[ContentGroup] {
        self.store.groups()
    }

    pub fn store(&self) -> &GroupStore {
        &self.store
    }

    pub fn progress(&self) -> Option<&RunProgress> {
        self.progress.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn view(&self) -> AppViewModel {
        let active_index = self.store.active_index();
        let groups = self
            .store
            .groups()
            .iter()
            .enumerate()
            .map(|(index, group)| GroupRowView {
                group_id: group.id,
                url: group.url.clone(),
                keyword: group.keyword.clone(),
                label: content_type_label(group.content_type.as_str()),
                item_count: group.items.len(),
                is_active: index == active_index,
            })
            .collect();

        AppViewModel {
            session: self.session(),
            groups,
            active_index,
            active_items: self
                .store
                .active_group()
                .map(|group| group.items.clone())
                .unwrap_or_default(),
            total_items: self.store.total_items(),
            progress: self.progress.clone(),
            title_hint: self
                .progress
                .as_ref()
                .map(|progress| progress.current_keyword.clone()),
            description: self.description.clone(),
            error: self.error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn store_mut(&mut self) -> &mut GroupStore {
        self.mark_dirty();
        &mut self.store
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.mark_dirty();
    }

    pub(crate) fn clear_error(&mut self) {
        if self.error.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub(crate) fn start_run(&mut self, plan: BatchPlan, settings: FormSettings) -> Vec<Effect> {
        self.store.begin_run();
        self.advance(plan, settings)
    }

    /// Record a finished batch and move on to the next intent.
    pub(crate) fn complete_batch(&mut self, items: Vec<String>) -> Vec<Effect> {
        let Some(run) = self.run.take() else {
            return Vec::new();
        };

        self.store
            .add_or_append(&run.in_flight.pair, run.settings.content_type, items);
        let after = run.in_flight.progress_after();
        self.progress = Some(after.clone());
        self.mark_dirty();

        let mut effects = vec![Effect::ProgressChanged(after)];
        effects.extend(self.advance(run.plan, run.settings));
        effects
    }

    pub(crate) fn abort_run(&mut self, message: String) -> Vec<Effect> {
        if self.run.take().is_none() {
            return Vec::new();
        }
        self.progress = None;
        self.set_error(message);
        vec![Effect::ProgressCleared]
    }

    pub(crate) fn is_describing(&self) -> bool {
        self.describing
    }

    pub(crate) fn start_describe(&mut self) {
        self.describing = true;
        self.mark_dirty();
    }

    pub(crate) fn finish_describe(&mut self, result: Result<String, String>) {
        if !self.describing {
            return;
        }
        self.describing = false;
        match result {
            Ok(description) => self.description = Some(description),
            Err(message) => self.error = Some(message),
        }
        self.mark_dirty();
    }

    fn advance(&mut self, mut plan: BatchPlan, settings: FormSettings) -> Vec<Effect> {
        self.mark_dirty();
        match plan.next() {
            Some(intent) => {
                let before = intent.progress_before();
                let request = BatchRequest::build(&intent.pair, &settings, intent.batch_size);
                self.progress = Some(before.clone());
                self.run = Some(ActiveRun {
                    plan,
                    settings,
                    in_flight: intent,
                });
                vec![Effect::ProgressChanged(before), Effect::RequestBatch(request)]
            }
            None => {
                self.run = None;
                self.progress = None;
                vec![Effect::ProgressCleared]
            }
        }
    }
}
