use std::sync::Arc;

use taskdeck_client::{Task, TaskClient, TaskSummary};
use taskdeck_hooks::{OperationState, PollHandle};
use tokio::sync::watch;

use crate::config::FetchConfig;
use crate::tasks::{
    self, CompletionOperation, StatusFilter, TaskListOperation, fetch_options, filter_tasks,
};

/// Something the UI should tell the user about after a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Notice {
    ListFailed(String),
    Completed(Task),
    CompletionFailed(String),
}

/// Task list state driven by async operations.
pub(super) struct App {
    tasks: TaskListOperation,
    list_updates: watch::Receiver<OperationState<Vec<Task>>>,
    list: OperationState<Vec<Task>>,
    completion: CompletionOperation,
    completion_updates: watch::Receiver<OperationState<Task>>,
    completion_state: OperationState<Task>,
    poller: Option<PollHandle>,
    status: StatusFilter,
    text: String,
    selected: usize,
    source: String,
}

impl App {
    /// Start loading tasks. Must be called from within a tokio runtime.
    pub(super) fn new(client: &Arc<TaskClient>, fetch: &FetchConfig) -> Self {
        let tasks = tasks::list_operation(client, fetch_options(fetch).immediate(true));
        let completion = tasks::completion_operation(client, fetch_options(fetch));
        let list_updates = tasks.subscribe();
        let completion_updates = completion.subscribe();

        let poller = fetch
            .poll_interval()
            .map(|period| tasks.poll_every(period, ()));
        if poller.is_none() {
            tasks.mount(());
        }

        Self {
            list: tasks.snapshot(),
            completion_state: completion.snapshot(),
            tasks,
            list_updates,
            completion,
            completion_updates,
            poller,
            status: StatusFilter::All,
            text: String::new(),
            selected: 0,
            source: client.describe(),
        }
    }

    /// Pull the latest operation states; returns what changed worth reporting.
    pub(super) fn sync(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();

        if self.list_updates.has_changed().unwrap_or(false) {
            let next = self.list_updates.borrow_and_update().clone();
            if let Some(message) = settled_error(&self.list, &next) {
                notices.push(Notice::ListFailed(message));
            }
            self.list = next;
            self.clamp_selection();
        }

        if self.completion_updates.has_changed().unwrap_or(false) {
            let next = self.completion_updates.borrow_and_update().clone();
            if let Some(message) = settled_error(&self.completion_state, &next) {
                notices.push(Notice::CompletionFailed(message));
            } else if !next.loading
                && let Some(task) = &next.data
                && (self.completion_state.loading || self.completion_state.data.as_ref() != Some(task))
            {
                notices.push(Notice::Completed(task.clone()));
            }
            self.completion_state = next;
        }

        notices
    }

    pub(super) const fn list_state(&self) -> &OperationState<Vec<Task>> {
        &self.list
    }

    pub(super) fn tasks(&self) -> &[Task] {
        self.list.data.as_deref().unwrap_or_default()
    }

    pub(super) fn visible_tasks(&self) -> Vec<&Task> {
        filter_tasks(self.tasks(), self.status, &self.text)
    }

    pub(super) fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected).copied()
    }

    pub(super) const fn selected_index(&self) -> usize {
        self.selected
    }

    pub(super) fn select_next(&mut self) {
        let len = self.visible_tasks().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub(super) const fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub(super) const fn status_filter(&self) -> StatusFilter {
        self.status
    }

    pub(super) fn set_status_filter(&mut self, status: StatusFilter) {
        self.status = status;
        self.clamp_selection();
    }

    pub(super) fn text_filter(&self) -> &str {
        &self.text
    }

    pub(super) fn set_text_filter(&mut self, text: &str) {
        text.clone_into(&mut self.text);
        self.selected = 0;
    }

    pub(super) fn summary(&self) -> TaskSummary {
        TaskSummary::of(self.tasks())
    }

    pub(super) fn source(&self) -> &str {
        &self.source
    }

    pub(super) fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|poller| !poller.is_finished())
    }

    pub(super) fn is_busy(&self) -> bool {
        self.list.loading || self.completion_state.loading
    }

    /// Re-fetch the task list in the background.
    pub(super) fn refresh(&self) {
        self.tasks.spawn_execute(());
    }

    /// Retry the last fetch if one was made and budget remains.
    pub(super) fn retry(&self) -> bool {
        if !self.tasks.can_retry() || self.list.loading {
            return false;
        }
        self.tasks.spawn_retry();
        true
    }

    /// Forget loaded tasks and errors.
    pub(super) fn reset(&mut self) {
        self.tasks.reset();
        self.completion.reset();
        self.sync();
    }

    /// Flip completion of the selected task.
    ///
    /// The list is updated right away; a failed request reloads it from the
    /// backend.
    pub(super) fn toggle_selected(&mut self) -> Option<(u64, bool)> {
        let task = self.selected_task()?;
        let (id, completed) = (task.id, !task.completed);

        let mut optimistic = self.tasks().to_vec();
        if let Some(entry) = optimistic.iter_mut().find(|entry| entry.id == id) {
            entry.completed = completed;
        }
        self.tasks.set_data(optimistic);

        let list = self.tasks.clone();
        let completion = self.completion.clone();
        tokio::spawn(async move {
            if completion.execute((id, completed)).await.is_none() {
                list.execute(()).await;
            }
        });

        self.sync();
        Some((id, completed))
    }
}

/// Error message of `next` if it just settled with a new error.
fn settled_error<T>(prev: &OperationState<T>, next: &OperationState<T>) -> Option<String> {
    let message = next.error_message()?;
    if next.loading || (!prev.loading && prev.error_message() == Some(message)) {
        return None;
    }
    Some(message.to_owned())
}
