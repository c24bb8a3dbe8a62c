// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{CategoryId, Selection, SortColumn, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Browse,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub selection: Selection,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Browse,
            selection: Selection::default(),
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    SelectUser(Option<UserId>),
    SetQuery(String),
    ClearQuery,
    ToggleCategory(CategoryId),
    ClearCategories,
    ResetAll,
    CycleSort(SortColumn),
    EnterSearch,
    ExitSearch,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    SelectionChanged,
    ModeChanged(AppMode),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::SelectUser(user) => {
                let next = self.selection.select_user(user);
                self.replace_selection(next)
            }
            AppCommand::SetQuery(text) => {
                let next = self.selection.set_query(text);
                self.replace_selection(next)
            }
            AppCommand::ClearQuery => {
                let next = self.selection.clear_query();
                self.replace_selection(next)
            }
            AppCommand::ToggleCategory(category) => {
                let next = self.selection.toggle_category(category);
                self.replace_selection(next)
            }
            AppCommand::ClearCategories => {
                let next = self.selection.clear_categories();
                self.replace_selection(next)
            }
            AppCommand::ResetAll => {
                let next = self.selection.reset_all();
                let mut events = self.replace_selection(next);
                if self.mode != AppMode::Browse {
                    self.mode = AppMode::Browse;
                    events.push(AppEvent::ModeChanged(self.mode));
                }
                events.push(self.set_status("filters reset"));
                events
            }
            AppCommand::CycleSort(column) => {
                let next = self.selection.cycle_sort(column);
                let mut events = self.replace_selection(next);
                let label = match self.selection.sort.sort_key() {
                    None => "sort cleared".to_owned(),
                    Some(key) if self.selection.sort.reversed() => {
                        format!("sort {} asc", key.as_str())
                    }
                    Some(key) => format!("sort {} desc", key.as_str()),
                };
                events.push(self.set_status(&label));
                events
            }
            AppCommand::EnterSearch => {
                self.mode = AppMode::Search;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitSearch => {
                self.mode = AppMode::Browse;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn replace_selection(&mut self, next: Selection) -> Vec<AppEvent> {
        if next == self.selection {
            return Vec::new();
        }
        tracing::debug!(
            user = ?next.user,
            query = %next.query,
            categories = next.categories.len(),
            sort = ?next.sort,
            "selection changed"
        );
        self.selection = next;
        vec![AppEvent::SelectionChanged]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppMode, AppState};
    use crate::{CategoryId, Selection, SortColumn, SortState, UserId};

    #[test]
    fn select_user_reports_change_once() {
        let mut state = AppState::default();

        let events = state.dispatch(AppCommand::SelectUser(Some(UserId::new(2))));
        assert_eq!(events, vec![AppEvent::SelectionChanged]);
        assert_eq!(state.selection.user, Some(UserId::new(2)));

        let events = state.dispatch(AppCommand::SelectUser(Some(UserId::new(2))));
        assert!(events.is_empty());
    }

    #[test]
    fn cycle_sort_updates_status() {
        let mut state = AppState::default();

        let events = state.dispatch(AppCommand::CycleSort(SortColumn::Product));
        assert_eq!(state.selection.sort, SortState::Base(SortColumn::Product));
        assert_eq!(
            events,
            vec![
                AppEvent::SelectionChanged,
                AppEvent::StatusUpdated("sort product desc".to_owned()),
            ],
        );

        state.dispatch(AppCommand::CycleSort(SortColumn::Product));
        assert_eq!(state.status_line.as_deref(), Some("sort product asc"));

        state.dispatch(AppCommand::CycleSort(SortColumn::Product));
        assert_eq!(state.selection.sort, SortState::Unsorted);
        assert_eq!(state.status_line.as_deref(), Some("sort cleared"));
    }

    #[test]
    fn reset_all_leaves_search_mode() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::EnterSearch);
        state.dispatch(AppCommand::SetQuery("milk".to_owned()));
        state.dispatch(AppCommand::ToggleCategory(CategoryId::new(1)));

        let events = state.dispatch(AppCommand::ResetAll);
        assert_eq!(state.mode, AppMode::Browse);
        assert_eq!(state.selection, Selection::default());
        assert_eq!(
            events,
            vec![
                AppEvent::SelectionChanged,
                AppEvent::ModeChanged(AppMode::Browse),
                AppEvent::StatusUpdated("filters reset".to_owned()),
            ],
        );
    }

    #[test]
    fn query_edits_and_clear() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetQuery("an".to_owned()));
        assert_eq!(state.selection.query, "an");

        let events = state.dispatch(AppCommand::ClearQuery);
        assert_eq!(events, vec![AppEvent::SelectionChanged]);
        assert_eq!(state.selection.query, "");
    }

    #[test]
    fn clear_status_drops_line() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetStatus("hello".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("hello"));

        let events = state.dispatch(AppCommand::ClearStatus);
        assert_eq!(events, vec![AppEvent::StatusCleared]);
        assert_eq!(state.status_line, None);
    }
}
