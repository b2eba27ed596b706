//! # History collaborator
//!
//! The router records forward navigations through [`History::push`] and is fed
//! back/forward traversals as [`PopEvent`]s carrying the state pushed earlier.
//!
//! [`MemoryHistory`] models the browser's session history: a list of entries
//! with a cursor, where pushing discards any forward entries and the first
//! entry (the initially loaded document) carries no state.

use serde::{Deserialize, Serialize};

use crate::page::Page;

/// State attached to one history entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub page: Page,
    /// Per-navigation payload, e.g. the id of the recipe shown on
    /// [`Page::RecipeInfo`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl HistoryState {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            payload: None,
        }
    }

    pub fn with_payload(page: Page, payload: impl Into<String>) -> Self {
        Self {
            page,
            payload: Some(payload.into()),
        }
    }
}

/// A back/forward traversal. `state` is `None` for entries the router never
/// pushed, such as the initial page load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopEvent {
    pub state: Option<HistoryState>,
}

pub trait History {
    /// Push a new entry carrying `state`.
    fn push(&mut self, state: HistoryState);
    /// State of the current entry.
    fn current(&self) -> Option<HistoryState>;
}

/// In-process session history.
#[derive(Clone, Debug)]
pub struct MemoryHistory {
    entries: Vec<Option<HistoryState>>,
    cursor: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self {
            entries: vec![None],
            cursor: 0,
        }
    }

    /// Start from a document whose initial entry already carries `state`.
    pub fn starting_at(state: HistoryState) -> Self {
        Self {
            entries: vec![Some(state)],
            cursor: 0,
        }
    }

    /// Number of entries, including the initial one.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Step back one entry, returning the event a browser would dispatch.
    pub fn back(&mut self) -> Option<PopEvent> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.pop_event())
    }

    /// Step forward one entry.
    pub fn forward(&mut self) -> Option<PopEvent> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.pop_event())
    }

    fn pop_event(&self) -> PopEvent {
        PopEvent {
            state: self.entries[self.cursor].clone(),
        }
    }
}

impl History for MemoryHistory {
    fn push(&mut self, state: HistoryState) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(Some(state));
        self.cursor += 1;
    }

    fn current(&self) -> Option<HistoryState> {
        self.entries.get(self.cursor).cloned().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_discards_forward_entries() {
        let mut history = MemoryHistory::new();
        history.push(HistoryState::new(Page::Explore));
        history.push(HistoryState::new(Page::SavedRecipes));
        assert_eq!(history.len(), 3);

        let back = history.back().unwrap();
        assert_eq!(back.state, Some(HistoryState::new(Page::Explore)));

        history.push(HistoryState::new(Page::CreateRecipe));
        assert_eq!(history.len(), 3);
        assert!(history.forward().is_none());
        assert_eq!(history.current(), Some(HistoryState::new(Page::CreateRecipe)));
    }

    #[test]
    fn test_initial_entry_has_no_state() {
        let mut history = MemoryHistory::new();
        assert!(history.back().is_none());
        history.push(HistoryState::new(Page::Explore));
        assert_eq!(history.back(), Some(PopEvent { state: None }));
        assert_eq!(
            history.forward(),
            Some(PopEvent {
                state: Some(HistoryState::new(Page::Explore))
            })
        );
    }

    #[test]
    fn test_state_serialization_omits_empty_payload() {
        let plain = serde_json::to_string(&HistoryState::new(Page::Landing)).unwrap();
        assert_eq!(plain, r#"{"page":"landing"}"#);

        let with_payload: HistoryState =
            serde_json::from_str(r#"{"page":"recipe-info","payload":"42"}"#).unwrap();
        assert_eq!(with_payload, HistoryState::with_payload(Page::RecipeInfo, "42"));
    }
}
