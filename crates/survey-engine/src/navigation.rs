use serde::Serialize;

use crate::branching::{NavigationAction, clamp_page};

/// Page position and visit history for one respondent session.
///
/// `current_page_index` always lies in `[0, last_page]`. The visit history is
/// append-only and keeps duplicates in the order pages were entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    current_page_index: usize,
    visited_page_indices: Vec<usize>,
    #[serde(skip)]
    last_page: usize,
}

impl NavigationState {
    pub fn new(page_count: usize, start: i64) -> Self {
        let last_page = page_count.saturating_sub(1);
        let start = clamp_page(start, last_page);
        Self {
            current_page_index: start,
            visited_page_indices: vec![start],
            last_page,
        }
    }

    pub fn current_page_index(&self) -> usize {
        self.current_page_index
    }

    pub fn visited_page_indices(&self) -> &[usize] {
        &self.visited_page_indices
    }

    pub fn last_page_index(&self) -> usize {
        self.last_page
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page_index == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page_index == self.last_page
    }

    /// Moves one page forward. Returns `false` when already on the last page.
    pub fn go_next(&mut self) -> bool {
        if self.current_page_index >= self.last_page {
            return false;
        }
        self.enter(self.current_page_index + 1);
        true
    }

    /// Moves one page back. Returns `false` when already on the first page.
    pub fn go_previous(&mut self) -> bool {
        if self.current_page_index == 0 {
            return false;
        }
        self.enter(self.current_page_index - 1);
        true
    }

    pub fn jump_to(&mut self, target: i64) -> usize {
        let target = clamp_page(target, self.last_page);
        self.enter(target);
        target
    }

    /// Parks navigation on the last page.
    pub fn end_survey(&mut self) -> usize {
        self.enter(self.last_page);
        self.last_page
    }

    pub fn apply(&mut self, action: NavigationAction) -> usize {
        // Targets are already clamped by the resolver, but the page count may differ.
        let target = action.target_page_index.min(self.last_page);
        self.enter(target);
        target
    }

    pub fn reset(&mut self, start: i64) {
        let start = clamp_page(start, self.last_page);
        self.current_page_index = start;
        self.visited_page_indices.clear();
        self.visited_page_indices.push(start);
    }

    fn enter(&mut self, index: usize) {
        self.current_page_index = index;
        self.visited_page_indices.push(index);
    }
}
