//! Jump-to-plot search.

use super::PlotGroup;

/// Search state for finding plot groups by id.
#[derive(Debug)]
pub struct SearchState {
    is_active: bool,
    buffer: String,
    query: String,
    matches: Vec<usize>,
    current_match: usize,
}

impl SearchState {
    /// Create a new search state.
    pub fn new() -> Self {
        Self {
            is_active: false,
            buffer: String::new(),
            query: String::new(),
            matches: Vec::new(),
            current_match: 0,
        }
    }

    /// Check if search input is active.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Start typing a query.
    pub fn start(&mut self) {
        self.is_active = true;
        self.buffer.clear();
    }

    /// Add a character to the search buffer.
    pub fn input(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Remove the last character from the search buffer.
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Submit the buffer as the new query.
    pub fn submit(&mut self) {
        if !self.buffer.is_empty() {
            self.query = self.buffer.clone();
        }
        self.buffer.clear();
        self.is_active = false;
    }

    /// Cancel the search.
    pub fn cancel(&mut self) {
        self.is_active = false;
        self.buffer.clear();
        self.matches.clear();
        self.current_match = 0;
    }

    /// Find groups whose plot id contains the query (case-insensitive).
    /// An exact match, if present, becomes the current match.
    pub fn perform_search(&mut self, groups: &[PlotGroup]) {
        self.matches.clear();
        self.current_match = 0;

        if self.query.is_empty() {
            return;
        }

        let needle = self.query.to_lowercase();
        self.matches = groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.plot_id.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();

        if let Some(pos) = self
            .matches
            .iter()
            .position(|&i| groups[i].plot_id == self.query)
        {
            self.current_match = pos;
        }
    }

    /// Group index of the current match.
    pub fn current_match_index(&self) -> Option<usize> {
        self.matches.get(self.current_match).copied()
    }

    /// Move to the next match.
    pub fn next_match(&mut self) {
        if !self.matches.is_empty() {
            self.current_match = (self.current_match + 1) % self.matches.len();
        }
    }

    /// Move to the previous match.
    pub fn prev_match(&mut self) {
        if !self.matches.is_empty() {
            if self.current_match == 0 {
                self.current_match = self.matches.len() - 1;
            } else {
                self.current_match -= 1;
            }
        }
    }

    /// Get the search buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Get the search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Get the number of matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Position of the current match among all matches.
    pub fn current_match_position(&self) -> usize {
        self.current_match
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MeasurementRow;
    use crate::navigator::{NavigatorConfig, PlotNavigator};

    fn navigator(conditions: &[&str]) -> PlotNavigator {
        let rows: Vec<MeasurementRow> = conditions
            .iter()
            .map(|c| MeasurementRow::new(c, "obs", 0.0, 1.0))
            .collect();
        let mut nav = PlotNavigator::new(NavigatorConfig::default());
        nav.load(&rows, None).unwrap();
        nav
    }

    fn search(query: &str, nav: &PlotNavigator) -> SearchState {
        let mut state = SearchState::new();
        state.start();
        query.chars().for_each(|c| state.input(c));
        state.submit();
        state.perform_search(nav.groups());
        state
    }

    #[test]
    fn substring_matches_in_page_order() {
        let nav = navigator(&["dose_1", "control", "dose_10"]);
        let mut state = search("DOSE", &nav);
        assert_eq!(state.match_count(), 2);
        assert_eq!(state.current_match_index(), Some(0));
        state.next_match();
        assert_eq!(state.current_match_index(), Some(2));
        state.next_match();
        assert_eq!(state.current_match_index(), Some(0));
        state.prev_match();
        assert_eq!(state.current_match_index(), Some(2));
    }

    #[test]
    fn exact_match_is_preferred() {
        let nav = navigator(&["dose_10", "dose_1"]);
        let state = search("dose_1", &nav);
        assert_eq!(state.current_match_index(), Some(1));
    }

    #[test]
    fn cancel_clears_matches() {
        let nav = navigator(&["a"]);
        let mut state = search("a", &nav);
        state.cancel();
        assert_eq!(state.match_count(), 0);
        assert_eq!(state.current_match_index(), None);
        assert!(!state.is_active());
    }
}
