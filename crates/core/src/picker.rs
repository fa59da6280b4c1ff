//! Condition picker: the static taxonomy merged with live search suggestions
//!
//! The picker owns the current selection set and the latest suggestions. It
//! does no I/O itself. Callers ask it for a [`SearchTicket`] when the search
//! term changes, run the search however they like, and hand the results back
//! with [`ConditionPicker::apply_results`]. Only the newest ticket is honoured,
//! so a slow response for an earlier keystroke can never overwrite the
//! suggestions for a later one.

use std::collections::HashSet;

use serde::Serialize;

use crate::condition::ConditionSelection;
use crate::language::Language;
use crate::search::SearchRequest;
use crate::taxonomy;
use crate::topic::Topic;

/// Minimum number of characters before a live search is issued
pub const MIN_QUERY_CHARS: usize = 2;

/// Suggestions requested per live search
pub const SUGGESTION_LIMIT: u32 = 5;

/// A live search the caller should run on the picker's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub request: SearchRequest,
}

/// Where a picker option came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionOrigin {
    Taxonomy,
    Search,
}

/// One renderable option of the merged list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerOption {
    pub label: String,
    pub origin: OptionOrigin,
    pub selected: bool,
    pub condition: ConditionSelection,
}

#[derive(Debug, Clone, Default)]
pub struct ConditionPicker {
    selected: Vec<ConditionSelection>,
    search_term: String,
    suggestions: Vec<ConditionSelection>,
    latest_seq: u64,
    in_flight: Option<u64>,
}

impl ConditionPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picker pre-loaded with a saved selection set. Repeated concept ids are
    /// dropped, keeping the first occurrence.
    pub fn with_selected(conditions: impl IntoIterator<Item = ConditionSelection>) -> Self {
        let mut picker = Self::new();
        for condition in conditions {
            picker.add(condition);
        }
        picker
    }

    pub fn selected(&self) -> &[ConditionSelection] {
        &self.selected
    }

    pub fn suggestions(&self) -> &[ConditionSelection] {
        &self.suggestions
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// True while the newest ticket has not been answered
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_selected(&self, concept_id: &str) -> bool {
        self.selected.iter().any(|c| c.concept_id == concept_id)
    }

    /// Record a new search term.
    ///
    /// Returns a ticket when the term is long enough to search. Shorter terms
    /// clear the suggestions and invalidate any outstanding ticket.
    pub fn query_changed(&mut self, term: &str, language: Language) -> Option<SearchTicket> {
        self.search_term = term.to_string();
        self.latest_seq += 1;

        if term.chars().count() < MIN_QUERY_CHARS {
            self.suggestions.clear();
            self.in_flight = None;
            return None;
        }

        self.in_flight = Some(self.latest_seq);
        Some(SearchTicket {
            seq: self.latest_seq,
            request: SearchRequest::new(term, language).with_results(SUGGESTION_LIMIT),
        })
    }

    /// Apply search results for `seq`. Returns false if the ticket is stale.
    pub fn apply_results(&mut self, seq: u64, topics: &[Topic]) -> bool {
        if self.in_flight != Some(seq) {
            return false;
        }
        self.in_flight = None;
        self.suggestions = topics.iter().map(ConditionSelection::from).collect();
        true
    }

    /// A failed search clears suggestions, unless it was already superseded.
    pub fn search_failed(&mut self, seq: u64) -> bool {
        if self.in_flight != Some(seq) {
            return false;
        }
        self.in_flight = None;
        self.suggestions.clear();
        true
    }

    /// Add a condition to the selection set.
    ///
    /// Returns false, leaving the set untouched, if the concept is already
    /// selected. Either way the search box is reset.
    pub fn add(&mut self, condition: ConditionSelection) -> bool {
        self.reset_search();
        if self.is_selected(&condition.concept_id) {
            return false;
        }
        self.selected.push(condition);
        true
    }

    /// Add a taxonomy entry by concept code
    pub fn add_from_taxonomy(&mut self, concept_id: &str) -> bool {
        match taxonomy::find(concept_id) {
            Some(entry) => self.add(entry.to_condition()),
            None => false,
        }
    }

    /// Remove by concept id. Returns false if it was not selected.
    pub fn remove(&mut self, concept_id: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|c| c.concept_id != concept_id);
        self.selected.len() != before
    }

    /// Taxonomy entries then search suggestions, de-duplicated by concept id
    pub fn options(&self, language: Language) -> Vec<PickerOption> {
        let taxonomy = taxonomy::entries().map(|entry| (entry.to_condition(), OptionOrigin::Taxonomy));
        let search = self
            .suggestions
            .iter()
            .cloned()
            .map(|condition| (condition, OptionOrigin::Search));

        let mut seen = HashSet::new();
        taxonomy
            .chain(search)
            .filter(|(condition, _)| seen.insert(condition.concept_id.clone()))
            .map(|(condition, origin)| PickerOption {
                label: condition.display_name(language).to_string(),
                selected: self.is_selected(&condition.concept_id),
                origin,
                condition,
            })
            .collect()
    }

    /// Labels of the selected conditions in `language`
    pub fn selected_labels(&self, language: Language) -> Vec<&str> {
        self.selected
            .iter()
            .map(|condition| condition.display_name(language))
            .collect()
    }

    fn reset_search(&mut self) {
        self.search_term.clear();
        self.suggestions.clear();
        self.in_flight = None;
        self.latest_seq += 1;
    }
}
