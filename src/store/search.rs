//! Search slice
//!
//! Filters are staged while the filter sheet is open and only take effect on
//! the browse screen when applied. Resetting discards both.

use serde::{Deserialize, Serialize};

use crate::catalog::MerchantSummary;

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Backend-recommended order (no client-side reordering).
    #[default]
    Recommended,

    /// Highest rating first.
    Rating,

    /// Alphabetical by name.
    Alphabetical,
}

/// A set of browse filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Free-text query matched against merchant names.
    pub query: String,

    /// Selected cuisine tags. A merchant matches if it carries any of them.
    pub cuisines: Vec<String>,

    /// Only show merchants currently accepting orders.
    pub open_now: bool,

    /// Result ordering.
    pub sort: SortOrder,
}

impl SearchFilters {
    /// Whether a merchant passes these filters.
    #[must_use]
    pub fn matches(&self, merchant: &MerchantSummary) -> bool {
        if self.open_now && !merchant.open {
            return false;
        }

        if !self.query.is_empty()
            && !merchant
                .name
                .to_lowercase()
                .contains(&self.query.to_lowercase())
        {
            return false;
        }

        if !self.cuisines.is_empty()
            && !merchant
                .cuisines
                .iter()
                .any(|cuisine| self.cuisines.contains(cuisine))
        {
            return false;
        }

        true
    }
}

/// Search slice state: the staged (sheet) and applied (browse) filter sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    /// Filters being edited in the filter sheet.
    pub staged: SearchFilters,

    /// Filters in effect on the browse screen.
    pub applied: SearchFilters,
}

/// Search slice actions.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchAction {
    /// Stage a free-text query.
    SetQuery(String),

    /// Toggle a cuisine tag in the staged set.
    ToggleCuisine(String),

    /// Stage the open-now filter.
    SetOpenNow(bool),

    /// Stage a sort order.
    SetSort(SortOrder),

    /// Apply the staged filters to the browse screen.
    Apply,

    /// Discard both staged and applied filters.
    Reset,
}

pub(super) fn reduce(state: &mut SearchState, action: SearchAction) {
    match action {
        SearchAction::SetQuery(query) => state.staged.query = query,
        SearchAction::ToggleCuisine(cuisine) => {
            if let Some(index) = state.staged.cuisines.iter().position(|c| *c == cuisine) {
                state.staged.cuisines.remove(index);
            } else {
                state.staged.cuisines.push(cuisine);
            }
        }
        SearchAction::SetOpenNow(open_now) => state.staged.open_now = open_now,
        SearchAction::SetSort(sort) => state.staged.sort = sort,
        SearchAction::Apply => state.applied = state.staged.clone(),
        SearchAction::Reset => *state = SearchState::default(),
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::MerchantId;

    use super::*;

    fn merchant(name: &str, cuisines: &[&str], open: bool) -> MerchantSummary {
        MerchantSummary {
            id: MerchantId::new(name),
            name: name.to_owned(),
            cuisines: cuisines.iter().map(|c| (*c).to_owned()).collect(),
            rating: 4.0,
            open,
        }
    }

    #[test]
    fn staged_filters_only_apply_after_apply() {
        let mut state = SearchState::default();

        reduce(&mut state, SearchAction::SetOpenNow(true));
        assert!(!state.applied.open_now);

        reduce(&mut state, SearchAction::Apply);
        assert!(state.applied.open_now);
    }

    #[test]
    fn toggle_cuisine_adds_then_removes() {
        let mut state = SearchState::default();

        reduce(&mut state, SearchAction::ToggleCuisine("pizza".to_owned()));
        assert_eq!(state.staged.cuisines, vec!["pizza".to_owned()]);

        reduce(&mut state, SearchAction::ToggleCuisine("pizza".to_owned()));
        assert!(state.staged.cuisines.is_empty());
    }

    #[test]
    fn filters_match_on_query_cuisine_and_open() {
        let filters = SearchFilters {
            query: "burger".to_owned(),
            cuisines: vec!["american".to_owned()],
            open_now: true,
            sort: SortOrder::Recommended,
        };

        assert!(filters.matches(&merchant("Burger Barn", &["american"], true)));
        assert!(!filters.matches(&merchant("Burger Barn", &["american"], false)));
        assert!(!filters.matches(&merchant("Burger Barn", &["thai"], true)));
        assert!(!filters.matches(&merchant("Pizza Place", &["american"], true)));
    }
}
