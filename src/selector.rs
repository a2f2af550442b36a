//! State and filtering for the constituency picker.

use crate::config::MAX_VISIBLE_RESULTS;
use crate::ConstituencyItem;
use std::rc::Rc;
use yew::prelude::*;

/// Items whose name contains `query` (case-insensitive), in their original
/// order, truncated to `limit`. A blank query previews the first `limit`
/// items.
pub fn filter_items(items: &[ConstituencyItem], query: &str, limit: usize) -> Vec<ConstituencyItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().take(limit).cloned().collect();
    }

    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect()
}

/// [`filter_items`] with the picker's result cap.
pub fn visible_items(items: &[ConstituencyItem], query: &str) -> Vec<ConstituencyItem> {
    filter_items(items, query, MAX_VISIBLE_RESULTS)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectorState {
    pub is_expanded: bool,
    pub search_query: String,
    pub selected_item: Option<ConstituencyItem>,
}

pub enum SelectorAction {
    Toggle,
    SetSearchQuery(String),
    Select(ConstituencyItem),
    /// Outside click or cancel key. Collapses but keeps the query.
    Dismiss,
}

impl SelectorState {
    pub fn apply(&mut self, action: SelectorAction) {
        match action {
            SelectorAction::Toggle => self.is_expanded = !self.is_expanded,
            SelectorAction::SetSearchQuery(query) => self.search_query = query,
            SelectorAction::Select(item) => {
                self.selected_item = Some(item);
                self.is_expanded = false;
                self.search_query.clear();
            }
            SelectorAction::Dismiss => self.is_expanded = false,
        }
    }
}

impl Reducible for SelectorState {
    type Action = SelectorAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(code: &str, name: &str) -> ConstituencyItem {
        ConstituencyItem {
            code: code.to_string(),
            name: name.to_string(),
        }
    }

    fn numbered(n: usize) -> Vec<ConstituencyItem> {
        (1..=n)
            .map(|i| item(&format!("C{}", i), &format!("Item {}", i)))
            .collect()
    }

    #[test]
    fn empty_query_previews_first_fifteen_in_order() {
        let items = numbered(20);
        let names: Vec<String> = visible_items(&items, "")
            .into_iter()
            .map(|i| i.name)
            .collect();
        let expected: Vec<String> = (1..=15).map(|i| format!("Item {}", i)).collect();
        assert_eq!(names, expected);

        // Whitespace-only queries count as empty.
        assert_eq!(visible_items(&items, "   "), visible_items(&items, ""));
    }

    #[test]
    fn glasgow_edinburgh_scenario() {
        let items = vec![item("A", "Glasgow Central"), item("B", "Edinburgh North")];

        assert_eq!(visible_items(&items, "glas"), vec![items[0].clone()]);
        assert_eq!(visible_items(&items, ""), items);
        assert!(visible_items(&items, "zz").is_empty());
    }

    #[test]
    fn matches_are_case_insensitive_substrings_capped_at_fifteen() {
        let items = numbered(40);
        let result = visible_items(&items, "ITEM 1");

        assert!(result.len() <= MAX_VISIBLE_RESULTS);
        assert!(result
            .iter()
            .all(|i| i.name.to_lowercase().contains("item 1")));
        // Item 1, Item 10..=Item 19 keep their original order.
        assert_eq!(result[0].name, "Item 1");
        assert_eq!(result[1].name, "Item 10");
        assert_eq!(result.len(), 11);
    }

    #[test]
    fn query_is_trimmed_before_matching() {
        let items = vec![item("A", "Glasgow Central"), item("B", "Edinburgh North")];
        assert_eq!(visible_items(&items, "  north "), vec![items[1].clone()]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let items = numbered(30);
        assert_eq!(visible_items(&items, "2"), visible_items(&items, "2"));
    }

    #[test]
    fn toggle_flips_expansion() {
        let mut state = SelectorState::default();
        state.apply(SelectorAction::Toggle);
        assert!(state.is_expanded);
        state.apply(SelectorAction::Toggle);
        assert!(!state.is_expanded);
    }

    #[test]
    fn select_collapses_and_clears_query() {
        let mut state = SelectorState::default();
        state.apply(SelectorAction::Toggle);
        state.apply(SelectorAction::SetSearchQuery("glas".into()));
        state.apply(SelectorAction::Select(item("A", "Glasgow Central")));

        assert!(!state.is_expanded);
        assert!(state.search_query.is_empty());
        assert_eq!(state.selected_item, Some(item("A", "Glasgow Central")));
    }

    #[test]
    fn dismiss_collapses_but_keeps_query_and_selection() {
        let mut state = SelectorState {
            is_expanded: true,
            search_query: "edin".into(),
            selected_item: Some(item("A", "Glasgow Central")),
        };
        state.apply(SelectorAction::Dismiss);

        assert!(!state.is_expanded);
        assert_eq!(state.search_query, "edin");
        assert_eq!(state.selected_item, Some(item("A", "Glasgow Central")));
    }

    #[test]
    fn reducer_reuses_state_when_nothing_changes() {
        let state = Rc::new(SelectorState::default());
        let next = state.clone().reduce(SelectorAction::Dismiss);
        assert!(Rc::ptr_eq(&state, &next));
    }
}
