//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::config::{DEFAULT_API_BASE, PAGE_SIZE};

/// Number of card columns in the creature grid.
pub const GRID_COLUMNS: usize = 2;

/// Catalog entry as returned by the listing endpoint. Consumed by the
/// enricher and never stored in state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    pub name: String,
    pub detail_url: String,
}

/// Display-ready record built from one detail payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnrichedItem {
    pub name: String,
    pub image_url: Option<String>,
    /// Type names in payload order, joined with ", ".
    pub types: String,
    /// Raw stat objects, passed through for the details view.
    pub stats: Vec<serde_json::Value>,
    /// Raw sprite set, passed through for the details view.
    pub sprites: serde_json::Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum LoadPhase {
    Loading,
    Ready,
    Failed,
}

/// Master list, filtered view and query for the catalog screen.
///
/// `filtered_indices` always points at exactly the master entries whose
/// name contains `query` (case-insensitive), in master order; an empty
/// query selects every entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogView {
    pub items: Vec<EnrichedItem>,
    pub filtered_indices: Vec<usize>,
    pub query: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::loading()
    }
}

impl CatalogView {
    /// Empty view waiting for its first fetch cycle.
    pub fn loading() -> Self {
        Self {
            items: Vec::new(),
            filtered_indices: Vec::new(),
            query: String::new(),
            is_loading: true,
            error: None,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        if self.is_loading {
            LoadPhase::Loading
        } else if self.error.is_some() {
            LoadPhase::Failed
        } else {
            LoadPhase::Ready
        }
    }

    /// Replace the master list with a completed fetch cycle.
    pub fn apply_loaded(&mut self, items: Vec<EnrichedItem>) {
        self.items = items;
        self.is_loading = false;
        self.error = None;
        self.rebuild_filtered();
    }

    /// Leave the loading state without exposing any items.
    pub fn apply_failed(&mut self, error: String) {
        self.items.clear();
        self.filtered_indices.clear();
        self.is_loading = false;
        self.error = Some(error);
    }

    pub fn on_query_change(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.rebuild_filtered();
    }

    pub fn rebuild_filtered(&mut self) {
        if self.query.is_empty() {
            self.filtered_indices = (0..self.items.len()).collect();
            return;
        }
        let needle = self.query.to_lowercase();
        self.filtered_indices = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.name.to_lowercase().contains(&needle))
            .map(|(idx, _)| idx)
            .collect();
    }

    pub fn filtered(&self) -> impl Iterator<Item = &EnrichedItem> + '_ {
        self.filtered_indices
            .iter()
            .filter_map(|idx| self.items.get(*idx))
    }

    pub fn filtered_items(&self) -> Vec<&EnrichedItem> {
        self.filtered().collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered_indices.len()
    }

    pub fn filtered_get(&self, index: usize) -> Option<&EnrichedItem> {
        self.filtered_indices
            .get(index)
            .and_then(|idx| self.items.get(*idx))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FocusArea {
    Search,
    Grid,
}

/// Where the app is currently pointed. `Details` carries the selected
/// record as the navigation payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum Route {
    #[default]
    Home,
    Details(EnrichedItem),
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    pub api_base: String,
    pub page_size: usize,
    pub catalog: CatalogView,
    pub selected_index: usize,
    pub focus: FocusArea,
    pub route: Route,
    pub terminal_size: (u16, u16),
    pub spinner_tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl AppState {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            page_size: PAGE_SIZE,
            catalog: CatalogView::loading(),
            selected_index: 0,
            focus: FocusArea::Grid,
            route: Route::Home,
            terminal_size: (80, 24),
            spinner_tick: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.catalog.is_loading
    }

    pub fn selected_item(&self) -> Option<&EnrichedItem> {
        self.catalog.filtered_get(self.selected_index)
    }

    pub fn details_item(&self) -> Option<&EnrichedItem> {
        match &self.route {
            Route::Details(item) => Some(item),
            Route::Home => None,
        }
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        let len = self.catalog.filtered_len();
        if len == 0 {
            let changed = self.selected_index != 0;
            self.selected_index = 0;
            return changed;
        }
        let bounded = index.min(len - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }

    pub fn clamp_selection(&mut self) {
        let len = self.catalog.filtered_len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusArea::Search => FocusArea::Grid,
            FocusArea::Grid => FocusArea::Search,
        };
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("phase", ron_string(&self.catalog.phase()))
                .entry("total", ron_string(&self.catalog.items.len()))
                .entry("filtered", ron_string(&self.catalog.filtered_len()))
                .entry("query", ron_string(&self.catalog.query))
                .entry("error", ron_string(&self.catalog.error)),
            DebugSection::new("View")
                .entry("selected", ron_string(&self.selected_index))
                .entry("focus", ron_string(&self.focus))
                .entry(
                    "route",
                    ron_string(&self.details_item().map(|item| item.name.clone())),
                )
                .entry("api_base", ron_string(&self.api_base)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(name: &str) -> EnrichedItem {
        EnrichedItem {
            name: name.to_string(),
            image_url: None,
            types: "grass".to_string(),
            stats: Vec::new(),
            sprites: serde_json::Value::Null,
        }
    }

    fn names(view: &CatalogView) -> Vec<&str> {
        view.filtered().map(|item| item.name.as_str()).collect()
    }

    fn loaded(names: &[&str]) -> CatalogView {
        let mut view = CatalogView::loading();
        view.apply_loaded(names.iter().map(|name| item(name)).collect());
        view
    }

    #[test]
    fn test_loading_view_is_empty() {
        let view = CatalogView::loading();
        assert!(view.is_loading);
        assert_eq!(view.phase(), LoadPhase::Loading);
        assert!(view.filtered_items().is_empty());
    }

    #[test]
    fn test_apply_loaded_shows_everything() {
        let view = loaded(&["bulbasaur", "ivysaur"]);
        assert!(!view.is_loading);
        assert_eq!(view.phase(), LoadPhase::Ready);
        assert_eq!(names(&view), vec!["bulbasaur", "ivysaur"]);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let mut view = loaded(&["bulbasaur", "ivysaur", "Charmander"]);
        view.on_query_change("SAUR");
        assert_eq!(names(&view), vec!["bulbasaur", "ivysaur"]);
        view.on_query_change("char");
        assert_eq!(names(&view), vec!["Charmander"]);
    }

    #[test]
    fn test_query_partitions_master_list() {
        let mut view = loaded(&["bulbasaur", "ivysaur", "venusaur", "charmander", "pidgey"]);
        for query in ["a", "saur", "PID", "zz", "r"] {
            view.on_query_change(query);
            let needle = query.to_lowercase();
            for (idx, entry) in view.items.iter().enumerate() {
                let matches = entry.name.to_lowercase().contains(&needle);
                assert_eq!(view.filtered_indices.contains(&idx), matches, "{query} / {}", entry.name);
            }
        }
    }

    #[test]
    fn test_empty_query_restores_master() {
        let mut view = loaded(&["bulbasaur", "ivysaur"]);
        view.on_query_change("ivy");
        assert_eq!(names(&view), vec!["ivysaur"]);
        view.on_query_change("");
        assert_eq!(names(&view), vec!["bulbasaur", "ivysaur"]);
        assert_eq!(view.query, "");
    }

    #[test]
    fn test_query_is_idempotent() {
        let mut view = loaded(&["bulbasaur", "ivysaur"]);
        view.on_query_change("bul");
        let once = view.filtered_indices.clone();
        view.on_query_change("bul");
        assert_eq!(view.filtered_indices, once);
    }

    #[test]
    fn test_whitespace_query_is_not_empty() {
        let mut view = loaded(&["bulbasaur", "mr-mime"]);
        view.on_query_change(" ");
        assert!(view.filtered_items().is_empty());
    }

    #[test]
    fn test_query_set_before_load_applies_after() {
        let mut view = CatalogView::loading();
        view.on_query_change("ivy");
        view.apply_loaded(vec![item("bulbasaur"), item("ivysaur")]);
        assert_eq!(names(&view), vec!["ivysaur"]);
    }

    #[test]
    fn test_apply_failed_exposes_nothing() {
        let mut view = CatalogView::loading();
        view.apply_failed("boom".into());
        assert!(!view.is_loading);
        assert_eq!(view.phase(), LoadPhase::Failed);
        assert!(view.items.is_empty());
        assert!(view.filtered_items().is_empty());
    }

    #[test]
    fn test_selection_clamps_to_filtered() {
        let mut state = AppState::default();
        state.catalog.apply_loaded(vec![item("a"), item("b"), item("c")]);
        assert!(state.set_selected_index(9));
        assert_eq!(state.selected_index, 2);
        state.catalog.on_query_change("a");
        state.clamp_selection();
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.selected_item().map(|item| item.name.as_str()), Some("a"));
    }
}
