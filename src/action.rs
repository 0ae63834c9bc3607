//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{EnrichedItem, FocusArea};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Mount: start the catalog pipeline once
    Init,

    // ===== Catalog category =====
    /// Result: every detail request settled successfully, in catalog order
    CatalogDidLoad(Vec<EnrichedItem>),

    /// Result: catalog or any detail request failed
    CatalogDidError(String),

    // ===== Search category =====
    /// Search text changed (every keystroke)
    SearchQueryChange(String),

    // ===== Grid category =====
    /// Move the grid selection by a number of cells
    GridMove(i16),

    /// Select a cell in the filtered grid (by index)
    GridSelect(usize),

    // ===== Navigate category =====
    /// Hand the selected record to the details route
    NavigateDetails(EnrichedItem),

    /// Return from details to the grid
    NavigateBack,

    // ===== Focus category =====
    FocusSet(FocusArea),
    FocusToggle,

    // ===== UI category =====
    UiTerminalResize(u16, u16),

    /// Force a re-render (cursor movement in the search input)
    Render,

    // ===== Uncategorized (global) =====
    /// Spinner frame tick
    Tick,

    Quit,
}
