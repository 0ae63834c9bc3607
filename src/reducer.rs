//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Route};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            // A settled catalog (or a restored snapshot) never refetches.
            if !state.catalog.is_loading {
                return DispatchResult::unchanged();
            }
            state.spinner_tick = 0;
            DispatchResult::changed_with(Effect::LoadCatalog {
                api_base: state.api_base.clone(),
                limit: state.page_size,
            })
        }

        Action::CatalogDidLoad(items) => {
            state.catalog.apply_loaded(items);
            state.clamp_selection();
            DispatchResult::changed()
        }

        Action::CatalogDidError(error) => {
            state.catalog.apply_failed(error);
            state.selected_index = 0;
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            if query == state.catalog.query {
                return DispatchResult::unchanged();
            }
            state.catalog.on_query_change(query);
            state.selected_index = 0;
            DispatchResult::changed()
        }

        Action::GridMove(delta) => {
            let len = state.catalog.filtered_len();
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let next = (state.selected_index as i64 + delta as i64).clamp(0, len as i64 - 1);
            if state.set_selected_index(next as usize) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::GridSelect(index) => {
            if state.set_selected_index(index) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::NavigateDetails(item) => {
            state.route = Route::Details(item);
            DispatchResult::changed()
        }

        Action::NavigateBack => {
            if state.route == Route::Home {
                return DispatchResult::unchanged();
            }
            state.route = Route::Home;
            DispatchResult::changed()
        }

        Action::FocusSet(area) => {
            if state.focus == area {
                return DispatchResult::unchanged();
            }
            state.focus = area;
            DispatchResult::changed()
        }

        Action::FocusToggle => {
            state.toggle_focus();
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if !state.catalog.is_loading {
                return DispatchResult::unchanged();
            }
            state.spinner_tick = state.spinner_tick.wrapping_add(1);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}
