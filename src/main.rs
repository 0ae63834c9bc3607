//! Pokegrid - searchable PokeAPI creature grid

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Frame, Terminal,
};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{DebugRunOutput, DebugSession, DebugSessionError, ReplayItem};

use pokegrid::action::Action;
use pokegrid::api::PokeApi;
use pokegrid::components::{
    Component, CreatureGrid, CreatureGridProps, DetailsView, DetailsViewProps, Footer,
    FooterProps, LoadingSpinner, LoadingSpinnerProps, SearchBar, SearchBarProps,
};
use pokegrid::config::Args;
use pokegrid::effect::Effect;
use pokegrid::logging;
use pokegrid::reducer::reducer;
use pokegrid::state::{AppState, FocusArea, Route};

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum GridComponentId {
    Search,
    Grid,
    Details,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum GridContext {
    Main,
    Search,
    Details,
}

impl EventRoutingState<GridComponentId, GridContext> for AppState {
    fn focused(&self) -> Option<GridComponentId> {
        if matches!(self.route, Route::Details(_)) {
            return Some(GridComponentId::Details);
        }
        if self.is_loading() {
            return None;
        }
        match self.focus {
            FocusArea::Search => Some(GridComponentId::Search),
            FocusArea::Grid => Some(GridComponentId::Grid),
        }
    }

    fn modal(&self) -> Option<GridComponentId> {
        if matches!(self.route, Route::Details(_)) {
            Some(GridComponentId::Details)
        } else {
            None
        }
    }

    fn binding_context(&self, id: GridComponentId) -> GridContext {
        match id {
            GridComponentId::Grid => GridContext::Main,
            GridComponentId::Search => GridContext::Search,
            GridComponentId::Details => GridContext::Details,
        }
    }

    fn default_context(&self) -> GridContext {
        GridContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    let _log_guard = logging::init(&args.log_dir()).map_err(io::Error::other)?;

    let api_base = args.api_base();
    let tick_ms = args.tick_ms;
    let debug = DebugSession::new(args.debug);

    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(api_base))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, tick_ms, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("pokegrid exited");
    Ok(())
}

struct GridUi {
    search: SearchBar,
    grid: CreatureGrid,
    details: DetailsView,
    spinner: LoadingSpinner,
    footer: Footer,
}

impl GridUi {
    fn new() -> Self {
        Self {
            search: SearchBar::new(),
            grid: CreatureGrid,
            details: DetailsView,
            spinner: LoadingSpinner,
            footer: Footer::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        _render_ctx: RenderContext,
        event_ctx: &mut EventContext<GridComponentId>,
    ) {
        if let Some(item) = state.details_item() {
            let chunks = Layout::vertical([
                Constraint::Min(1),    // Details
                Constraint::Length(1), // Footer
            ])
            .split(area);
            event_ctx.set_component_area(GridComponentId::Details, chunks[0]);
            self.details.render(
                frame,
                chunks[0],
                DetailsViewProps {
                    item,
                    is_focused: true,
                },
            );
            self.footer.render(frame, chunks[1], FooterProps { state });
            return;
        }
        event_ctx.component_areas.remove(&GridComponentId::Details);

        if state.is_loading() {
            self.spinner.render(
                frame,
                area,
                LoadingSpinnerProps {
                    tick: state.spinner_tick,
                },
            );
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Length(3), // Search
            Constraint::Min(1),    // Grid
            Constraint::Length(1), // Footer
        ])
        .split(area);

        event_ctx.set_component_area(GridComponentId::Search, chunks[0]);
        self.search.render(
            frame,
            chunks[0],
            SearchBarProps {
                query: &state.catalog.query,
                is_focused: state.focus == FocusArea::Search,
            },
        );

        event_ctx.set_component_area(GridComponentId::Grid, chunks[1]);
        let items = state.catalog.filtered_items();
        self.grid.render(
            frame,
            chunks[1],
            CreatureGridProps {
                items: &items,
                selected: state.selected_index,
                is_focused: state.focus == FocusArea::Grid,
                empty_message: empty_message(state),
            },
        );

        self.footer.render(frame, chunks[2], FooterProps { state });
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        // Leave Tab and Ctrl+C to the global handler.
        if let EventKind::Key(key) = event {
            if key.code == KeyCode::Tab
                || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
            {
                return HandlerResponse::ignored();
            }
        }
        let props = SearchBarProps {
            query: &state.catalog.query,
            is_focused: true,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }

    fn handle_grid_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let items = state.catalog.filtered_items();
        let props = CreatureGridProps {
            items: &items,
            selected: state.selected_index,
            is_focused: true,
            empty_message: "",
        };
        consumed_if_any(self.grid.handle_event(event, props).into_iter().collect())
    }

    fn handle_details_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let Some(item) = state.details_item() else {
            return HandlerResponse::ignored();
        };
        let props = DetailsViewProps {
            item,
            is_focused: true,
        };
        consumed_if_any(self.details.handle_event(event, props).into_iter().collect())
    }
}

fn consumed_if_any(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn search_active(state: &AppState) -> bool {
    state.route == Route::Home && !state.is_loading() && state.focus == FocusArea::Search
}

fn empty_message(state: &AppState) -> &'static str {
    if state.catalog.error.is_some() {
        "No creatures loaded"
    } else {
        "No creatures match"
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    tick_ms: u64,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(GridUi::new()));
    let mut bus: EventBus<AppState, Action, GridComponentId, GridContext> = EventBus::new();
    let keybindings: Keybindings<GridContext> = Keybindings::new();

    let ui_search = Rc::clone(&ui);
    bus.register(GridComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_grid = Rc::clone(&ui);
    bus.register(GridComponentId::Grid, move |event, state| {
        ui_grid.borrow_mut().handle_grid_event(&event.kind, state)
    });

    let ui_details = Rc::clone(&ui);
    bus.register(GridComponentId::Details, move |event, state| {
        ui_details
            .borrow_mut()
            .handle_details_event(&event.kind, state)
    });

    bus.register_global(|event, state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) => match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                HandlerResponse::action(Action::Quit)
            }
            KeyCode::Char('q') if !search_active(state) => {
                HandlerResponse::action(Action::Quit)
            }
            KeyCode::Tab if state.route == Route::Home && !state.is_loading() => {
                HandlerResponse::action(Action::FocusToggle)
            }
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(tick_ms), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadCatalog { api_base, limit } => {
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                match PokeApi::http(api_base).load_catalog(limit).await {
                    Ok(items) => {
                        tracing::info!(count = items.len(), "catalog loaded");
                        Action::CatalogDidLoad(items)
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "catalog load failed");
                        Action::CatalogDidError(err.to_string())
                    }
                }
            });
        }
    }
}
