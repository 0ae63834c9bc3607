//! Store, component and action-category tests

use tui_dispatch::testing::*;
use tui_dispatch::{assert_emitted, assert_not_emitted, EffectStore, NumericComponentId};
use pokegrid::{
    action::Action,
    components::{Component, CreatureGrid, CreatureGridProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, EnrichedItem, FocusArea, LoadPhase, Route},
};

fn item(name: &str) -> EnrichedItem {
    EnrichedItem {
        name: name.to_string(),
        image_url: Some(format!("https://img/{name}.png")),
        types: "grass, poison".to_string(),
        stats: Vec::new(),
        sprites: serde_json::json!({ "front_default": format!("https://img/{name}.png") }),
    }
}

#[test]
fn test_reducer_init_starts_load() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert!(store.state().is_loading());
    assert!(store.state().catalog.items.is_empty());

    let result = store.dispatch(Action::Init);
    assert!(result.changed);
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(
        result.effects[0],
        Effect::LoadCatalog { limit: 20, .. }
    ));
}

#[test]
fn test_reducer_catalog_load() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::Init);
    store.dispatch(Action::CatalogDidLoad(vec![item("bulbasaur"), item("ivysaur")]));

    assert_eq!(store.state().catalog.phase(), LoadPhase::Ready);
    assert_eq!(store.state().catalog.filtered_len(), 2);
    assert_eq!(
        store.state().selected_item().map(|i| i.name.as_str()),
        Some("bulbasaur")
    );
}

#[test]
fn test_reducer_catalog_error_leaves_grid_empty() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::Init);
    store.dispatch(Action::CatalogDidError("status 500".into()));

    assert!(!store.state().is_loading());
    assert_eq!(store.state().catalog.phase(), LoadPhase::Failed);
    assert!(store.state().catalog.filtered_items().is_empty());
}

#[test]
fn test_grid_keyboard_events() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let a = item("bulbasaur");
    let b = item("ivysaur");
    let items = [&a, &b];
    let mut component = CreatureGrid;

    let actions = harness.send_keys::<NumericComponentId, _, _>("l j /", |_state, event| {
        let props = CreatureGridProps {
            items: &items,
            selected: 0,
            is_focused: true,
            empty_message: "",
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(3);
    actions.assert_first(Action::GridMove(1));
    assert_emitted!(actions, Action::GridMove(2));
    assert_emitted!(actions, Action::FocusSet(FocusArea::Search));
}

#[test]
fn test_grid_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let a = item("bulbasaur");
    let items = [&a];
    let mut component = CreatureGrid;

    let actions = harness.send_keys::<NumericComponentId, _, _>("l j /", |_state, event| {
        let props = CreatureGridProps {
            items: &items,
            selected: 0,
            is_focused: false,
            empty_message: "",
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    let did_load = Action::CatalogDidLoad(Vec::new());
    let resize = Action::UiTerminalResize(80, 24);
    let tick = Action::Tick;

    assert_eq!(did_load.category(), Some("catalog_did"));
    assert_eq!(resize.category(), Some("ui_terminal"));
    assert_eq!(tick.category(), None);

    assert!(did_load.is_catalog_did());
    assert!(resize.is_ui_terminal());
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::Init,
        Action::CatalogDidLoad(vec![item("bulbasaur")]),
    ];

    assert_emitted!(actions, Action::Init);
    assert_emitted!(actions, Action::CatalogDidLoad(_));
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::CatalogDidError(_));
}

#[test]
fn test_navigation_payload_is_the_selected_record() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::CatalogDidLoad(vec![item("bulbasaur"), item("ivysaur")]));
    store.dispatch(Action::GridMove(1));

    let selected = store.state().selected_item().cloned();
    assert_eq!(selected.as_ref().map(|i| i.name.as_str()), Some("ivysaur"));

    if let Some(record) = selected {
        store.dispatch(Action::NavigateDetails(record.clone()));
        assert_eq!(store.state().route, Route::Details(record));
    }
}
