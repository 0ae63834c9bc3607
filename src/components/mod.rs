pub mod creature_grid;
pub mod details_view;
pub mod footer;
pub mod loading_spinner;
pub mod search_bar;
pub mod theme;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use creature_grid::{CreatureGrid, CreatureGridProps, CARD_HEIGHT};
pub use details_view::{DetailsView, DetailsViewProps};
pub use footer::{Footer, FooterProps};
pub use loading_spinner::{LoadingSpinner, LoadingSpinnerProps, SPINNER_FRAMES};
pub use search_bar::{SearchBar, SearchBarProps};
