//! Pokegrid - creature catalog browser
//!
//! Fetches one page of the PokeAPI catalog, enriches every entry with its
//! detail record, and shows the result as a searchable two-column grid.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod state;
