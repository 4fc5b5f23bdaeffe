//! Census Scope: an interactive dashboard relating education level and
//! income in the adult census data, with a selectable categorical third
//! dimension.
//!
//! The data layer (load, filter, summarize) is UI-free and is what the
//! integration tests exercise; the `app`, `state`, and `ui` modules wire it
//! to egui.

pub mod app;
pub mod color;
pub mod data;
pub mod state;
pub mod ui;
