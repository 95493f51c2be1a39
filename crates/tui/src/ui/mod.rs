//! Terminal rendering: the view binder, layout, theme and the event loop.

pub mod binder;
pub mod layout;
pub mod main;
pub mod runtime;
pub mod theme;
pub mod utils;
