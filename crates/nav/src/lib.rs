//! # Marquee focus navigation
//!
//! Remote-control style focus navigation over a stack of horizontally
//! scrolling rows. The crate is split the same way the behavior is:
//!
//! - [`RowGrid`]: shared, lock-protected row contents that loaders may replace
//!   at any time
//! - [`movement`]: pure cursor arithmetic for the four directions
//! - [`scroll`]: the two-pass centering computation for horizontal moves
//! - [`NavigationGuard`]: the busy flag that rate-limits held-down keys
//! - [`FocusNavigator`]: the component that ties them together and talks to a
//!   [`ViewBinder`]
//!
//! Nothing here knows how items are drawn. Rendering layers implement
//! [`ViewBinder`] to expose geometry and receive focus/scroll requests, and
//! catalog clients implement [`ItemSource`] to fill rows.

mod binder;
mod error;
mod grid;
mod guard;
pub mod movement;
mod navigator;
pub mod scroll;
mod source;

pub use binder::{ScrollBehavior, ViewBinder};
pub use error::NavError;
pub use grid::{Row, RowGrid};
pub use guard::{DEFAULT_GUARD_DELAY, GuardState, NavigationGuard, ScheduledTask, Scheduler, TokioScheduler};
pub use navigator::{Activation, FocusNavigator};
pub use source::{ItemSource, load_section};
