//! Visibility & Lifecycle Trigger: decides *when* the next page is wanted.
//!
//! The rendering layer positions a [`Sentinel`] at the end of the list. The
//! [`VisibilityTrigger`] measures it (periodically via the [`TickerActor`] and
//! on request) and arms whenever the sentinel is close to the viewport while
//! the view is in the foreground. The [`ReadinessGate`] holds back the first
//! fetch until the surrounding context is initialised.

mod readiness;
mod restore;
mod sentinel;
mod ticker;
mod visibility;

pub use readiness::ReadinessGate;
pub use restore::{NoRestore, ScrollRestore, ScrollRestorer};
pub use sentinel::{Sentinel, SentinelBounds};
pub use ticker::{Tick, TickerActor};
pub use visibility::VisibilityTrigger;

/// Lifecycle transitions of the consuming view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// The view moved to the background.
    Suspended,
    /// The view is back in the foreground.
    Resumed,
    /// The view is gone for good.
    Destroyed,
}
