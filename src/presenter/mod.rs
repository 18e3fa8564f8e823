//! Presenter contract - the boundary between the queue and whatever draws bars.
//!
//! The manager never renders anything. It asks a [`Presenter`] to build a
//! [`PresentationHandle`] for each queued bar and drives that handle through
//! show, style pushes and dismissal. The presenter reports back through the
//! [`LifecycleCallback`] the manager registers on the handle.
//!
//! # Components
//!
//! - [`Presenter`]: Factory for presentations, tied to a parent container type
//! - [`PresentationHandle`]: One on-screen bar
//! - [`LifecycleCallback`]: Shown / dismissed notifications from the presenter
//! - [`parent`]: Ancestor walk that picks the container bars are attached to
//! - [`console`]: Presenter that renders bars as log lines, with tokio timers
//!
//! # Threading
//!
//! Handles and callbacks are used on a single UI thread. Presenters may invoke
//! callbacks synchronously from inside `show()` or `dismiss()`; the manager
//! holds no borrows while calling into a handle.

pub mod console;
pub mod parent;

pub use console::{ConsoleBar, ConsolePresenter};
pub use parent::{ContainerKind, ViewArena, ViewId, ViewTree, find_suitable_parent};

use crate::error::BarError;
use crate::models::{BarColors, BarConfig, Color, DurationSpec};

/// Why a presentation went away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// The presenter's own timer ran out.
    Timeout,
    /// `dismiss()` was called on the handle.
    Manual,
    /// The user swiped the bar away.
    Swipe,
    /// The user clicked the action button.
    Action,
    /// Another bar took its place.
    Replaced,
}

/// Notifications from a presentation back to whoever created it.
pub trait LifecycleCallback {
    fn on_shown(&self);
    fn on_dismissed(&self, reason: DismissReason);
}

/// A single bar owned by a presenter.
///
/// All methods take `&self`: handles are UI objects with their own interior
/// state, and several parties (manager, timers) may reach the same handle.
#[cfg_attr(test, mockall::automock)]
pub trait PresentationHandle {
    /// Put the bar on screen.
    ///
    /// Implementations that run their own duration timer may need an executor
    /// context; [`ConsoleBar`] spawns it with `tokio::task::spawn_local` and
    /// panics when called inside a runtime but outside a `LocalSet`.
    fn show(&self);
    fn dismiss(&self);
    /// Replace the displayed content without animation.
    fn update_content(&self, config: &BarConfig);
    fn set_progress(&self, progress: u32);
    fn set_overlay(&self, color: Color, alpha: f32);
    fn set_colors(&self, colors: &BarColors);
    fn remove_overlay(&self);
    fn add_lifecycle_callback(&self, callback: Box<dyn LifecycleCallback>);
}

/// Builds presentations inside a parent container.
pub trait Presenter {
    /// Container the bars are attached to.
    type Parent;
    /// Views animated out of the way while a bar is visible.
    type View: Clone;
    type Handle: PresentationHandle;

    /// Create (but do not show) a presentation.
    ///
    /// Fails with [`BarError::NoSuitableParent`] or [`BarError::Presenter`] when
    /// `parent` cannot host a bar.
    fn make(
        &self,
        parent: &Self::Parent,
        config: &BarConfig,
        duration: DurationSpec,
        views_to_move: &[Self::View],
    ) -> Result<Self::Handle, BarError>;
}
