//! Bar manager - queue, playback and listener dispatch behind one handle.
//!
//! [`BarManager`] is the caller-facing surface. It owns:
//! - [`ItemStore`]: configurations registered under caller-chosen ids
//! - [`BarQueue`]: pending display requests, each with a config snapshot
//! - the playback state machine that keeps at most one bar on screen
//! - [`DisplayListener`] dispatch and a [`BarEvent`] broadcast
//!
//! # Threading
//!
//! The manager is single-threaded and callback driven. It is an `Rc` handle
//! (cheap to clone, `!Send`); presenter callbacks hold a weak reference back
//! to it. No internal borrow is held while the presenter or the listener runs,
//! so both may call back into the manager.
//!
//! # Usage
//!
//! ```ignore
//! let manager = BarManager::new(presenter, &view_tree, &some_view)?;
//! manager.put(BarConfig::determinate("Uploading"), UPLOAD_BAR)?;
//!
//! manager.show(UPLOAD_BAR, DurationSpec::Indefinite, Some(upload_id))?;
//! manager.set_progress(40);
//! manager.dismiss()?;
//! ```

mod listener;
mod playback;
mod queue;
mod store;

pub use listener::{BarEvent, DisplayListener};
pub use queue::{BarQueue, QueueEntry};
pub use store::ItemStore;

use crate::error::BarError;
use crate::metrics::Metrics;
use crate::models::{BarConfig, Color, DurationSpec, PendingStyle};
use crate::presenter::{PresentationHandle, Presenter, ViewTree, find_suitable_parent};
use listener::Dispatcher;
use playback::PlaybackState;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Where the configuration for a request comes from.
#[derive(Debug, Clone, Copy)]
pub enum BarSource<'a> {
    /// Configuration registered in the item store.
    Stored(u32),
    /// Ad-hoc configuration, snapshotted on use.
    Config(&'a BarConfig),
}

impl From<u32> for BarSource<'_> {
    fn from(id: u32) -> Self {
        BarSource::Stored(id)
    }
}

impl<'a> From<&'a BarConfig> for BarSource<'a> {
    fn from(config: &'a BarConfig) -> Self {
        BarSource::Config(config)
    }
}

/// Mutable state behind the manager's `RefCell`.
pub(crate) struct Core<P: Presenter> {
    pub(crate) store: ItemStore,
    pub(crate) queue: BarQueue,
    pub(crate) playback: PlaybackState<P::Handle>,
    pub(crate) style: PendingStyle,
    pub(crate) views_to_move: Vec<P::View>,
}

impl<P: Presenter> Core<P> {
    fn resolve(&self, source: BarSource<'_>) -> Result<BarConfig, BarError> {
        match source {
            BarSource::Stored(id) => self.store.require(id).cloned(),
            BarSource::Config(config) => Ok(config.clone()),
        }
    }
}

pub(crate) struct Shared<P: Presenter> {
    pub(crate) presenter: P,
    pub(crate) parent: P::Parent,
    pub(crate) core: RefCell<Core<P>>,
    pub(crate) dispatcher: RefCell<Dispatcher>,
    pub(crate) metrics: Arc<Metrics>,
}

/// Display queue for transient notification bars.
///
/// Requests play strictly in FIFO order, one at a time. An indefinite request
/// plays as short unless it is last in the queue at its own play time; a last
/// indefinite request clears the queue the moment it starts showing.
pub struct BarManager<P: Presenter + 'static> {
    shared: Rc<Shared<P>>,
}

impl<P: Presenter + 'static> Clone for BarManager<P> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<P: Presenter + 'static> BarManager<P> {
    /// Create a manager whose bars attach to the container found by walking
    /// up from `anchor`.
    ///
    /// Fails with [`BarError::NoSuitableParent`] when no ancestor can host a bar.
    pub fn new<T>(presenter: P, tree: &T, anchor: &T::Node) -> Result<Self, BarError>
    where
        T: ViewTree<Node = P::Parent>,
    {
        let parent = find_suitable_parent(tree, anchor)?;
        Ok(Self::with_parent(presenter, parent))
    }

    /// Create a manager attached to an already resolved parent.
    pub fn with_parent(presenter: P, parent: P::Parent) -> Self {
        Self {
            shared: Rc::new(Shared {
                presenter,
                parent,
                core: RefCell::new(Core {
                    store: ItemStore::new(),
                    queue: BarQueue::new(),
                    playback: PlaybackState::default(),
                    style: PendingStyle::default(),
                    views_to_move: Vec::new(),
                }),
                dispatcher: RefCell::new(Dispatcher::new()),
                metrics: Arc::new(Metrics::new()),
            }),
        }
    }

    // Item store

    /// Register `config` under `id`, replacing any previous entry.
    pub fn put(&self, config: BarConfig, id: u32) -> Result<(), BarError> {
        self.shared.core.borrow_mut().store.put(config, id)
    }

    /// Copy of the configuration registered under `id`.
    pub fn get(&self, id: u32) -> Option<BarConfig> {
        self.shared.core.borrow().store.get(id).cloned()
    }

    /// Edit a stored configuration in place. Already queued requests keep
    /// their own snapshot.
    pub fn edit<R>(&self, id: u32, edit: impl FnOnce(&mut BarConfig) -> R) -> Option<R> {
        let mut core = self.shared.core.borrow_mut();
        core.store.get_mut(id).map(edit)
    }

    // Queue and playback

    /// Queue a bar and return its position.
    ///
    /// Position 0 means the queue was empty and the bar is being shown now.
    /// An unknown store id fails with [`BarError::UnknownStoreId`] and leaves
    /// the queue untouched.
    pub fn show<'a>(
        &self,
        source: impl Into<BarSource<'a>>,
        duration: DurationSpec,
        correlation_id: Option<i32>,
    ) -> Result<usize, BarError> {
        let position = {
            let mut guard = self.shared.core.borrow_mut();
            let core = &mut *guard;
            match source.into() {
                BarSource::Stored(id) => {
                    let config = core.store.require(id)?;
                    core.queue.enqueue(config, duration, correlation_id)
                }
                BarSource::Config(config) => core.queue.enqueue(config, duration, correlation_id),
            }
        };

        tracing::debug!(
            "Enqueued bar at position {} ({:?}, correlation id {:?})",
            position,
            duration,
            correlation_id
        );
        self.shared.metrics.record_enqueued();
        self.shared.dispatcher.borrow().emit(BarEvent::Enqueued {
            position,
            correlation_id,
        });

        if position == 0 {
            self.shared.play_queue(0)?;
        }
        Ok(position)
    }

    /// Swap the content of the bar on screen without animation, listeners or
    /// queue changes.
    pub fn update_to<'a>(&self, source: impl Into<BarSource<'a>>) -> Result<(), BarError> {
        let update = {
            let mut core = self.shared.core.borrow_mut();
            let config = core.resolve(source.into())?;
            core.playback.current.as_mut().map(|presentation| {
                presentation.config = config.clone();
                (Rc::clone(&presentation.handle), config)
            })
        };

        if let Some((handle, config)) = update {
            handle.update_content(&config);
        }
        Ok(())
    }

    /// Dismiss the bar on screen and play the next queued request.
    ///
    /// This is the only way past an indefinite bar.
    /// Does nothing when no bar is on screen and nothing is queued.
    pub fn dismiss(&self) -> Result<(), BarError> {
        let (retired, next, generation) = {
            let mut core = self.shared.core.borrow_mut();
            let retired = core.playback.retire_current();
            if retired.is_none() && core.queue.is_empty() {
                return Ok(());
            }
            (retired, core.queue.cursor() + 1, core.queue.generation())
        };

        if let Some(handle) = retired {
            tracing::debug!("Dismissing current bar, advancing to entry {}", next);
            handle.dismiss();
        }
        self.shared.advance(next, generation)
    }

    /// Throw away the queue, then dismiss the bar on screen.
    pub fn dismiss_all(&self) {
        // Reset first so the dismissal cannot advance into a stale queue
        let retired = {
            let mut core = self.shared.core.borrow_mut();
            core.queue.clear();
            core.playback.retire_current()
        };

        tracing::debug!("Queue reset");
        self.shared.metrics.record_reset();
        self.shared.dispatcher.borrow().emit(BarEvent::QueueReset);

        if let Some(handle) = retired {
            handle.dismiss();
        }
    }

    // Style

    pub fn set_overlay_color(&self, color: Color) {
        self.update_style(|style| style.overlay_color = color, PendingStyle::apply_overlay);
    }

    pub fn set_overlay_alpha(&self, alpha: f32) {
        self.update_style(|style| style.set_overlay_alpha(alpha), PendingStyle::apply_overlay);
    }

    pub fn set_background_color(&self, color: Color) {
        self.update_style(|style| style.colors.background = color, PendingStyle::apply_colors);
    }

    pub fn set_message_color(&self, color: Color) {
        self.update_style(|style| style.colors.message = color, PendingStyle::apply_colors);
    }

    pub fn set_action_color(&self, color: Color) {
        self.update_style(|style| style.colors.action = color, PendingStyle::apply_colors);
    }

    pub fn set_progress_color(&self, color: Color) {
        self.update_style(|style| style.colors.progress = color, PendingStyle::apply_colors);
    }

    /// Replace the whole pending style and push it to the bar on screen.
    pub fn set_style(&self, style: PendingStyle) {
        self.update_style(|pending| *pending = style, PendingStyle::apply_to);
    }

    /// Set progress on the bar on screen. Not remembered for later bars.
    pub fn set_progress(&self, progress: u32) {
        let target = {
            let core = self.shared.core.borrow();
            core.playback
                .current
                .as_ref()
                .map(|p| (Rc::clone(&p.handle), p.config.clamp_progress(progress)))
        };
        if let Some((handle, progress)) = target {
            handle.set_progress(progress);
        }
    }

    fn update_style(
        &self,
        edit: impl FnOnce(&mut PendingStyle),
        push: fn(&PendingStyle, &P::Handle),
    ) {
        let (style, handle) = {
            let mut core = self.shared.core.borrow_mut();
            edit(&mut core.style);
            (core.style, core.playback.current_handle())
        };
        if let Some(handle) = handle {
            push(&style, &handle);
        }
    }

    // Host wiring

    /// Views the presenter moves out of the way while a bar is visible.
    pub fn set_views_to_move(&self, views: Vec<P::View>) {
        self.shared.core.borrow_mut().views_to_move = views;
    }

    pub fn set_on_display_listener(&self, listener: Option<Rc<dyn DisplayListener>>) {
        self.shared.dispatcher.borrow_mut().set_listener(listener);
    }

    /// Subscribe to queue and playback events.
    pub fn subscribe(&self) -> broadcast::Receiver<BarEvent> {
        self.shared.dispatcher.borrow().subscribe()
    }

    // Introspection

    /// Configuration of the most recent bar the presenter reported as shown.
    pub fn last_shown(&self) -> Option<BarConfig> {
        self.shared.core.borrow().playback.last_shown.clone()
    }

    pub fn queue_len(&self) -> usize {
        self.shared.core.borrow().queue.len()
    }

    /// Index of the queue entry playback is on.
    pub fn current_index(&self) -> usize {
        self.shared.core.borrow().queue.cursor()
    }

    pub fn is_showing(&self) -> bool {
        self.shared.core.borrow().playback.current.is_some()
    }

    /// Nothing queued and nothing on screen.
    pub fn is_idle(&self) -> bool {
        let core = self.shared.core.borrow();
        core.queue.is_empty() && core.playback.current.is_none()
    }

    pub fn current_correlation_id(&self) -> Option<i32> {
        self.shared
            .core
            .borrow()
            .playback
            .current
            .as_ref()
            .and_then(|p| p.correlation_id)
    }

    /// Resolved duration of the bar on screen.
    pub fn current_duration(&self) -> Option<DurationSpec> {
        self.shared
            .core
            .borrow()
            .playback
            .current
            .as_ref()
            .map(|p| p.duration)
    }

    pub fn style(&self) -> PendingStyle {
        self.shared.core.borrow().style
    }

    pub fn parent(&self) -> &P::Parent {
        &self.shared.parent
    }

    pub fn presenter(&self) -> &P {
        &self.shared.presenter
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.shared.metrics)
    }
}
