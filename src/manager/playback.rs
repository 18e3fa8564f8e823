// Playback state machine
//
// Drives at most one presentation at a time: make -> style -> callback ->
// show, then advances through the queue as the presenter reports dismissals.

use super::Shared;
use super::listener::{BarEvent, notify_dismissed, notify_shown};
use crate::error::BarError;
use crate::models::{BarConfig, DurationSpec};
use crate::presenter::{DismissReason, LifecycleCallback, PresentationHandle, Presenter};
use std::rc::{Rc, Weak};

/// A bar handed to the presenter.
pub(crate) struct Presentation<H> {
    /// Identifies this presentation in lifecycle callbacks.
    pub(crate) token: u64,
    pub(crate) handle: Rc<H>,
    pub(crate) config: BarConfig,
    pub(crate) correlation_id: Option<i32>,
    /// Duration after the indefinite coercion rule.
    pub(crate) duration: DurationSpec,
}

/// Current and recently retired presentations.
///
/// Invariant: `current` is the only presentation that may advance the queue.
/// Retired presentations wait in `retiring` until the presenter reports their
/// dismissal, so their overlay and listener cleanup still runs exactly once.
pub(crate) struct PlaybackState<H> {
    pub(crate) current: Option<Presentation<H>>,
    retiring: Vec<Presentation<H>>,
    pub(crate) last_shown: Option<BarConfig>,
    next_token: u64,
}

impl<H> Default for PlaybackState<H> {
    fn default() -> Self {
        Self {
            current: None,
            retiring: Vec::new(),
            last_shown: None,
            next_token: 0,
        }
    }
}

impl<H> PlaybackState<H> {
    fn next_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    pub(crate) fn current_handle(&self) -> Option<Rc<H>> {
        self.current.as_ref().map(|p| Rc::clone(&p.handle))
    }

    /// Detach the current presentation so its dismissal never advances the
    /// queue. Returns the handle to dismiss.
    pub(crate) fn retire_current(&mut self) -> Option<Rc<H>> {
        let presentation = self.current.take()?;
        let handle = Rc::clone(&presentation.handle);
        self.retiring.push(presentation);
        Some(handle)
    }

    fn is_known(&self, token: u64) -> bool {
        self.current.as_ref().is_some_and(|p| p.token == token)
            || self.retiring.iter().any(|p| p.token == token)
    }

    /// Remove the presentation with `token`, reporting whether it was current.
    fn take(&mut self, token: u64) -> Option<(Presentation<H>, bool)> {
        if self.current.as_ref().is_some_and(|p| p.token == token) {
            return self.current.take().map(|p| (p, true));
        }
        let position = self.retiring.iter().position(|p| p.token == token)?;
        Some((self.retiring.remove(position), false))
    }
}

/// Callback registered on every presentation the manager creates.
struct PlaybackCallback<P: Presenter> {
    shared: Weak<Shared<P>>,
    token: u64,
    correlation_id: Option<i32>,
}

impl<P: Presenter + 'static> LifecycleCallback for PlaybackCallback<P> {
    fn on_shown(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.handle_shown(self.token, self.correlation_id);
        }
    }

    fn on_dismissed(&self, reason: DismissReason) {
        if let Some(shared) = self.shared.upgrade() {
            shared.handle_dismissed(self.token, self.correlation_id, reason);
        }
    }
}

impl<P: Presenter + 'static> Shared<P> {
    /// Play the queue entry at `index`, or return to idle when the queue is
    /// exhausted.
    pub(crate) fn play_queue(self: &Rc<Self>, index: usize) -> Result<(), BarError> {
        // Only an indefinite bar that absorbed the queue can still be current here
        let replaced = self.core.borrow_mut().playback.retire_current();
        if let Some(handle) = replaced {
            tracing::debug!("Replacing bar still on screen before playing entry {}", index);
            handle.dismiss();
        }

        let plan = {
            let mut guard = self.core.borrow_mut();
            let core = &mut *guard;
            match (core.queue.entry(index).cloned(), core.queue.resolved_duration(index)) {
                (Some(entry), Some(duration)) => {
                    core.queue.set_cursor(index);
                    let token = core.playback.next_token();
                    Some((entry, duration, token, core.style, core.views_to_move.clone()))
                }
                _ => {
                    core.queue.clear();
                    None
                }
            }
        };

        let Some((entry, duration, token, style, views_to_move)) = plan else {
            tracing::debug!("Queue exhausted at index {}, returning to idle", index);
            self.metrics.record_drain();
            self.dispatcher.borrow().emit(BarEvent::QueueDrained);
            return Ok(());
        };

        if duration != entry.duration {
            tracing::debug!("Indefinite entry {} is not last in queue, playing as short", index);
            self.metrics.record_coerced();
            self.dispatcher.borrow().emit(BarEvent::DurationCoerced { index });
        }

        let handle = match self
            .presenter
            .make(&self.parent, &entry.config, duration, &views_to_move)
        {
            Ok(handle) => Rc::new(handle),
            Err(err) => {
                tracing::warn!("Presenter failed to make bar for entry {}: {}", index, err);
                self.metrics.record_presenter_error();
                self.core.borrow_mut().queue.clear();
                return Err(err);
            }
        };

        style.apply_to(&*handle);
        handle.add_lifecycle_callback(Box::new(PlaybackCallback {
            shared: Rc::downgrade(self),
            token,
            correlation_id: entry.correlation_id,
        }));

        let absorbed = {
            let mut core = self.core.borrow_mut();
            core.playback.current = Some(Presentation {
                token,
                handle: Rc::clone(&handle),
                config: entry.config,
                correlation_id: entry.correlation_id,
                duration,
            });
            // The last indefinite entry takes the queue with it: later shows
            // start a fresh queue instead of waiting behind it.
            if duration.is_indefinite() {
                core.queue.clear();
                true
            } else {
                false
            }
        };
        if absorbed {
            tracing::debug!("Indefinite entry {} absorbed the queue", index);
            self.dispatcher.borrow().emit(BarEvent::QueueAbsorbed);
        }

        tracing::debug!("Showing queue entry {} ({:?})", index, duration);
        handle.show();
        Ok(())
    }

    fn handle_shown(&self, token: u64, correlation_id: Option<i32>) {
        let listener = {
            let mut core = self.core.borrow_mut();
            if !core.playback.is_known(token) {
                return;
            }
            let shown = core
                .playback
                .current
                .as_ref()
                .filter(|p| p.token == token)
                .map(|p| p.config.clone());
            if shown.is_some() {
                core.playback.last_shown = shown;
            }
            self.dispatcher.borrow().listener()
        };

        self.metrics.record_shown();
        self.dispatcher.borrow().emit(BarEvent::Shown { correlation_id });
        notify_shown(listener, correlation_id);
    }

    /// Play `index` after a dismissal, unless the queue was reset or another
    /// bar started since `generation` was read.
    ///
    /// Listeners run between reading the position and advancing, and may have
    /// called `dismiss_all()`, `show()` or `dismiss()` themselves.
    pub(crate) fn advance(
        self: &Rc<Self>,
        index: usize,
        generation: u64,
    ) -> Result<(), BarError> {
        let stale = {
            let core = self.core.borrow();
            core.queue.generation() != generation || core.playback.current.is_some()
        };
        if stale {
            tracing::debug!("Skipping advance to entry {}, playback moved on", index);
            return Ok(());
        }
        self.play_queue(index)
    }

    fn handle_dismissed(
        self: &Rc<Self>,
        token: u64,
        correlation_id: Option<i32>,
        reason: DismissReason,
    ) {
        let (presentation, advance_to) = {
            let mut core = self.core.borrow_mut();
            let Some((presentation, was_current)) = core.playback.take(token) else {
                return;
            };
            // Indefinite bars never advance on their own; callers use dismiss()
            let advance_to = (was_current && !presentation.duration.is_indefinite())
                .then(|| (core.queue.cursor() + 1, core.queue.generation()));
            (presentation, advance_to)
        };

        presentation.handle.remove_overlay();
        drop(presentation);

        tracing::debug!("Bar dismissed ({:?})", reason);
        self.metrics.record_dismissed();
        let listener = self.dispatcher.borrow().listener();
        self.dispatcher
            .borrow()
            .emit(BarEvent::Dismissed { correlation_id, reason });
        notify_dismissed(listener, correlation_id);

        if let Some((next, generation)) = advance_to {
            if let Err(err) = self.advance(next, generation) {
                tracing::error!("Failed to show next queued bar: {}", err);
            }
        }
    }
}
