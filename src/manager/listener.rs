// Listener dispatch
//
// A single optional DisplayListener receives show/dismiss callbacks keyed by
// correlation id. BarEvents are broadcast to any number of subscribers.

use crate::presenter::DismissReason;
use std::rc::Rc;
use tokio::sync::broadcast;

/// Receives show and dismiss notifications for requests that carry a
/// correlation id.
pub trait DisplayListener {
    fn on_shown(&self, correlation_id: i32);
    fn on_dismissed(&self, correlation_id: i32);
}

/// Events emitted as the queue and playback change.
///
/// Unlike [`DisplayListener`], events are sent for every request, with or
/// without a correlation id.
#[derive(Clone, Debug, PartialEq)]
pub enum BarEvent {
    /// A request was appended to the queue
    Enqueued {
        position: usize,
        correlation_id: Option<i32>,
    },

    /// An indefinite request was not last in the queue and plays as short
    DurationCoerced {
        index: usize,
    },

    /// The presenter reported the bar as visible
    Shown {
        correlation_id: Option<i32>,
    },

    /// The presenter reported the bar as gone
    Dismissed {
        correlation_id: Option<i32>,
        reason: DismissReason,
    },

    /// An indefinite bar started showing and took the queue with it
    QueueAbsorbed,

    /// Every queued request has been played
    QueueDrained,

    /// `dismiss_all()` threw the queue away
    QueueReset,
}

/// Listener slot plus event channel.
pub(crate) struct Dispatcher {
    listener: Option<Rc<dyn DisplayListener>>,
    event_tx: broadcast::Sender<BarEvent>,
}

impl Dispatcher {
    pub(crate) fn new() -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            listener: None,
            event_tx,
        }
    }

    pub(crate) fn set_listener(&mut self, listener: Option<Rc<dyn DisplayListener>>) {
        self.listener = listener;
    }

    /// Listener to call once no borrows are held.
    pub(crate) fn listener(&self) -> Option<Rc<dyn DisplayListener>> {
        self.listener.clone()
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<BarEvent> {
        self.event_tx.subscribe()
    }

    pub(crate) fn emit(&self, event: BarEvent) {
        // Ignore send errors - it's OK if no one is listening
        let _ = self.event_tx.send(event);
    }
}

/// Fire the show listener, skipping requests without a correlation id.
pub(crate) fn notify_shown(
    listener: Option<Rc<dyn DisplayListener>>,
    correlation_id: Option<i32>,
) {
    if let (Some(listener), Some(id)) = (listener, correlation_id) {
        listener.on_shown(id);
    }
}

/// Fire the dismiss listener, skipping requests without a correlation id.
pub(crate) fn notify_dismissed(
    listener: Option<Rc<dyn DisplayListener>>,
    correlation_id: Option<i32>,
) {
    if let (Some(listener), Some(id)) = (listener, correlation_id) {
        listener.on_dismissed(id);
    }
}
