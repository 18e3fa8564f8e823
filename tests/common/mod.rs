//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use snackbar_queue::models::{BarColors, BarConfig, Color, DurationSpec};
use snackbar_queue::{
    BarError, BarManager, DismissReason, DisplayListener, LifecycleCallback, PresentationHandle,
    Presenter,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Presenter whose handles record every call and only report lifecycle
/// changes when a test tells them to.
///
/// With `sync_dismiss` set, `dismiss()` reports the dismissal immediately
/// from inside the call, like a presenter without an exit animation.
#[derive(Default)]
pub struct RecordingPresenter {
    handles: RefCell<Vec<RecordingHandle>>,
    sync_dismiss: Cell<bool>,
    fail_next_make: Cell<bool>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sync_dismiss() -> Self {
        let presenter = Self::default();
        presenter.sync_dismiss.set(true);
        presenter
    }

    pub fn fail_next_make(&self) {
        self.fail_next_make.set(true);
    }

    pub fn made(&self) -> usize {
        self.handles.borrow().len()
    }

    pub fn handle(&self, index: usize) -> RecordingHandle {
        self.handles.borrow()[index].clone()
    }

    pub fn last(&self) -> RecordingHandle {
        self.handles
            .borrow()
            .last()
            .cloned()
            .expect("no handle made yet")
    }

    /// Messages of every bar made, in make order.
    pub fn messages(&self) -> Vec<String> {
        self.handles.borrow().iter().map(|h| h.message()).collect()
    }

    /// Handles that are on screen right now.
    pub fn visible(&self) -> Vec<RecordingHandle> {
        self.handles
            .borrow()
            .iter()
            .filter(|h| h.is_showing())
            .cloned()
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    type Parent = ();
    type View = String;
    type Handle = RecordingHandle;

    fn make(
        &self,
        _parent: &(),
        config: &BarConfig,
        duration: DurationSpec,
        views_to_move: &[String],
    ) -> Result<RecordingHandle, BarError> {
        if self.fail_next_make.replace(false) {
            return Err(BarError::Presenter("make failed".to_string()));
        }
        let handle = RecordingHandle {
            inner: Rc::new(HandleInner {
                config: RefCell::new(config.clone()),
                duration,
                views_to_move: views_to_move.to_vec(),
                sync_dismiss: self.sync_dismiss.get(),
                calls: RefCell::new(Vec::new()),
                showing: Cell::new(false),
                progress: Cell::new(None),
                overlay: Cell::new(None),
                colors: Cell::new(None),
                callbacks: RefCell::new(Vec::new()),
            }),
        };
        self.handles.borrow_mut().push(handle.clone());
        Ok(handle)
    }
}

#[derive(Clone)]
pub struct RecordingHandle {
    inner: Rc<HandleInner>,
}

struct HandleInner {
    config: RefCell<BarConfig>,
    duration: DurationSpec,
    views_to_move: Vec<String>,
    sync_dismiss: bool,
    calls: RefCell<Vec<String>>,
    showing: Cell<bool>,
    progress: Cell<Option<u32>>,
    overlay: Cell<Option<(Color, f32)>>,
    colors: Cell<Option<BarColors>>,
    callbacks: RefCell<Vec<Rc<dyn LifecycleCallback>>>,
}

impl RecordingHandle {
    pub fn message(&self) -> String {
        self.inner.config.borrow().message.clone()
    }

    pub fn duration(&self) -> DurationSpec {
        self.inner.duration
    }

    pub fn views_to_move(&self) -> Vec<String> {
        self.inner.views_to_move.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.calls.borrow().clone()
    }

    pub fn is_showing(&self) -> bool {
        self.inner.showing.get()
    }

    pub fn progress(&self) -> Option<u32> {
        self.inner.progress.get()
    }

    pub fn overlay(&self) -> Option<(Color, f32)> {
        self.inner.overlay.get()
    }

    pub fn colors(&self) -> Option<BarColors> {
        self.inner.colors.get()
    }

    /// Report the end of the show animation.
    pub fn fire_shown(&self) {
        for callback in self.callbacks() {
            callback.on_shown();
        }
    }

    /// Report the bar as gone, e.g. its timer ran out.
    pub fn fire_dismissed(&self, reason: DismissReason) {
        self.inner.showing.set(false);
        for callback in self.callbacks() {
            callback.on_dismissed(reason);
        }
    }

    fn callbacks(&self) -> Vec<Rc<dyn LifecycleCallback>> {
        self.inner.callbacks.borrow().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.inner.calls.borrow_mut().push(call.into());
    }
}

impl PresentationHandle for RecordingHandle {
    fn show(&self) {
        self.record("show");
        self.inner.showing.set(true);
    }

    fn dismiss(&self) {
        self.record("dismiss");
        if self.inner.sync_dismiss {
            self.fire_dismissed(DismissReason::Manual);
        }
    }

    fn update_content(&self, config: &BarConfig) {
        self.record(format!("update {}", config.message));
        *self.inner.config.borrow_mut() = config.clone();
    }

    fn set_progress(&self, progress: u32) {
        self.record(format!("progress {}", progress));
        self.inner.progress.set(Some(progress));
    }

    fn set_overlay(&self, color: Color, alpha: f32) {
        self.record("overlay");
        self.inner.overlay.set(Some((color, alpha)));
    }

    fn set_colors(&self, colors: &BarColors) {
        self.record("colors");
        self.inner.colors.set(Some(*colors));
    }

    fn remove_overlay(&self) {
        self.record("remove_overlay");
        self.inner.overlay.set(None);
    }

    fn add_lifecycle_callback(&self, callback: Box<dyn LifecycleCallback>) {
        self.record("callback");
        self.inner.callbacks.borrow_mut().push(Rc::from(callback));
    }
}

/// Listener that records `shown N` / `dismissed N` lines.
#[derive(Default)]
pub struct RecordingListener {
    pub events: RefCell<Vec<String>>,
}

impl RecordingListener {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

impl DisplayListener for RecordingListener {
    fn on_shown(&self, correlation_id: i32) {
        self.events.borrow_mut().push(format!("shown {}", correlation_id));
    }

    fn on_dismissed(&self, correlation_id: i32) {
        self.events.borrow_mut().push(format!("dismissed {}", correlation_id));
    }
}

pub fn manager() -> BarManager<RecordingPresenter> {
    BarManager::with_parent(RecordingPresenter::new(), ())
}

pub fn sync_manager() -> BarManager<RecordingPresenter> {
    BarManager::with_parent(RecordingPresenter::with_sync_dismiss(), ())
}

/// Attach a fresh recording listener.
pub fn listen(manager: &BarManager<RecordingPresenter>) -> Rc<RecordingListener> {
    let listener = Rc::new(RecordingListener::default());
    manager.set_on_display_listener(Some(listener.clone()));
    listener
}
