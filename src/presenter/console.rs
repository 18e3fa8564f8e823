// Console presenter
//
// Renders bars as tracing log lines and runs their duration timers on the
// current tokio LocalSet, which plays the role of the UI thread.

use super::{DismissReason, LifecycleCallback, PresentationHandle, Presenter};
use super::parent::ViewId;
use crate::error::BarError;
use crate::models::{BarColors, BarConfig, BarType, Color, DurationSpec};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Presenter that logs every bar it shows.
///
/// `show()` spawns the auto-dismiss timer with [`tokio::task::spawn_local`],
/// so bars with a finite duration must be shown from inside a
/// [`tokio::task::LocalSet`].
#[derive(Debug, Default)]
pub struct ConsolePresenter {
    next_bar: Cell<u64>,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bars made so far.
    pub fn bars_made(&self) -> u64 {
        self.next_bar.get()
    }
}

impl Presenter for ConsolePresenter {
    type Parent = ViewId;
    type View = ViewId;
    type Handle = ConsoleBar;

    fn make(
        &self,
        parent: &ViewId,
        config: &BarConfig,
        duration: DurationSpec,
        views_to_move: &[ViewId],
    ) -> Result<ConsoleBar, BarError> {
        let bar_id = self.next_bar.get() + 1;
        self.next_bar.set(bar_id);

        tracing::debug!(
            "Made bar #{} under {:?} ({:?}, {:?}, moving {} views)",
            bar_id,
            parent,
            config.bar_type,
            duration,
            views_to_move.len()
        );

        Ok(ConsoleBar {
            inner: Rc::new(BarInner {
                bar_id,
                config: RefCell::new(config.clone()),
                duration,
                showing: Cell::new(false),
                progress: Cell::new(0),
                overlay: Cell::new(None),
                colors: Cell::new(BarColors::default()),
                callbacks: RefCell::new(Vec::new()),
            }),
        })
    }
}

/// One bar made by [`ConsolePresenter`].
#[derive(Clone)]
pub struct ConsoleBar {
    inner: Rc<BarInner>,
}

struct BarInner {
    bar_id: u64,
    config: RefCell<BarConfig>,
    duration: DurationSpec,
    showing: Cell<bool>,
    progress: Cell<u32>,
    overlay: Cell<Option<(Color, f32)>>,
    colors: Cell<BarColors>,
    callbacks: RefCell<Vec<Rc<dyn LifecycleCallback>>>,
}

impl ConsoleBar {
    pub fn bar_id(&self) -> u64 {
        self.inner.bar_id
    }

    pub fn is_showing(&self) -> bool {
        self.inner.showing.get()
    }

    pub fn progress(&self) -> u32 {
        self.inner.progress.get()
    }

    pub fn message(&self) -> String {
        self.inner.config.borrow().message.clone()
    }

    /// Simulate the user swiping the bar away. Ignored unless the bar allows it.
    pub fn swipe(&self) {
        if self.inner.config.borrow().swipe_to_dismiss {
            BarInner::dismiss_with(&self.inner, DismissReason::Swipe);
        }
    }

    /// Simulate a click on the action button.
    pub fn click_action(&self) {
        let action = self.inner.config.borrow().action.clone();
        if let Some(action) = action {
            action.click();
            BarInner::dismiss_with(&self.inner, DismissReason::Action);
        }
    }
}

impl BarInner {
    fn render(&self) -> String {
        let config = self.config.borrow();
        let mut line = format!("[bar #{}] {}", self.bar_id, config.message);
        match config.bar_type {
            BarType::Determinate if config.show_progress_percentage => {
                let percent = u64::from(self.progress.get()) * 100
                    / u64::from(config.progress_max.max(1));
                line.push_str(&format!(" {}%", percent));
            }
            BarType::Determinate => {
                line.push_str(&format!(" {}/{}", self.progress.get(), config.progress_max));
            }
            BarType::Indeterminate => line.push_str(" ..."),
            BarType::Normal => {}
        }
        if let Some(action) = &config.action {
            line.push_str(&format!(" [{}]", action.label));
        }
        line
    }

    fn callbacks(&self) -> Vec<Rc<dyn LifecycleCallback>> {
        self.callbacks.borrow().clone()
    }

    fn dismiss_with(inner: &Rc<BarInner>, reason: DismissReason) {
        if !inner.showing.replace(false) {
            return;
        }
        tracing::info!("[bar #{}] dismissed ({:?})", inner.bar_id, reason);
        for callback in inner.callbacks() {
            callback.on_dismissed(reason);
        }
    }

    fn start_timer(inner: &Rc<BarInner>) {
        let Some(duration) = inner.duration.as_duration() else {
            return;
        };
        if tokio::runtime::Handle::try_current().is_err() {
            tracing::error!(
                "[bar #{}] no tokio runtime, {:?} timer not started",
                inner.bar_id,
                inner.duration
            );
            return;
        }
        let weak: Weak<BarInner> = Rc::downgrade(inner);
        tokio::task::spawn_local(async move {
            tokio::time::sleep(duration).await;
            if let Some(inner) = weak.upgrade() {
                BarInner::dismiss_with(&inner, DismissReason::Timeout);
            }
        });
    }
}

impl PresentationHandle for ConsoleBar {
    fn show(&self) {
        if self.inner.showing.replace(true) {
            return;
        }
        tracing::info!("{}", self.inner.render());
        BarInner::start_timer(&self.inner);
        for callback in self.inner.callbacks() {
            callback.on_shown();
        }
    }

    fn dismiss(&self) {
        BarInner::dismiss_with(&self.inner, DismissReason::Manual);
    }

    fn update_content(&self, config: &BarConfig) {
        *self.inner.config.borrow_mut() = config.clone();
        if self.is_showing() {
            tracing::info!("{}", self.inner.render());
        }
    }

    fn set_progress(&self, progress: u32) {
        self.inner.progress.set(progress);
        if self.is_showing() {
            tracing::info!("{}", self.inner.render());
        }
    }

    fn set_overlay(&self, color: Color, alpha: f32) {
        self.inner.overlay.set(Some((color, alpha)));
    }

    fn set_colors(&self, colors: &BarColors) {
        self.inner.colors.set(*colors);
        tracing::trace!("[bar #{}] colours {:?}", self.inner.bar_id, colors);
    }

    fn remove_overlay(&self) {
        self.inner.overlay.set(None);
    }

    fn add_lifecycle_callback(&self, callback: Box<dyn LifecycleCallback>) {
        self.inner.callbacks.borrow_mut().push(Rc::from(callback));
    }
}
