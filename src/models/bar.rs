use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Default maximum for determinate progress bars.
pub const DEFAULT_PROGRESS_MAX: u32 = 100;

/// Visual variant of a notification bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarType {
    /// Message only, optionally with an icon and action.
    #[default]
    Normal,
    /// Horizontal progress bar with a known maximum.
    Determinate,
    /// Spinner without a known maximum.
    Indeterminate,
}

/// Icon shown at the start of a bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarIcon {
    /// Opaque resource handle resolved by the presenter.
    Resource(u32),
    /// Raw RGBA pixels.
    Bitmap(Bitmap),
}

/// RGBA8 bitmap, shared between snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Arc<[u8]>,
}

/// Action button on a bar.
#[derive(Clone)]
pub struct BarAction {
    pub label: String,
    on_click: Option<Rc<dyn Fn()>>,
}

impl BarAction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            on_click: None,
        }
    }

    /// Attach a click handler. Snapshots share the same handler.
    #[must_use]
    pub fn on_click(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(callback));
        self
    }

    /// Invoke the click handler, if any. Called by presenters.
    pub fn click(&self) {
        if let Some(callback) = &self.on_click {
            callback();
        }
    }

    pub fn has_click_handler(&self) -> bool {
        self.on_click.is_some()
    }
}

impl fmt::Debug for BarAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarAction")
            .field("label", &self.label)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

impl PartialEq for BarAction {
    fn eq(&self, other: &Self) -> bool {
        let same_callback = match (&self.on_click, &other.on_click) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.label == other.label && same_callback
    }
}

/// Configuration of a single notification bar.
///
/// This is a plain value: the item store keeps its own copy and every queue
/// entry holds an independent clone taken at enqueue time.
#[derive(Debug, Clone, PartialEq)]
pub struct BarConfig {
    pub bar_type: BarType,
    pub message: String,
    pub action: Option<BarAction>,
    pub icon: Option<BarIcon>,
    pub progress_max: u32,

    // Behaviour flags
    pub allow_user_input: bool,
    pub swipe_to_dismiss: bool,
    pub show_progress_percentage: bool,
}

impl BarConfig {
    pub fn new(bar_type: BarType, message: impl Into<String>) -> Self {
        Self {
            bar_type,
            message: message.into(),
            action: None,
            icon: None,
            progress_max: DEFAULT_PROGRESS_MAX,
            allow_user_input: false,
            swipe_to_dismiss: false,
            show_progress_percentage: false,
        }
    }

    pub fn normal(message: impl Into<String>) -> Self {
        Self::new(BarType::Normal, message)
    }

    pub fn determinate(message: impl Into<String>) -> Self {
        Self::new(BarType::Determinate, message)
    }

    pub fn indeterminate(message: impl Into<String>) -> Self {
        Self::new(BarType::Indeterminate, message)
    }

    #[must_use]
    pub fn with_action(mut self, action: BarAction) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: BarIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    #[must_use]
    pub fn with_progress_max(mut self, progress_max: u32) -> Self {
        self.progress_max = progress_max;
        self
    }

    #[must_use]
    pub fn allow_user_input(mut self, allow: bool) -> Self {
        self.allow_user_input = allow;
        self
    }

    #[must_use]
    pub fn swipe_to_dismiss(mut self, swipe: bool) -> Self {
        self.swipe_to_dismiss = swipe;
        self
    }

    #[must_use]
    pub fn show_progress_percentage(mut self, show: bool) -> Self {
        self.show_progress_percentage = show;
        self
    }

    /// Clamp a progress value into `0..=progress_max`.
    pub fn clamp_progress(&self, progress: u32) -> u32 {
        progress.min(self.progress_max)
    }
}
