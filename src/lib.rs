// snackbar-queue - Display queue for transient notification bars
//
// This is the library crate containing the queue, the presenter contract and
// the demo configuration. The binary crate (main.rs) runs a scripted demo
// against the console presenter.

pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod metrics;
pub mod models;
pub mod presenter;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use error::BarError;
pub use manager::{BarEvent, BarManager, BarSource, DisplayListener};
pub use metrics::Metrics;
pub use models::{BarAction, BarConfig, BarIcon, BarType, Color, DurationSpec, PendingStyle};
pub use presenter::{DismissReason, LifecycleCallback, PresentationHandle, Presenter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
