//! Data models for the notification bar queue.
//!
//! - [`BarConfig`]: Value describing one bar (type, message, action, icon, flags)
//! - [`DurationSpec`]: Requested display time, including the indefinite coercion rule
//! - [`PendingStyle`]: Overlay and colour state shared by every bar
//! - [`DemoConfig`]: Settings, bar catalog and script loaded from `snackbar-demo.yaml`
//!
//! # Architecture Note
//!
//! `BarConfig` is cloned into every queue entry at enqueue time, so edits to a
//! stored configuration never reach requests that are already queued.

pub mod bar;
pub mod config;
pub mod duration;
pub mod style;

pub use bar::{BarAction, BarConfig, BarIcon, BarType, Bitmap, DEFAULT_PROGRESS_MAX};
pub use config::{
    BarDefinition, BarTypeSetting, DemoConfig, DemoSettings, DurationSetting, NamedDuration,
    ScriptStep, StepAction,
};
pub use duration::{DurationSpec, LONG_DURATION, SHORT_DURATION};
pub use style::{BarColors, Color, PendingStyle};
