//! Services module - drivers that sit on top of the bar manager.
//!
//! # Components
//!
//! - [`ScriptRunner`]: Registers the bars from a [`DemoConfig`](crate::models::DemoConfig)
//!   and plays its script of show / wait / progress / dismiss steps against a
//!   [`BarManager`](crate::manager::BarManager).
//!
//! Like the manager itself, the runner is single-threaded. Drive it inside a
//! `tokio::task::LocalSet` together with the presenter so duration timers can
//! fire while a script step is waiting.
//!
//! # Usage Example
//!
//! ```ignore
//! let runner = ScriptRunner::new(manager.clone());
//! runner.prepare(&demo)?;
//! let report = local.run_until(runner.run(&demo.script)).await?;
//! ```

pub mod script;

pub use script::{ScriptError, ScriptReport, ScriptRunner};
