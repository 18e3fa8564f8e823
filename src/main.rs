//! snackbar-demo - scripted walkthrough of the bar queue
//!
//! # Overview
//!
//! Plays the script from `snackbar-demo.yaml` against a [`ConsolePresenter`],
//! which renders each bar as a log line. It initializes:
//! - Configuration loading ([`ConfigManager`], with `SNACKBAR__*` overrides)
//! - Logging infrastructure (file rotation + console output)
//! - A current-thread tokio runtime with a `LocalSet` acting as the UI thread
//! - A [`BarManager`] attached to a small [`ViewArena`] layout
//!
//! # Usage
//!
//! ```text
//! snackbar-demo [CONFIG_DIR]
//! ```
//!
//! `CONFIG_DIR` defaults to `snackbar-data`. A missing config file is
//! replaced by the built-in demo.

use anyhow::{Context, Result};
use snackbar_queue::manager::{BarEvent, BarManager, DisplayListener};
use snackbar_queue::presenter::{ConsolePresenter, ContainerKind, ViewArena};
use snackbar_queue::services::ScriptRunner;
use snackbar_queue::{APP_NAME, ConfigManager, VERSION};
use std::rc::Rc;
use tokio::sync::broadcast::error::RecvError;

const DEFAULT_CONFIG_DIR: &str = "snackbar-data";

/// Logs listener callbacks for correlated bars.
struct LoggingListener;

impl DisplayListener for LoggingListener {
    fn on_shown(&self, correlation_id: i32) {
        tracing::info!("Listener: bar {} shown", correlation_id);
    }

    fn on_dismissed(&self, correlation_id: i32) {
        tracing::info!("Listener: bar {} dismissed", correlation_id);
    }
}

fn main() -> Result<()> {
    let config_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_DIR.to_string());
    let config_manager = ConfigManager::new(config_dir.as_str())?;
    let demo = config_manager.load_demo_config()?;

    let _guard = snackbar_queue::logging::setup_from_settings(&demo.settings)?;
    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    tracing::info!("Config directory: {}", config_manager.config_dir());

    // Bars, timers and the script all live on this one thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;
    let local = tokio::task::LocalSet::new();

    let mut layout = ViewArena::new();
    let content = layout.add_root("content", ContainerKind::ContentRoot);
    let coordinator = layout.add_child(content, "coordinator", ContainerKind::FabAware);
    let fab = layout.add_child(coordinator, "fab", ContainerKind::Other);

    let manager = BarManager::new(ConsolePresenter::new(), &layout, &fab)?;
    let parent_name = layout.name(*manager.parent()).unwrap_or("<unknown>");
    tracing::info!("Bars attach to '{}'", parent_name);
    manager.set_views_to_move(vec![fab]);
    manager.set_on_display_listener(Some(Rc::new(LoggingListener)));

    let runner = ScriptRunner::new(manager.clone());
    runner.prepare(&demo)?;

    let mut events = manager.subscribe();
    let report = local.block_on(&runtime, async {
        tokio::task::spawn_local(async move {
            loop {
                match events.recv().await {
                    Ok(event) => log_event(&event),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Event log skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
        runner.run(&demo.script).await
    })?;

    tracing::info!(
        "Demo complete: {} steps, {} bars made",
        report.steps_run,
        manager.presenter().bars_made()
    );
    manager.metrics().log_summary();
    Ok(())
}

fn log_event(event: &BarEvent) {
    match event {
        BarEvent::DurationCoerced { index } => {
            tracing::info!("Entry {} is indefinite but not last, playing as short", index)
        }
        BarEvent::QueueAbsorbed => tracing::info!("Indefinite bar took over the queue"),
        other => tracing::debug!("Event: {:?}", other),
    }
}
