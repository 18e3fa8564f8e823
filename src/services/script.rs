use crate::error::BarError;
use crate::manager::BarManager;
use crate::models::{DemoConfig, ScriptStep, StepAction};
use crate::presenter::Presenter;
use std::time::Duration;
use thiserror::Error;

/// Errors that stop a script
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Step {step}: {action:?} needs a bar id")]
    MissingBar { step: usize, action: StepAction },

    #[error("Step {step}: {source}")]
    Bar {
        step: usize,
        #[source]
        source: BarError,
    },

    #[error("Bar definition rejected: {0}")]
    Definition(#[source] BarError),
}

/// Summary of a finished script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub steps_run: usize,
    /// Positions returned by each show step, in order.
    pub positions: Vec<usize>,
}

/// Plays [`ScriptStep`]s against a [`BarManager`].
///
/// Waits use `tokio::time::sleep`, so the runner must be driven on the same
/// `LocalSet` as the presenter's timers for bars to advance while it waits.
pub struct ScriptRunner<P: Presenter + 'static> {
    manager: BarManager<P>,
}

impl<P: Presenter + 'static> ScriptRunner<P> {
    pub fn new(manager: BarManager<P>) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &BarManager<P> {
        &self.manager
    }

    /// Register the demo's bar definitions and apply its style.
    pub fn prepare(&self, demo: &DemoConfig) -> Result<(), ScriptError> {
        for definition in &demo.bars {
            self.manager
                .put(definition.to_config(), definition.id)
                .map_err(ScriptError::Definition)?;
        }
        self.manager.set_style(demo.style);
        tracing::info!("Registered {} bar definitions", demo.bars.len());
        Ok(())
    }

    /// Run every step in order, stopping at the first failure.
    pub async fn run(&self, steps: &[ScriptStep]) -> Result<ScriptReport, ScriptError> {
        let mut report = ScriptReport::default();

        for (step, entry) in steps.iter().enumerate() {
            tracing::debug!("Script step {}: {:?}", step, entry.action);
            let bar_err = |source| ScriptError::Bar { step, source };

            match entry.action {
                StepAction::Show => {
                    let id = Self::bar_id(step, entry)?;
                    let position = self
                        .manager
                        .show(id, entry.duration.into(), entry.correlation_id)
                        .map_err(bar_err)?;
                    report.positions.push(position);
                }
                StepAction::Wait => {
                    tokio::time::sleep(Duration::from_millis(entry.wait_ms)).await;
                }
                StepAction::Progress => self.manager.set_progress(entry.progress),
                StepAction::Update => {
                    let id = Self::bar_id(step, entry)?;
                    self.manager.update_to(id).map_err(bar_err)?;
                }
                StepAction::Dismiss => self.manager.dismiss().map_err(bar_err)?,
                StepAction::DismissAll => self.manager.dismiss_all(),
            }
            report.steps_run += 1;
        }

        tracing::info!(
            "Script finished: {} steps, {} bars queued",
            report.steps_run,
            report.positions.len()
        );
        Ok(report)
    }

    fn bar_id(step: usize, entry: &ScriptStep) -> Result<u32, ScriptError> {
        entry.bar.ok_or(ScriptError::MissingBar {
            step,
            action: entry.action,
        })
    }
}
