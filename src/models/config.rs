use super::bar::{BarAction, BarConfig, BarIcon, BarType, DEFAULT_PROGRESS_MAX};
use super::duration::DurationSpec;
use super::style::PendingStyle;
use serde::{Deserialize, Serialize};

/// Demo configuration from `snackbar-demo.yaml`.
///
/// Holds logging settings, the initial style, a catalog of bar definitions
/// registered in the item store, and a script of steps to play.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub settings: DemoSettings,
    pub style: PendingStyle,
    /// Bars registered in the item store before the script runs.
    pub bars: Vec<BarDefinition>,
    pub script: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub log_dir: String,
    pub log_prefix: String,
    pub debug_mode: bool,
    pub console_output: bool,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            log_prefix: "snackbar-demo".to_string(),
            debug_mode: false,
            console_output: true,
        }
    }
}

/// Serialized form of [`BarType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarTypeSetting {
    #[default]
    Normal,
    Determinate,
    Indeterminate,
}

impl From<BarTypeSetting> for BarType {
    fn from(setting: BarTypeSetting) -> Self {
        match setting {
            BarTypeSetting::Normal => BarType::Normal,
            BarTypeSetting::Determinate => BarType::Determinate,
            BarTypeSetting::Indeterminate => BarType::Indeterminate,
        }
    }
}

/// A bar as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarDefinition {
    /// Item store id.
    pub id: u32,
    #[serde(rename = "type")]
    pub bar_type: BarTypeSetting,
    pub message: String,
    pub action: Option<String>,
    pub icon_resource: Option<u32>,
    pub progress_max: u32,
    pub allow_user_input: bool,
    pub swipe_to_dismiss: bool,
    pub show_progress_percentage: bool,
}

impl Default for BarDefinition {
    fn default() -> Self {
        Self {
            id: 0,
            bar_type: BarTypeSetting::Normal,
            message: String::new(),
            action: None,
            icon_resource: None,
            progress_max: DEFAULT_PROGRESS_MAX,
            allow_user_input: false,
            swipe_to_dismiss: false,
            show_progress_percentage: false,
        }
    }
}

impl BarDefinition {
    /// Build the runtime configuration. Actions from files carry no click handler.
    pub fn to_config(&self) -> BarConfig {
        let mut config = BarConfig::new(self.bar_type.into(), self.message.clone())
            .with_progress_max(self.progress_max)
            .allow_user_input(self.allow_user_input)
            .swipe_to_dismiss(self.swipe_to_dismiss)
            .show_progress_percentage(self.show_progress_percentage);
        if let Some(label) = &self.action {
            config = config.with_action(BarAction::new(label.clone()));
        }
        if let Some(resource) = self.icon_resource {
            config = config.with_icon(BarIcon::Resource(resource));
        }
        config
    }
}

/// Named durations accepted in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedDuration {
    Short,
    Long,
    Indefinite,
}

/// `short`, `long`, `indefinite`, or a millisecond count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationSetting {
    Named(NamedDuration),
    Millis(u64),
}

impl Default for DurationSetting {
    fn default() -> Self {
        DurationSetting::Named(NamedDuration::Short)
    }
}

impl From<DurationSetting> for DurationSpec {
    fn from(setting: DurationSetting) -> Self {
        match setting {
            DurationSetting::Named(NamedDuration::Short) => DurationSpec::Short,
            DurationSetting::Named(NamedDuration::Long) => DurationSpec::Long,
            DurationSetting::Named(NamedDuration::Indefinite) => DurationSpec::Indefinite,
            // A zero count is not a valid explicit duration
            DurationSetting::Millis(0) => DurationSpec::Short,
            DurationSetting::Millis(ms) => DurationSpec::Millis(ms),
        }
    }
}

/// What a script step does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    #[default]
    Show,
    Wait,
    Progress,
    Update,
    Dismiss,
    DismissAll,
}

/// One step of a demo script. Fields not used by `action` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptStep {
    pub action: StepAction,
    pub bar: Option<u32>,
    pub duration: DurationSetting,
    pub correlation_id: Option<i32>,
    pub wait_ms: u64,
    pub progress: u32,
}

impl ScriptStep {
    pub fn show(bar: u32, duration: DurationSetting, correlation_id: Option<i32>) -> Self {
        Self {
            action: StepAction::Show,
            bar: Some(bar),
            duration,
            correlation_id,
            ..Self::default()
        }
    }

    pub fn wait(wait_ms: u64) -> Self {
        Self {
            action: StepAction::Wait,
            wait_ms,
            ..Self::default()
        }
    }

    pub fn progress(progress: u32) -> Self {
        Self {
            action: StepAction::Progress,
            progress,
            ..Self::default()
        }
    }

    pub fn update(bar: u32) -> Self {
        Self {
            action: StepAction::Update,
            bar: Some(bar),
            ..Self::default()
        }
    }

    pub fn dismiss() -> Self {
        Self {
            action: StepAction::Dismiss,
            ..Self::default()
        }
    }

    pub fn dismiss_all() -> Self {
        Self {
            action: StepAction::DismissAll,
            ..Self::default()
        }
    }
}
