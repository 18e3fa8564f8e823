use crate::models::{
    BarDefinition, BarTypeSetting, DemoConfig, DurationSetting, NamedDuration, ScriptStep,
};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the demo configuration inside the config directory.
pub const DEMO_CONFIG_FILE: &str = "snackbar-demo.yaml";

/// Prefix for environment overrides, e.g. `SNACKBAR__SETTINGS__DEBUG_MODE=true`.
pub const ENV_PREFIX: &str = "SNACKBAR";

/// Configuration manager for loading and saving the demo configuration.
///
/// The file is layered with environment overrides when loaded; saving writes
/// only what the caller passes in.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    demo_config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager rooted at `config_dir`, creating it if needed.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            demo_config_path: config_dir.join(DEMO_CONFIG_FILE),
            config_dir,
        })
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn demo_config_path(&self) -> &Utf8Path {
        &self.demo_config_path
    }

    /// Load the demo configuration.
    ///
    /// # Returns
    /// The loaded DemoConfig, or the built-in demo if the file doesn't exist
    pub fn load_demo_config(&self) -> Result<DemoConfig> {
        if !self.demo_config_path.exists() {
            tracing::warn!(
                "Demo config file not found at {}, using built-in demo",
                self.demo_config_path
            );
            return Ok(default_demo_config());
        }

        let layered = config::Config::builder()
            .add_source(
                config::File::new(self.demo_config_path.as_str(), config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read demo config: {}", self.demo_config_path))?;

        let demo: DemoConfig = layered
            .try_deserialize()
            .with_context(|| format!("Failed to parse demo config: {}", self.demo_config_path))?;

        tracing::info!(
            "Loaded demo config from {} ({} bars, {} steps)",
            self.demo_config_path,
            demo.bars.len(),
            demo.script.len()
        );
        Ok(demo)
    }

    /// Save the demo configuration file.
    pub fn save_demo_config(&self, demo: &DemoConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(demo).context("Failed to serialize demo config to YAML")?;

        fs::write(&self.demo_config_path, yaml_string)
            .with_context(|| format!("Failed to write demo config: {}", self.demo_config_path))?;

        tracing::info!("Saved demo config to {}", self.demo_config_path);
        Ok(())
    }

    /// Write the built-in demo if no config file exists yet.
    ///
    /// # Returns
    /// `true` if a file was written
    pub fn ensure_demo_config(&self) -> Result<bool> {
        if self.demo_config_path.exists() {
            return Ok(false);
        }
        self.save_demo_config(&default_demo_config())?;
        Ok(true)
    }
}

/// Store ids used by the built-in demo.
pub mod demo_ids {
    pub const SAVED: u32 = 1;
    pub const UNDO: u32 = 2;
    pub const UPLOAD: u32 = 3;
    pub const UPLOAD_DONE: u32 = 4;
    pub const OFFLINE: u32 = 5;
}

/// Built-in demo: a couple of quick bars, a determinate upload that absorbs
/// the queue, then an indefinite bar cleared by `dismiss_all`.
pub fn default_demo_config() -> DemoConfig {
    use demo_ids::*;

    let bars = vec![
        BarDefinition {
            id: SAVED,
            message: "Draft saved".to_string(),
            ..BarDefinition::default()
        },
        BarDefinition {
            id: UNDO,
            message: "Message archived".to_string(),
            action: Some("Undo".to_string()),
            swipe_to_dismiss: true,
            ..BarDefinition::default()
        },
        BarDefinition {
            id: UPLOAD,
            bar_type: BarTypeSetting::Determinate,
            message: "Uploading photos".to_string(),
            show_progress_percentage: true,
            ..BarDefinition::default()
        },
        BarDefinition {
            id: UPLOAD_DONE,
            message: "Upload complete".to_string(),
            ..BarDefinition::default()
        },
        BarDefinition {
            id: OFFLINE,
            bar_type: BarTypeSetting::Indeterminate,
            message: "Waiting for network".to_string(),
            ..BarDefinition::default()
        },
    ];

    let short = DurationSetting::Named(NamedDuration::Short);
    let indefinite = DurationSetting::Named(NamedDuration::Indefinite);
    let script = vec![
        ScriptStep::show(SAVED, short, None),
        ScriptStep::show(UNDO, DurationSetting::Named(NamedDuration::Long), Some(1)),
        ScriptStep::wait(4_500),
        ScriptStep::show(UPLOAD, indefinite, Some(2)),
        ScriptStep::progress(25),
        ScriptStep::wait(500),
        ScriptStep::progress(75),
        ScriptStep::wait(500),
        ScriptStep::update(UPLOAD_DONE),
        ScriptStep::wait(500),
        ScriptStep::dismiss(),
        ScriptStep::show(OFFLINE, indefinite, Some(3)),
        ScriptStep::wait(1_000),
        ScriptStep::dismiss_all(),
        ScriptStep::wait(200),
    ];

    DemoConfig {
        bars,
        script,
        ..DemoConfig::default()
    }
}
