//! Job configuration: where daily files live and what to read from them.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::info;

use crate::error::{StressError, StressResult};

/// Default location of the daily soil-moisture files.
pub const DEFAULT_DATA_TEMPLATE: &str =
    "/home/dev/data/soil_moisture/v1.2.0/daily/{year}/{month}/sm{year}_{month}_{day}.v1.2.0.nc";

/// Default soil-moisture variable.
pub const DEFAULT_VARIABLE: &str = "fsmc_c4grass";

/// Environment variable overriding `data_template`.
pub const DATA_TEMPLATE_ENV: &str = "STRESS_DATA_TEMPLATE";

/// Settings of the water-stress job.
#[derive(Debug, Clone, PartialEq)]
pub struct StressConfig {
    /// Path of a day's file with `{year}`, `{month}` and `{day}` placeholders.
    pub data_template: String,
    pub variable_name: String,
    /// First day processed when neither the command line nor `status.json`
    /// gives one.
    pub default_start_date: NaiveDate,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            data_template: DEFAULT_DATA_TEMPLATE.to_string(),
            variable_name: DEFAULT_VARIABLE.to_string(),
            default_start_date: NaiveDate::from_ymd_opt(1983, 1, 1).unwrap_or_default(),
        }
    }
}

/// On-disk YAML shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
struct YamlStressConfig {
    #[serde(default)]
    data_template: Option<String>,
    #[serde(default)]
    variable_name: Option<String>,
    #[serde(default)]
    default_start_date: Option<NaiveDate>,
}

impl StressConfig {
    /// Parse YAML, filling missing keys with defaults.
    pub fn from_yaml(contents: &str) -> StressResult<Self> {
        let yaml: YamlStressConfig = if contents.trim().is_empty() {
            YamlStressConfig::default()
        } else {
            serde_yaml::from_str(contents)?
        };
        let defaults = Self::default();
        let config = Self {
            data_template: yaml.data_template.unwrap_or(defaults.data_template),
            variable_name: yaml.variable_name.unwrap_or(defaults.variable_name),
            default_start_date: yaml.default_start_date.unwrap_or(defaults.default_start_date),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from an optional YAML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> StressResult<Self> {
        let config = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                info!(path = %path.display(), "Loaded water stress config");
                Self::from_yaml(&contents)?
            }
            None => Self::default(),
        };
        config.override_template(std::env::var(DATA_TEMPLATE_ENV).ok())
    }

    /// Replace `data_template` when an override is given, then revalidate.
    fn override_template(mut self, template: Option<String>) -> StressResult<Self> {
        if let Some(template) = template {
            info!(template = %template, "Data template overridden by {}", DATA_TEMPLATE_ENV);
            self.data_template = template;
            self.validate()?;
        }
        Ok(self)
    }

    fn validate(&self) -> StressResult<()> {
        if !self.data_template.contains("{year}") {
            return Err(StressError::InvalidConfig(format!(
                "data_template must contain {{year}}: {}",
                self.data_template
            )));
        }
        if self.variable_name.is_empty() {
            return Err(StressError::InvalidConfig("variable_name is empty".to_string()));
        }
        Ok(())
    }

    /// Path of the file holding `date`.
    pub fn data_path(&self, date: NaiveDate) -> PathBuf {
        render_template(&self.data_template, date)
    }
}

/// Substitute `{year}`, `{month}` and `{day}` (zero padded) in a path template.
pub fn render_template(template: &str, date: NaiveDate) -> PathBuf {
    PathBuf::from(
        template
            .replace("{year}", &format!("{:04}", date.year()))
            .replace("{month}", &format!("{:02}", date.month()))
            .replace("{day}", &format!("{:02}", date.day())),
    )
}
