use crate::cli::Args;
use crate::error::RampError;
use crate::hooks::RunHooks;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub latency_ms: u64,
    #[serde(default)]
    pub close_on_exit: bool,
}

/// Defaults read from a TOML file. Command line flags win over these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RampConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub hooks: RunHooks,
}

impl RampConfig {
    pub fn load(path: &str) -> Result<Self, RampError> {
        let contents: String = fs::read_to_string(Path::new(path)).map_err(|e| RampError::Config {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| RampError::Config {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    /// Loads the file named by `--config`, if any, and applies the flags on top.
    pub fn from_args(args: &Args) -> Result<Self, RampError> {
        let base: Self = match args.config.as_deref() {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.merged_with(args))
    }

    pub fn merged_with(mut self, args: &Args) -> Self {
        if let Some(latency_ms) = args.latency_ms {
            self.output.latency_ms = latency_ms;
        }
        if args.device.is_some() {
            self.output.device = args.device.clone();
        }
        self.output.close_on_exit |= args.close_on_exit;
        if args.pre_run.is_some() {
            self.hooks.pre_run = args.pre_run.clone();
        }
        if args.post_run.is_some() {
            self.hooks.post_run = args.post_run.clone();
        }
        self
    }
}
