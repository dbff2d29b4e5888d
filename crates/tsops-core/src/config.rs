//! Engine configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sequence key used by pipeline steps that do not name one.
    pub default_key: Option<String>,

    /// Largest `sma` window the planner accepts.
    pub max_window: usize,

    /// Output field written by `elapsed`.
    pub elapsed_field: String,

    /// Emit one trace event per record per stage (needs the `tracing` feature).
    pub trace_records: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_key: None,
            max_window: 1 << 20,
            elapsed_field: "elapsed".to_string(),
            trace_records: false,
        }
    }
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `TSOPS_DEFAULT_KEY`: sequence key for steps that omit `key`
    /// - `TSOPS_MAX_WINDOW`: largest accepted `sma` window
    /// - `TSOPS_ELAPSED_FIELD`: output field for `elapsed`
    /// - `TSOPS_TRACE_RECORDS`: `1`/`true` to trace every record
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("TSOPS_DEFAULT_KEY") {
            if !s.is_empty() {
                cfg.default_key = Some(s);
            }
        }

        if let Ok(s) = std::env::var("TSOPS_MAX_WINDOW") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_window = v;
            }
        }

        if let Ok(s) = std::env::var("TSOPS_ELAPSED_FIELD") {
            if !s.is_empty() {
                cfg.elapsed_field = s;
            }
        }

        if let Ok(s) = std::env::var("TSOPS_TRACE_RECORDS") {
            cfg.trace_records = matches!(s.as_str(), "1" | "true" | "TRUE" | "yes");
        }

        cfg
    }

    /// Overlay values set in `other` (a pipeline's `config:` block) on top of `self`.
    pub fn merged(mut self, other: &PipelineOverrides) -> Self {
        if let Some(key) = &other.default_key {
            self.default_key = Some(key.clone());
        }
        if let Some(n) = other.max_window {
            self.max_window = n;
        }
        if let Some(field) = &other.elapsed_field {
            self.elapsed_field = field.clone();
        }
        self
    }
}

/// Per-pipeline overrides; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOverrides {
    pub default_key: Option<String>,
    pub max_window: Option<usize>,
    pub elapsed_field: Option<String>,
}
