//! Engine configuration options.

use crate::config::CurveConfig;

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Curve shape. Validated when the engine is built.
    pub curve: CurveConfig,
    /// Maximum number of events to retain in memory.
    pub max_events: usize,
    /// Log every event at info instead of debug.
    pub verbose: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            curve: CurveConfig::default(),
            max_events: 100_000,
            verbose: false,
        }
    }
}

impl EngineConfig {
    pub fn with_curve(curve: CurveConfig) -> Self {
        Self {
            curve,
            ..Self::default()
        }
    }
}
