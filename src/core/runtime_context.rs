use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::browser::BrowserBridge;
use crate::core::stop_signal::StopSignal;

/// Engine tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How long to wait after injecting a content script before the switch
    /// resolves. The injection completion signal does not guarantee the
    /// script has finished initializing.
    #[serde(default = "default_injection_settle_ms")]
    pub injection_settle_ms: u64,
}

fn default_injection_settle_ms() -> u64 {
    1000
}

impl EngineConfig {
    pub fn injection_settle(&self) -> Duration {
        Duration::from_millis(self.injection_settle_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            injection_settle_ms: default_injection_settle_ms(),
        }
    }
}

/// Per-run runtime context handed to block executors: the browser bridge,
/// engine configuration, and the run's stop signal.
#[derive(Clone)]
pub struct RuntimeContext {
    pub bridge: Arc<dyn BrowserBridge>,
    pub config: EngineConfig,
    pub stop: StopSignal,
}

impl RuntimeContext {
    pub fn new(bridge: Arc<dyn BrowserBridge>) -> Self {
        Self {
            bridge,
            config: EngineConfig::default(),
            stop: StopSignal::new(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_stop(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }
}
