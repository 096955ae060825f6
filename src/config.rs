use serde::{Deserialize, Serialize};

use crate::button::ButtonEvent;
use crate::pins::PinId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub polling: PollingConfig,
    pub extensions: Vec<String>,
    #[serde(default)]
    pub bindings: Vec<EventBinding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    pub interval_ms: u64,
    pub debounce_ms: u64,
}

/// Maps one (pad, event) pair to a shell command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventBinding {
    pub pin: PinId,
    pub event: ButtonEvent,
    pub command: String,
    pub description: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            polling: PollingConfig {
                interval_ms: 20,
                debounce_ms: 60,
            },
            extensions: vec![],
            bindings: vec![],
        }
    }
}
