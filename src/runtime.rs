//! Process-wide button registry.
//!
//! Installed once at startup with a GPIO provider; from then on it owns
//! every button the extension initializers mount, for the rest of the
//! process lifetime. Buttons are never released or unmounted.

use std::sync::OnceLock;
use std::time::Instant;

use log::{error, info};
use parking_lot::Mutex;
use thiserror::Error;

use crate::button::{Active, Button, Event, EventClass};
use crate::gpio::{Bias, ClaimedLine, GpioProvider};
use crate::pins::PinId;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("button runtime is already installed")]
    AlreadyInstalled,
}

#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval_ms: u64,
    pub debounce_ms: u64,
}

impl PollSettings {
    /// Debounce window expressed in poll samples, never less than one.
    fn debounce_samples(&self) -> u8 {
        (self.debounce_ms / self.interval_ms.max(1)).clamp(1, u8::MAX as u64) as u8
    }
}

/// Snapshot row describing one mounted button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountInfo {
    pub pin: PinId,
    pub line: u8,
    pub class: EventClass,
    pub active: Active,
}

struct Registry {
    provider: Box<dyn GpioProvider>,
    settings: PollSettings,
    buttons: Vec<Button<ClaimedLine>>,
}

static REGISTRY: OnceLock<Mutex<Registry>> = OnceLock::new();

/// Install the registry. Exactly once per process, before any extension
/// initializer runs.
pub fn install(provider: Box<dyn GpioProvider>, settings: PollSettings) -> Result<(), RuntimeError> {
    REGISTRY
        .set(Mutex::new(Registry {
            provider,
            settings,
            buttons: Vec::new(),
        }))
        .map_err(|_| RuntimeError::AlreadyInstalled)
}

/// Claim `pin`'s line and mount a button on it. Ownership of the button
/// stays with the registry and the caller gets nothing back, errors
/// included; claim failures are logged and the remaining pins keep
/// working.
pub fn mount(pin: PinId, class: EventClass, active: Active) {
    let Some(cell) = REGISTRY.get() else {
        error!("cannot mount {pin}: button runtime is not installed");
        return;
    };
    let mut registry = cell.lock();
    let samples = registry.settings.debounce_samples();

    // Lines are claimed floating, never pulled up: the harness misreads
    // pads with the SoC pull-up enabled, and the add-on boards carry
    // their own bias resistors anyway.
    // TODO: go back to Bias::PullUp once the harness fault is fixed.
    match registry.provider.claim(pin.line(), Bias::Floating) {
        Ok(line) => {
            info!("mounted button on {pin} (line {})", pin.line());
            registry
                .buttons
                .push(Button::new(line, pin, class, active, samples));
        }
        Err(e) => error!("failed to mount button on {pin}: {e}"),
    }
}

/// Poll every mounted button once, in mount order, and collect the
/// events this turn produced.
pub fn poll_all(now: Instant) -> Vec<Event> {
    let Some(cell) = REGISTRY.get() else {
        return Vec::new();
    };
    let mut registry = cell.lock();
    let mut out = Vec::new();
    for button in &mut registry.buttons {
        button.poll(now, &mut out);
    }
    out
}

/// What is mounted right now, in mount order.
pub fn mounted() -> Vec<MountInfo> {
    let Some(cell) = REGISTRY.get() else {
        return Vec::new();
    };
    cell.lock()
        .buttons
        .iter()
        .map(|b| MountInfo {
            pin: b.source(),
            line: b.source().line(),
            class: b.class(),
            active: b.active(),
        })
        .collect()
}

/// Debounced pressed state of a mounted pad, `None` if nothing is
/// mounted there.
pub fn is_pressed(pin: PinId) -> Option<bool> {
    let cell = REGISTRY.get()?;
    cell.lock()
        .buttons
        .iter()
        .find(|b| b.source() == pin)
        .map(|b| b.is_pressed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounce_window_rounds_down_to_samples() {
        let settings = PollSettings {
            interval_ms: 20,
            debounce_ms: 60,
        };
        assert_eq!(settings.debounce_samples(), 3);
    }

    #[test]
    fn debounce_window_is_at_least_one_sample() {
        let settings = PollSettings {
            interval_ms: 100,
            debounce_ms: 50,
        };
        assert_eq!(settings.debounce_samples(), 1);
    }
}
