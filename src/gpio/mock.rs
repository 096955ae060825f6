//! In-memory GPIO for tests: lines are shared booleans, claims are
//! recorded with the bias they asked for, and claiming a line twice
//! fails the way the real controller does.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use embedded_hal::digital::{ErrorType, InputPin};
use parking_lot::Mutex;

use super::{Bias, ClaimedLine, GpioError, GpioProvider};

#[derive(Default)]
struct MockState {
    levels: Mutex<HashMap<u8, Arc<AtomicBool>>>,
    claims: Mutex<Vec<(u8, Bias)>>,
}

pub struct MockGpio {
    state: Arc<MockState>,
}

impl MockGpio {
    pub fn new() -> Self {
        Self {
            state: Arc::new(MockState::default()),
        }
    }

    /// Handle for driving levels and inspecting claims after the
    /// provider itself has been handed to the runtime.
    pub fn handle(&self) -> MockHandle {
        MockHandle {
            state: self.state.clone(),
        }
    }
}

impl Default for MockGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioProvider for MockGpio {
    fn claim(&mut self, line: u8, bias: Bias) -> Result<ClaimedLine, GpioError> {
        let mut claims = self.state.claims.lock();
        if claims.iter().any(|(claimed, _)| *claimed == line) {
            return Err(GpioError::LineBusy { line });
        }
        claims.push((line, bias));

        let level = self
            .state
            .levels
            .lock()
            .entry(line)
            .or_default()
            .clone();
        Ok(ClaimedLine::new(MockLine { level }))
    }
}

#[derive(Clone)]
pub struct MockHandle {
    state: Arc<MockState>,
}

impl MockHandle {
    pub fn set_level(&self, line: u8, high: bool) {
        self.state
            .levels
            .lock()
            .entry(line)
            .or_default()
            .store(high, Ordering::Relaxed);
    }

    /// Every claim made so far, in order, with the bias it was made with.
    pub fn claims(&self) -> Vec<(u8, Bias)> {
        self.state.claims.lock().clone()
    }
}

struct MockLine {
    level: Arc<AtomicBool>,
}

impl ErrorType for MockLine {
    type Error = Infallible;
}

impl InputPin for MockLine {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.level.load(Ordering::Relaxed))
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.level.load(Ordering::Relaxed))
    }
}
