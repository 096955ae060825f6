//! Claiming input lines from the GPIO controller.
//!
//! The runtime only ever sees [`GpioProvider`]; the real implementation
//! goes through rppal, and [`mock`] provides in-memory lines for tests.

pub mod mock;

use std::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GpioError {
    #[error("gpio controller unavailable")]
    Controller(#[source] rppal::gpio::Error),
    #[error("could not claim gpio line {line}")]
    Claim {
        line: u8,
        #[source]
        source: rppal::gpio::Error,
    },
    #[error("gpio line {line} is already claimed")]
    LineBusy { line: u8 },
}

/// Input bias applied when a line is claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Floating,
    PullUp,
}

/// Hands out input lines by BCM number. A line can be claimed once;
/// claims are never released.
pub trait GpioProvider: Send {
    fn claim(&mut self, line: u8, bias: Bias) -> Result<ClaimedLine, GpioError>;
}

/// A claimed input line with the concrete backend erased.
pub struct ClaimedLine(Box<dyn InputPin<Error = Infallible> + Send>);

impl ClaimedLine {
    pub fn new(pin: impl InputPin<Error = Infallible> + Send + 'static) -> Self {
        Self(Box::new(pin))
    }
}

impl ErrorType for ClaimedLine {
    type Error = Infallible;
}

impl InputPin for ClaimedLine {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        self.0.is_high()
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.0.is_low()
    }
}

/// GPIO lines of the host SoC, via rppal.
pub struct RppalGpio {
    gpio: rppal::gpio::Gpio,
}

impl RppalGpio {
    pub fn new() -> Result<Self, GpioError> {
        let gpio = rppal::gpio::Gpio::new().map_err(GpioError::Controller)?;
        Ok(Self { gpio })
    }
}

impl GpioProvider for RppalGpio {
    fn claim(&mut self, line: u8, bias: Bias) -> Result<ClaimedLine, GpioError> {
        let pin = self
            .gpio
            .get(line)
            .map_err(|source| GpioError::Claim { line, source })?;
        let input = match bias {
            Bias::Floating => pin.into_input(),
            Bias::PullUp => pin.into_input_pullup(),
        };
        Ok(ClaimedLine::new(RppalLine { input }))
    }
}

struct RppalLine {
    input: rppal::gpio::InputPin,
}

impl ErrorType for RppalLine {
    type Error = Infallible;
}

impl InputPin for RppalLine {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.input.is_high())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.input.is_low())
    }
}
