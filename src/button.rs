// Debouncer adapted from Kenneth Kuhn's integrator debounce:
// http://www.kennethkuhn.com/electronics/debounce.c

use std::time::{Duration, Instant};

use embedded_hal::digital::InputPin;
use serde::{Deserialize, Serialize};

use crate::pins::PinId;

/// Held this long or more, a release reports a long click instead of a click.
pub const LONG_CLICK_TIME: Duration = Duration::from_millis(1000);
/// Held this long, a hold event fires (once per press).
pub const HOLD_TIME: Duration = Duration::from_millis(1500);

/// Which line level counts as pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Active {
    Low,
    High,
}

/// Which events a button reports: `Simple` is press/release edges only,
/// `All` adds click, long click and hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClass {
    Simple,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonEvent {
    Down,
    Up,
    Click,
    LongClick,
    Hold,
}

impl ButtonEvent {
    pub const fn name(self) -> &'static str {
        match self {
            ButtonEvent::Down => "down",
            ButtonEvent::Up => "up",
            ButtonEvent::Click => "click",
            ButtonEvent::LongClick => "long-click",
            ButtonEvent::Hold => "hold",
        }
    }
}

impl std::fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An event with the pad it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub source: PinId,
    pub kind: ButtonEvent,
}

/// Integrator debounce over a raw input line. The integrator walks up
/// while the line reads active and down while it reads inactive; the
/// debounced output only flips at the rails, so glitches shorter than
/// `max` samples never get through.
pub struct Debouncer<P> {
    pin: P,
    active: Active,
    integrator: u8,
    max: u8,
    output: bool,
}

impl<P: InputPin> Debouncer<P> {
    pub fn new(pin: P, active: Active, max_samples: u8) -> Self {
        Self {
            pin,
            active,
            integrator: 0,
            max: max_samples.max(1),
            output: false,
        }
    }

    pub fn sample(&mut self) {
        let active_now = match self.active {
            Active::High => matches!(self.pin.is_high(), Ok(true)),
            Active::Low => matches!(self.pin.is_low(), Ok(true)),
        };

        if active_now {
            if self.integrator < self.max {
                self.integrator += 1;
            }
        } else {
            self.integrator = self.integrator.saturating_sub(1);
        }

        if self.integrator == 0 {
            self.output = false;
        } else if self.integrator >= self.max {
            self.output = true;
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.output
    }
}

#[derive(Clone, Copy)]
enum PressPhase {
    Released,
    Pressed { since: Instant, hold_fired: bool },
}

/// One physical button: a debounced line, the pad it is bound to and the
/// event class it was mounted with. Polling drives the press/release
/// machine and appends any events to `out`.
pub struct Button<P> {
    debouncer: Debouncer<P>,
    source: PinId,
    class: EventClass,
    phase: PressPhase,
}

impl<P: InputPin> Button<P> {
    pub fn new(pin: P, source: PinId, class: EventClass, active: Active, debounce_samples: u8) -> Self {
        Self {
            debouncer: Debouncer::new(pin, active, debounce_samples),
            source,
            class,
            phase: PressPhase::Released,
        }
    }

    pub fn source(&self) -> PinId {
        self.source
    }

    pub fn class(&self) -> EventClass {
        self.class
    }

    pub fn active(&self) -> Active {
        self.debouncer.active
    }

    pub fn is_pressed(&self) -> bool {
        self.debouncer.is_pressed()
    }

    pub fn poll(&mut self, now: Instant, out: &mut Vec<Event>) {
        self.debouncer.sample();
        let pressed = self.debouncer.is_pressed();

        match self.phase {
            PressPhase::Released => {
                if pressed {
                    self.emit(ButtonEvent::Down, out);
                    self.phase = PressPhase::Pressed {
                        since: now,
                        hold_fired: false,
                    };
                }
            }
            PressPhase::Pressed { since, hold_fired } => {
                if pressed {
                    if !hold_fired && self.class == EventClass::All && now - since >= HOLD_TIME {
                        self.emit(ButtonEvent::Hold, out);
                        self.phase = PressPhase::Pressed {
                            since,
                            hold_fired: true,
                        };
                    }
                } else {
                    self.emit(ButtonEvent::Up, out);
                    if self.class == EventClass::All {
                        if now - since >= LONG_CLICK_TIME {
                            self.emit(ButtonEvent::LongClick, out);
                        } else {
                            self.emit(ButtonEvent::Click, out);
                        }
                    }
                    self.phase = PressPhase::Released;
                }
            }
        }
    }

    fn emit(&self, kind: ButtonEvent, out: &mut Vec<Event>) {
        out.push(Event {
            source: self.source,
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::convert::Infallible;
    use std::rc::Rc;

    struct FakePin(Rc<Cell<bool>>);

    impl embedded_hal::digital::ErrorType for FakePin {
        type Error = Infallible;
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.0.get())
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.0.get())
        }
    }

    fn button(class: EventClass, samples: u8) -> (Rc<Cell<bool>>, Button<FakePin>) {
        let level = Rc::new(Cell::new(false));
        let pin = FakePin(level.clone());
        (level, Button::new(pin, PinId::P12, class, Active::High, samples))
    }

    fn kinds(events: &[Event]) -> Vec<ButtonEvent> {
        events.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn short_press_reports_down_up_click() {
        let (level, mut btn) = button(EventClass::All, 1);
        let t0 = Instant::now();
        let mut out = Vec::new();

        btn.poll(t0, &mut out);
        assert!(out.is_empty());

        level.set(true);
        btn.poll(t0, &mut out);
        level.set(false);
        btn.poll(t0 + Duration::from_millis(200), &mut out);

        assert_eq!(
            kinds(&out),
            [ButtonEvent::Down, ButtonEvent::Up, ButtonEvent::Click]
        );
        assert!(out.iter().all(|e| e.source == PinId::P12));
    }

    #[test]
    fn long_press_reports_long_click() {
        let (level, mut btn) = button(EventClass::All, 1);
        let t0 = Instant::now();
        let mut out = Vec::new();

        level.set(true);
        btn.poll(t0, &mut out);
        level.set(false);
        btn.poll(t0 + Duration::from_millis(1200), &mut out);

        assert_eq!(
            kinds(&out),
            [ButtonEvent::Down, ButtonEvent::Up, ButtonEvent::LongClick]
        );
    }

    #[test]
    fn hold_fires_once_then_release_is_long_click() {
        let (level, mut btn) = button(EventClass::All, 1);
        let t0 = Instant::now();
        let mut out = Vec::new();

        level.set(true);
        btn.poll(t0, &mut out);
        btn.poll(t0 + Duration::from_millis(1600), &mut out);
        btn.poll(t0 + Duration::from_millis(1700), &mut out);
        level.set(false);
        btn.poll(t0 + Duration::from_millis(1800), &mut out);

        assert_eq!(
            kinds(&out),
            [
                ButtonEvent::Down,
                ButtonEvent::Hold,
                ButtonEvent::Up,
                ButtonEvent::LongClick
            ]
        );
    }

    #[test]
    fn simple_class_suppresses_clicks_and_hold() {
        let (level, mut btn) = button(EventClass::Simple, 1);
        let t0 = Instant::now();
        let mut out = Vec::new();

        level.set(true);
        btn.poll(t0, &mut out);
        btn.poll(t0 + Duration::from_millis(1600), &mut out);
        level.set(false);
        btn.poll(t0 + Duration::from_millis(1700), &mut out);

        assert_eq!(kinds(&out), [ButtonEvent::Down, ButtonEvent::Up]);
    }

    #[test]
    fn glitches_below_the_debounce_window_are_dropped() {
        let (level, mut btn) = button(EventClass::All, 3);
        let t0 = Instant::now();
        let mut out = Vec::new();

        // Two active samples, then the line drops again.
        level.set(true);
        btn.poll(t0, &mut out);
        btn.poll(t0, &mut out);
        level.set(false);
        for _ in 0..4 {
            btn.poll(t0, &mut out);
        }
        assert!(out.is_empty());

        // A real press needs the full window.
        level.set(true);
        btn.poll(t0, &mut out);
        btn.poll(t0, &mut out);
        assert!(out.is_empty());
        btn.poll(t0, &mut out);
        assert_eq!(kinds(&out), [ButtonEvent::Down]);
    }
}
