//! RUB bin: a single panel switch. The board drives the line high while
//! the switch is on.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::button::{Active, EventClass};
use crate::pins::PinId;
use crate::runtime;

use super::{ButtonSpec, Extension};

pub const EXTENSION: Extension = Extension {
    name: "rub",
    buttons: BUTTONS,
    entry: init,
};

const BUTTONS: &[ButtonSpec] = &[
    ButtonSpec { pin: PinId::P0, active: Active::High },
];

static MOUNTED: AtomicBool = AtomicBool::new(false);

/// Mount the panel switch, full event class. The first call does the
/// wiring; every later call is a no-op.
pub fn init() {
    if MOUNTED.swap(true, Ordering::Relaxed) {
        return;
    }

    for spec in BUTTONS {
        runtime::mount(spec.pin, EventClass::All, spec.active);
    }
}
