//! EggBit face panel: four coloured buttons on fixed pads. The board
//! drives a line high while its button is held.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::button::{Active, EventClass};
use crate::pins::PinId;
use crate::runtime;

use super::{ButtonSpec, Extension};

pub const EXTENSION: Extension = Extension {
    name: "eggbit",
    buttons: BUTTONS,
    entry: init,
};

const BUTTONS: &[ButtonSpec] = &[
    ButtonSpec { pin: PinId::P12, active: Active::High }, // red
    ButtonSpec { pin: PinId::P8, active: Active::High },  // green
    ButtonSpec { pin: PinId::P14, active: Active::High }, // yellow
    ButtonSpec { pin: PinId::P16, active: Active::High }, // blue
];

static MOUNTED: AtomicBool = AtomicBool::new(false);

/// Mount the face-panel buttons, full event class on every pad. The
/// first call does the wiring; every later call is a no-op.
pub fn init() {
    if MOUNTED.swap(true, Ordering::Relaxed) {
        return;
    }

    for spec in BUTTONS {
        runtime::mount(spec.pin, EventClass::All, spec.active);
    }
}
