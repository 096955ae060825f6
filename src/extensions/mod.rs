//! Add-on board extensions. Each module wires one board's buttons onto
//! their fixed pads the first time its `init` runs.

pub mod eggbit;
pub mod rub;

use crate::button::Active;
use crate::pins::PinId;

/// One button of an extension: the pad it sits on and the level the
/// board drives when it is pressed.
pub struct ButtonSpec {
    pub pin: PinId,
    pub active: Active,
}

/// A supported add-on board.
pub struct Extension {
    pub name: &'static str,
    pub buttons: &'static [ButtonSpec],
    entry: fn(),
}

impl Extension {
    /// Run the board's one-shot initializer.
    pub fn init(&self) {
        (self.entry)()
    }

    pub fn covers(&self, pin: PinId) -> bool {
        self.buttons.iter().any(|b| b.pin == pin)
    }
}

pub const ALL: &[&Extension] = &[&eggbit::EXTENSION, &rub::EXTENSION];

pub fn by_name(name: &str) -> Option<&'static Extension> {
    ALL.iter().copied().find(|e| e.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boards_resolve_by_name() {
        assert!(by_name("eggbit").is_some());
        assert!(by_name("rub").is_some());
        assert!(by_name("unknown-board").is_none());
    }

    #[test]
    fn eggbit_declares_four_buttons() {
        let ext = by_name("eggbit").unwrap();
        let pins: Vec<PinId> = ext.buttons.iter().map(|b| b.pin).collect();
        assert_eq!(pins, [PinId::P12, PinId::P8, PinId::P14, PinId::P16]);
        assert!(ext.covers(PinId::P8));
        assert!(!ext.covers(PinId::P0));
    }

    #[test]
    fn rub_declares_one_button() {
        let ext = by_name("rub").unwrap();
        let pins: Vec<PinId> = ext.buttons.iter().map(|b| b.pin).collect();
        assert_eq!(pins, [PinId::P0]);
    }
}
