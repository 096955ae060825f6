//! Edge-connector pads and the GPIO lines the breakout harness wires them to.
//!
//! Pad  | BCM line | Notes
//! -----+----------+------------------------------------------
//! P0   |    4     | Large pad, add-on boards use it for switches
//! P1   |   17     | Large pad
//! P2   |   27     | Large pad
//! P8   |   22     |
//! P12  |    5     |
//! P13  |    6     |
//! P14  |   13     |
//! P15  |   19     |
//! P16  |   26     |

use std::fmt;

use serde::{Deserialize, Serialize};

/// A pad on the edge connector. Opaque to callers; the harness wiring
/// behind it is reached through [`PinId::line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinId {
    P0,
    P1,
    P2,
    P8,
    P12,
    P13,
    P14,
    P15,
    P16,
}

impl PinId {
    /// BCM line the harness routes this pad to.
    pub const fn line(self) -> u8 {
        match self {
            PinId::P0 => 4,
            PinId::P1 => 17,
            PinId::P2 => 27,
            PinId::P8 => 22,
            PinId::P12 => 5,
            PinId::P13 => 6,
            PinId::P14 => 13,
            PinId::P15 => 19,
            PinId::P16 => 26,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PinId::P0 => "p0",
            PinId::P1 => "p1",
            PinId::P2 => "p2",
            PinId::P8 => "p8",
            PinId::P12 => "p12",
            PinId::P13 => "p13",
            PinId::P14 => "p14",
            PinId::P15 => "p15",
            PinId::P16 => "p16",
        }
    }

    pub const ALL: &'static [PinId] = &[
        PinId::P0,
        PinId::P1,
        PinId::P2,
        PinId::P8,
        PinId::P12,
        PinId::P13,
        PinId::P14,
        PinId::P15,
        PinId::P16,
    ];
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
