//! Controller for edge-connector add-on boards whose inputs are push
//! buttons on fixed pads.
//!
//! Each supported board is an extension with a one-shot initializer
//! that mounts its buttons into the process-wide [`runtime`] registry;
//! the daemon binary polls the registry and dispatches configured
//! commands on button events.

pub mod button;
pub mod command;
pub mod config;
pub mod daemon;
pub mod extensions;
pub mod gpio;
pub mod pins;
pub mod runtime;

// Re-export the types most callers need.
pub use button::{Active, Button, ButtonEvent, Event, EventClass};
pub use pins::PinId;
