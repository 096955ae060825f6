//! Single-pin scenario: initializing the RUB panel switch mounts exactly
//! one pad, once, and the switch state is readable afterwards.

use std::time::Instant;

use edge_button_controller::button::{Active, EventClass};
use edge_button_controller::extensions::rub;
use edge_button_controller::gpio::mock::MockGpio;
use edge_button_controller::gpio::Bias;
use edge_button_controller::pins::PinId;
use edge_button_controller::runtime::{self, PollSettings};

#[test]
fn init_mounts_the_panel_switch_once() {
    let gpio = MockGpio::new();
    let handle = gpio.handle();
    runtime::install(
        Box::new(gpio),
        PollSettings {
            interval_ms: 20,
            debounce_ms: 60,
        },
    )
    .unwrap();

    rub::init();

    let mounted = runtime::mounted();
    assert_eq!(mounted.len(), 1);
    assert_eq!(mounted[0].pin, PinId::P0);
    assert_eq!(mounted[0].line, PinId::P0.line());
    assert_eq!(mounted[0].class, EventClass::All);
    assert_eq!(mounted[0].active, Active::High);
    assert_eq!(handle.claims(), [(PinId::P0.line(), Bias::Floating)]);

    // Second invocation is a no-op.
    rub::init();
    assert_eq!(runtime::mounted().len(), 1);
    assert_eq!(handle.claims().len(), 1);

    // Debounced switch state is readable for the mounted pad only.
    assert_eq!(runtime::is_pressed(PinId::P0), Some(false));
    assert_eq!(runtime::is_pressed(PinId::P12), None);

    handle.set_level(PinId::P0.line(), true);
    for _ in 0..3 {
        runtime::poll_all(Instant::now());
    }
    assert_eq!(runtime::is_pressed(PinId::P0), Some(true));
}
