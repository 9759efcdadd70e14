/*
 * Pin assignment for the DESPI-M02 board.
 *
 * This is the only device-specific part besides `main`. It owns the GPIO and
 * moves levels between the pins and the controller's output image once per
 * tick.
 */

use embassy_stm32::gpio::{AnyPin, Input, Level, Output, Pull, Speed};
use enum_ordinalize::Ordinalize;

use pedestrian_crossing::InputLevels;
use pedestrian_crossing::output_image::{CHANNEL_COUNT, Channel, OutputImage};

/// Channels wired to sink current, indexed like `Channel`. The RGB flash is a
/// common-anode part; everything else is driven high to light.
pub const ACTIVE_LOWS: [bool; CHANNEL_COUNT] = {
    let mut lows = [false; CHANNEL_COUNT];
    lows[Channel::FlashRed as usize] = true;
    lows[Channel::FlashGreen as usize] = true;
    lows[Channel::FlashBlue as usize] = true;
    lows
};

pub struct Board {
    outputs: [Output<'static>; CHANNEL_COUNT],
    button: Input<'static>,
    violation_sensor: Input<'static>,
}

impl Board {
    pub fn new(p: BoardPins) -> Self {
        // Order must match `Channel`. Outputs start at their unlit level.
        let outputs: [Output<'static>; CHANNEL_COUNT] = [
            Output::new(p.car_red, Level::Low, Speed::Low),
            Output::new(p.car_amber, Level::Low, Speed::Low),
            Output::new(p.car_green, Level::Low, Speed::Low),
            Output::new(p.ped_red, Level::High, Speed::Low),
            Output::new(p.ped_green, Level::Low, Speed::Low),
            Output::new(p.flash_red, Level::High, Speed::Low),
            Output::new(p.flash_green, Level::High, Speed::Low),
            Output::new(p.flash_blue, Level::High, Speed::Low),
            Output::new(p.beeper, Level::Low, Speed::Low),
        ];

        Board {
            outputs,
            button: Input::new(p.button, Pull::Up),
            violation_sensor: Input::new(p.violation_sensor, Pull::Up),
        }
    }

    pub fn read_inputs(&self) -> InputLevels {
        InputLevels {
            button: self.button.is_high(),
            violation: self.violation_sensor.is_high(),
        }
    }

    pub fn apply(&mut self, image: &OutputImage) {
        let levels = image.pin_levels();
        for channel in Channel::VARIANTS {
            let i = channel.ordinal();
            self.outputs[i].set_level(if levels[i] { Level::High } else { Level::Low });
        }
    }
}

/// The GPIO this board uses, already type-erased by `main`.
pub struct BoardPins {
    pub car_red: AnyPin,
    pub car_amber: AnyPin,
    pub car_green: AnyPin,
    pub ped_red: AnyPin,
    pub ped_green: AnyPin,
    pub flash_red: AnyPin,
    pub flash_green: AnyPin,
    pub flash_blue: AnyPin,
    pub beeper: AnyPin,
    pub button: AnyPin,
    pub violation_sensor: AnyPin,
}
