/*
 * The state machines do not write pins. Each of them states what its lights
 * and the beeper should look like in an output image, and the main loop copies
 * the image to the pins once per tick. This keeps every state machine free of
 * hardware types and lets the tests look at the outputs directly.
 *
 * The image also hides wiring polarity: state machines always use `true` for
 * "on", and channels that are wired active-low are inverted when the pin
 * levels are produced.
 */

use enum_ordinalize::Ordinalize;

#[derive(Debug, Ordinalize, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Channel {
    // Vehicle signal head.
    CarRed,
    CarAmber,
    CarGreen,

    // Pedestrian signal head.
    PedRed,
    PedGreen,

    // RGB enforcement flash.
    FlashRed,
    FlashGreen,
    FlashBlue,

    Beeper,
}

pub const CHANNEL_COUNT: usize = Channel::VARIANT_COUNT;

#[derive(Debug, Clone)]
pub struct OutputImage {
    on: [bool; CHANNEL_COUNT],
    active_lows: [bool; CHANNEL_COUNT],
}

impl OutputImage {
    /// Power-on state: car head dark, pedestrians red, flash and beeper off.
    pub const fn new(active_lows: [bool; CHANNEL_COUNT]) -> Self {
        let mut on = [false; CHANNEL_COUNT];
        on[Channel::PedRed as usize] = true;
        OutputImage { on, active_lows }
    }

    pub fn set(&mut self, channel: Channel, on: bool) {
        self.on[channel.ordinal()] = on;
    }

    pub fn is_on(&self, channel: Channel) -> bool {
        self.on[channel.ordinal()]
    }

    pub fn set_car_lights(&mut self, red: bool, amber: bool, green: bool) {
        self.set(Channel::CarRed, red);
        self.set(Channel::CarAmber, amber);
        self.set(Channel::CarGreen, green);
    }

    pub fn set_ped_lights(&mut self, red: bool, green: bool) {
        self.set(Channel::PedRed, red);
        self.set(Channel::PedGreen, green);
    }

    pub fn set_flash(&mut self, red: bool, green: bool, blue: bool) {
        self.set(Channel::FlashRed, red);
        self.set(Channel::FlashGreen, green);
        self.set(Channel::FlashBlue, blue);
    }

    pub fn set_tone(&mut self, on: bool) {
        self.set(Channel::Beeper, on);
    }

    pub fn tone(&self) -> bool {
        self.is_on(Channel::Beeper)
    }

    pub fn car_lights(&self) -> (bool, bool, bool) {
        (
            self.is_on(Channel::CarRed),
            self.is_on(Channel::CarAmber),
            self.is_on(Channel::CarGreen),
        )
    }

    pub fn ped_lights(&self) -> (bool, bool) {
        (self.is_on(Channel::PedRed), self.is_on(Channel::PedGreen))
    }

    pub fn flash(&self) -> (bool, bool, bool) {
        (
            self.is_on(Channel::FlashRed),
            self.is_on(Channel::FlashGreen),
            self.is_on(Channel::FlashBlue),
        )
    }

    /// Electrical pin levels, indexed by `Channel::ordinal()`.
    pub fn pin_levels(&self) -> [bool; CHANNEL_COUNT] {
        let mut levels = [false; CHANNEL_COUNT];
        for i in 0..CHANNEL_COUNT {
            levels[i] = self.on[i] ^ self.active_lows[i];
        }
        levels
    }
}

impl Default for OutputImage {
    fn default() -> Self {
        OutputImage::new([false; CHANNEL_COUNT])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_on_state_is_safe() {
        let image = OutputImage::default();
        assert_eq!(image.car_lights(), (false, false, false));
        assert_eq!(image.ped_lights(), (true, false));
        assert_eq!(image.flash(), (false, false, false));
        assert!(!image.tone());
    }

    #[test]
    fn active_low_channels_are_inverted() {
        let mut active_lows = [false; CHANNEL_COUNT];
        active_lows[Channel::Beeper.ordinal()] = true;
        let mut image = OutputImage::new(active_lows);

        image.set_car_lights(false, false, true);
        let levels = image.pin_levels();
        assert!(levels[Channel::CarGreen.ordinal()]);
        assert!(!levels[Channel::CarRed.ordinal()]);
        assert!(levels[Channel::Beeper.ordinal()]);

        image.set_tone(true);
        assert!(!image.pin_levels()[Channel::Beeper.ordinal()]);
    }

    #[test]
    fn grouped_setters_touch_only_their_channels() {
        let mut image = OutputImage::default();
        image.set_flash(true, true, true);
        assert_eq!(image.flash(), (true, true, true));
        assert_eq!(image.ped_lights(), (true, false));
        assert!(!image.tone());
    }
}
