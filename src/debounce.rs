/*
 * Debouncing for the push buttons.
 *
 * The inputs are wired active-low with pull-ups: a raw `true` means the
 * contact is open (released), `false` means it is closed (pressed).
 *
 * The level follows the raw signal immediately; every change restarts the
 * debounce window. Only once the level has been stable for longer than the
 * window does it count, and then a press produces exactly one `Pressed` edge no
 * matter how long the button is held. The next press is only accepted after a
 * release that was itself stable for longer than the window.
 */

use crate::clock::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Pressed,
    Released,
}

#[derive(Debug, Clone)]
pub struct DebouncedInput {
    window_ms: u32,
    stable_level: bool,
    last_change_at: Millis,
    event_fired: bool,
}

impl DebouncedInput {
    /// Starts from whatever level the pin has at power-on. A button that is
    /// already held produces its edge once the window has passed.
    pub fn new(window_ms: u32, now: Millis, raw_level: bool) -> Self {
        DebouncedInput {
            window_ms,
            stable_level: raw_level,
            last_change_at: now,
            event_fired: false,
        }
    }

    pub fn update(&mut self, now: Millis, raw_level: bool) -> Option<Edge> {
        if raw_level != self.stable_level {
            self.stable_level = raw_level;
            self.last_change_at = now;
        }

        if !self.is_settled(now) {
            return None;
        }

        match (self.stable_level, self.event_fired) {
            (false, false) => {
                self.event_fired = true;
                Some(Edge::Pressed)
            }
            (true, true) => {
                self.event_fired = false;
                Some(Edge::Released)
            }
            (false, true) | (true, false) => None,
        }
    }

    /// The last observed raw level, bounces included.
    pub fn level(&self) -> bool {
        self.stable_level
    }

    pub fn is_pressed(&self) -> bool {
        !self.stable_level
    }

    /// True when the level has not changed for longer than the window.
    pub fn is_settled(&self, now: Millis) -> bool {
        now.elapsed_since(self.last_change_at) > self.window_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WINDOW: u32 = 50;
    const RELEASED: bool = true;
    const PRESSED: bool = false;

    fn run(input: &mut DebouncedInput, from: u32, to: u32, level: bool) -> usize {
        (from..=to)
            .filter(|t| input.update(Millis(*t), level) == Some(Edge::Pressed))
            .count()
    }

    #[test]
    fn clean_press_fires_once() {
        let mut input = DebouncedInput::new(WINDOW, Millis(0), RELEASED);
        assert_eq!(run(&mut input, 0, 99, RELEASED), 0);

        assert_eq!(input.update(Millis(100), PRESSED), None);
        assert_eq!(input.update(Millis(150), PRESSED), None);
        assert_eq!(input.update(Millis(151), PRESSED), Some(Edge::Pressed));
        assert_eq!(run(&mut input, 152, 5_000, PRESSED), 0);
    }

    #[test]
    fn held_press_does_not_repeat_until_clean_release() {
        let mut input = DebouncedInput::new(WINDOW, Millis(0), RELEASED);
        assert_eq!(run(&mut input, 0, 200, PRESSED), 1);

        // A short release inside the window does not rearm.
        assert_eq!(run(&mut input, 201, 230, RELEASED), 0);
        assert_eq!(run(&mut input, 231, 400, PRESSED), 0);

        assert_eq!(input.update(Millis(401), RELEASED), None);
        assert_eq!(input.update(Millis(452), RELEASED), Some(Edge::Released));
        assert_eq!(run(&mut input, 453, 600, PRESSED), 1);
    }

    #[test]
    fn level_follows_first_change() {
        let mut input = DebouncedInput::new(WINDOW, Millis(0), RELEASED);
        input.update(Millis(10), PRESSED);
        assert!(input.is_pressed());
        assert!(!input.is_settled(Millis(60)));
        assert!(input.is_settled(Millis(61)));
    }

    #[test]
    fn held_at_power_on_fires_after_window() {
        let mut input = DebouncedInput::new(WINDOW, Millis(1_000), PRESSED);
        assert_eq!(input.update(Millis(1_050), PRESSED), None);
        assert_eq!(input.update(Millis(1_051), PRESSED), Some(Edge::Pressed));
    }

    #[test]
    fn settles_across_clock_wrap() {
        let start = Millis(u32::MAX - 20);
        let mut input = DebouncedInput::new(WINDOW, start, RELEASED);
        input.update(start, PRESSED);
        assert_eq!(input.update(start.wrapping_add(50), PRESSED), None);
        assert_eq!(input.update(start.wrapping_add(51), PRESSED), Some(Edge::Pressed));
    }

    proptest! {
        #[test]
        fn bounces_inside_window_never_fire(gaps in prop::collection::vec(1u32..=WINDOW, 1..40)) {
            let mut input = DebouncedInput::new(WINDOW, Millis(0), RELEASED);
            let mut now = 0u32;
            let mut level = RELEASED;
            for gap in gaps {
                now += gap;
                level = !level;
                prop_assert_ne!(input.update(Millis(now), level), Some(Edge::Pressed));
            }
        }
    }
}
