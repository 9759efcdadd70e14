/*
 * Red-light enforcement.
 *
 * A second button stands in for a stop-line sensor. Closing it while cars
 * face red records one violation and fires the flash. The sensor is sampled
 * on its own slower cadence and debounced like the pedestrian button.
 *
 * Counting is level based: a settled, closed contact counts as soon as the
 * car light is red, once, and the detector only rearms after the contact has
 * been open for a full debounce window. A contact that is held through a
 * whole red-green-red cycle therefore counts once.
 */

use log::info;

use crate::clock::Millis;
use crate::debounce::DebouncedInput;

#[derive(Debug, Clone)]
pub struct ViolationDetector {
    check_interval_ms: u32,
    last_check_at: Millis,
    sensor: DebouncedInput,
    handled: bool,
    count: u32,
}

impl ViolationDetector {
    pub fn new(debounce_ms: u32, check_interval_ms: u32, now: Millis, raw_level: bool) -> Self {
        ViolationDetector {
            check_interval_ms,
            last_check_at: now,
            sensor: DebouncedInput::new(debounce_ms, now, raw_level),
            handled: false,
            count: 0,
        }
    }

    /// Returns the new total when this call recorded a violation.
    pub fn update(&mut self, now: Millis, raw_level: bool, car_red: bool) -> Option<u32> {
        if !now.has_elapsed(self.last_check_at, self.check_interval_ms) {
            return None;
        }
        self.last_check_at = now;

        self.sensor.update(now, raw_level);
        if !self.sensor.is_settled(now) {
            return None;
        }

        if !self.sensor.is_pressed() {
            self.handled = false;
            return None;
        }

        if car_red && !self.handled {
            self.handled = true;
            self.count = self.count.saturating_add(1);
            info!("red light violation, {} recorded", self.count);
            return Some(self.count);
        }

        None
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}
