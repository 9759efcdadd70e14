/*
 * Audible feedback for pedestrians.
 *
 * Two things make sound: a fixed double beep that confirms a button press,
 * and the ticking that runs while pedestrians have green. The ticking speeds
 * up as the walk phase runs out.
 *
 * A crossing tick is a short pulse. Pulses live beside the outer state and are
 * ended on every update whatever that state is, so a pulse that was started
 * just before the walk phase ended is still cut off after its full length.
 */

use log::debug;

use crate::clock::Millis;
use crate::config::BuzzerTimings;
use crate::output_image::OutputImage;
use crate::trafficlight::TrafficLight;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerState {
    Idle,
    ConfirmationBeep,
    CrossingBeeps,
}

#[derive(Debug, Clone)]
pub struct Buzzer {
    timings: BuzzerTimings,
    state: BuzzerState,
    state_start_at: Millis,
    last_beep_at: Millis,
    beep_interval_ms: u32,
    // Start of the pulse that is currently sounding.
    pulse_start_at: Option<Millis>,
    confirmation_pending: bool,
}

impl Buzzer {
    pub fn new(timings: BuzzerTimings, now: Millis) -> Self {
        Buzzer {
            timings,
            state: BuzzerState::Idle,
            state_start_at: now,
            last_beep_at: now,
            beep_interval_ms: timings.max_interval_ms,
            pulse_start_at: None,
            confirmation_pending: false,
        }
    }

    /// Queue the double beep. Takes priority over crossing ticks when idle.
    pub fn request_confirmation(&mut self) {
        self.confirmation_pending = true;
    }

    pub fn update(&mut self, now: Millis, traffic: &TrafficLight, outputs: &mut OutputImage) {
        self.end_pulse(now, outputs);

        match self.state {
            BuzzerState::Idle => {
                if self.pulse_start_at.is_none() {
                    outputs.set_tone(false);
                }

                if self.confirmation_pending {
                    self.enter(BuzzerState::ConfirmationBeep, now);
                } else if crossing(traffic) {
                    self.enter(BuzzerState::CrossingBeeps, now);
                    self.last_beep_at = now;
                }
            }
            BuzzerState::ConfirmationBeep => {
                let elapsed = now.elapsed_since(self.state_start_at);
                if elapsed < self.timings.confirm_first_off_ms {
                    outputs.set_tone(true);
                } else if elapsed < self.timings.confirm_second_on_ms {
                    outputs.set_tone(false);
                } else if elapsed < self.timings.confirm_done_ms {
                    outputs.set_tone(true);
                } else {
                    outputs.set_tone(false);
                    self.confirmation_pending = false;
                    self.enter(BuzzerState::Idle, now);
                }
            }
            BuzzerState::CrossingBeeps => {
                if !crossing(traffic) {
                    if self.pulse_start_at.is_none() {
                        outputs.set_tone(false);
                    }
                    self.enter(BuzzerState::Idle, now);
                    return;
                }

                self.beep_interval_ms = self.interval_for(traffic.remaining_ratio(now));

                if self.pulse_start_at.is_none()
                    && now.has_elapsed(self.last_beep_at, self.beep_interval_ms)
                {
                    outputs.set_tone(true);
                    self.pulse_start_at = Some(now);
                    self.last_beep_at = now;
                }
            }
        }
    }

    fn end_pulse(&mut self, now: Millis, outputs: &mut OutputImage) {
        if let Some(start) = self.pulse_start_at {
            if now.has_elapsed(start, self.timings.pulse_ms) {
                outputs.set_tone(false);
                self.pulse_start_at = None;
            }
        }
    }

    fn enter(&mut self, state: BuzzerState, now: Millis) {
        debug!("buzzer {:?} -> {:?}", self.state, state);
        self.state = state;
        self.state_start_at = now;
    }

    // `ratio` is the share of the walk phase still left: a full window beeps
    // slowly, an almost finished one quickly.
    fn interval_for(&self, ratio: f64) -> u32 {
        let span = self
            .timings
            .max_interval_ms
            .saturating_sub(self.timings.min_interval_ms);
        let ratio = ratio.clamp(0.0, 1.0);
        self.timings.min_interval_ms + (ratio * f64::from(span)) as u32
    }

    pub fn state(&self) -> BuzzerState {
        self.state
    }

    pub fn beep_interval_ms(&self) -> u32 {
        self.beep_interval_ms
    }

    pub fn is_pulse_active(&self) -> bool {
        self.pulse_start_at.is_some()
    }

    pub fn confirmation_pending(&self) -> bool {
        self.confirmation_pending
    }
}

fn crossing(traffic: &TrafficLight) -> bool {
    traffic.is_crossing_active() && traffic.is_pedestrian_green()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FlowRanges, PhaseTimings};
    use crate::flow::FlowModel;
    use crate::io::FixedSensor;
    use crate::trafficlight::Phase;

    fn buzzer() -> Buzzer {
        Buzzer::new(BuzzerTimings::DEFAULT, Millis(0))
    }

    // A traffic light that entered its walk phase at `walk_start`, with the
    // durations that full flow gives: 10 s of pedestrian green.
    fn walking_light(walk_start: u32) -> TrafficLight {
        let mut flow = FlowModel::new(FixedSensor(1.0), FlowRanges::DEFAULT);
        let mut light = TrafficLight::new(PhaseTimings::DEFAULT, Millis(0));
        light.request_pedestrian();
        light.update(Millis(walk_start - 63_000), &mut flow);
        light.update(Millis(walk_start - 3_000), &mut flow);
        light.update(Millis(walk_start), &mut flow);
        assert_eq!(light.phase(), Phase::PedGreen);
        assert_eq!(light.ped_green_ms(), 10_000);
        light
    }

    #[test]
    fn confirmation_double_beep_pattern() {
        let light = TrafficLight::new(PhaseTimings::DEFAULT, Millis(0));
        let mut buzzer = buzzer();
        let mut outputs = OutputImage::default();

        buzzer.request_confirmation();
        buzzer.update(Millis(1_000), &light, &mut outputs);
        assert_eq!(buzzer.state(), BuzzerState::ConfirmationBeep);

        let expect = [
            (1_000, true),
            (1_099, true),
            (1_100, false),
            (1_149, false),
            (1_150, true),
            (1_249, true),
        ];
        for (t, tone) in expect {
            buzzer.update(Millis(t), &light, &mut outputs);
            assert_eq!(outputs.tone(), tone, "at {t} ms");
        }

        buzzer.update(Millis(1_250), &light, &mut outputs);
        assert!(!outputs.tone());
        assert_eq!(buzzer.state(), BuzzerState::Idle);
        assert!(!buzzer.confirmation_pending());
    }

    #[test]
    fn idle_silences_tone() {
        let light = TrafficLight::new(PhaseTimings::DEFAULT, Millis(0));
        let mut buzzer = buzzer();
        let mut outputs = OutputImage::default();
        outputs.set_tone(true);
        buzzer.update(Millis(5), &light, &mut outputs);
        assert!(!outputs.tone());
        assert_eq!(buzzer.state(), BuzzerState::Idle);
    }

    #[test]
    fn crossing_beeps_speed_up_as_walk_runs_out() {
        let light = walking_light(100_000);
        let mut buzzer = buzzer();
        let mut outputs = OutputImage::default();

        buzzer.update(Millis(100_000), &light, &mut outputs);
        assert_eq!(buzzer.state(), BuzzerState::CrossingBeeps);

        buzzer.update(Millis(100_000), &light, &mut outputs);
        assert_eq!(buzzer.beep_interval_ms(), 400);
        assert!(!buzzer.is_pulse_active());

        buzzer.update(Millis(109_000), &light, &mut outputs);
        assert_eq!(buzzer.beep_interval_ms(), 130);
    }

    #[test]
    fn pulses_last_fifty_ms_and_repeat_at_interval() {
        let light = walking_light(100_000);
        let mut buzzer = buzzer();
        let mut outputs = OutputImage::default();

        let mut pulse_starts = Vec::new();
        let mut was_on = false;
        for t in 100_000..=101_000 {
            buzzer.update(Millis(t), &light, &mut outputs);
            if outputs.tone() && !was_on {
                pulse_starts.push(t);
            }
            if !outputs.tone() && was_on {
                assert_eq!(t - pulse_starts.last().copied().unwrap_or(0), 50);
            }
            was_on = outputs.tone();
        }

        // Less than a tenth of the walk has gone, so the spacing sits a little
        // under the slowest cadence and shrinks from one beep to the next.
        assert!(pulse_starts.len() >= 2);
        let first_gap = pulse_starts[0] - 100_000;
        let second_gap = pulse_starts[1] - pulse_starts[0];
        assert_eq!(first_gap, 388);
        assert_eq!(second_gap, 377);
    }

    #[test]
    fn confirmation_preempts_crossing_beeps() {
        let light = walking_light(100_000);
        let mut buzzer = buzzer();
        let mut outputs = OutputImage::default();

        buzzer.request_confirmation();
        buzzer.update(Millis(100_000), &light, &mut outputs);
        assert_eq!(buzzer.state(), BuzzerState::ConfirmationBeep);

        buzzer.update(Millis(100_250), &light, &mut outputs);
        assert_eq!(buzzer.state(), BuzzerState::Idle);
        buzzer.update(Millis(100_255), &light, &mut outputs);
        assert_eq!(buzzer.state(), BuzzerState::CrossingBeeps);
    }

    #[test]
    fn pulse_in_flight_finishes_after_walk_ends() {
        let mut light = walking_light(100_000);
        let mut flow = FlowModel::new(FixedSensor(1.0), FlowRanges::DEFAULT);
        let mut buzzer = buzzer();
        let mut outputs = OutputImage::default();

        buzzer.update(Millis(100_000), &light, &mut outputs);
        let mut t = 100_001;
        while !buzzer.is_pulse_active() {
            buzzer.update(Millis(t), &light, &mut outputs);
            t += 1;
        }
        let pulse_start = t - 1;

        // Walk ends 10 ms into the pulse.
        let walk_end = pulse_start + 10;
        light.update(Millis(walk_end + 10_000), &mut flow);
        assert_eq!(light.phase(), Phase::TransitionToCar);

        buzzer.update(Millis(walk_end), &light, &mut outputs);
        assert_eq!(buzzer.state(), BuzzerState::Idle);
        assert!(outputs.tone());

        buzzer.update(Millis(pulse_start + 50), &light, &mut outputs);
        assert!(!outputs.tone());
        assert!(!buzzer.is_pulse_active());
    }
}
