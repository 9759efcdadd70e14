use log::debug;

use crate::clock::Millis;
use crate::config::PhaseTimings;
use crate::flow::FlowSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Default state. Cars drive, pedestrians wait for someone to press.
    CarGreen,
    /// A pedestrian asked to cross; cars keep green a while longer.
    WaitBeforePed,
    YellowBeforePed,
    /// Pedestrians cross.
    PedGreen,
    /// Red and amber together before cars get green again.
    TransitionToCar,
}

#[derive(Debug, Clone)]
pub struct TrafficLight {
    timings: PhaseTimings,
    phase: Phase,
    phase_start_at: Millis,
    // Both are zero until first computed on entry to their phase.
    wait_before_ped_ms: u32,
    ped_green_ms: u32,
    pedestrian_request: bool,
    crossing_active: bool,
}

impl TrafficLight {
    pub fn new(timings: PhaseTimings, now: Millis) -> Self {
        TrafficLight {
            timings,
            phase: Phase::CarGreen,
            phase_start_at: now,
            wait_before_ped_ms: 0,
            ped_green_ms: 0,
            pedestrian_request: false,
            crossing_active: false,
        }
    }

    pub fn request_pedestrian(&mut self) {
        self.pedestrian_request = true;
    }

    /*
     * Moves at most one phase forward. Returns the phase that was entered, if
     * any. Durations are measured from the tick that observed the previous
     * transition, so the flow sensor is only consulted on entry.
     */
    pub fn update(&mut self, now: Millis, flow: &mut impl FlowSource) -> Option<Phase> {
        if self.phase == Phase::PedGreen {
            self.pedestrian_request = false;
        }

        if !self.phase_done(now) {
            return None;
        }

        let next_phase = self.next_phase();
        match next_phase {
            Phase::WaitBeforePed => {
                self.wait_before_ped_ms = flow.wait_before_walk_ms();
            }
            Phase::PedGreen => {
                self.ped_green_ms = flow.ped_green_ms();
                self.crossing_active = true;
                self.pedestrian_request = false;
            }
            Phase::TransitionToCar | Phase::CarGreen | Phase::YellowBeforePed => {
                self.crossing_active = false;
            }
        }

        debug!(
            "phase {:?} -> {:?} at {} ms",
            self.phase,
            next_phase,
            now.as_u32()
        );
        self.phase = next_phase;
        self.phase_start_at = now;
        Some(next_phase)
    }

    fn phase_done(&self, now: Millis) -> bool {
        let elapsed = now.elapsed_since(self.phase_start_at);
        match self.phase {
            Phase::CarGreen => self.pedestrian_request,
            Phase::WaitBeforePed => elapsed >= self.wait_before_ped_ms,
            Phase::YellowBeforePed => elapsed >= self.timings.yellow_before_ped_ms,
            Phase::PedGreen => elapsed >= self.ped_green_ms,
            Phase::TransitionToCar => elapsed >= self.timings.transition_to_car_ms,
        }
    }

    fn next_phase(&self) -> Phase {
        match self.phase {
            Phase::CarGreen => Phase::WaitBeforePed,
            Phase::WaitBeforePed => Phase::YellowBeforePed,
            Phase::YellowBeforePed => Phase::PedGreen,
            Phase::PedGreen => Phase::TransitionToCar,
            Phase::TransitionToCar => Phase::CarGreen,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phase_start_at(&self) -> Millis {
        self.phase_start_at
    }

    /// Cars face red; anyone crossing the stop line now commits a violation.
    pub fn is_car_red(&self) -> bool {
        match self.phase {
            Phase::PedGreen | Phase::TransitionToCar => true,
            Phase::CarGreen | Phase::WaitBeforePed | Phase::YellowBeforePed => false,
        }
    }

    pub fn is_crossing_active(&self) -> bool {
        self.crossing_active
    }

    pub fn is_pedestrian_green(&self) -> bool {
        self.phase == Phase::PedGreen
    }

    pub fn pedestrian_requested(&self) -> bool {
        self.pedestrian_request
    }

    pub fn wait_before_ped_ms(&self) -> u32 {
        self.wait_before_ped_ms
    }

    pub fn ped_green_ms(&self) -> u32 {
        self.ped_green_ms
    }

    pub fn remaining_wait_ms(&self, now: Millis) -> u32 {
        match self.phase {
            Phase::WaitBeforePed => self.remaining(now, self.wait_before_ped_ms),
            _ => 0,
        }
    }

    pub fn remaining_ped_ms(&self, now: Millis) -> u32 {
        match self.phase {
            Phase::PedGreen => self.remaining(now, self.ped_green_ms),
            _ => 0,
        }
    }

    /// Fraction of the pedestrian green still left, `1.0` at its start and
    /// `0.0` once it has run out or outside the walk phase.
    pub fn remaining_ratio(&self, now: Millis) -> f64 {
        if self.ped_green_ms == 0 {
            return 0.0;
        }
        f64::from(self.remaining_ped_ms(now)) / f64::from(self.ped_green_ms)
    }

    fn remaining(&self, now: Millis, duration: u32) -> u32 {
        duration.saturating_sub(now.elapsed_since(self.phase_start_at))
    }

    /// Vehicle head as `(red, amber, green)`.
    pub fn car_lights(&self) -> (bool, bool, bool) {
        match self.phase {
            Phase::CarGreen | Phase::WaitBeforePed => (false, false, true),
            Phase::YellowBeforePed => (false, true, false),
            Phase::PedGreen => (true, false, false),
            Phase::TransitionToCar => (true, true, false),
        }
    }

    /// Pedestrian head as `(red, green)`.
    pub fn ped_lights(&self) -> (bool, bool) {
        match self.phase {
            Phase::PedGreen => (false, true),
            Phase::CarGreen
            | Phase::WaitBeforePed
            | Phase::YellowBeforePed
            | Phase::TransitionToCar => (true, false),
        }
    }
}
