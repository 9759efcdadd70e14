/*
 * Flow-adaptive phase durations.
 *
 * A potentiometer stands in for a vehicle counter. The busier the road, the
 * longer a pedestrian waits before the walk phase and the shorter that walk
 * phase is. The sensor is read only at the moment a phase starts, never while
 * it runs.
 */

use crate::config::FlowRanges;
use crate::io::{AnalogSensor, clamp_unit};

/// Where the traffic sequencer gets its flow reading from.
pub trait FlowSource {
    fn normalized_flow(&mut self) -> f64;
    fn ranges(&self) -> FlowRanges;

    fn wait_before_walk_ms(&mut self) -> u32 {
        let flow = self.normalized_flow();
        wait_before_walk_ms(flow, &self.ranges())
    }

    fn ped_green_ms(&mut self) -> u32 {
        let flow = self.normalized_flow();
        ped_green_ms(flow, &self.ranges())
    }
}

/// Rises linearly from `wait_min_ms` at zero flow to `wait_max_ms` at full flow.
pub fn wait_before_walk_ms(flow: f64, ranges: &FlowRanges) -> u32 {
    let span = ranges.wait_max_ms.saturating_sub(ranges.wait_min_ms);
    ranges.wait_min_ms + scale(span, flow)
}

/// Falls linearly from `ped_green_max_ms` at zero flow to `ped_green_min_ms`
/// at full flow.
pub fn ped_green_ms(flow: f64, ranges: &FlowRanges) -> u32 {
    let span = ranges.ped_green_max_ms.saturating_sub(ranges.ped_green_min_ms);
    ranges.ped_green_max_ms - scale(span, flow)
}

// Truncates toward zero; never exceeds `span`.
fn scale(span: u32, flow: f64) -> u32 {
    let scaled = (f64::from(span) * clamp_unit(flow)) as u32;
    scaled.min(span)
}

pub struct FlowModel<S> {
    sensor: S,
    ranges: FlowRanges,
}

impl<S: AnalogSensor> FlowModel<S> {
    pub fn new(sensor: S, ranges: FlowRanges) -> Self {
        FlowModel { sensor, ranges }
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }
}

impl<S: AnalogSensor> FlowSource for FlowModel<S> {
    fn normalized_flow(&mut self) -> f64 {
        clamp_unit(self.sensor.read_normalized())
    }

    fn ranges(&self) -> FlowRanges {
        self.ranges
    }
}
