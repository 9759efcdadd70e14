/*
 * One scheduler tick.
 *
 * The main loop reads the clock once, samples the inputs, and calls `tick`.
 * Every component sees that same timestamp. The order below matters: the
 * button goes first so a press is acted on within the same tick, and the
 * traffic sequencer goes before the buzzer and the violation detector so both
 * see the phase as it is after this tick's transition.
 */

use log::info;

use crate::buzzer::Buzzer;
use crate::clock::Millis;
use crate::config::Config;
use crate::debounce::{DebouncedInput, Edge};
use crate::display::StatusDisplay;
use crate::error::PeripheralError;
use crate::flash::Flash;
use crate::flow::FlowModel;
use crate::io::{AnalogSensor, DisplaySink, NoDisplay};
use crate::output_image::{CHANNEL_COUNT, OutputImage};
use crate::trafficlight::{Phase, TrafficLight};
use crate::violation::ViolationDetector;

/// Raw input pin levels for one tick. Both inputs are active-low: `true`
/// means released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLevels {
    pub button: bool,
    pub violation: bool,
}

impl InputLevels {
    pub const RELEASED: InputLevels = InputLevels {
        button: true,
        violation: true,
    };
}

impl Default for InputLevels {
    fn default() -> Self {
        InputLevels::RELEASED
    }
}

pub struct Controller<S, D = NoDisplay> {
    button: DebouncedInput,
    traffic: TrafficLight,
    buzzer: Buzzer,
    display: StatusDisplay<D>,
    violation: ViolationDetector,
    flash: Flash,
    flow: FlowModel<S>,
    outputs: OutputImage,
}

impl<S: AnalogSensor> Controller<S, NoDisplay> {
    pub fn headless(config: Config, now: Millis, levels: InputLevels, sensor: S) -> Self {
        Controller::with_display(
            config,
            now,
            levels,
            sensor,
            StatusDisplay::headless(config.display_refresh_ms, now),
        )
    }
}

impl<S: AnalogSensor, D: DisplaySink> Controller<S, D> {
    /// `display` is the result of bringing the display up; an error leaves
    /// the controller running without it.
    pub fn new(
        config: Config,
        now: Millis,
        levels: InputLevels,
        sensor: S,
        display: Result<D, PeripheralError>,
    ) -> Self {
        Controller::with_display(
            config,
            now,
            levels,
            sensor,
            StatusDisplay::new(display, config.display_refresh_ms, now),
        )
    }

    fn with_display(
        config: Config,
        now: Millis,
        levels: InputLevels,
        sensor: S,
        display: StatusDisplay<D>,
    ) -> Self {
        info!("pedestrian crossing controller started");
        Controller {
            button: DebouncedInput::new(config.debounce_ms, now, levels.button),
            traffic: TrafficLight::new(config.phases, now),
            buzzer: Buzzer::new(config.buzzer, now),
            display,
            violation: ViolationDetector::new(
                config.debounce_ms,
                config.violation_check_interval_ms,
                now,
                levels.violation,
            ),
            flash: Flash::new(config.flash_stage_ms),
            flow: FlowModel::new(sensor, config.flow),
            outputs: OutputImage::new([false; CHANNEL_COUNT]),
        }
    }

    /// Sets which output channels are wired active-low.
    pub fn with_active_lows(mut self, active_lows: [bool; CHANNEL_COUNT]) -> Self {
        self.outputs = OutputImage::new(active_lows);
        self
    }

    pub fn tick(&mut self, now: Millis, levels: InputLevels) -> &OutputImage {
        if self.button.update(now, levels.button) == Some(Edge::Pressed) {
            info!("crossing requested at {} ms", now.as_u32());
            self.traffic.request_pedestrian();
            self.buzzer.request_confirmation();
        }

        self.traffic.update(now, &mut self.flow);
        let (red, amber, green) = self.traffic.car_lights();
        self.outputs.set_car_lights(red, amber, green);
        let (red, green) = self.traffic.ped_lights();
        self.outputs.set_ped_lights(red, green);

        self.buzzer.update(now, &self.traffic, &mut self.outputs);
        self.display.update(now, &self.traffic);

        if self
            .violation
            .update(now, levels.violation, self.traffic.is_car_red())
            .is_some()
        {
            self.flash.trigger(now);
        }
        self.flash.update(now, &mut self.outputs);

        &self.outputs
    }

    pub fn phase(&self) -> Phase {
        self.traffic.phase()
    }

    pub fn violations(&self) -> u32 {
        self.violation.count()
    }

    pub fn traffic(&self) -> &TrafficLight {
        &self.traffic
    }

    pub fn buzzer(&self) -> &Buzzer {
        &self.buzzer
    }

    pub fn flash(&self) -> &Flash {
        &self.flash
    }

    pub fn display(&self) -> &StatusDisplay<D> {
        &self.display
    }

    pub fn outputs(&self) -> &OutputImage {
        &self.outputs
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        self.flow.sensor_mut()
    }
}
