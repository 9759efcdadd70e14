/*
 * Compiled-in timing constants.
 *
 * The controller has no runtime configuration. The values are grouped here so
 * that each component can be handed the part it needs, and so tests can build
 * a controller with different numbers without touching any global state.
 */

/// Flow-derived phase durations, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowRanges {
    /// Wait before the walk phase at zero flow.
    pub wait_min_ms: u32,
    /// Wait before the walk phase at full flow.
    pub wait_max_ms: u32,
    /// Pedestrian green at full flow.
    pub ped_green_min_ms: u32,
    /// Pedestrian green at zero flow.
    pub ped_green_max_ms: u32,
}

impl FlowRanges {
    pub const DEFAULT: FlowRanges = FlowRanges {
        wait_min_ms: 10_000,
        wait_max_ms: 60_000,
        ped_green_min_ms: 10_000,
        ped_green_max_ms: 40_000,
    };
}

/// Fixed phase durations of the traffic sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimings {
    pub yellow_before_ped_ms: u32,
    pub transition_to_car_ms: u32,
}

impl PhaseTimings {
    pub const DEFAULT: PhaseTimings = PhaseTimings {
        yellow_before_ped_ms: 3_000,
        transition_to_car_ms: 1_000,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuzzerTimings {
    /// Length of one crossing beep.
    pub pulse_ms: u32,
    /// Beep spacing when the crossing window is about to close.
    pub min_interval_ms: u32,
    /// Beep spacing at the start of the crossing window.
    pub max_interval_ms: u32,
    /// Confirmation double beep: end of first tone.
    pub confirm_first_off_ms: u32,
    /// Confirmation double beep: start of second tone.
    pub confirm_second_on_ms: u32,
    /// Confirmation double beep: end of second tone, back to idle.
    pub confirm_done_ms: u32,
}

impl BuzzerTimings {
    pub const DEFAULT: BuzzerTimings = BuzzerTimings {
        pulse_ms: 50,
        min_interval_ms: 100,
        max_interval_ms: 400,
        confirm_first_off_ms: 100,
        confirm_second_on_ms: 150,
        confirm_done_ms: 250,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub debounce_ms: u32,
    /// The violation sensor is only sampled this often.
    pub violation_check_interval_ms: u32,
    /// Pause between two scheduler iterations. Not used for any timing decision.
    pub poll_interval_ms: u32,
    pub flash_stage_ms: u32,
    pub display_refresh_ms: u32,
    /// Largest raw value the flow ADC produces.
    pub adc_full_scale: u16,
    pub phases: PhaseTimings,
    pub flow: FlowRanges,
    pub buzzer: BuzzerTimings,
}

impl Config {
    pub const DEFAULT: Config = Config {
        debounce_ms: 50,
        violation_check_interval_ms: 20,
        poll_interval_ms: 5,
        flash_stage_ms: 80,
        display_refresh_ms: 500,
        adc_full_scale: 4095,
        phases: PhaseTimings::DEFAULT,
        flow: FlowRanges::DEFAULT,
        buzzer: BuzzerTimings::DEFAULT,
    };
}

impl Default for Config {
    fn default() -> Self {
        Config::DEFAULT
    }
}
