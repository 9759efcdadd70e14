/*
 * The device boundary.
 *
 * The controller never touches a pin. Outputs are collected in an
 * `OutputImage` and pushed to the hardware by the caller; inputs arrive as
 * plain levels in `InputLevels`. The few peripherals that are read on demand
 * or that may be missing are described by the traits below, so the firmware
 * can supply the real thing and tests can supply a constant.
 */

use crate::display::StatusMessage;
use crate::error::PeripheralError;

/// An analog input scaled to `0.0..=1.0`.
pub trait AnalogSensor {
    fn read_normalized(&mut self) -> f64;
}

/// Something that can show the two-line status text to pedestrians.
///
/// Rendering is best-effort. An `Err` makes the controller stop using the
/// sink for the rest of the run.
pub trait DisplaySink {
    fn render(&mut self, message: &StatusMessage) -> Result<(), PeripheralError>;
}

/// Stand-in sink for boards without a display.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDisplay;

impl DisplaySink for NoDisplay {
    fn render(&mut self, _message: &StatusMessage) -> Result<(), PeripheralError> {
        Ok(())
    }
}

/// A sensor that always reports the same value. Handy on a bench without the
/// potentiometer fitted, and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedSensor(pub f64);

impl AnalogSensor for FixedSensor {
    fn read_normalized(&mut self) -> f64 {
        clamp_unit(self.0)
    }
}

/// Scales a raw ADC sample to `0.0..=1.0`.
pub fn normalize_raw(raw: u16, full_scale: u16) -> f64 {
    if full_scale == 0 {
        return 0.0;
    }
    clamp_unit(f64::from(raw) / f64::from(full_scale))
}

/// Clamps into `0.0..=1.0`; NaN reads as no flow.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_samples_are_scaled_and_clamped() {
        assert_eq!(normalize_raw(0, 4095), 0.0);
        assert_eq!(normalize_raw(4095, 4095), 1.0);
        assert_eq!(normalize_raw(5000, 4095), 1.0);
        assert_eq!(normalize_raw(100, 0), 0.0);
        assert!((normalize_raw(2048, 4096) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(clamp_unit(-0.5), 0.0);
        assert_eq!(clamp_unit(1.5), 1.0);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(FixedSensor(7.0).read_normalized(), 1.0);
    }
}
