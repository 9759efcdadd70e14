use thiserror::Error;

/// Failures of optional peripherals.
///
/// None of these stop the controller. The peripheral that failed is dropped
/// for the rest of the run and the lights keep cycling without it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralError {
    #[error("display did not respond during initialisation")]
    DisplayUnavailable,
    #[error("display write failed")]
    DisplayWrite,
    #[error("console serial port could not be opened")]
    ConsoleUnavailable,
}
