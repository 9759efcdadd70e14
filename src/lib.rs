/*
 * Controller logic for a pedestrian crossing.
 *
 * Everything in this crate is a polled state machine. Nothing blocks and
 * nothing owns a timer: the caller samples a millisecond clock once per loop
 * iteration and hands that single timestamp to `Controller::tick`, which
 * drives every component in a fixed order. Keeping all time and I/O outside
 * keeps the logic testable on the host; the firmware binary is only a thin
 * shim that moves pin levels in and out.
 */

#![cfg_attr(not(test), no_std)]

pub mod buzzer;
pub mod clock;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod display;
pub mod error;
pub mod flash;
pub mod flow;
pub mod io;
pub mod output_image;
pub mod trafficlight;
pub mod violation;

pub use clock::Millis;
pub use config::Config;
pub use controller::{Controller, InputLevels};
pub use error::PeripheralError;
pub use trafficlight::{Phase, TrafficLight};
