/*
 * Text for the pedestrian status display.
 *
 * The display is optional. If it fails to start, or a later write fails, it
 * is dropped for good and the controller carries on without it; nothing else
 * depends on what the display shows.
 */

use core::fmt;

use log::warn;

use crate::clock::Millis;
use crate::error::PeripheralError;
use crate::io::DisplaySink;
use crate::trafficlight::{Phase, TrafficLight};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    Idle,
    Wait { remaining_s: u32 },
    Cross { remaining_s: u32 },
}

impl StatusMessage {
    /// What to show for the current phase. The amber phases keep whatever the
    /// screen already shows.
    pub fn for_phase(traffic: &TrafficLight, now: Millis) -> Option<StatusMessage> {
        match traffic.phase() {
            Phase::CarGreen => Some(StatusMessage::Idle),
            Phase::WaitBeforePed => Some(StatusMessage::Wait {
                remaining_s: traffic.remaining_wait_ms(now) / 1000,
            }),
            Phase::PedGreen => Some(StatusMessage::Cross {
                remaining_s: traffic.remaining_ped_ms(now) / 1000,
            }),
            Phase::YellowBeforePed | Phase::TransitionToCar => None,
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::Idle => write!(f, "Press button\nto cross"),
            StatusMessage::Wait { remaining_s } => {
                write!(f, "Wait to cross\nOpens in {remaining_s}s")
            }
            StatusMessage::Cross { remaining_s } => {
                write!(f, "Safe to cross\nTime left {remaining_s}s")
            }
        }
    }
}

pub struct StatusDisplay<D> {
    sink: Option<D>,
    refresh_ms: u32,
    last_update_at: Millis,
}

impl<D: DisplaySink> StatusDisplay<D> {
    /// Takes the outcome of bringing the display up. On success the idle
    /// message is shown straight away.
    pub fn new(sink: Result<D, PeripheralError>, refresh_ms: u32, now: Millis) -> Self {
        let sink = match sink {
            Ok(sink) => Some(sink),
            Err(error) => {
                warn!("{error}, running without display");
                None
            }
        };

        let mut display = StatusDisplay {
            sink,
            refresh_ms,
            last_update_at: now,
        };
        display.render(&StatusMessage::Idle);
        display
    }

    pub fn headless(refresh_ms: u32, now: Millis) -> Self {
        StatusDisplay {
            sink: None,
            refresh_ms,
            last_update_at: now,
        }
    }

    pub fn update(&mut self, now: Millis, traffic: &TrafficLight) {
        if self.sink.is_none() || !now.has_elapsed(self.last_update_at, self.refresh_ms) {
            return;
        }
        self.last_update_at = now;

        if let Some(message) = StatusMessage::for_phase(traffic, now) {
            self.render(&message);
        }
    }

    fn render(&mut self, message: &StatusMessage) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        if let Err(error) = sink.render(message) {
            warn!("{error}, display disabled");
            self.sink = None;
        }
    }

    pub fn is_available(&self) -> bool {
        self.sink.is_some()
    }

    pub fn sink(&self) -> Option<&D> {
        self.sink.as_ref()
    }
}
