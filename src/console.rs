/*
 * The serial console.
 *
 * Log records and the pedestrian status text are formatted into fixed-size
 * lines and queued for a task that owns the USART. Queuing never waits: if the
 * queue is full the line is dropped, so a slow or unplugged terminal cannot
 * hold up the lights.
 */

use core::fmt::Write;

use embassy_stm32::mode::Async;
use embassy_stm32::usart::Uart;
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel};
use heapless::String;
use log::{LevelFilter, Log, Metadata, Record};

use pedestrian_crossing::PeripheralError;
use pedestrian_crossing::display::StatusMessage;
use pedestrian_crossing::io::DisplaySink;

pub const LINE_CAPACITY: usize = 96;
pub const CONSOLE_DEPTH: usize = 8;

pub type Line = String<LINE_CAPACITY>;

static CONSOLE: Channel<ThreadModeRawMutex, Line, CONSOLE_DEPTH> = Channel::new();

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut line = Line::new();
        // Overlong records are cut at the line capacity.
        let _ = write!(line, "{:<5} {}\r\n", record.level(), record.args());
        let _ = CONSOLE.try_send(line);
    }

    fn flush(&self) {}
}

pub fn init_logger(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

#[embassy_executor::task]
pub async fn console_task(mut usart: Uart<'static, Async>) -> ! {
    loop {
        let line = CONSOLE.receive().await;
        // Nobody to report a failed console write to.
        let _ = usart.write(line.as_bytes()).await;
    }
}

/// Shows the status text on the serial terminal, framed so it stands out
/// from log lines.
pub struct ConsoleDisplay;

impl DisplaySink for ConsoleDisplay {
    fn render(&mut self, message: &StatusMessage) -> Result<(), PeripheralError> {
        let mut line = Line::new();
        write!(line, "[{message}]\r\n").map_err(|_| PeripheralError::DisplayWrite)?;
        let _ = CONSOLE.try_send(line);
        Ok(())
    }
}
