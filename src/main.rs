#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::adc::Adc;
use embassy_stm32::gpio::Pin;
use embassy_stm32::usart::{self, Uart};
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_time::{Instant, Timer};
use log::{LevelFilter, info, warn};
use panic_halt as _;

use pedestrian_crossing::io::{AnalogSensor, normalize_raw};
use pedestrian_crossing::{Config, Controller, Millis, PeripheralError};

mod board;
mod console;

use board::{ACTIVE_LOWS, Board, BoardPins};
use console::{ConsoleDisplay, console_task, init_logger};

bind_interrupts!(struct Irqs {
    USART1 => usart::InterruptHandler<peripherals::USART1>;
});

const CONFIG: Config = Config::DEFAULT;

/// The last flow reading, refreshed once per loop iteration.
struct FlowSample {
    raw: u16,
    full_scale: u16,
}

impl AnalogSensor for FlowSample {
    fn read_normalized(&mut self) -> f64 {
        normalize_raw(self.raw, self.full_scale)
    }
}

fn now() -> Millis {
    // Truncation is the wrap the controller expects.
    Millis(Instant::now().as_millis() as u32)
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_stm32::init(Default::default());

    // The console carries both the log and the status text. Without it the
    // crossing runs silent and headless.
    let display = match Uart::new(
        p.USART1,
        p.PA10,
        p.PA9,
        Irqs,
        p.DMA1_CH4,
        p.DMA1_CH5,
        usart::Config::default(), // 115200 baud
    ) {
        Ok(usart) => match spawner.spawn(console_task(usart)) {
            Ok(()) => {
                init_logger(LevelFilter::Info);
                Ok(ConsoleDisplay)
            }
            Err(_) => Err(PeripheralError::ConsoleUnavailable),
        },
        Err(_) => Err(PeripheralError::DisplayUnavailable),
    };

    let mut adc = Adc::new(p.ADC1);
    let mut flow_pin = p.PA1;

    let mut board = Board::new(BoardPins {
        car_red: p.PE1.degrade(),
        car_amber: p.PB9.degrade(),
        car_green: p.PB7.degrade(),
        ped_red: p.PB6.degrade(),
        ped_green: p.PB8.degrade(),
        flash_red: p.PD12.degrade(),
        flash_green: p.PD13.degrade(),
        flash_blue: p.PD14.degrade(),
        beeper: p.PE0.degrade(),
        button: p.PE11.degrade(),
        violation_sensor: p.PE10.degrade(),
    });

    let sensor = FlowSample {
        raw: 0,
        full_scale: CONFIG.adc_full_scale,
    };
    let mut controller = Controller::new(CONFIG, now(), board.read_inputs(), sensor, display)
        .with_active_lows(ACTIVE_LOWS);
    if !controller.display().is_available() {
        warn!("status display unavailable");
    }
    info!("poll interval {} ms", CONFIG.poll_interval_ms);

    loop {
        controller.sensor_mut().raw = adc.read(&mut flow_pin).await;

        let now = now();
        let levels = board.read_inputs();
        let image = controller.tick(now, levels);
        board.apply(image);

        Timer::after_millis(u64::from(CONFIG.poll_interval_ms)).await;
    }
}
