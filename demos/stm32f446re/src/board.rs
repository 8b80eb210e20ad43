use core::cell::RefCell;

use defmt::{error, info};
use embassy_executor::{SendSpawner, Spawner};
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::mode::Blocking;
use embassy_stm32::peripherals;
use embassy_stm32::usart::{self, UartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::{blocking_mutex, mutex};
use static_cell::StaticCell;

use led_mutex::config::{DataBits, GpioConfig, Parity, SerialConfig, StopBits};
use led_mutex::{Board, Error, PinState, SharedLock, TaskId};

use crate::actions::BoardActions;

pub type Lock = SharedLock<CriticalSectionRawMutex>;
pub type Led = blocking_mutex::Mutex<CriticalSectionRawMutex, RefCell<Output<'static>>>;
pub type Console = mutex::Mutex<CriticalSectionRawMutex, UartTx<'static, Blocking>>;

static LOCK: StaticCell<Lock> = StaticCell::new();
static LED: StaticCell<Led> = StaticCell::new();
static CONSOLE: StaticCell<Console> = StaticCell::new();

/// NUCLEO-F446RE: LD2 on PA5, console on USART2 TX (PA2) through the ST-LINK.
///
/// One executor per task priority, see `main`.
pub struct Nucleo {
    led_pin: Option<peripherals::PA5>,
    uart_instance: Option<peripherals::USART2>,
    tx_pin: Option<peripherals::PA2>,
    led: Option<&'static Led>,
    console: Option<&'static Console>,
    low: Spawner,
    medium: SendSpawner,
    high: SendSpawner,
}

impl Nucleo {
    pub fn new(
        led_pin: peripherals::PA5,
        uart_instance: peripherals::USART2,
        tx_pin: peripherals::PA2,
        low: Spawner,
        medium: SendSpawner,
        high: SendSpawner,
    ) -> Self {
        Self {
            led_pin: Some(led_pin),
            uart_instance: Some(uart_instance),
            tx_pin: Some(tx_pin),
            led: None,
            console: None,
            low,
            medium,
            high,
        }
    }
}

impl Board for Nucleo {
    type Mutex = CriticalSectionRawMutex;

    fn configure_gpio(&mut self, config: &GpioConfig) {
        let Some(pin) = self.led_pin.take() else {
            return;
        };

        // Push-pull output without pulls and without EXTI.
        let initial = match config.initial {
            PinState::High => Level::High,
            PinState::Low => Level::Low,
        };
        let output = Output::new(pin, initial, Speed::Low);
        self.led = Some(LED.init(blocking_mutex::Mutex::new(RefCell::new(output))));
        info!("LED on PA5");
    }

    fn configure_serial(&mut self, config: &SerialConfig) {
        let (Some(uart_instance), Some(tx_pin)) = (self.uart_instance.take(), self.tx_pin.take()) else {
            return;
        };

        let mut uart_config = usart::Config::default();
        uart_config.baudrate = config.baud_rate;
        uart_config.data_bits = match config.data_bits {
            DataBits::Seven => usart::DataBits::DataBits7,
            DataBits::Eight => usart::DataBits::DataBits8,
        };
        uart_config.stop_bits = match config.stop_bits {
            StopBits::One => usart::StopBits::STOP1,
            StopBits::Two => usart::StopBits::STOP2,
        };
        uart_config.parity = match config.parity {
            Parity::None => usart::Parity::ParityNone,
            Parity::Even => usart::Parity::ParityEven,
            Parity::Odd => usart::Parity::ParityOdd,
        };
        // Without RTS/CTS pins the peripheral runs without flow control.

        match UartTx::new_blocking(uart_instance, tx_pin, uart_config) {
            Ok(uart) => {
                self.console = Some(CONSOLE.init(mutex::Mutex::new(uart)));
                info!("console on USART2 at {} baud", config.baud_rate);
            }
            Err(e) => error!("console setup failed: {:?}", e),
        }
    }

    fn create_lock(&mut self) -> Option<&'static Lock> {
        SharedLock::create(&LOCK)
    }

    fn spawn(&mut self, task: TaskId, lock: &'static Lock) -> Result<(), Error> {
        let led = self.led.ok_or(Error::Spawn(task))?;
        let actions = BoardActions::new(led, self.console);

        // Thread mode for the lowest priority, interrupt executors above it.
        let result = match task {
            TaskId::LedOn => self.low.spawn(crate::led_on(lock, actions)),
            TaskId::LedOff => self.medium.spawn(crate::led_off(lock, actions)),
            TaskId::Status => self.high.spawn(crate::status(actions)),
        };
        result.map_err(|_| Error::Spawn(task))
    }
}
