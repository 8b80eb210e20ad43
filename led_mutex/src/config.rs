//! Fixed line parameters and timing constants.
//!
//! Nothing here is configurable at run time. The timing constants together with the task
//! priorities decide the LED duty cycle, so they must stay exactly as they are.

use embedded_hal::digital::PinState;

/// Scheduler tick rate. One tick is one millisecond.
pub const TICK_RATE_HZ: u32 = 1000;

/// How long an LED task waits for the shared lock.
pub const LOCK_TIMEOUT: Ticks = Ticks(100);

/// How long the LED-On task keeps the line high while holding the lock.
pub const LED_ON_HOLD_MS: u64 = 500;

/// How long the LED-Off task keeps the line low while holding the lock.
pub const LED_OFF_HOLD_MS: u64 = 1000;

/// Pause after every lock attempt, successful or not.
///
/// This is the window in which the other LED task can take the lock. Without it the task
/// that just released would immediately re-acquire and contention changes completely.
pub const RETRY_DELAY_MS: u64 = 100;

pub const STATUS_PERIOD_MS: u64 = 1000;

pub const LED_ON_NO_LOCK_MESSAGE: &str = "Task 1: No MUTEX Received";
pub const LED_OFF_NO_LOCK_MESSAGE: &str = "Task 2: No Mutex Received";
pub const STATUS_MESSAGE: &str = "Task 3: Status message";

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ticks(pub u32);

impl Ticks {
    /// Rounds down to whole ticks.
    pub const fn from_millis(ms: u32) -> Self {
        Ticks((ms as u64 * TICK_RATE_HZ as u64 / 1000) as u32)
    }

    pub const fn as_millis(self) -> u64 {
        self.0 as u64 * 1000 / TICK_RATE_HZ as u64
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

/// Output-only console used for diagnostics and the status heartbeat. No flow control.
pub const CONSOLE_SERIAL: SerialConfig = SerialConfig {
    baud_rate: 9600,
    data_bits: DataBits::Eight,
    parity: Parity::None,
    stop_bits: StopBits::One,
};

// PinState has no defmt::Format without embedded-hal's defmt-03 feature, so this one only
// derives Debug.
/// A push-pull output without pull resistors and without interrupt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GpioConfig {
    pub initial: PinState,
}

/// The LED line. Which physical pin that is, is up to the board.
pub const LED_GPIO: GpioConfig = GpioConfig {
    initial: PinState::Low,
};
