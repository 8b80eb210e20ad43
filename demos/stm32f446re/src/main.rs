//! Two LED tasks share the LD2 line through one lock, a third prints a heartbeat.

#![no_main]
#![no_std]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::{Executor, InterruptExecutor};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use led_mutex::{LedTask, StatusTask};

mod actions;
mod board;
use actions::BoardActions;
use board::{Lock, Nucleo};

// NVIC: a lower number preempts a higher one.
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_MEDIUM: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_LOW: StaticCell<Executor> = StaticCell::new();

#[interrupt]
unsafe fn UART4() {
    EXECUTOR_HIGH.on_interrupt()
}

#[interrupt]
unsafe fn UART5() {
    EXECUTOR_MEDIUM.on_interrupt()
}

#[entry]
fn main() -> ! {
    let peripherals = embassy_stm32::init(Default::default());
    info!("led-mutex on NUCLEO-F446RE");

    // Status task.
    interrupt::UART4.set_priority(Priority::P6);
    let high = EXECUTOR_HIGH.start(interrupt::UART4);

    // LED-Off task.
    interrupt::UART5.set_priority(Priority::P7);
    let medium = EXECUTOR_MEDIUM.start(interrupt::UART5);

    // LED-On task runs in thread mode.
    let executor = EXECUTOR_LOW.init(Executor::new());
    executor.run(|low| {
        let mut board = Nucleo::new(peripherals.PA5, peripherals.USART2, peripherals.PA2, low, medium, high);
        if let Err(error) = led_mutex::start(&mut board) {
            // Nothing was spawned, the thread executor just idles.
            warn!("start-up failed: {:?}", error);
        }
    })
}

#[embassy_executor::task]
async fn led_on(lock: &'static Lock, actions: BoardActions) -> ! {
    let mut led_on = LedTask::led_on(lock, actions);
    led_on.run().await
}

#[embassy_executor::task]
async fn led_off(lock: &'static Lock, actions: BoardActions) -> ! {
    let mut led_off = LedTask::led_off(lock, actions);
    led_off.run().await
}

#[embassy_executor::task]
async fn status(actions: BoardActions) -> ! {
    let mut status = StatusTask::new(actions);
    status.run().await
}
