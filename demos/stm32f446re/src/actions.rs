use embassy_stm32::gpio::Level;
use embassy_time::Timer;

use led_mutex::{led_task, status_task, PinState};

use crate::board::{Console, Led};

#[derive(Copy, Clone)]
pub struct BoardActions {
    led: &'static Led,
    console: Option<&'static Console>,
}

impl BoardActions {
    pub fn new(led: &'static Led, console: Option<&'static Console>) -> Self {
        Self { led, console }
    }

    async fn write_line(&self, line: &str) {
        let Some(console) = self.console else {
            return;
        };

        // Best effort, a lost line is not worth stopping a task for.
        let mut uart = console.lock().await;
        let _ = uart.blocking_write(line.as_bytes());
        let _ = uart.blocking_write(b"\r\n");
    }
}

impl led_task::Actions for BoardActions {
    async fn wait_ms(&self, duration: u64) {
        Timer::after_millis(duration).await;
    }

    async fn set_led(&self, level: PinState) {
        // Note: embassy does not use PinState.
        let level = match level {
            PinState::High => Level::High,
            PinState::Low => Level::Low,
        };
        self.led.lock(|led| led.borrow_mut().set_level(level));
    }

    async fn print(&self, line: &'static str) {
        self.write_line(line).await;
    }
}

impl status_task::Actions for BoardActions {
    async fn wait_ms(&self, duration: u64) {
        Timer::after_millis(duration).await;
    }

    async fn print(&self, line: &'static str) {
        self.write_line(line).await;
    }
}
