#[cfg(feature = "log")]
use log::warn;
#[cfg(feature = "defmt")]
use defmt::warn;

#[cfg(test)]
use mockall::automock;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::digital::PinState;

use crate::config::{
    LED_OFF_HOLD_MS, LED_OFF_NO_LOCK_MESSAGE, LED_ON_HOLD_MS, LED_ON_NO_LOCK_MESSAGE, LOCK_TIMEOUT, RETRY_DELAY_MS,
};
use crate::lock::SharedLock;
use crate::task::TaskId;

#[cfg_attr(test, automock)]
pub trait Actions {
    #[allow(async_fn_in_trait)]
    async fn wait_ms(&self, duration: u64);

    #[allow(async_fn_in_trait)]
    async fn set_led(&self, level: PinState);

    #[allow(async_fn_in_trait)]
    async fn print(&self, line: &'static str);
}

/// Drives the LED to one level for as long as it holds the shared lock.
pub struct LedTask<'a, M: RawMutex, A: Actions> {
    task: TaskId,
    level: PinState,
    hold_ms: u64,
    no_lock_message: &'static str,
    lock: &'a SharedLock<M>,
    actions: A,
}

impl<'a, M: RawMutex, A: Actions> LedTask<'a, M, A> {
    pub fn led_on(lock: &'a SharedLock<M>, actions: A) -> Self {
        Self {
            task: TaskId::LedOn,
            level: PinState::High,
            hold_ms: LED_ON_HOLD_MS,
            no_lock_message: LED_ON_NO_LOCK_MESSAGE,
            lock,
            actions,
        }
    }

    pub fn led_off(lock: &'a SharedLock<M>, actions: A) -> Self {
        Self {
            task: TaskId::LedOff,
            level: PinState::Low,
            hold_ms: LED_OFF_HOLD_MS,
            no_lock_message: LED_OFF_NO_LOCK_MESSAGE,
            lock,
            actions,
        }
    }

    pub fn task(&self) -> TaskId {
        self.task
    }

    pub async fn run(&mut self) -> ! {
        loop {
            self.next().await;
        }
    }

    async fn next(&mut self) {
        let actions = &self.actions;

        match self.lock.try_acquire(self.task, || actions.wait_ms(LOCK_TIMEOUT.as_millis())).await {
            Ok(guard) => {
                actions.set_led(self.level).await;
                actions.wait_ms(self.hold_ms).await;
                guard.release();
            }
            Err(error) => {
                // The pin keeps whatever level it had.
                warn!("{:?}", error);
                actions.print(self.no_lock_message).await;
            }
        }

        actions.wait_ms(RETRY_DELAY_MS).await;
    }
}
