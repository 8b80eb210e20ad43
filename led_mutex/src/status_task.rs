#[cfg(feature = "log")]
use log::debug;
#[cfg(feature = "defmt")]
use defmt::debug;

#[cfg(test)]
use mockall::automock;

use crate::config::{STATUS_MESSAGE, STATUS_PERIOD_MS};

#[cfg_attr(test, automock)]
pub trait Actions {
    #[allow(async_fn_in_trait)]
    async fn wait_ms(&self, duration: u64);

    #[allow(async_fn_in_trait)]
    async fn print(&self, line: &'static str);
}

/// Heartbeat on the console. Never touches the lock or the LED.
pub struct StatusTask<A: Actions> {
    actions: A,
}

impl<A: Actions> StatusTask<A> {
    pub fn new(actions: A) -> Self {
        Self { actions }
    }

    pub async fn run(&mut self) -> ! {
        loop {
            self.next().await;
        }
    }

    async fn next(&mut self) {
        debug!("status");
        self.actions.print(STATUS_MESSAGE).await;
        self.actions.wait_ms(STATUS_PERIOD_MS).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::Sequence;
    use tokio;

    #[tokio::test]
    async fn prints_then_waits_one_second() {
        let mut actions = MockActions::new();
        let mut seq = Sequence::new();
        for _ in 0..3 {
            actions.expect_print()
                .times(1)
                .in_sequence(&mut seq)
                .withf(|line| line == "Task 3: Status message")
                .returning(|_| ());
            actions.expect_wait_ms()
                .times(1)
                .in_sequence(&mut seq)
                .withf(|duration| *duration == 1000)
                .returning(|_| ());
        }

        let mut task = StatusTask::new(actions);
        for _ in 0..3 {
            task.next().await;
        }
    }
}
