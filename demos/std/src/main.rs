use std::cell::Cell;
use std::rc::Rc;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use log::{info, warn};
use tokio::task::{spawn_local, LocalSet};
use tokio::time::{sleep, Duration};

use led_mutex::config::{GpioConfig, SerialConfig};
use led_mutex::{led_task, status_task, Board, Error, LedTask, PinState, SharedLock, StatusTask, TaskId};

type Lock = SharedLock<CriticalSectionRawMutex>;

#[derive(Clone)]
struct SimActions {
    pin: Rc<Cell<PinState>>,
}

impl led_task::Actions for SimActions {
    async fn wait_ms(&self, duration: u64) {
        sleep(Duration::from_millis(duration)).await;
    }

    async fn set_led(&self, level: PinState) {
        let previous = self.pin.replace(level);
        if previous != level {
            info!("GPIO2 {:?} -> {:?}", previous, level);
        }
    }

    async fn print(&self, line: &'static str) {
        println!("{}", line);
    }
}

impl status_task::Actions for SimActions {
    async fn wait_ms(&self, duration: u64) {
        sleep(Duration::from_millis(duration)).await;
    }

    async fn print(&self, line: &'static str) {
        println!("{}", line);
    }
}

/// Simulated target. The LED is a `Cell` and the console is stdout.
struct SimBoard {
    pin: Rc<Cell<PinState>>,
}

impl Board for SimBoard {
    type Mutex = CriticalSectionRawMutex;

    fn configure_gpio(&mut self, config: &GpioConfig) {
        info!("GPIO2: {:?}", config);
        self.pin.set(config.initial);
    }

    fn configure_serial(&mut self, config: &SerialConfig) {
        info!("console: {:?}", config);
    }

    fn create_lock(&mut self) -> Option<&'static Lock> {
        Some(Box::leak(Box::new(SharedLock::new())))
    }

    fn spawn(&mut self, task: TaskId, lock: &'static Lock) -> Result<(), Error> {
        // tokio schedules the local set round robin, priorities are only reported.
        info!("{} would run at priority {}", task.name(), task.priority().value());

        let actions = SimActions { pin: self.pin.clone() };
        match task {
            TaskId::LedOn => spawn_local(async move {
                let mut led_on = LedTask::led_on(lock, actions);
                led_on.run().await
            }),
            TaskId::LedOff => spawn_local(async move {
                let mut led_off = LedTask::led_off(lock, actions);
                led_off.run().await
            }),
            TaskId::Status => spawn_local(async move {
                let mut status = StatusTask::new(actions);
                status.run().await
            }),
        };
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    info!("led-mutex on the host, Ctrl-C to stop");

    let local = LocalSet::new();
    local.run_until(async {
        let mut board = SimBoard {
            pin: Rc::new(Cell::new(PinState::Low)),
        };

        if let Err(error) = led_mutex::start(&mut board) {
            warn!("start-up failed: {:?}", error);
        }

        // Idle forever, the tasks do the work.
        std::future::pending::<()>().await;
    }).await;
}
