#[cfg(feature = "log")]
use log::{info, warn};
#[cfg(feature = "defmt")]
use defmt::{info, warn};

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::config::{GpioConfig, SerialConfig, CONSOLE_SERIAL, LED_GPIO};
use crate::error::Error;
use crate::lock::SharedLock;
use crate::task::{TaskId, TASKS};

/// Hardware and scheduler of the target.
pub trait Board {
    type Mutex: RawMutex + 'static;

    fn configure_gpio(&mut self, config: &GpioConfig);

    fn configure_serial(&mut self, config: &SerialConfig);

    /// Returns `None` if there is no room for the lock.
    fn create_lock(&mut self) -> Option<&'static SharedLock<Self::Mutex>>;

    /// Hands `task` to the scheduler at `task.priority()`.
    fn spawn(&mut self, task: TaskId, lock: &'static SharedLock<Self::Mutex>) -> Result<(), Error>;
}

/// Configures the hardware, creates the lock and spawns all tasks.
///
/// Without a lock no task is spawned at all. The caller is expected to idle afterwards.
pub fn start<B: Board>(board: &mut B) -> Result<&'static SharedLock<B::Mutex>, Error> {
    board.configure_gpio(&LED_GPIO);
    board.configure_serial(&CONSOLE_SERIAL);

    let Some(lock) = board.create_lock() else {
        warn!("no shared lock, nothing to run");
        return Err(Error::LockCreation);
    };

    for task in TASKS {
        info!("spawning {} at priority {}", task.name(), task.priority().value());
        board.spawn(task, lock)?;
    }

    Ok(lock)
}
