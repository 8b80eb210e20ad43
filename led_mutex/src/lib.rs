#![cfg_attr(not(test), no_std)]

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Features 'defmt' and 'log' cannot be enabled at the same time.");
#[cfg(not(any(feature = "defmt", feature = "log")))]
compile_error!("One of the features 'defmt' or 'log' must be enabled.");

pub mod config;
pub mod error;
pub mod led_task;
pub mod lock;
pub mod startup;
pub mod status_task;
pub mod task;

pub use embedded_hal::digital::PinState;

pub use error::Error;
pub use led_task::LedTask;
pub use lock::{LockGuard, SharedLock};
pub use startup::{start, Board};
pub use status_task::StatusTask;
pub use task::{Priority, TaskId, TASKS};
