#[cfg(feature = "log")]
use log::debug;
#[cfg(feature = "defmt")]
use defmt::debug;

use core::cell::Cell;
use core::future::Future;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::{self, raw::RawMutex};
use embassy_sync::mutex::{Mutex, MutexGuard};
use static_cell::StaticCell;

use crate::error::Error;
use crate::task::TaskId;

/// Binary lock shared by the LED tasks.
///
/// Whoever holds a [`LockGuard`] owns the LED line by convention. Nothing stops code without a
/// guard from driving the pin.
pub struct SharedLock<M: RawMutex> {
    mutex: Mutex<M, ()>,
    holder: blocking_mutex::Mutex<M, Cell<Option<TaskId>>>,
}

impl<M: RawMutex> SharedLock<M> {
    /// Creates the lock in the available state.
    pub const fn new() -> Self {
        Self {
            mutex: Mutex::new(()),
            holder: blocking_mutex::Mutex::new(Cell::new(None)),
        }
    }

    /// Places a new lock into `cell`. Returns `None` if the cell is already in use.
    pub fn create(cell: &'static StaticCell<Self>) -> Option<&'static Self> {
        cell.try_init(Self::new()).map(|lock| &*lock)
    }

    /// Takes the lock, giving up once the future returned by `timeout` completes.
    ///
    /// `timeout` is only called when the lock is not available right away.
    pub async fn try_acquire<F, T>(&self, task: TaskId, timeout: F) -> Result<LockGuard<'_, M>, Error>
    where
        F: FnOnce() -> T,
        T: Future<Output = ()>,
    {
        let guard = match self.mutex.try_lock() {
            Ok(guard) => guard,
            Err(_) => match select(self.mutex.lock(), timeout()).await {
                Either::First(guard) => guard,
                Either::Second(()) => return Err(Error::LockTimeout(task)),
            },
        };

        self.holder.lock(|holder| holder.set(Some(task)));
        debug!("{:?} took the lock", task);

        Ok(LockGuard {
            lock: self,
            task,
            _guard: guard,
        })
    }

    pub fn holder(&self) -> Option<TaskId> {
        self.holder.lock(|holder| holder.get())
    }
}

impl<M: RawMutex> Default for SharedLock<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Possession of the [`SharedLock`]. Dropping it releases the lock.
pub struct LockGuard<'a, M: RawMutex> {
    lock: &'a SharedLock<M>,
    task: TaskId,
    _guard: MutexGuard<'a, M, ()>,
}

impl<M: RawMutex> LockGuard<'_, M> {
    pub fn task(&self) -> TaskId {
        self.task
    }

    pub fn release(self) {
        drop(self);
    }
}

impl<M: RawMutex> Drop for LockGuard<'_, M> {
    fn drop(&mut self) {
        // Runs before the mutex guard field is dropped, so the holder is cleared first.
        self.lock.holder.lock(|holder| holder.set(None));
        debug!("{:?} released the lock", self.task);
    }
}
