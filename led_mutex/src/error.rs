use crate::task::TaskId;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The lock was not received within the acquire timeout.
    LockTimeout(TaskId),
    /// The shared lock could not be allocated at start-up.
    LockCreation,
    /// The scheduler refused to take the task.
    Spawn(TaskId),
}
