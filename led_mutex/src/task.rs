/// Scheduling precedence. A larger value wins.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Priority {
    LedOn = 1,
    LedOff = 2,
    Status = 3,
}

impl Priority {
    pub const fn value(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskId {
    LedOn,
    LedOff,
    Status,
}

impl TaskId {
    pub const fn name(self) -> &'static str {
        match self {
            TaskId::LedOn => "Task 1",
            TaskId::LedOff => "Task 2",
            TaskId::Status => "Task 3",
        }
    }

    pub const fn priority(self) -> Priority {
        match self {
            TaskId::LedOn => Priority::LedOn,
            TaskId::LedOff => Priority::LedOff,
            TaskId::Status => Priority::Status,
        }
    }
}

/// Creation order at start-up.
pub const TASKS: [TaskId; 3] = [TaskId::LedOn, TaskId::LedOff, TaskId::Status];
