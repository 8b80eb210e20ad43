use std::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use led_mutex::{led_task, status_task, LedTask, PinState, SharedLock, StatusTask, TaskId};
use tokio::time::{sleep, Duration, Instant};

type Lock = SharedLock<CriticalSectionRawMutex>;

#[derive(Debug, Copy, Clone, PartialEq)]
enum Event {
    SetLed { task: TaskId, level: PinState, holder: Option<TaskId> },
    Print { task: TaskId, line: &'static str },
}

struct Recorder {
    start: Instant,
    events: RefCell<Vec<(u64, Event)>>,
}

impl Recorder {
    fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            start: Instant::now(),
            events: RefCell::new(Vec::new()),
        }
    }

    fn push(&self, event: Event) {
        let at_ms = (Instant::now() - self.start).as_millis() as u64;
        self.events.borrow_mut().push((at_ms, event));
    }

    fn events(&self) -> Vec<(u64, Event)> {
        self.events.borrow().clone()
    }
}

struct TestActions<'a> {
    task: TaskId,
    lock: &'a Lock,
    recorder: &'a Recorder,
}

impl led_task::Actions for TestActions<'_> {
    async fn wait_ms(&self, duration: u64) {
        sleep(Duration::from_millis(duration)).await;
    }

    async fn set_led(&self, level: PinState) {
        self.recorder.push(Event::SetLed { task: self.task, level, holder: self.lock.holder() });
    }

    async fn print(&self, line: &'static str) {
        self.recorder.push(Event::Print { task: self.task, line });
    }
}

impl status_task::Actions for TestActions<'_> {
    async fn wait_ms(&self, duration: u64) {
        sleep(Duration::from_millis(duration)).await;
    }

    async fn print(&self, line: &'static str) {
        self.recorder.push(Event::Print { task: self.task, line });
    }
}

/// Runs all three tasks for `duration` of (paused) tokio time.
async fn run_for(lock: &Lock, recorder: &Recorder, duration: Duration) {
    let actions = |task| TestActions { task, lock, recorder };
    let mut led_on = LedTask::led_on(lock, actions(TaskId::LedOn));
    let mut led_off = LedTask::led_off(lock, actions(TaskId::LedOff));
    let mut status = StatusTask::new(actions(TaskId::Status));

    tokio::select! {
        biased;
        _ = led_on.run() => {}
        _ = led_off.run() => {}
        _ = status.run() => {}
        _ = sleep(duration) => {}
    }
}

fn status_times(events: &[(u64, Event)]) -> Vec<u64> {
    events.iter()
        .filter(|(_, event)| matches!(event, Event::Print { task: TaskId::Status, .. }))
        .map(|(at_ms, _)| *at_ms)
        .collect()
}

#[tokio::test(start_paused = true)]
async fn led_is_only_driven_by_the_lock_holder() {
    let lock = Lock::new();
    let recorder = Recorder::new();
    run_for(&lock, &recorder, Duration::from_millis(9_950)).await;
    let events = recorder.events();

    let led_events: Vec<(u64, TaskId, PinState, Option<TaskId>)> = events.iter()
        .filter_map(|(at_ms, event)| match event {
            Event::SetLed { task, level, holder } => Some((*at_ms, *task, *level, *holder)),
            _ => None,
        })
        .collect();
    assert!(!led_events.is_empty());

    for (at_ms, task, level, holder) in &led_events {
        assert_eq!(*holder, Some(*task), "at {} ms", at_ms);
        let expected = match task {
            TaskId::LedOn => PinState::High,
            TaskId::LedOff => PinState::Low,
            TaskId::Status => panic!("status task touched the LED"),
        };
        assert_eq!(*level, expected, "at {} ms", at_ms);
    }

    // The level stays put for the whole hold of the task that set it.
    for pair in led_events.windows(2) {
        let (at_ms, task, _, _) = pair[0];
        let (next_ms, _, _, _) = pair[1];
        let hold_ms = match task {
            TaskId::LedOn => 500,
            _ => 1000,
        };
        assert!(next_ms >= at_ms + hold_ms, "{:?} at {} ms overridden at {} ms", task, at_ms, next_ms);
    }
}

#[tokio::test(start_paused = true)]
async fn exactly_one_led_task_wins_the_free_lock() {
    let lock = Lock::new();
    let recorder = Recorder::new();
    run_for(&lock, &recorder, Duration::from_millis(450)).await;
    let events = recorder.events();

    let at_start: Vec<&Event> = events.iter()
        .filter(|(at_ms, event)| *at_ms == 0 && matches!(event, Event::SetLed { .. }))
        .map(|(_, event)| event)
        .collect();
    assert_eq!(at_start.len(), 1);

    // The loser times out after 100 ms and retries every 200 ms while the winner holds the pin.
    let misses: Vec<u64> = events.iter()
        .filter(|(_, event)| matches!(event, Event::Print { task: TaskId::LedOn | TaskId::LedOff, .. }))
        .map(|(at_ms, _)| *at_ms)
        .collect();
    assert_eq!(misses, [100, 300]);
    assert!(events.iter().any(|(_, event)| *event == Event::Print { task: TaskId::LedOff, line: "Task 2: No Mutex Received" }));
}

#[tokio::test(start_paused = true)]
async fn status_period_is_one_second() {
    let lock = Lock::new();
    let recorder = Recorder::new();
    run_for(&lock, &recorder, Duration::from_millis(4_500)).await;

    assert_eq!(status_times(&recorder.events()), [0, 1000, 2000, 3000, 4000]);
}

#[tokio::test(start_paused = true)]
async fn unavailable_lock_only_produces_diagnostics() {
    let lock = Lock::new();
    let _guard = lock.try_acquire(TaskId::Status, core::future::pending::<()>).await.unwrap();
    let recorder = Recorder::new();
    run_for(&lock, &recorder, Duration::from_millis(1_950)).await;
    let events = recorder.events();

    assert!(!events.iter().any(|(_, event)| matches!(event, Event::SetLed { .. })));

    for (task, line) in [(TaskId::LedOn, "Task 1: No MUTEX Received"), (TaskId::LedOff, "Task 2: No Mutex Received")] {
        let misses: Vec<u64> = events.iter()
            .filter(|(_, event)| *event == Event::Print { task, line })
            .map(|(at_ms, _)| *at_ms)
            .collect();
        assert_eq!(misses, [100, 300, 500, 700, 900, 1100, 1300, 1500, 1700, 1900], "{:?}", task);
    }

    // Contention on the lock does not slow the heartbeat down.
    assert_eq!(status_times(&events), [0, 1000]);
}
