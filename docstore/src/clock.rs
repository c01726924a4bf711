use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::{interval_at, Instant};

/// Source of wall clock time, Unix seconds (UTC)
pub trait Clock {
    fn now(&self) -> i64;
}

/// Clock that can be moved by hand
pub trait SetableClock: Clock {
    fn set(&self, time: i64);
    fn add_seconds(&self, seconds: i64);
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs() as i64)
}

/// Reads the system clock on every call
#[derive(Default, Debug, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        SystemClock
    }
}

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        unix_now()
    }
}

/// System clock cached with one second resolution.
///
/// The cached value only moves while [`CoarseClock::run`] is being polled.
pub struct CoarseClock {
    seconds: AtomicI64,
}

impl CoarseClock {
    pub fn new() -> Self {
        debug!("Creating coarse clock");
        CoarseClock {
            seconds: AtomicI64::new(unix_now()),
        }
    }

    pub async fn run(&self) {
        let start = Instant::now();
        let mut interval = interval_at(start, Duration::from_secs(1));
        loop {
            interval.tick().await;
            self.seconds.store(unix_now(), Ordering::Release);
            trace!("Clock tick: {}", self.now());
        }
    }
}

impl Default for CoarseClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for CoarseClock {
    fn now(&self) -> i64 {
        self.seconds.load(Ordering::Acquire)
    }
}

/// Clock which only moves when told to
pub struct ManualClock {
    current_time: AtomicI64,
}

impl ManualClock {
    pub fn new(time: i64) -> Self {
        ManualClock {
            current_time: AtomicI64::new(time),
        }
    }

    /// Manual clock frozen at the current system time
    pub fn starting_now() -> Self {
        Self::new(unix_now())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_now()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.current_time.load(Ordering::Acquire)
    }
}

impl SetableClock for ManualClock {
    fn set(&self, time: i64) {
        self.current_time.store(time, Ordering::Release)
    }

    fn add_seconds(&self, seconds: i64) {
        self.current_time.fetch_add(seconds, Ordering::AcqRel);
    }
}
