use chrono::{DateTime, Local, Timelike};

pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

// 12-hour wall clock line; midnight and noon both read "12".
pub fn format_clock<T: Timelike>(time: &T) -> String {
    let (is_pm, hour) = time.hour12();

    format!(
        "{:02}:{:02} {}",
        hour,
        time.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

pub struct ClockTicker<C: Clock = SystemClock> {
    clock: C,
    line: String,
}

impl ClockTicker {
    pub fn new() -> Self {
        ClockTicker::with_clock(SystemClock)
    }
}

impl Default for ClockTicker {
    fn default() -> Self {
        ClockTicker::new()
    }
}

impl<C: Clock> ClockTicker<C> {
    pub fn with_clock(clock: C) -> Self {
        let mut ticker = ClockTicker {
            clock,
            line: String::new(),
        };
        ticker.tick();
        ticker
    }

    pub fn tick(&mut self) -> DateTime<Local> {
        let now = self.clock.now();
        self.line = format_clock(&now);
        now
    }

    pub fn line(&self) -> &str {
        &self.line
    }
}
