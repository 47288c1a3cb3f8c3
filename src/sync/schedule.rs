use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

/// Wall-clock trigger: fixed-interval ticks, filtered to publishing windows.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Inclusive hour ranges.
    windows: Vec<(u32, u32)>,
    minute_from: u32,
    minute_until: u32,
    interval_minutes: u32,
}

impl Schedule {
    pub fn new(
        windows: Vec<(u32, u32)>,
        minute_from: u32,
        minute_until: u32,
        interval_minutes: u32,
    ) -> Self {
        Self {
            windows,
            minute_from,
            minute_until,
            interval_minutes: interval_minutes.max(1),
        }
    }

    /// A run is due when the hour sits in a window and the minute is at or
    /// past `minute_from` or before `minute_until`.
    pub fn is_due(&self, time: NaiveTime) -> bool {
        let hour = time.hour();
        let minute = time.minute();

        let in_window = self
            .windows
            .iter()
            .any(|&(start, end)| hour >= start && hour <= end);

        in_window && (minute >= self.minute_from || minute < self.minute_until)
    }

    /// Next tick strictly after `now`, aligned to the interval from midnight.
    pub fn next_tick(&self, now: NaiveDateTime) -> NaiveDateTime {
        let minutes = now.hour() * 60 + now.minute();
        let next = (minutes / self.interval_minutes + 1) * self.interval_minutes;

        now.date().and_time(NaiveTime::MIN) + Duration::minutes(next as i64)
    }
}
