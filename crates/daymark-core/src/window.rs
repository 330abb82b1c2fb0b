use time::{OffsetDateTime, Time};

use crate::error::Error;

/// A wall-clock time of day parsed from strict `HH:MM` input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    pub hour: u8,
    pub minute: u8,
}

impl Clock {
    pub fn parse(value: &str) -> Result<Self, Error> {
        let mut parts = value.trim().split(':');
        let (Some(hour), Some(minute), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(Error::Clock);
        };
        let hour: u8 = hour.parse().map_err(|_| Error::Clock)?;
        let minute: u8 = minute.parse().map_err(|_| Error::Clock)?;
        if hour > 23 || minute > 59 {
            return Err(Error::Clock);
        }
        Ok(Self { hour, minute })
    }
}

/// A working window on a single calendar day. Invariant: `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: OffsetDateTime,
    end: OffsetDateTime,
}

impl TimeWindow {
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self, Error> {
        if end <= start {
            return Err(Error::Window);
        }
        Ok(Self { start, end })
    }

    /// Combine `day`'s calendar date and UTC offset with two wall clocks.
    pub fn for_day(day: OffsetDateTime, start: Clock, end: Clock) -> Result<Self, Error> {
        let at = |clock: Clock| {
            Time::from_hms(clock.hour, clock.minute, 0)
                .map(|t| day.replace_time(t))
                .map_err(|_| Error::Clock)
        };
        Self::new(at(start)?, at(end)?)
    }

    pub fn start(&self) -> OffsetDateTime {
        self.start
    }

    pub fn end(&self) -> OffsetDateTime {
        self.end
    }

    /// Whole seconds spanned by the window.
    pub fn total_seconds(&self) -> i64 {
        (self.end - self.start).whole_seconds()
    }
}
