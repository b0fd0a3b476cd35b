use chrono::{Local, Timelike};

use crate::scene::error::SceneError;

/// Wall-clock reading taken once per clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSample {
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl TimeSample {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Result<Self, SceneError> {
        if hours > 23 || minutes > 59 || seconds > 59 {
            return Err(SceneError::InvalidTime {
                hours,
                minutes,
                seconds,
            });
        }
        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    #[must_use]
    pub fn now() -> Self {
        Self::from_time(&Local::now())
    }

    /// Leap seconds are folded into second 59 by chrono, so this never fails.
    #[must_use]
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self {
            hours: time.hour(),
            minutes: time.minute(),
            seconds: time.second().min(59),
        }
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Zero-padded `HHMMSS`.
    #[must_use]
    pub fn digits(&self) -> String {
        format!("{:02}{:02}{:02}", self.hours, self.minutes, self.seconds)
    }
}
