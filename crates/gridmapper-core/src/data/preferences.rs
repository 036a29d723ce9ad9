//! Per-user display preferences.

use crate::error::ValidationError;
use crate::types::{PreferencesId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named lighting presets shown above the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    #[serde(rename = "Midnight")]
    Midnight,
    #[serde(rename = "Early Morning")]
    EarlyMorning,
    #[serde(rename = "Mid Morning")]
    MidMorning,
    #[serde(rename = "Noon")]
    Noon,
    #[serde(rename = "Afternoon")]
    Afternoon,
    #[serde(rename = "Night")]
    Night,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 6] = [
        TimeOfDay::Midnight,
        TimeOfDay::EarlyMorning,
        TimeOfDay::MidMorning,
        TimeOfDay::Noon,
        TimeOfDay::Afternoon,
        TimeOfDay::Night,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Midnight => "Midnight",
            TimeOfDay::EarlyMorning => "Early Morning",
            TimeOfDay::MidMorning => "Mid Morning",
            TimeOfDay::Noon => "Noon",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Night => "Night",
        }
    }

    /// Clock time and period the preset selects.
    pub fn preset(&self) -> (ClockTime, Meridiem) {
        let (hour, meridiem) = match self {
            TimeOfDay::Midnight => (0, Meridiem::Am),
            TimeOfDay::EarlyMorning => (6, Meridiem::Am),
            TimeOfDay::MidMorning => (9, Meridiem::Am),
            TimeOfDay::Noon => (12, Meridiem::Pm),
            TimeOfDay::Afternoon => (15, Meridiem::Pm),
            TimeOfDay::Night => (21, Meridiem::Pm),
        };
        (ClockTime { hour, minute: 0 }, meridiem)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Meridiem {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

/// A wall-clock time stored as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour < 24 && minute < 60 {
            Ok(Self { hour, minute })
        } else {
            Err(ValidationError::InvalidTime(format!("{hour:02}:{minute:02}")))
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour = h.parse().map_err(|_| invalid())?;
        let minute = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub id: PreferencesId,
    pub owner: UserId,
    #[serde(default)]
    pub dark_mode: bool,
    pub time_of_day: TimeOfDay,
    pub custom_time: ClockTime,
    pub am_pm: Meridiem,
    pub updated_at: DateTime<Utc>,
}

impl UserPreferences {
    /// Light mode at Mid Morning.
    pub fn new(owner: UserId) -> Self {
        let (custom_time, am_pm) = TimeOfDay::MidMorning.preset();
        Self {
            id: PreferencesId::new(),
            owner,
            dark_mode: false,
            time_of_day: TimeOfDay::MidMorning,
            custom_time,
            am_pm,
            updated_at: Utc::now(),
        }
    }

    /// Select a preset; the clock time follows it.
    pub fn set_time_of_day(&mut self, time_of_day: TimeOfDay) {
        let (time, am_pm) = time_of_day.preset();
        self.time_of_day = time_of_day;
        self.custom_time = time;
        self.am_pm = am_pm;
        self.updated_at = Utc::now();
    }

    /// Override the clock time, keeping the named preset.
    pub fn set_custom_time(&mut self, time: ClockTime, am_pm: Meridiem) {
        self.custom_time = time;
        self.am_pm = am_pm;
        self.updated_at = Utc::now();
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
        self.updated_at = Utc::now();
    }
}
