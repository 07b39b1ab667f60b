use serde::{Deserialize, Serialize};
use std::fmt;

/// Hours per day, used when converting rates between units
pub const HOURS_PER_DAY: u32 = 24;

/// Billing unit for service rates and booking durations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Hour,
    Day,
}

impl Default for DurationUnit {
    fn default() -> Self {
        DurationUnit::Hour
    }
}

impl DurationUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationUnit::Hour => "hour",
            DurationUnit::Day => "day",
        }
    }

    /// "3 hour(s)", "2 day(s)"
    pub fn describe(&self, value: u32) -> String {
        format!("{} {}(s)", value, self.as_str())
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DurationUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hour" => Ok(DurationUnit::Hour),
            "day" => Ok(DurationUnit::Day),
            _ => Err(format!("Invalid duration unit: {}", s)),
        }
    }
}
