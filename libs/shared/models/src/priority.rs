use serde::{Deserialize, Serialize};
use std::fmt;

/// Care priority tier. The weight only orders the waitlist; no other rule reads it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Normal,
    Elderly,
    Child,
    Pregnant,
    Disabled,
    Urgent,
}

impl Priority {
    pub const CHILD_MAX_AGE: u32 = 12;
    pub const ELDERLY_MIN_AGE: u32 = 60;

    pub fn weight(&self) -> u8 {
        match self {
            Priority::Normal => 0,
            Priority::Elderly | Priority::Child => 1,
            Priority::Pregnant | Priority::Disabled => 2,
            Priority::Urgent => 3,
        }
    }

    /// Priority a new patient receives when none was requested explicitly.
    pub fn for_age(age_years: u32) -> Self {
        if age_years <= Self::CHILD_MAX_AGE {
            Priority::Child
        } else if age_years >= Self::ELDERLY_MIN_AGE {
            Priority::Elderly
        } else {
            Priority::Normal
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Priority::Normal => "Normal",
            Priority::Elderly => "Elderly (60+)",
            Priority::Child => "Child (0-12)",
            Priority::Pregnant => "Pregnant",
            Priority::Disabled => "Person with disability",
            Priority::Urgent => "Urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
