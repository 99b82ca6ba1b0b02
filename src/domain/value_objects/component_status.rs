use serde::{Deserialize, Serialize};

use crate::domain::value_objects::status_color::StatusColor;

/// Health level of a component, and of a group once rolled up.
///
/// Ordered from best to worst so that `max` picks the worst status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(into = "u8", try_from = "u8")]
pub enum ComponentStatus {
    Operational,
    PerformanceIssues,
    PartialOutage,
    MajorOutage,
}

impl ComponentStatus {
    pub const ALL: [Self; 4] = [
        Self::Operational,
        Self::PerformanceIssues,
        Self::PartialOutage,
        Self::MajorOutage,
    ];

    /// Numeric level: 1 (operational) to 4 (major outage).
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Operational => 1,
            Self::PerformanceIssues => 2,
            Self::PartialOutage => 3,
            Self::MajorOutage => 4,
        }
    }

    /// Levels 1 and 2 count as online when a group partitions its components.
    #[must_use]
    pub const fn is_online(self) -> bool {
        self.level() < 3
    }

    #[must_use]
    pub const fn color(self) -> StatusColor {
        match self {
            Self::Operational => StatusColor::Green,
            Self::PerformanceIssues => StatusColor::Blue,
            Self::PartialOutage => StatusColor::Yellow,
            Self::MajorOutage => StatusColor::Red,
        }
    }
}

impl From<ComponentStatus> for u8 {
    fn from(status: ComponentStatus) -> Self {
        status.level()
    }
}

impl TryFrom<u8> for ComponentStatus {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Self::Operational),
            2 => Ok(Self::PerformanceIssues),
            3 => Ok(Self::PartialOutage),
            4 => Ok(Self::MajorOutage),
            other => Err(format!("unknown component status level: {other}")),
        }
    }
}

impl std::str::FromStr for ComponentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "operational" => Ok(Self::Operational),
            "2" | "performance" | "performance-issues" => Ok(Self::PerformanceIssues),
            "3" | "partial" | "partial-outage" => Ok(Self::PartialOutage),
            "4" | "major" | "major-outage" => Ok(Self::MajorOutage),
            other => Err(format!(
                "unknown status '{other}' (expected 1-4, operational, performance, partial, major)"
            )),
        }
    }
}

impl std::fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Operational => write!(f, "OPERATIONAL"),
            Self::PerformanceIssues => write!(f, "PERFORMANCE ISSUES"),
            Self::PartialOutage => write!(f, "PARTIAL OUTAGE"),
            Self::MajorOutage => write!(f, "MAJOR OUTAGE"),
        }
    }
}
