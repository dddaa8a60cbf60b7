//! Core types used throughout the UXA library.
//!
//! - [`DeviceProfile`] - Which threshold variant applies
//! - [`ButtonPriority`] - Priority tier of a button-like node
//! - [`PriorityValues`] / [`DeviceValues`] - Per-tier and per-device settings
//! - [`MetricStatus`] - Outcome tag of one metric

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UxaError;

/// Device class the design targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceProfile {
    Desktop,
    Mobile,
}

impl DeviceProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceProfile::Desktop => "desktop",
            DeviceProfile::Mobile => "mobile",
        }
    }

    pub fn is_mobile(&self) -> bool {
        matches!(self, DeviceProfile::Mobile)
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceProfile {
    type Err = UxaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Ok(DeviceProfile::Desktop),
            "mobile" => Ok(DeviceProfile::Mobile),
            other => Err(UxaError::validation(format!(
                "unknown device '{other}'; expected desktop or mobile"
            ))),
        }
    }
}

/// Priority tier of a button-like node, ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonPriority {
    Low,
    Medium,
    High,
}

impl ButtonPriority {
    pub const fn all() -> [ButtonPriority; 3] {
        [
            ButtonPriority::High,
            ButtonPriority::Medium,
            ButtonPriority::Low,
        ]
    }

    /// Classify a node name. "primary"/"high" win over "secondary"/"medium".
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("primary") || lower.contains("high") {
            ButtonPriority::High
        } else if lower.contains("secondary") || lower.contains("medium") {
            ButtonPriority::Medium
        } else {
            ButtonPriority::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ButtonPriority::High => "High",
            ButtonPriority::Medium => "Medium",
            ButtonPriority::Low => "Low",
        }
    }
}

impl fmt::Display for ButtonPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ButtonPriority::High => "high",
            ButtonPriority::Medium => "medium",
            ButtonPriority::Low => "low",
        })
    }
}

/// One value per button priority tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityValues<T> {
    pub high: T,
    pub medium: T,
    pub low: T,
}

impl<T> PriorityValues<T> {
    pub fn get(&self, priority: ButtonPriority) -> &T {
        match priority {
            ButtonPriority::High => &self.high,
            ButtonPriority::Medium => &self.medium,
            ButtonPriority::Low => &self.low,
        }
    }

    pub fn get_mut(&mut self, priority: ButtonPriority) -> &mut T {
        match priority {
            ButtonPriority::High => &mut self.high,
            ButtonPriority::Medium => &mut self.medium,
            ButtonPriority::Low => &mut self.low,
        }
    }
}

/// One value per device profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceValues<T> {
    pub desktop: T,
    pub mobile: T,
}

impl<T: Copy> DeviceValues<T> {
    pub fn for_device(&self, device: DeviceProfile) -> T {
        match device {
            DeviceProfile::Desktop => self.desktop,
            DeviceProfile::Mobile => self.mobile,
        }
    }
}

/// Outcome of one metric category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    #[default]
    Ok,
    Warning,
    Error,
}
