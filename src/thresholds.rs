//! Numeric guidance the rules are evaluated against.

use serde::{Deserialize, Serialize};

use crate::types::{ButtonPriority, DeviceValues, PriorityValues};

/// Recommended spacing between two buttons, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpacingRange {
    pub min: f64,
    pub max: f64,
}

impl SpacingRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl Default for SpacingRange {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Contrast minimums against a white background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastThresholds {
    /// WCAG AA for body text
    pub normal_min: f64,
    /// WCAG AA for large text
    pub large_min: f64,
}

impl Default for ContrastThresholds {
    fn default() -> Self {
        Self {
            normal_min: 4.5,
            large_min: 3.0,
        }
    }
}

/// Minimum touch size (smaller side of the bounding box) on mobile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchThresholds {
    pub control_min: f64,
    pub text_min: f64,
}

impl Default for TouchThresholds {
    fn default() -> Self {
        Self {
            control_min: 44.0,
            text_min: 30.0,
        }
    }
}

/// All thresholds for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdSet {
    #[serde(deserialize_with = "overrides::button_min_height")]
    pub button_min_height: PriorityValues<f64>,
    #[serde(deserialize_with = "overrides::button_spacing")]
    pub button_spacing: PriorityValues<SpacingRange>,
    pub contrast: ContrastThresholds,
    #[serde(deserialize_with = "overrides::font_min")]
    pub font_min: DeviceValues<f64>,
    pub touch: TouchThresholds,
    /// Upper bound for the average per-node layout depth
    pub max_layout_depth: f64,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            button_min_height: PriorityValues {
                high: 72.0,
                medium: 60.0,
                low: 48.0,
            },
            button_spacing: PriorityValues {
                high: SpacingRange::new(16.0, 24.0),
                medium: SpacingRange::new(24.0, 40.0),
                low: SpacingRange::new(32.0, 48.0),
            },
            contrast: ContrastThresholds::default(),
            font_min: DeviceValues {
                desktop: 14.0,
                mobile: 16.0,
            },
            touch: TouchThresholds::default(),
            max_layout_depth: 5.0,
        }
    }
}

impl ThresholdSet {
    /// The smallest per-tier button height.
    pub fn lowest_button_min(&self) -> f64 {
        ButtonPriority::all()
            .iter()
            .map(|p| *self.button_min_height.get(*p))
            .fold(f64::INFINITY, f64::min)
    }

    pub fn validate(&self) -> Result<(), String> {
        let mut positives: Vec<(String, f64)> = vec![
            ("contrast.normal_min".into(), self.contrast.normal_min),
            ("contrast.large_min".into(), self.contrast.large_min),
            ("font_min.desktop".into(), self.font_min.desktop),
            ("font_min.mobile".into(), self.font_min.mobile),
            ("touch.control_min".into(), self.touch.control_min),
            ("touch.text_min".into(), self.touch.text_min),
            ("max_layout_depth".into(), self.max_layout_depth),
        ];
        for priority in ButtonPriority::all() {
            positives.push((
                format!("button_min_height.{priority}"),
                *self.button_min_height.get(priority),
            ));
        }
        for (name, value) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("threshold {name} must be positive (got {value})"));
            }
        }

        for priority in ButtonPriority::all() {
            let range = self.button_spacing.get(priority);
            if range.min < 0.0 || range.max < range.min {
                return Err(format!(
                    "threshold button_spacing.{priority} must satisfy 0 <= min <= max (got {}..{})",
                    range.min, range.max
                ));
            }
        }

        if self.contrast.large_min > self.contrast.normal_min {
            return Err(format!(
                "threshold contrast.large_min ({}) must not exceed contrast.normal_min ({})",
                self.contrast.large_min, self.contrast.normal_min
            ));
        }
        Ok(())
    }
}

/// Tier and device tables are read field by field; keys left out keep the
/// default for that tier or device.
mod overrides {
    use serde::{Deserialize, Deserializer};

    use super::{SpacingRange, ThresholdSet};
    use crate::types::{DeviceValues, PriorityValues};

    #[derive(Deserialize)]
    struct PartialTiers<T> {
        high: Option<T>,
        medium: Option<T>,
        low: Option<T>,
    }

    #[derive(Deserialize)]
    struct PartialRange {
        min: Option<f64>,
        max: Option<f64>,
    }

    impl PartialRange {
        fn over(self, base: SpacingRange) -> SpacingRange {
            SpacingRange::new(self.min.unwrap_or(base.min), self.max.unwrap_or(base.max))
        }
    }

    #[derive(Deserialize)]
    struct PartialDevices {
        desktop: Option<f64>,
        mobile: Option<f64>,
    }

    pub fn button_min_height<'de, D>(deserializer: D) -> Result<PriorityValues<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let base = ThresholdSet::default().button_min_height;
        let tiers = PartialTiers::<f64>::deserialize(deserializer)?;
        Ok(PriorityValues {
            high: tiers.high.unwrap_or(base.high),
            medium: tiers.medium.unwrap_or(base.medium),
            low: tiers.low.unwrap_or(base.low),
        })
    }

    pub fn button_spacing<'de, D>(
        deserializer: D,
    ) -> Result<PriorityValues<SpacingRange>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let base = ThresholdSet::default().button_spacing;
        let tiers = PartialTiers::<PartialRange>::deserialize(deserializer)?;
        Ok(PriorityValues {
            high: tiers.high.map_or(base.high, |r| r.over(base.high)),
            medium: tiers.medium.map_or(base.medium, |r| r.over(base.medium)),
            low: tiers.low.map_or(base.low, |r| r.over(base.low)),
        })
    }

    pub fn font_min<'de, D>(deserializer: D) -> Result<DeviceValues<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let base = ThresholdSet::default().font_min;
        let devices = PartialDevices::deserialize(deserializer)?;
        Ok(DeviceValues {
            desktop: devices.desktop.unwrap_or(base.desktop),
            mobile: devices.mobile.unwrap_or(base.mobile),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeviceProfile;

    #[test]
    fn default_values_match_expected() {
        let t = ThresholdSet::default();
        assert_eq!(t.button_min_height.high, 72.0);
        assert_eq!(t.button_min_height.medium, 60.0);
        assert_eq!(t.button_min_height.low, 48.0);
        assert_eq!(t.lowest_button_min(), 48.0);
        assert_eq!(t.button_spacing.medium, SpacingRange::new(24.0, 40.0));
        assert_eq!(t.font_min.for_device(DeviceProfile::Desktop), 14.0);
        assert_eq!(t.font_min.for_device(DeviceProfile::Mobile), 16.0);
        assert_eq!(t.contrast.normal_min, 4.5);
        assert_eq!(t.contrast.large_min, 3.0);
        assert_eq!(t.touch.control_min, 44.0);
        assert_eq!(t.touch.text_min, 30.0);
        assert_eq!(t.max_layout_depth, 5.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_contrast_minimums() {
        let mut t = ThresholdSet::default();
        t.contrast.large_min = 5.0;
        let err = t.validate().unwrap_err();
        assert!(err.contains("contrast.large_min"), "got: {err}");
    }

    #[test]
    fn validate_rejects_non_positive_and_inverted_ranges() {
        let mut t = ThresholdSet::default();
        t.button_min_height.medium = 0.0;
        assert!(t.validate().unwrap_err().contains("button_min_height.medium"));

        let mut t = ThresholdSet::default();
        t.button_spacing.low = SpacingRange::new(40.0, 20.0);
        assert!(t.validate().unwrap_err().contains("button_spacing.low"));
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let t: ThresholdSet = toml::from_str(
            "max_layout_depth = 3.0\n[contrast]\nnormal_min = 7.0\n",
        )
        .expect("parse thresholds");
        assert_eq!(t.max_layout_depth, 3.0);
        assert_eq!(t.contrast.normal_min, 7.0);
        assert_eq!(t.contrast.large_min, 3.0);
        assert_eq!(t.button_min_height.high, 72.0);
    }

    #[test]
    fn partial_tier_tables_keep_other_tiers() {
        let t: ThresholdSet = toml::from_str(
            "[button_min_height]\nhigh = 80.0\n\n[button_spacing.low]\nmin = 20.0\n\n[font_min]\nmobile = 18.0\n",
        )
        .expect("parse partial tiers");
        assert_eq!(t.button_min_height.high, 80.0);
        assert_eq!(t.button_min_height.medium, 60.0);
        assert_eq!(t.button_min_height.low, 48.0);
        assert_eq!(t.button_spacing.low, SpacingRange::new(20.0, 48.0));
        assert_eq!(t.button_spacing.high, SpacingRange::new(16.0, 24.0));
        assert_eq!(t.font_min.desktop, 14.0);
        assert_eq!(t.font_min.mobile, 18.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn full_tier_tables_still_parse() {
        let t: ThresholdSet = toml::from_str(
            "[button_min_height]\nhigh = 1.0\nmedium = 2.0\nlow = 3.0\n",
        )
        .expect("parse full tiers");
        assert_eq!(
            t.button_min_height,
            PriorityValues { high: 1.0, medium: 2.0, low: 3.0 }
        );
    }
}
