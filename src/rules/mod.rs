//! Heuristic UX rules evaluated over a flattened design document.
//!
//! Each rule is independent and pure: it reads the node list, the device
//! profile and the threshold set, and produces one metric entry plus zero or
//! more issues.
//! - Button size (per priority tier)
//! - Button spacing
//! - Font size
//! - Color contrast (WCAG, against white)
//! - Touch targets (mobile only)
//! - Layout depth

mod button;
mod contrast;
mod depth;
mod runner;
mod spacing;
mod touch;
mod typography;


use serde::{Deserialize, Serialize};
use std::fmt;

use crate::thresholds::ThresholdSet;
use crate::types::{
    ButtonSizeMetric, ButtonSpacingMetric, ContrastMetric, DesignNode, DeviceProfile,
    FontSizeMetric, Issue, LayoutDepthMetric, TouchTargetMetric,
};

pub use button::ButtonSizeRule;
pub use contrast::{contrast_ratio, relative_luminance, ContrastRule};
pub use depth::LayoutDepthRule;
pub use runner::{default_rules, run_rules, RuleReport};
pub use spacing::ButtonSpacingRule;
pub use touch::TouchTargetRule;
pub use typography::FontSizeRule;

/// The category a rule reports under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    ButtonSize,
    ButtonSpacing,
    FontSize,
    Contrast,
    TouchTarget,
    LayoutDepth,
}

impl RuleKind {
    pub const fn all() -> [RuleKind; 6] {
        [
            RuleKind::ButtonSize,
            RuleKind::ButtonSpacing,
            RuleKind::FontSize,
            RuleKind::Contrast,
            RuleKind::TouchTarget,
            RuleKind::LayoutDepth,
        ]
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RuleKind::ButtonSize => "button_size",
                RuleKind::ButtonSpacing => "button_spacing",
                RuleKind::FontSize => "font_size",
                RuleKind::Contrast => "contrast_ratio",
                RuleKind::TouchTarget => "touch_target",
                RuleKind::LayoutDepth => "layout_depth",
            }
        )
    }
}

/// Inputs shared by every rule of one run.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub nodes: &'a [&'a DesignNode],
    pub device: DeviceProfile,
    pub thresholds: &'a ThresholdSet,
}

/// Metric entry produced by a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleMetric {
    ButtonSize(ButtonSizeMetric),
    ButtonSpacing(ButtonSpacingMetric),
    FontSize(FontSizeMetric),
    Contrast(ContrastMetric),
    /// `None` when the device does not use touch input
    TouchTarget(Option<TouchTargetMetric>),
    LayoutDepth(LayoutDepthMetric),
}

impl RuleMetric {
    pub fn kind(&self) -> RuleKind {
        match self {
            RuleMetric::ButtonSize(_) => RuleKind::ButtonSize,
            RuleMetric::ButtonSpacing(_) => RuleKind::ButtonSpacing,
            RuleMetric::FontSize(_) => RuleKind::FontSize,
            RuleMetric::Contrast(_) => RuleKind::Contrast,
            RuleMetric::TouchTarget(_) => RuleKind::TouchTarget,
            RuleMetric::LayoutDepth(_) => RuleKind::LayoutDepth,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub metric: RuleMetric,
    pub issues: Vec<Issue>,
}

pub trait Rule: Send + Sync {
    fn kind(&self) -> RuleKind;
    fn evaluate(&self, ctx: &RuleContext<'_>) -> RuleOutcome;
}

fn update_min(slot: &mut Option<f64>, value: f64) {
    if slot.map_or(true, |current| value < current) {
        *slot = Some(value);
    }
}
