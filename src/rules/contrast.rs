//! WCAG 2.x contrast of fill colors against a white background.

use palette::Srgb;

use super::{update_min, Rule, RuleContext, RuleKind, RuleMetric, RuleOutcome};
use crate::types::{ContrastMetric, Issue, IssueKind, MetricStatus};

/// Relative luminance of an 8-bit sRGB color, in `[0, 1]`.
pub fn relative_luminance(color: Srgb<u8>) -> f64 {
    let linear = |channel: u8| {
        let c = f64::from(channel) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(color.red) + 0.7152 * linear(color.green) + 0.0722 * linear(color.blue)
}

/// Contrast ratio between two colors, in `[1, 21]`. Symmetric.
pub fn contrast_ratio(a: Srgb<u8>, b: Srgb<u8>) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

fn white() -> Srgb<u8> {
    Srgb::new(255, 255, 255)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// First-fill color of every node against white.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContrastRule;

impl Rule for ContrastRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Contrast
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> RuleOutcome {
        let limits = ctx.thresholds.contrast;
        let background = white();
        let mut min_ratio = None;
        let mut issues = Vec::new();

        for node in ctx.nodes {
            let Some(color) = node.first_fill_color() else {
                continue;
            };
            let ratio = contrast_ratio(color, background);
            update_min(&mut min_ratio, ratio);

            let violation = if ratio < limits.large_min {
                Some((IssueKind::ContrastBelowLarge, limits.large_min))
            } else if ratio < limits.normal_min {
                Some((IssueKind::ContrastBelowNormal, limits.normal_min))
            } else {
                None
            };
            if let Some((kind, expected)) = violation {
                issues.push(Issue::new(kind, node.id.clone(), expected, round2(ratio)));
            }
        }

        let status = match min_ratio {
            Some(min) if min < limits.large_min => MetricStatus::Error,
            Some(min) if min < limits.normal_min => MetricStatus::Warning,
            _ => MetricStatus::Ok,
        };

        RuleOutcome {
            metric: RuleMetric::Contrast(ContrastMetric {
                min_ratio,
                required_min: limits.normal_min,
                required_min_large: limits.large_min,
                status,
            }),
            issues,
        }
    }
}
