use super::{update_min, Rule, RuleContext, RuleKind, RuleMetric, RuleOutcome};
use crate::types::{Issue, IssueKind, MetricStatus, TouchTargetMetric};

/// Smaller side of every box against the touch minimums. Mobile only.
#[derive(Debug, Default, Clone, Copy)]
pub struct TouchTargetRule;

impl Rule for TouchTargetRule {
    fn kind(&self) -> RuleKind {
        RuleKind::TouchTarget
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> RuleOutcome {
        if !ctx.device.is_mobile() {
            return RuleOutcome {
                metric: RuleMetric::TouchTarget(None),
                issues: Vec::new(),
            };
        }

        let limits = ctx.thresholds.touch;
        let mut control_min = None;
        let mut text_min = None;
        let mut issues = Vec::new();

        for node in ctx.nodes {
            let Some((width, height)) = node.size() else {
                continue;
            };
            let target = width.min(height);
            let (slot, required, kind) = if node.is_text() {
                (&mut text_min, limits.text_min, IssueKind::TappableTextTooSmall)
            } else {
                (&mut control_min, limits.control_min, IssueKind::TouchTargetTooSmall)
            };
            update_min(slot, target);
            if target < required {
                issues.push(Issue::new(kind, node.id.clone(), required, target));
            }
        }

        let meets = |min: Option<f64>, required: f64| min.map_or(true, |m| m >= required);
        let status = if meets(control_min, limits.control_min) && meets(text_min, limits.text_min)
        {
            MetricStatus::Ok
        } else {
            MetricStatus::Error
        };

        RuleOutcome {
            metric: RuleMetric::TouchTarget(Some(TouchTargetMetric {
                control_min_detected: control_min,
                control_recommended_min: limits.control_min,
                text_min_detected: text_min,
                text_recommended_min: limits.text_min,
                status,
            })),
            issues,
        }
    }
}
