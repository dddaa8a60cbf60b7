use super::{update_min, Rule, RuleContext, RuleKind, RuleMetric, RuleOutcome};
use crate::types::{FontSizeMetric, Issue, IssueKind, MetricStatus};

/// Text layers against the device font minimum.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontSizeRule;

impl Rule for FontSizeRule {
    fn kind(&self) -> RuleKind {
        RuleKind::FontSize
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> RuleOutcome {
        let required = ctx.thresholds.font_min.for_device(ctx.device);
        let mut min_detected = None;
        let mut issues = Vec::new();

        for node in ctx.nodes.iter().filter(|n| n.is_text()) {
            let Some(size) = node.font_size() else {
                continue;
            };
            update_min(&mut min_detected, size);
            if size < required {
                issues.push(Issue::new(
                    IssueKind::FontTooSmall,
                    node.id.clone(),
                    required,
                    size,
                ));
            }
        }

        let status = if issues.is_empty() {
            MetricStatus::Ok
        } else {
            MetricStatus::Warning
        };

        RuleOutcome {
            metric: RuleMetric::FontSize(FontSizeMetric {
                min_detected,
                recommended_min: required,
                status,
            }),
            issues,
        }
    }
}
