use super::button::button_candidates;
use super::{Rule, RuleContext, RuleKind, RuleMetric, RuleOutcome};
use crate::types::{
    ButtonPriority, ButtonSpacingMetric, DesignNode, Issue, IssueKind, MetricStatus,
};

/// Closest pair of button candidates against the tier spacing guidance.
#[derive(Debug, Default, Clone, Copy)]
pub struct ButtonSpacingRule;

#[derive(Debug, Clone, Copy)]
struct ClosestPair<'a> {
    gap: f64,
    priority: ButtonPriority,
    node: &'a DesignNode,
}

impl Rule for ButtonSpacingRule {
    fn kind(&self) -> RuleKind {
        RuleKind::ButtonSpacing
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> RuleOutcome {
        let candidates = button_candidates(ctx.nodes);
        let mut closest: Option<ClosestPair<'_>> = None;

        for (i, a) in candidates.iter().enumerate() {
            for b in &candidates[i + 1..] {
                let gap = a.rect.gap(&b.rect);
                if gap <= 0.0 {
                    continue;
                }
                // The pair is judged by its higher-priority member.
                let (priority, node) = if b.priority > a.priority {
                    (b.priority, b.node)
                } else {
                    (a.priority, a.node)
                };
                let replace = match closest {
                    None => true,
                    Some(current) => {
                        gap < current.gap || (gap == current.gap && priority > current.priority)
                    }
                };
                if replace {
                    closest = Some(ClosestPair {
                        gap,
                        priority,
                        node,
                    });
                }
            }
        }

        let Some(pair) = closest else {
            return RuleOutcome {
                metric: RuleMetric::ButtonSpacing(ButtonSpacingMetric {
                    min_spacing: None,
                    recommended_min: None,
                    recommended_range: None,
                    priority: None,
                    status: MetricStatus::Ok,
                }),
                issues: Vec::new(),
            };
        };

        let range = *ctx.thresholds.button_spacing.get(pair.priority);
        let mut issues = Vec::new();
        let mut status = MetricStatus::Ok;
        if pair.gap < range.min {
            status = MetricStatus::Warning;
            issues.push(
                Issue::new(
                    IssueKind::SpacingBelowGuidance,
                    pair.node.id.clone(),
                    range.min,
                    pair.gap,
                )
                .with_priority(pair.priority),
            );
        }

        RuleOutcome {
            metric: RuleMetric::ButtonSpacing(ButtonSpacingMetric {
                min_spacing: Some(pair.gap),
                recommended_min: Some(range.min),
                recommended_range: Some(range),
                priority: Some(pair.priority),
                status,
            }),
            issues,
        }
    }
}
