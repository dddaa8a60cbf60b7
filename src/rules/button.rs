use super::{update_min, Rule, RuleContext, RuleKind, RuleMetric, RuleOutcome};
use crate::types::document::{FRAME, RECTANGLE};
use crate::types::{
    ButtonPriority, ButtonSizeMetric, DesignNode, Issue, IssueKind, MetricStatus, PriorityValues,
    Rect,
};

/// A node treated as a button, with its tier and fully specified box.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ButtonCandidate<'a> {
    pub node: &'a DesignNode,
    pub priority: ButtonPriority,
    pub rect: Rect,
}

/// Nodes named like a button, plus every rectangle and frame, that carry a
/// non-zero box. Traversal order is preserved.
pub(crate) fn button_candidates<'a>(nodes: &[&'a DesignNode]) -> Vec<ButtonCandidate<'a>> {
    nodes
        .iter()
        .filter_map(|node| {
            let name = node.name_lower();
            let shaped = name.contains("button") || node.is_type(RECTANGLE) || node.is_type(FRAME);
            if !shaped {
                return None;
            }
            let rect = node.absolute_bounding_box.as_ref()?.rect()?;
            Some(ButtonCandidate {
                node,
                priority: ButtonPriority::from_name(&name),
                rect,
            })
        })
        .collect()
}

/// Button height against the per-tier minimum.
#[derive(Debug, Default, Clone, Copy)]
pub struct ButtonSizeRule;

impl Rule for ButtonSizeRule {
    fn kind(&self) -> RuleKind {
        RuleKind::ButtonSize
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> RuleOutcome {
        let thresholds = ctx.thresholds;
        let mut overall = None;
        let mut by_priority = PriorityValues::<Option<f64>>::default();
        let mut issues = Vec::new();

        for candidate in button_candidates(ctx.nodes) {
            let height = candidate.rect.height;
            update_min(&mut overall, height);
            update_min(by_priority.get_mut(candidate.priority), height);

            let required = *thresholds.button_min_height.get(candidate.priority);
            if height < required {
                issues.push(
                    Issue::new(
                        IssueKind::ButtonTooSmall,
                        candidate.node.id.clone(),
                        required,
                        height,
                    )
                    .with_priority(candidate.priority),
                );
            }
        }

        let lowest = thresholds.lowest_button_min();
        let below_lowest = overall.map_or(false, |min| min < lowest);
        let status = if below_lowest || !issues.is_empty() {
            MetricStatus::Error
        } else {
            MetricStatus::Ok
        };

        RuleOutcome {
            metric: RuleMetric::ButtonSize(ButtonSizeMetric {
                min_detected: overall,
                expected_min: lowest,
                min_detected_by_priority: by_priority,
                expected_min_by_priority: thresholds.button_min_height,
                status,
            }),
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thresholds::ThresholdSet;
    use crate::types::{BoundingBox, DeviceProfile};

    fn node(id: &str, kind: Option<&str>, name: &str, height: f64) -> DesignNode {
        let mut node = DesignNode::default()
            .with_id(id)
            .with_name(name)
            .with_box(BoundingBox::new(0.0, 0.0, 100.0, height));
        node.node_type = kind.map(str::to_string);
        node
    }

    fn evaluate(nodes: &[&DesignNode]) -> RuleOutcome {
        let thresholds = ThresholdSet::default();
        ButtonSizeRule.evaluate(&RuleContext {
            nodes,
            device: DeviceProfile::Desktop,
            thresholds: &thresholds,
        })
    }

    #[test]
    fn candidates_need_button_name_or_shape_and_a_box() {
        let named = node("1", None, "Submit Button", 50.0);
        let frame = node("2", Some(FRAME), "Card", 50.0);
        let text = node("3", Some("TEXT"), "Label", 50.0);
        let mut boxless = node("4", Some(RECTANGLE), "Rect", 50.0);
        boxless.absolute_bounding_box = None;

        let found: Vec<_> = button_candidates(&[&named, &frame, &text, &boxless])
            .into_iter()
            .map(|c| c.node.id.clone().unwrap_or_default())
            .collect();
        assert_eq!(found, vec!["1", "2"]);
    }

    #[test]
    fn each_tier_is_held_to_its_own_minimum() {
        let high = node("h", Some(FRAME), "Primary Button", 70.0);
        let medium = node("m", Some(FRAME), "Secondary Button", 62.0);
        let low = node("l", Some(RECTANGLE), "Ghost", 40.0);

        let outcome = evaluate(&[&high, &medium, &low]);
        let RuleMetric::ButtonSize(metric) = outcome.metric else {
            panic!("expected button size metric");
        };

        assert_eq!(outcome.issues.len(), 2);
        assert_eq!(outcome.issues[0].priority, Some(ButtonPriority::High));
        assert_eq!(outcome.issues[0].expected, 72.0);
        assert_eq!(outcome.issues[1].priority, Some(ButtonPriority::Low));
        assert_eq!(outcome.issues[1].actual, 40.0);
        assert_eq!(metric.min_detected, Some(40.0));
        assert_eq!(metric.min_detected_by_priority.medium, Some(62.0));
        assert_eq!(metric.expected_min, 48.0);
        assert_eq!(metric.status, MetricStatus::Error);
    }

    #[test]
    fn no_candidates_is_ok() {
        let outcome = evaluate(&[]);
        let RuleMetric::ButtonSize(metric) = outcome.metric else {
            panic!("expected button size metric");
        };
        assert!(outcome.issues.is_empty());
        assert_eq!(metric.min_detected, None);
        assert_eq!(metric.status, MetricStatus::Ok);
    }
}
