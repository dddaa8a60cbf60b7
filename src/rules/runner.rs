use tracing::debug;

use crate::error::{Result, UxaError};
use crate::types::{Issue, Metrics};

use super::{
    ButtonSizeRule, ButtonSpacingRule, ContrastRule, FontSizeRule, LayoutDepthRule, Rule,
    RuleContext, RuleKind, RuleMetric, TouchTargetRule,
};

/// Returns every rule, in evaluation order.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::<ButtonSizeRule>::default(),
        Box::<ButtonSpacingRule>::default(),
        Box::<FontSizeRule>::default(),
        Box::<ContrastRule>::default(),
        Box::<TouchTargetRule>::default(),
        Box::<LayoutDepthRule>::default(),
    ]
}

/// Aggregated output of one pass over the rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleReport {
    pub metrics: Metrics,
    /// Issues in rule order, then traversal order within a rule
    pub issues: Vec<Issue>,
}

/// Run the rules over one flattened document and assemble the metrics.
pub fn run_rules(rules: &[Box<dyn Rule>], ctx: &RuleContext<'_>) -> Result<RuleReport> {
    let missing: Vec<RuleKind> = RuleKind::all()
        .into_iter()
        .filter(|kind| !rules.iter().any(|r| r.kind() == *kind))
        .collect();

    if !missing.is_empty() {
        let names = missing
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(UxaError::Config(format!(
            "Required rules not configured: {}",
            names
        )));
    }

    let mut button_size = None;
    let mut button_spacing = None;
    let mut font_size = None;
    let mut contrast_ratio = None;
    let mut touch_target = None;
    let mut layout_depth = None;
    let mut issues = Vec::new();

    for rule in rules {
        let outcome = rule.evaluate(ctx);
        debug!(
            rule = %rule.kind(),
            issues = outcome.issues.len(),
            "rule evaluated"
        );
        issues.extend(outcome.issues);
        match outcome.metric {
            RuleMetric::ButtonSize(m) => button_size = Some(m),
            RuleMetric::ButtonSpacing(m) => button_spacing = Some(m),
            RuleMetric::FontSize(m) => font_size = Some(m),
            RuleMetric::Contrast(m) => contrast_ratio = Some(m),
            RuleMetric::TouchTarget(m) => touch_target = Some(m),
            RuleMetric::LayoutDepth(m) => layout_depth = Some(m),
        }
    }

    match (
        button_size,
        button_spacing,
        font_size,
        contrast_ratio,
        touch_target,
        layout_depth,
    ) {
        (
            Some(button_size),
            Some(button_spacing),
            Some(font_size),
            Some(contrast_ratio),
            Some(touch_target),
            Some(layout_depth),
        ) => Ok(RuleReport {
            metrics: Metrics {
                button_size,
                button_spacing,
                contrast_ratio,
                font_size,
                touch_target,
                layout_depth,
            },
            issues,
        }),
        _ => Err(UxaError::Unknown(
            "a rule reported a metric of the wrong kind".to_string(),
        )),
    }
}
