use std::collections::HashMap;

use super::{Rule, RuleContext, RuleKind, RuleMetric, RuleOutcome};
use crate::types::{DesignNode, Issue, IssueKind, LayoutDepthMetric, MetricStatus};

type HeightMemo = HashMap<*const DesignNode, usize>;

/// Average subtree height over every node against the nesting maximum.
///
/// A leaf has height 0 and a parent is one more than its tallest child. The
/// average is taken over each node of the list, not just the root.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutDepthRule;

impl Rule for LayoutDepthRule {
    fn kind(&self) -> RuleKind {
        RuleKind::LayoutDepth
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> RuleOutcome {
        let max = ctx.thresholds.max_layout_depth;
        let mut memo = HeightMemo::with_capacity(ctx.nodes.len());

        // Pre-order reversed visits descendants first, so each lookup is warm.
        let total: usize = ctx
            .nodes
            .iter()
            .rev()
            .map(|node| subtree_height(node, &mut memo))
            .sum();
        let avg_depth = if ctx.nodes.is_empty() {
            0.0
        } else {
            total as f64 / ctx.nodes.len() as f64
        };

        let mut issues = Vec::new();
        let mut status = MetricStatus::Ok;
        if avg_depth > max {
            status = MetricStatus::Warning;
            issues.push(Issue::new(IssueKind::DeepNesting, None, max, avg_depth));
        }

        RuleOutcome {
            metric: RuleMetric::LayoutDepth(LayoutDepthMetric {
                avg_depth,
                recommended_max: max,
                status,
            }),
            issues,
        }
    }
}

/// Height of `root`, filling `memo` for its whole subtree without recursion.
fn subtree_height(root: &DesignNode, memo: &mut HeightMemo) -> usize {
    let lookup = |memo: &HeightMemo, node: &DesignNode| {
        memo.get(&(node as *const DesignNode)).copied().unwrap_or(0)
    };

    let mut stack = vec![(root, false)];
    while let Some((node, expanded)) = stack.pop() {
        let key = node as *const DesignNode;
        if memo.contains_key(&key) {
            continue;
        }
        if expanded || node.children.is_empty() {
            let height = node
                .children
                .iter()
                .map(|child| lookup(memo, child) + 1)
                .max()
                .unwrap_or(0);
            memo.insert(key, height);
        } else {
            stack.push((node, true));
            stack.extend(node.children.iter().map(|child| (child, false)));
        }
    }
    lookup(memo, root)
}
