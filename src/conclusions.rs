//! Summary, opinion and recommendations derived from an issue list.

use serde::{Deserialize, Serialize};

use crate::types::Issue;

pub const OPINION_GOOD: &str = "Overall layout is acceptable.";
pub const OPINION_MINOR: &str = "Overall layout is acceptable with minor adjustments.";
pub const OPINION_NEEDS_WORK: &str = "The project needs UX improvements.";

/// Kind-tag keyword and the advice it triggers, checked in this order.
const RECOMMENDATIONS: [(&str, &str); 5] = [
    ("button", "Increase button height."),
    ("font", "Increase font size for readability."),
    ("contrast", "Improve color contrast to meet WCAG AA."),
    ("nest", "Reduce layout depth for better hierarchy."),
    ("touch", "Increase touch target sizes on mobile."),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conclusions {
    pub summary: String,
    pub opinion: String,
    pub recommendations: Vec<String>,
}

pub fn generate_conclusions(issues: &[Issue]) -> Conclusions {
    let count = issues.len();
    let opinion = match count {
        0 => OPINION_GOOD,
        1..=2 => OPINION_MINOR,
        _ => OPINION_NEEDS_WORK,
    };

    let mut recommendations: Vec<String> = Vec::new();
    for issue in issues {
        let tag = issue.kind.as_str().to_lowercase();
        for (keyword, advice) in RECOMMENDATIONS {
            if tag.contains(keyword) && !recommendations.iter().any(|r| r == advice) {
                recommendations.push(advice.to_string());
            }
        }
    }

    Conclusions {
        summary: format!("Found {count} UX issues."),
        opinion: opinion.to_string(),
        recommendations,
    }
}
