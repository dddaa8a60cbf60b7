//! Metric and issue types for analysis output.
//!
//! These types represent the results of the heuristic rules:
//! - Button size and spacing
//! - Color contrast (WCAG)
//! - Font size
//! - Touch targets (mobile only)
//! - Layout depth

use serde::{Deserialize, Serialize};
use std::fmt;

use super::core::{ButtonPriority, DeviceProfile, MetricStatus, PriorityValues};
use crate::thresholds::SpacingRange;

// ============================================================================
// Issues
// ============================================================================

/// Closed set of rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    ButtonTooSmall,
    SpacingBelowGuidance,
    FontTooSmall,
    ContrastBelowNormal,
    ContrastBelowLarge,
    TouchTargetTooSmall,
    TappableTextTooSmall,
    DeepNesting,
}

impl IssueKind {
    pub const fn all() -> [IssueKind; 8] {
        [
            IssueKind::ButtonTooSmall,
            IssueKind::SpacingBelowGuidance,
            IssueKind::FontTooSmall,
            IssueKind::ContrastBelowNormal,
            IssueKind::ContrastBelowLarge,
            IssueKind::TouchTargetTooSmall,
            IssueKind::TappableTextTooSmall,
            IssueKind::DeepNesting,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::ButtonTooSmall => "button-too-small",
            IssueKind::SpacingBelowGuidance => "spacing-below-guidance",
            IssueKind::FontTooSmall => "font-too-small",
            IssueKind::ContrastBelowNormal => "contrast-below-normal",
            IssueKind::ContrastBelowLarge => "contrast-below-large",
            IssueKind::TouchTargetTooSmall => "touch-target-too-small",
            IssueKind::TappableTextTooSmall => "tappable-text-too-small",
            IssueKind::DeepNesting => "deep-nesting",
        }
    }

    fn fields(&self) -> IssueFields {
        match self {
            IssueKind::ContrastBelowNormal | IssueKind::ContrastBelowLarge => IssueFields::Ratio,
            IssueKind::DeepNesting => IssueFields::Depth,
            _ => IssueFields::Min,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which pair of wire field names an issue kind serializes its values under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IssueFields {
    /// `expected_min` / `actual`
    Min,
    /// `expected_ratio` / `actual_ratio`
    Ratio,
    /// `expected_max` / `actual_avg_depth`
    Depth,
}

/// One detected rule violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "IssueRecord", try_from = "IssueRecord")]
pub struct Issue {
    pub kind: IssueKind,
    /// Offending node; `None` for aggregate issues
    pub node: Option<String>,
    /// Priority tier, for button rules
    pub priority: Option<ButtonPriority>,
    /// Threshold the node was held to
    pub expected: f64,
    /// Measured value
    pub actual: f64,
}

impl Issue {
    pub fn new(kind: IssueKind, node: Option<String>, expected: f64, actual: f64) -> Self {
        Self {
            kind,
            node,
            priority: None,
            expected,
            actual,
        }
    }

    pub fn with_priority(mut self, priority: ButtonPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Human-readable description.
    pub fn message(&self) -> String {
        match self.kind {
            IssueKind::ButtonTooSmall => format!(
                "{} priority button height too small",
                self.priority.unwrap_or(ButtonPriority::Low).label()
            ),
            IssueKind::SpacingBelowGuidance => {
                "Button spacing below recommended minimum".to_string()
            }
            IssueKind::FontTooSmall => "Font too small".to_string(),
            IssueKind::ContrastBelowNormal => "Insufficient contrast for normal text".to_string(),
            IssueKind::ContrastBelowLarge => "Insufficient contrast for large text".to_string(),
            IssueKind::TouchTargetTooSmall => "Touch target too small".to_string(),
            IssueKind::TappableTextTooSmall => "Tappable text target too small".to_string(),
            IssueKind::DeepNesting => "Deep nesting".to_string(),
        }
    }
}

/// Wire shape of an [`Issue`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IssueRecord {
    issue: String,
    kind: IssueKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    node: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<ButtonPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expected_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expected_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expected_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    actual: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    actual_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    actual_avg_depth: Option<f64>,
}

impl From<Issue> for IssueRecord {
    fn from(issue: Issue) -> Self {
        let mut record = IssueRecord {
            issue: issue.message(),
            kind: issue.kind,
            node: issue.node,
            priority: issue.priority,
            expected_min: None,
            expected_ratio: None,
            expected_max: None,
            actual: None,
            actual_ratio: None,
            actual_avg_depth: None,
        };
        match issue.kind.fields() {
            IssueFields::Min => {
                record.expected_min = Some(issue.expected);
                record.actual = Some(issue.actual);
            }
            IssueFields::Ratio => {
                record.expected_ratio = Some(issue.expected);
                record.actual_ratio = Some(issue.actual);
            }
            IssueFields::Depth => {
                record.expected_max = Some(issue.expected);
                record.actual_avg_depth = Some(issue.actual);
            }
        }
        record
    }
}

impl TryFrom<IssueRecord> for Issue {
    type Error = String;

    fn try_from(record: IssueRecord) -> Result<Self, Self::Error> {
        let (expected, actual) = match record.kind.fields() {
            IssueFields::Min => (record.expected_min, record.actual),
            IssueFields::Ratio => (record.expected_ratio, record.actual_ratio),
            IssueFields::Depth => (record.expected_max, record.actual_avg_depth),
        };
        match (expected, actual) {
            (Some(expected), Some(actual)) => Ok(Issue {
                kind: record.kind,
                node: record.node,
                priority: record.priority,
                expected,
                actual,
            }),
            _ => Err(format!(
                "issue '{}' is missing its expected/actual values",
                record.kind
            )),
        }
    }
}

// ============================================================================
// Metric Types
// ============================================================================

/// Container for all metric entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub button_size: ButtonSizeMetric,
    pub button_spacing: ButtonSpacingMetric,
    pub contrast_ratio: ContrastMetric,
    pub font_size: FontSizeMetric,
    /// Absent (`null`) on desktop
    pub touch_target: Option<TouchTargetMetric>,
    pub layout_depth: LayoutDepthMetric,
}

impl Metrics {
    /// Status of every present metric, in output order.
    pub fn statuses(&self) -> Vec<(&'static str, MetricStatus)> {
        let mut out = vec![
            ("button_size", self.button_size.status),
            ("button_spacing", self.button_spacing.status),
            ("contrast_ratio", self.contrast_ratio.status),
            ("font_size", self.font_size.status),
        ];
        if let Some(touch) = &self.touch_target {
            out.push(("touch_target", touch.status));
        }
        out.push(("layout_depth", self.layout_depth.status));
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonSizeMetric {
    /// Smallest candidate height across all tiers
    pub min_detected: Option<f64>,
    /// Lowest tier minimum
    pub expected_min: f64,
    pub min_detected_by_priority: PriorityValues<Option<f64>>,
    pub expected_min_by_priority: PriorityValues<f64>,
    pub status: MetricStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonSpacingMetric {
    pub min_spacing: Option<f64>,
    pub recommended_min: Option<f64>,
    pub recommended_range: Option<SpacingRange>,
    /// Tier whose guidance applied to the closest pair
    pub priority: Option<ButtonPriority>,
    pub status: MetricStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastMetric {
    pub min_ratio: Option<f64>,
    pub required_min: f64,
    pub required_min_large: f64,
    pub status: MetricStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSizeMetric {
    pub min_detected: Option<f64>,
    pub recommended_min: f64,
    pub status: MetricStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchTargetMetric {
    pub control_min_detected: Option<f64>,
    pub control_recommended_min: f64,
    pub text_min_detected: Option<f64>,
    pub text_recommended_min: f64,
    pub status: MetricStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDepthMetric {
    pub avg_depth: f64,
    pub recommended_max: f64,
    pub status: MetricStatus,
}

// ============================================================================
// Analysis Result
// ============================================================================

/// Terminal output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub device: DeviceProfile,
    pub summary: String,
    pub opinion: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub metrics: Metrics,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_tags_serialize_kebab_case() {
        for kind in IssueKind::all() {
            let json = serde_json::to_value(kind).expect("serialize kind");
            assert_eq!(json, json!(kind.as_str()));
        }
    }

    #[test]
    fn button_issue_uses_min_fields_and_tier_message() {
        let issue = Issue::new(IssueKind::ButtonTooSmall, Some("1:2".into()), 72.0, 60.0)
            .with_priority(ButtonPriority::High);
        let json = serde_json::to_value(&issue).expect("serialize issue");

        assert_eq!(json["issue"], "High priority button height too small");
        assert_eq!(json["kind"], "button-too-small");
        assert_eq!(json["node"], "1:2");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["expected_min"], 72.0);
        assert_eq!(json["actual"], 60.0);
        assert!(json.get("actual_ratio").is_none());
    }

    #[test]
    fn contrast_and_depth_issues_rename_their_values() {
        let contrast = Issue::new(IssueKind::ContrastBelowLarge, Some("3".into()), 3.0, 1.2);
        let json = serde_json::to_value(&contrast).expect("serialize contrast");
        assert_eq!(json["expected_ratio"], 3.0);
        assert_eq!(json["actual_ratio"], 1.2);
        assert!(json.get("expected_min").is_none());

        let depth = Issue::new(IssueKind::DeepNesting, None, 5.0, 6.5);
        let json = serde_json::to_value(&depth).expect("serialize depth");
        assert_eq!(json["issue"], "Deep nesting");
        assert_eq!(json["expected_max"], 5.0);
        assert_eq!(json["actual_avg_depth"], 6.5);
        assert!(json.get("node").is_none(), "aggregate issues carry no node");
    }

    #[test]
    fn issue_deserialize_rejects_missing_values() {
        let err = serde_json::from_value::<Issue>(json!({
            "issue": "Font too small",
            "kind": "font-too-small",
            "expected_ratio": 4.5,
            "actual_ratio": 2.0
        }))
        .unwrap_err();
        assert!(err.to_string().contains("missing its expected/actual values"));
    }

    #[test]
    fn issue_reads_back_from_stored_json() {
        let issue: Issue = serde_json::from_value(json!({
            "issue": "Touch target too small",
            "kind": "touch-target-too-small",
            "node": "9:1",
            "expected_min": 44,
            "actual": 20
        }))
        .expect("deserialize issue");
        assert_eq!(
            issue,
            Issue::new(IssueKind::TouchTargetTooSmall, Some("9:1".into()), 44.0, 20.0)
        );
    }
}
