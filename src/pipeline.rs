//! Run orchestration: flatten, evaluate rules, conclude, persist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::conclusions::generate_conclusions;
use crate::error::Result;
use crate::payload::FigmaPayload;
use crate::rules::{default_rules, run_rules, Rule, RuleContext};
use crate::store::{AnalysisRecord, AnalysisStore};
use crate::thresholds::ThresholdSet;
use crate::types::{AnalysisResult, DesignNode, DeviceProfile};
use crate::walker::flatten;

/// Result of a persisted run, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub project_id: i64,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

impl AnalysisResponse {
    pub fn from_record(record: &AnalysisRecord) -> Result<Self> {
        Ok(Self {
            project_id: record.project_id,
            result: record.result()?,
        })
    }
}

/// The analysis engine: a threshold set plus the rules evaluated against it.
pub struct Analyzer {
    thresholds: ThresholdSet,
    rules: Vec<Box<dyn Rule>>,
}

impl Analyzer {
    pub fn new(thresholds: ThresholdSet) -> Self {
        Self::with_rules(thresholds, default_rules())
    }

    pub fn with_rules(thresholds: ThresholdSet, rules: Vec<Box<dyn Rule>>) -> Self {
        Self { thresholds, rules }
    }

    pub fn thresholds(&self) -> &ThresholdSet {
        &self.thresholds
    }

    /// Evaluate a document without touching any store.
    pub fn analyze(&self, document: &DesignNode, device: DeviceProfile) -> Result<AnalysisResult> {
        let nodes = flatten(document);
        debug!(nodes = nodes.len(), %device, "analyzing document");

        let ctx = RuleContext {
            nodes: &nodes,
            device,
            thresholds: &self.thresholds,
        };
        let report = run_rules(&self.rules, &ctx)?;
        let conclusions = generate_conclusions(&report.issues);

        Ok(AnalysisResult {
            device,
            summary: conclusions.summary,
            opinion: conclusions.opinion,
            recommendations: conclusions.recommendations,
            metrics: report.metrics,
            issues: report.issues,
        })
    }

    /// Analyze a payload and append the run to `store`.
    pub fn run(
        &self,
        store: &dyn AnalysisStore,
        project_id: i64,
        payload: &FigmaPayload,
        device: DeviceProfile,
    ) -> Result<AnalysisResponse> {
        self.run_at(store, project_id, payload, device, Utc::now())
    }

    fn run_at(
        &self,
        store: &dyn AnalysisStore,
        project_id: i64,
        payload: &FigmaPayload,
        device: DeviceProfile,
        now: DateTime<Utc>,
    ) -> Result<AnalysisResponse> {
        let result = self.analyze(&payload.document, device)?;
        let record = AnalysisRecord::completed(project_id, &result, &payload.raw, now)?;
        store.insert(&record)?;
        info!(
            analysis_id = %record.analysis_id,
            project_id,
            issues = result.issues.len(),
            "analysis stored"
        );

        Ok(AnalysisResponse { project_id, result })
    }
}

/// The most recent analysis of a project, if any was run.
pub fn get_analysis(store: &dyn AnalysisStore, project_id: i64) -> Result<Option<AnalysisResponse>> {
    store
        .latest(project_id)?
        .as_ref()
        .map(AnalysisResponse::from_record)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UxaError;
    use crate::rules::FontSizeRule;
    use crate::store::fixtures::at;
    use crate::store::MemoryStore;
    use crate::types::{IssueKind, MetricStatus};
    use serde_json::json;

    fn analyzer() -> Analyzer {
        Analyzer::new(ThresholdSet::default())
    }

    fn node(value: serde_json::Value) -> DesignNode {
        serde_json::from_value(value).expect("node json")
    }

    #[test]
    fn primary_button_below_its_tier_is_an_error() {
        let doc = node(json!({
            "id": "1:1",
            "type": "FRAME",
            "name": "Primary Button",
            "absoluteBoundingBox": {"x": 0, "y": 0, "width": 72, "height": 60},
            "children": [{
                "id": "1:2",
                "type": "TEXT",
                "style": {"fontSize": 16},
                "fills": [{"type": "SOLID", "color": {"r": 0, "g": 0, "b": 0}}]
            }]
        }));

        let result = analyzer()
            .analyze(&doc, DeviceProfile::Desktop)
            .expect("analyze");

        assert_eq!(result.issues.len(), 1);
        let issue = &result.issues[0];
        assert_eq!(issue.message(), "High priority button height too small");
        assert_eq!(issue.expected, 72.0);
        assert_eq!(issue.actual, 60.0);
        assert_eq!(result.metrics.button_size.min_detected, Some(60.0));
        assert_eq!(result.metrics.button_size.status, MetricStatus::Error);
        assert_eq!(result.metrics.font_size.min_detected, Some(16.0));
        assert_eq!(result.metrics.font_size.status, MetricStatus::Ok);
        assert_eq!(result.metrics.contrast_ratio.status, MetricStatus::Ok);
        assert!(result.metrics.touch_target.is_none());
        assert_eq!(result.recommendations, vec!["Increase button height."]);
        assert_eq!(result.summary, "Found 1 UX issues.");

        let wire = serde_json::to_value(issue).expect("serialize");
        assert_eq!(wire["expected_min"], 72.0);
        assert_eq!(wire["actual"], 60.0);
    }

    #[test]
    fn small_text_target_on_mobile() {
        let doc = node(json!({
            "id": "t",
            "type": "TEXT",
            "absoluteBoundingBox": {"x": 0, "y": 0, "width": 20, "height": 20}
        }));

        let result = analyzer()
            .analyze(&doc, DeviceProfile::Mobile)
            .expect("analyze");
        let touch = result.metrics.touch_target.as_ref().expect("touch metric");
        assert_eq!(touch.text_min_detected, Some(20.0));
        assert_eq!(touch.status, MetricStatus::Error);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].message(), "Tappable text target too small");
    }

    #[test]
    fn deep_average_nesting_yields_one_aggregate_issue() {
        // A chain of 10 nodes has heights 9..=0, averaging 4.5.
        let mut doc = DesignNode::default();
        for _ in 0..9 {
            doc = DesignNode::default().with_children(vec![doc]);
        }
        let mut thresholds = ThresholdSet::default();
        thresholds.max_layout_depth = 3.0;

        let result = Analyzer::new(thresholds)
            .analyze(&doc, DeviceProfile::Desktop)
            .expect("analyze");
        assert_eq!(result.metrics.layout_depth.avg_depth, 4.5);
        assert_eq!(result.metrics.layout_depth.status, MetricStatus::Warning);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].kind, IssueKind::DeepNesting);

        let wire = serde_json::to_value(&result.issues[0]).expect("serialize");
        assert!(wire.get("node").is_none());
        assert_eq!(wire["expected_max"], 3.0);
        assert_eq!(wire["actual_avg_depth"], 4.5);
    }

    #[test]
    fn empty_document_has_no_issues() {
        let result = analyzer()
            .analyze(&node(json!({})), DeviceProfile::Mobile)
            .expect("analyze");
        assert_eq!(result.summary, "Found 0 UX issues.");
        assert_eq!(result.opinion, crate::conclusions::OPINION_GOOD);
        assert!(result.recommendations.is_empty());
        assert!(result.issues.is_empty());
        assert!(result
            .metrics
            .statuses()
            .iter()
            .all(|(_, status)| *status == MetricStatus::Ok));
    }

    #[test]
    fn run_persists_and_get_analysis_returns_latest() {
        let store = MemoryStore::new();
        let analyzer = analyzer();
        let small_font = FigmaPayload::from_value(json!({
            "project": {"document": {"type": "TEXT", "style": {"fontSize": 9}}}
        }))
        .expect("payload");
        let clean = FigmaPayload::from_value(json!({"document": {}})).expect("payload");

        assert!(get_analysis(&store, 11).expect("get").is_none());

        analyzer
            .run_at(&store, 11, &small_font, DeviceProfile::Desktop, at(1_000))
            .expect("run");
        let response = analyzer
            .run_at(&store, 11, &clean, DeviceProfile::Desktop, at(2_000))
            .expect("run");
        assert_eq!(response.project_id, 11);
        assert_eq!(store.len().expect("len"), 2);

        let latest = get_analysis(&store, 11).expect("get").expect("stored");
        assert_eq!(latest, response);

        let stored = store.latest(11).expect("latest").expect("record");
        assert_eq!(stored.analysis_id, "A-11-2000");
        assert_eq!(stored.raw_data, r#"{"document":{}}"#);
    }

    #[test]
    fn response_serializes_flat() {
        let store = MemoryStore::new();
        let payload = FigmaPayload::from_value(json!({})).expect("payload");
        let response = analyzer()
            .run(&store, 4, &payload, DeviceProfile::Desktop)
            .expect("run");
        let wire = serde_json::to_value(&response).expect("serialize");
        assert_eq!(wire["project_id"], 4);
        assert_eq!(wire["device"], "desktop");
        assert!(wire["metrics"]["touch_target"].is_null());
        assert!(wire.get("result").is_none());
    }

    #[test]
    fn incomplete_rule_set_is_a_config_error() {
        let analyzer = Analyzer::with_rules(ThresholdSet::default(), vec![Box::new(FontSizeRule)]);
        let err = analyzer
            .analyze(&DesignNode::default(), DeviceProfile::Desktop)
            .unwrap_err();
        assert!(matches!(err, UxaError::Config(_)));
    }
}
