pub mod core;
pub mod document;
pub mod metric_results;

pub use self::core::{ButtonPriority, DeviceProfile, DeviceValues, MetricStatus, PriorityValues};
pub use document::{BoundingBox, DesignNode, Paint, PaintColor, Rect, TypeStyle};
pub use metric_results::{
    AnalysisResult, ButtonSizeMetric, ButtonSpacingMetric, ContrastMetric, FontSizeMetric, Issue,
    IssueKind, LayoutDepthMetric, Metrics, TouchTargetMetric,
};
