//! UX Analyzer (UXA) Library
//!
//! Heuristic usability checks over Figma design documents. A document tree is
//! walked once, six independent rules evaluate it against a threshold set,
//! and the resulting issues are condensed into a summary, an opinion and a
//! list of recommendations. Runs are persisted per project.
//!
//! # Module Overview
//!
//! - [`walker`] - Pre-order traversal of the node tree
//! - [`rules`] - Button size, spacing, font size, contrast, touch target and depth rules
//! - [`conclusions`] - Summary, opinion and recommendations
//! - [`pipeline`] - The [`Analyzer`] and run orchestration
//! - [`store`] - Append-only analysis records (memory and SQLite)
//! - [`payload`] / [`figma`] - Where design documents come from
//! - [`config`] / [`thresholds`] - Configuration file support
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use uxa_lib::{Analyzer, DeviceProfile, FigmaPayload, SqliteStore, ThresholdSet};
//!
//! # fn example() -> uxa_lib::Result<()> {
//! let payload = FigmaPayload::from_slice(&std::fs::read("design.json")?)?;
//! let store = SqliteStore::open("uxa.db")?;
//! let analyzer = Analyzer::new(ThresholdSet::default());
//! let response = analyzer.run(&store, 1, &payload, DeviceProfile::Mobile)?;
//! println!("{}", response.result.summary);
//! # Ok(())
//! # }
//! ```

pub mod checklist;
pub mod conclusions;
pub mod config;
pub mod error;
pub mod figma;
pub mod output;
pub mod payload;
pub mod pipeline;
pub mod rules;
pub mod store;
pub mod thresholds;
pub mod types;
pub mod walker;

pub use checklist::{checklist, Checklist, ChecklistCategory, ChecklistRule};
pub use conclusions::{generate_conclusions, Conclusions};
pub use config::Config;
pub use error::{ErrorCategory, ErrorPayload, Result, UxaError};
pub use figma::{parse_figma_url, FigmaAuth, FigmaClient, FigmaFileRef};
pub use output::{
    AnalysisOutput, ChecklistOutput, ErrorOutput, UxaOutput, UXA_OUTPUT_VERSION,
};
pub use payload::FigmaPayload;
pub use pipeline::{get_analysis, AnalysisResponse, Analyzer};
pub use rules::{default_rules, run_rules, Rule, RuleContext, RuleKind, RuleReport};
pub use store::{AnalysisRecord, AnalysisStatus, AnalysisStore, MemoryStore, SqliteStore};
pub use thresholds::ThresholdSet;
pub use types::{AnalysisResult, DesignNode, DeviceProfile, Issue, IssueKind, Metrics};
pub use walker::flatten;
