use serde::{Deserialize, Serialize};

use crate::checklist::Checklist;
use crate::error::ErrorPayload;
use crate::pipeline::AnalysisResponse;

/// Schema version for output payloads.
pub const UXA_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum UxaOutput {
    Analysis(AnalysisOutput),
    Checklist(ChecklistOutput),
    Error(ErrorOutput),
}

impl UxaOutput {
    pub fn analysis(response: AnalysisResponse) -> Self {
        UxaOutput::Analysis(AnalysisOutput {
            version: UXA_OUTPUT_VERSION.to_string(),
            response,
        })
    }

    pub fn checklist(checklist: Checklist) -> Self {
        UxaOutput::Checklist(ChecklistOutput {
            version: UXA_OUTPUT_VERSION.to_string(),
            checklist,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub version: String,
    #[serde(flatten)]
    pub response: AnalysisResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistOutput {
    pub version: String,
    #[serde(flatten)]
    pub checklist: Checklist,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}
