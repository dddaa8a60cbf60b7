//! Resolution of an incoming design payload into the document to analyze.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, UxaError};
use crate::types::DesignNode;

/// Wrapper key used by the import service around a stored file.
const PROJECT_KEY: &str = "project";
const DOCUMENT_KEY: &str = "document";

/// A design payload: the document root plus the raw JSON it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FigmaPayload {
    pub document: DesignNode,
    pub raw: Value,
}

impl FigmaPayload {
    /// Accepts a Figma file response (`{"document": ...}`) or the import
    /// service's `{"project": {...}}` wrapper. Objects without a `document`
    /// key analyze as an empty document.
    pub fn from_value(raw: Value) -> Result<Self> {
        if !raw.is_object() {
            return Err(UxaError::validation("Invalid figma_data payload"));
        }

        let mut file = &raw;
        // The import service may nest the wrapper: {"project": {"project": {...}}}
        for _ in 0..2 {
            match file.get(PROJECT_KEY) {
                Some(inner) if inner.is_object() => file = inner,
                _ => break,
            }
        }

        let document = match file.get(DOCUMENT_KEY) {
            None | Some(Value::Null) => DesignNode::default(),
            Some(doc) if doc.is_object() => {
                DesignNode::deserialize(serde_stacker::Deserializer::new(doc))?
            }
            Some(_) => {
                return Err(UxaError::validation(
                    "Invalid figma_data payload: `document` must be an object",
                ))
            }
        };

        Ok(Self { document, raw })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_value(parse_json(bytes)?)
    }
}

/// Parse JSON without serde_json's nesting limit. Design documents nest one
/// object and one array per tree level, so real files go past the default.
pub fn parse_json(bytes: &[u8]) -> Result<Value> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}
