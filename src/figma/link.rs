use url::Url;

use crate::error::{Result, UxaError};

/// The parts of a Figma share link the analyzer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigmaFileRef {
    pub file_key: String,
    /// `node-id` query parameter, normalized from `12-34` to `12:34`
    pub node_id: Option<String>,
}

/// Parse `https://www.figma.com/{file|design}/<FILE_KEY>/...` links.
pub fn parse_figma_url(value: &str) -> Result<FigmaFileRef> {
    let url = Url::parse(value.trim())?;

    let host = url.host_str().unwrap_or("");
    if !host.ends_with("figma.com") {
        return Err(UxaError::Config(format!(
            "Expected a figma.com URL with a file key, got '{value}'"
        )));
    }

    let path_segments: Vec<&str> = url.path_segments().map(|c| c.collect()).unwrap_or_default();

    let file_key = path_segments
        .iter()
        .position(|&s| s == "file" || s == "design")
        .and_then(|i| path_segments.get(i + 1))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| UxaError::Config(format!("Figma URL missing file key in '{value}'")))?;

    let node_id = url
        .query_pairs()
        .find(|(k, _)| k == "node-id")
        .map(|(_, v)| v.replace('-', ":"));

    Ok(FigmaFileRef { file_key, node_id })
}
