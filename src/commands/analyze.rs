use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{debug, info};
use uxa_lib::{
    parse_figma_url, Analyzer, Config, DeviceProfile, FigmaAuth, FigmaClient, FigmaPayload,
    SqliteStore, UxaError, UxaOutput,
};

use crate::cli::OutputFormat;
use crate::formatting::{exit_code_for_analysis, render_error, write_output};
use crate::settings::{format_effective_config, load_config, resolve_store_path};

/// Run the analyze command.
#[allow(clippy::too_many_arguments)]
pub async fn run_analyze(
    config_path: Option<PathBuf>,
    project: i64,
    device: DeviceProfile,
    input: Option<PathBuf>,
    figma_url: Option<String>,
    db: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
    fail_on_issues: bool,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output),
    };
    let store_path = resolve_store_path(db, &config);
    debug!(
        "{}",
        format_effective_config(&config, &store_path, config_path.as_deref())
    );

    let payload = match load_payload(&config, input.as_deref(), figma_url.as_deref()).await {
        Ok(payload) => payload,
        Err(err) => return render_error(err, format, output),
    };

    let store = match SqliteStore::open(&store_path) {
        Ok(store) => store,
        Err(err) => return render_error(err, format, output),
    };

    let analyzer = Analyzer::new(config.thresholds);
    let response = match analyzer.run(&store, project, &payload, device) {
        Ok(response) => response,
        Err(err) => return render_error(err, format, output),
    };
    let has_issues = !response.result.issues.is_empty();

    if let Err(err) = write_output(&UxaOutput::analysis(response), format, output.clone()) {
        return render_error(UxaError::Config(err.to_string()), format, output);
    }
    exit_code_for_analysis(has_issues, fail_on_issues)
}

async fn load_payload(
    config: &Config,
    input: Option<&Path>,
    figma_url: Option<&str>,
) -> Result<FigmaPayload, UxaError> {
    match (input, figma_url) {
        (Some(path), _) => {
            debug!(path = %path.display(), "reading design payload");
            let bytes = std::fs::read(path).map_err(|e| {
                UxaError::Config(format!("Failed to read input {}: {}", path.display(), e))
            })?;
            FigmaPayload::from_slice(&bytes)
        }
        (None, Some(url)) => {
            let file = parse_figma_url(url)?;
            let auth = FigmaAuth::from_env().ok_or_else(|| {
                UxaError::Config(
                    "FIGMA_TOKEN environment variable is required to analyze Figma URLs"
                        .to_string(),
                )
            })?;
            let client = FigmaClient::from_config(auth, &config.figma)?;
            info!(file_key = %file.file_key, node_id = ?file.node_id, "fetching design from figma");
            let raw = client.fetch_file(&file.file_key).await?;
            FigmaPayload::from_value(raw)
        }
        (None, None) => Err(UxaError::Config(
            "Either --input or --figma-url is required".to_string(),
        )),
    }
}
