use std::path::{Path, PathBuf};

use uxa_lib::{Config, UxaError};

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/uxa/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, UxaError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        UxaError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        UxaError::Config(prefix)
    })?;
    Ok(cfg)
}

/// `--db` wins over `store.path` from the config.
pub fn resolve_store_path(cli_db: Option<PathBuf>, config: &Config) -> PathBuf {
    cli_db.unwrap_or_else(|| config.store.path.clone())
}

/// Format effective config as a single-line string.
pub fn format_effective_config(
    config: &Config,
    store_path: &Path,
    config_source: Option<&Path>,
) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    let t = &config.thresholds;
    format!(
        "Effective config [{source}]: store={}, figma={} (timeout {}s), buttons: high={} medium={} low={}, font: desktop={} mobile={}, contrast: normal={} large={}, touch: control={} text={}, max_depth={}",
        store_path.display(),
        config.figma.base_url,
        config.figma.timeout.as_secs(),
        t.button_min_height.high,
        t.button_min_height.medium,
        t.button_min_height.low,
        t.font_min.desktop,
        t.font_min.mobile,
        t.contrast.normal_min,
        t.contrast.large_min,
        t.touch.control_min,
        t.touch.text_min,
        t.max_layout_depth,
    )
}
