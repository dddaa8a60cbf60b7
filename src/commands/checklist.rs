use std::path::PathBuf;
use std::process::ExitCode;

use uxa_lib::{checklist, UxaError, UxaOutput};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::settings::load_config;

/// Run the checklist command.
pub async fn run_checklist(
    config_path: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output),
    };
    let body = UxaOutput::checklist(checklist(&config.thresholds));
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(UxaError::Config(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}
