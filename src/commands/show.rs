use std::path::PathBuf;
use std::process::ExitCode;

use uxa_lib::{get_analysis, SqliteStore, UxaError, UxaOutput};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::settings::{load_config, resolve_store_path};

/// Run the show command.
pub async fn run_show(
    config_path: Option<PathBuf>,
    project: i64,
    db: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output),
    };
    let store_path = resolve_store_path(db, &config);
    let store = match SqliteStore::open(&store_path) {
        Ok(store) => store,
        Err(err) => return render_error(err, format, output),
    };

    let response = match get_analysis(&store, project) {
        Ok(Some(response)) => response,
        Ok(None) => {
            return render_error(
                UxaError::NotFound(format!("No analysis found for project {project}")),
                format,
                output,
            )
        }
        Err(err) => return render_error(err, format, output),
    };

    if let Err(err) = write_output(&UxaOutput::analysis(response), format, output.clone()) {
        return render_error(UxaError::Config(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}
