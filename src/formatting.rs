use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use uxa_lib::output::UXA_OUTPUT_VERSION;
use uxa_lib::types::MetricStatus;
use uxa_lib::{ErrorOutput, UxaError, UxaOutput};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(
    body: &UxaOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
        OutputFormat::Yaml => write_yaml_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: UxaError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = UxaOutput::Error(ErrorOutput {
        version: UXA_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json | OutputFormat::Yaml => {
            let content = match format {
                OutputFormat::Yaml => serde_yaml::to_string(&payload)
                    .unwrap_or_else(|_| "mode: error\n".into()),
                _ => serde_json::to_string(&payload)
                    .unwrap_or_else(|_| "{\"mode\":\"error\"}".into()),
            };
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    // Exit code 2 is fatal; code 1 is reserved for --fail-on-issues.
    ExitCode::from(2)
}

/// Write JSON output to file or stdout.
fn write_json_output(
    body: &UxaOutput,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

fn write_yaml_output(
    body: &UxaOutput,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_yaml::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        print!("{content}");
    }
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &UxaOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &UxaOutput, colorize: bool) -> String {
    match body {
        UxaOutput::Analysis(out) => {
            let mut buf = String::new();
            let result = &out.response.result;
            let clean = result.issues.is_empty();
            let header = color(
                if clean { "[OK]" } else { "[ISSUES]" },
                if clean { "32" } else { "33" },
                colorize,
            );
            writeln!(
                buf,
                "{} Project {} ({})",
                header, out.response.project_id, result.device
            )
            .ok();
            writeln!(buf, "{}", result.summary).ok();
            writeln!(buf, "Opinion: {}", result.opinion).ok();

            writeln!(buf, "Metrics:").ok();
            for (name, status) in result.metrics.statuses() {
                writeln!(buf, "- {:16} {}", name, status_label(status, colorize)).ok();
            }

            if !result.issues.is_empty() {
                writeln!(buf, "Issues:").ok();
                for issue in &result.issues {
                    writeln!(buf, "- {}", issue.message()).ok();
                }
            }

            if !result.recommendations.is_empty() {
                writeln!(buf, "Recommendations:").ok();
                for rec in &result.recommendations {
                    writeln!(buf, "- {rec}").ok();
                }
            }
            buf
        }
        UxaOutput::Checklist(out) => {
            let mut buf = String::new();
            let header = color("[CHECKLIST]", "36", colorize);
            writeln!(buf, "{} UX rules", header).ok();
            for category in &out.checklist.categories {
                writeln!(buf, "{}:", category.name).ok();
                for rule in &category.rules {
                    writeln!(buf, "- {}", rule.description).ok();
                }
            }
            buf
        }
        UxaOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

fn status_label(status: MetricStatus, colorize: bool) -> String {
    match status {
        MetricStatus::Ok => color("ok", "32", colorize),
        MetricStatus::Warning => color("warning", "33", colorize),
        MetricStatus::Error => color("error", "31", colorize),
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Determine exit code for the analyze command.
pub fn exit_code_for_analysis(has_issues: bool, fail_on_issues: bool) -> ExitCode {
    if has_issues && fail_on_issues {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
