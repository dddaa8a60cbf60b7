use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use uxa_lib::DeviceProfile;

#[derive(Parser)]
#[command(name = "uxa")]
#[command(
    version,
    about = "UX Analyzer - heuristic usability checks over Figma design documents",
    long_about = "UX Analyzer (UXA)\n\nModes:\n- analyze: evaluate a Figma document (payload file or Figma URL) for a project and store the run.\n- show: print the most recent stored analysis of a project.\n- checklist: list the rules and the thresholds they use.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose (debug) logging on stderr")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) with thresholds, store path and Figma settings"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a design document and store the result for a project
    #[command(group(
        ArgGroup::new("source")
            .required(true)
            .args(["input", "figma_url"])
    ))]
    Analyze {
        #[arg(long, help = "Project the analysis belongs to")]
        project: i64,

        #[arg(long, value_enum, ignore_case = true, help = "Target device profile")]
        device: DeviceArg,

        #[arg(
            long,
            value_name = "FILE",
            help = "Figma JSON payload: a file response ({\"document\": ...}) or an import {\"project\": ...} wrapper"
        )]
        input: Option<PathBuf>,

        #[arg(
            long,
            value_name = "URL",
            help = "Figma file URL to fetch (requires FIGMA_TOKEN or FIGMA_OAUTH_TOKEN)"
        )]
        figma_url: Option<String>,

        #[arg(long, value_name = "PATH", help = "SQLite database for analysis records")]
        db: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,

        #[arg(long, help = "Exit with code 1 when any issue is found")]
        fail_on_issues: bool,
    },

    /// Show the most recent analysis of a project
    Show {
        #[arg(long, help = "Project to look up")]
        project: i64,

        #[arg(long, value_name = "PATH", help = "SQLite database for analysis records")]
        db: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// Print the rule checklist for the active thresholds
    Checklist {
        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DeviceArg {
    Desktop,
    Mobile,
}

impl From<DeviceArg> for DeviceProfile {
    fn from(arg: DeviceArg) -> Self {
        match arg {
            DeviceArg::Desktop => DeviceProfile::Desktop,
            DeviceArg::Mobile => DeviceProfile::Mobile,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
    Yaml,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, DeviceArg, OutputFormat};
    use clap::Parser;

    #[test]
    fn analyze_command_uses_defaults() {
        let cli = Cli::parse_from([
            "uxa",
            "analyze",
            "--project",
            "7",
            "--device",
            "desktop",
            "--input",
            "design.json",
        ]);

        assert!(!cli.verbose);
        assert!(cli.config.is_none());

        match cli.command {
            Commands::Analyze {
                project,
                device,
                input,
                figma_url,
                db,
                format,
                output,
                fail_on_issues,
            } => {
                assert_eq!(project, 7);
                assert_eq!(device, DeviceArg::Desktop);
                assert_eq!(input.as_deref(), Some(std::path::Path::new("design.json")));
                assert!(figma_url.is_none());
                assert!(db.is_none());
                assert!(matches!(format, OutputFormat::Json));
                assert!(output.is_none());
                assert!(!fail_on_issues);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn analyze_command_respects_overrides() {
        let cli = Cli::parse_from([
            "uxa",
            "--verbose",
            "analyze",
            "--project",
            "3",
            "--device",
            "MOBILE",
            "--figma-url",
            "https://www.figma.com/file/KEY/Name",
            "--db",
            "runs.db",
            "--format",
            "yaml",
            "--output",
            "report.yaml",
            "--fail-on-issues",
            "--config",
            "uxa.toml",
        ]);

        assert!(cli.verbose);
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("uxa.toml"))
        );
        match cli.command {
            Commands::Analyze {
                device,
                input,
                figma_url,
                db,
                format,
                output,
                fail_on_issues,
                ..
            } => {
                assert_eq!(device, DeviceArg::Mobile);
                assert!(input.is_none());
                assert_eq!(
                    figma_url.as_deref(),
                    Some("https://www.figma.com/file/KEY/Name")
                );
                assert_eq!(db.as_deref(), Some(std::path::Path::new("runs.db")));
                assert!(matches!(format, OutputFormat::Yaml));
                assert_eq!(output.as_deref(), Some(std::path::Path::new("report.yaml")));
                assert!(fail_on_issues);
            }
            _ => panic!("expected analyze command with overrides"),
        }
    }

    #[test]
    fn analyze_requires_exactly_one_source() {
        let neither = Cli::try_parse_from(["uxa", "analyze", "--project", "1", "--device", "mobile"]);
        assert!(neither.is_err());

        let both = Cli::try_parse_from([
            "uxa",
            "analyze",
            "--project",
            "1",
            "--device",
            "mobile",
            "--input",
            "a.json",
            "--figma-url",
            "https://www.figma.com/file/K/x",
        ]);
        assert!(both.is_err());
    }

    #[test]
    fn unknown_device_is_rejected() {
        let res = Cli::try_parse_from([
            "uxa",
            "analyze",
            "--project",
            "1",
            "--device",
            "tablet",
            "--input",
            "a.json",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn show_and_checklist_parse() {
        let cli = Cli::parse_from(["uxa", "show", "--project", "9", "--format", "pretty"]);
        match cli.command {
            Commands::Show {
                project, format, ..
            } => {
                assert_eq!(project, 9);
                assert!(matches!(format, OutputFormat::Pretty));
            }
            _ => panic!("expected show command"),
        }

        let cli = Cli::parse_from(["uxa", "checklist"]);
        assert!(matches!(cli.command, Commands::Checklist { .. }));
    }
}
