mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_analyze, run_checklist, run_show};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "uxa=debug,uxa_lib=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> ExitCode {
    let args = cli::parse();
    init_logging(args.verbose);

    match args.command {
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
            run_analyze(
                args.config,
                project,
                device.into(),
                input,
                figma_url,
                db,
                format,
                output,
                fail_on_issues,
            )
            .await
        }
        Commands::Show {
            project,
            db,
            format,
            output,
        } => run_show(args.config, project, db, format, output).await,
        Commands::Checklist { format, output } => {
            run_checklist(args.config, format, output).await
        }
    }
}
