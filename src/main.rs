mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use huffpack::batch::{self, BatchConfig};
use std::process::ExitCode;

fn init_tracing(cli: &Cli) {
    // --quiet silences everything, --verbose honours RUST_LOG and falls back
    // to info, otherwise only warnings (failed units) are shown.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Encode {
            input,
            output,
            jobs,
        } => {
            let config = BatchConfig {
                input_dir: input,
                output_dir: output,
                jobs,
            };
            let report = batch::encode_dir(&config).context("encode failed")?;

            println!(
                "encoded {} file(s), {} failed",
                report.encoded.len(),
                report.failed.len()
            );
            for error in &report.failed {
                eprintln!("failed: {error}");
            }

            Ok(if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Decode { unit, output } => {
            let out = batch::decode_unit(&unit, &output)
                .with_context(|| format!("cannot decode {}", unit.display()))?;
            println!("decoded {}", out.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}
