// crates/hype_power_pack/src/main.rs

use anyhow::{anyhow, Context, Result};
use std::env;
use std::io;
use tracing::{debug, error, info};

use export_options::options_document;
use minify_client::ClosureCompiler;
use script_rewriter::extractor_for_strategy;
use staging_processor::process_staging;

mod cli;
mod config;
mod result_protocol;

use config::{ExportConfig, Mode};
use result_protocol::write_result;

fn run(config: ExportConfig) -> Result<()> {
    debug!(
        hype_version = config.hype_version.as_deref().unwrap_or("unknown"),
        hype_build = config.hype_build.as_deref().unwrap_or("unknown"),
        "invoked by host"
    );

    match config.mode {
        Mode::GetOptions => {
            info!("reporting export options");
            write_result(&mut io::stdout().lock(), &options_document())
        }
        Mode::ModifyStaging(job) => {
            let extractor = extractor_for_strategy(&config.extractor)
                .ok_or_else(|| anyhow!("Unknown extraction strategy '{}'", config.extractor))?;
            let minifier = ClosureCompiler::new(config.minify_endpoint.as_str())?;
            let report = process_staging(&job, extractor.as_ref(), &minifier)
                .context("Failed to process export")?;
            info!(
                hype_id = %report.hype_id,
                scripts = report.scripts.len(),
                minified = report.minified,
                destination = %job.destination_path.display(),
                "export processed"
            );
            write_result(&mut io::stdout().lock(), &true)
        }
        Mode::Idle => {
            debug!("no mode flag given; nothing to do");
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    // stdout belongs to the result protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let matches = cli::build_cli().get_matches_from(cli::retain_known_args(env::args_os()));
    let config = ExportConfig::from_matches(&matches, |key| env::var(key).ok())?;

    run(config).map_err(|err| {
        error!("{:#}", err);
        err
    })
}
