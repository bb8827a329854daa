// crates/hype_power_pack/src/config.rs

use anyhow::{anyhow, Result};
use clap::ArgMatches;
use std::path::PathBuf;

use export_settings::is_truthy;
use minify_client::DEFAULT_ENDPOINT;
use staging_processor::StagingJob;

/// Replaces the minification endpoint.
pub const MINIFY_URL_ENV: &str = "HYPE_POWER_PACK_MINIFY_URL";
/// Selects the function extraction strategy (`regex` or `scanner`).
pub const EXTRACTOR_ENV: &str = "HYPE_POWER_PACK_EXTRACTOR";

pub const DEFAULT_EXTRACTOR: &str = "regex";

/// What the host asked for in this invocation.
#[derive(Clone, Debug)]
pub enum Mode {
    GetOptions,
    ModifyStaging(StagingJob),
    /// Neither mode flag was given.
    Idle,
}

/// Runtime configuration composed from CLI + environment.
#[derive(Clone, Debug)]
pub struct ExportConfig {
    pub hype_version: Option<String>,
    pub hype_build: Option<String>,
    pub mode: Mode,
    pub minify_endpoint: String,
    pub extractor: String,
}

fn required_path(matches: &ArgMatches, id: &str) -> Result<PathBuf> {
    matches
        .get_one::<PathBuf>(id)
        .cloned()
        .ok_or_else(|| anyhow!("--{} is required with --modify_staging_path", id))
}

impl ExportConfig {
    /// Builds the configuration from parsed flags and a variable lookup
    /// (normally `std::env::var`).
    pub fn from_matches<F>(matches: &ArgMatches, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = if matches.get_flag("get_options") {
            Mode::GetOptions
        } else if let Some(staging_path) = matches.get_one::<PathBuf>("modify_staging_path") {
            Mode::ModifyStaging(StagingJob {
                staging_path: staging_path.clone(),
                destination_path: required_path(matches, "destination_path")?,
                settings_path: required_path(matches, "export_info_json_path")?,
                is_preview: matches
                    .get_one::<String>("is_preview")
                    .map_or(false, |v| is_truthy(v)),
            })
        } else {
            Mode::Idle
        };

        Ok(Self {
            hype_version: matches.get_one::<String>("hype_version").cloned(),
            hype_build: matches.get_one::<String>("hype_build").cloned(),
            mode,
            minify_endpoint: env(MINIFY_URL_ENV)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            extractor: env(EXTRACTOR_ENV)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_EXTRACTOR.to_string()),
        })
    }
}
