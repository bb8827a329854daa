// crates/hype_power_pack/src/cli.rs

use clap::{value_parser, Arg, ArgAction, Command};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::debug;

/// Flags taking a value, as the host passes them.
const VALUE_FLAGS: [&str; 5] = [
    "hype_version",
    "hype_build",
    "modify_staging_path",
    "destination_path",
    "export_info_json_path",
];

/// Flags whose value is optional.
const OPTIONAL_VALUE_FLAGS: [&str; 1] = ["is_preview"];

const SWITCH_FLAGS: [&str; 3] = ["get_options", "help", "version"];

pub fn build_cli() -> Command {
    Command::new("hype_power_pack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Export script adding Power Pack actions to Hype documents")
        .arg(
            Arg::new("hype_version")
                .long("hype_version")
                .num_args(1)
                .help("Host application version (informational)"),
        )
        .arg(
            Arg::new("hype_build")
                .long("hype_build")
                .num_args(1)
                .help("Host application build number (informational)"),
        )
        .arg(
            Arg::new("get_options")
                .long("get_options")
                .help("Print the actions and capabilities offered to the host")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("modify_staging_path")
                .long("modify_staging_path")
                .num_args(1)
                .value_parser(value_parser!(PathBuf))
                .help("Staging directory of the export to post-process"),
        )
        .arg(
            Arg::new("destination_path")
                .long("destination_path")
                .num_args(1)
                .value_parser(value_parser!(PathBuf))
                .help("Final location of the export"),
        )
        .arg(
            Arg::new("export_info_json_path")
                .long("export_info_json_path")
                .num_args(1)
                .value_parser(value_parser!(PathBuf))
                .help("Export info JSON written by the host"),
        )
        .arg(
            Arg::new("is_preview")
                .long("is_preview")
                .num_args(0..=1)
                .default_missing_value("true")
                .help("Whether this export is a preview"),
        )
}

fn flag_name(arg: &str) -> Option<(&str, bool)> {
    let body = arg.strip_prefix("--")?;
    match body.split_once('=') {
        Some((name, _)) => Some((name, true)),
        None => Some((body, false)),
    }
}

fn is_known(name: &str) -> bool {
    VALUE_FLAGS.contains(&name)
        || OPTIONAL_VALUE_FLAGS.contains(&name)
        || SWITCH_FLAGS.contains(&name)
}

/// Drops flags the parser does not know, together with their values.
///
/// The host may pass flags added in later versions; those must not make the
/// export fail.
pub fn retain_known_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter().peekable();
    let mut kept: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        let text = arg.to_string_lossy().into_owned();
        let Some((name, inline_value)) = flag_name(&text) else {
            debug!(argument = %text, "ignoring stray argument");
            continue;
        };
        let starts_flag = |next: &OsString| next.to_string_lossy().starts_with("--");

        if is_known(name) {
            kept.push(arg);
            let takes_value = VALUE_FLAGS.contains(&name)
                || (OPTIONAL_VALUE_FLAGS.contains(&name)
                    && args.peek().map_or(false, |next| !starts_flag(next)));
            if takes_value && !inline_value {
                if let Some(value) = args.next() {
                    kept.push(value);
                }
            }
        } else {
            debug!(flag = %text, "ignoring unknown flag");
            while args.peek().map_or(false, |next| !starts_flag(next)) {
                args.next();
            }
        }
    }
    kept
}
