// crates/staging_processor/src/lib.rs

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use export_options::MINIFY_SETTING;
use export_settings::ExportSettings;
use minify_client::Minifier;
use runtime_helper::javascript_for_actions;
use script_rewriter::{rewrite_generated_script, FunctionExtractor};

pub mod fs_utils;

/// Name suffix of the scripts the host generates for each document.
pub const GENERATED_SCRIPT_SUFFIX: &str = "_hype_generated_script.js";

/// One export pass as requested by the host.
#[derive(Clone, Debug)]
pub struct StagingJob {
    /// Directory the host exported into. Its last component names the document.
    pub staging_path: PathBuf,
    /// Final location; replaced wholesale by the staging directory.
    pub destination_path: PathBuf,
    /// Export info JSON written by the host.
    pub settings_path: PathBuf,
    /// Preview runs never contact the minification service.
    pub is_preview: bool,
}

/// What a finished export pass did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessReport {
    pub hype_id: String,
    /// Rewritten scripts, at their final location under the destination.
    pub scripts: Vec<PathBuf>,
    pub minified: bool,
}

/// Derives the document identifier from the staging directory's final path
/// component.
pub fn hype_id_from_path(staging_path: &Path) -> Result<String> {
    let name = staging_path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if name.is_empty() {
        return Err(anyhow!(
            "Cannot derive a document identifier from {}",
            staging_path.display()
        ));
    }
    Ok(name)
}

/// Whether the helper block gets sent to the minification service.
pub fn should_minify(settings: &ExportSettings, is_preview: bool) -> bool {
    !is_preview && settings.is_enabled(MINIFY_SETTING)
}

/// Produces the final text of one generated script: helper code and
/// extracted functions (minified when a minifier is given) followed by the
/// rewritten body.
pub fn transform_script(
    script: &str,
    hype_id: &str,
    extractor: &dyn FunctionExtractor,
    minifier: Option<&dyn Minifier>,
) -> Result<String> {
    let rewritten = rewrite_generated_script(script, hype_id, extractor);
    let mut helper = javascript_for_actions(hype_id);
    helper.push_str(&rewritten.function_declarations());

    let mut output = match minifier {
        Some(minifier) => minifier
            .minify(&helper)
            .context("Failed to minify helper code")?,
        None => helper,
    };
    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
    output.push_str(&rewritten.body);
    Ok(output)
}

/// Rewrites the generated script at `path` in place.
pub fn modify_generated_script(
    path: &Path,
    hype_id: &str,
    extractor: &dyn FunctionExtractor,
    minifier: Option<&dyn Minifier>,
) -> Result<()> {
    let script = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let output = transform_script(&script, hype_id, extractor, minifier)
        .with_context(|| format!("Failed to transform {}", path.display()))?;
    fs::write(path, output).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(script = %path.display(), "rewrote generated script");
    Ok(())
}

/// Runs a complete export pass: load settings, rewrite every generated
/// script below the staging directory, then move the staging directory to
/// the destination.
///
/// Errors abort the pass where they happen; nothing is rolled back.
pub fn process_staging(
    job: &StagingJob,
    extractor: &dyn FunctionExtractor,
    minifier: &dyn Minifier,
) -> Result<ProcessReport> {
    let settings = ExportSettings::load(&job.settings_path)?;
    let hype_id = hype_id_from_path(&job.staging_path)?;
    if !job.staging_path.is_dir() {
        return Err(anyhow!(
            "Staging path {} is not a directory",
            job.staging_path.display()
        ));
    }

    let minify = should_minify(&settings, job.is_preview);
    info!(
        hype_id = %hype_id,
        preview = job.is_preview,
        minify,
        "processing staging directory"
    );

    let scripts = fs_utils::find_files_with_suffix(&job.staging_path, GENERATED_SCRIPT_SUFFIX)?;
    let active_minifier = if minify { Some(minifier) } else { None };
    for script in &scripts {
        modify_generated_script(script, &hype_id, extractor, active_minifier)?;
    }

    fs_utils::replace_directory(&job.staging_path, &job.destination_path).with_context(|| {
        format!(
            "Failed to move {} to {}",
            job.staging_path.display(),
            job.destination_path.display()
        )
    })?;

    let scripts = scripts
        .iter()
        .filter_map(|p| p.strip_prefix(&job.staging_path).ok())
        .map(|relative| job.destination_path.join(relative))
        .collect();

    Ok(ProcessReport {
        hype_id,
        scripts,
        minified: minify,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use script_rewriter::RegexFunctionExtractor;

    struct UppercaseMinifier;

    impl Minifier for UppercaseMinifier {
        fn minify(&self, source: &str) -> Result<String> {
            Ok(source.to_uppercase())
        }
    }

    #[test]
    fn test_hype_id_from_path() {
        assert_eq!(
            hype_id_from_path(Path::new("/tmp/export/My Document")).unwrap(),
            "My Document"
        );
        assert_eq!(hype_id_from_path(Path::new("/tmp/export/doc/")).unwrap(), "doc");
        assert!(hype_id_from_path(Path::new("/")).is_err());
        assert!(hype_id_from_path(Path::new("")).is_err());
    }

    #[test]
    fn test_should_minify_respects_preview() {
        let enabled = ExportSettings::from_pairs([(MINIFY_SETTING, "Enabled")]);
        let disabled = ExportSettings::from_pairs([(MINIFY_SETTING, "false")]);
        assert!(should_minify(&enabled, false));
        assert!(!should_minify(&enabled, true));
        assert!(!should_minify(&disabled, false));
        assert!(!should_minify(&ExportSettings::default(), false));
    }

    #[test]
    fn test_transform_script_prepends_helper() {
        let output =
            transform_script("var body = 1;", "doc", &RegexFunctionExtractor, None).unwrap();
        assert!(output.starts_with(&javascript_for_actions("doc")));
        assert!(output.ends_with("var body = 1;"));
    }

    #[test]
    fn test_transform_script_minifies_only_the_helper_block() {
        let script = r#"var f=[{name:"a",source:"function(){}"}];"#;
        let output = transform_script(
            script,
            "doc",
            &RegexFunctionExtractor,
            Some(&UppercaseMinifier),
        )
        .unwrap();
        assert!(output.contains(r#"HYPE_POWERPACKFUNCTIONS["DOC"]["A"] = FUNCTION(){};"#));
        assert!(output.ends_with(
            r#"var f=[{name:"a",source:"HYPE_PowerPackFunctions[\"doc\"][\"a\"]"}];"#
        ));
    }
}
