// crates/export_settings/tests/load_settings.rs

use export_settings::ExportSettings;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("export_info.json");
    fs::write(
        &path,
        r#"{
            "document_arguments": {"Minify using Closure Compiler": "Enabled"},
            "hype_version": "4.1.0"
        }"#,
    )?;

    let settings = ExportSettings::load(&path)?;
    assert!(settings.is_enabled("Minify using Closure Compiler"));
    Ok(())
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempdir().unwrap();
    let result = ExportSettings::load(dir.path().join("nope.json"));
    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read export info"));
}

#[test]
fn test_load_malformed_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("export_info.json");
    fs::write(&path, "document_arguments = yes").unwrap();
    let err = ExportSettings::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse export info"));
}
