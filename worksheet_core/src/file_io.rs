//! # File I/O Module
//!
//! Persistence collaborator for configurations and worksheets:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility on load
//! - **Revalidation**: Loaded configurations pass through `validate()`
//!
//! ## File Formats
//!
//! The last-used configuration saves as plain JSON of its fields, so any
//! key-value store can round-trip it. Worksheets save as `.wks` files
//! containing the full document JSON with a schema version header.
//!
//! ## Example
//!
//! ```rust,no_run
//! use worksheet_core::config::WorksheetConfig;
//! use worksheet_core::file_io::{load_config, save_config};
//! use std::path::Path;
//!
//! let config = WorksheetConfig::default();
//! save_config(&config, Path::new("last_config.json")).unwrap();
//! let restored = load_config(Path::new("last_config.json")).unwrap();
//! assert_eq!(restored, config);
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use crate::config::WorksheetConfig;
use crate::errors::{WorksheetError, WorksheetResult};
use crate::worksheet::{Worksheet, SCHEMA_VERSION};

/// Save the last-used configuration as plain JSON.
pub fn save_config(config: &WorksheetConfig, path: &Path) -> WorksheetResult<()> {
    config.validate()?;
    let json =
        serde_json::to_string_pretty(config).map_err(|e| WorksheetError::SerializationError {
            reason: e.to_string(),
        })?;
    write_atomic(&json, path)
}

/// Restore a configuration, revalidating it.
pub fn load_config(path: &Path) -> WorksheetResult<WorksheetConfig> {
    let contents = read_to_string(path)?;
    let config: WorksheetConfig =
        serde_json::from_str(&contents).map_err(|e| WorksheetError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;
    config.validate()?;
    Ok(config)
}

/// Save a worksheet document with atomic write semantics.
///
/// The save process:
/// 1. Serialize the worksheet to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp to the final path (atomic on most filesystems)
pub fn save_worksheet(worksheet: &Worksheet, path: &Path) -> WorksheetResult<()> {
    let json =
        serde_json::to_string_pretty(worksheet).map_err(|e| WorksheetError::SerializationError {
            reason: e.to_string(),
        })?;
    write_atomic(&json, path)
}

/// Load a worksheet document.
///
/// # Returns
///
/// * `Ok(Worksheet)` - Successfully loaded
/// * `Err(WorksheetError::VersionMismatch)` - File version is incompatible
/// * `Err(WorksheetError::SerializationError)` - Invalid JSON
/// * `Err(WorksheetError::FileError)` - I/O error
pub fn load_worksheet(path: &Path) -> WorksheetResult<Worksheet> {
    let contents = read_to_string(path)?;
    let worksheet: Worksheet =
        serde_json::from_str(&contents).map_err(|e| WorksheetError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&worksheet.meta.version)?;
    worksheet.config.validate()?;
    Ok(worksheet)
}

/// Write contents to a temp file and atomically rename into place.
fn write_atomic(contents: &str, path: &Path) -> WorksheetResult<()> {
    let tmp_path = path.with_extension("tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        WorksheetError::file_error(
            "create temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.write_all(contents.as_bytes()).map_err(|e| {
        WorksheetError::file_error(
            "write temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.sync_all().map_err(|e| {
        WorksheetError::file_error(
            "sync temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        WorksheetError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

fn read_to_string(path: &Path) -> WorksheetResult<String> {
    let mut file = File::open(path)
        .map_err(|e| WorksheetError::file_error("open", path.display().to_string(), e.to_string()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| WorksheetError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> WorksheetResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(WorksheetError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(WorksheetError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // For 0.x versions, a newer minor version is a breaking change
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(WorksheetError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("worksheet_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_config_roundtrip() {
        let path = temp_path("config");
        let config = WorksheetConfig::default();

        save_config(&config, &path).unwrap();
        let restored = load_config(&path).unwrap();
        assert_eq!(restored, config);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_worksheet_roundtrip() {
        let path = temp_path("worksheet");
        let worksheet = Worksheet::generate(WorksheetConfig::default()).unwrap();

        save_worksheet(&worksheet, &path).unwrap();
        let restored = load_worksheet(&path).unwrap();
        assert_eq!(restored.meta.id, worksheet.meta.id);
        assert_eq!(restored.problems, worksheet.problems);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/config.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_invalid_json_rejected() {
        let path = temp_path("garbage");
        fs::write(&path, "not json").unwrap();
        let err = load_config(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.99.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_newer_minor_version_rejected_on_load() {
        let path = temp_path("newer");
        let mut worksheet = Worksheet::generate(WorksheetConfig::default()).unwrap();
        worksheet.meta.version = "0.99.0".to_string();
        save_worksheet(&worksheet, &path).unwrap();

        let err = load_worksheet(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
        let _ = fs::remove_file(&path);
    }
}
