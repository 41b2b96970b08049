//! # File I/O Module
//!
//! Case files bundle several section analyses (typically one per load
//! combination) in a single JSON document:
//!
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility on load
//!
//! ## Example
//!
//! ```rust,no_run
//! use rc_core::file_io::{load_case_file, save_results};
//! use rc_core::calculations::calculate_all;
//! use std::path::Path;
//!
//! let file = load_case_file(Path::new("wall.rc.json"))?;
//! let results = calculate_all(&file.cases)?;
//! save_results(&results, Path::new("wall.results.json"))?;
//! # Ok::<(), rc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::{StressStrainInput, StressStrainResult};
use crate::errors::{CalcError, CalcResult};
use crate::loads::DesignSituation;

/// Current schema version for case files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// A versioned collection of analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFile {
    /// Schema version the file was written with
    pub version: String,

    /// Analyses to run, in order
    pub cases: Vec<StressStrainInput>,
}

impl CaseFile {
    /// Create a case file at the current schema version
    pub fn new(cases: Vec<StressStrainInput>) -> Self {
        CaseFile {
            version: SCHEMA_VERSION.to_string(),
            cases,
        }
    }
}

/// Save a case file with atomic write semantics.
pub fn save_case_file(file: &CaseFile, path: &Path) -> CalcResult<()> {
    write_json_atomic(file, path)
}

/// Save analysis results with atomic write semantics.
pub fn save_results(results: &[StressStrainResult], path: &Path) -> CalcResult<()> {
    write_json_atomic(&results, path)
}

/// Load a case file.
///
/// # Returns
///
/// * `Ok(CaseFile)` - Successfully loaded
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::InvalidInput)` - Unknown design situation in a case
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_case_file(path: &Path) -> CalcResult<CaseFile> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let invalid_json = |e: serde_json::Error| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    };

    let value: serde_json::Value = serde_json::from_str(&contents).map_err(invalid_json)?;
    check_design_situations(&value)?;
    let case_file: CaseFile = serde_json::from_value(value).map_err(invalid_json)?;

    validate_version(&case_file.version)?;

    Ok(case_file)
}

/// Parse every `cases[i].loads.design_situation` string up front so an
/// unknown value is reported as an input error on that field.
fn check_design_situations(value: &serde_json::Value) -> CalcResult<()> {
    let Some(cases) = value.get("cases").and_then(|c| c.as_array()) else {
        return Ok(());
    };
    for (index, case) in cases.iter().enumerate() {
        if let Some(situation) = case.pointer("/loads/design_situation").and_then(|v| v.as_str()) {
            situation.parse::<DesignSituation>().map_err(|_| {
                CalcError::invalid_input(
                    format!("cases[{}].loads.design_situation", index),
                    situation,
                    "Expected one of: permanent, temporary, extraordinary",
                )
            })?;
        }
    }
    Ok(())
}

/// Serialize to JSON, write to `<path>.tmp`, sync, then rename over `path`.
///
/// The temporary file is removed whenever a step after its creation fails.
fn write_json_atomic<T: Serialize + ?Sized>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    let written = write_and_sync(&mut tmp_file, json.as_bytes(), tmp_path);
    drop(tmp_file);

    let saved = written.and_then(|()| {
        fs::rename(tmp_path, path).map_err(|e| {
            CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
        })
    });

    if saved.is_err() {
        let _ = fs::remove_file(tmp_path);
    }
    saved
}

fn write_and_sync(file: &mut File, bytes: &[u8], tmp_path: &Path) -> CalcResult<()> {
    file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    if file_major != current_major {
        return Err(mismatch());
    }

    // For 0.x versions a newer minor version may contain breaking changes
    if *current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}
