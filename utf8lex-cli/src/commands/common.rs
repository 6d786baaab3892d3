//! Common types and utilities for utf8lex commands.
//!
//! This module provides shared types, constants, and utility functions
//! used across all command implementations to ensure consistency.

use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

// ============================================================================
// Path Utilities
// ============================================================================

/// Sanitize a user-provided path to prevent path traversal attacks.
///
/// Ensures the resolved path is within the current working directory
/// or an allowed base directory.
#[allow(dead_code)]
pub fn sanitize_path(path: &Path, base_dir: Option<&Path>) -> Result<PathBuf> {
    let base = base_dir.unwrap_or_else(|| Path::new("."));
    let base_canonical = base
        .canonicalize()
        .map_err(|e| CliError::Validation(format!("Invalid base directory: {}", e)))?;

    let path_canonical = path.canonicalize().unwrap_or_else(|_| base.join(path).to_path_buf());

    if !path_canonical.starts_with(&base_canonical) {
        return Err(CliError::Validation(
            "Path traversal detected: path must be within current directory".to_string(),
        ));
    }

    Ok(path_canonical)
}

// ============================================================================
// Error Messages
// ============================================================================

/// Standard error message templates.
pub mod error_messages {
    pub const TARGET_NOT_DIR: &str = "Target path is not a directory:";
    pub const DIR_NOT_EMPTY: &str = "Directory is not empty:";
    pub const INPUT_PATH_NOT_EXIST: &str = "Input path does not exist:";
    pub const INPUT_PATH_NOT_FILE: &str = "Input path is not a file:";
    pub const INVALID_SPEC: &str = "Lex spec is invalid:";
}

// ============================================================================
// Output Messages
// ============================================================================

/// Standard output message templates.
pub mod output_messages {
    pub const CREATED_DIR: &str = "✅ Created directory:";
    pub const CREATED_FILE: &str = "✅ Created file:";
    pub const GENERATED_DRIVER: &str = "✅ Generated driver:";
    pub const TOKEN: &str = "🔹";
}
