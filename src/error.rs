//! Error types for NextLens.
//!
//! This module defines a comprehensive error hierarchy using `thiserror`
//! for proper error handling throughout the application. All errors
//! include context and can be easily propagated using the `?` operator.
//!
//! # Error Categories
//!
//! - **Input errors**: malformed component-record files, invalid JSON
//! - **IO errors**: file system operations
//! - **Config errors**: invalid configuration files
//! - **Analysis errors**: graph building, detector failures
//! - **Report errors**: report/export generation
//!
//! # Example
//!
//! ```rust
//! use nextlens::error::{NextLensError, Result};
//!
//! fn read_input(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .map_err(|e| NextLensError::Io {
//!             path: path.into(),
//!             source: e,
//!             src_path: file!(),
//!             src_line: line!(),
//!         })
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Macro to create errors with automatic source location tracking.
///
/// Usage:
/// ```ignore
/// return Err(err!(ConfigMissing { key: "project".to_string() }));
/// ```
#[macro_export]
macro_rules! err {
    ($variant:ident { $($field:ident: $value:expr),* $(,)? }) => {
        $crate::error::NextLensError::$variant {
            $($field: $value,)*
            src_path: file!(),
            src_line: line!(),
        }
    };
}

/// A specialized Result type for NextLens operations.
pub type Result<T> = std::result::Result<T, NextLensError>;

/// The main error type for NextLens.
///
/// This enum covers all possible error conditions that can occur
/// during input loading, graph building, analysis, and reporting.
#[derive(Error, Debug)]
pub enum NextLensError {
    // =========================================================================
    // I/O and File System Errors
    // =========================================================================
    /// I/O error with path context.
    #[error("I/O error at '{path}' ({src_path}:{src_line}): {source}")]
    Io {
        /// The path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// File not found.
    #[error("File not found: {path} ({src_path}:{src_line})")]
    FileNotFound {
        /// The missing file path
        path: PathBuf,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Component-record input parsing error.
    ///
    /// Component records are produced by the out-of-process source parser
    /// and consumed as JSON; this error covers malformed input files.
    #[error("Failed to parse component records in '{file}' ({src_path}:{src_line}): {message}")]
    ComponentInput {
        /// The file being parsed
        file: PathBuf,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration parsing error.
    #[error("Failed to parse configuration ({src_path}:{src_line}): {message}")]
    ConfigParse {
        /// Error message
        message: String,
        /// The underlying error (if any)
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}' ({src_path}:{src_line}): {message}")]
    ConfigValue {
        /// The configuration key
        key: String,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Missing required configuration.
    #[error("Missing required configuration: {key} ({src_path}:{src_line})")]
    ConfigMissing {
        /// The missing configuration key
        key: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Graph and Analysis Errors
    // =========================================================================
    /// Graph building error.
    #[error("Failed to build dependency graph ({src_path}:{src_line}): {message}")]
    GraphBuild {
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Analysis error.
    #[error("Analysis error ({src_path}:{src_line}): {message}")]
    Analysis {
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// package.json handling error.
    #[error("Failed to process package.json at '{path}' ({src_path}:{src_line}): {message}")]
    PackageJson {
        /// The package.json path
        path: PathBuf,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Report Errors
    // =========================================================================
    /// Report generation error.
    #[error("Failed to generate report ({src_path}:{src_line}): {message}")]
    ReportGeneration {
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Generic Errors
    // =========================================================================
    /// Internal error (should not happen in normal operation).
    #[error("Internal error ({src_path}:{src_line}): {message}")]
    Internal {
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Multiple errors occurred.
    #[error("Multiple errors occurred ({count} total)")]
    Multiple {
        /// Number of errors
        count: usize,
        /// The individual errors
        errors: Vec<NextLensError>,
    },
}

impl NextLensError {
    /// Creates an `Io` error.
    #[must_use]
    pub fn io(
        path: impl Into<PathBuf>,
        source: std::io::Error,
        src_path: &'static str,
        src_line: u32,
    ) -> Self {
        Self::Io {
            path: path.into(),
            source,
            src_path,
            src_line,
        }
    }

    /// Creates a `ComponentInput` error.
    #[must_use]
    pub fn component_input(
        file: impl Into<PathBuf>,
        message: String,
        src_path: &'static str,
        src_line: u32,
    ) -> Self {
        Self::ComponentInput {
            file: file.into(),
            message,
            src_path,
            src_line,
        }
    }

    /// Creates a `ConfigParse` error.
    #[must_use]
    pub fn config_parse(
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        src_path: &'static str,
        src_line: u32,
    ) -> Self {
        Self::ConfigParse {
            message,
            source,
            src_path,
            src_line,
        }
    }

    /// Creates an `Internal` error.
    #[must_use]
    pub fn internal(message: String, src_path: &'static str, src_line: u32) -> Self {
        Self::Internal {
            message,
            src_path,
            src_line,
        }
    }

    /// Determines if the error is recoverable (e.g., should continue loading
    /// other input files).
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ComponentInput { .. }
                | Self::ConfigParse { .. }
                | Self::ConfigValue { .. }
                | Self::ConfigMissing { .. }
                | Self::PackageJson { .. }
                | Self::FileNotFound { .. }
        )
    }

    /// Returns the appropriate exit code for the error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied => 13,
            Self::FileNotFound { .. } => 14,
            Self::ComponentInput { .. } => 15,
            Self::ConfigParse { .. } => 18,
            Self::ConfigValue { .. } => 19,
            Self::ConfigMissing { .. } => 20,
            Self::Multiple { .. } => 21,
            _ => 1, // Generic unhandled error
        }
    }

    /// Consolidates multiple errors into a single `NextLensError::Multiple` if there's
    /// more than one. Otherwise, returns the single error or `Ok(())` if no errors.
    pub fn collect(errors: Vec<Self>) -> Result<()> {
        if errors.is_empty() {
            Ok(())
        } else if errors.len() == 1 {
            Err(errors.into_iter().next().unwrap())
        } else {
            Err(Self::Multiple {
                count: errors.len(),
                errors,
            })
        }
    }
}

impl From<std::io::Error> for NextLensError {
    fn from(source: std::io::Error) -> Self {
        // This conversion is typically used when a PathBuf is not readily available.
        // For errors where a path is known, prefer NextLensError::io(path, source, file!(), line!())
        Self::Io {
            path: PathBuf::new(),
            source,
            src_path: file!(),
            src_line: line!(),
        }
    }
}

impl From<serde_json::Error> for NextLensError {
    fn from(source: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("JSON serialization/deserialization error: {source}"),
            src_path: file!(),
            src_line: line!(),
        }
    }
}

/// A utility for collecting multiple errors during loading or processing.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<NextLensError>,
}

impl ErrorCollector {
    /// Create a new error collector.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn add(&mut self, error: NextLensError) {
        self.errors.push(error);
    }

    /// Get the number of collected errors.
    #[must_use]
    pub fn count(&self) -> usize {
        self.errors.len()
    }

    /// Check if there are any errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert to a Result, returning Multiple error if there are any errors.
    pub fn into_result(self) -> Result<()> {
        NextLensError::collect(self.errors)
    }
}
