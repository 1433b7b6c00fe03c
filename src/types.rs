//! Core data types used throughout NextLens.
//!
//! This module defines the fundamental data structures for representing:
//! - Component records produced by the source parser
//! - Analysis results (circular dependencies, zombie clusters, package drift)
//! - Report formats and risk levels

use crate::analyzer::{CircularDependencyAnalysis, ZombieClusterAnalysis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A component record produced by the (external) TypeScript/JSX parsing
/// front end.
///
/// One physical file may export several components, so the true identity
/// key is the (`full_path`, `name`) pair — see
/// [`crate::graph::generate_component_id`].
///
/// Records are immutable inputs: produced once per analysis run, consumed
/// read-only.
///
/// # Example JSON
///
/// ```json
/// {
///   "name": "Header",
///   "fullPath": "src/components/Header.tsx",
///   "directory": "src/components",
///   "imports": ["react", "./Logo", "@/lib/utils"],
///   "exports": ["Header"],
///   "functions": ["handleClick"],
///   "functionCalls": { "handleClick": ["trackEvent"] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRelation {
    /// The declared component name (e.g., "Header")
    pub name: String,

    /// Path of the file the component lives in (unique per physical file)
    pub full_path: PathBuf,

    /// Directory containing the file
    pub directory: String,

    /// Raw import specifiers as written in source
    #[serde(default)]
    pub imports: Vec<String>,

    /// Exported symbol names
    #[serde(default)]
    pub exports: Vec<String>,

    /// Functions declared inside the component, if extracted
    #[serde(default)]
    pub functions: Vec<String>,

    /// Per-function callee lists (callees are local to the same component)
    #[serde(default)]
    pub function_calls: HashMap<String, Vec<String>>,

    /// Raw file content, if the front end chose to attach it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Risk classification for zombie clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Small cluster, low cleanup priority
    Low,
    /// Medium cluster
    Medium,
    /// Large cluster, high cleanup priority
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum ReportFormat {
    /// JSON format
    #[default]
    Json,
    /// Plain text format
    Text,
}

/// Graph output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum GraphFormat {
    /// DOT format (Graphviz)
    #[default]
    Dot,
    /// JSON format
    Json,
    /// Mermaid diagram format
    Mermaid,
}

/// A non-fatal problem encountered during analysis.
///
/// Analyzers never write to stdout or abort the run for one bad input;
/// they push a diagnostic here instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Human-readable message
    pub message: String,
    /// File the diagnostic relates to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a diagnostic without a file location.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    /// Create a diagnostic tied to a file.
    #[must_use]
    pub fn with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(p) => write!(f, "{}: {}", p.display(), self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Result of diffing declared package.json dependencies against the
/// packages actually imported by components and config files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyAnalysisResult {
    /// Packages declared in package.json (dependencies + devDependencies)
    pub declared_dependencies: Vec<String>,

    /// Packages actually imported somewhere in the codebase
    pub used_packages: Vec<String>,

    /// Declared but never imported
    pub unused_dependencies: Vec<String>,

    /// Imported but not declared
    pub missing_dependencies: Vec<String>,
}

/// The combined result of the dependency-analysis façade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyAnalysisDetailedResult {
    /// Circular dependency detection results
    pub circular_dependencies: CircularDependencyAnalysis,

    /// Zombie cluster detection results
    pub zombie_clusters: ZombieClusterAnalysis,

    /// package.json dependency diffing results
    pub dependency_analysis: DependencyAnalysisResult,

    /// Non-fatal problems encountered along the way
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,

    /// Timestamp of the analysis
    pub timestamp: Option<DateTime<Utc>>,
}

impl DependencyAnalysisDetailedResult {
    /// Check if any critical circular dependency was found.
    #[must_use]
    pub fn has_critical_cycles(&self) -> bool {
        self.circular_dependencies
            .circular_groups
            .iter()
            .any(|g| g.is_critical)
    }

    /// Check if anything warning-worthy was found (any cycle, any cluster,
    /// any package drift).
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.circular_dependencies.circular_groups.is_empty()
            || !self.zombie_clusters.clusters.is_empty()
            || !self.dependency_analysis.unused_dependencies.is_empty()
            || !self.dependency_analysis.missing_dependencies.is_empty()
    }
}
