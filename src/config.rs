//! Configuration module for NextLens.
//!
//! This module handles loading and validating configuration from:
//! - YAML configuration files (`nextlens.yaml`)
//! - CLI arguments
//!
//! # Configuration File Format
//!
//! ```yaml
//! # nextlens.yaml
//!
//! # Import resolution options
//! resolution:
//!   path_aliases:
//!     "@/": "src/"
//!     "~/": "src/"
//!   external_packages:
//!     - "lodash"
//!
//! # Analysis thresholds
//! analysis:
//!   critical_cycle_size: 3    # cycles larger than this are critical
//!   medium_risk_cluster_size: 2
//!   high_risk_cluster_size: 5
//!
//! # Diagram layout
//! layout:
//!   circle_center_x: 400.0
//!   circle_center_y: 300.0
//!   circle_radius: 200.0
//!   cluster_spacing: 300.0
//!
//! # package.json analysis
//! packages:
//!   config_files:
//!     - "next.config.js"
//!     - "tailwind.config.js"
//!   ignore_packages: []
//!   exclude_patterns:
//!     - "**/node_modules/**"
//!
//! # Input loading
//! scan:
//!   continue_on_error: true
//!
//! # Output options
//! output:
//!   colored: true
//!   verbose: false
//!   pretty: true
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Import resolution options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionOptions {
    /// Path aliases for import resolution (e.g., "@/" → "src/").
    /// A specifier starting with an alias key is treated as internal.
    pub path_aliases: HashMap<String, String>,

    /// Packages always treated as external, even if a component shares
    /// their name.
    pub external_packages: Vec<String>,
}

impl Default for ResolutionOptions {
    fn default() -> Self {
        let mut path_aliases = HashMap::new();
        path_aliases.insert("@/".to_string(), "src/".to_string());
        path_aliases.insert("~/".to_string(), "src/".to_string());
        Self {
            path_aliases,
            external_packages: Vec::new(),
        }
    }
}

/// Analysis thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Cycles with more members than this are flagged critical.
    #[serde(default = "default_critical_cycle_size")]
    pub critical_cycle_size: usize,

    /// Clusters with more component vertices than this are medium risk.
    #[serde(default = "default_medium_risk")]
    pub medium_risk_cluster_size: usize,

    /// Clusters with more component vertices than this are high risk.
    #[serde(default = "default_high_risk")]
    pub high_risk_cluster_size: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            critical_cycle_size: default_critical_cycle_size(),
            medium_risk_cluster_size: default_medium_risk(),
            high_risk_cluster_size: default_high_risk(),
        }
    }
}

/// Diagram layout options.
///
/// Pure presentation: these feed the position coordinates in the diagram
/// payloads and never affect graph semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// X coordinate of the circular-dependency ring center.
    #[serde(default = "default_center_x")]
    pub circle_center_x: f64,

    /// Y coordinate of the circular-dependency ring center.
    #[serde(default = "default_center_y")]
    pub circle_center_y: f64,

    /// Radius of the circular-dependency ring.
    #[serde(default = "default_radius")]
    pub circle_radius: f64,

    /// Vertical spacing between zombie clusters.
    #[serde(default = "default_cluster_spacing")]
    pub cluster_spacing: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            circle_center_x: default_center_x(),
            circle_center_y: default_center_y(),
            circle_radius: default_radius(),
            cluster_spacing: default_cluster_spacing(),
        }
    }
}

/// package.json analysis options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageOptions {
    /// Project config files scanned for package imports in addition to
    /// component imports.
    pub config_files: Vec<String>,

    /// Packages excluded from unused/missing reporting.
    pub ignore_packages: Vec<String>,

    /// Glob patterns excluded when discovering config files.
    pub exclude_patterns: Vec<String>,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self {
            config_files: vec![
                "next.config.js".to_string(),
                "next.config.mjs".to_string(),
                "tailwind.config.js".to_string(),
                "postcss.config.js".to_string(),
                "jest.config.js".to_string(),
                ".babelrc.js".to_string(),
            ],
            ignore_packages: Vec::new(),
            exclude_patterns: vec!["**/node_modules/**".to_string()],
        }
    }
}

/// Input loading options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Continue even if some component-record files fail to parse.
    #[serde(default = "default_true")]
    pub continue_on_error: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            continue_on_error: default_true(),
        }
    }
}

/// Output options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Use colored output.
    #[serde(default = "default_true")]
    pub colored: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            colored: default_true(),
            verbose: false,
            pretty: default_true(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Import resolution options
    pub resolution: ResolutionOptions,
    /// Analysis thresholds
    pub analysis: AnalysisOptions,
    /// Diagram layout
    pub layout: LayoutOptions,
    /// package.json analysis
    pub packages: PackageOptions,
    /// Input loading
    pub scan: ScanOptions,
    /// Output options
    pub output: OutputOptions,
}

impl Config {
    /// Parse a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigParse` error if the YAML is invalid, or a
    /// `ConfigValue` error if a value fails validation.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| {
            crate::err!(ConfigParse {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigValue` error for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.medium_risk_cluster_size >= self.analysis.high_risk_cluster_size {
            return Err(crate::err!(ConfigValue {
                key: "analysis.medium_risk_cluster_size".to_string(),
                message: format!(
                    "must be smaller than high_risk_cluster_size ({} >= {})",
                    self.analysis.medium_risk_cluster_size, self.analysis.high_risk_cluster_size
                ),
            }));
        }
        if self.layout.circle_radius <= 0.0 {
            return Err(crate::err!(ConfigValue {
                key: "layout.circle_radius".to_string(),
                message: "must be positive".to_string(),
            }));
        }
        Ok(())
    }

    /// Generate an example YAML configuration file.
    #[must_use]
    pub fn example_yaml() -> String {
        r#"# NextLens configuration

# Import resolution
resolution:
  path_aliases:
    "@/": "src/"
    "~/": "src/"
  external_packages: []

# Analysis thresholds
analysis:
  critical_cycle_size: 3
  medium_risk_cluster_size: 2
  high_risk_cluster_size: 5

# Diagram layout
layout:
  circle_center_x: 400.0
  circle_center_y: 300.0
  circle_radius: 200.0
  cluster_spacing: 300.0

# package.json analysis
packages:
  config_files:
    - "next.config.js"
    - "tailwind.config.js"
  ignore_packages: []
  exclude_patterns:
    - "**/node_modules/**"

# Input loading
scan:
  continue_on_error: true

# Output options
output:
  colored: true
  verbose: false
  pretty: true
"#
        .to_string()
    }
}

const fn default_critical_cycle_size() -> usize {
    3
}

const fn default_medium_risk() -> usize {
    2
}

const fn default_high_risk() -> usize {
    5
}

const fn default_center_x() -> f64 {
    400.0
}

const fn default_center_y() -> f64 {
    300.0
}

const fn default_radius() -> f64 {
    200.0
}

const fn default_cluster_spacing() -> f64 {
    300.0
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analysis.critical_cycle_size, 3);
        assert_eq!(config.analysis.medium_risk_cluster_size, 2);
        assert_eq!(config.analysis.high_risk_cluster_size, 5);
        assert!(config.scan.continue_on_error);
        assert!(config.resolution.path_aliases.contains_key("@/"));
    }

    #[test]
    fn test_from_yaml_partial() {
        let yaml = r#"
analysis:
  critical_cycle_size: 5
output:
  colored: false
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.analysis.critical_cycle_size, 5);
        assert!(!config.output.colored);
        // Untouched sections keep defaults
        assert_eq!(config.layout.circle_radius, 200.0);
    }

    #[test]
    fn test_validate_rejects_inverted_risk_brackets() {
        let yaml = r#"
analysis:
  medium_risk_cluster_size: 6
  high_risk_cluster_size: 5
"#;
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_example_yaml_round_trips() {
        let config = Config::from_yaml(&Config::example_yaml()).unwrap();
        assert_eq!(config.analysis.high_risk_cluster_size, 5);
    }
}
