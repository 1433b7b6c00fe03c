//! JSON report generator.

use crate::config::Config;
use crate::error::Result;
use crate::reporter::ReportGenerator;
use crate::types::DependencyAnalysisDetailedResult;
use serde::Serialize;

/// JSON report generator.
pub struct JsonReporter {
    /// Whether to pretty-print the output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            pretty: config.output.pretty,
        }
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, result: &DependencyAnalysisDetailedResult) -> Result<String> {
        let report = JsonReport::from(result);

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };

        json.map_err(|e| {
            crate::err!(ReportGeneration {
                message: format!("Failed to serialize JSON report: {e}"),
            })
        })
    }
}

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// Summary statistics
    pub summary: ReportSummary,
    /// The full analysis result
    pub result: &'a DependencyAnalysisDetailedResult,
}

impl<'a> From<&'a DependencyAnalysisDetailedResult> for JsonReport<'a> {
    fn from(result: &'a DependencyAnalysisDetailedResult) -> Self {
        Self {
            metadata: ReportMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
            summary: ReportSummary {
                total_cycles: result.circular_dependencies.stats.total_cycles,
                critical_cycles: result.circular_dependencies.stats.critical_count,
                total_zombie_clusters: result.zombie_clusters.stats.total_clusters,
                total_zombie_components: result.zombie_clusters.stats.total_zombie_components,
                unused_dependencies: result.dependency_analysis.unused_dependencies.len(),
                missing_dependencies: result.dependency_analysis.missing_dependencies.len(),
                diagnostics: result.diagnostics.len(),
                has_critical_cycles: result.has_critical_cycles(),
                has_warnings: result.has_warnings(),
            },
            result,
        }
    }
}

/// Report metadata.
#[derive(Debug, Serialize)]
pub struct ReportMetadata {
    /// NextLens version
    pub version: String,
    /// Report generation timestamp
    pub timestamp: String,
}

/// Report summary.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    /// Total elementary cycles found
    pub total_cycles: usize,
    /// Critical cycles found
    pub critical_cycles: usize,
    /// Zombie clusters found
    pub total_zombie_clusters: usize,
    /// Zombie components summed across clusters
    pub total_zombie_components: usize,
    /// Unused declared dependencies
    pub unused_dependencies: usize,
    /// Missing (undeclared) dependencies
    pub missing_dependencies: usize,
    /// Non-fatal diagnostics emitted
    pub diagnostics: usize,
    /// Whether any critical cycle exists
    pub has_critical_cycles: bool,
    /// Whether anything warning-worthy was found
    pub has_warnings: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{CircularDependencyAnalysis, ZombieClusterAnalysis};
    use crate::diagram::DiagramData;
    use crate::types::DependencyAnalysisResult;

    fn create_test_result() -> DependencyAnalysisDetailedResult {
        DependencyAnalysisDetailedResult {
            circular_dependencies: CircularDependencyAnalysis {
                circular_dependency_graph: DiagramData::empty(),
                circular_groups: Vec::new(),
                stats: Default::default(),
            },
            zombie_clusters: ZombieClusterAnalysis {
                zombie_cluster_graph: DiagramData::empty(),
                clusters: Vec::new(),
                stats: Default::default(),
            },
            dependency_analysis: DependencyAnalysisResult {
                declared_dependencies: vec!["react".to_string()],
                used_packages: vec!["react".to_string()],
                unused_dependencies: Vec::new(),
                missing_dependencies: Vec::new(),
            },
            diagnostics: Vec::new(),
            timestamp: Some(chrono::Utc::now()),
        }
    }

    #[test]
    fn test_json_report_generation() {
        let result = create_test_result();
        let config = Config::default();
        let reporter = JsonReporter::new(&config);

        let json = reporter.generate(&result).unwrap();

        // Parse to verify it's valid JSON
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(parsed["metadata"]["version"].is_string());
        assert_eq!(parsed["summary"]["total_cycles"].as_u64().unwrap(), 0);
        assert_eq!(parsed["summary"]["has_warnings"].as_bool().unwrap(), false);
        // Diagram payloads pass through with their wire shape intact
        assert_eq!(
            parsed["result"]["circularDependencies"]["circularDependencyGraph"]["version"],
            "1.1.0"
        );
    }

    #[test]
    fn test_json_report_compact() {
        let result = create_test_result();
        let mut config = Config::default();
        config.output.pretty = false;

        let reporter = JsonReporter::new(&config);
        let json = reporter.generate(&result).unwrap();
        assert!(!json.contains('\n'));
    }
}
