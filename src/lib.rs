//! # NextLens
//!
//! A React/Next.js component dependency analyzer.
//!
//! NextLens consumes component records extracted from a React/Next.js
//! codebase by an out-of-process parsing front end, builds the component
//! dependency graph, and detects circular dependencies, unreachable
//! (zombie) component clusters, and package.json dependency drift.
//!
//! ## Features
//!
//! - **Dependency graph**: Build and export component import relationships
//! - **Circular dependency detection**: DFS-based elementary-cycle
//!   extraction with ring-layout diagram payloads
//! - **Zombie cluster detection**: reachability analysis over the combined
//!   component + function-call graph, with risk classification
//! - **Package drift**: unused and missing npm dependency reporting
//! - **Multiple output formats**: JSON and plain text reports, plus
//!   DOT/JSON/Mermaid graph exports
//!
//! ## Example
//!
//! ```rust,no_run
//! use nextlens::{ComponentAnalyzer, Config, ReportFormat};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let analyzer = ComponentAnalyzer::new(config);
//!
//!     // Analyze component records produced by the parsing front end
//!     let result = analyzer.analyze_files(&["components.json"], "./my-app").await?;
//!
//!     // Generate a report
//!     let report = nextlens::reporter::Reporter::new(&Config::default())
//!         .generate(&result, ReportFormat::Json)?;
//!     println!("{}", report);
//!
//!     Ok(())
//! }
//! ```

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod diagram;
pub mod error;
pub mod graph;
pub mod reporter;
pub mod types;

// Re-export commonly used types at crate root
pub use config::Config;
pub use error::{ErrorCollector, NextLensError, Result};
pub use types::{
    ComponentRelation, DependencyAnalysisDetailedResult, DependencyAnalysisResult, Diagnostic,
    ReportFormat, RiskLevel,
};

use crate::analyzer::{
    CircularDependencyDetector, PackageDependencyAnalyzer, ZombieClusterDetector,
};
use crate::graph::{ComponentLookup, DependencyGraph, GraphBuilder};
use std::path::Path;

/// Analysis façade that coordinates graph building and all detectors.
///
/// The `ComponentAnalyzer` is the primary entry point for using NextLens
/// as a library. It handles:
/// - Loading component record files
/// - Building the lookup indexes and the dependency graph
/// - Running cycle detection, zombie detection, and package drift analysis
///
/// # Example
///
/// ```rust,no_run
/// use nextlens::{ComponentAnalyzer, Config};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = Config::default();
///     let analyzer = ComponentAnalyzer::new(config);
///
///     let result = analyzer.analyze_files(&["components.json"], "./my-app").await?;
///     println!("Found {} cycles", result.circular_dependencies.stats.total_cycles);
///     Ok(())
/// }
/// ```
pub struct ComponentAnalyzer {
    config: Config,
}

impl ComponentAnalyzer {
    /// Create a new analyzer with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build the dependency graph for a component set.
    ///
    /// # Errors
    ///
    /// Returns an error if graph construction fails.
    pub fn build_graph(&self, components: &[ComponentRelation]) -> Result<DependencyGraph> {
        let lookup = ComponentLookup::new(components, &self.config.resolution);
        GraphBuilder::new().build(components, &lookup)
    }

    /// Run the full analysis over an in-memory component set.
    ///
    /// The graph algorithms are synchronous and CPU-bound; only the
    /// package drift analysis does file I/O. Pass `None` as the project
    /// path to skip it.
    ///
    /// # Errors
    ///
    /// Returns an error if graph construction or the package.json read
    /// fails; per-file config scanning failures degrade to diagnostics.
    pub async fn analyze(
        &self,
        components: &[ComponentRelation],
        project_path: Option<&Path>,
    ) -> Result<DependencyAnalysisDetailedResult> {
        tracing::info!(components = components.len(), "Starting dependency analysis");

        let lookup = ComponentLookup::new(components, &self.config.resolution);
        let graph = GraphBuilder::new().build(components, &lookup)?;

        let circular_dependencies =
            CircularDependencyDetector::new(&self.config).detect(&graph, &lookup);
        let zombie_clusters = ZombieClusterDetector::new(&self.config).detect(components, &lookup);

        let mut diagnostics = Vec::new();
        let dependency_analysis = if let Some(project) = project_path {
            PackageDependencyAnalyzer::new(project, &self.config.packages)
                .analyze(components, &lookup, &mut diagnostics)
                .await?
        } else {
            DependencyAnalysisResult::default()
        };

        Ok(DependencyAnalysisDetailedResult {
            circular_dependencies,
            zombie_clusters,
            dependency_analysis,
            diagnostics,
            timestamp: Some(chrono::Utc::now()),
        })
    }

    /// Load component record files and run the full analysis.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails (subject to
    /// `scan.continue_on_error`), or if the analysis itself fails.
    pub async fn analyze_files<P: AsRef<Path>>(
        &self,
        inputs: &[P],
        project_path: impl AsRef<Path>,
    ) -> Result<DependencyAnalysisDetailedResult> {
        let components = self.load_components(inputs).await?;
        self.analyze(&components, Some(project_path.as_ref())).await
    }

    /// Load and concatenate component records from JSON input files.
    ///
    /// Each file holds a JSON array of component records. With
    /// `scan.continue_on_error` set, files that fail to read or parse are
    /// skipped (logged); otherwise the collected errors are returned.
    ///
    /// # Errors
    ///
    /// Returns the collected per-file errors when `continue_on_error` is
    /// off, or when every file failed.
    pub async fn load_components<P: AsRef<Path>>(
        &self,
        inputs: &[P],
    ) -> Result<Vec<ComponentRelation>> {
        use futures::future::join_all;

        let mut components = Vec::new();
        let mut collector = ErrorCollector::new();

        let results = join_all(inputs.iter().map(|input| load_component_file(input.as_ref()))).await;
        for (input, result) in inputs.iter().zip(results) {
            let path = input.as_ref();
            match result {
                Ok(mut records) => {
                    tracing::debug!(path = %path.display(), records = records.len(), "Loaded component records");
                    components.append(&mut records);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to load component records");
                    collector.add(e);
                }
            }
        }

        if !collector.is_empty() && (!self.config.scan.continue_on_error || components.is_empty()) {
            collector.into_result()?;
        }

        Ok(components)
    }
}

/// Read one component record file (a JSON array of records).
async fn load_component_file(path: &Path) -> Result<Vec<ComponentRelation>> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            crate::err!(FileNotFound {
                path: path.to_path_buf(),
            })
        } else {
            NextLensError::io(path, e, file!(), line!())
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        crate::err!(ComponentInput {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn component(name: &str, imports: &[&str]) -> ComponentRelation {
        ComponentRelation {
            name: name.to_string(),
            full_path: PathBuf::from(format!("src/{name}.tsx")),
            directory: "src".to_string(),
            imports: imports.iter().map(|s| (*s).to_string()).collect(),
            exports: vec![name.to_string()],
            functions: Vec::new(),
            function_calls: HashMap::new(),
            content: None,
        }
    }

    #[tokio::test]
    async fn test_analyze_without_project_path() {
        let analyzer = ComponentAnalyzer::new(Config::default());
        let components = vec![
            component("A", &["./B"]),
            component("B", &["./A"]),
        ];

        let result = analyzer.analyze(&components, None).await.unwrap();
        assert_eq!(result.circular_dependencies.stats.total_cycles, 1);
        assert!(result.dependency_analysis.declared_dependencies.is_empty());
        assert!(result.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_empty_input() {
        let analyzer = ComponentAnalyzer::new(Config::default());
        let result = analyzer.analyze(&[], None).await.unwrap();
        assert!(result.circular_dependencies.circular_groups.is_empty());
        assert!(result.zombie_clusters.clusters.is_empty());
    }

    #[tokio::test]
    async fn test_load_components_continue_on_error() {
        let temp = tempfile::tempdir().unwrap();
        let good = temp.path().join("good.json");
        let bad = temp.path().join("bad.json");
        tokio::fs::write(
            &good,
            r#"[{"name": "App", "fullPath": "src/App.tsx", "directory": "src"}]"#,
        )
        .await
        .unwrap();
        tokio::fs::write(&bad, "not json").await.unwrap();

        let analyzer = ComponentAnalyzer::new(Config::default());
        let components = analyzer.load_components(&[good, bad]).await.unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].name, "App");
    }

    #[tokio::test]
    async fn test_load_components_strict_mode() {
        let temp = tempfile::tempdir().unwrap();
        let bad = temp.path().join("bad.json");
        tokio::fs::write(&bad, "not json").await.unwrap();

        let mut config = Config::default();
        config.scan.continue_on_error = false;
        let analyzer = ComponentAnalyzer::new(config);
        assert!(analyzer.load_components(&[bad]).await.is_err());
    }
}
