//! Dependency analysis module.
//!
//! This module provides the analyzers that consume the component
//! dependency graph and lookup service.
//!
//! # Analysis Types
//!
//! 1. **Circular Dependencies**: DFS-based elementary-cycle extraction
//!    with a ring-layout diagram payload.
//!
//! 2. **Zombie Clusters**: reachability analysis over the combined
//!    component + function-call graph, grouping unreachable vertices into
//!    clusters with risk classification.
//!
//! 3. **Package Drift**: diffs declared package.json dependencies against
//!    the packages components and config files actually import.
//!
//! # Example
//!
//! ```rust,no_run
//! use nextlens::analyzer::CircularDependencyDetector;
//! use nextlens::config::Config;
//!
//! let config = Config::default();
//! let detector = CircularDependencyDetector::new(&config);
//!
//! // Detect over a built graph
//! // let result = detector.detect(&graph, &lookup);
//! ```

mod circular;
mod packages;
mod zombie;

pub use circular::{
    CircularDependencyAnalysis, CircularDependencyDetector, CircularDependencyStats, CircularGroup,
};
pub use packages::PackageDependencyAnalyzer;
pub use zombie::{ZombieClusterAnalysis, ZombieClusterDetector, ZombieClusterInfo, ZombieClusterStats};
