//! Integration tests for NextLens.
//!
//! These tests verify the end-to-end functionality of component loading,
//! graph building, the detectors, and the reporters over shared fixtures.

use nextlens::{ComponentAnalyzer, Config};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn components_fixture() -> PathBuf {
    fixtures_path().join("components.json")
}

fn project_fixture() -> PathBuf {
    fixtures_path().join("project")
}

mod loading_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_load_component_records() {
        let analyzer = ComponentAnalyzer::new(Config::default());
        let components = analyzer
            .load_components(&[components_fixture()])
            .await
            .unwrap();

        assert_eq!(components.len(), 6);
        let header = components.iter().find(|c| c.name == "Header").unwrap();
        assert_eq!(
            header.full_path,
            PathBuf::from("src/components/Header.tsx")
        );
        assert!(header.imports.contains(&"./Nav".to_string()));

        let widget = components.iter().find(|c| c.name == "OldWidget").unwrap();
        assert_eq!(widget.functions.len(), 2);
        assert_eq!(widget.function_calls["formatLabel"], vec!["renderBadge"]);
    }

    #[tokio::test]
    async fn test_load_missing_file_fails_in_strict_mode() {
        let mut config = Config::default();
        config.scan.continue_on_error = false;
        let analyzer = ComponentAnalyzer::new(config);

        let result = analyzer
            .load_components(&[fixtures_path().join("does-not-exist.json")])
            .await;
        assert!(result.is_err());
    }
}

mod graph_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use nextlens::types::GraphFormat;

    #[tokio::test]
    async fn test_build_graph_from_fixture() {
        let analyzer = ComponentAnalyzer::new(Config::default());
        let components = analyzer
            .load_components(&[components_fixture()])
            .await
            .unwrap();
        let graph = analyzer.build_graph(&components).unwrap();

        assert_eq!(graph.node_count(), 6);
        // External imports (react, axios) never become edges
        assert_eq!(graph.edge_count(), 6);
        assert_eq!(
            graph.neighbors("App#App"),
            vec!["Header#Header".to_string()]
        );
        // No component ever points at itself
        for id in graph.component_ids() {
            assert!(!graph.neighbors(id).contains(id));
        }
    }

    #[tokio::test]
    async fn test_graph_export_formats() {
        let analyzer = ComponentAnalyzer::new(Config::default());
        let components = analyzer
            .load_components(&[components_fixture()])
            .await
            .unwrap();
        let graph = analyzer.build_graph(&components).unwrap();

        let dot = nextlens::graph::export_graph(&graph, GraphFormat::Dot).unwrap();
        assert!(dot.contains("digraph"));
        assert!(dot.contains("Header"));

        let json = nextlens::graph::export_graph(&graph, GraphFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["metadata"]["total_nodes"].as_u64().unwrap(), 6);

        let mermaid = nextlens::graph::export_graph(&graph, GraphFormat::Mermaid).unwrap();
        assert!(mermaid.contains("graph TD"));
    }
}

mod circular_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_fixture_cycles() {
        let analyzer = ComponentAnalyzer::new(Config::default());
        let components = analyzer
            .load_components(&[components_fixture()])
            .await
            .unwrap();
        let result = analyzer.analyze(&components, None).await.unwrap();

        let circular = &result.circular_dependencies;
        // Header→Nav→Footer→Header and OldWidget↔OldHelper
        assert_eq!(circular.stats.total_cycles, 2);
        assert_eq!(circular.stats.max_cycle_length, 3);
        assert_eq!(circular.stats.critical_count, 0);
        assert_eq!(circular.stats.nodes_in_circular, 5);

        let triangle = circular
            .circular_groups
            .iter()
            .find(|g| g.size == 3)
            .unwrap();
        for name in ["Header", "Nav", "Footer"] {
            assert!(triangle.components.contains(&name.to_string()));
        }
        // App feeds the cycle but is not part of it
        assert!(!triangle.components.contains(&"App".to_string()));

        // The diagram carries only cycle members, on the wire shape
        let diagram = &circular.circular_dependency_graph;
        assert_eq!(diagram.version, "1.1.0");
        assert_eq!(diagram.nodes.len(), 5);
        assert!(!diagram.nodes.iter().any(|n| n.id == "App#App"));
    }
}

mod zombie_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use nextlens::RiskLevel;

    #[tokio::test]
    async fn test_fixture_zombie_clusters() {
        let analyzer = ComponentAnalyzer::new(Config::default());
        let components = analyzer
            .load_components(&[components_fixture()])
            .await
            .unwrap();
        let result = analyzer.analyze(&components, None).await.unwrap();

        let zombies = &result.zombie_clusters;
        // App is the only vertex nothing points to
        assert_eq!(zombies.stats.entry_point_count, 1);

        // The legacy pair is dead; its mutually recursive functions form a
        // second cluster because component vertices have no edges to their
        // own functions
        assert_eq!(zombies.stats.total_clusters, 2);
        assert_eq!(zombies.stats.total_zombie_components, 2);

        let pair = zombies.clusters.iter().find(|c| c.size == 2).unwrap();
        assert!(pair.components.contains(&"OldWidget".to_string()));
        assert!(pair.components.contains(&"OldHelper".to_string()));
        assert_eq!(pair.risk, RiskLevel::Low);

        let fn_cluster = zombies.clusters.iter().find(|c| c.size == 0).unwrap();
        let fns = fn_cluster.functions.get("OldWidget").unwrap();
        assert!(fns.contains(&"formatLabel".to_string()));
        assert!(fns.contains(&"renderBadge".to_string()));

        // Reachable components never appear in any cluster
        for cluster in &zombies.clusters {
            for name in ["App", "Header", "Nav", "Footer"] {
                assert!(!cluster.components.contains(&name.to_string()));
            }
        }
    }
}

mod package_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_fixture_package_drift() {
        let analyzer = ComponentAnalyzer::new(Config::default());
        let components = analyzer
            .load_components(&[components_fixture()])
            .await
            .unwrap();
        let result = analyzer
            .analyze(&components, Some(project_fixture().as_path()))
            .await
            .unwrap();

        let packages = &result.dependency_analysis;
        assert_eq!(
            packages.declared_dependencies,
            vec!["lodash", "react", "tailwindcss"]
        );
        // axios is imported by App but never declared
        assert_eq!(packages.missing_dependencies, vec!["axios"]);
        // lodash is declared but never imported; tailwindcss is used by
        // tailwind.config.js
        assert_eq!(packages.unused_dependencies, vec!["lodash"]);
        assert!(result.diagnostics.is_empty());
    }
}

mod reporter_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use nextlens::reporter::Reporter;
    use nextlens::ReportFormat;

    async fn full_result() -> nextlens::DependencyAnalysisDetailedResult {
        let analyzer = ComponentAnalyzer::new(Config::default());
        let components = analyzer
            .load_components(&[components_fixture()])
            .await
            .unwrap();
        analyzer
            .analyze(&components, Some(project_fixture().as_path()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_report_end_to_end() {
        let result = full_result().await;
        let report = Reporter::new(&Config::default())
            .generate(&result, ReportFormat::Json)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(parsed["summary"]["total_cycles"].as_u64().unwrap(), 2);
        assert_eq!(
            parsed["summary"]["total_zombie_clusters"].as_u64().unwrap(),
            2
        );
        assert_eq!(
            parsed["result"]["zombieClusters"]["zombieClusterGraph"]["version"],
            "1.1.0"
        );
        // Wire contract: node positions and edge markers survive the trip
        let node = &parsed["result"]["circularDependencies"]["circularDependencyGraph"]["nodes"][0];
        assert!(node["position"]["x"].is_number());
        assert!(node["type"].is_string());
    }

    #[tokio::test]
    async fn test_text_report_end_to_end() {
        let result = full_result().await;
        let mut config = Config::default();
        config.output.colored = false;

        let report = Reporter::new(&config)
            .generate(&result, ReportFormat::Text)
            .unwrap();

        assert!(report.contains("NextLens Analysis"));
        assert!(report.contains("Circular Dependencies"));
        assert!(report.contains("Zombie Clusters"));
        assert!(report.contains("unused lodash"));
        assert!(report.contains("missing axios"));
    }
}

mod determinism_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_repeated_analysis_is_stable() {
        let analyzer = ComponentAnalyzer::new(Config::default());
        let components = analyzer
            .load_components(&[components_fixture()])
            .await
            .unwrap();

        let first = analyzer.analyze(&components, None).await.unwrap();
        let second = analyzer.analyze(&components, None).await.unwrap();

        let groups = |r: &nextlens::DependencyAnalysisDetailedResult| {
            r.circular_dependencies
                .circular_groups
                .iter()
                .map(|g| g.path.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(groups(&first), groups(&second));

        let clusters = |r: &nextlens::DependencyAnalysisDetailedResult| {
            r.zombie_clusters
                .clusters
                .iter()
                .map(|c| c.components.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(clusters(&first), clusters(&second));
    }

    #[tokio::test]
    async fn test_empty_input_end_to_end() {
        let analyzer = ComponentAnalyzer::new(Config::default());
        let result = analyzer.analyze(&[], None).await.unwrap();

        assert!(result.circular_dependencies.circular_groups.is_empty());
        assert!(result.zombie_clusters.clusters.is_empty());
        assert!(!result.has_warnings());
    }
}
