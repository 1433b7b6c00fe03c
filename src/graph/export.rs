//! Graph export functionality.
//!
//! This module provides functions to export the component dependency
//! graph in various formats for visualization and analysis.

use crate::error::Result;
use crate::graph::builder::DependencyGraph;
use crate::types::GraphFormat;
use serde::Serialize;

/// Export the dependency graph to the specified format.
///
/// # Supported Formats
///
/// - **DOT**: Graphviz DOT format for visualization
/// - **JSON**: Structured JSON for programmatic access
/// - **Mermaid**: Mermaid diagram syntax for documentation
///
/// # Example
///
/// ```rust,no_run
/// use nextlens::graph::{export_graph, DependencyGraph};
/// use nextlens::types::GraphFormat;
///
/// let graph = DependencyGraph::new();
/// let dot = export_graph(&graph, GraphFormat::Dot).unwrap();
/// println!("{}", dot);
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_graph(graph: &DependencyGraph, format: GraphFormat) -> Result<String> {
    match format {
        GraphFormat::Dot => Ok(export_dot(graph)),
        GraphFormat::Json => export_json(graph),
        GraphFormat::Mermaid => Ok(export_mermaid(graph)),
    }
}

/// Export to Graphviz DOT format.
fn export_dot(graph: &DependencyGraph) -> String {
    let mut dot = String::new();
    dot.push_str("digraph NextLens {\n");
    dot.push_str("    rankdir=TB;\n");
    dot.push_str("    node [shape=box, style=rounded];\n");
    dot.push_str("    \n");

    for node in graph.nodes() {
        let label = escape_dot_string(&format!(
            "{}\n{}",
            node.name,
            node.file_path.display()
        ));
        let node_id = escape_dot_id(&node.id);
        dot.push_str(&format!(
            "    \"{node_id}\" [label=\"{label}\", fillcolor=lightblue, style=\"rounded,filled\"];\n"
        ));
    }
    dot.push('\n');

    for (from, to) in graph.edge_list() {
        let from_id = escape_dot_id(&from);
        let to_id = escape_dot_id(&to);
        dot.push_str(&format!(
            "    \"{from_id}\" -> \"{to_id}\" [style=solid, color=blue];\n"
        ));
    }

    dot.push_str("}\n");
    dot
}

/// Export to JSON format.
fn export_json(graph: &DependencyGraph) -> Result<String> {
    #[derive(Serialize)]
    struct JsonGraph {
        nodes: Vec<JsonNode>,
        edges: Vec<JsonEdge>,
        metadata: JsonMetadata,
    }

    #[derive(Serialize)]
    struct JsonNode {
        id: String,
        name: String,
        file_path: String,
    }

    #[derive(Serialize)]
    struct JsonEdge {
        from: String,
        to: String,
    }

    #[derive(Serialize)]
    struct JsonMetadata {
        total_nodes: usize,
        total_edges: usize,
    }

    let nodes: Vec<JsonNode> = graph
        .nodes()
        .map(|node| JsonNode {
            id: node.id.clone(),
            name: node.name.clone(),
            file_path: node.file_path.to_string_lossy().to_string(),
        })
        .collect();

    let edges: Vec<JsonEdge> = graph
        .edge_list()
        .into_iter()
        .map(|(from, to)| JsonEdge { from, to })
        .collect();

    let json_graph = JsonGraph {
        metadata: JsonMetadata {
            total_nodes: nodes.len(),
            total_edges: edges.len(),
        },
        nodes,
        edges,
    };

    serde_json::to_string_pretty(&json_graph).map_err(|e| {
        crate::err!(ReportGeneration {
            message: format!("Failed to serialize graph to JSON: {e}"),
        })
    })
}

/// Export to Mermaid diagram format.
fn export_mermaid(graph: &DependencyGraph) -> String {
    let mut mermaid = String::new();
    mermaid.push_str("graph TD\n");
    mermaid.push_str("    %% NextLens Component Dependency Graph\n\n");

    for node in graph.nodes() {
        let id = sanitize_mermaid_id(&node.id);
        let label = escape_mermaid_string(&node.name);
        mermaid.push_str(&format!("    {id}[\"{label}\"]\n"));
    }

    mermaid.push('\n');

    for (from, to) in graph.edge_list() {
        let from_id = sanitize_mermaid_id(&from);
        let to_id = sanitize_mermaid_id(&to);
        mermaid.push_str(&format!("    {from_id} --> {to_id}\n"));
    }

    mermaid.push_str("\n    %% Styling\n");
    mermaid.push_str("    classDef component fill:#e1f5fe,stroke:#01579b\n");

    let ids: Vec<String> = graph
        .nodes()
        .map(|n| sanitize_mermaid_id(&n.id))
        .collect();
    if !ids.is_empty() {
        mermaid.push_str(&format!("    class {} component\n", ids.join(",")));
    }

    mermaid
}

/// Escape a string for use in DOT labels.
fn escape_dot_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Escape a string for use as a DOT node ID.
fn escape_dot_id(s: &str) -> String {
    s.replace(['#', ':', '/', '.', '-'], "_")
}

/// Sanitize a string for use as a Mermaid node ID.
fn sanitize_mermaid_id(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Escape a string for use in Mermaid labels.
fn escape_mermaid_string(s: &str) -> String {
    s.replace('"', "'").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolutionOptions;
    use crate::graph::{ComponentLookup, GraphBuilder};
    use crate::types::ComponentRelation;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn create_test_graph() -> DependencyGraph {
        let components = vec![
            ComponentRelation {
                name: "Header".to_string(),
                full_path: PathBuf::from("src/Header.tsx"),
                directory: "src".to_string(),
                imports: vec!["./Logo".to_string(), "react".to_string()],
                exports: vec!["Header".to_string()],
                functions: Vec::new(),
                function_calls: HashMap::new(),
                content: None,
            },
            ComponentRelation {
                name: "Logo".to_string(),
                full_path: PathBuf::from("src/Logo.tsx"),
                directory: "src".to_string(),
                imports: Vec::new(),
                exports: vec!["Logo".to_string()],
                functions: Vec::new(),
                function_calls: HashMap::new(),
                content: None,
            },
        ];
        let lookup = ComponentLookup::new(&components, &ResolutionOptions::default());
        GraphBuilder::new().build(&components, &lookup).unwrap()
    }

    #[test]
    fn test_export_dot() {
        let graph = create_test_graph();
        let dot = export_dot(&graph);

        assert!(dot.contains("digraph NextLens"));
        assert!(dot.contains("Header"));
        assert!(dot.contains("Header_Header\" -> \"Logo_Logo"));
    }

    #[test]
    fn test_export_json() {
        let graph = create_test_graph();
        let json = export_json(&graph).unwrap();

        assert!(json.contains("\"nodes\""));
        assert!(json.contains("\"edges\""));
        assert!(json.contains("\"metadata\""));

        // Parse to verify it's valid JSON
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["metadata"]["total_nodes"].as_u64().unwrap(), 2);
        assert_eq!(parsed["metadata"]["total_edges"].as_u64().unwrap(), 1);
    }

    #[test]
    fn test_export_mermaid() {
        let graph = create_test_graph();
        let mermaid = export_mermaid(&graph);

        assert!(mermaid.contains("graph TD"));
        assert!(mermaid.contains("Header_Header --> Logo_Logo"));
    }

    #[test]
    fn test_escape_dot_string() {
        assert_eq!(escape_dot_string("hello\nworld"), "hello\\nworld");
        assert_eq!(escape_dot_string("say \"hi\""), "say \\\"hi\\\"");
    }

    #[test]
    fn test_sanitize_mermaid_id() {
        assert_eq!(sanitize_mermaid_id("Header#Header"), "Header_Header");
    }
}
