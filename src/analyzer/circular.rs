//! Circular dependency detection.
//!
//! This module implements elementary-cycle extraction over the component
//! dependency graph.
//!
//! # Algorithm Overview
//!
//! A depth-first search runs from every not-yet-visited vertex, so every
//! weakly connected region of the graph is covered. Each vertex moves
//! through three states: unvisited, on the active recursion stack, and
//! finished.
//!
//! ```text
//! A ──▶ B ──▶ C
//! ▲           │
//! └───────────┘   back-edge C→A closes the cycle [A, B, C]
//! ```
//!
//! When a neighbor is found on the active stack, the slice of the current
//! path from that neighbor's first occurrence to the path end is one
//! elementary cycle. The search does not stop at the first cycle;
//! overlapping cycles sharing vertices are reported as distinct groups.
//!
//! Each recursion step carries its own copy of the path, so a cycle
//! recorded deep in the stack can never be corrupted by mutations made
//! while the stack unwinds.

use crate::config::Config;
use crate::diagram::{circle_position, DiagramData, DiagramEdge, DiagramNode, EdgeStyle, NodeKind};
use crate::graph::{ComponentId, ComponentLookup, DependencyGraph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One discovered elementary cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircularGroup {
    /// Synthetic group id (`cycle-1`, `cycle-2`, ...)
    pub id: String,
    /// Display names of the cycle members, resolved via lookup
    pub components: Vec<String>,
    /// The cycle path as component ids, in traversal order
    pub path: Vec<ComponentId>,
    /// Number of members
    pub size: usize,
    /// Whether the cycle exceeds the critical size threshold
    pub is_critical: bool,
    /// Break suggestions
    pub suggestions: Vec<String>,
}

/// Aggregate statistics over all discovered cycles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircularDependencyStats {
    /// Total number of elementary cycles found
    pub total_cycles: usize,
    /// Distinct vertices participating in at least one cycle
    pub nodes_in_circular: usize,
    /// Length of the longest cycle
    pub max_cycle_length: usize,
    /// Number of critical cycles
    pub critical_count: usize,
    /// Cycle id → member display names (ordered map for stable output)
    pub cycle_members: BTreeMap<String, Vec<String>>,
}

/// Complete result of circular dependency detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircularDependencyAnalysis {
    /// Diagram of the vertices participating in cycles, laid out on a ring
    pub circular_dependency_graph: DiagramData,
    /// One entry per discovered elementary cycle
    pub circular_groups: Vec<CircularGroup>,
    /// Aggregate statistics
    pub stats: CircularDependencyStats,
}

/// Mutable traversal bookkeeping, owned by the top-level detection call
/// and passed by mutable borrow into the recursive visit.
struct TraversalState {
    visited: HashSet<ComponentId>,
    on_stack: HashSet<ComponentId>,
    cycles: Vec<Vec<ComponentId>>,
}

/// Detector for circular dependencies between components.
///
/// # Example
///
/// ```rust,no_run
/// use nextlens::analyzer::CircularDependencyDetector;
/// use nextlens::config::Config;
///
/// let config = Config::default();
/// let detector = CircularDependencyDetector::new(&config);
/// ```
pub struct CircularDependencyDetector {
    critical_cycle_size: usize,
    center_x: f64,
    center_y: f64,
    radius: f64,
}

impl CircularDependencyDetector {
    /// Create a new detector from configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            critical_cycle_size: config.analysis.critical_cycle_size,
            center_x: config.layout.circle_center_x,
            center_y: config.layout.circle_center_y,
            radius: config.layout.circle_radius,
        }
    }

    /// Detect all elementary cycles in the dependency graph.
    ///
    /// Never fails: degenerate inputs (empty graph, isolated vertices)
    /// produce empty result collections.
    #[must_use]
    pub fn detect(&self, graph: &DependencyGraph, lookup: &ComponentLookup) -> CircularDependencyAnalysis {
        tracing::debug!(nodes = graph.node_count(), edges = graph.edge_count(), "Starting cycle detection");

        // Phase 1: DFS from every unvisited vertex
        let mut state = TraversalState {
            visited: HashSet::new(),
            on_stack: HashSet::new(),
            cycles: Vec::new(),
        };
        for id in graph.component_ids() {
            if !state.visited.contains(id) {
                Self::visit(graph, id, Vec::new(), &mut state);
            }
        }
        tracing::debug!(cycles = state.cycles.len(), "DFS complete");

        // Phase 2: Per-cycle metadata
        let mut groups = Vec::with_capacity(state.cycles.len());
        let mut cycle_members = BTreeMap::new();
        let mut in_cycle: Vec<ComponentId> = Vec::new();
        let mut in_cycle_seen: HashSet<ComponentId> = HashSet::new();

        for (index, path) in state.cycles.iter().enumerate() {
            let id = format!("cycle-{}", index + 1);
            let components: Vec<String> = path.iter().map(|m| lookup.display_name(m)).collect();
            let size = path.len();
            let is_critical = size > self.critical_cycle_size;
            let suggestions = vec![format!(
                "Break the cycle by extracting shared logic out of '{}'",
                components.first().map_or("", String::as_str)
            )];

            for member in path {
                if in_cycle_seen.insert(member.clone()) {
                    in_cycle.push(member.clone());
                }
            }

            cycle_members.insert(id.clone(), components.clone());
            groups.push(CircularGroup {
                id,
                components,
                path: path.clone(),
                size,
                is_critical,
                suggestions,
            });
        }

        // Phase 3: Ring layout over the distinct cycle vertices
        let diagram = self.build_diagram(&in_cycle, &state.cycles, lookup);

        let stats = CircularDependencyStats {
            total_cycles: groups.len(),
            nodes_in_circular: in_cycle.len(),
            max_cycle_length: groups.iter().map(|g| g.size).max().unwrap_or(0),
            critical_count: groups.iter().filter(|g| g.is_critical).count(),
            cycle_members,
        };

        tracing::info!(
            cycles = stats.total_cycles,
            critical = stats.critical_count,
            nodes = stats.nodes_in_circular,
            "Cycle detection complete"
        );

        CircularDependencyAnalysis {
            circular_dependency_graph: diagram,
            circular_groups: groups,
            stats,
        }
    }

    /// Recursive DFS visit.
    ///
    /// `path` is this call's own copy of the root-to-current vertex chain;
    /// a back-edge into the active stack snapshots the cycle slice out of
    /// it immediately.
    fn visit(
        graph: &DependencyGraph,
        current: &ComponentId,
        mut path: Vec<ComponentId>,
        state: &mut TraversalState,
    ) {
        state.visited.insert(current.clone());
        state.on_stack.insert(current.clone());
        path.push(current.clone());

        for neighbor in graph.neighbors(current) {
            if state.on_stack.contains(&neighbor) {
                // Back-edge: the cycle is the path slice from the
                // neighbor's first occurrence to the current end
                if let Some(pos) = path.iter().position(|p| *p == neighbor) {
                    state.cycles.push(path[pos..].to_vec());
                }
            } else if !state.visited.contains(&neighbor) {
                Self::visit(graph, &neighbor, path.clone(), state);
            }
        }

        state.on_stack.remove(current);
    }

    /// Lay the distinct cycle vertices out on a ring and connect each
    /// cycle's consecutive members (closing last→first).
    fn build_diagram(
        &self,
        in_cycle: &[ComponentId],
        cycles: &[Vec<ComponentId>],
        lookup: &ComponentLookup,
    ) -> DiagramData {
        let nodes: Vec<DiagramNode> = in_cycle
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let pos = circle_position(i, in_cycle.len(), self.center_x, self.center_y, self.radius);
                DiagramNode::new(id.clone(), NodeKind::Circular, lookup.display_name(id), pos.x, pos.y)
            })
            .collect();

        let mut edges = Vec::new();
        let mut seen_edges: HashSet<(ComponentId, ComponentId)> = HashSet::new();
        for (cycle_idx, cycle) in cycles.iter().enumerate() {
            for (i, from) in cycle.iter().enumerate() {
                let to = &cycle[(i + 1) % cycle.len()];
                if !seen_edges.insert((from.clone(), to.clone())) {
                    continue;
                }
                edges.push(DiagramEdge::new(
                    format!("cycle-{}-edge-{}", cycle_idx + 1, i),
                    from.clone(),
                    to.clone(),
                    EdgeStyle::circular(),
                    true,
                ));
            }
        }

        DiagramData::new(nodes, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolutionOptions;
    use crate::graph::GraphBuilder;
    use crate::types::ComponentRelation;
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

    fn detect(components: &[ComponentRelation]) -> CircularDependencyAnalysis {
        let lookup = ComponentLookup::new(components, &ResolutionOptions::default());
        let graph = GraphBuilder::new().build(components, &lookup).unwrap();
        CircularDependencyDetector::new(&Config::default()).detect(&graph, &lookup)
    }

    #[test]
    fn test_empty_input_yields_empty_result() {
        let result = detect(&[]);
        assert!(result.circular_groups.is_empty());
        assert!(result.circular_dependency_graph.nodes.is_empty());
        assert_eq!(result.stats.total_cycles, 0);
        assert_eq!(result.stats.max_cycle_length, 0);
    }

    #[test]
    fn test_acyclic_graph_has_no_cycles() {
        let result = detect(&[
            component("A", &["./B"]),
            component("B", &["./C"]),
            component("C", &[]),
        ]);
        assert!(result.circular_groups.is_empty());
    }

    #[test]
    fn test_triangle_with_isolated_vertex() {
        let result = detect(&[
            component("A", &["./B"]),
            component("B", &["./C"]),
            component("C", &["./A"]),
            component("D", &[]),
        ]);

        assert_eq!(result.circular_groups.len(), 1);
        let group = &result.circular_groups[0];
        assert_eq!(group.size, 3);
        assert!(!group.is_critical);
        assert_eq!(group.path.len(), 3);
        for id in ["A#A", "B#B", "C#C"] {
            assert!(group.path.contains(&id.to_string()));
        }

        // D is in no cycle and absent from the diagram
        assert_eq!(result.stats.nodes_in_circular, 3);
        assert!(!result
            .circular_dependency_graph
            .nodes
            .iter()
            .any(|n| n.id == "D#D"));
    }

    #[test]
    fn test_reported_cycles_are_real_cycles() {
        let components = vec![
            component("A", &["./B"]),
            component("B", &["./C", "./A"]),
            component("C", &["./A"]),
        ];
        let lookup = ComponentLookup::new(&components, &ResolutionOptions::default());
        let graph = GraphBuilder::new().build(&components, &lookup).unwrap();
        let result = CircularDependencyDetector::new(&Config::default()).detect(&graph, &lookup);

        assert!(!result.circular_groups.is_empty());
        for group in &result.circular_groups {
            // Walking the path edge-by-edge must return to the start
            for (i, from) in group.path.iter().enumerate() {
                let to = &group.path[(i + 1) % group.path.len()];
                assert!(
                    graph.neighbors(from).contains(to),
                    "edge {from} -> {to} missing from the graph"
                );
            }
        }
    }

    #[test]
    fn test_overlapping_cycles_are_distinct_groups() {
        // A→B→A and A→C→A share vertex A
        let result = detect(&[
            component("A", &["./B", "./C"]),
            component("B", &["./A"]),
            component("C", &["./A"]),
        ]);
        assert_eq!(result.circular_groups.len(), 2);
        assert_eq!(result.stats.total_cycles, 2);
        assert_eq!(result.stats.nodes_in_circular, 3);
    }

    #[test]
    fn test_critical_flag_boundaries() {
        // Size 3 is not critical
        let small = detect(&[
            component("A", &["./B"]),
            component("B", &["./C"]),
            component("C", &["./A"]),
        ]);
        assert!(!small.circular_groups[0].is_critical);

        // Size 4 is critical
        let large = detect(&[
            component("A", &["./B"]),
            component("B", &["./C"]),
            component("C", &["./D"]),
            component("D", &["./A"]),
        ]);
        assert!(large.circular_groups[0].is_critical);
        assert_eq!(large.stats.critical_count, 1);
    }

    #[test]
    fn test_ring_diagram_layout() {
        let result = detect(&[
            component("A", &["./B"]),
            component("B", &["./A"]),
        ]);

        let diagram = &result.circular_dependency_graph;
        assert_eq!(diagram.nodes.len(), 2);
        assert_eq!(diagram.version, "1.1.0");
        // Two nodes sit diametrically opposed on the ring
        let config = Config::default();
        let dx = diagram.nodes[0].position.x - config.layout.circle_center_x;
        assert!((dx.abs() - config.layout.circle_radius).abs() < 1e-9);
        // Ring edges close the cycle: A→B and B→A
        assert_eq!(diagram.edges.len(), 2);
        assert!(diagram.edges.iter().all(|e| e.animated));
    }

    #[test]
    fn test_stats_cycle_members_uses_display_names() {
        let result = detect(&[
            component("Header", &["./Footer"]),
            component("Footer", &["./Header"]),
        ]);
        let members = result.stats.cycle_members.get("cycle-1").unwrap();
        assert!(members.contains(&"Header".to_string()));
        assert!(members.contains(&"Footer".to_string()));
    }
}
