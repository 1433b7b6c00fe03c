//! Zombie cluster detection.
//!
//! This module finds components and functions that nothing reachable from
//! an entry point ever uses.
//!
//! # Algorithm Overview
//!
//! 1. **Combined graph**: every component contributes a component vertex
//!    with edges to each resolved import target, plus one function vertex
//!    per declared function with edges to its local callees.
//! 2. **Entry points**: vertices with zero in-degree, computed by removing
//!    every edge target from the full vertex set.
//! 3. **Reachability**: BFS from all entry points at once; anything left
//!    unmarked is a zombie candidate.
//! 4. **Clustering**: repeatedly seed from the first unclustered zombie and
//!    collect everything forward-reachable from it among the remaining
//!    zombies. A cluster is a forward-reachable set from its seed, not a
//!    true undirected connected component; two zombies that share a target
//!    but have no path to each other can land in different clusters
//!    depending on seed order. This is a deliberate approximation.
//!
//! Function vertices are carried through clustering but excluded from the
//! cluster size used for risk classification.

use crate::config::Config;
use crate::diagram::{DiagramData, DiagramEdge, DiagramNode, EdgeStyle, NodeKind};
use crate::graph::{generate_component_id, ComponentLookup, GraphVertex};
use crate::types::{ComponentRelation, RiskLevel};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// One detected zombie cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZombieClusterInfo {
    /// Synthetic cluster id (`cluster-1`, `cluster-2`, ...)
    pub id: String,
    /// Display names of the component vertices in the cluster
    pub components: Vec<String>,
    /// Component display name → its function names present in the cluster
    pub functions: BTreeMap<String, Vec<String>>,
    /// Number of component vertices (function vertices excluded)
    pub size: usize,
    /// Risk classification derived from size
    pub risk: RiskLevel,
    /// Cleanup suggestion keyed to the size bracket
    pub suggestion: String,
}

/// Aggregate statistics over all clusters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZombieClusterStats {
    /// Number of clusters
    pub total_clusters: usize,
    /// Component vertices summed across clusters
    pub total_zombie_components: usize,
    /// Size of the largest cluster
    pub largest_cluster: usize,
    /// Number of entry-point vertices in the combined graph
    pub entry_point_count: usize,
    /// Average component count per cluster
    pub average_cluster_size: f64,
}

/// Complete result of zombie cluster detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZombieClusterAnalysis {
    /// Diagram of all clusters, laid out vertically
    pub zombie_cluster_graph: DiagramData,
    /// One entry per detected cluster
    pub clusters: Vec<ZombieClusterInfo>,
    /// Aggregate statistics
    pub stats: ZombieClusterStats,
}

/// The combined component + function-call graph used for reachability.
///
/// Vertices keep insertion order so entry-point sets, BFS frontiers, and
/// cluster seeds are reproducible across runs.
#[derive(Debug, Default)]
struct CombinedGraph {
    order: Vec<GraphVertex>,
    present: HashSet<GraphVertex>,
    edges: HashMap<GraphVertex, Vec<GraphVertex>>,
    targets: HashSet<GraphVertex>,
}

impl CombinedGraph {
    fn add_vertex(&mut self, vertex: GraphVertex) {
        if self.present.insert(vertex.clone()) {
            self.order.push(vertex);
        }
    }

    fn add_edge(&mut self, from: GraphVertex, to: GraphVertex) {
        self.add_vertex(from.clone());
        self.add_vertex(to.clone());
        let out = self.edges.entry(from).or_default();
        if !out.contains(&to) {
            out.push(to.clone());
            self.targets.insert(to);
        }
    }

    fn neighbors(&self, vertex: &GraphVertex) -> &[GraphVertex] {
        self.edges.get(vertex).map_or(&[], Vec::as_slice)
    }

    /// Vertices no edge points to, in insertion order.
    fn entry_points(&self) -> Vec<GraphVertex> {
        self.order
            .iter()
            .filter(|v| !self.targets.contains(v))
            .cloned()
            .collect()
    }
}

/// Detector for clusters of unreachable components and functions.
///
/// # Example
///
/// ```rust,no_run
/// use nextlens::analyzer::ZombieClusterDetector;
/// use nextlens::config::Config;
///
/// let config = Config::default();
/// let detector = ZombieClusterDetector::new(&config);
/// ```
pub struct ZombieClusterDetector {
    medium_risk_size: usize,
    high_risk_size: usize,
    cluster_spacing: f64,
}

impl ZombieClusterDetector {
    /// Create a new detector from configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            medium_risk_size: config.analysis.medium_risk_cluster_size,
            high_risk_size: config.analysis.high_risk_cluster_size,
            cluster_spacing: config.layout.cluster_spacing,
        }
    }

    /// Detect zombie clusters over the combined component + function graph.
    ///
    /// Never fails: empty or fully reachable inputs produce empty result
    /// collections.
    #[must_use]
    pub fn detect(&self, components: &[ComponentRelation], lookup: &ComponentLookup) -> ZombieClusterAnalysis {
        tracing::debug!(components = components.len(), "Starting zombie cluster detection");

        // Phase 1: Combined graph construction
        let graph = Self::build_combined_graph(components, lookup);
        tracing::debug!(vertices = graph.order.len(), "Combined graph built");

        // Phase 2: Entry points
        let entry_points = graph.entry_points();
        tracing::debug!(entry_points = entry_points.len(), "Entry points computed");

        // Phase 3: Reachability from all entry points at once
        let reached = Self::reachable_from(&graph, &entry_points);

        // Phase 4: Forward-seed clustering over the unreached vertices
        let zombie_order: Vec<GraphVertex> = graph
            .order
            .iter()
            .filter(|v| !reached.contains(v))
            .cloned()
            .collect();
        let raw_clusters = Self::cluster_zombies(&graph, &zombie_order);
        tracing::debug!(clusters = raw_clusters.len(), zombies = zombie_order.len(), "Clustering complete");

        // Phase 5: Per-cluster metadata and diagram
        let mut clusters = Vec::with_capacity(raw_clusters.len());
        for (index, members) in raw_clusters.iter().enumerate() {
            clusters.push(self.describe_cluster(index, members, lookup));
        }
        let diagram = self.build_diagram(&raw_clusters, &clusters);

        let total_zombie_components: usize = clusters.iter().map(|c| c.size).sum();
        #[allow(clippy::cast_precision_loss)]
        let average_cluster_size = if clusters.is_empty() {
            0.0
        } else {
            total_zombie_components as f64 / clusters.len() as f64
        };
        let stats = ZombieClusterStats {
            total_clusters: clusters.len(),
            total_zombie_components,
            largest_cluster: clusters.iter().map(|c| c.size).max().unwrap_or(0),
            entry_point_count: entry_points.len(),
            average_cluster_size,
        };

        tracing::info!(
            clusters = stats.total_clusters,
            zombie_components = stats.total_zombie_components,
            "Zombie cluster detection complete"
        );

        ZombieClusterAnalysis {
            zombie_cluster_graph: diagram,
            clusters,
            stats,
        }
    }

    /// Build the combined graph: component import edges plus local
    /// function-call edges.
    fn build_combined_graph(components: &[ComponentRelation], lookup: &ComponentLookup) -> CombinedGraph {
        let mut graph = CombinedGraph::default();

        for component in components {
            let id = generate_component_id(component);
            let vertex = GraphVertex::Component(id.clone());
            graph.add_vertex(vertex.clone());

            for import in &component.imports {
                for target in lookup.resolve_import_to_component_ids(import) {
                    if target != id {
                        graph.add_edge(vertex.clone(), GraphVertex::Component(target));
                    }
                }
            }

            // Callees are assumed local to the same component
            for function in &component.functions {
                let fn_vertex = GraphVertex::function(id.clone(), function.clone());
                graph.add_vertex(fn_vertex.clone());
                if let Some(callees) = component.function_calls.get(function) {
                    for callee in callees {
                        graph.add_edge(fn_vertex.clone(), GraphVertex::function(id.clone(), callee.clone()));
                    }
                }
            }
        }

        graph
    }

    /// BFS marking everything reachable from the given start vertices.
    fn reachable_from(graph: &CombinedGraph, starts: &[GraphVertex]) -> HashSet<GraphVertex> {
        let mut reached: HashSet<GraphVertex> = starts.iter().cloned().collect();
        let mut queue: VecDeque<GraphVertex> = starts.iter().cloned().collect();

        while let Some(vertex) = queue.pop_front() {
            for neighbor in graph.neighbors(&vertex) {
                if reached.insert(neighbor.clone()) {
                    queue.push_back(neighbor.clone());
                }
            }
        }
        reached
    }

    /// Partition zombies into forward-reachable sets from successive seeds.
    fn cluster_zombies(graph: &CombinedGraph, zombies: &[GraphVertex]) -> Vec<Vec<GraphVertex>> {
        let zombie_set: HashSet<&GraphVertex> = zombies.iter().collect();
        let mut unclustered: HashSet<GraphVertex> = zombies.iter().cloned().collect();
        let mut clusters = Vec::new();

        for seed in zombies {
            if !unclustered.contains(seed) {
                continue;
            }

            let mut members = Vec::new();
            let mut queue = VecDeque::new();
            unclustered.remove(seed);
            queue.push_back(seed.clone());

            while let Some(vertex) = queue.pop_front() {
                members.push(vertex.clone());
                for neighbor in graph.neighbors(&vertex) {
                    if zombie_set.contains(neighbor) && unclustered.remove(neighbor) {
                        queue.push_back(neighbor.clone());
                    }
                }
            }
            clusters.push(members);
        }
        clusters
    }

    /// Derive display metadata for one cluster.
    fn describe_cluster(
        &self,
        index: usize,
        members: &[GraphVertex],
        lookup: &ComponentLookup,
    ) -> ZombieClusterInfo {
        let mut component_names = Vec::new();
        let mut functions: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for member in members {
            match member {
                GraphVertex::Component(id) => component_names.push(lookup.display_name(id)),
                GraphVertex::Function { component, function } => functions
                    .entry(lookup.display_name(component))
                    .or_default()
                    .push(function.clone()),
            }
        }

        let size = component_names.len();
        let risk = if size > self.high_risk_size {
            RiskLevel::High
        } else if size > self.medium_risk_size {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };
        let suggestion = match risk {
            RiskLevel::High => {
                "Large unused cluster; plan a dedicated cleanup to remove or reconnect it".to_string()
            }
            RiskLevel::Medium => {
                "Several unused components; verify they are dead and remove them".to_string()
            }
            RiskLevel::Low => "Small unused cluster; safe to remove if confirmed dead".to_string(),
        };

        ZombieClusterInfo {
            id: format!("cluster-{}", index + 1),
            components: component_names,
            functions,
            size,
            risk,
            suggestion,
        }
    }

    /// Stack all clusters vertically, each as a parent node with child
    /// component nodes and grandchild function nodes.
    fn build_diagram(&self, raw_clusters: &[Vec<GraphVertex>], clusters: &[ZombieClusterInfo]) -> DiagramData {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();

        for (index, (members, info)) in raw_clusters.iter().zip(clusters).enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let base_y = index as f64 * self.cluster_spacing;
            let parent_id = info.id.clone();

            nodes.push(
                DiagramNode::new(parent_id.clone(), NodeKind::Cluster, format!("Cluster {}", index + 1), 0.0, base_y)
                    .with_detail(format!("{} components, {} risk", info.size, info.risk)),
            );

            let mut child_x = 150.0;
            for member in members {
                match member {
                    GraphVertex::Component(id) => {
                        let node_id = format!("{parent_id}:{id}");
                        nodes.push(DiagramNode::new(
                            node_id.clone(),
                            NodeKind::Zombie,
                            id.clone(),
                            child_x,
                            base_y + 80.0,
                        ));
                        edges.push(DiagramEdge::new(
                            format!("{parent_id}-edge-{}", edges.len()),
                            parent_id.clone(),
                            node_id,
                            EdgeStyle::zombie(),
                            false,
                        ));
                        child_x += 150.0;
                    }
                    GraphVertex::Function { component, function } => {
                        let node_id = format!("{parent_id}:{component}.{function}");
                        let parent_component = format!("{parent_id}:{component}");
                        nodes.push(DiagramNode::new(
                            node_id.clone(),
                            NodeKind::Function,
                            function.clone(),
                            child_x,
                            base_y + 160.0,
                        ));
                        // Hang the function under its component when that
                        // component is in the same cluster, else under the
                        // cluster parent
                        let source = if nodes.iter().any(|n| n.id == parent_component) {
                            parent_component
                        } else {
                            parent_id.clone()
                        };
                        edges.push(DiagramEdge::new(
                            format!("{parent_id}-edge-{}", edges.len()),
                            source,
                            node_id,
                            EdgeStyle::zombie(),
                            false,
                        ));
                        child_x += 150.0;
                    }
                }
            }
        }

        DiagramData::new(nodes, edges)
    }
}
