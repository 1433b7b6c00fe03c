//! Graph builder implementation.
//!
//! This module provides the `DependencyGraph` structure and the
//! `GraphBuilder` which constructs it from component records and the
//! lookup service.
//!
//! # Algorithm
//!
//! 1. **Node phase**: add one vertex per component (deduplicated by id),
//!    preserving input order so traversals are deterministic.
//! 2. **Edge phase**: resolve every import of every component through the
//!    lookup service, deduplicate targets, drop self-references, and add
//!    the surviving edges.
//!
//! Building is a pure function of its inputs: no I/O, no input mutation,
//! and the same component set produces the same adjacency relation for
//! any input permutation.

use crate::error::Result;
use crate::graph::identity::{generate_component_id, ComponentId};
use crate::graph::lookup::ComponentLookup;
use crate::types::ComponentRelation;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// A component vertex in the dependency graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentNode {
    /// Canonical component id
    pub id: ComponentId,
    /// Declared component name
    pub name: String,
    /// File the component lives in
    pub file_path: PathBuf,
}

/// The component dependency graph.
///
/// Wraps a petgraph directed graph with an id index and an
/// insertion-order vector. Edges mean "imports": `A → B` when component A
/// imports component B. The structure is built once per analysis run and
/// read-only afterwards; detector bookkeeping (visited sets, recursion
/// stacks) lives with the detectors, not here.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// The underlying petgraph directed graph
    inner: DiGraph<ComponentNode, ()>,

    /// Index from component id to petgraph NodeIndex
    node_index: HashMap<ComponentId, NodeIndex>,

    /// Component ids in insertion order; traversal order follows this so
    /// detector output is reproducible
    order: Vec<ComponentId>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component vertex.
    ///
    /// Returns the component id. A second component with the same id is
    /// not inserted again; a collision between distinct files is logged
    /// because it would silently merge unrelated components.
    pub fn add_component(&mut self, component: &ComponentRelation) -> ComponentId {
        let id = generate_component_id(component);

        if let Some(&idx) = self.node_index.get(&id) {
            if self.inner[idx].file_path != component.full_path {
                tracing::warn!(
                    id = %id,
                    first = %self.inner[idx].file_path.display(),
                    second = %component.full_path.display(),
                    "Component id collision; vertices merged"
                );
            }
            return id;
        }

        let idx = self.inner.add_node(ComponentNode {
            id: id.clone(),
            name: component.name.clone(),
            file_path: component.full_path.clone(),
        });
        self.node_index.insert(id.clone(), idx);
        self.order.push(id.clone());
        id
    }

    /// Add an import edge between two components.
    ///
    /// Returns true if the edge was added; false for self-references,
    /// duplicate edges, or endpoints that don't exist.
    pub fn add_edge(&mut self, from: &ComponentId, to: &ComponentId) -> bool {
        if from == to {
            return false;
        }
        let (Some(&from_idx), Some(&to_idx)) =
            (self.node_index.get(from), self.node_index.get(to))
        else {
            return false;
        };

        if self.inner.find_edge(from_idx, to_idx).is_some() {
            return false;
        }

        self.inner.add_edge(from_idx, to_idx, ());
        true
    }

    /// Check whether a component id is a vertex of this graph.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// All component ids in insertion order.
    #[must_use]
    pub fn component_ids(&self) -> &[ComponentId] {
        &self.order
    }

    /// Outgoing neighbors of a component, in edge insertion order.
    ///
    /// Unknown ids yield an empty list.
    #[must_use]
    pub fn neighbors(&self, id: &str) -> Vec<ComponentId> {
        let Some(&idx) = self.node_index.get(id) else {
            return Vec::new();
        };

        let mut out: Vec<ComponentId> = self
            .inner
            .edges(idx)
            .map(|edge| self.inner[edge.target()].id.clone())
            .collect();
        // petgraph yields edges in reverse insertion order
        out.reverse();
        out
    }

    /// Get a vertex by its component id.
    #[must_use]
    pub fn get_node(&self, id: &str) -> Option<&ComponentNode> {
        self.node_index.get(id).map(|&idx| &self.inner[idx])
    }

    /// Number of vertices.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterator over all vertices in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &ComponentNode> {
        self.inner.node_weights()
    }

    /// All edges as (source id, target id) pairs, ordered by source
    /// insertion order then edge insertion order.
    #[must_use]
    pub fn edge_list(&self) -> Vec<(ComponentId, ComponentId)> {
        let mut out = Vec::with_capacity(self.edge_count());
        for id in &self.order {
            for target in self.neighbors(id) {
                out.push((id.clone(), target));
            }
        }
        out
    }

    /// Get the underlying petgraph for advanced operations.
    #[must_use]
    pub fn inner(&self) -> &DiGraph<ComponentNode, ()> {
        &self.inner
    }
}

/// Builder for constructing component dependency graphs.
///
/// # Example
///
/// ```rust,no_run
/// use nextlens::config::ResolutionOptions;
/// use nextlens::graph::{ComponentLookup, GraphBuilder};
///
/// let components = vec![/* from the parsing front end */];
/// let lookup = ComponentLookup::new(&components, &ResolutionOptions::default());
/// let graph = GraphBuilder::new().build(&components, &lookup).unwrap();
/// println!("Built graph with {} nodes", graph.node_count());
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    /// Create a new graph builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build a dependency graph from components and the lookup service.
    ///
    /// # Errors
    ///
    /// Returns an error if graph construction fails.
    pub fn build(
        &self,
        components: &[ComponentRelation],
        lookup: &ComponentLookup,
    ) -> Result<DependencyGraph> {
        tracing::debug!(components = components.len(), "Starting graph construction");
        let mut graph = DependencyGraph::new();

        // Phase 1: Add all component nodes
        tracing::debug!("Phase 1: Adding component nodes");
        let component_ids: Vec<ComponentId> =
            components.iter().map(|c| graph.add_component(c)).collect();
        tracing::debug!(nodes = graph.node_count(), "Component nodes added");

        // Phase 2: Resolve imports and create edges
        tracing::debug!("Phase 2: Creating import edges");
        let mut edges_added = 0;
        for (component, id) in components.iter().zip(&component_ids) {
            let mut seen: HashSet<ComponentId> = HashSet::new();
            for import in &component.imports {
                for target in lookup.resolve_import_to_component_ids(import) {
                    // Duplicate imports collapse to one edge; self-imports
                    // (a file importing itself through an alias) are dropped
                    if target == *id || !seen.insert(target.clone()) {
                        continue;
                    }
                    if graph.add_edge(id, &target) {
                        edges_added += 1;
                        tracing::debug!(
                            from = %id,
                            to = %target,
                            import = %import,
                            "Added import edge"
                        );
                    }
                }
            }
        }
        tracing::debug!(edges = edges_added, "Edge creation complete");

        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Graph built successfully"
        );

        Ok(graph)
    }
}
