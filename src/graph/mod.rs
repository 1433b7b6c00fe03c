//! Component Dependency Graph Module
//!
//! This module implements a directed graph data structure for representing
//! and analyzing import relationships between React/Next.js components.
//!
//! # Architecture Overview
//!
//! The dependency graph uses the `petgraph` library as its foundation,
//! providing efficient graph operations and algorithms:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  DEPENDENCY GRAPH                       │
//! ├─────────────────────────────────────────────────────────┤
//! │                                                         │
//! │  ┌──────────┐          ┌──────────┐      ┌──────────┐  │
//! │  │ "Header" │─────────▶│  "Logo"  │      │  "Page"  │  │
//! │  └──────────┘ imports  └──────────┘      └──────────┘  │
//! │       │                                       │         │
//! │       └──────────────▶ ┌──────────┐ ◀────────┘         │
//! │                        │ "Button" │                     │
//! │                        └──────────┘                     │
//! │                                                         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Identity
//!
//! Vertices are keyed by a canonical [`ComponentId`] (file stem + `#` +
//! component name) so that several components exported from one file stay
//! distinct, as do same-named components in different files. See
//! [`generate_component_id`].
//!
//! # Data Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────────┐
//! │ Component   │────▶│  Lookup     │────▶│   GraphBuilder   │
//! │ records     │     │  indexes    │     │                  │
//! │ (JSON)      │     └─────────────┘     └──────────────────┘
//! └─────────────┘                                  │
//!                          ┌───────────────────────┼──────────────┐
//!                          ▼                       ▼              ▼
//!                   ┌─────────────┐         ┌─────────────┐ ┌──────────┐
//!                   │  Detectors  │         │  Exporter   │ │ Reporter │
//!                   │ (cycles,    │         │ (DOT/JSON/  │ │          │
//!                   │  zombies)   │         │  Mermaid)   │ │          │
//!                   └─────────────┘         └─────────────┘ └──────────┘
//! ```
//!
//! # Example: Complete Workflow
//!
//! ```rust,no_run
//! use nextlens::config::ResolutionOptions;
//! use nextlens::graph::{export_graph, ComponentLookup, GraphBuilder};
//! use nextlens::types::{ComponentRelation, GraphFormat};
//!
//! // 1. Load component records produced by the parsing front end
//! let components: Vec<ComponentRelation> = vec![/* from JSON input */];
//!
//! // 2. Build the lookup indexes and the dependency graph
//! let lookup = ComponentLookup::new(&components, &ResolutionOptions::default());
//! let graph = GraphBuilder::new().build(&components, &lookup).unwrap();
//!
//! // 3. Query the graph
//! println!("Total nodes: {}", graph.node_count());
//! println!("Total edges: {}", graph.edge_count());
//!
//! // 4. Export for visualization
//! let dot_output = export_graph(&graph, GraphFormat::Dot).unwrap();
//! std::fs::write("components.dot", dot_output).unwrap();
//! ```

mod builder;
mod export;
mod identity;
mod lookup;

pub use builder::{ComponentNode, DependencyGraph, GraphBuilder};
pub use export::export_graph;
pub use identity::{generate_component_id, ComponentId, GraphVertex};
pub use lookup::ComponentLookup;
