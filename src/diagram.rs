//! Diagram payload types.
//!
//! Detectors emit renderer-agnostic node/edge payloads with absolute 2D
//! positions, consumed by an external flow-diagram UI. The JSON shape is
//! a wire contract: field names, nesting, and the version string must
//! stay stable across releases.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Version string stamped into every diagram payload. Bump only on an
/// incompatible shape change.
pub const DIAGRAM_VERSION: &str = "1.1.0";

/// A complete renderable diagram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramData {
    /// Positioned nodes
    pub nodes: Vec<DiagramNode>,
    /// Edges between nodes
    pub edges: Vec<DiagramEdge>,
    /// Payload shape version
    pub version: String,
}

impl DiagramData {
    /// Create a diagram stamped with the current payload version.
    #[must_use]
    pub fn new(nodes: Vec<DiagramNode>, edges: Vec<DiagramEdge>) -> Self {
        Self {
            nodes,
            edges,
            version: DIAGRAM_VERSION.to_string(),
        }
    }

    /// An empty diagram (still carries the version stamp).
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl Default for DiagramData {
    fn default() -> Self {
        Self::empty()
    }
}

/// Absolute 2D position of a diagram node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

/// The semantic role of a diagram node.
///
/// Serialized as the lowercase role string the renderer dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Member of a circular dependency ring
    Circular,
    /// Unreachable component
    Zombie,
    /// Function inside a zombie component
    Function,
    /// Cluster grouping container
    Cluster,
}

impl NodeKind {
    /// The wire string for this kind.
    #[must_use]
    pub const fn type_str(self) -> &'static str {
        match self {
            Self::Circular => "circular",
            Self::Zombie => "zombie",
            Self::Function => "function",
            Self::Cluster => "cluster",
        }
    }
}

/// Display payload attached to a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    /// Label shown on the node
    pub label: String,
    /// Free-form detail line, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// One positioned node of a diagram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramNode {
    /// Node id, unique within the diagram
    pub id: String,
    /// Absolute position
    pub position: Position,
    /// Display payload
    pub data: NodeData,
    /// Renderer dispatch kind
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

impl DiagramNode {
    /// Create a node with a plain label.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: NodeKind, label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            position: Position { x, y },
            data: NodeData {
                label: label.into(),
                detail: None,
            },
            kind,
        }
    }

    /// Attach a detail line.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.data.detail = Some(detail.into());
        self
    }
}

/// Stroke styling for a diagram edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeStyle {
    /// Stroke color (CSS color string)
    pub stroke: String,
    /// Stroke width in pixels
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
}

impl EdgeStyle {
    /// Red emphasis stroke used for circular dependency rings.
    #[must_use]
    pub fn circular() -> Self {
        Self {
            stroke: "#ef4444".to_string(),
            stroke_width: 2.0,
        }
    }

    /// Muted stroke used for zombie cluster structure edges.
    #[must_use]
    pub fn zombie() -> Self {
        Self {
            stroke: "#9ca3af".to_string(),
            stroke_width: 1.5,
        }
    }
}

/// Display payload attached to an edge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgeData {
    /// Label shown along the edge, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// One edge of a diagram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramEdge {
    /// Edge id, unique within the diagram
    pub id: String,
    /// Source node id
    pub source: String,
    /// Target node id
    pub target: String,
    /// Display payload
    pub data: EdgeData,
    /// Whether the renderer animates the edge
    pub animated: bool,
    /// Stroke styling
    pub style: EdgeStyle,
    /// Arrowhead marker name
    #[serde(rename = "markerEnd")]
    pub marker_end: String,
}

impl DiagramEdge {
    /// Create an edge between two nodes.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        style: EdgeStyle,
        animated: bool,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            data: EdgeData::default(),
            animated,
            style,
            marker_end: "arrowclosed".to_string(),
        }
    }
}

/// Place `count` nodes evenly on a circle; node `index` sits at angle
/// `2π·index/count` from the positive x axis.
///
/// A `count` of zero yields the center.
#[must_use]
pub fn circle_position(index: usize, count: usize, center_x: f64, center_y: f64, radius: f64) -> Position {
    if count == 0 {
        return Position {
            x: center_x,
            y: center_y,
        };
    }
    #[allow(clippy::cast_precision_loss)]
    let angle = 2.0 * PI * (index as f64) / (count as f64);
    Position {
        x: center_x + radius * angle.cos(),
        y: center_y + radius * angle.sin(),
    }
}
