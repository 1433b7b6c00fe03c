//! Component identity.
//!
//! Every component record is keyed by a canonical string id derived from
//! its file stem and declared name. Two components in different files may
//! share a name; the id keeps them apart as long as the file stems differ.
//! Builders detect and warn on residual collisions (same stem, same name,
//! different file) because a collision would silently merge unrelated
//! vertices.

use crate::types::ComponentRelation;
use serde::{Deserialize, Serialize};

/// Unique identifier for a component vertex.
///
/// Derived, deterministic function of the component's file path and name;
/// stable across repeated analysis of unchanged input.
pub type ComponentId = String;

/// Derive the canonical id for a component: file stem + `#` + name.
///
/// Pure function of (`full_path`, `name`); no I/O, never fails. A file
/// with no stem (unlikely, but possible for odd paths) falls back to the
/// lossy path string.
#[must_use]
pub fn generate_component_id(component: &ComponentRelation) -> ComponentId {
    let stem = component
        .full_path
        .file_stem()
        .map_or_else(
            || component.full_path.to_string_lossy().into_owned(),
            |s| s.to_string_lossy().into_owned(),
        );
    format!("{stem}#{}", component.name)
}

/// A vertex in the combined component + function-call graph.
///
/// The original system keyed function vertices by string concatenation
/// (`componentId + "." + funcName`), which collides when component ids
/// contain the separator. This composite key carries the parts separately
/// and only renders the dotted form for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GraphVertex {
    /// A file-level component vertex
    Component(ComponentId),
    /// A function declared inside a component
    Function {
        /// Owning component id
        component: ComponentId,
        /// Function name
        function: String,
    },
}

impl GraphVertex {
    /// Create a function vertex.
    #[must_use]
    pub fn function(component: impl Into<ComponentId>, function: impl Into<String>) -> Self {
        Self::Function {
            component: component.into(),
            function: function.into(),
        }
    }

    /// The component id this vertex belongs to.
    #[must_use]
    pub fn component_id(&self) -> &ComponentId {
        match self {
            Self::Component(id) => id,
            Self::Function { component, .. } => component,
        }
    }

    /// Check if this is a component (file-level) vertex.
    #[must_use]
    pub const fn is_component(&self) -> bool {
        matches!(self, Self::Component(_))
    }

    /// Check if this is a function vertex.
    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self, Self::Function { .. })
    }

    /// Render the legacy dotted label (`componentId.functionName`).
    ///
    /// Display only; never parsed back.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Component(id) => id.clone(),
            Self::Function {
                component,
                function,
            } => format!("{component}.{function}"),
        }
    }
}

impl std::fmt::Display for GraphVertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
