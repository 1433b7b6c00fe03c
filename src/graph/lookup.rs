//! Component lookup service.
//!
//! Builds O(1) indexes over the component set and resolves textual import
//! specifiers (relative paths, path aliases, bare package names) to
//! component ids. External packages never resolve to internal vertices;
//! malformed specifiers resolve to empty result sets, never errors.

use crate::config::ResolutionOptions;
use crate::graph::identity::{generate_component_id, ComponentId};
use crate::types::ComponentRelation;
use std::collections::{HashMap, HashSet};

/// Source-file extensions stripped when normalizing an import specifier
/// to a module name.
const SOURCE_EXTENSIONS: &[&str] = &[".tsx", ".ts", ".jsx", ".js", ".mjs", ".cjs"];

/// Read-only lookup indexes over one run's component set.
///
/// # Example
///
/// ```rust,no_run
/// use nextlens::config::ResolutionOptions;
/// use nextlens::graph::ComponentLookup;
///
/// let components = vec![/* from the parsing front end */];
/// let lookup = ComponentLookup::new(&components, &ResolutionOptions::default());
///
/// assert!(lookup.resolve_import_to_component_ids("react").is_empty());
/// ```
#[derive(Debug)]
pub struct ComponentLookup {
    /// Component name → ids of all components declaring that name
    by_name: HashMap<String, Vec<ComponentId>>,

    /// Component id → full record
    by_id: HashMap<ComponentId, ComponentRelation>,

    /// Alias prefixes treated as internal (e.g., "@/" → "src/"),
    /// sorted for deterministic matching
    alias_prefixes: Vec<String>,

    /// Packages always treated as external
    forced_external: HashSet<String>,
}

impl ComponentLookup {
    /// Build the lookup indexes from the raw component set.
    #[must_use]
    pub fn new(components: &[ComponentRelation], options: &ResolutionOptions) -> Self {
        let mut by_name: HashMap<String, Vec<ComponentId>> = HashMap::new();
        let mut by_id: HashMap<ComponentId, ComponentRelation> = HashMap::new();

        for component in components {
            let id = generate_component_id(component);
            by_name
                .entry(component.name.clone())
                .or_default()
                .push(id.clone());

            if let Some(existing) = by_id.get(&id) {
                if existing.full_path != component.full_path {
                    tracing::warn!(
                        id = %id,
                        first = %existing.full_path.display(),
                        second = %component.full_path.display(),
                        "Component id collision; keeping first occurrence"
                    );
                }
                continue;
            }
            by_id.insert(id, component.clone());
        }

        let mut alias_prefixes: Vec<String> = options.path_aliases.keys().cloned().collect();
        alias_prefixes.sort();

        Self {
            by_name,
            by_id,
            alias_prefixes,
            forced_external: options.external_packages.iter().cloned().collect(),
        }
    }

    /// Resolve a raw import specifier to the internal component ids it
    /// could refer to.
    ///
    /// External packages resolve to an empty set; internal specifiers are
    /// normalized to a module name and matched against declared component
    /// names. Multiple matches are possible (barrel re-exports, several
    /// components per file) and all are returned — the graph is
    /// conservatively over-connected in ambiguous cases.
    #[must_use]
    pub fn resolve_import_to_component_ids(&self, specifier: &str) -> Vec<ComponentId> {
        if self.is_external_package(specifier) {
            return Vec::new();
        }

        let module_name = self.module_name_of(specifier);
        if module_name.is_empty() {
            return Vec::new();
        }

        self.by_name
            .get(module_name.as_str())
            .cloned()
            .unwrap_or_default()
    }

    /// O(1) reverse lookup; `None` means "display using the raw id."
    #[must_use]
    pub fn get_component_by_id(&self, id: &str) -> Option<&ComponentRelation> {
        self.by_id.get(id)
    }

    /// Display name for a component id, falling back to the raw id when
    /// the id is not resolvable.
    #[must_use]
    pub fn display_name(&self, id: &str) -> String {
        self.by_id
            .get(id)
            .map_or_else(|| id.to_string(), |c| c.name.clone())
    }

    /// Classify a specifier as an external (node_modules-style) package.
    ///
    /// Relative and absolute paths and recognized alias prefixes are
    /// internal; everything else is external. Packages listed in
    /// `resolution.external_packages` are external regardless.
    #[must_use]
    pub fn is_external_package(&self, specifier: &str) -> bool {
        if specifier.is_empty() {
            return true;
        }
        if let Some(name) = bare_package_name(specifier) {
            if self.forced_external.contains(&name) {
                return true;
            }
        }
        if specifier.starts_with('.') || specifier.starts_with('/') {
            return false;
        }
        if self
            .alias_prefixes
            .iter()
            .any(|prefix| specifier.starts_with(prefix.as_str()))
        {
            return false;
        }
        true
    }

    /// Extract the npm package name from an external specifier, handling
    /// scoped packages (`@scope/name/deep` → `@scope/name`). Returns
    /// `None` for internal specifiers.
    #[must_use]
    pub fn extract_package_name(&self, specifier: &str) -> Option<String> {
        if !self.is_external_package(specifier) {
            return None;
        }
        bare_package_name(specifier)
    }

    /// Normalize an internal specifier to the module name used for the
    /// name index: strip alias prefix, take the last path segment, strip
    /// a known source extension.
    fn module_name_of(&self, specifier: &str) -> String {
        let mut rest = specifier;
        for prefix in &self.alias_prefixes {
            if let Some(stripped) = rest.strip_prefix(prefix.as_str()) {
                rest = stripped;
                break;
            }
        }

        let segment = rest
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(rest);

        let mut name = segment;
        for ext in SOURCE_EXTENSIONS {
            if let Some(stripped) = name.strip_suffix(ext) {
                name = stripped;
                break;
            }
        }
        name.to_string()
    }
}

/// Package name of a bare specifier: first segment, or first two for a
/// scoped package. `None` when the specifier is path-like.
fn bare_package_name(specifier: &str) -> Option<String> {
    if specifier.is_empty() || specifier.starts_with('.') || specifier.starts_with('/') {
        return None;
    }
    let mut segments = specifier.split('/');
    let first = segments.next()?;
    if first.is_empty() {
        return None;
    }
    if first.starts_with('@') {
        // Scoped package: "@scope/name" (a lone "@scope" is malformed)
        let second = segments.next().filter(|s| !s.is_empty())?;
        return Some(format!("{first}/{second}"));
    }
    Some(first.to_string())
}
