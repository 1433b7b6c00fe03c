//! package.json dependency drift analysis.
//!
//! Cross-references the dependencies a project declares against the
//! packages its components and config files actually import. Declared but
//! never imported means unused; imported but never declared means missing.
//!
//! File reads are best-effort: a config file that cannot be read or a
//! malformed package.json section produces a diagnostic, not a failed run.

use crate::config::PackageOptions;
use crate::error::Result;
use crate::graph::ComponentLookup;
use crate::types::{ComponentRelation, DependencyAnalysisResult, Diagnostic};
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// Node.js built-in modules, never reported as missing dependencies.
const NODE_BUILTINS: &[&str] = &[
    "assert", "buffer", "child_process", "cluster", "crypto", "dgram", "dns", "events", "fs",
    "http", "http2", "https", "net", "os", "path", "perf_hooks", "process", "querystring",
    "readline", "stream", "string_decoder", "timers", "tls", "tty", "url", "util", "v8", "vm",
    "worker_threads", "zlib",
];

/// Analyzer for unused and missing npm dependencies.
///
/// # Example
///
/// ```rust,no_run
/// use nextlens::analyzer::PackageDependencyAnalyzer;
/// use nextlens::config::Config;
///
/// let config = Config::default();
/// let analyzer = PackageDependencyAnalyzer::new("path/to/project", &config.packages);
/// ```
pub struct PackageDependencyAnalyzer {
    project_path: PathBuf,
    options: PackageOptions,
    import_pattern: Regex,
}

impl PackageDependencyAnalyzer {
    /// Create a new analyzer rooted at the given project directory.
    #[must_use]
    pub fn new(project_path: impl Into<PathBuf>, options: &PackageOptions) -> Self {
        Self {
            project_path: project_path.into(),
            options: options.clone(),
            // require('pkg') and import ... from 'pkg'
            #[allow(clippy::expect_used)]
            import_pattern: Regex::new(
                r#"(?:require\s*\(\s*|from\s+)['"]([^'"]+)['"]"#,
            )
            .expect("import pattern is valid"),
        }
    }

    /// Diff declared package.json dependencies against the packages the
    /// codebase imports.
    ///
    /// Diagnostics collect per-file failures; the result is best-effort
    /// over whatever could be read.
    ///
    /// # Errors
    ///
    /// Returns an error only when the project's package.json itself cannot
    /// be read or parsed; everything else degrades to diagnostics.
    pub async fn analyze(
        &self,
        components: &[ComponentRelation],
        lookup: &ComponentLookup,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<DependencyAnalysisResult> {
        tracing::debug!(project = %self.project_path.display(), "Starting package dependency analysis");

        // Phase 1: Declared dependencies
        let declared = self.read_declared_dependencies().await?;
        tracing::debug!(declared = declared.len(), "Declared dependencies loaded");

        // Phase 2: Packages imported by components
        let mut used: BTreeSet<String> = BTreeSet::new();
        for component in components {
            for import in &component.imports {
                if let Some(package) = lookup.extract_package_name(import) {
                    used.insert(package);
                }
            }
        }

        // Phase 3: Packages imported by config files
        for path in self.discover_config_files(diagnostics) {
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => {
                    for capture in self.import_pattern.captures_iter(&content) {
                        let specifier = &capture[1];
                        if let Some(package) = lookup.extract_package_name(specifier) {
                            used.insert(package);
                        }
                    }
                }
                Err(e) => {
                    diagnostics.push(Diagnostic::with_path(
                        format!("Failed to read config file: {e}"),
                        path,
                    ));
                }
            }
        }
        tracing::debug!(used = used.len(), "Used packages collected");

        // Phase 4: Diff
        let ignored: HashSet<&str> = self
            .options
            .ignore_packages
            .iter()
            .map(String::as_str)
            .collect();
        let declared_set: HashSet<&str> = declared.iter().map(String::as_str).collect();

        let unused_dependencies: Vec<String> = declared
            .iter()
            .filter(|d| !used.contains(*d) && !ignored.contains(d.as_str()))
            .cloned()
            .collect();
        let missing_dependencies: Vec<String> = used
            .iter()
            .filter(|u| {
                !declared_set.contains(u.as_str())
                    && !ignored.contains(u.as_str())
                    && !NODE_BUILTINS.contains(&u.as_str())
                    && !u.starts_with("node:")
            })
            .cloned()
            .collect();

        tracing::info!(
            unused = unused_dependencies.len(),
            missing = missing_dependencies.len(),
            "Package dependency analysis complete"
        );

        Ok(DependencyAnalysisResult {
            declared_dependencies: declared,
            used_packages: used.into_iter().collect(),
            unused_dependencies,
            missing_dependencies,
        })
    }

    /// Load the sorted union of `dependencies` and `devDependencies` from
    /// the project's package.json.
    async fn read_declared_dependencies(&self) -> Result<Vec<String>> {
        let path = self.project_path.join("package.json");
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            crate::err!(PackageJson {
                path: path.clone(),
                message: format!("cannot read: {e}"),
            })
        })?;

        let manifest: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
            crate::err!(PackageJson {
                path: path.clone(),
                message: format!("invalid JSON: {e}"),
            })
        })?;

        let mut declared = BTreeSet::new();
        for section in ["dependencies", "devDependencies"] {
            if let Some(map) = manifest.get(section).and_then(|v| v.as_object()) {
                declared.extend(map.keys().cloned());
            }
        }
        Ok(declared.into_iter().collect())
    }

    /// Find the configured project config files, walking the tree and
    /// honoring the exclude globs.
    fn discover_config_files(&self, diagnostics: &mut Vec<Diagnostic>) -> Vec<PathBuf> {
        let wanted: HashSet<&str> = self
            .options
            .config_files
            .iter()
            .map(String::as_str)
            .collect();
        if wanted.is_empty() {
            return Vec::new();
        }

        let exclude: Vec<glob::Pattern> = self
            .options
            .exclude_patterns
            .iter()
            .filter_map(|p| match glob::Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    diagnostics.push(Diagnostic::new(format!("Invalid exclude pattern '{p}': {e}")));
                    None
                }
            })
            .collect();

        let mut found = Vec::new();
        for entry in walkdir::WalkDir::new(&self.project_path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !is_excluded(e.path(), &exclude))
        {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    let name = entry.file_name().to_string_lossy();
                    if wanted.contains(name.as_ref()) {
                        found.push(entry.into_path());
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    diagnostics.push(Diagnostic::new(format!("Directory walk error: {e}")));
                }
            }
        }
        found.sort();
        found
    }
}

/// Check a path against the exclude globs.
fn is_excluded(path: &Path, exclude: &[glob::Pattern]) -> bool {
    let text = path.to_string_lossy();
    exclude.iter().any(|pattern| pattern.matches(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ResolutionOptions};
    use std::collections::HashMap;

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

    fn write_project(dir: &Path, package_json: &str) {
        std::fs::write(dir.join("package.json"), package_json).unwrap();
    }

    #[tokio::test]
    async fn test_unused_and_missing_detection() {
        let temp = tempfile::tempdir().unwrap();
        write_project(
            temp.path(),
            r#"{
                "dependencies": { "react": "^18.0.0", "lodash": "^4.17.0" },
                "devDependencies": { "typescript": "^5.0.0" }
            }"#,
        );

        let components = vec![
            component("App", &["react", "axios", "./Header"]),
            component("Header", &["react", "path"]),
        ];
        let lookup = ComponentLookup::new(&components, &ResolutionOptions::default());
        let config = Config::default();
        let analyzer = PackageDependencyAnalyzer::new(temp.path(), &config.packages);

        let mut diagnostics = Vec::new();
        let result = analyzer
            .analyze(&components, &lookup, &mut diagnostics)
            .await
            .unwrap();

        assert_eq!(
            result.declared_dependencies,
            vec!["lodash", "react", "typescript"]
        );
        // Internal imports and node builtins never count as packages
        assert!(result.used_packages.contains(&"axios".to_string()));
        assert!(!result.used_packages.contains(&"./Header".to_string()));
        assert_eq!(result.unused_dependencies, vec!["lodash", "typescript"]);
        assert_eq!(result.missing_dependencies, vec!["axios"]);
        assert!(diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_config_file_imports_count_as_used() {
        let temp = tempfile::tempdir().unwrap();
        write_project(temp.path(), r#"{ "dependencies": { "tailwindcss": "^3.0.0" } }"#);
        std::fs::write(
            temp.path().join("tailwind.config.js"),
            "const plugin = require('tailwindcss/plugin');\nmodule.exports = {};\n",
        )
        .unwrap();

        let components = vec![component("App", &[])];
        let lookup = ComponentLookup::new(&components, &ResolutionOptions::default());
        let config = Config::default();
        let analyzer = PackageDependencyAnalyzer::new(temp.path(), &config.packages);

        let mut diagnostics = Vec::new();
        let result = analyzer
            .analyze(&components, &lookup, &mut diagnostics)
            .await
            .unwrap();

        assert!(result.used_packages.contains(&"tailwindcss".to_string()));
        assert!(result.unused_dependencies.is_empty());
    }

    #[tokio::test]
    async fn test_ignored_packages_are_skipped() {
        let temp = tempfile::tempdir().unwrap();
        write_project(temp.path(), r#"{ "dependencies": { "eslint": "^9.0.0" } }"#);

        let components = vec![component("App", &[])];
        let lookup = ComponentLookup::new(&components, &ResolutionOptions::default());
        let mut config = Config::default();
        config.packages.ignore_packages = vec!["eslint".to_string()];
        let analyzer = PackageDependencyAnalyzer::new(temp.path(), &config.packages);

        let mut diagnostics = Vec::new();
        let result = analyzer
            .analyze(&components, &lookup, &mut diagnostics)
            .await
            .unwrap();
        assert!(result.unused_dependencies.is_empty());
    }

    #[tokio::test]
    async fn test_missing_package_json_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let components = vec![component("App", &[])];
        let lookup = ComponentLookup::new(&components, &ResolutionOptions::default());
        let config = Config::default();
        let analyzer = PackageDependencyAnalyzer::new(temp.path(), &config.packages);

        let mut diagnostics = Vec::new();
        let result = analyzer.analyze(&components, &lookup, &mut diagnostics).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_node_modules_excluded_from_discovery() {
        let temp = tempfile::tempdir().unwrap();
        write_project(temp.path(), r#"{ "dependencies": {} }"#);
        let nested = temp.path().join("node_modules").join("some-pkg");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            nested.join("next.config.js"),
            "const x = require('should-not-appear');\n",
        )
        .unwrap();

        let components = vec![component("App", &[])];
        let lookup = ComponentLookup::new(&components, &ResolutionOptions::default());
        let config = Config::default();
        let analyzer = PackageDependencyAnalyzer::new(temp.path(), &config.packages);

        let mut diagnostics = Vec::new();
        let result = analyzer
            .analyze(&components, &lookup, &mut diagnostics)
            .await
            .unwrap();
        assert!(!result.used_packages.contains(&"should-not-appear".to_string()));
    }
}
