//! Plain text report generator.

use crate::config::Config;
use crate::error::Result;
use crate::reporter::ReportGenerator;
use crate::types::{DependencyAnalysisDetailedResult, RiskLevel};
use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table};

/// Text report generator for CLI output.
pub struct TextReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl TextReporter {
    /// Create a new text reporter.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            use_colors: config.output.colored,
            verbose: config.output.verbose,
        }
    }
}

impl ReportGenerator for TextReporter {
    fn generate(&self, result: &DependencyAnalysisDetailedResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header());
        output.push('\n');

        output.push_str(&self.format_summary(result));
        output.push('\n');

        if !result.circular_dependencies.circular_groups.is_empty() {
            output.push_str(&self.format_cycles(result));
            output.push('\n');
        }

        if !result.zombie_clusters.clusters.is_empty() {
            output.push_str(&self.format_clusters(result));
            output.push('\n');
        }

        if !result.dependency_analysis.unused_dependencies.is_empty()
            || !result.dependency_analysis.missing_dependencies.is_empty()
        {
            output.push_str(&self.format_packages(result));
            output.push('\n');
        }

        if self.verbose && !result.diagnostics.is_empty() {
            output.push_str(&self.format_diagnostics(result));
            output.push('\n');
        }

        output.push_str(&self.format_footer(result));

        Ok(output)
    }
}

impl TextReporter {
    /// Format the report header.
    fn format_header(&self) -> String {
        let title = "NextLens Analysis";
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

        if self.use_colors {
            format!(
                "\n{} {} {}\n{}\n",
                title.bright_white().bold(),
                version.dimmed(),
                format!("({timestamp})").dimmed(),
                "=".repeat(80).bright_blue(),
            )
        } else {
            format!("\n{title} {version} ({timestamp})\n{}\n", "=".repeat(80))
        }
    }

    /// Format the summary section.
    fn format_summary(&self, result: &DependencyAnalysisDetailedResult) -> String {
        let mut output = String::new();
        output.push_str(&self.section_title("Summary"));

        let cycle_stats = &result.circular_dependencies.stats;
        let zombie_stats = &result.zombie_clusters.stats;

        if self.use_colors {
            output.push_str(&format!(
                "  {} {} ({} critical) | {} {} ({} components)\n",
                cycle_stats.total_cycles.to_string().red().bold(),
                if cycle_stats.total_cycles == 1 { "cycle" } else { "cycles" },
                cycle_stats.critical_count,
                zombie_stats.total_clusters.to_string().yellow().bold(),
                if zombie_stats.total_clusters == 1 { "zombie cluster" } else { "zombie clusters" },
                zombie_stats.total_zombie_components,
            ));
        } else {
            output.push_str(&format!(
                "  {} {} ({} critical) | {} {} ({} components)\n",
                cycle_stats.total_cycles,
                if cycle_stats.total_cycles == 1 { "cycle" } else { "cycles" },
                cycle_stats.critical_count,
                zombie_stats.total_clusters,
                if zombie_stats.total_clusters == 1 { "zombie cluster" } else { "zombie clusters" },
                zombie_stats.total_zombie_components,
            ));
        }

        output.push_str(&format!(
            "  {} unused dependencies | {} missing dependencies | {} entry points\n",
            result.dependency_analysis.unused_dependencies.len(),
            result.dependency_analysis.missing_dependencies.len(),
            zombie_stats.entry_point_count,
        ));

        output
    }

    /// Format the circular dependency section.
    fn format_cycles(&self, result: &DependencyAnalysisDetailedResult) -> String {
        let mut output = String::new();
        output.push_str(&self.section_title("Circular Dependencies"));

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Cycle", "Size", "Critical", "Members"]);

        for group in &result.circular_dependencies.circular_groups {
            let critical_cell = if group.is_critical {
                Cell::new("yes").fg(Color::Red)
            } else {
                Cell::new("no")
            };
            table.add_row(vec![
                Cell::new(&group.id),
                Cell::new(group.size),
                critical_cell,
                Cell::new(group.components.join(" → ")),
            ]);
        }

        output.push_str(&table.to_string());
        output.push('\n');

        if self.verbose {
            for group in &result.circular_dependencies.circular_groups {
                for suggestion in &group.suggestions {
                    output.push_str(&format!("  {}: {suggestion}\n", group.id));
                }
            }
        }

        output
    }

    /// Format the zombie cluster section.
    fn format_clusters(&self, result: &DependencyAnalysisDetailedResult) -> String {
        let mut output = String::new();
        output.push_str(&self.section_title("Zombie Clusters"));

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Cluster", "Size", "Risk", "Components"]);

        for cluster in &result.zombie_clusters.clusters {
            let risk_cell = match cluster.risk {
                RiskLevel::High => Cell::new("high").fg(Color::Red),
                RiskLevel::Medium => Cell::new("medium").fg(Color::Yellow),
                RiskLevel::Low => Cell::new("low").fg(Color::Green),
            };
            table.add_row(vec![
                Cell::new(&cluster.id),
                Cell::new(cluster.size),
                risk_cell,
                Cell::new(cluster.components.join(", ")),
            ]);
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    /// Format the package drift section.
    fn format_packages(&self, result: &DependencyAnalysisDetailedResult) -> String {
        let mut output = String::new();
        output.push_str(&self.section_title("Package Dependencies"));

        for unused in &result.dependency_analysis.unused_dependencies {
            if self.use_colors {
                output.push_str(&format!("  {} {unused} declared but never imported\n", "unused".yellow()));
            } else {
                output.push_str(&format!("  unused {unused} declared but never imported\n"));
            }
        }
        for missing in &result.dependency_analysis.missing_dependencies {
            if self.use_colors {
                output.push_str(&format!("  {} {missing} imported but not declared\n", "missing".red()));
            } else {
                output.push_str(&format!("  missing {missing} imported but not declared\n"));
            }
        }

        output
    }

    /// Format collected diagnostics.
    fn format_diagnostics(&self, result: &DependencyAnalysisDetailedResult) -> String {
        let mut output = String::new();
        output.push_str(&self.section_title("Diagnostics"));
        for diagnostic in &result.diagnostics {
            output.push_str(&format!("  {diagnostic}\n"));
        }
        output
    }

    /// Format the report footer.
    fn format_footer(&self, result: &DependencyAnalysisDetailedResult) -> String {
        if result.has_critical_cycles() {
            let line = "Critical circular dependencies found";
            if self.use_colors {
                format!("\n{}\n", line.red().bold())
            } else {
                format!("\n{line}\n")
            }
        } else if result.has_warnings() {
            let line = "Issues found; see sections above";
            if self.use_colors {
                format!("\n{}\n", line.yellow())
            } else {
                format!("\n{line}\n")
            }
        } else {
            let line = "No dependency issues found";
            if self.use_colors {
                format!("\n{}\n", line.green())
            } else {
                format!("\n{line}\n")
            }
        }
    }

    /// Format a section title with its underline.
    fn section_title(&self, title: &str) -> String {
        let styled = if self.use_colors {
            title.bright_cyan().bold().to_string()
        } else {
            title.to_string()
        };
        format!("\n{styled}\n{}\n", "-".repeat(80))
    }
}
