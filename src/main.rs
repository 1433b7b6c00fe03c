//! NextLens CLI entry point.
//!
//! This binary provides the command-line interface for NextLens.

use clap::Parser;
use nextlens::cli::{Cli, Commands};
use nextlens::{ComponentAnalyzer, Config};
use std::error::Error;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    // Run the appropriate command
    match run(cli).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");

            // Print error with full chain
            eprintln!("Error: {e}");

            let mut source = e.source();
            if source.is_some() {
                eprintln!("\nCaused by:");
                let mut i = 0;
                while let Some(cause) = source {
                    eprintln!("  {i}: {cause}");
                    source = cause.source();
                    i += 1;
                }
            }

            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        // RUST_LOG from the environment wins over the verbose flag
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let base_level = match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            // nextlens at the requested level, everything else at warn
            EnvFilter::new(format!("warn,nextlens={base_level}"))
        })
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    // Load configuration
    tracing::debug!("Loading configuration");
    let config = load_config(&cli)?;
    tracing::debug!("Configuration loaded successfully");

    match cli.command {
        Commands::Analyze(args) => {
            tracing::debug!("Executing analyze command");
            let mut config = config;
            if args.continue_on_error {
                config.scan.continue_on_error = true;
            }

            let analyzer = ComponentAnalyzer::new(config.clone());
            let components = analyzer.load_components(&args.inputs).await?;

            let project_path = if args.skip_packages {
                None
            } else {
                Some(args.project.as_path())
            };
            let result = analyzer.analyze(&components, project_path).await?;

            // Generate report
            let reporter = nextlens::reporter::Reporter::new(&config);
            let report = reporter.generate(&result, args.format)?;

            // Output report
            if let Some(output_path) = args.output {
                std::fs::write(&output_path, &report)?;
                tracing::info!(path = %output_path.display(), "Report written");
            } else {
                println!("{report}");
            }

            // Return appropriate exit code
            let exit_code = if result.has_critical_cycles() {
                2 // Critical cycles found
            } else if result.has_warnings() && args.strict {
                1 // Findings in strict mode
            } else {
                0 // Success
            };

            Ok(ExitCode::from(exit_code))
        }

        Commands::Graph(args) => {
            let analyzer = ComponentAnalyzer::new(config);
            let components = analyzer.load_components(&args.inputs).await?;
            let graph = analyzer.build_graph(&components)?;

            // Output graph in requested format
            let graph_output = nextlens::graph::export_graph(&graph, args.format)?;

            if let Some(output_path) = args.output {
                std::fs::write(&output_path, &graph_output)?;
                tracing::info!(path = %output_path.display(), "Graph written");
            } else {
                println!("{graph_output}");
            }

            Ok(ExitCode::from(0))
        }

        Commands::Init => {
            // Generate example configuration file
            let example_config = Config::example_yaml();
            let config_path = std::path::Path::new("nextlens.yaml");

            if config_path.exists() {
                anyhow::bail!("Configuration file already exists: {}", config_path.display());
            }

            std::fs::write(config_path, example_config)?;
            println!("Created example configuration: nextlens.yaml");
            Ok(ExitCode::from(0))
        }

        Commands::Validate(args) => {
            // Validate configuration file
            let config_content = std::fs::read_to_string(&args.config)?;
            match Config::from_yaml(&config_content) {
                Ok(_) => {
                    println!("Configuration is valid: {}", args.config.display());
                    Ok(ExitCode::from(0))
                }
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    Ok(ExitCode::from(1))
                }
            }
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    // Check for explicit config file
    if let Some(ref config_path) = cli.config {
        tracing::debug!(path = %config_path.display(), "Loading configuration from explicit path");
        let content = std::fs::read_to_string(config_path)?;
        return Ok(Config::from_yaml(&content)?);
    }

    // Look for default config files
    let default_paths = ["nextlens.yaml", "nextlens.yml", ".nextlens.yaml"];
    tracing::debug!("Searching for default configuration files");
    for path in &default_paths {
        if std::path::Path::new(path).exists() {
            tracing::debug!(path = %path, "Found configuration file");
            let content = std::fs::read_to_string(path)?;
            return Ok(Config::from_yaml(&content)?);
        }
    }

    tracing::debug!("No configuration file found, using default configuration");
    Ok(Config::default())
}
