use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use heavydep_report::Config;
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "heavydep")]
#[command(about = "Find out which third-party dependencies a Go package leans on", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Weigh the third-party imports of a Go package
    Weigh(Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Weigh(mut cfg) => {
            cfg.initialize()?;
            info!("Weighing package '{}' (recursive: {})", cfg.pkg, cfg.recursive);

            let result = heavydep_report::run_weigh(&cfg)?;
            debug!("Found {} dependencies", result.imports.len());

            if result.imports.is_empty() && !cfg.json {
                info!("No third-party dependencies");
                heavydep_report::print_no_dependencies_message(&mut stdout, &result.pkg)?;
                return Ok(());
            }

            if cfg.dot {
                heavydep_report::write_dot(&mut stdout, &result.imports)?;
            } else if cfg.json {
                heavydep_report::print_json(&mut stdout, &result.imports, cfg.top)?;
            } else {
                heavydep_report::print_weights(&mut stdout, &result.imports, cfg.top)?;

                let elapsed_ms = start.elapsed().as_millis();
                writeln!(
                    stdout,
                    "\n{} Finished in {}ms ({} dependencies).",
                    "●".bright_blue(),
                    elapsed_ms.to_string().cyan(),
                    result.imports.len().to_string().cyan()
                )?;
            }

            if let (Some(graph), Some(format)) = (&cfg.graph, cfg.graph_format)
                && heavydep_report::render_graph(&result.imports, graph, format)?
            {
                // Keep machine-readable output clean
                if cfg.dot || cfg.json {
                    info!("Graph written to {}", graph.display());
                } else {
                    writeln!(stdout, "{} Graph written to {}", "●".bright_blue(), graph.display())?;
                }
            }
            stdout.flush()?;

            Ok(())
        }
    }
}
