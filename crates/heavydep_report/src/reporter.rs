use std::io::{self, Write};

use colored::Colorize;
use log::{debug, trace};

use heavydep_core::WeightedImport;

/// Rows to show for a `--top` value; 0 shows everything
fn shown(imports: &[WeightedImport], top: usize) -> &[WeightedImport] {
    if top > 0 && top < imports.len() { &imports[..top] } else { imports }
}

/// Prints one `[name] weight` row per dependency, heaviest first as given.
pub fn print_weights<W: Write>(
    writer: &mut W,
    imports: &[WeightedImport],
    top: usize,
) -> io::Result<()> {
    let rows = shown(imports, top);
    debug!("Printing {} of {} dependencies", rows.len(), imports.len());

    let width = rows.iter().map(|imp| imp.name.len()).max().unwrap_or(0);
    for imp in rows {
        trace!("Row: {} ({})", imp.name, imp.weight);
        let label = format!("{:<pad$}", format!("[{}]", imp.name), pad = width + 2);
        writeln!(writer, "{} {}", label.bright_white(), imp.weight.to_string().yellow().bold())?;
    }

    if rows.len() < imports.len() {
        writeln!(
            writer,
            "{}",
            format!("... and {} more", imports.len() - rows.len()).dimmed()
        )?;
    }

    writer.flush()?;
    Ok(())
}

/// Prints the dependencies as a pretty JSON array.
pub fn print_json<W: Write>(writer: &mut W, imports: &[WeightedImport], top: usize) -> io::Result<()> {
    let rows = shown(imports, top);
    debug!("Printing {} dependencies as JSON", rows.len());
    serde_json::to_writer_pretty(&mut *writer, rows)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn print_no_dependencies_message<W: Write>(writer: &mut W, pkg: &str) -> io::Result<()> {
    debug!("No third-party dependencies for '{}'", pkg);
    writeln!(writer, "{} package {:?} has no third-party dependencies", "✓".green().bold(), pkg)?;
    writer.flush()?;
    Ok(())
}
