use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use crate::{Error, Result, RouteComparison, options::OptimizerOptions};

/// Writes the comparison as JSON to `--output` (or stdout).
pub fn write_comparison(comparison: &RouteComparison, options: &OptimizerOptions) -> Result<()> {
    match options.output_path() {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::other(format!(
                    "failed to create output file {}: {e}",
                    path.display()
                ))
            })?;
            let mut writer = BufWriter::new(file);
            write_report(&mut writer, comparison, options.pretty)?;
            writer.flush()?;
            log::debug!("output: wrote report to {}", path.display());
        }
        None => {
            let mut writer = BufWriter::new(io::stdout().lock());
            write_report(&mut writer, comparison, options.pretty)?;
            writer.flush()?;
        }
    }
    Ok(())
}

/// Serializes `comparison` followed by a newline.
pub fn write_report<W: Write>(
    mut writer: W,
    comparison: &RouteComparison,
    pretty: bool,
) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, comparison)?;
    } else {
        serde_json::to_writer(&mut writer, comparison)?;
    }
    writeln!(writer)?;
    Ok(())
}
